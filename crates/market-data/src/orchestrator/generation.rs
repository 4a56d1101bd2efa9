//! Supersession tracking.
//!
//! Every orchestration takes a ticket from a shared counter. Starting a newer
//! orchestration bumps the counter, which makes older tickets stale: the
//! driver stops issuing calls for them and the store drops their results.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Shared counter handing out generations.
#[derive(Clone, Debug, Default)]
pub struct Generations {
    latest: Arc<AtomicU64>,
}

impl Generations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new generation, superseding every ticket issued before.
    pub fn next(&self) -> GenerationTicket {
        let id = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        GenerationTicket {
            id,
            latest: Some(Arc::clone(&self.latest)),
        }
    }

    pub fn latest(&self) -> u64 {
        self.latest.load(Ordering::SeqCst)
    }
}

/// Identity of one orchestration.
#[derive(Clone, Debug)]
pub struct GenerationTicket {
    id: u64,
    latest: Option<Arc<AtomicU64>>,
}

impl GenerationTicket {
    /// A ticket that is never superseded, for callers that do not track
    /// generations.
    pub fn detached() -> Self {
        Self {
            id: 0,
            latest: None,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn is_current(&self) -> bool {
        match &self.latest {
            Some(latest) => latest.load(Ordering::SeqCst) == self.id,
            None => true,
        }
    }
}

//! Attempt trail recorded while a series load runs.

use std::time::Duration;

/// How a single attempt ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AttemptResult {
    /// Series fetch returned this many points.
    Data(usize),
    /// Series fetch succeeded with nothing in it.
    Empty,
    /// Refresh call succeeded.
    Refreshed { new_records: u64 },
    /// Gateway call failed.
    Error(String),
}

/// Record of one gateway call.
#[derive(Clone, Debug)]
pub struct AttemptRecord {
    pub attempt: &'static str,
    pub result: AttemptResult,
    pub elapsed: Duration,
}

/// Everything the driver did for one load, in order.
#[derive(Clone, Debug, Default)]
pub struct AttemptTrail {
    pub attempts: Vec<AttemptRecord>,
}

impl AttemptTrail {
    pub fn new() -> Self {
        Self {
            attempts: Vec::new(),
        }
    }

    pub fn record(&mut self, attempt: &'static str, result: AttemptResult, elapsed: Duration) {
        self.attempts.push(AttemptRecord {
            attempt,
            result,
            elapsed,
        });
    }

    pub fn len(&self) -> usize {
        self.attempts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attempts.is_empty()
    }

    /// Attempt labels in execution order.
    pub fn labels(&self) -> Vec<&'static str> {
        self.attempts.iter().map(|a| a.attempt).collect()
    }

    /// One-line summary for logs, e.g. `primary=empty -> refresh=ok -> refetch=30`.
    pub fn summary(&self) -> String {
        self.attempts
            .iter()
            .map(|a| {
                let result = match &a.result {
                    AttemptResult::Data(n) => n.to_string(),
                    AttemptResult::Empty => "empty".to_string(),
                    AttemptResult::Refreshed { .. } => "ok".to_string(),
                    AttemptResult::Error(e) => format!("error({})", e),
                };
                format!("{}={}", a.attempt, result)
            })
            .collect::<Vec<_>>()
            .join(" -> ")
    }
}

use std::sync::{Arc, PoisonError, RwLock};

use super::RequestState;
use crate::orchestrator::GenerationTicket;

#[derive(Clone, Copy, Debug)]
pub(super) enum Flag {
    Loading,
    Refreshing,
    LoadingRecommendations,
}

impl Flag {
    fn slot(self, state: &mut RequestState) -> &mut bool {
        match self {
            Self::Loading => &mut state.loading,
            Self::Refreshing => &mut state.refreshing,
            Self::LoadingRecommendations => &mut state.loading_recommendations,
        }
    }
}

/// Raises a progress flag for as long as it lives.
///
/// The flag is lowered on drop, so every exit path (including a dropped
/// future) releases it. A superseded owner leaves the flag alone: the newer
/// operation owns it now and will lower it itself.
pub(super) struct FlagGuard {
    state: Arc<RwLock<RequestState>>,
    flag: Flag,
    ticket: GenerationTicket,
}

impl FlagGuard {
    pub(super) fn raise(
        state: Arc<RwLock<RequestState>>,
        flag: Flag,
        ticket: GenerationTicket,
    ) -> Self {
        *flag.slot(&mut state.write().unwrap_or_else(PoisonError::into_inner)) = true;
        Self {
            state,
            flag,
            ticket,
        }
    }
}

impl Drop for FlagGuard {
    fn drop(&mut self) {
        if self.ticket.is_current() {
            let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
            *self.flag.slot(&mut state) = false;
        }
    }
}

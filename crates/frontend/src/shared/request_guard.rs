//! Stale response protection for page loads.
//!
//! Each load takes a [`RequestTicket`] from the page's [`RequestGuard`]. A
//! newer load, or disposal of the page, makes older tickets stale, and their
//! responses are dropped instead of being written into page state.

use leptos::prelude::*;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

#[derive(Debug, Default)]
struct GuardState {
    generation: AtomicU64,
    disposed: AtomicBool,
}

#[derive(Debug, Clone, Default)]
pub struct RequestGuard {
    state: Arc<GuardState>,
}

impl RequestGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a request; every ticket handed out before this one becomes stale.
    pub fn begin(&self) -> RequestTicket {
        let generation = self.state.generation.fetch_add(1, Ordering::SeqCst) + 1;
        RequestTicket {
            generation,
            state: Arc::clone(&self.state),
        }
    }

    /// Make all outstanding tickets stale without starting a new request.
    pub fn invalidate(&self) {
        self.state.generation.fetch_add(1, Ordering::SeqCst);
    }

    /// Called from `on_cleanup`: nothing issued by this guard may commit
    /// afterwards.
    pub fn dispose(&self) {
        self.state.disposed.store(true, Ordering::SeqCst);
    }

    pub fn is_disposed(&self) -> bool {
        self.state.disposed.load(Ordering::SeqCst)
    }
}

#[derive(Debug)]
pub struct RequestTicket {
    generation: u64,
    state: Arc<GuardState>,
}

impl RequestTicket {
    pub fn is_current(&self) -> bool {
        !self.state.disposed.load(Ordering::SeqCst)
            && self.state.generation.load(Ordering::SeqCst) == self.generation
    }

    /// Run `commit` only if the ticket is still current. Returns whether it
    /// ran.
    pub fn commit(self, commit: impl FnOnce()) -> bool {
        if self.is_current() {
            commit();
            true
        } else {
            log::debug!("dropping stale response (generation {})", self.generation);
            false
        }
    }
}

/// Guard owned by the current component and disposed together with it.
pub fn use_request_guard() -> StoredValue<RequestGuard> {
    let guard = RequestGuard::new();
    let on_dispose = guard.clone();
    on_cleanup(move || on_dispose.dispose());
    StoredValue::new(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newer_request_wins() {
        let guard = RequestGuard::new();
        let first = guard.begin();
        let second = guard.begin();

        assert!(!first.is_current());
        assert!(second.is_current());

        let mut committed = Vec::new();
        assert!(!first.commit(|| committed.push(1)));
        assert!(second.commit(|| committed.push(2)));
        assert_eq!(committed, vec![2]);
    }

    #[test]
    fn test_dispose_blocks_commit() {
        let guard = RequestGuard::new();
        let ticket = guard.begin();
        guard.clone().dispose();

        assert!(guard.is_disposed());
        let mut ran = false;
        assert!(!ticket.commit(|| ran = true));
        assert!(!ran);
        assert!(!guard.begin().is_current());
    }

    #[test]
    fn test_invalidate() {
        let guard = RequestGuard::new();
        let ticket = guard.begin();
        guard.invalidate();
        assert!(!ticket.is_current());
    }
}

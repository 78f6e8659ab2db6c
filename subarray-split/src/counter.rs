use std::sync::atomic::{AtomicU64, Ordering};

/// Counts every candidate produced by a following-drop transition.
///
/// Purely diagnostic, the search never reads it back. Owned by whoever
/// drives a search and handed down by reference.
#[derive(Debug, Default)]
pub struct CandidateCounter {
    visited: AtomicU64,
}

impl CandidateCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self) {
        self.visited.fetch_add(1, Ordering::Relaxed);
    }

    pub fn get(&self) -> u64 {
        self.visited.load(Ordering::Relaxed)
    }

    /// Returns the count before the reset.
    pub fn reset(&self) -> u64 {
        self.visited.swap(0, Ordering::Relaxed)
    }
}

//! Failure statistics tracking.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use strum::IntoEnumIterator;

use super::types::FailureKind;

/// Thread-safe per-category failure counters.
///
/// Every `FailureKind` is initialized to zero on creation, so the counters can
/// be shared through an `Arc` and incremented from any job task.
#[derive(Debug)]
pub struct FailureStats {
    counts: HashMap<FailureKind, AtomicUsize>,
}

impl Default for FailureStats {
    fn default() -> Self {
        Self::new()
    }
}

impl FailureStats {
    pub fn new() -> Self {
        let counts = FailureKind::iter()
            .map(|kind| (kind, AtomicUsize::new(0)))
            .collect();
        FailureStats { counts }
    }

    pub fn increment(&self, kind: FailureKind) {
        if let Some(counter) = self.counts.get(&kind) {
            counter.fetch_add(1, Ordering::Relaxed);
        } else {
            log::error!(
                "Attempted to increment failure counter for {:?} which is not in the map",
                kind
            );
        }
    }

    pub fn count(&self, kind: FailureKind) -> usize {
        self.counts
            .get(&kind)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        FailureKind::iter().map(|kind| self.count(kind)).sum()
    }
}

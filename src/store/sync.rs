//! Write committed state back to the store.

use tracing::{debug, warn};

use crate::engine::{Slice, VibeState};

use super::{SliceStore, StoreError};

/// Outcome of one write-back pass. Failures are reported, never raised.
#[derive(Debug, Default)]
pub struct SyncReport {
    pub written: Vec<Slice>,
    pub failed: Vec<(Slice, StoreError)>,
}

impl SyncReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Write every slice that differs between `prev` and `next`.
pub fn sync<S: SliceStore + ?Sized>(store: &S, prev: &VibeState, next: &VibeState) -> SyncReport {
    write_slices(store, next, &next.changed_slices(prev))
}

/// Write every slice of `state`, changed or not.
pub fn write_all<S: SliceStore + ?Sized>(store: &S, state: &VibeState) -> SyncReport {
    write_slices(store, state, Slice::all())
}

fn write_slices<S: SliceStore + ?Sized>(store: &S, state: &VibeState, slices: &[Slice]) -> SyncReport {
    let mut report = SyncReport::default();
    for &slice in slices {
        let result = state
            .encode_slice(slice)
            .map_err(|source| StoreError::Encode {
                key: slice.key().to_string(),
                source,
            })
            .and_then(|json| store.write(slice.key(), &json));
        match result {
            Ok(()) => report.written.push(slice),
            Err(e) => {
                warn!(slice = %slice, error = %e, "Failed to persist slice");
                report.failed.push((slice, e));
            }
        }
    }
    if !report.written.is_empty() {
        debug!(written = ?report.written, "Persisted slices");
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn only_changed_slices_are_written() {
        let store = MemoryStore::new();
        let prev = VibeState::default();
        let mut next = prev.clone();
        next.location = "Kyoto".into();

        let report = sync(&store, &prev, &next);
        assert_eq!(report.written, vec![Slice::Location]);
        assert_eq!(store.write_log(), vec!["location".to_string()]);
        assert_eq!(store.get("location").as_deref(), Some("\"Kyoto\""));
    }

    #[test]
    fn one_failing_slice_does_not_stop_others() {
        let store = MemoryStore::new();
        store.fail_key("inventory");
        let report = write_all(&store, &VibeState::default());
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].0, Slice::Inventory);
        assert_eq!(report.written.len(), Slice::all().len() - 1);
        assert!(store.contains("wishlist"));
    }
}

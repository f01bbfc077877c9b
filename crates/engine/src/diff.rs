//! Snapshot-to-snapshot change detection.
//!
//! The previously held snapshot is an owned field of a
//! [`ChangeDetector`] instance, not module state: construction
//! determines lifecycle, and `reset` gives callers an explicit way to
//! drop history (e.g. after switching stores).

use std::collections::HashMap;

use partsdash_core::{InventoryRecord, RecordId, Snapshot, StatusTier};
use serde::Serialize;

/// A detected tier change for one record between consecutive snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransitionEvent {
    pub record_id: RecordId,
    pub brand: String,
    pub product_family: String,
    pub spare_part: String,
    pub previous_tier: StatusTier,
    pub new_tier: StatusTier,
    pub quantity: u32,
}

impl TransitionEvent {
    fn between(old: &InventoryRecord, new: &InventoryRecord) -> Option<Self> {
        let previous_tier = old.tier();
        let new_tier = new.tier();
        if previous_tier == new_tier {
            return None;
        }
        Some(Self {
            record_id: new.id,
            brand: new.brand.clone(),
            product_family: new.product_family.clone(),
            spare_part: new.spare_part.clone(),
            previous_tier,
            new_tier,
            quantity: new.quantity,
        })
    }
}

/// Compares successive snapshots and retains the latest as history.
#[derive(Debug, Default)]
pub struct ChangeDetector {
    previous: Option<Snapshot>,
}

impl ChangeDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a baseline snapshot is held (false before the first cycle).
    pub fn has_baseline(&self) -> bool {
        self.previous.is_some()
    }

    /// Drop the held snapshot; the next `diff` emits nothing.
    pub fn reset(&mut self) {
        self.previous = None;
    }

    /// Diff `current` against the held snapshot and retain `current`.
    ///
    /// Emits one event per record whose tier changed between the two
    /// observed states, in `current`'s record order. Records seen for
    /// the first time, records that disappeared, and quantity changes
    /// within the same tier all emit nothing. The replacement of the
    /// held snapshot is unconditional, including on the first call.
    pub fn diff(&mut self, current: Snapshot) -> Vec<TransitionEvent> {
        let events = match &self.previous {
            None => Vec::new(),
            Some(previous) => {
                let by_id: HashMap<RecordId, &InventoryRecord> =
                    previous.iter().map(|r| (r.id, r)).collect();
                current
                    .iter()
                    .filter_map(|new| {
                        by_id
                            .get(&new.id)
                            .and_then(|old| TransitionEvent::between(old, new))
                    })
                    .collect()
            }
        };

        self.previous = Some(current);
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: u64, quantity: u32) -> InventoryRecord {
        InventoryRecord {
            id: RecordId(id),
            brand: "Acme".to_string(),
            product_family: "Pumps".to_string(),
            spare_part: "Seal".to_string(),
            quantity,
            low_status: 3,
            high_status: 10,
        }
    }

    #[test]
    fn first_cycle_emits_nothing_but_sets_baseline() {
        let mut detector = ChangeDetector::new();
        assert!(!detector.has_baseline());

        let events = detector.diff(Snapshot::new(vec![record(1, 5)]));
        assert!(events.is_empty());
        assert!(detector.has_baseline());
    }

    #[test]
    fn tier_drop_emits_single_event() {
        let mut detector = ChangeDetector::new();
        detector.diff(Snapshot::new(vec![record(1, 5)]));

        let events = detector.diff(Snapshot::new(vec![record(1, 2)]));
        assert_eq!(events.len(), 1);
        let event = &events[0];
        assert_eq!(event.record_id, RecordId(1));
        assert_eq!(event.previous_tier, StatusTier::Mid);
        assert_eq!(event.new_tier, StatusTier::Low);
        assert_eq!(event.quantity, 2);
    }

    #[test]
    fn quantity_change_within_tier_is_silent() {
        let mut detector = ChangeDetector::new();
        detector.diff(Snapshot::new(vec![record(1, 5)]));

        let events = detector.diff(Snapshot::new(vec![record(1, 4)]));
        assert!(events.is_empty());
    }

    #[test]
    fn added_and_deleted_records_emit_nothing() {
        let mut detector = ChangeDetector::new();
        detector.diff(Snapshot::new(vec![record(1, 5)]));

        // Record 1 deleted, record 2 newly added (at a Low quantity).
        let events = detector.diff(Snapshot::new(vec![record(2, 1)]));
        assert!(events.is_empty());
    }

    #[test]
    fn diff_is_idempotent_against_its_own_output() {
        let mut detector = ChangeDetector::new();
        detector.diff(Snapshot::new(vec![record(1, 5)]));

        let current = Snapshot::new(vec![record(1, 12)]);
        let first = detector.diff(current.clone());
        assert_eq!(first.len(), 1);

        let second = detector.diff(current);
        assert!(second.is_empty());
    }

    #[test]
    fn events_follow_current_snapshot_order() {
        let mut detector = ChangeDetector::new();
        detector.diff(Snapshot::new(vec![record(3, 5), record(1, 5), record(2, 5)]));

        let events = detector.diff(Snapshot::new(vec![
            record(3, 12),
            record(1, 2),
            record(2, 11),
        ]));
        let ids: Vec<RecordId> = events.iter().map(|e| e.record_id).collect();
        assert_eq!(ids, vec![RecordId(3), RecordId(1), RecordId(2)]);
    }

    #[test]
    fn threshold_edit_alone_can_trigger_a_transition() {
        let mut detector = ChangeDetector::new();
        detector.diff(Snapshot::new(vec![record(1, 5)]));

        let mut edited = record(1, 5);
        edited.low_status = 6; // reorder point raised above the quantity
        let events = detector.diff(Snapshot::new(vec![edited]));
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].new_tier, StatusTier::Low);
    }

    #[test]
    fn reset_drops_history() {
        let mut detector = ChangeDetector::new();
        detector.diff(Snapshot::new(vec![record(1, 5)]));
        detector.reset();
        assert!(!detector.has_baseline());

        let events = detector.diff(Snapshot::new(vec![record(1, 2)]));
        assert!(events.is_empty());
    }
}

//! Alert rendering for transition events.
//!
//! The engine stops at a human-readable message plus a severity level;
//! the widget that displays (and auto-dismisses) the alert is an
//! external consumer of [`AlertSink`].

use std::time::Duration;

use partsdash_core::StatusTier;
use serde::Serialize;

use crate::diff::TransitionEvent;

/// How long a displayed alert lives before auto-dismissal.
pub const ALERT_DISMISS: Duration = Duration::from_secs(30);

/// Severity of an alert, mapped from the transition's destination tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    /// Stock recovered to the high tier.
    Success,
    /// Stock moved between mid and a neighbouring tier.
    Warning,
    /// Stock fell into the low tier; reorder needed.
    Danger,
}

impl TransitionEvent {
    /// Severity for this transition.
    pub fn level(&self) -> AlertLevel {
        match self.new_tier {
            StatusTier::Low => AlertLevel::Danger,
            StatusTier::High => AlertLevel::Success,
            StatusTier::Mid => AlertLevel::Warning,
        }
    }

    /// One-line rendering for toast/alert widgets.
    pub fn message(&self) -> String {
        format!(
            "{} - {} - {}: {} -> {} (quantity {})",
            self.brand,
            self.product_family,
            self.spare_part,
            self.previous_tier,
            self.new_tier,
            self.quantity,
        )
    }
}

/// Consumer interface for rendered alerts.
pub trait AlertSink {
    fn alert(&self, event: &TransitionEvent, message: &str, level: AlertLevel);
}

/// Sink that surfaces alerts through the process log.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl AlertSink for TracingSink {
    fn alert(&self, event: &TransitionEvent, message: &str, level: AlertLevel) {
        match level {
            AlertLevel::Danger => {
                tracing::warn!(record_id = %event.record_id, tier = %event.new_tier, "{message}");
            }
            AlertLevel::Warning => {
                tracing::info!(record_id = %event.record_id, tier = %event.new_tier, "{message}");
            }
            AlertLevel::Success => {
                tracing::info!(record_id = %event.record_id, tier = %event.new_tier, "{message}");
            }
        }
    }
}

/// Fan a batch of events out to a sink, preserving event order.
pub fn dispatch_alerts(sink: &dyn AlertSink, events: &[TransitionEvent]) {
    for event in events {
        sink.alert(event, &event.message(), event.level());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use partsdash_core::RecordId;

    fn event(previous: StatusTier, new: StatusTier) -> TransitionEvent {
        TransitionEvent {
            record_id: RecordId(7),
            brand: "Acme".to_string(),
            product_family: "Pumps".to_string(),
            spare_part: "Seal".to_string(),
            previous_tier: previous,
            new_tier: new,
            quantity: 2,
        }
    }

    #[test]
    fn level_follows_destination_tier() {
        assert_eq!(event(StatusTier::Mid, StatusTier::Low).level(), AlertLevel::Danger);
        assert_eq!(event(StatusTier::Mid, StatusTier::High).level(), AlertLevel::Success);
        assert_eq!(event(StatusTier::Low, StatusTier::Mid).level(), AlertLevel::Warning);
    }

    #[test]
    fn message_names_the_part_and_both_tiers() {
        let message = event(StatusTier::Mid, StatusTier::Low).message();
        assert_eq!(message, "Acme - Pumps - Seal: mid -> low (quantity 2)");
    }

    #[test]
    fn dispatch_preserves_order() {
        use std::cell::RefCell;

        struct Recorder(RefCell<Vec<String>>);
        impl AlertSink for Recorder {
            fn alert(&self, _event: &TransitionEvent, message: &str, _level: AlertLevel) {
                self.0.borrow_mut().push(message.to_string());
            }
        }

        let sink = Recorder(RefCell::new(Vec::new()));
        let events = vec![
            event(StatusTier::Mid, StatusTier::Low),
            event(StatusTier::Low, StatusTier::Mid),
        ];
        dispatch_alerts(&sink, &events);

        let seen = sink.0.borrow();
        assert_eq!(seen.len(), 2);
        assert!(seen[0].ends_with("mid -> low (quantity 2)"));
        assert!(seen[1].ends_with("low -> mid (quantity 2)"));
    }
}

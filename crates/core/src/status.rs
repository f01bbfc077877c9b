//! Stock-status classification.

use serde::{Deserialize, Serialize};

/// Health classification of a stock quantity relative to its thresholds.
///
/// Derived on demand, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusTier {
    Low,
    Mid,
    High,
}

impl StatusTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusTier::Low => "low",
            StatusTier::Mid => "mid",
            StatusTier::High => "high",
        }
    }
}

impl core::fmt::Display for StatusTier {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a quantity against its low/high thresholds.
///
/// Half-open partition: a quantity exactly at `low` is `Mid`, not `Low`
/// ("low" means strictly below the reorder point), while a quantity at
/// `high` is `High`. With inverted thresholds (`low >= high`, a record
/// misconfiguration this function tolerates rather than rejects) the
/// `High` check takes precedence, then `Low`, then `Mid`.
pub fn classify(quantity: u32, low: u32, high: u32) -> StatusTier {
    if quantity >= high {
        StatusTier::High
    } else if quantity < low {
        StatusTier::Low
    } else {
        StatusTier::Mid
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn quantity_below_low_is_low() {
        assert_eq!(classify(2, 3, 10), StatusTier::Low);
        assert_eq!(classify(0, 1, 2), StatusTier::Low);
    }

    #[test]
    fn quantity_at_low_boundary_is_mid() {
        assert_eq!(classify(3, 3, 10), StatusTier::Mid);
    }

    #[test]
    fn quantity_at_high_boundary_is_high() {
        assert_eq!(classify(10, 3, 10), StatusTier::High);
        assert_eq!(classify(11, 3, 10), StatusTier::High);
    }

    #[test]
    fn quantity_between_thresholds_is_mid() {
        assert_eq!(classify(5, 3, 10), StatusTier::Mid);
        assert_eq!(classify(9, 3, 10), StatusTier::Mid);
    }

    #[test]
    fn inverted_thresholds_high_takes_precedence() {
        // low=10, high=3: anything >= 3 is High, below 3 but below 10 is Low.
        assert_eq!(classify(5, 10, 3), StatusTier::High);
        assert_eq!(classify(3, 10, 3), StatusTier::High);
        assert_eq!(classify(2, 10, 3), StatusTier::Low);
    }

    #[test]
    fn equal_thresholds_never_yield_mid() {
        assert_eq!(classify(5, 5, 5), StatusTier::High);
        assert_eq!(classify(4, 5, 5), StatusTier::Low);
    }

    proptest! {
        #[test]
        fn partition_holds_for_ordered_thresholds(q in 0u32..1_000_000, l in 1u32..500_000, span in 1u32..500_000) {
            let h = l + span;
            let tier = classify(q, l, h);
            prop_assert_eq!(tier == StatusTier::Low, q < l);
            prop_assert_eq!(tier == StatusTier::High, q >= h);
            prop_assert_eq!(tier == StatusTier::Mid, q >= l && q < h);
        }

        #[test]
        fn total_for_arbitrary_inputs(q: u32, l: u32, h: u32) {
            // Must return a deterministic tier for any input, inverted or not.
            let first = classify(q, l, h);
            prop_assert_eq!(first, classify(q, l, h));
        }
    }
}

//! Snapshot aggregation: brand → product family → records.

use std::collections::HashMap;

use partsdash_core::{InventoryRecord, Snapshot, UNKNOWN_BRAND};

/// Records of one product family, in snapshot order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FamilyGroup {
    pub family: String,
    pub records: Vec<InventoryRecord>,
}

/// One brand's families, in first-seen order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrandGroup {
    pub brand: String,
    pub families: Vec<FamilyGroup>,
}

impl BrandGroup {
    pub fn family(&self, name: &str) -> Option<&FamilyGroup> {
        self.families.iter().find(|f| f.family == name)
    }

    /// Total record count across all families.
    pub fn record_count(&self) -> usize {
        self.families.iter().map(|f| f.records.len()).sum()
    }
}

/// Two-level grouping of a snapshot, derived fresh each cycle.
///
/// Brand and family order is first-seen snapshot order; all ordering
/// policy beyond that belongs to the layout planner.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupedInventory {
    pub brands: Vec<BrandGroup>,
}

impl GroupedInventory {
    pub fn is_empty(&self) -> bool {
        self.brands.is_empty()
    }

    pub fn brand(&self, name: &str) -> Option<&BrandGroup> {
        self.brands.iter().find(|b| b.brand == name)
    }
}

/// Partition a snapshot by brand, then product family.
///
/// Single pass; grouping keys compare case-sensitively. A blank brand
/// (possible when a record bypassed wire normalization) falls into the
/// `UNKNOWN_BRAND` bucket. Every input record lands in exactly one
/// bucket and per-bucket order matches snapshot order.
pub fn group(snapshot: &Snapshot) -> GroupedInventory {
    let mut brands: Vec<BrandGroup> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for record in snapshot {
        let brand_key = if record.brand.trim().is_empty() {
            UNKNOWN_BRAND
        } else {
            record.brand.as_str()
        };

        let slot = *index.entry(brand_key.to_string()).or_insert_with(|| {
            brands.push(BrandGroup {
                brand: brand_key.to_string(),
                families: Vec::new(),
            });
            brands.len() - 1
        });

        let brand = &mut brands[slot];
        match brand
            .families
            .iter_mut()
            .find(|f| f.family == record.product_family)
        {
            Some(family) => family.records.push(record.clone()),
            None => brand.families.push(FamilyGroup {
                family: record.product_family.clone(),
                records: vec![record.clone()],
            }),
        }
    }

    GroupedInventory { brands }
}

#[cfg(test)]
mod tests {
    use super::*;
    use partsdash_core::{RecordId, UNKNOWN_BRAND};
    use proptest::prelude::*;

    fn record(id: u64, brand: &str, family: &str, part: &str) -> InventoryRecord {
        InventoryRecord {
            id: RecordId(id),
            brand: brand.to_string(),
            product_family: family.to_string(),
            spare_part: part.to_string(),
            quantity: 1,
            low_status: 2,
            high_status: 8,
        }
    }

    #[test]
    fn groups_by_brand_then_family_in_snapshot_order() {
        let snapshot = Snapshot::new(vec![
            record(1, "Acme", "Pumps", "Seal"),
            record(2, "Globex", "Motors", "Rotor"),
            record(3, "Acme", "Pumps", "Gasket"),
            record(4, "Acme", "Valves", "Spring"),
        ]);

        let grouped = group(&snapshot);
        assert_eq!(grouped.brands.len(), 2);
        assert_eq!(grouped.brands[0].brand, "Acme");
        assert_eq!(grouped.brands[1].brand, "Globex");

        let pumps = grouped.brand("Acme").unwrap().family("Pumps").unwrap();
        assert_eq!(pumps.records.len(), 2);
        assert_eq!(pumps.records[0].spare_part, "Seal");
        assert_eq!(pumps.records[1].spare_part, "Gasket");
    }

    #[test]
    fn brand_keys_are_case_sensitive() {
        let snapshot = Snapshot::new(vec![
            record(1, "acme", "F", "P1"),
            record(2, "Acme", "F", "P2"),
        ]);

        let grouped = group(&snapshot);
        assert_eq!(grouped.brands.len(), 2);
    }

    #[test]
    fn blank_brand_falls_into_unknown_bucket() {
        let snapshot = Snapshot::new(vec![record(1, "  ", "F", "P")]);

        let grouped = group(&snapshot);
        assert_eq!(grouped.brands.len(), 1);
        assert_eq!(grouped.brands[0].brand, UNKNOWN_BRAND);
    }

    #[test]
    fn empty_snapshot_yields_empty_grouping() {
        assert!(group(&Snapshot::default()).is_empty());
    }

    proptest! {
        #[test]
        fn grouping_is_a_partition(
            specs in proptest::collection::vec(
                (0u64..50, 0usize..4, 0usize..4, 0usize..6),
                0..40,
            )
        ) {
            let brands = ["Acme", "Globex", "Initech", ""];
            let families = ["Pumps", "Motors", "Valves", "Filters"];
            let records: Vec<InventoryRecord> = specs
                .iter()
                .map(|&(id, b, f, p)| record(id, brands[b], families[f], &format!("part-{p}")))
                .collect();
            let total = records.len();
            let snapshot = Snapshot::new(records);

            let grouped = group(&snapshot);
            let regrouped: usize = grouped
                .brands
                .iter()
                .map(BrandGroup::record_count)
                .sum();
            prop_assert_eq!(regrouped, total);

            // Per-bucket order preserves snapshot order.
            for brand in &grouped.brands {
                for family in &brand.families {
                    let mut cursor = snapshot.iter();
                    for rec in &family.records {
                        prop_assert!(cursor.any(|r| r == rec));
                    }
                }
            }
        }
    }
}

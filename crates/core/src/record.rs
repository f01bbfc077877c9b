//! Inventory records, wire normalization, and snapshots.
//!
//! The record store serves a loosely-shaped JSON sequence (the brand key
//! has shipped as `Brand`, `brand`, and `customer`; thresholds may be
//! absent). [`WireRecord`] accepts that shape; [`WireRecord::normalize`]
//! is the single ingestion boundary producing the strict
//! [`InventoryRecord`] every downstream component consumes.

use serde::{Deserialize, Serialize};

use crate::status::{classify, StatusTier};

/// Sentinel brand label for records with a missing or empty brand.
pub const UNKNOWN_BRAND: &str = "Unknown";

/// Default low threshold applied when the store omits one.
pub const DEFAULT_LOW_STATUS: u32 = 5;

/// Default high threshold applied when the store omits one.
pub const DEFAULT_HIGH_STATUS: u32 = 15;

/// Stable record identifier assigned by the record store.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub u64);

impl RecordId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for RecordId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Canonical inventory record.
///
/// All fields are present and normalized; the brand sentinel has already
/// been applied. Serializes back to the store's wire shape (`Brand` key).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryRecord {
    pub id: RecordId,
    #[serde(rename = "Brand")]
    pub brand: String,
    pub product_family: String,
    pub spare_part: String,
    pub quantity: u32,
    pub low_status: u32,
    pub high_status: u32,
}

impl InventoryRecord {
    /// Current status tier of this record.
    pub fn tier(&self) -> StatusTier {
        classify(self.quantity, self.low_status, self.high_status)
    }

    /// Whether the thresholds violate the `low < high` invariant.
    ///
    /// A data-quality concern for the owning surface to report; the
    /// classifier still produces a deterministic tier.
    pub fn thresholds_inverted(&self) -> bool {
        self.low_status >= self.high_status
    }
}

/// Loose wire shape of a record as returned by the store.
#[derive(Debug, Clone, Deserialize)]
pub struct WireRecord {
    #[serde(default)]
    pub id: u64,
    #[serde(default, alias = "Brand", alias = "customer")]
    pub brand: Option<String>,
    #[serde(default)]
    pub product_family: String,
    #[serde(default)]
    pub spare_part: String,
    #[serde(default)]
    pub quantity: u32,
    #[serde(default = "default_low_status")]
    pub low_status: u32,
    #[serde(default = "default_high_status")]
    pub high_status: u32,
}

fn default_low_status() -> u32 {
    DEFAULT_LOW_STATUS
}

fn default_high_status() -> u32 {
    DEFAULT_HIGH_STATUS
}

impl WireRecord {
    /// Map the wire shape onto the canonical record.
    pub fn normalize(self) -> InventoryRecord {
        InventoryRecord {
            id: RecordId(self.id),
            brand: normalize_brand(self.brand),
            product_family: self.product_family,
            spare_part: self.spare_part,
            quantity: self.quantity,
            low_status: self.low_status,
            high_status: self.high_status,
        }
    }
}

/// Missing or blank brand names collapse to the sentinel label.
pub fn normalize_brand(brand: Option<String>) -> String {
    match brand {
        Some(b) if !b.trim().is_empty() => b,
        _ => UNKNOWN_BRAND.to_string(),
    }
}

/// Creation payload accepted by the store (`POST`); id is server-assigned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewRecord {
    #[serde(default, alias = "brand", rename = "Brand")]
    pub brand: Option<String>,
    pub product_family: String,
    pub spare_part: String,
    #[serde(default)]
    pub quantity: u32,
    #[serde(default)]
    pub low_status: Option<u32>,
    #[serde(default)]
    pub high_status: Option<u32>,
}

/// Partial field update accepted by the store (`PATCH /{id}`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordPatch {
    #[serde(default, alias = "brand", rename = "Brand", skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spare_part: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub low_status: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub high_status: Option<u32>,
}

/// One point-in-time read of the full record set.
///
/// Owned by the refresh cycle that fetched it; record order is the
/// store's emission order and is preserved end to end.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot {
    records: Vec<InventoryRecord>,
}

impl Snapshot {
    pub fn new(records: Vec<InventoryRecord>) -> Self {
        Self { records }
    }

    /// Normalize a wire payload into a snapshot.
    pub fn from_wire(wire: Vec<WireRecord>) -> Self {
        Self {
            records: wire.into_iter().map(WireRecord::normalize).collect(),
        }
    }

    pub fn records(&self) -> &[InventoryRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: RecordId) -> Option<&InventoryRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn iter(&self) -> core::slice::Iter<'_, InventoryRecord> {
        self.records.iter()
    }
}

impl<'a> IntoIterator for &'a Snapshot {
    type Item = &'a InventoryRecord;
    type IntoIter = core::slice::Iter<'a, InventoryRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_record_accepts_cased_brand_keys() {
        let upper: WireRecord =
            serde_json::from_str(r#"{"id":1,"Brand":"Acme","product_family":"F","spare_part":"P","quantity":4}"#)
                .unwrap();
        let lower: WireRecord =
            serde_json::from_str(r#"{"id":1,"brand":"Acme","product_family":"F","spare_part":"P","quantity":4}"#)
                .unwrap();
        let customer: WireRecord =
            serde_json::from_str(r#"{"id":1,"customer":"Acme","product_family":"F","spare_part":"P","quantity":4}"#)
                .unwrap();

        assert_eq!(upper.normalize().brand, "Acme");
        assert_eq!(lower.normalize().brand, "Acme");
        assert_eq!(customer.normalize().brand, "Acme");
    }

    #[test]
    fn missing_brand_normalizes_to_sentinel() {
        let wire: WireRecord =
            serde_json::from_str(r#"{"id":2,"product_family":"F","spare_part":"P","quantity":0}"#).unwrap();
        assert_eq!(wire.normalize().brand, UNKNOWN_BRAND);

        assert_eq!(normalize_brand(Some("   ".to_string())), UNKNOWN_BRAND);
        assert_eq!(normalize_brand(None), UNKNOWN_BRAND);
    }

    #[test]
    fn missing_thresholds_get_defaults() {
        let wire: WireRecord =
            serde_json::from_str(r#"{"id":3,"Brand":"Acme","product_family":"F","spare_part":"P","quantity":7}"#)
                .unwrap();
        let record = wire.normalize();
        assert_eq!(record.low_status, DEFAULT_LOW_STATUS);
        assert_eq!(record.high_status, DEFAULT_HIGH_STATUS);
    }

    #[test]
    fn canonical_record_serializes_with_wire_brand_key() {
        let record = InventoryRecord {
            id: RecordId(9),
            brand: "Acme".to_string(),
            product_family: "F".to_string(),
            spare_part: "P".to_string(),
            quantity: 3,
            low_status: 2,
            high_status: 8,
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["Brand"], "Acme");
        assert!(json.get("brand").is_none());
    }

    #[test]
    fn snapshot_lookup_by_id() {
        let snapshot = Snapshot::from_wire(vec![
            serde_json::from_str(r#"{"id":1,"Brand":"A","product_family":"F","spare_part":"P","quantity":1}"#).unwrap(),
            serde_json::from_str(r#"{"id":2,"Brand":"B","product_family":"G","spare_part":"Q","quantity":2}"#).unwrap(),
        ]);

        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.get(RecordId(2)).unwrap().brand, "B");
        assert!(snapshot.get(RecordId(3)).is_none());
    }

    #[test]
    fn inverted_thresholds_are_flagged_not_rejected() {
        let wire: WireRecord =
            serde_json::from_str(r#"{"id":4,"Brand":"A","product_family":"F","spare_part":"P","quantity":5,"low_status":10,"high_status":3}"#)
                .unwrap();
        let record = wire.normalize();
        assert!(record.thresholds_inverted());
        assert_eq!(record.tier(), StatusTier::High);
    }
}

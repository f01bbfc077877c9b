//! `partsdash-core` — domain foundation for the spare-parts dashboard.
//!
//! This crate contains **pure domain** types and the stock-status
//! classifier (no I/O, no rendering concerns). Records enter the system
//! through [`record::WireRecord`] normalization and are never mutated by
//! downstream components.

pub mod record;
pub mod status;

pub use record::{
    normalize_brand, InventoryRecord, NewRecord, RecordId, RecordPatch, Snapshot, WireRecord,
    UNKNOWN_BRAND,
};
pub use status::{classify, StatusTier};

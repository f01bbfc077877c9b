//! User-configurable display settings.
//!
//! Persisted by the external settings store; the engine treats a
//! settings value as an immutable input captured once per layout
//! computation. Field names follow the store's JSON (camelCase), and
//! `brandPriority` is accepted both as a list and as the legacy
//! comma-separated string.

use serde::{Deserialize, Deserializer, Serialize};

/// Display preferences for the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DisplaySettings {
    /// Zoom percentage for the rendered dashboard.
    pub scale: u32,
    /// Family cards per row in vertical mode.
    pub columns: u32,
    /// Brands to pull to the front, in priority order.
    #[serde(deserialize_with = "brand_priority_list_or_csv")]
    pub brand_priority: Vec<String>,
    pub compact: bool,
    pub horizontal: bool,
    /// Family cards per row in horizontal mode.
    pub brands_per_row: u32,
    /// Parts per row inside a family card in horizontal mode.
    pub spare_parts_per_row: u32,
    /// Exclude quantity-0 parts from family cards.
    pub hide_zero_quantity: bool,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            scale: 100,
            columns: 3,
            brand_priority: Vec::new(),
            compact: false,
            horizontal: false,
            brands_per_row: 3,
            spare_parts_per_row: 5,
            hide_zero_quantity: false,
        }
    }
}

impl DisplaySettings {
    /// Clamp values to the ranges the settings store persists.
    ///
    /// Applied at the owning surface on save, not on every layout pass.
    pub fn clamped(mut self) -> Self {
        self.scale = self.scale.clamp(50, 200);
        self.columns = self.columns.clamp(1, 6);
        self
    }
}

fn brand_priority_list_or_csv<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        List(Vec<String>),
        Csv(String),
    }

    let entries = match Raw::deserialize(deserializer)? {
        Raw::List(list) => list,
        Raw::Csv(csv) => csv.split(',').map(str::to_string).collect(),
    };

    Ok(entries
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect())
}

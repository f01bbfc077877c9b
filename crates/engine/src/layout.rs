//! Deterministic rendering plan derived from grouped inventory and
//! display settings.

use partsdash_core::{classify, InventoryRecord, RecordId, StatusTier};
use serde::Serialize;

use crate::group::{BrandGroup, GroupedInventory};
use crate::settings::DisplaySettings;

/// Fallback chunk size when a settings value is zero or missing.
pub const DEFAULT_CHUNK: usize = 3;

/// One part annotated with its status tier for downstream styling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedPart {
    pub id: RecordId,
    pub spare_part: String,
    pub quantity: u32,
    pub low_status: u32,
    pub high_status: u32,
    pub tier: StatusTier,
}

impl PlannedPart {
    fn from_record(record: &InventoryRecord) -> Self {
        Self {
            id: record.id,
            spare_part: record.spare_part.clone(),
            quantity: record.quantity,
            low_status: record.low_status,
            high_status: record.high_status,
            tier: classify(record.quantity, record.low_status, record.high_status),
        }
    }
}

/// One product family card; parts sorted alphabetically by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FamilyCard {
    pub family: String,
    pub parts: Vec<PlannedPart>,
}

/// One brand's family cards, chunked into display rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BrandSection {
    pub brand: String,
    pub rows: Vec<Vec<FamilyCard>>,
}

impl BrandSection {
    /// Row widths, e.g. `[3, 3, 1]` for 7 families at 3 per row.
    pub fn row_sizes(&self) -> Vec<usize> {
        self.rows.iter().map(Vec::len).collect()
    }
}

/// Ordered, chunked rendering plan.
///
/// Empty grouped input produces an empty plan; the UI renders its
/// "no data" placeholder for that case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderPlan {
    pub sections: Vec<BrandSection>,
    pub scale: u32,
    pub compact: bool,
    pub horizontal: bool,
    /// Parts-per-row wrap width inside a card; set in horizontal mode only.
    pub parts_per_row: Option<usize>,
}

impl RenderPlan {
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

/// Turn grouped inventory plus captured settings into a render plan.
///
/// Brand order: `brand_priority` entries first (case-insensitive match,
/// priority-list order, stable on ties), everything else in aggregation
/// order. Families chunk into rows of `columns` (vertical) or
/// `brands_per_row` (horizontal). Parts sort alphabetically within a
/// family, case-sensitive; that rule is fixed, not a setting.
pub fn plan(grouped: &GroupedInventory, settings: &DisplaySettings) -> RenderPlan {
    let family_chunk = chunk_size(if settings.horizontal {
        settings.brands_per_row
    } else {
        settings.columns
    });

    let sections = order_brands(grouped, &settings.brand_priority)
        .into_iter()
        .map(|brand| brand_section(brand, family_chunk, settings))
        .collect();

    RenderPlan {
        sections,
        scale: settings.scale,
        compact: settings.compact,
        horizontal: settings.horizontal,
        parts_per_row: settings
            .horizontal
            .then(|| chunk_size(settings.spare_parts_per_row)),
    }
}

fn brand_section(
    brand: &BrandGroup,
    family_chunk: usize,
    settings: &DisplaySettings,
) -> BrandSection {
    let cards: Vec<FamilyCard> = brand
        .families
        .iter()
        .map(|family| {
            let mut parts: Vec<PlannedPart> = family
                .records
                .iter()
                .filter(|r| !(settings.hide_zero_quantity && r.quantity == 0))
                .map(PlannedPart::from_record)
                .collect();
            parts.sort_by(|a, b| a.spare_part.cmp(&b.spare_part));
            FamilyCard {
                family: family.family.clone(),
                parts,
            }
        })
        .collect();

    BrandSection {
        brand: brand.brand.clone(),
        rows: cards.chunks(family_chunk).map(<[_]>::to_vec).collect(),
    }
}

fn chunk_size(requested: u32) -> usize {
    if requested == 0 {
        DEFAULT_CHUNK
    } else {
        requested as usize
    }
}

fn order_brands<'a>(grouped: &'a GroupedInventory, priority: &[String]) -> Vec<&'a BrandGroup> {
    if priority.is_empty() {
        return grouped.brands.iter().collect();
    }

    let mut prioritized: Vec<(usize, &BrandGroup)> = Vec::new();
    let mut rest: Vec<&BrandGroup> = Vec::new();
    for brand in &grouped.brands {
        match priority
            .iter()
            .position(|p| p.eq_ignore_ascii_case(&brand.brand))
        {
            Some(rank) => prioritized.push((rank, brand)),
            None => rest.push(brand),
        }
    }

    // Stable sort: ties keep aggregation order.
    prioritized.sort_by_key(|(rank, _)| *rank);
    prioritized
        .into_iter()
        .map(|(_, brand)| brand)
        .chain(rest)
        .collect()
}

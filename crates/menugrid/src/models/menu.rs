//! Normalized menu input model.
//!
//! Produced by an external normalization step from whatever persisted
//! representation the host uses. The engine assumes numeric `sort_order` fields
//! are already assigned; they define relative ordering only and need not be
//! globally unique. Array position alone is never trusted; every consumer
//! sorts by `sort_order` first.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A normalized menu: the complete input to a placement call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizedMenu {
    pub id: Uuid,
    pub name: String,
    pub sections: Vec<Section>,
    #[serde(default)]
    pub metadata: MenuMetadata,
}

/// Venue-level metadata forwarded into static tiles (footer, logo).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MenuMetadata {
    #[serde(default)]
    pub currency: String,
    pub venue_name: Option<String>,
    pub venue_address: Option<String>,
    pub logo_url: Option<String>,
}

/// A menu section. `subsections` supports nested categories; the placer
/// flattens them with an explicit iterative stack, so authoring depth never
/// affects engine stack depth.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    pub id: Uuid,
    pub name: String,
    pub sort_order: i32,
    pub items: Vec<Item>,
    #[serde(default)]
    pub subsections: Vec<Section>,
}

/// A priced menu item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    /// Price in minor currency units (cents, pence). Never a float.
    pub price_minor: i64,
    pub image_url: Option<String>,
    pub sort_order: i32,
    #[serde(default)]
    pub indicators: Indicators,
    /// Missing in the source data is treated identically to `false`.
    #[serde(default)]
    pub is_featured: bool,
}

/// Dietary/allergen indicators rendered alongside an item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Indicators {
    #[serde(default)]
    pub dietary: Vec<String>,
    #[serde(default)]
    pub allergens: Vec<String>,
    /// 0–3, or `None` when not applicable. Out-of-range values are flagged by
    /// the menu validator but tolerated by the placer.
    pub spice_level: Option<u8>,
}

impl NormalizedMenu {
    /// Total item count across all sections, subsections included.
    pub fn item_count(&self) -> usize {
        let mut count = 0;
        let mut stack: Vec<&Section> = self.sections.iter().collect();
        while let Some(section) = stack.pop() {
            count += section.items.len();
            stack.extend(section.subsections.iter());
        }
        count
    }
}

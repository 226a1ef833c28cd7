//! Layout document output model.
//!
//! A `LayoutDocument` is produced fresh by every placement call and is
//! immutable once returned. The external renderer consumes it by (a) applying
//! page margins once, (b) offsetting each tile by its region's absolute
//! position, and (c) mapping `content`/`style` to visual primitives.
//!
//! Tile coordinates are REGION-RELATIVE. Page margin and region offset are
//! applied exactly once by the consumer and are never embedded in tile
//! coordinates; this is the single most important contract toward the
//! renderer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::menu::Indicators;

// ────────────────────────────────────────────────────────────────────────────
// Page geometry
// ────────────────────────────────────────────────────────────────────────────

/// Physical page dimensions and margins, in layout units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageSpec {
    pub width: f32,
    pub height: f32,
    pub margins: Margins,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Margins {
    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Pages and regions
// ────────────────────────────────────────────────────────────────────────────

/// Classification of a page's position in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageType {
    First,
    Continuation,
    Final,
    Single,
}

/// The four fixed page areas tiles are placed within. Every page carries
/// exactly four regions, always present, in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegionId {
    Header,
    Title,
    Body,
    Footer,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub id: RegionId,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    pub page_index: usize,
    pub page_type: PageType,
    pub regions: Vec<Region>,
    pub tiles: Vec<TileInstance>,
}

impl Page {
    /// Looks up one of the four fixed regions. Pages are always built with all
    /// four, so a miss only happens on a hand-constructed document.
    pub fn region(&self, id: RegionId) -> Option<&Region> {
        self.regions.iter().find(|r| r.id == id)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tiles
// ────────────────────────────────────────────────────────────────────────────

/// Drawing layer. Background tiles (fillers, dividers) may underlap content
/// tiles; content tiles must never overlap each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TileLayer {
    Content,
    Background,
}

/// Discriminant of the closed tile-content union. Adding a variant here forces
/// every match in the placer and validator to be revisited at compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileKind {
    Logo,
    Title,
    Footer,
    SectionHeader,
    ItemCard,
    ItemTextRow,
    FeatureCard,
    Divider,
    Filler,
}

impl TileKind {
    /// True for tiles that carry a menu item.
    pub fn is_item(self) -> bool {
        matches!(
            self,
            TileKind::ItemCard | TileKind::ItemTextRow | TileKind::FeatureCard
        )
    }
}

/// Item payload shared by the three item-bearing tile kinds. Line counts are
/// the placer's estimates, which the renderer truncates to them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemContent {
    pub item_id: Uuid,
    pub section_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price_minor: i64,
    pub currency: String,
    pub image_url: Option<String>,
    pub indicators: Indicators,
    pub name_lines: u8,
    pub description_lines: u8,
}

/// Tagged content union, exhaustively matched in the placer and validator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum TileContent {
    Logo {
        url: Option<String>,
    },
    Title {
        text: String,
    },
    Footer {
        venue_name: Option<String>,
        venue_address: Option<String>,
    },
    SectionHeader {
        section_id: Uuid,
        name: String,
        /// True when this header was re-emitted at the top of a continuation
        /// page rather than starting the section.
        continuation: bool,
    },
    ItemCard(ItemContent),
    ItemTextRow(ItemContent),
    FeatureCard(ItemContent),
    Divider,
    Filler {
        /// Sequential index within the page, for pattern cycling.
        sequence: u32,
    },
}

impl TileContent {
    pub fn kind(&self) -> TileKind {
        match self {
            TileContent::Logo { .. } => TileKind::Logo,
            TileContent::Title { .. } => TileKind::Title,
            TileContent::Footer { .. } => TileKind::Footer,
            TileContent::SectionHeader { .. } => TileKind::SectionHeader,
            TileContent::ItemCard(_) => TileKind::ItemCard,
            TileContent::ItemTextRow(_) => TileKind::ItemTextRow,
            TileContent::FeatureCard(_) => TileKind::FeatureCard,
            TileContent::Divider => TileKind::Divider,
            TileContent::Filler { .. } => TileKind::Filler,
        }
    }

    /// The item payload, when this tile carries one.
    pub fn item(&self) -> Option<&ItemContent> {
        match self {
            TileContent::ItemCard(item)
            | TileContent::ItemTextRow(item)
            | TileContent::FeatureCard(item) => Some(item),
            _ => None,
        }
    }
}

/// Opaque styling forwarded to the renderer. The placer never interprets it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TileStyle {
    pub colour_palette_id: Option<String>,
}

/// A positioned rectangular unit of content within one region of one page.
///
/// `x`/`y`/`width`/`height` are region-relative layout units. `grid_row`/
/// `grid_col` and the spans are grid coordinates for body tiles; static tiles
/// in the other regions carry zeros there.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TileInstance {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: TileKind,
    pub region: RegionId,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub col_span: u32,
    pub row_span: u32,
    pub grid_row: u32,
    pub grid_col: u32,
    pub layer: TileLayer,
    pub content: TileContent,
    pub style: Option<TileStyle>,
}

impl TileInstance {
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Document
// ────────────────────────────────────────────────────────────────────────────

/// Diagnostic block. `generated_at` is the only nondeterministic field in the
/// whole document and is explicitly excluded from the determinism property.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebugInfo {
    pub generated_at: DateTime<Utc>,
    pub engine_version: String,
    pub item_count: usize,
    pub page_count: usize,
}

/// The complete placement output consumed by the external renderer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutDocument {
    pub template_id: String,
    pub template_version: u32,
    pub page_spec: PageSpec,
    pub pages: Vec<Page>,
    pub debug: Option<DebugInfo>,
}

impl LayoutDocument {
    /// All item tiles in document order, with their page index.
    pub fn item_tiles(&self) -> impl Iterator<Item = (usize, &TileInstance)> {
        self.pages.iter().flat_map(|page| {
            page.tiles
                .iter()
                .filter(|t| t.kind.is_item())
                .map(move |t| (page.page_index, t))
        })
    }
}

//! Validated template model and derived grid geometry.
//!
//! A `Template` is immutable, versioned pure data: it is parsed and
//! schema-validated once by the repository (`schema.rs`) and treated as
//! read-only for the lifetime of every placement call. All geometry helpers
//! live here so the placer, balancer, and filler share one set of formulas.

use serde::{Deserialize, Serialize};

use crate::models::document::{PageSpec, PageType};

// ────────────────────────────────────────────────────────────────────────────
// Template
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Template {
    pub id: String,
    pub version: u32,
    pub page: PageSpec,
    pub regions: RegionHeights,
    pub body: BodyContainer,
    pub tiles: TileSet,
    pub policies: Policies,
    pub filler: FillerConfig,
    pub dividers: Option<DividerConfig>,
}

/// Fixed heights of the four page regions, in layout units. All four regions
/// share the page's content width.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionHeights {
    pub header: f32,
    pub title: f32,
    pub body: f32,
    pub footer: f32,
}

/// The body region's grid: `columns` tracks of equal width, rows of fixed
/// `row_height`, separated by `gap` on both axes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BodyContainer {
    pub columns: u32,
    pub row_height: f32,
    pub gap: f32,
}

// ────────────────────────────────────────────────────────────────────────────
// Tile variants
// ────────────────────────────────────────────────────────────────────────────

/// The closed set of tile variants a template may define. Section header and
/// text row are required (every item has a shape to fall back to); the rest
/// are optional capabilities.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TileSet {
    pub section_header: TileVariantDef,
    pub item_text_row: TileVariantDef,
    pub item_card: Option<TileVariantDef>,
    pub feature_card: Option<TileVariantDef>,
    pub logo: Option<TileVariantDef>,
    pub title: Option<TileVariantDef>,
    pub footer: Option<TileVariantDef>,
    pub filler: Option<TileVariantDef>,
}

/// Shape of one tile variant in grid units, plus its content budget.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TileVariantDef {
    pub col_span: u32,
    pub row_span: u32,
    pub font_size: f32,
    #[serde(default)]
    pub content_budget: ContentBudget,
}

/// Per-variant limits used to estimate space consumption. These are budgets,
/// not measurements; line counts come from the average-char-width heuristic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentBudget {
    pub max_name_lines: u8,
    pub max_description_lines: u8,
    pub image_box_height: f32,
    pub padding: f32,
}

impl Default for ContentBudget {
    fn default() -> Self {
        ContentBudget {
            max_name_lines: 1,
            max_description_lines: 2,
            image_box_height: 0.0,
            padding: 0.0,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Policies
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LastRowBalancing {
    Center,
    Left,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Policies {
    #[serde(default = "default_balancing")]
    pub last_row_balancing: LastRowBalancing,
    #[serde(default = "default_first_single")]
    pub show_logo_on_pages: Vec<PageType>,
    #[serde(default = "default_first_single")]
    pub show_title_on_pages: Vec<PageType>,
    #[serde(default = "default_all_pages")]
    pub show_footer_on_pages: Vec<PageType>,
    #[serde(default = "default_true")]
    pub repeat_section_header_on_continuation: bool,
    /// A section header is only committed to a page when at least this many of
    /// its items fit below it on the same page. Must be ≥ 1.
    #[serde(default = "default_keep_with_next")]
    pub section_header_keep_with_next_items: u32,
}

fn default_balancing() -> LastRowBalancing {
    LastRowBalancing::Center
}

fn default_first_single() -> Vec<PageType> {
    vec![PageType::First, PageType::Single]
}

fn default_all_pages() -> Vec<PageType> {
    vec![
        PageType::First,
        PageType::Continuation,
        PageType::Final,
        PageType::Single,
    ]
}

fn default_true() -> bool {
    true
}

fn default_keep_with_next() -> u32 {
    1
}

impl Default for Policies {
    fn default() -> Self {
        Policies {
            last_row_balancing: default_balancing(),
            show_logo_on_pages: default_first_single(),
            show_title_on_pages: default_first_single(),
            show_footer_on_pages: default_all_pages(),
            repeat_section_header_on_continuation: true,
            section_header_keep_with_next_items: 1,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Filler and dividers
// ────────────────────────────────────────────────────────────────────────────

/// A rectangle in body-grid coordinates (columns × rows).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridRect {
    pub col: u32,
    pub row: u32,
    pub col_span: u32,
    pub row_span: u32,
}

impl GridRect {
    pub fn contains(&self, col: u32, row: u32) -> bool {
        col >= self.col
            && col < self.col + self.col_span
            && row >= self.row
            && row < self.row + self.row_span
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FillerPolicy {
    /// Fill empty safe-zone cells one by one in reading order.
    Sequential,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FillerConfig {
    pub enabled: bool,
    #[serde(default)]
    pub safe_zones: Vec<GridRect>,
    #[serde(default = "default_filler_policy")]
    pub policy: FillerPolicy,
}

fn default_filler_policy() -> FillerPolicy {
    FillerPolicy::Sequential
}

impl Default for FillerConfig {
    fn default() -> Self {
        FillerConfig {
            enabled: false,
            safe_zones: vec![],
            policy: FillerPolicy::Sequential,
        }
    }
}

/// Optional horizontal rules drawn in the gap below each completed section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DividerConfig {
    pub thickness: f32,
}

// ────────────────────────────────────────────────────────────────────────────
// Derived geometry
// ────────────────────────────────────────────────────────────────────────────

impl Template {
    /// Width shared by all four regions: page width minus horizontal margins.
    pub fn content_width(&self) -> f32 {
        self.page.width - self.page.margins.horizontal()
    }

    /// Width of a single grid column.
    pub fn column_width(&self) -> f32 {
        let cols = self.body.columns as f32;
        (self.content_width() - self.body.gap * (cols - 1.0)) / cols
    }

    /// Number of whole grid rows that fit in the body region. Guaranteed ≥ 1
    /// by schema validation, since a zero here would make pagination loop.
    pub fn rows_per_page(&self) -> u32 {
        let cell = self.body.row_height + self.body.gap;
        if cell <= 0.0 {
            return 0;
        }
        ((self.regions.body + self.body.gap) / cell).floor() as u32
    }

    pub fn cell_x(&self, col: u32) -> f32 {
        col as f32 * (self.column_width() + self.body.gap)
    }

    pub fn row_y(&self, row: u32) -> f32 {
        row as f32 * (self.body.row_height + self.body.gap)
    }

    pub fn span_width(&self, col_span: u32) -> f32 {
        self.column_width() * col_span as f32 + self.body.gap * (col_span.saturating_sub(1)) as f32
    }

    pub fn span_height(&self, row_span: u32) -> f32 {
        self.body.row_height * row_span as f32 + self.body.gap * (row_span.saturating_sub(1)) as f32
    }

    /// The four regions share one ordering everywhere in the engine.
    pub fn region_heights(&self) -> [(crate::models::RegionId, f32); 4] {
        use crate::models::RegionId;
        [
            (RegionId::Header, self.regions.header),
            (RegionId::Title, self.regions.title),
            (RegionId::Body, self.regions.body),
            (RegionId::Footer, self.regions.footer),
        ]
    }
}

//! Phases A-C: token packing, page breaks, widow avoidance.
//!
//! Walks the linearized token stream and commits tiles into per-page skylines.
//! Hard rules enforced here:
//! - a tile is never split across a page boundary;
//! - a section header is only committed when at least
//!   `section_header_keep_with_next_items` of its items fit below it on the
//!   same page (widow avoidance), except on an otherwise empty page where it
//!   is committed regardless so pagination always terminates;
//! - when a section's items resume on a later page and the policy asks for it,
//!   the header is re-emitted there marked as a continuation.

use tracing::{debug, warn};
use uuid::Uuid;

use crate::models::menu::{Item, NormalizedMenu, Section};
use crate::models::{ItemContent, RegionId, TileContent, TileInstance, TileKind, TileLayer, TileStyle};
use crate::placer::linearize::{linearize, LayoutToken};
use crate::placer::measure::TextMeasurer;
use crate::placer::selection::{select_variant, SelectionConfig, VariantChoice};
use crate::placer::skyline::Skyline;
use crate::template::definition::Template;

/// A page under construction. Converted to a `Page` (regions, page type,
/// statics) by the orchestrator after phases D–F.
#[derive(Debug)]
pub struct PageDraft {
    pub tiles: Vec<TileInstance>,
    pub skyline: Skyline,
    /// Grid row re-centered by phase D, if any. Filler skips it.
    pub balanced_row: Option<u32>,
}

impl PageDraft {
    fn new(columns: u32) -> Self {
        PageDraft {
            tiles: Vec::new(),
            skyline: Skyline::new(columns),
            balanced_row: None,
        }
    }

    fn is_blank(&self) -> bool {
        self.tiles.is_empty() && self.skyline.is_empty()
    }
}

/// Packs the menu's token stream into page drafts. Always returns at least
/// one page; an empty menu yields a single page with zero tiles.
pub fn pack(
    menu: &NormalizedMenu,
    template: &Template,
    selection: &SelectionConfig,
) -> Vec<PageDraft> {
    let tokens = linearize(menu);
    let mut packer = Packer::new(menu, template, selection);

    for (index, token) in tokens.iter().enumerate() {
        match token {
            LayoutToken::SectionHeader { section } => {
                let upcoming = upcoming_item_spans(
                    &tokens[index + 1..],
                    section.id,
                    template,
                    selection,
                    template.policies.section_header_keep_with_next_items as usize,
                );
                packer.place_header(section, &upcoming);
            }
            LayoutToken::Item { section, item } => {
                let choice = select_variant(item, template, selection);
                packer.place_item(section, item, &choice);
            }
        }
    }

    packer.finish()
}

/// Variant spans of the next `keep_n` items belonging to `section_id`,
/// used to simulate whether a header can keep its items on the page.
fn upcoming_item_spans(
    rest: &[LayoutToken<'_>],
    section_id: Uuid,
    template: &Template,
    selection: &SelectionConfig,
    keep_n: usize,
) -> Vec<(u32, u32)> {
    rest.iter()
        .take_while(|t| matches!(t, LayoutToken::Item { section, .. } if section.id == section_id))
        .take(keep_n)
        .map(|t| match t {
            LayoutToken::Item { item, .. } => {
                let choice = select_variant(item, template, selection);
                (choice.def.col_span, choice.def.row_span)
            }
            LayoutToken::SectionHeader { .. } => unreachable!("filtered by take_while"),
        })
        .collect()
}

struct Packer<'a> {
    template: &'a Template,
    currency: &'a str,
    style: Option<TileStyle>,
    pages: Vec<PageDraft>,
    current: PageDraft,
}

impl<'a> Packer<'a> {
    fn new(menu: &'a NormalizedMenu, template: &'a Template, selection: &SelectionConfig) -> Self {
        let style = selection
            .colour_palette_id
            .as_ref()
            .map(|id| TileStyle {
                colour_palette_id: Some(id.clone()),
            });
        Packer {
            template,
            currency: &menu.metadata.currency,
            style,
            pages: Vec::new(),
            current: PageDraft::new(template.body.columns),
        }
    }

    fn page_index(&self) -> usize {
        self.pages.len()
    }

    fn rows_per_page(&self) -> u32 {
        self.template.rows_per_page()
    }

    fn close_page(&mut self) {
        debug!(
            page_index = self.page_index(),
            tiles = self.current.tiles.len(),
            "page closed"
        );
        let columns = self.template.body.columns;
        let finished = std::mem::replace(&mut self.current, PageDraft::new(columns));
        self.pages.push(finished);
    }

    /// Places a section header: always a full-width row at the current
    /// maximum skyline height, deferred to the next page when fewer than the
    /// keep-with-next item shapes would fit below it.
    fn place_header(&mut self, section: &Section, upcoming: &[(u32, u32)]) {
        let header_rows = self.template.tiles.section_header.row_span;

        loop {
            let row = self.current.skyline.full_width_row();
            if self.header_keeps_items(row, header_rows, upcoming) {
                self.commit_header(section, row, header_rows, false);
                return;
            }
            if self.current.is_blank() {
                // Even an empty page cannot keep the items; commit anyway so
                // pagination terminates. Schema guarantees the header itself
                // fits.
                warn!(
                    section = %section.name,
                    "section header cannot keep its items even on an empty page"
                );
                self.commit_header(section, row, header_rows, false);
                return;
            }
            self.close_page();
        }
    }

    /// Simulates the header plus the keep-with-next item shapes on a copy of
    /// the skyline.
    fn header_keeps_items(&self, row: u32, header_rows: u32, upcoming: &[(u32, u32)]) -> bool {
        let rows_per_page = self.rows_per_page();
        if row + header_rows > rows_per_page {
            return false;
        }
        let mut trial = self.current.skyline.clone();
        trial.commit_full_width(row, header_rows);
        for &(col_span, row_span) in upcoming {
            let Some(pos) = trial.position(col_span) else {
                return false;
            };
            if pos.row + row_span > rows_per_page {
                return false;
            }
            trial.commit(pos.col, col_span, pos.row, row_span);
        }
        true
    }

    fn commit_header(&mut self, section: &Section, row: u32, header_rows: u32, continuation: bool) {
        let template = self.template;
        let columns = template.body.columns;
        let id = if continuation {
            format!("header-{}-p{}", section.id, self.page_index())
        } else {
            format!("header-{}", section.id)
        };

        self.current.skyline.commit_full_width(row, header_rows);
        self.current.tiles.push(TileInstance {
            id,
            kind: TileKind::SectionHeader,
            region: RegionId::Body,
            x: 0.0,
            y: template.row_y(row),
            width: template.span_width(columns),
            height: template.span_height(header_rows),
            col_span: columns,
            row_span: header_rows,
            grid_row: row,
            grid_col: 0,
            layer: TileLayer::Content,
            content: TileContent::SectionHeader {
                section_id: section.id,
                name: section.name.clone(),
                continuation,
            },
            style: self.style.clone(),
        });
    }

    /// Places one item tile, breaking the page (and optionally re-emitting a
    /// continuation header) when its bottom edge would exceed the body region.
    fn place_item(&mut self, section: &Section, item: &Item, choice: &VariantChoice<'_>) {
        let rows_per_page = self.rows_per_page();
        let (col_span, row_span) = (choice.def.col_span, choice.def.row_span);

        loop {
            // Spans are schema-bounded by the column count, so a position
            // always exists.
            let Some(pos) = self.current.skyline.position(col_span) else {
                warn!(item = %item.name, col_span, "item span exceeds grid; skipping tile");
                return;
            };
            if pos.row + row_span <= rows_per_page {
                self.commit_item(section, item, choice, pos.col, pos.row);
                return;
            }

            self.close_page();

            if self.template.policies.repeat_section_header_on_continuation {
                let header_rows = self.template.tiles.section_header.row_span;
                // Skip the continuation header in the degenerate case where
                // header plus item outgrow a whole page.
                if header_rows + row_span <= rows_per_page {
                    self.commit_header(section, 0, header_rows, true);
                }
            }
        }
    }

    fn commit_item(
        &mut self,
        section: &Section,
        item: &Item,
        choice: &VariantChoice<'_>,
        col: u32,
        row: u32,
    ) {
        let template = self.template;
        let def = choice.def;
        let (col_span, row_span) = (def.col_span, def.row_span);
        self.current.skyline.commit(col, col_span, row, row_span);

        let budget = &def.content_budget;
        let measurer = TextMeasurer::new(def.font_size);
        let text_width = (template.span_width(col_span) - 2.0 * budget.padding).max(0.0);
        let name_lines = measurer
            .estimated_lines(&item.name, text_width)
            .min(budget.max_name_lines)
            .max(1);
        let description_lines = item
            .description
            .as_deref()
            .map(|d| {
                measurer
                    .estimated_lines(d, text_width)
                    .min(budget.max_description_lines)
            })
            .unwrap_or(0);

        let payload = ItemContent {
            item_id: item.id,
            section_id: section.id,
            name: item.name.clone(),
            description: item.description.clone(),
            price_minor: item.price_minor,
            currency: self.currency.to_string(),
            image_url: item.image_url.clone(),
            indicators: item.indicators.clone(),
            name_lines,
            description_lines,
        };
        let content = match choice.kind {
            TileKind::ItemCard => TileContent::ItemCard(payload),
            TileKind::FeatureCard => TileContent::FeatureCard(payload),
            _ => TileContent::ItemTextRow(payload),
        };

        self.current.tiles.push(TileInstance {
            id: format!("item-{}", item.id),
            kind: choice.kind,
            region: RegionId::Body,
            x: template.cell_x(col),
            y: template.row_y(row),
            width: template.span_width(col_span),
            height: template.span_height(row_span),
            col_span,
            row_span,
            grid_row: row,
            grid_col: col,
            layer: TileLayer::Content,
            content,
            style: self.style.clone(),
        });
    }

    fn finish(mut self) -> Vec<PageDraft> {
        self.pages.push(self.current);
        self.pages
    }
}

/// Emits an optional background divider rule in the gap above every section
/// header that continues a page (i.e. below each completed section). Never
/// moves a content tile.
pub fn insert_dividers(template: &Template, page: &mut PageDraft, page_index: usize) {
    let Some(dividers) = &template.dividers else {
        return;
    };
    let gap = template.body.gap;
    if gap <= 0.0 {
        return;
    }

    let mut rules: Vec<TileInstance> = Vec::new();
    for (i, tile) in page.tiles.iter().enumerate() {
        let header_starts_mid_page = tile.kind == TileKind::SectionHeader && tile.grid_row > 0;
        if !header_starts_mid_page {
            continue;
        }
        let y = template.row_y(tile.grid_row) - gap + (gap - dividers.thickness) / 2.0;
        rules.push(TileInstance {
            id: format!("divider-{page_index}-{i}"),
            kind: TileKind::Divider,
            region: RegionId::Body,
            x: 0.0,
            y,
            width: template.content_width(),
            height: dividers.thickness,
            col_span: template.body.columns,
            row_span: 0,
            grid_row: tile.grid_row,
            grid_col: 0,
            layer: TileLayer::Background,
            content: TileContent::Divider,
            style: None,
        });
    }
    page.tiles.extend(rules);
}

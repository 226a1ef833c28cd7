//! Variant selection: decides which tile shape represents an item.
//!
//! Pure function of `(item, template, selection)`; no side effects. The
//! decision table, in precedence order:
//! 1. `selection.text_only` → text row, regardless of `is_featured`.
//! 2. `item.is_featured` and the template defines a feature card → feature card.
//! 3. Otherwise the template's standard shape: the card variant when the
//!    template defines one and the item's content fits its budget, else the
//!    text row.

use serde::{Deserialize, Serialize};

use crate::models::menu::Item;
use crate::models::TileKind;
use crate::placer::measure::TextMeasurer;
use crate::template::definition::{Template, TileVariantDef};

/// Caller-supplied knobs for one placement call. Every field is defaulted;
/// absent means off.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionConfig {
    /// Force the text-row variant for every item.
    pub text_only: bool,
    /// Opaque to the placer, forwarded on every tile's style for the
    /// external renderer.
    pub colour_palette_id: Option<String>,
    /// Host-defined hard ceiling on total item count. Exceeding it aborts the
    /// call with `PlacementOverflow` before any placement work.
    pub item_ceiling: Option<usize>,
}

/// The chosen shape for one item.
#[derive(Debug, Clone, Copy)]
pub struct VariantChoice<'a> {
    pub kind: TileKind,
    pub def: &'a TileVariantDef,
}

/// Applies the decision table. See module docs for precedence.
pub fn select_variant<'a>(
    item: &Item,
    template: &'a Template,
    selection: &SelectionConfig,
) -> VariantChoice<'a> {
    if selection.text_only {
        return text_row(template);
    }

    if item.is_featured {
        if let Some(feature) = &template.tiles.feature_card {
            return VariantChoice {
                kind: TileKind::FeatureCard,
                def: feature,
            };
        }
        // No feature variant in this template: fall through to the standard
        // shape rather than failing.
    }

    if let Some(card) = &template.tiles.item_card {
        if content_fits(item, card, template) {
            return VariantChoice {
                kind: TileKind::ItemCard,
                def: card,
            };
        }
    }

    text_row(template)
}

fn text_row(template: &Template) -> VariantChoice<'_> {
    VariantChoice {
        kind: TileKind::ItemTextRow,
        def: &template.tiles.item_text_row,
    }
}

/// True when the item's name and description fit the variant's content budget
/// under the line-estimation heuristic.
pub fn content_fits(item: &Item, def: &TileVariantDef, template: &Template) -> bool {
    let budget = &def.content_budget;
    let text_width = template.span_width(def.col_span) - 2.0 * budget.padding;
    if text_width <= 0.0 {
        return false;
    }

    let measurer = TextMeasurer::new(def.font_size);
    if measurer.estimated_lines(&item.name, text_width) > budget.max_name_lines {
        return false;
    }
    if let Some(description) = &item.description {
        if measurer.estimated_lines(description, text_width) > budget.max_description_lines {
            return false;
        }
    }
    true
}

//! Built-in template definitions.
//!
//! Two known-good declarative definitions shipped with the engine: a 4-column
//! image-card grid and a 2-column text-only list. They double as working
//! references for template authors and as fixtures for the engine's own tests.
//! Dimensions are A4 points (595 × 842) with 36pt margins.

use crate::template::definition::Template;
use crate::template::repository::StaticTemplateSource;
use crate::template::schema;

/// 4-column card grid: image cards spanning two rows, double-width feature
/// cards, text-row fallback, full-grid filler safe zone (filler off by
/// default).
pub const CARD_GRID_JSON: &str = r#"{
  "id": "card-grid-4col",
  "version": 1,
  "page": {
    "width": 595.0,
    "height": 842.0,
    "margins": { "top": 36.0, "right": 36.0, "bottom": 36.0, "left": 36.0 }
  },
  "regions": { "header": 60.0, "title": 40.0, "body": 620.0, "footer": 50.0 },
  "body": { "columns": 4, "row_height": 90.0, "gap": 12.0 },
  "tiles": {
    "section_header": {
      "col_span": 4, "row_span": 1, "font_size": 18.0,
      "content_budget": { "max_name_lines": 1, "max_description_lines": 0, "image_box_height": 0.0, "padding": 8.0 }
    },
    "item_card": {
      "col_span": 1, "row_span": 2, "font_size": 10.0,
      "content_budget": { "max_name_lines": 2, "max_description_lines": 3, "image_box_height": 60.0, "padding": 6.0 }
    },
    "item_text_row": {
      "col_span": 1, "row_span": 1, "font_size": 10.0,
      "content_budget": { "max_name_lines": 2, "max_description_lines": 2, "image_box_height": 0.0, "padding": 6.0 }
    },
    "feature_card": {
      "col_span": 2, "row_span": 2, "font_size": 12.0,
      "content_budget": { "max_name_lines": 2, "max_description_lines": 4, "image_box_height": 80.0, "padding": 8.0 }
    },
    "logo": { "col_span": 1, "row_span": 1, "font_size": 12.0 },
    "title": { "col_span": 1, "row_span": 1, "font_size": 24.0 },
    "footer": { "col_span": 1, "row_span": 1, "font_size": 8.0 },
    "filler": { "col_span": 1, "row_span": 1, "font_size": 8.0 }
  },
  "policies": {
    "last_row_balancing": "CENTER",
    "show_logo_on_pages": ["First", "Single"],
    "show_title_on_pages": ["First", "Single"],
    "repeat_section_header_on_continuation": true,
    "section_header_keep_with_next_items": 1
  },
  "filler": {
    "enabled": false,
    "safe_zones": [{ "col": 0, "row": 0, "col_span": 4, "row_span": 6 }],
    "policy": "SEQUENTIAL"
  },
  "dividers": null
}"#;

/// 2-column text list: no images, no feature cards, section dividers.
pub const TEXT_LIST_JSON: &str = r#"{
  "id": "text-list-2col",
  "version": 1,
  "page": {
    "width": 595.0,
    "height": 842.0,
    "margins": { "top": 36.0, "right": 36.0, "bottom": 36.0, "left": 36.0 }
  },
  "regions": { "header": 50.0, "title": 30.0, "body": 660.0, "footer": 30.0 },
  "body": { "columns": 2, "row_height": 40.0, "gap": 8.0 },
  "tiles": {
    "section_header": {
      "col_span": 2, "row_span": 1, "font_size": 16.0,
      "content_budget": { "max_name_lines": 1, "max_description_lines": 0, "image_box_height": 0.0, "padding": 6.0 }
    },
    "item_text_row": {
      "col_span": 1, "row_span": 1, "font_size": 10.0,
      "content_budget": { "max_name_lines": 1, "max_description_lines": 2, "image_box_height": 0.0, "padding": 4.0 }
    },
    "item_card": null,
    "feature_card": null,
    "logo": null,
    "title": { "col_span": 1, "row_span": 1, "font_size": 20.0 },
    "footer": { "col_span": 1, "row_span": 1, "font_size": 8.0 },
    "filler": null
  },
  "policies": {
    "last_row_balancing": "LEFT",
    "show_logo_on_pages": [],
    "show_title_on_pages": ["First", "Single"],
    "repeat_section_header_on_continuation": true,
    "section_header_keep_with_next_items": 2
  },
  "filler": { "enabled": false, "safe_zones": [], "policy": "SEQUENTIAL" },
  "dividers": { "thickness": 1.5 }
}"#;

/// A static source pre-loaded with every built-in definition.
pub fn builtin_source() -> StaticTemplateSource {
    let mut source = StaticTemplateSource::new();
    source.insert("card-grid-4col", CARD_GRID_JSON);
    source.insert("text-list-2col", TEXT_LIST_JSON);
    source
}

/// Parsed 4-column card grid. The definition is a compile-time constant
/// covered by tests, so a parse failure here is unreachable.
pub fn card_grid_template() -> Template {
    schema::parse_and_validate(CARD_GRID_JSON).expect("builtin card-grid definition is valid")
}

/// Parsed 2-column text list.
pub fn text_list_template() -> Template {
    schema::parse_and_validate(TEXT_LIST_JSON).expect("builtin text-list definition is valid")
}

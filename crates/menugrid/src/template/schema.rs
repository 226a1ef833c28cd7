//! Template schema validation.
//!
//! Every structural defect in a declarative template definition is caught here
//! at load time and reported as `LayoutError::TemplateSchema`. In particular,
//! degenerate grids (zero usable columns or rows) must fail loading, because the
//! pagination loop relies on every variant fitting on an empty page.

use crate::errors::LayoutError;
use crate::template::definition::{Template, TileVariantDef};

/// Parses a raw JSON template definition and validates it structurally.
pub fn parse_and_validate(raw: &str) -> Result<Template, LayoutError> {
    let template: Template = serde_json::from_str(raw)
        .map_err(|e| LayoutError::TemplateSchema(format!("malformed definition: {e}")))?;
    validate(&template)?;
    Ok(template)
}

/// Validates an already-deserialized template.
pub fn validate(template: &Template) -> Result<(), LayoutError> {
    if template.id.trim().is_empty() {
        return Err(schema_err("template id must not be empty"));
    }
    if template.version == 0 {
        return Err(schema_err("template version must be >= 1"));
    }

    validate_page(template)?;
    validate_grid(template)?;
    validate_tiles(template)?;
    validate_policies(template)?;
    validate_filler(template)?;
    validate_dividers(template)?;

    Ok(())
}

fn validate_page(template: &Template) -> Result<(), LayoutError> {
    let page = &template.page;
    if page.width <= 0.0 || page.height <= 0.0 {
        return Err(schema_err("page dimensions must be positive"));
    }
    let m = &page.margins;
    if m.top < 0.0 || m.right < 0.0 || m.bottom < 0.0 || m.left < 0.0 {
        return Err(schema_err("page margins must not be negative"));
    }
    if template.content_width() <= 0.0 {
        return Err(schema_err("horizontal margins leave no content width"));
    }

    let r = &template.regions;
    if r.header < 0.0 || r.title < 0.0 || r.footer < 0.0 {
        return Err(schema_err("region heights must not be negative"));
    }
    if r.body <= 0.0 {
        return Err(schema_err("body region height must be positive"));
    }
    let total = r.header + r.title + r.body + r.footer + m.vertical();
    if total > page.height + 1e-3 {
        return Err(schema_err(&format!(
            "regions plus margins ({total}) exceed page height ({})",
            page.height
        )));
    }
    Ok(())
}

fn validate_grid(template: &Template) -> Result<(), LayoutError> {
    let body = &template.body;
    if body.columns == 0 {
        return Err(schema_err("body container must have at least one column"));
    }
    if body.row_height <= 0.0 {
        return Err(schema_err("row height must be positive"));
    }
    if body.gap < 0.0 {
        return Err(schema_err("gap must not be negative"));
    }
    if template.column_width() <= 0.0 {
        return Err(schema_err("column count and gaps leave no column width"));
    }
    if template.rows_per_page() == 0 {
        return Err(schema_err(
            "body region is shorter than a single grid row; no tile could ever be placed",
        ));
    }
    Ok(())
}

fn validate_tiles(template: &Template) -> Result<(), LayoutError> {
    let tiles = &template.tiles;
    check_variant(template, "section_header", &tiles.section_header)?;
    check_variant(template, "item_text_row", &tiles.item_text_row)?;
    for (name, variant) in [
        ("item_card", &tiles.item_card),
        ("feature_card", &tiles.feature_card),
        ("logo", &tiles.logo),
        ("title", &tiles.title),
        ("footer", &tiles.footer),
        ("filler", &tiles.filler),
    ] {
        if let Some(def) = variant {
            check_variant(template, name, def)?;
        }
    }
    Ok(())
}

fn check_variant(template: &Template, name: &str, def: &TileVariantDef) -> Result<(), LayoutError> {
    if def.col_span == 0 || def.row_span == 0 {
        return Err(schema_err(&format!("tile variant '{name}' has a zero span")));
    }
    if def.col_span > template.body.columns {
        return Err(schema_err(&format!(
            "tile variant '{name}' spans {} columns but the grid has {}",
            def.col_span, template.body.columns
        )));
    }
    if def.row_span > template.rows_per_page() {
        return Err(schema_err(&format!(
            "tile variant '{name}' spans {} rows but only {} fit on a page",
            def.row_span,
            template.rows_per_page()
        )));
    }
    if def.font_size <= 0.0 {
        return Err(schema_err(&format!(
            "tile variant '{name}' font size must be positive"
        )));
    }
    Ok(())
}

fn validate_policies(template: &Template) -> Result<(), LayoutError> {
    if template.policies.section_header_keep_with_next_items == 0 {
        return Err(schema_err(
            "section_header_keep_with_next_items must be >= 1",
        ));
    }
    Ok(())
}

fn validate_filler(template: &Template) -> Result<(), LayoutError> {
    let filler = &template.filler;
    if filler.enabled && template.tiles.filler.is_none() {
        return Err(schema_err(
            "filler is enabled but no filler tile variant is defined",
        ));
    }
    let cols = template.body.columns;
    let rows = template.rows_per_page();
    for (i, zone) in filler.safe_zones.iter().enumerate() {
        if zone.col_span == 0 || zone.row_span == 0 {
            return Err(schema_err(&format!("filler safe zone {i} has a zero span")));
        }
        if zone.col + zone.col_span > cols || zone.row + zone.row_span > rows {
            return Err(schema_err(&format!(
                "filler safe zone {i} extends beyond the {cols}x{rows} body grid"
            )));
        }
    }
    Ok(())
}

fn validate_dividers(template: &Template) -> Result<(), LayoutError> {
    if let Some(dividers) = &template.dividers {
        if dividers.thickness <= 0.0 {
            return Err(schema_err("divider thickness must be positive"));
        }
        if dividers.thickness > template.body.gap {
            return Err(schema_err(
                "divider thickness must fit within the grid gap",
            ));
        }
    }
    Ok(())
}

fn schema_err(message: &str) -> LayoutError {
    LayoutError::TemplateSchema(message.to_string())
}

//! Structural invariant checks over a finished `LayoutDocument`.
//!
//! These hold for every document the placer emits, regardless of input. The
//! engine runs them after placement in debug builds; hosts may also run them
//! against documents from other sources. The first violation found is
//! returned, with the page index and offending tile id.
//!
//! Checked invariants:
//!  1. every tile lies within the bounds of its region,
//!  2. content-layer tiles within one region of one page never overlap,
//!  3. every section header is followed on its own page by at least one item
//!     tile of the same section, lower on the page,
//!  4. item and header tiles live in the body region only.

use crate::errors::LayoutError;
use crate::models::{
    LayoutDocument, Page, RegionId, TileContent, TileInstance, TileKind, TileLayer,
};

/// Tolerance for floating-point geometry comparisons.
pub const BOUNDS_EPSILON: f32 = 0.05;

/// Checks all invariants, returning the first violation found.
pub fn check(document: &LayoutDocument) -> Result<(), LayoutError> {
    for page in &document.pages {
        check_bounds(page)?;
        check_overlap(page)?;
        check_headers(page)?;
        check_regions(page)?;
    }
    Ok(())
}

fn violation(page: &Page, tile: &TileInstance, message: String) -> LayoutError {
    LayoutError::InvariantViolation {
        page_index: page.page_index,
        tile_id: tile.id.clone(),
        message,
    }
}

fn check_bounds(page: &Page) -> Result<(), LayoutError> {
    for tile in &page.tiles {
        let Some(region) = page.region(tile.region) else {
            return Err(violation(
                page,
                tile,
                format!("tile references missing region {:?}", tile.region),
            ));
        };
        if tile.x < -BOUNDS_EPSILON
            || tile.y < -BOUNDS_EPSILON
            || tile.right() > region.width + BOUNDS_EPSILON
            || tile.bottom() > region.height + BOUNDS_EPSILON
        {
            return Err(violation(
                page,
                tile,
                format!(
                    "tile ({}, {}, {}, {}) exceeds region {:?} ({} x {})",
                    tile.x, tile.y, tile.width, tile.height, tile.region, region.width,
                    region.height
                ),
            ));
        }
    }
    Ok(())
}

fn check_overlap(page: &Page) -> Result<(), LayoutError> {
    let content: Vec<&TileInstance> = page
        .tiles
        .iter()
        .filter(|t| t.layer == TileLayer::Content)
        .collect();

    for (i, a) in content.iter().enumerate() {
        for b in &content[i + 1..] {
            if a.region != b.region {
                continue;
            }
            // Shrink both rectangles by the epsilon so shared edges do not
            // count as overlap.
            let overlap_x = a.x + BOUNDS_EPSILON < b.right() - BOUNDS_EPSILON
                && b.x + BOUNDS_EPSILON < a.right() - BOUNDS_EPSILON;
            let overlap_y = a.y + BOUNDS_EPSILON < b.bottom() - BOUNDS_EPSILON
                && b.y + BOUNDS_EPSILON < a.bottom() - BOUNDS_EPSILON;
            if overlap_x && overlap_y {
                return Err(violation(
                    page,
                    a,
                    format!("content tile overlaps tile '{}'", b.id),
                ));
            }
        }
    }
    Ok(())
}

fn check_headers(page: &Page) -> Result<(), LayoutError> {
    for tile in &page.tiles {
        let TileContent::SectionHeader { section_id, .. } = &tile.content else {
            continue;
        };
        let followed = page.tiles.iter().any(|other| {
            other.kind.is_item()
                && other
                    .content
                    .item()
                    .is_some_and(|item| item.section_id == *section_id)
                && other.y > tile.y
        });
        if !followed {
            return Err(violation(
                page,
                tile,
                "section header has no item of its section below it on the page".to_string(),
            ));
        }
    }
    Ok(())
}

fn check_regions(page: &Page) -> Result<(), LayoutError> {
    for tile in &page.tiles {
        let body_only = tile.kind.is_item() || tile.kind == TileKind::SectionHeader;
        if body_only && tile.region != RegionId::Body {
            return Err(violation(
                page,
                tile,
                format!("{:?} tile placed in region {:?}", tile.kind, tile.region),
            ));
        }
    }
    Ok(())
}

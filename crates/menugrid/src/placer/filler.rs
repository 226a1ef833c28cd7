//! Phase E: filler insertion.
//!
//! Fills empty body-grid cells that fall inside template-declared safe zones
//! with background-layer filler tiles. Filler never moves a content tile: it
//! only occupies cells the packing phase left empty, so filler-enabled and
//! filler-disabled runs produce identical item placements. Cells in a row the
//! balancer re-centered are skipped, since shifted tiles no longer align with the
//! grid there.

use crate::models::{RegionId, TileContent, TileInstance, TileKind, TileLayer};
use crate::placer::paginate::PageDraft;
use crate::template::definition::{FillerPolicy, Template};

pub fn insert_filler(template: &Template, page: &mut PageDraft, page_index: usize) {
    if !template.filler.enabled || template.filler.safe_zones.is_empty() {
        return;
    }

    let columns = template.body.columns as usize;
    let rows = template.rows_per_page() as usize;

    // Occupancy map of content-layer body tiles.
    let mut occupied = vec![false; columns * rows];
    for tile in &page.tiles {
        if tile.layer != TileLayer::Content || tile.region != RegionId::Body {
            continue;
        }
        for row in tile.grid_row..(tile.grid_row + tile.row_span).min(rows as u32) {
            for col in tile.grid_col..(tile.grid_col + tile.col_span).min(columns as u32) {
                occupied[row as usize * columns + col as usize] = true;
            }
        }
    }

    // Every row covered by a re-centered tile is off limits, including the
    // lower rows of multi-row cards.
    let balanced_rows: Vec<u32> = match page.balanced_row {
        Some(start) => page
            .tiles
            .iter()
            .filter(|t| t.kind.is_item() && t.grid_row == start)
            .flat_map(|t| t.grid_row..t.grid_row + t.row_span)
            .collect(),
        None => vec![],
    };

    let mut sequence = 0u32;
    match template.filler.policy {
        FillerPolicy::Sequential => {
            for row in 0..rows as u32 {
                if balanced_rows.contains(&row) {
                    continue;
                }
                for col in 0..columns as u32 {
                    if occupied[row as usize * columns + col as usize] {
                        continue;
                    }
                    if !template.filler.safe_zones.iter().any(|z| z.contains(col, row)) {
                        continue;
                    }
                    page.tiles.push(make_filler(template, page_index, sequence, col, row));
                    sequence += 1;
                }
            }
        }
    }
}

fn make_filler(
    template: &Template,
    page_index: usize,
    sequence: u32,
    col: u32,
    row: u32,
) -> TileInstance {
    TileInstance {
        id: format!("filler-{page_index}-{sequence}"),
        kind: TileKind::Filler,
        region: RegionId::Body,
        x: template.cell_x(col),
        y: template.row_y(row),
        width: template.span_width(1),
        height: template.span_height(1),
        col_span: 1,
        row_span: 1,
        grid_row: row,
        grid_col: col,
        layer: TileLayer::Background,
        content: TileContent::Filler { sequence },
        style: None,
    }
}

//! Phase D: last-row balancing.
//!
//! After packing, the last row of item tiles on each page may be partial.
//! Under the `CENTER` policy every tile starting in that row shifts by one
//! common x offset so the group sits centered in the row's free span. Tall
//! tiles from earlier rows can extend into the last row; their columns are
//! pinned and shrink the free span, so centering never slides a tile under
//! them. `LEFT` leaves the packing untouched. Grid coordinates are not
//! rewritten; only `x` moves, which is all the renderer consumes.

use crate::models::{RegionId, TileLayer};
use crate::placer::paginate::PageDraft;
use crate::template::definition::{LastRowBalancing, Template};

pub fn balance_last_row(template: &Template, page: &mut PageDraft) {
    if template.policies.last_row_balancing == LastRowBalancing::Left {
        return;
    }

    // The last row is the maximum starting row among item tiles.
    let Some(last_row) = page
        .tiles
        .iter()
        .filter(|t| t.kind.is_item())
        .map(|t| t.grid_row)
        .max()
    else {
        return;
    };

    let movable: Vec<usize> = page
        .tiles
        .iter()
        .enumerate()
        .filter(|(_, t)| t.kind.is_item() && t.grid_row == last_row)
        .map(|(i, _)| i)
        .collect();

    // Columns pinned by content tiles that start above the last row but
    // extend into it (tall cards).
    let columns = template.body.columns as usize;
    let mut pinned = vec![false; columns];
    for tile in &page.tiles {
        if tile.layer != TileLayer::Content || tile.region != RegionId::Body {
            continue;
        }
        if tile.grid_row < last_row && tile.grid_row + tile.row_span > last_row {
            for col in tile.grid_col..(tile.grid_col + tile.col_span).min(columns as u32) {
                pinned[col as usize] = true;
            }
        }
    }

    // The contiguous run of unpinned columns holding the movable group.
    let group_start = movable
        .iter()
        .map(|&i| page.tiles[i].grid_col)
        .min()
        .unwrap_or(0) as usize;
    let group_end = movable
        .iter()
        .map(|&i| (page.tiles[i].grid_col + page.tiles[i].col_span) as usize)
        .max()
        .unwrap_or(0);
    if pinned[group_start..group_end].iter().any(|&p| p) {
        return; // packing never interleaves the groups; bail if it did
    }
    let mut run_start = group_start;
    while run_start > 0 && !pinned[run_start - 1] {
        run_start -= 1;
    }
    let mut run_end = group_end;
    while run_end < columns && !pinned[run_end] {
        run_end += 1;
    }

    let columns_used: u32 = movable.iter().map(|&i| page.tiles[i].col_span).sum();
    if columns_used as usize >= run_end - run_start {
        return; // the free span is full, nothing to center
    }

    // Free span in x units. Interior edges stop at the pinned neighbour's gap.
    let x_start = if run_start == 0 {
        0.0
    } else {
        template.cell_x(run_start as u32)
    };
    let x_end = if run_end == columns {
        template.content_width()
    } else {
        template.cell_x(run_end as u32) - template.body.gap
    };

    let min_x = movable
        .iter()
        .map(|&i| page.tiles[i].x)
        .fold(f32::INFINITY, f32::min);
    let max_right = movable
        .iter()
        .map(|&i| page.tiles[i].right())
        .fold(f32::NEG_INFINITY, f32::max);

    // Signed: a group sitting right of the free span's center moves left.
    let offset = (x_start + x_end - min_x - max_right) / 2.0;
    if offset.abs() <= f32::EPSILON {
        return;
    }

    for i in movable {
        page.tiles[i].x += offset;
    }
    page.balanced_row = Some(last_row);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::menu::{Indicators, Item, MenuMetadata, NormalizedMenu, Section};
    use crate::models::{ItemContent, TileContent, TileInstance, TileKind};
    use crate::placer::paginate::pack;
    use crate::placer::selection::SelectionConfig;
    use crate::placer::skyline::Skyline;
    use crate::template::builtin::card_grid_template;
    use crate::template::definition::Template;
    use uuid::Uuid;

    const LONG_DESCRIPTION: &str = "Slow cooked for twelve hours with smoked paprika, \
        charred shallots and a red wine reduction finished with herb oil";

    fn make_item(name: &str, sort_order: i32) -> Item {
        Item {
            id: Uuid::new_v4(),
            name: name.to_string(),
            description: None,
            price_minor: 1000,
            image_url: None,
            sort_order,
            indicators: Indicators::default(),
            is_featured: false,
        }
    }

    fn make_menu(item_count: usize) -> NormalizedMenu {
        NormalizedMenu {
            id: Uuid::new_v4(),
            name: "Menu".to_string(),
            sections: vec![Section {
                id: Uuid::new_v4(),
                name: "Mains".to_string(),
                sort_order: 0,
                items: (0..item_count)
                    .map(|i| make_item(&format!("Dish {i}"), i as i32))
                    .collect(),
                subsections: vec![],
            }],
            metadata: MenuMetadata::default(),
        }
    }

    fn packed(item_count: usize) -> (Template, PageDraft) {
        let template = card_grid_template();
        let mut pages = pack(&make_menu(item_count), &template, &SelectionConfig::default());
        (template, pages.remove(0))
    }

    fn make_grid_tile(
        template: &Template,
        kind: TileKind,
        col: u32,
        row: u32,
        col_span: u32,
        row_span: u32,
    ) -> TileInstance {
        let payload = ItemContent {
            item_id: Uuid::new_v4(),
            section_id: Uuid::new_v4(),
            name: "Dish".to_string(),
            description: None,
            price_minor: 900,
            currency: "GBP".to_string(),
            image_url: None,
            indicators: Indicators::default(),
            name_lines: 1,
            description_lines: 0,
        };
        TileInstance {
            id: format!("item-{}", payload.item_id),
            kind,
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
            content: match kind {
                TileKind::FeatureCard => TileContent::FeatureCard(payload),
                _ => TileContent::ItemTextRow(payload),
            },
            style: None,
        }
    }

    #[test]
    fn test_full_last_row_untouched() {
        let (template, mut page) = packed(4);
        let before: Vec<f32> = page.tiles.iter().map(|t| t.x).collect();
        balance_last_row(&template, &mut page);
        let after: Vec<f32> = page.tiles.iter().map(|t| t.x).collect();
        assert_eq!(before, after);
        assert!(page.balanced_row.is_none());
    }

    #[test]
    fn test_partial_last_row_centered() {
        // 5 items in a 4-column grid: second row holds one tile.
        let (template, mut page) = packed(5);
        balance_last_row(&template, &mut page);

        let last_row = page
            .tiles
            .iter()
            .filter(|t| t.kind.is_item())
            .map(|t| t.grid_row)
            .max()
            .unwrap();
        let lone: Vec<_> = page
            .tiles
            .iter()
            .filter(|t| t.kind.is_item() && t.grid_row == last_row)
            .collect();
        assert_eq!(lone.len(), 1);
        let tile = lone[0];
        assert!(tile.x > 0.0, "centered tile must move right");
        let center = tile.x + tile.width / 2.0;
        assert!(
            (center - template.content_width() / 2.0).abs() < 0.01,
            "tile center {center} should match region center"
        );
        assert_eq!(page.balanced_row, Some(last_row));
        // Still inside the region.
        assert!(tile.right() <= template.content_width() + 0.01);
    }

    #[test]
    fn test_left_policy_never_shifts() {
        let template = {
            let mut t = card_grid_template();
            t.policies.last_row_balancing = LastRowBalancing::Left;
            t
        };
        let mut pages = pack(&make_menu(5), &template, &SelectionConfig::default());
        let mut page = pages.remove(0);
        balance_last_row(&template, &mut page);
        let last_row_tiles: Vec<_> = page
            .tiles
            .iter()
            .filter(|t| t.kind.is_item() && t.grid_row == 3)
            .collect();
        assert!(last_row_tiles.iter().all(|t| t.x == 0.0));
        assert!(page.balanced_row.is_none());
    }

    #[test]
    fn test_page_without_item_tiles_untouched() {
        let (template, mut page) = packed(0);
        balance_last_row(&template, &mut page);
        assert!(page.balanced_row.is_none());
        assert!(page.tiles.is_empty());
    }

    #[test]
    fn test_tall_tile_into_last_row_pins_its_columns() {
        // Five text rows, a 2x2 feature card, two more text rows: the feature
        // card extends into the last row, so the tile there must stay put
        // instead of sliding under it.
        let template = card_grid_template();
        let mut items: Vec<Item> = (0..8)
            .map(|i| {
                let mut item = make_item(&format!("Dish {i}"), i);
                item.description = Some(LONG_DESCRIPTION.to_string());
                item
            })
            .collect();
        items[5].description = None;
        items[5].is_featured = true;
        let menu = NormalizedMenu {
            id: Uuid::new_v4(),
            name: "Menu".to_string(),
            sections: vec![Section {
                id: Uuid::new_v4(),
                name: "Mains".to_string(),
                sort_order: 0,
                items,
                subsections: vec![],
            }],
            metadata: MenuMetadata::default(),
        };

        let mut pages = pack(&menu, &template, &SelectionConfig::default());
        let page = &mut pages[0];
        let feature = page
            .tiles
            .iter()
            .find(|t| t.kind == TileKind::FeatureCard)
            .expect("feature card placed")
            .clone();
        let last_row = page
            .tiles
            .iter()
            .filter(|t| t.kind.is_item())
            .map(|t| t.grid_row)
            .max()
            .unwrap();
        assert!(
            feature.grid_row < last_row && feature.grid_row + feature.row_span > last_row,
            "feature card must extend into the last row for this scenario"
        );

        balance_last_row(&template, page);

        // Nothing in the last row may overlap the feature card's columns.
        for tile in page.tiles.iter().filter(|t| t.grid_row == last_row) {
            assert!(
                tile.right() <= feature.x + 0.01 || tile.x >= feature.right() - 0.01,
                "tile {} slid under the feature card",
                tile.id
            );
        }
    }

    #[test]
    fn test_group_right_of_free_span_center_shifts_left() {
        // Hand-built draft: a feature card pins columns 2-3 of the last row;
        // the lone movable row sits at column 1 of a free span covering
        // columns 0-1, right of that span's center.
        let template = card_grid_template();
        let feature = make_grid_tile(&template, TileKind::FeatureCard, 2, 2, 2, 2);
        let movable = make_grid_tile(&template, TileKind::ItemTextRow, 1, 3, 1, 1);
        let before_x = movable.x;
        let mut page = PageDraft {
            tiles: vec![feature, movable],
            skyline: Skyline::new(template.body.columns),
            balanced_row: None,
        };

        balance_last_row(&template, &mut page);

        let tile = &page.tiles[1];
        assert!(tile.x < before_x, "group right of center must move left");
        let span_end = template.cell_x(2) - template.body.gap;
        let center = tile.x + tile.width / 2.0;
        assert!(
            (center - span_end / 2.0).abs() < 0.01,
            "tile center {center} should match free-span center {}",
            span_end / 2.0
        );
        assert_eq!(page.balanced_row, Some(3));
    }
}

//! The pagination core: from `(NormalizedMenu, Template, SelectionConfig)` to
//! a `LayoutDocument`.
//!
//! `place` is a pure, synchronous, in-memory computation: no I/O, no shared
//! mutable state. Arbitrarily many calls may run in parallel. It is
//! all-or-nothing: on error nothing is returned, never a partial document.

pub mod balance;
pub mod filler;
pub mod linearize;
pub mod measure;
pub mod paginate;
pub mod selection;
pub mod skyline;
pub mod statics;

use chrono::Utc;
use tracing::info;

use crate::errors::LayoutError;
use crate::models::menu::NormalizedMenu;
use crate::models::{DebugInfo, LayoutDocument, Page, Region};
use crate::template::definition::Template;

pub use selection::{select_variant, SelectionConfig, VariantChoice};

/// Computes the paginated layout document.
///
/// An empty-but-well-typed menu is not an error: it produces one page with
/// zero item tiles. The only pre-placement failure is the host-configured
/// item ceiling.
pub fn place(
    menu: &NormalizedMenu,
    template: &Template,
    selection: &SelectionConfig,
) -> Result<LayoutDocument, LayoutError> {
    let item_count = menu.item_count();
    if let Some(ceiling) = selection.item_ceiling {
        if item_count > ceiling {
            return Err(LayoutError::PlacementOverflow {
                item_count,
                ceiling,
            });
        }
    }

    let drafts = paginate::pack(menu, template, selection);
    let page_count = drafts.len();

    let mut pages = Vec::with_capacity(page_count);
    for (index, mut draft) in drafts.into_iter().enumerate() {
        balance::balance_last_row(template, &mut draft);
        paginate::insert_dividers(template, &mut draft, index);
        filler::insert_filler(template, &mut draft, index);

        let page_type = statics::page_type_for(index, page_count);
        statics::add_static_tiles(menu, template, &mut draft.tiles, page_type, index);

        pages.push(Page {
            page_index: index,
            page_type,
            regions: build_regions(template),
            tiles: draft.tiles,
        });
    }

    info!(
        menu_id = %menu.id,
        template_id = %template.id,
        items = item_count,
        pages = page_count,
        "placement complete"
    );

    Ok(LayoutDocument {
        template_id: template.id.clone(),
        template_version: template.version,
        page_spec: template.page.clone(),
        pages,
        debug: Some(DebugInfo {
            generated_at: Utc::now(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            item_count,
            page_count,
        }),
    })
}

/// The four fixed regions, identical on every page of a document.
fn build_regions(template: &Template) -> Vec<Region> {
    let width = template.content_width();
    template
        .region_heights()
        .into_iter()
        .map(|(id, height)| Region { id, width, height })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::menu::{Indicators, Item, MenuMetadata, Section};
    use crate::models::{PageType, TileKind};
    use crate::template::builtin::card_grid_template;
    use uuid::Uuid;

    fn make_item(name: &str, sort_order: i32) -> Item {
        Item {
            id: Uuid::new_v4(),
            name: name.to_string(),
            description: None,
            price_minor: 1250,
            image_url: None,
            sort_order,
            indicators: Indicators::default(),
            is_featured: false,
        }
    }

    fn make_section(name: &str, sort_order: i32, count: usize) -> Section {
        Section {
            id: Uuid::new_v4(),
            name: name.to_string(),
            sort_order,
            items: (0..count)
                .map(|i| make_item(&format!("{name} {i}"), i as i32))
                .collect(),
            subsections: vec![],
        }
    }

    fn make_menu(sections: Vec<Section>) -> NormalizedMenu {
        NormalizedMenu {
            id: Uuid::new_v4(),
            name: "Menu".to_string(),
            sections,
            metadata: MenuMetadata {
                currency: "USD".to_string(),
                logo_url: Some("https://cdn.example/logo.png".to_string()),
                ..Default::default()
            },
        }
    }

    /// Item tiles sorted by `(page, y, x)`, the reading-order projection.
    fn reading_order(document: &LayoutDocument) -> Vec<String> {
        let mut tiles: Vec<(usize, f32, f32, String)> = document
            .item_tiles()
            .map(|(page, t)| {
                let name = t.content.item().unwrap().name.clone();
                (page, t.y, t.x, name)
            })
            .collect();
        tiles.sort_by(|a, b| {
            a.0.cmp(&b.0)
                .then(a.1.partial_cmp(&b.1).unwrap())
                .then(a.2.partial_cmp(&b.2).unwrap())
        });
        tiles.into_iter().map(|(_, _, _, name)| name).collect()
    }

    #[test]
    fn test_four_items_share_one_row_unbalanced() {
        let template = card_grid_template();
        let menu = make_menu(vec![make_section("Mains", 0, 4)]);
        let document = place(&menu, &template, &SelectionConfig::default()).unwrap();

        let items: Vec<_> = document.item_tiles().map(|(_, t)| t).collect();
        assert_eq!(items.len(), 4);
        let y = items[0].y;
        assert!(items.iter().all(|t| t.y == y), "single row expected");
        assert_eq!(items[0].x, 0.0, "full row is not balanced");
    }

    #[test]
    fn test_fifth_item_centered_on_second_row() {
        let template = card_grid_template();
        let menu = make_menu(vec![make_section("Mains", 0, 5)]);
        let document = place(&menu, &template, &SelectionConfig::default()).unwrap();

        let items: Vec<_> = document.item_tiles().map(|(_, t)| t).collect();
        assert_eq!(items.len(), 5);
        let max_y = items.iter().map(|t| t.y).fold(f32::NEG_INFINITY, f32::max);
        let second_row: Vec<_> = items.iter().filter(|t| t.y == max_y).collect();
        assert_eq!(second_row.len(), 1);
        assert!(second_row[0].x > 0.0, "lone tile must be centered");
    }

    #[test]
    fn test_logo_only_on_first_page() {
        let mut template = card_grid_template();
        template.policies.show_logo_on_pages = vec![PageType::First];
        let menu = make_menu(vec![make_section("Everything", 0, 120)]);
        let document = place(&menu, &template, &SelectionConfig::default()).unwrap();
        assert!(document.pages.len() > 1);

        for page in &document.pages {
            let has_logo = page.tiles.iter().any(|t| t.kind == TileKind::Logo);
            assert_eq!(has_logo, page.page_index == 0, "page {}", page.page_index);
        }
    }

    #[test]
    fn test_page_typing() {
        let template = card_grid_template();

        let single = place(
            &make_menu(vec![make_section("S", 0, 3)]),
            &template,
            &SelectionConfig::default(),
        )
        .unwrap();
        assert_eq!(single.pages.len(), 1);
        assert_eq!(single.pages[0].page_type, PageType::Single);

        let multi = place(
            &make_menu(vec![make_section("L", 0, 60)]),
            &template,
            &SelectionConfig::default(),
        )
        .unwrap();
        assert!(multi.pages.len() >= 3);
        assert_eq!(multi.pages[0].page_type, PageType::First);
        assert_eq!(
            multi.pages.last().unwrap().page_type,
            PageType::Final
        );
        for page in &multi.pages[1..multi.pages.len() - 1] {
            assert_eq!(page.page_type, PageType::Continuation);
        }
    }

    #[test]
    fn test_reading_order_matches_sort_order() {
        let template = card_grid_template();
        // Authored out of order on purpose.
        let menu = make_menu(vec![
            make_section("B", 2, 7),
            make_section("A", 1, 9),
        ]);
        let document = place(&menu, &template, &SelectionConfig::default()).unwrap();

        let expected: Vec<String> = (0..9)
            .map(|i| format!("A {i}"))
            .chain((0..7).map(|i| format!("B {i}")))
            .collect();
        assert_eq!(reading_order(&document), expected);
    }

    #[test]
    fn test_filler_independence() {
        let menu = make_menu(vec![make_section("Mains", 0, 11)]);
        let disabled = card_grid_template();
        let mut enabled = card_grid_template();
        enabled.filler.enabled = true;

        let doc_off = place(&menu, &disabled, &SelectionConfig::default()).unwrap();
        let doc_on = place(&menu, &enabled, &SelectionConfig::default()).unwrap();

        let geometry = |document: &LayoutDocument| -> Vec<(String, f32, f32, f32, f32)> {
            document
                .item_tiles()
                .map(|(_, t)| (t.id.clone(), t.x, t.y, t.width, t.height))
                .collect()
        };
        assert_eq!(geometry(&doc_off), geometry(&doc_on));
        assert!(doc_on
            .pages
            .iter()
            .any(|p| p.tiles.iter().any(|t| t.kind == TileKind::Filler)));
    }

    #[test]
    fn test_determinism_excluding_timestamp() {
        let template = card_grid_template();
        let menu = make_menu(vec![make_section("A", 0, 13), make_section("B", 1, 4)]);

        let mut first = place(&menu, &template, &SelectionConfig::default()).unwrap();
        let mut second = place(&menu, &template, &SelectionConfig::default()).unwrap();
        first.debug = None;
        second.debug = None;

        let a = serde_json::to_string(&first).unwrap();
        let b = serde_json::to_string(&second).unwrap();
        assert_eq!(a, b, "placement must be byte-identical across runs");
    }

    #[test]
    fn test_item_ceiling_aborts_before_placement() {
        let template = card_grid_template();
        let menu = make_menu(vec![make_section("Mains", 0, 10)]);
        let selection = SelectionConfig {
            item_ceiling: Some(5),
            ..Default::default()
        };
        let err = place(&menu, &template, &selection).unwrap_err();
        assert!(matches!(
            err,
            LayoutError::PlacementOverflow {
                item_count: 10,
                ceiling: 5
            }
        ));
    }

    #[test]
    fn test_empty_menu_produces_document_without_items() {
        let template = card_grid_template();
        let menu = make_menu(vec![]);
        let document = place(&menu, &template, &SelectionConfig::default()).unwrap();
        assert_eq!(document.pages.len(), 1);
        assert_eq!(document.item_tiles().count(), 0);
        // Regions are always present, all four of them.
        assert_eq!(document.pages[0].regions.len(), 4);
    }

    #[test]
    fn test_mixed_variant_spans_keep_order_and_invariants() {
        // One section mixing all three shapes: a 1x2 card, 1x1 text rows
        // (description too long for the card budget) and 2x2 feature cards.
        let template = card_grid_template();
        let long = "Slow cooked for twelve hours with smoked paprika, charred \
            shallots and a red wine reduction finished with herb oil";
        let specs: [(&str, Option<&str>, bool); 7] = [
            ("Card 1", None, false),
            ("Row 1", Some(long), false),
            ("Row 2", Some(long), false),
            ("Row 3", Some(long), false),
            ("Feature 1", None, true),
            ("Feature 2", None, true),
            ("Row 4", Some(long), false),
        ];
        let items = specs
            .iter()
            .enumerate()
            .map(|(i, (name, description, featured))| Item {
                id: Uuid::new_v4(),
                name: name.to_string(),
                description: description.map(str::to_string),
                price_minor: 1800,
                image_url: None,
                sort_order: i as i32,
                indicators: Indicators::default(),
                is_featured: *featured,
            })
            .collect();
        let menu = make_menu(vec![Section {
            id: Uuid::new_v4(),
            name: "Mains".to_string(),
            sort_order: 0,
            items,
            subsections: vec![],
        }]);

        let document = place(&menu, &template, &SelectionConfig::default()).unwrap();

        // All three shapes must actually be present for the mix to count.
        for kind in [TileKind::ItemCard, TileKind::ItemTextRow, TileKind::FeatureCard] {
            assert!(
                document.item_tiles().any(|(_, t)| t.kind == kind),
                "expected a {kind:?} tile"
            );
        }

        let expected: Vec<String> = specs.iter().map(|(name, _, _)| name.to_string()).collect();
        assert_eq!(reading_order(&document), expected);
        crate::validate::invariants::check(&document).unwrap();
    }

    #[test]
    fn test_every_input_item_appears_exactly_once() {
        let template = card_grid_template();
        let menu = make_menu(vec![make_section("A", 0, 23), make_section("B", 1, 17)]);
        let document = place(&menu, &template, &SelectionConfig::default()).unwrap();

        let mut ids: Vec<Uuid> = document
            .item_tiles()
            .map(|(_, t)| t.content.item().unwrap().item_id)
            .collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 40, "every item exactly once");
    }
}

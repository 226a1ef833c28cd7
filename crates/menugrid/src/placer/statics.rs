//! Phase F: page typing and static tiles.
//!
//! Page types derive purely from position: a single page is `Single`,
//! otherwise first/last/middle are `First`/`Final`/`Continuation`. Static
//! tiles (logo, title, footer) fill their whole region and are emitted only on
//! pages whose type appears in the corresponding `show_*_on_pages` policy.

use crate::models::menu::NormalizedMenu;
use crate::models::{PageType, RegionId, TileContent, TileInstance, TileLayer};
use crate::template::definition::Template;

pub fn page_type_for(page_index: usize, page_count: usize) -> PageType {
    if page_count <= 1 {
        PageType::Single
    } else if page_index == 0 {
        PageType::First
    } else if page_index == page_count - 1 {
        PageType::Final
    } else {
        PageType::Continuation
    }
}

/// Appends the policy-gated static tiles for one page.
pub fn add_static_tiles(
    menu: &NormalizedMenu,
    template: &Template,
    tiles: &mut Vec<TileInstance>,
    page_type: PageType,
    page_index: usize,
) {
    let policies = &template.policies;

    if template.tiles.logo.is_some() && policies.show_logo_on_pages.contains(&page_type) {
        tiles.push(region_tile(
            template,
            format!("logo-{page_index}"),
            RegionId::Header,
            template.regions.header,
            TileContent::Logo {
                url: menu.metadata.logo_url.clone(),
            },
        ));
    }

    if template.tiles.title.is_some() && policies.show_title_on_pages.contains(&page_type) {
        tiles.push(region_tile(
            template,
            format!("title-{page_index}"),
            RegionId::Title,
            template.regions.title,
            TileContent::Title {
                text: menu.name.clone(),
            },
        ));
    }

    if template.tiles.footer.is_some() && policies.show_footer_on_pages.contains(&page_type) {
        tiles.push(region_tile(
            template,
            format!("footer-{page_index}"),
            RegionId::Footer,
            template.regions.footer,
            TileContent::Footer {
                venue_name: menu.metadata.venue_name.clone(),
                venue_address: menu.metadata.venue_address.clone(),
            },
        ));
    }
}

/// A static tile spanning its whole region. Grid coordinates are meaningless
/// outside the body and stay at zero.
fn region_tile(
    template: &Template,
    id: String,
    region: RegionId,
    height: f32,
    content: TileContent,
) -> TileInstance {
    let kind = content.kind();
    TileInstance {
        id,
        kind,
        region,
        x: 0.0,
        y: 0.0,
        width: template.content_width(),
        height,
        col_span: 0,
        row_span: 0,
        grid_row: 0,
        grid_col: 0,
        layer: TileLayer::Content,
        content,
        style: None,
    }
}

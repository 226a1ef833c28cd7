pub mod document;
pub mod menu;

pub use document::{
    DebugInfo, ItemContent, LayoutDocument, Margins, Page, PageSpec, PageType, Region, RegionId,
    TileContent, TileInstance, TileKind, TileLayer, TileStyle,
};
pub use menu::{Indicators, Item, MenuMetadata, NormalizedMenu, Section};

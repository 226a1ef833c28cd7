//! Declarative templates: definition model, schema validation, loading.

pub mod builtin;
pub mod definition;
pub mod repository;
pub mod schema;

pub use definition::{
    BodyContainer, ContentBudget, DividerConfig, FillerConfig, FillerPolicy, GridRect,
    LastRowBalancing, Policies, RegionHeights, Template, TileSet, TileVariantDef,
};
pub use repository::{FileTemplateSource, StaticTemplateSource, TemplateRepository, TemplateSource};

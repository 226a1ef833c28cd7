//! Declarative grid layout and pagination engine for normalized menus.
//!
//! Given a `NormalizedMenu`, a `Template` and a `SelectionConfig`, the engine
//! computes a `LayoutDocument`: pages of positioned tiles an external renderer
//! can draw without re-running any layout logic. Placement is deterministic
//! and pure; templates are data, loaded and cached by `TemplateRepository`.
//!
//! ```no_run
//! use menugrid::{LayoutEngine, SelectionConfig};
//! # use menugrid::models::menu::NormalizedMenu;
//!
//! # async fn example(menu: NormalizedMenu) -> anyhow::Result<()> {
//! let engine = LayoutEngine::with_builtins();
//! let document = engine
//!     .layout(&menu, "card-grid-4col", &SelectionConfig::default())
//!     .await?;
//! println!("{} pages", document.pages.len());
//! # Ok(())
//! # }
//! ```

pub mod engine;
pub mod errors;
pub mod models;
pub mod placer;
pub mod template;
pub mod validate;

pub use engine::LayoutEngine;
pub use errors::LayoutError;
pub use models::{LayoutDocument, Page, TileInstance};
pub use placer::{place, SelectionConfig};
pub use template::definition::Template;
pub use template::repository::{
    FileTemplateSource, StaticTemplateSource, TemplateRepository, TemplateSource,
};
pub use validate::{check as check_invariants, validate_menu};

//! Engine facade: template loading plus placement in one call.
//!
//! Hosts that manage templates themselves can call `placer::place` directly;
//! the engine adds the repository lookup, advisory input validation logging
//! and a debug-build invariant check on the output.

use tracing::warn;

use crate::errors::LayoutError;
use crate::models::menu::NormalizedMenu;
use crate::models::LayoutDocument;
use crate::placer::{self, SelectionConfig};
use crate::template::repository::TemplateRepository;
use crate::validate;

pub struct LayoutEngine {
    repository: TemplateRepository,
}

impl LayoutEngine {
    pub fn new(repository: TemplateRepository) -> Self {
        Self { repository }
    }

    /// An engine preloaded with the built-in templates.
    pub fn with_builtins() -> Self {
        Self::new(TemplateRepository::with_builtins())
    }

    pub fn repository(&self) -> &TemplateRepository {
        &self.repository
    }

    /// Loads the template and computes the layout document.
    pub async fn layout(
        &self,
        menu: &NormalizedMenu,
        template_id: &str,
        selection: &SelectionConfig,
    ) -> Result<LayoutDocument, LayoutError> {
        for warning in validate::validate_menu(menu) {
            warn!(menu_id = %menu.id, %warning, "menu validation warning");
        }

        let template = self.repository.load(template_id).await?;
        let document = placer::place(menu, &template, selection)?;

        if cfg!(debug_assertions) {
            validate::check(&document)?;
        }

        Ok(document)
    }
}

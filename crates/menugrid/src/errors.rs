use thiserror::Error;

/// Engine-level error type.
///
/// Menu validation issues are NOT errors: `validate::menu::validate` returns an
/// advisory `Vec<String>` and never fails. Everything here aborts the call that
/// raised it; the placer never returns a partially built document.
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("Template not found: {0}")]
    TemplateNotFound(String),

    #[error("Template schema error: {0}")]
    TemplateSchema(String),

    #[error("Template source error: {0}")]
    TemplateSource(#[from] std::io::Error),

    /// Host-configured hard ceiling on total item count, checked before any
    /// placement work begins.
    #[error("Placement overflow: menu has {item_count} items, ceiling is {ceiling}")]
    PlacementOverflow { item_count: usize, ceiling: usize },

    /// Raised by the invariant validator. A violation indicates an engine
    /// defect, never a user error, since the placer's own logic is supposed to make
    /// this unreachable.
    #[error("Invariant violation on page {page_index}, tile '{tile_id}': {message}")]
    InvariantViolation {
        page_index: usize,
        tile_id: String,
        message: String,
    },

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

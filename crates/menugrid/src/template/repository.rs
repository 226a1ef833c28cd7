//! Template loading and caching.
//!
//! `TemplateRepository` resolves a template id through a pluggable async
//! `TemplateSource`, schema-validates the raw definition, and caches the
//! parsed `Template` by id for the process lifetime. Loading is idempotent:
//! concurrent first-loads of the same id may race benignly (both parse, last
//! insert wins) because the loaded value is pure data and no lock is held across
//! the fetch.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use tracing::{debug, info};

use crate::errors::LayoutError;
use crate::template::definition::Template;
use crate::template::schema;

// ────────────────────────────────────────────────────────────────────────────
// Sources
// ────────────────────────────────────────────────────────────────────────────

/// Where raw template definitions come from. `Ok(None)` means the id is
/// unknown to this source; the repository turns that into `TemplateNotFound`.
#[async_trait]
pub trait TemplateSource: Send + Sync {
    async fn fetch(&self, template_id: &str) -> Result<Option<String>, LayoutError>;
}

/// Reads `{root}/{id}.json` from disk.
pub struct FileTemplateSource {
    root: PathBuf,
}

impl FileTemplateSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        FileTemplateSource { root: root.into() }
    }
}

#[async_trait]
impl TemplateSource for FileTemplateSource {
    async fn fetch(&self, template_id: &str) -> Result<Option<String>, LayoutError> {
        let path = self.root.join(format!("{template_id}.json"));
        match tokio::fs::read_to_string(&path).await {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(LayoutError::TemplateSource(e)),
        }
    }
}

/// In-memory source backed by a map of raw definitions. Used for the built-in
/// template set and for tests.
#[derive(Default)]
pub struct StaticTemplateSource {
    definitions: HashMap<String, String>,
}

impl StaticTemplateSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, template_id: &str, raw: &str) {
        self.definitions
            .insert(template_id.to_string(), raw.to_string());
    }

    pub fn contains(&self, template_id: &str) -> bool {
        self.definitions.contains_key(template_id)
    }
}

#[async_trait]
impl TemplateSource for StaticTemplateSource {
    async fn fetch(&self, template_id: &str) -> Result<Option<String>, LayoutError> {
        Ok(self.definitions.get(template_id).cloned())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Repository
// ────────────────────────────────────────────────────────────────────────────

/// Read-mostly, process-wide template store.
pub struct TemplateRepository {
    source: Arc<dyn TemplateSource>,
    cache: RwLock<HashMap<String, Arc<Template>>>,
}

impl TemplateRepository {
    pub fn new(source: Arc<dyn TemplateSource>) -> Self {
        TemplateRepository {
            source,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Repository over the built-in template set.
    pub fn with_builtins() -> Self {
        Self::new(Arc::new(crate::template::builtin::builtin_source()))
    }

    /// Loads and schema-validates a template by id, serving repeat loads from
    /// the in-memory cache.
    pub async fn load(&self, template_id: &str) -> Result<Arc<Template>, LayoutError> {
        if let Some(cached) = self.lookup(template_id) {
            debug!(template_id, "template cache hit");
            return Ok(cached);
        }

        let raw = self
            .source
            .fetch(template_id)
            .await?
            .ok_or_else(|| LayoutError::TemplateNotFound(template_id.to_string()))?;

        let template = Arc::new(schema::parse_and_validate(&raw)?);
        info!(
            template_id,
            version = template.version,
            columns = template.body.columns,
            "template loaded"
        );

        let mut cache = self.cache.write().unwrap_or_else(|e| e.into_inner());
        cache.insert(template_id.to_string(), Arc::clone(&template));
        Ok(template)
    }

    /// Drops every cached template. Exists for test isolation.
    pub fn clear_cache(&self) {
        let mut cache = self.cache.write().unwrap_or_else(|e| e.into_inner());
        cache.clear();
    }

    fn lookup(&self, template_id: &str) -> Option<Arc<Template>> {
        let cache = self.cache.read().unwrap_or_else(|e| e.into_inner());
        cache.get(template_id).cloned()
    }
}

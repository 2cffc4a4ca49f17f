//! Default model selection against live availability.

use std::collections::HashSet;

use tracing::debug;

use super::catalog::{recommended_catalog, CatalogEntry, ModelCategory, ModelDescriptor};
use crate::config::RespkitConfig;
use crate::error::RespkitError;
use crate::provider::ResponsesApi;

/// Returned when nothing in the catalog is available. Not checked against the
/// service.
pub const FALLBACK_MODEL: &str = "gpt-4.1-mini";

/// Picks a default model from an ordered catalog.
#[derive(Debug, Clone)]
pub struct ModelSelector {
    catalog: Vec<CatalogEntry>,
}

impl Default for ModelSelector {
    fn default() -> Self {
        Self::new(recommended_catalog())
    }
}

impl ModelSelector {
    pub fn new(catalog: Vec<CatalogEntry>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &[CatalogEntry] {
        &self.catalog
    }

    /// Mark each catalog entry available iff its id is in `live_ids`.
    /// Unavailable entries are kept; catalog order is preserved.
    pub fn annotate(&self, live_ids: &HashSet<String>) -> Vec<ModelDescriptor> {
        self.catalog
            .iter()
            .map(|entry| ModelDescriptor::from_entry(entry, live_ids.contains(&entry.id)))
            .collect()
    }

    /// First available model of `preference`, else the first available model,
    /// else [`FALLBACK_MODEL`].
    pub fn pick(descriptors: &[ModelDescriptor], preference: ModelCategory) -> String {
        descriptors
            .iter()
            .find(|m| m.available && m.category == preference)
            .or_else(|| descriptors.iter().find(|m| m.available))
            .map(|m| m.id.clone())
            .unwrap_or_else(|| FALLBACK_MODEL.to_string())
    }

    /// The catalog with availability from the service. Failures of the
    /// listing call propagate.
    pub async fn list_recommended_models(
        &self,
        api: &dyn ResponsesApi,
    ) -> Result<Vec<ModelDescriptor>, RespkitError> {
        let live_ids: HashSet<String> = api.list_models().await?.into_iter().collect();
        debug!(live = live_ids.len(), "Fetched live model ids");
        Ok(self.annotate(&live_ids))
    }

    pub async fn choose_default_model(
        &self,
        api: &dyn ResponsesApi,
        preference: ModelCategory,
    ) -> Result<String, RespkitError> {
        let descriptors = self.list_recommended_models(api).await?;
        let chosen = Self::pick(&descriptors, preference);
        debug!(%preference, model = %chosen, "Chose default model");
        Ok(chosen)
    }

    /// Honor the configured default-model override, otherwise fall back to
    /// [`choose_default_model`](Self::choose_default_model). The override
    /// path makes no network call.
    pub async fn resolve_default_model(
        &self,
        config: &RespkitConfig,
        api: &dyn ResponsesApi,
        preference: ModelCategory,
    ) -> Result<String, RespkitError> {
        if let Some(model) = config.default_model() {
            debug!(model, "Using configured default model");
            return Ok(model.to_string());
        }
        self.choose_default_model(api, preference).await
    }
}

//! Hand-curated shortlist of recommended models.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// What a catalog model is recommended for.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ModelCategory {
    Fast,
    Quality,
    Reasoning,
    Image,
}

/// One catalog row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CatalogEntry {
    pub id: String,
    pub label: String,
    pub category: ModelCategory,
    pub notes: String,
}

impl CatalogEntry {
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        category: ModelCategory,
        notes: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            category,
            notes: notes.into(),
        }
    }
}

/// A catalog entry annotated with live availability.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ModelDescriptor {
    pub id: String,
    pub label: String,
    pub category: ModelCategory,
    pub notes: String,
    pub available: bool,
}

impl ModelDescriptor {
    pub fn from_entry(entry: &CatalogEntry, available: bool) -> Self {
        Self {
            id: entry.id.clone(),
            label: entry.label.clone(),
            category: entry.category,
            notes: entry.notes.clone(),
            available,
        }
    }
}

/// `(id, label, category, notes)` of the built-in catalog.
///
/// Order matters: when no model of the preferred category is available, the
/// first available model in this order wins.
pub const RECOMMENDED_MODELS: &[(&str, &str, ModelCategory, &str)] = &[
    (
        "gpt-4.1-mini",
        "Fast + cheap general",
        ModelCategory::Fast,
        "Good default for most text tasks with Responses API.",
    ),
    (
        "gpt-4.1",
        "High quality general",
        ModelCategory::Quality,
        "Better reasoning/writing; higher cost.",
    ),
    (
        "o4-mini",
        "Reasoning",
        ModelCategory::Reasoning,
        "Use when you care about multi-step reasoning.",
    ),
    (
        "gpt-image-1",
        "Images",
        ModelCategory::Image,
        "Image generation via Responses.",
    ),
];

/// The built-in catalog as owned entries, in catalog order.
pub fn recommended_catalog() -> Vec<CatalogEntry> {
    RECOMMENDED_MODELS
        .iter()
        .map(|(id, label, category, notes)| CatalogEntry::new(*id, *label, *category, *notes))
        .collect()
}

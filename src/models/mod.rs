//! Recommended-model catalog and default selection.

pub mod catalog;
pub mod selector;

pub use catalog::{recommended_catalog, CatalogEntry, ModelCategory, ModelDescriptor, RECOMMENDED_MODELS};
pub use selector::{ModelSelector, FALLBACK_MODEL};

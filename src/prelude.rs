//! Convenience re-exports for common use.

pub use crate::config::RespkitConfig;
pub use crate::error::{RespkitError, Result};
pub use crate::generation::{get_response, ResponseResult, TextStream};
pub use crate::models::{ModelCategory, ModelDescriptor, ModelSelector};
pub use crate::provider::{OpenAiClient, ResponsesApi};
pub use crate::types::{ResponseInput, ResponseRequest, Role, Turn};

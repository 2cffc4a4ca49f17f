//! respkit: helpers for the OpenAI Responses API.
//!
//! Picks a sensible default model from a short, ordered catalog checked
//! against the models your key can actually use, and sends prompts either as
//! one blocking call or as a stream of text fragments.
//!
//! # Quick Start
//!
//! ```no_run
//! use respkit::prelude::*;
//!
//! # async fn example() -> respkit::error::Result<()> {
//! let config = RespkitConfig::from_env();
//! let client = OpenAiClient::new(&config)?;
//! let model = ModelSelector::default()
//!     .resolve_default_model(&config, &client, ModelCategory::Fast)
//!     .await?;
//! let text = get_response(&client, &ResponseRequest::new(model, "Hello!"))
//!     .await?
//!     .into_text()
//!     .await?;
//! println!("{text}");
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod generation;
pub mod models;
pub mod prelude;
pub mod provider;
pub mod types;

#[cfg(feature = "cli")]
pub mod cli;

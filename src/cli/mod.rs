//! Command-line interface for respkit.

use clap::{Parser, Subcommand};
use serde_json::Value;

use crate::error::RespkitError;
use crate::models::ModelCategory;
use crate::types::{ResponseInput, ResponseRequest, Turn};

/// Ask OpenAI models questions from the terminal
#[derive(Parser, Debug)]
#[command(name = "respkit", version, about = "Helpers for the OpenAI Responses API")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List recommended models and whether this key can use them
    Models(ModelsArgs),
    /// Send a prompt and print the response
    Ask(AskArgs),
}

#[derive(Parser, Debug)]
pub struct ModelsArgs {
    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

#[derive(Parser, Debug)]
pub struct AskArgs {
    /// Model id; defaults to OPENAI_DEFAULT_MODEL, then live selection
    #[arg(short, long)]
    pub model: Option<String>,

    /// Category to prefer when selecting a model (fast, quality, reasoning, image)
    #[arg(short, long, default_value = "fast")]
    pub preference: ModelCategory,

    /// System prompt
    #[arg(short, long)]
    pub system: Option<String>,

    /// Stream the response as it is generated
    #[arg(long)]
    pub stream: bool,

    /// Extra request parameter, repeatable (e.g. --param max_output_tokens=200)
    #[arg(long = "param", value_name = "KEY=VALUE")]
    pub params: Vec<String>,

    /// User prompt
    pub prompt: String,
}

impl AskArgs {
    /// Build the request for `model` from these arguments.
    pub fn to_request(&self, model: String) -> Result<ResponseRequest, RespkitError> {
        let input = match &self.system {
            Some(system) => ResponseInput::Turns(vec![
                Turn::system(system.clone()),
                Turn::user(self.prompt.clone()),
            ]),
            None => ResponseInput::Text(self.prompt.clone()),
        };

        let mut request = ResponseRequest::new(model, input).with_stream(self.stream);
        for param in &self.params {
            let (key, value) = parse_param(param)?;
            request = request.with_param(key, value);
        }
        Ok(request)
    }
}

/// Split `KEY=VALUE`; the value is read as JSON when it parses, else as a string.
pub fn parse_param(raw: &str) -> Result<(String, Value), RespkitError> {
    let (key, value) = raw.split_once('=').ok_or_else(|| {
        RespkitError::InvalidArgument(format!("Invalid parameter '{raw}': expected KEY=VALUE"))
    })?;
    let key = key.trim();
    if key.is_empty() {
        return Err(RespkitError::InvalidArgument(format!(
            "Invalid parameter '{raw}': empty key"
        )));
    }
    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((key.to_string(), value))
}

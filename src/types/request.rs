//! Request types for the Responses API.

use bon::Builder;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use strum::{Display, EnumString};

/// Speaker of a structured input turn.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    System,
    Developer,
    User,
    Assistant,
}

/// Content of a turn: plain text, or raw content parts passed through as-is
/// (e.g. `{"type": "input_image", "image_url": ...}`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum TurnContent {
    Text(String),
    Parts(Vec<Value>),
}

/// One entry of a structured input.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Turn {
    pub role: Role,
    pub content: TurnContent,
}

impl Turn {
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            content: TurnContent::Text(text.into()),
        }
    }

    pub fn system(text: impl Into<String>) -> Self {
        Self::new(Role::System, text)
    }

    pub fn developer(text: impl Into<String>) -> Self {
        Self::new(Role::Developer, text)
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Role::User, text)
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(Role::Assistant, text)
    }

    /// A turn made of raw content parts.
    pub fn with_parts(role: Role, parts: Vec<Value>) -> Self {
        Self {
            role,
            content: TurnContent::Parts(parts),
        }
    }
}

/// Prompt sent as the `input` field: a bare string or an ordered turn list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ResponseInput {
    Text(String),
    Turns(Vec<Turn>),
}

impl From<&str> for ResponseInput {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for ResponseInput {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<Vec<Turn>> for ResponseInput {
    fn from(turns: Vec<Turn>) -> Self {
        Self::Turns(turns)
    }
}

/// A single call to the Responses API.
///
/// Example:
/// ```
/// use respkit::types::ResponseRequest;
///
/// let request = ResponseRequest::builder()
///     .model("gpt-4.1-mini")
///     .input("Say hi")
///     .tools(vec![serde_json::json!({"type": "web_search_preview"})])
///     .build()
///     .with_param("max_output_tokens", 64);
/// assert_eq!(request.to_payload()["max_output_tokens"], 64);
/// ```
#[derive(Debug, Clone, Builder)]
pub struct ResponseRequest {
    #[builder(into)]
    pub model: String,
    #[builder(into)]
    pub input: ResponseInput,
    pub modalities: Option<Vec<String>>,
    pub tools: Option<Vec<Value>>,
    /// Selects the streaming path in [`get_response`](crate::generation::get_response).
    #[builder(default)]
    pub stream: bool,
    /// Passed through verbatim at the top level of the payload.
    #[builder(default)]
    pub extra: Map<String, Value>,
}

impl ResponseRequest {
    pub fn new(model: impl Into<String>, input: impl Into<ResponseInput>) -> Self {
        Self::builder().model(model).input(input).build()
    }

    pub fn with_stream(mut self, stream: bool) -> Self {
        self.stream = stream;
        self
    }

    /// Add a passthrough parameter (e.g. `max_output_tokens`, `metadata`).
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Build the JSON body. Unset optional fields are omitted, and extra
    /// parameters are applied last so they may override built keys.
    pub fn to_payload(&self) -> Value {
        let mut obj = Map::new();
        obj.insert("model".into(), Value::String(self.model.clone()));
        obj.insert("input".into(), json!(self.input));

        if let Some(ref modalities) = self.modalities {
            obj.insert("modalities".into(), json!(modalities));
        }
        if let Some(ref tools) = self.tools {
            obj.insert("tools".into(), Value::Array(tools.clone()));
        }
        for (key, value) in &self.extra {
            obj.insert(key.clone(), value.clone());
        }

        Value::Object(obj)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn minimal_payload_has_only_model_and_input() {
        let payload = ResponseRequest::new("gpt-4.1-mini", "hello").to_payload();
        assert_eq!(payload, json!({"model": "gpt-4.1-mini", "input": "hello"}));
    }

    #[test]
    fn supplied_optionals_appear_verbatim() {
        let tools = vec![json!({"type": "function", "name": "lookup", "parameters": {}})];
        let request = ResponseRequest::builder()
            .model("gpt-4.1")
            .input("draw")
            .modalities(vec!["text".to_string(), "image".to_string()])
            .tools(tools.clone())
            .build();
        let payload = request.to_payload();
        assert_eq!(payload["modalities"], json!(["text", "image"]));
        assert_eq!(payload["tools"], Value::Array(tools));
    }

    #[test]
    fn empty_lists_are_still_sent_when_supplied() {
        let request = ResponseRequest::builder()
            .model("gpt-4.1")
            .input("x")
            .tools(Vec::new())
            .build();
        assert_eq!(request.to_payload()["tools"], json!([]));
    }

    #[test]
    fn extra_params_merge_and_override() {
        let payload = ResponseRequest::new("gpt-4.1", "x")
            .with_param("max_output_tokens", 32)
            .with_param("metadata", json!({"run": "1"}))
            .with_param("model", "o4-mini")
            .to_payload();
        assert_eq!(payload["max_output_tokens"], 32);
        assert_eq!(payload["metadata"]["run"], "1");
        assert_eq!(payload["model"], "o4-mini");
    }

    #[test]
    fn turns_serialize_as_role_content_list() {
        let input: ResponseInput = vec![
            Turn::system("be brief"),
            Turn::with_parts(
                Role::User,
                vec![json!({"type": "input_text", "text": "hi"})],
            ),
        ]
        .into();
        let payload = ResponseRequest::new("gpt-4.1", input).to_payload();
        assert_eq!(
            payload["input"],
            json!([
                {"role": "system", "content": "be brief"},
                {"role": "user", "content": [{"type": "input_text", "text": "hi"}]}
            ])
        );
    }
}

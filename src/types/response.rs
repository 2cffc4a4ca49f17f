//! Typed, partial view of a Responses API payload.
//!
//! Every field is optional and read on its own: a field of the wrong type
//! reads as `None` without affecting its siblings, and list elements of the
//! wrong shape read as empty. Text extraction falls through to an empty
//! string only at the first missing level.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::debug;

/// A response object (`POST /responses`, or the `response` member of a
/// `response.completed` stream event).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ResponseObject {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient_list", skip_serializing_if = "Option::is_none")]
    pub output: Option<Vec<OutputItem>>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub usage: Option<ResponseUsage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct OutputItem {
    #[serde(
        default,
        rename = "type",
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, deserialize_with = "lenient_list", skip_serializing_if = "Option::is_none")]
    pub content: Option<Vec<OutputContent>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct OutputContent {
    #[serde(
        default,
        rename = "type",
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResponseUsage {
    #[serde(default, deserialize_with = "lenient")]
    pub input_tokens: Option<u64>,
    #[serde(default, deserialize_with = "lenient")]
    pub output_tokens: Option<u64>,
    #[serde(default, deserialize_with = "lenient")]
    pub total_tokens: Option<u64>,
}

/// `None` when the value does not fit `T`.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// `None` unless the value is an array; elements that do not fit `T` read as
/// `T::default()` so their position is kept.
fn lenient_list<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    match Value::deserialize(deserializer)? {
        Value::Array(items) => Ok(Some(
            items
                .into_iter()
                .map(|item| serde_json::from_value(item).unwrap_or_default())
                .collect(),
        )),
        _ => Ok(None),
    }
}

impl ResponseObject {
    /// Read a response from arbitrary JSON. Anything other than an object
    /// reads as the empty response.
    pub fn from_value(value: Value) -> Self {
        match serde_json::from_value(value) {
            Ok(response) => response,
            Err(e) => {
                debug!(error = %e, "Response is not an object, treating as empty");
                Self::default()
            }
        }
    }

    /// Text of the first content block of the first output item, or `""`.
    pub fn first_text(&self) -> String {
        self.output
            .as_deref()
            .and_then(<[OutputItem]>::first)
            .and_then(|item| item.content.as_deref())
            .and_then(<[OutputContent]>::first)
            .and_then(|content| content.text.clone())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn text_of(value: Value) -> String {
        ResponseObject::from_value(value).first_text()
    }

    #[test]
    fn well_formed_response_yields_text() {
        assert_eq!(text_of(json!({"output": [{"content": [{"text": "hi"}]}]})), "hi");
    }

    #[test]
    fn missing_output_yields_empty() {
        assert_eq!(text_of(json!({"id": "resp_1"})), "");
    }

    #[test]
    fn each_missing_level_yields_empty() {
        assert_eq!(text_of(json!({"output": []})), "");
        assert_eq!(text_of(json!({"output": [{}]})), "");
        assert_eq!(text_of(json!({"output": [{"content": []}]})), "");
        assert_eq!(text_of(json!({"output": [{"content": [{}]}]})), "");
        assert_eq!(text_of(json!({"output": [{"content": [{"text": null}]}]})), "");
    }

    #[test]
    fn wrongly_typed_shapes_yield_empty() {
        assert_eq!(text_of(json!({"output": "nope"})), "");
        assert_eq!(text_of(json!({"output": [{"content": {"text": "x"}}]})), "");
        assert_eq!(text_of(json!([1, 2, 3])), "");
        assert_eq!(text_of(Value::Null), "");
    }

    #[test]
    fn mistyped_sibling_fields_keep_the_text() {
        let text = json!([{"content": [{"text": "hi"}]}]);
        assert_eq!(text_of(json!({"status": 1, "output": text.clone()})), "hi");
        assert_eq!(
            text_of(json!({"usage": {"input_tokens": -1}, "output": text.clone()})),
            "hi"
        );
        assert_eq!(text_of(json!({"usage": "n/a", "id": 7, "output": text.clone()})), "hi");
        assert_eq!(
            text_of(json!({"output": [{"role": 3, "type": [], "content": [{"type": false, "text": "hi"}]}]})),
            "hi"
        );
    }

    #[test]
    fn malformed_later_items_keep_the_text() {
        assert_eq!(
            text_of(json!({"output": [{"content": [{"text": "hi"}]}, {"content": {"x": 1}}]})),
            "hi"
        );
        assert_eq!(
            text_of(json!({"output": [{"content": [{"text": "hi"}, "junk"]}, 42]})),
            "hi"
        );
    }

    #[test]
    fn malformed_first_item_yields_empty() {
        assert_eq!(text_of(json!({"output": ["junk", {"content": [{"text": "later"}]}]})), "");
        assert_eq!(text_of(json!({"output": [{"content": [{"text": 5}]}]})), "");
    }

    #[test]
    fn mistyped_usage_fields_are_read_individually() {
        let response = ResponseObject::from_value(json!({
            "usage": {"input_tokens": -1, "output_tokens": 2, "total_tokens": "x"}
        }));
        assert_eq!(
            response.usage,
            Some(ResponseUsage {
                input_tokens: None,
                output_tokens: Some(2),
                total_tokens: None,
            })
        );
    }

    #[test]
    fn image_only_output_yields_empty() {
        let value = json!({
            "output": [{"type": "image_generation_call", "result": "aGVsbG8="}]
        });
        assert_eq!(text_of(value), "");
    }

    #[test]
    fn only_first_item_is_considered() {
        let value = json!({
            "output": [
                {"type": "reasoning", "summary": []},
                {"type": "message", "content": [{"type": "output_text", "text": "later"}]}
            ]
        });
        assert_eq!(text_of(value), "");
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let value = json!({
            "id": "resp_1",
            "status": "completed",
            "output": [{
                "type": "message",
                "role": "assistant",
                "content": [{"type": "output_text", "text": "ok", "annotations": []}]
            }],
            "usage": {"input_tokens": 3, "output_tokens": 1, "total_tokens": 4,
                      "output_tokens_details": {"reasoning_tokens": 0}}
        });
        let response = ResponseObject::from_value(value);
        assert_eq!(response.first_text(), "ok");
        assert_eq!(response.usage.and_then(|u| u.total_tokens), Some(4));
    }
}

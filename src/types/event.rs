//! Streaming events of the Responses API.

use serde_json::Value;

use super::response::ResponseObject;

/// A decoded server-sent event.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamEvent {
    /// `response.output_text.delta`
    TextDelta { delta: String },
    /// `response.completed` / `response.incomplete` / `response.done`, carrying the final aggregated response.
    Completed { response: ResponseObject },
    /// `response.error`, `error` or `response.failed`; payload kept verbatim.
    Error { payload: Value },
    /// Anything else (`response.created`, `response.output_text.done`, ...).
    Other { kind: String },
}

impl StreamEvent {
    /// Classify one SSE `data:` object by its `type` field.
    pub fn from_value(event: Value) -> Self {
        let kind = event
            .get("type")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        match kind.as_str() {
            "response.output_text.delta" => match event.get("delta").and_then(Value::as_str) {
                Some(delta) => Self::TextDelta {
                    delta: delta.to_string(),
                },
                None => Self::Other { kind },
            },
            "response.completed" | "response.incomplete" | "response.done" => Self::Completed {
                response: event
                    .get("response")
                    .cloned()
                    .map(ResponseObject::from_value)
                    .unwrap_or_default(),
            },
            "response.error" | "error" => {
                let payload = event
                    .get("error")
                    .filter(|error| !error.is_null())
                    .cloned()
                    .unwrap_or(event);
                Self::Error { payload }
            }
            "response.failed" => {
                let payload = event
                    .pointer("/response/error")
                    .filter(|error| !error.is_null())
                    .cloned()
                    .unwrap_or(event);
                Self::Error { payload }
            }
            _ => Self::Other { kind },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_text_delta() {
        let event = StreamEvent::from_value(json!({
            "type": "response.output_text.delta",
            "item_id": "msg_1",
            "output_index": 0,
            "delta": "Hel"
        }));
        assert_eq!(event, StreamEvent::TextDelta { delta: "Hel".into() });
    }

    #[test]
    fn response_error_keeps_error_member() {
        let event = StreamEvent::from_value(json!({
            "type": "response.error",
            "error": {"code": "rate_limit", "message": "slow down"}
        }));
        assert_eq!(
            event,
            StreamEvent::Error {
                payload: json!({"code": "rate_limit", "message": "slow down"})
            }
        );
    }

    #[test]
    fn bare_error_event_keeps_whole_event() {
        let raw = json!({"type": "error", "code": "server_error", "message": "oops"});
        assert_eq!(
            StreamEvent::from_value(raw.clone()),
            StreamEvent::Error { payload: raw }
        );
    }

    #[test]
    fn failed_response_uses_nested_error() {
        let event = StreamEvent::from_value(json!({
            "type": "response.failed",
            "response": {"id": "resp_1", "status": "failed", "error": {"message": "bad"}}
        }));
        assert_eq!(event, StreamEvent::Error { payload: json!({"message": "bad"}) });
    }

    #[test]
    fn completed_carries_final_response() {
        let event = StreamEvent::from_value(json!({
            "type": "response.completed",
            "response": {"output": [{"content": [{"text": "abc"}]}]}
        }));
        match event {
            StreamEvent::Completed { response } => assert_eq!(response.first_text(), "abc"),
            other => panic!("expected completed, got {other:?}"),
        }
    }

    #[test]
    fn unrelated_events_are_other() {
        let event = StreamEvent::from_value(json!({"type": "response.created"}));
        assert_eq!(event, StreamEvent::Other { kind: "response.created".into() });
        let event = StreamEvent::from_value(json!({"no_type": true}));
        assert_eq!(event, StreamEvent::Other { kind: String::new() });
    }
}

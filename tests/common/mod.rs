//! Shared test helpers and mock Responses API.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use futures::stream;
use serde_json::{json, Value};

use respkit::error::RespkitError;
use respkit::provider::{EventStream, ResponsesApi};
use respkit::types::{ResponseObject, StreamEvent};

/// A mock API that returns canned responses and records what it was sent.
#[derive(Default)]
pub struct MockApi {
    responses: Mutex<VecDeque<Result<Value, RespkitError>>>,
    streams: Mutex<VecDeque<Vec<Result<StreamEvent, RespkitError>>>>,
    models: Mutex<Vec<String>>,
    models_error: Mutex<Option<RespkitError>>,
    payloads: Mutex<Vec<Value>>,
    list_calls: AtomicUsize,
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a raw response body for the next blocking call.
    pub fn queue_response(&self, body: Value) {
        self.responses.lock().unwrap().push_back(Ok(body));
    }

    /// Queue a response whose first content block carries `text`.
    pub fn queue_text(&self, text: &str) {
        self.queue_response(response_with_text(text));
    }

    pub fn queue_error(&self, err: RespkitError) {
        self.responses.lock().unwrap().push_back(Err(err));
    }

    /// Queue the events of the next streaming call.
    pub fn queue_stream(&self, events: Vec<Result<StreamEvent, RespkitError>>) {
        self.streams.lock().unwrap().push_back(events);
    }

    pub fn set_models(&self, ids: &[&str]) {
        *self.models.lock().unwrap() = ids.iter().map(|s| s.to_string()).collect();
    }

    /// Fail the next listing call with `err`.
    pub fn fail_models(&self, err: RespkitError) {
        *self.models_error.lock().unwrap() = Some(err);
    }

    /// Every payload received, in order.
    pub fn payloads(&self) -> Vec<Value> {
        self.payloads.lock().unwrap().clone()
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ResponsesApi for MockApi {
    async fn create_response(&self, payload: &Value) -> Result<ResponseObject, RespkitError> {
        self.payloads.lock().unwrap().push(payload.clone());
        match self.responses.lock().unwrap().pop_front() {
            Some(result) => result.map(ResponseObject::from_value),
            None => Ok(ResponseObject::from_value(response_with_text("Mock response"))),
        }
    }

    async fn stream_response(&self, payload: &Value) -> Result<EventStream, RespkitError> {
        self.payloads.lock().unwrap().push(payload.clone());
        let events = self.streams.lock().unwrap().pop_front().unwrap_or_default();
        Ok(Box::pin(stream::iter(events)))
    }

    async fn list_models(&self) -> Result<Vec<String>, RespkitError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.models_error.lock().unwrap().take() {
            return Err(err);
        }
        Ok(self.models.lock().unwrap().clone())
    }
}

pub fn response_with_text(text: &str) -> Value {
    json!({
        "id": "resp_mock",
        "status": "completed",
        "output": [{
            "type": "message",
            "role": "assistant",
            "content": [{"type": "output_text", "text": text}]
        }]
    })
}

pub fn delta(text: &str) -> Result<StreamEvent, RespkitError> {
    Ok(StreamEvent::TextDelta {
        delta: text.to_string(),
    })
}

pub fn completed(text: &str) -> Result<StreamEvent, RespkitError> {
    Ok(StreamEvent::Completed {
        response: ResponseObject::from_value(response_with_text(text)),
    })
}

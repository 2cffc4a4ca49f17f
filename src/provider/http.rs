//! HTTP headers, SSE framing, and status-to-error mapping.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use serde_json::Value;

use crate::error::RespkitError;

/// Build default headers for a Bearer-token API.
pub fn bearer_headers(api_key: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    if let Ok(val) = HeaderValue::from_str(&format!("Bearer {api_key}")) {
        headers.insert(AUTHORIZATION, val);
    }
    headers
}

/// Headers for a streaming call.
pub fn event_stream_headers(api_key: &str) -> HeaderMap {
    let mut headers = bearer_headers(api_key);
    headers.insert(ACCEPT, HeaderValue::from_static("text/event-stream"));
    headers
}

/// Incremental server-sent-events decoder.
///
/// Feed raw chunks with [`SseDecoder::push`]; each complete event comes back
/// as its joined `data:` payload. Bytes are buffered until a full line is
/// available, so multi-byte characters may straddle chunks. Comment lines
/// (`:`) and fields other than `data` are ignored. `[DONE]` ends the stream.
#[derive(Debug, Default)]
pub struct SseDecoder {
    buffer: Vec<u8>,
    pending_data: Vec<String>,
    done: bool,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a `[DONE]` sentinel has been seen.
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Append a chunk and return the payloads of the events it completed.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        self.buffer.extend_from_slice(chunk);
        let mut events = Vec::new();

        while let Some(line_end) = self.buffer.iter().position(|b| *b == b'\n') {
            if self.done {
                break;
            }
            let raw: Vec<u8> = self.buffer.drain(..=line_end).collect();
            let line = String::from_utf8_lossy(&raw);
            let line = line.trim_end_matches(['\n', '\r']);

            if line.is_empty() {
                if let Some(data) = self.dispatch() {
                    events.push(data);
                }
            } else if line.starts_with(':') {
                continue;
            } else {
                self.accept_line(line);
            }
        }

        events
    }

    /// Flush an event left unterminated when the byte stream ends.
    pub fn finish(&mut self) -> Option<String> {
        if self.done {
            return None;
        }
        let raw = std::mem::take(&mut self.buffer);
        let line = String::from_utf8_lossy(&raw);
        self.accept_line(line.trim_end_matches('\r'));
        self.dispatch()
    }

    fn accept_line(&mut self, line: &str) {
        if let Some(rest) = line.strip_prefix("data:") {
            let rest = rest.strip_prefix(' ').unwrap_or(rest);
            self.pending_data.push(rest.to_string());
        }
    }

    fn dispatch(&mut self) -> Option<String> {
        if self.pending_data.is_empty() {
            return None;
        }
        let data = self.pending_data.join("\n");
        self.pending_data.clear();
        if data == "[DONE]" {
            self.done = true;
            return None;
        }
        Some(data)
    }
}

/// Map a non-success HTTP status and body to an error, keeping the body.
pub fn status_to_error(status: u16, body: &str) -> RespkitError {
    response_error(status, &HeaderMap::new(), body)
}

/// Like [`status_to_error`], but a rate-limit delay in the `retry-after-ms`
/// or `retry-after` headers wins over one in the body.
pub fn response_error(status: u16, headers: &HeaderMap, body: &str) -> RespkitError {
    let payload = serde_json::from_str::<Value>(body)
        .unwrap_or_else(|_| Value::String(body.to_string()));
    let message = payload
        .pointer("/error/message")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| body.to_string());

    match status {
        401 | 403 => RespkitError::Authentication(message),
        429 => RespkitError::RateLimited {
            retry_after_ms: retry_after_from_headers(headers)
                .or_else(|| extract_retry_after(&payload)),
        },
        _ => RespkitError::api(status, message, payload),
    }
}

/// `retry-after-ms` (milliseconds), else `retry-after` in seconds. The
/// HTTP-date form of `retry-after` is not read.
fn retry_after_from_headers(headers: &HeaderMap) -> Option<u64> {
    let header_f64 = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<f64>().ok())
            .filter(|v| v.is_finite() && *v >= 0.0)
    };
    header_f64("retry-after-ms")
        .map(|ms| ms as u64)
        .or_else(|| header_f64("retry-after").map(|s| (s * 1000.0) as u64))
}

fn extract_retry_after(payload: &Value) -> Option<u64> {
    payload
        .pointer("/error/retry_after")
        .and_then(Value::as_f64)
        .map(|s| (s * 1000.0) as u64)
}

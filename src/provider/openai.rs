//! OpenAI Responses API client over HTTP.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use futures::StreamExt;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::config::RespkitConfig;
use crate::error::RespkitError;
use crate::types::{ResponseObject, StreamEvent};

use super::http::{bearer_headers, event_stream_headers, response_error, SseDecoder};
use super::{EventStream, ResponsesApi};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// Client handle for the OpenAI API.
///
/// Cheap to clone; clones share one connection pool. Construction fails when
/// no API key is configured, before any request is made.
#[derive(Clone)]
pub struct OpenAiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    timeout: Duration,
}

impl fmt::Debug for OpenAiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAiClient")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl OpenAiClient {
    pub fn new(config: &RespkitConfig) -> Result<Self, RespkitError> {
        let api_key = config.require_api_key()?.to_string();
        let http = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .pool_max_idle_per_host(10)
            .build()?;
        Ok(Self {
            http,
            api_key,
            base_url: config.base_url().to_string(),
            timeout: config.timeout(),
        })
    }

    /// Build from `OPENAI_API_KEY` / `OPENAI_BASE_URL` (and `.env`).
    pub fn from_env() -> Result<Self, RespkitError> {
        Self::new(&RespkitConfig::from_env())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }
}

async fn check_status(resp: reqwest::Response) -> Result<reqwest::Response, RespkitError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let headers = resp.headers().clone();
    let body_text = resp.text().await.unwrap_or_default();
    Err(response_error(status.as_u16(), &headers, &body_text))
}

fn model_of(payload: &Value) -> &str {
    payload
        .get("model")
        .and_then(Value::as_str)
        .unwrap_or_default()
}

fn decode_event(data: &str) -> Option<StreamEvent> {
    match serde_json::from_str::<Value>(data) {
        Ok(value) => Some(StreamEvent::from_value(value)),
        Err(e) => {
            debug!(error = %e, data = %data, "OpenAI Responses SSE parse failed");
            None
        }
    }
}

#[derive(Deserialize)]
struct ModelsPage {
    #[serde(default)]
    data: Vec<ModelsEntry>,
}

#[derive(Deserialize)]
struct ModelsEntry {
    #[serde(default)]
    id: Option<String>,
}

#[async_trait]
impl ResponsesApi for OpenAiClient {
    async fn create_response(&self, payload: &Value) -> Result<ResponseObject, RespkitError> {
        debug!(model = model_of(payload), "OpenAI Responses create");

        let resp = self
            .http
            .post(self.url("responses"))
            .headers(bearer_headers(&self.api_key))
            .timeout(self.timeout)
            .json(payload)
            .send()
            .await?;
        let resp = check_status(resp).await?;

        let body_text = resp.text().await?;
        let body: Value = serde_json::from_str(&body_text)?;
        Ok(ResponseObject::from_value(body))
    }

    async fn stream_response(&self, payload: &Value) -> Result<EventStream, RespkitError> {
        debug!(model = model_of(payload), "OpenAI Responses stream");

        let mut body = payload.clone();
        if let Some(obj) = body.as_object_mut() {
            obj.insert("stream".into(), Value::Bool(true));
        }

        let resp = self
            .http
            .post(self.url("responses"))
            .headers(event_stream_headers(&self.api_key))
            .json(&body)
            .send()
            .await?;
        let resp = check_status(resp).await?;

        let byte_stream = resp.bytes_stream();

        let stream = async_stream::stream! {
            let mut decoder = SseDecoder::new();
            let mut failed = false;
            futures::pin_mut!(byte_stream);

            while let Some(chunk_result) = byte_stream.next().await {
                let chunk = match chunk_result {
                    Ok(c) => c,
                    Err(e) => {
                        yield Err(RespkitError::Network(e));
                        failed = true;
                        break;
                    }
                };

                for data in decoder.push(&chunk) {
                    if let Some(event) = decode_event(&data) {
                        yield Ok(event);
                    }
                }

                if decoder.is_done() {
                    break;
                }
            }

            if !failed {
                if let Some(event) = decoder.finish().as_deref().and_then(decode_event) {
                    yield Ok(event);
                }
            }
        };

        Ok(Box::pin(stream))
    }

    async fn list_models(&self) -> Result<Vec<String>, RespkitError> {
        debug!(base_url = %self.base_url, "OpenAI list models");

        let resp = self
            .http
            .get(self.url("models"))
            .headers(bearer_headers(&self.api_key))
            .timeout(self.timeout)
            .send()
            .await?;
        let resp = check_status(resp).await?;

        let body_text = resp.text().await?;
        let page: ModelsPage = serde_json::from_str(&body_text)?;
        Ok(page.data.into_iter().filter_map(|m| m.id).collect())
    }
}

//! Client handle trait and the OpenAI implementation.

pub mod http;
pub mod openai;

pub use openai::OpenAiClient;

use async_trait::async_trait;
use futures::stream::BoxStream;

use crate::error::RespkitError;
use crate::types::{ResponseObject, StreamEvent};

/// Decoded events of one streaming call. Dropping it releases the connection.
pub type EventStream = BoxStream<'static, Result<StreamEvent, RespkitError>>;

/// Everything the selector and the response helpers need from the service.
///
/// [`OpenAiClient`] talks HTTP; tests substitute their own implementation.
#[async_trait]
pub trait ResponsesApi: Send + Sync {
    /// Issue a blocking (non-streaming) Responses call.
    async fn create_response(
        &self,
        payload: &serde_json::Value,
    ) -> Result<ResponseObject, RespkitError>;

    /// Open a streaming Responses call.
    async fn stream_response(
        &self,
        payload: &serde_json::Value,
    ) -> Result<EventStream, RespkitError>;

    /// Model ids visible to the caller's credentials.
    async fn list_models(&self) -> Result<Vec<String>, RespkitError>;
}

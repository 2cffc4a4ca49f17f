//! Text and streaming responses.

pub mod stream;
pub mod text;

pub use stream::{stream_text, StreamState, TextStream};
pub use text::generate_text;

use crate::error::RespkitError;
use crate::provider::ResponsesApi;
use crate::types::ResponseRequest;

/// What [`get_response`] hands back, depending on `request.stream`.
#[derive(Debug)]
pub enum ResponseResult {
    Text(String),
    Stream(TextStream),
}

impl ResponseResult {
    /// Full text, draining the stream when there is one.
    pub async fn into_text(self) -> Result<String, RespkitError> {
        match self {
            Self::Text(text) => Ok(text),
            Self::Stream(stream) => stream.collect_text().await,
        }
    }

    pub fn into_stream(self) -> Option<TextStream> {
        match self {
            Self::Stream(stream) => Some(stream),
            Self::Text(_) => None,
        }
    }
}

/// Send a request through `api`, taking the streaming path when
/// `request.stream` is set.
///
/// ```no_run
/// use futures::StreamExt;
/// use respkit::generation::{get_response, ResponseResult};
/// use respkit::provider::OpenAiClient;
/// use respkit::types::ResponseRequest;
///
/// # async fn example() -> respkit::error::Result<()> {
/// let client = OpenAiClient::from_env()?;
/// let request = ResponseRequest::new("gpt-4.1-mini", "Write a haiku").with_stream(true);
/// if let ResponseResult::Stream(mut fragments) = get_response(&client, &request).await? {
///     while let Some(fragment) = fragments.next().await {
///         print!("{}", fragment?);
///     }
/// }
/// # Ok(())
/// # }
/// ```
pub async fn get_response(
    api: &dyn ResponsesApi,
    request: &ResponseRequest,
) -> Result<ResponseResult, RespkitError> {
    if request.stream {
        stream_text(api, request).await.map(ResponseResult::Stream)
    } else {
        generate_text(api, request).await.map(ResponseResult::Text)
    }
}

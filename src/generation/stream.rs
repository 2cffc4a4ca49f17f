//! Streaming text generation.

use std::fmt;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::stream::{FusedStream, Stream, StreamExt};
use tracing::{debug, warn};

use crate::error::RespkitError;
use crate::provider::{EventStream, ResponsesApi};
use crate::types::{ResponseObject, ResponseRequest, StreamEvent};

/// Lifecycle of a [`TextStream`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamState {
    /// Events are still being read.
    Emitting,
    /// The service reported an error, or the transport failed. Terminal.
    Failed,
    /// The event stream ended; any tail has been emitted. Terminal.
    Done,
}

/// Text fragments of one streaming Responses call.
///
/// Yields each `response.output_text.delta` as it arrives. An error event
/// ends the stream with a single `Err` carrying the service payload. When the
/// events run out, text present in the final response but never sent as a
/// delta is yielded once. After that the stream only returns `None`; a retry
/// needs a fresh call.
///
/// The underlying connection is released as soon as the stream terminates,
/// and dropping the stream early releases it as well.
pub struct TextStream {
    events: Option<EventStream>,
    state: StreamState,
    emitted: String,
    final_response: Option<ResponseObject>,
}

impl fmt::Debug for TextStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextStream")
            .field("state", &self.state)
            .field("emitted_len", &self.emitted.len())
            .field("final_response", &self.final_response.is_some())
            .finish()
    }
}

impl TextStream {
    pub fn new(events: EventStream) -> Self {
        Self {
            events: Some(events),
            state: StreamState::Emitting,
            emitted: String::new(),
            final_response: None,
        }
    }

    pub fn state(&self) -> StreamState {
        self.state
    }

    /// Everything yielded so far, concatenated.
    pub fn emitted_text(&self) -> &str {
        &self.emitted
    }

    /// The aggregated response from `response.completed`, once seen.
    pub fn final_response(&self) -> Option<&ResponseObject> {
        self.final_response.as_ref()
    }

    /// Drain the stream into one string, stopping at the first error.
    pub async fn collect_text(mut self) -> Result<String, RespkitError> {
        while let Some(fragment) = self.next().await {
            fragment?;
        }
        Ok(self.emitted)
    }

    fn release(&mut self, state: StreamState) {
        self.events = None;
        self.state = state;
    }

    /// Final text minus what the deltas already delivered.
    fn tail(&self) -> Option<String> {
        let full = self.final_response.as_ref()?.first_text();
        match full.strip_prefix(self.emitted.as_str()) {
            Some("") => None,
            Some(tail) => Some(tail.to_string()),
            None => {
                debug!(
                    emitted_len = self.emitted.len(),
                    final_len = full.len(),
                    "Final response text does not extend streamed text, no tail emitted"
                );
                None
            }
        }
    }
}

impl Stream for TextStream {
    type Item = Result<String, RespkitError>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        loop {
            let Some(events) = this.events.as_mut() else {
                return Poll::Ready(None);
            };

            match events.poll_next_unpin(cx) {
                Poll::Pending => return Poll::Pending,
                Poll::Ready(Some(Ok(StreamEvent::TextDelta { delta }))) => {
                    this.emitted.push_str(&delta);
                    return Poll::Ready(Some(Ok(delta)));
                }
                Poll::Ready(Some(Ok(StreamEvent::Completed { response }))) => {
                    this.final_response = Some(response);
                }
                Poll::Ready(Some(Ok(StreamEvent::Other { .. }))) => {}
                Poll::Ready(Some(Ok(StreamEvent::Error { payload }))) => {
                    warn!(payload = %payload, "Service reported an error mid-stream");
                    this.release(StreamState::Failed);
                    return Poll::Ready(Some(Err(RespkitError::stream(payload))));
                }
                Poll::Ready(Some(Err(e))) => {
                    this.release(StreamState::Failed);
                    return Poll::Ready(Some(Err(e)));
                }
                Poll::Ready(None) => {
                    this.release(StreamState::Done);
                    if let Some(tail) = this.tail() {
                        this.emitted.push_str(&tail);
                        return Poll::Ready(Some(Ok(tail)));
                    }
                    return Poll::Ready(None);
                }
            }
        }
    }
}

impl FusedStream for TextStream {
    fn is_terminated(&self) -> bool {
        self.events.is_none()
    }
}

/// Open a streaming call and wrap its events in a [`TextStream`].
pub async fn stream_text(
    api: &dyn ResponsesApi,
    request: &ResponseRequest,
) -> Result<TextStream, RespkitError> {
    let payload = request.to_payload();
    let events = api.stream_response(&payload).await?;
    Ok(TextStream::new(events))
}

//! Non-streaming text generation.

use tracing::debug;

use crate::error::RespkitError;
use crate::provider::ResponsesApi;
use crate::types::ResponseRequest;

/// Issue one blocking call and return the text of the first content block.
///
/// A response without that block (image-only output, unexpected shape)
/// yields an empty string rather than an error.
pub async fn generate_text(
    api: &dyn ResponsesApi,
    request: &ResponseRequest,
) -> Result<String, RespkitError> {
    let payload = request.to_payload();
    let response = api.create_response(&payload).await?;
    let text = response.first_text();

    if text.is_empty() {
        debug!(
            model = %request.model,
            status = ?response.status,
            "Response carried no leading text block"
        );
    }

    Ok(text)
}

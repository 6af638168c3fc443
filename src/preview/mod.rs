use base64::Engine as _;
use thiserror::Error;

use crate::acquire::AcquiredImage;

#[derive(Debug, Error)]
pub enum PreviewError {
    #[error("preview encode task failed: {reason}")]
    EncodeTask { reason: String },
}

pub type PreviewResult<T> = std::result::Result<T, PreviewError>;

/// Display-only `data:` URI derived from an acquired image.
///
/// Never consulted by the submission path; the raw payload travels to the
/// backend untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewRepresentation {
    data_uri: String,
}

impl PreviewRepresentation {
    pub fn as_str(&self) -> &str {
        &self.data_uri
    }
}

/// Encode the acquired payload into a directly displayable representation.
///
/// Suspends while the encode runs off the cooperative thread and resolves
/// exactly once. Submission never waits on this.
pub async fn render_preview(image: &AcquiredImage) -> PreviewResult<PreviewRepresentation> {
    let mime = image.mime.clone();
    let bytes = image.bytes.clone();
    let encoded = tokio::task::spawn_blocking(move || {
        base64::engine::general_purpose::STANDARD.encode(bytes)
    })
    .await
    .map_err(|err| PreviewError::EncodeTask {
        reason: err.to_string(),
    })?;

    Ok(PreviewRepresentation {
        data_uri: format!("data:{mime};base64,{encoded}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn render_preview_produces_a_data_uri_with_the_declared_mime() {
        let image = AcquiredImage::new("shot.png", "image/png", vec![1, 2, 3]);
        let preview = render_preview(&image).await.expect("encode should work");
        assert_eq!(preview.as_str(), "data:image/png;base64,AQID");
    }

    #[tokio::test]
    async fn render_preview_handles_an_empty_payload() {
        let image = AcquiredImage::new("empty.png", "image/png", Vec::new());
        let preview = render_preview(&image).await.expect("encode should work");
        assert_eq!(preview.as_str(), "data:image/png;base64,");
    }
}

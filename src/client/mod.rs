use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

use crate::acquire::AcquiredImage;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:5000";
pub const TRANSPORT_FALLBACK_MESSAGE: &str =
    "Failed to process image. Make sure the backend server is running.";

const OCR_PATH: &str = "/api/ocr";
const HEALTH_PATH: &str = "/api/health";
const IMAGE_FIELD: &str = "image";

#[derive(Debug, Error)]
pub enum ExtractError {
    /// The backend answered with a structured error payload.
    #[error("{message}")]
    Server { message: String },
    /// The request could not be completed, or the response was malformed.
    #[error("transport failure: {reason}")]
    Transport { reason: String },
}

impl ExtractError {
    /// Message shown to the user: server messages verbatim, transport
    /// failures as a fixed hint at backend availability.
    pub fn user_message(&self) -> String {
        match self {
            Self::Server { message } => message.clone(),
            Self::Transport { .. } => TRANSPORT_FALLBACK_MESSAGE.to_string(),
        }
    }
}

pub type ExtractResult<T> = std::result::Result<T, ExtractError>;

/// Parsed success body of `POST /api/ocr`.
///
/// Every field is optional; the report layer degrades gracefully when
/// either text pass is missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ExtractionResult {
    #[serde(default)]
    pub raw_text: Option<String>,
    #[serde(default)]
    pub refined_text: Option<String>,
    /// Server-side data-URI echo of the uploaded image. The client renders
    /// its own preview, so this is tolerated rather than required.
    #[serde(default)]
    pub image_preview: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
}

/// Body of `GET /api/health`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HealthStatus {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub message: String,
}

/// Seam between the submission controller and the extraction backend.
#[async_trait]
pub trait TextExtractor {
    async fn extract(&self, image: &AcquiredImage) -> ExtractResult<ExtractionResult>;
}

#[derive(Debug, Clone)]
pub struct ExtractionClient {
    http: reqwest::Client,
    base_url: String,
}

impl ExtractionClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: trim_trailing_slashes(base_url.into()),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn ocr_url(&self) -> String {
        format!("{}{OCR_PATH}", self.base_url)
    }

    fn health_url(&self) -> String {
        format!("{}{HEALTH_PATH}", self.base_url)
    }

    /// Availability probe against `GET /api/health`. Never consulted by the
    /// submission path.
    pub async fn health(&self) -> ExtractResult<HealthStatus> {
        let response = self
            .http
            .get(self.health_url())
            .send()
            .await
            .map_err(transport)?;
        let status = response.status();
        let body = response.bytes().await.map_err(transport)?;
        if !status.is_success() {
            return Err(ExtractError::Transport {
                reason: format!("health check returned {status}"),
            });
        }
        serde_json::from_slice(&body).map_err(|err| ExtractError::Transport {
            reason: format!("malformed health body: {err}"),
        })
    }
}

#[async_trait]
impl TextExtractor for ExtractionClient {
    /// Single multipart request carrying the payload under the `image` part.
    async fn extract(&self, image: &AcquiredImage) -> ExtractResult<ExtractionResult> {
        let part = reqwest::multipart::Part::bytes(image.bytes.clone())
            .file_name(image.file_name.clone())
            .mime_str(&image.mime)
            .map_err(|err| ExtractError::Transport {
                reason: format!("invalid mime type {}: {err}", image.mime),
            })?;
        let form = reqwest::multipart::Form::new().part(IMAGE_FIELD, part);

        tracing::info!(url = %self.ocr_url(), file = %image.file_name, "submitting image for extraction");
        let response = self
            .http
            .post(self.ocr_url())
            .multipart(form)
            .send()
            .await
            .map_err(transport)?;
        let status = response.status();
        let body = response.bytes().await.map_err(transport)?;
        decode_response(status, &body)
    }
}

fn transport(err: reqwest::Error) -> ExtractError {
    ExtractError::Transport {
        reason: err.to_string(),
    }
}

fn trim_trailing_slashes(mut url: String) -> String {
    while url.ends_with('/') {
        url.pop();
    }
    url
}

/// Classify a finished exchange: a well-formed success body parses into a
/// result; a failure body carrying an `error` string is a server error
/// surfaced verbatim; everything else is a transport failure.
pub fn decode_response(status: StatusCode, body: &[u8]) -> ExtractResult<ExtractionResult> {
    if status.is_success() {
        return serde_json::from_slice(body).map_err(|err| ExtractError::Transport {
            reason: format!("malformed success body: {err}"),
        });
    }

    match serde_json::from_slice::<ErrorBody>(body) {
        Ok(ErrorBody {
            error: Some(message),
        }) => Err(ExtractError::Server { message }),
        _ => Err(ExtractError::Transport {
            reason: format!("backend returned {status} without a structured error"),
        }),
    }
}

//! Multimodal model providers.
//!
//! The generation handlers only see [`VisionProvider`]; which backend sits
//! behind it (Gemini or the offline mock) is decided at startup.

pub mod gemini;
pub mod mock;

use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use service_core::error::AppError;
use thiserror::Error;

/// Fallback when neither a data URL nor the magic bytes name the format.
const DEFAULT_IMAGE_MIME: &str = "image/jpeg";

/// Error type for provider operations.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Content filtered")]
    ContentFiltered,

    #[error("Empty response from model")]
    EmptyResponse,
}

impl From<ProviderError> for AppError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::NotConfigured(_) => {
                AppError::ServiceUnavailable("API key not configured".to_string())
            }
            other => AppError::UpstreamError(other.to_string()),
        }
    }
}

/// One uploaded image, ready to be sent inline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageInput {
    pub mime_type: String,
    /// Base64 payload without any `data:` prefix.
    pub data: String,
}

impl ImageInput {
    /// Accepts bare base64 or a `data:<mime>;base64,<payload>` URL.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();

        if let Some((mime, payload)) = split_data_url(raw) {
            return Self {
                mime_type: mime.to_string(),
                data: payload.to_string(),
            };
        }

        Self {
            mime_type: sniff_mime(raw).to_string(),
            data: raw.to_string(),
        }
    }
}

fn split_data_url(raw: &str) -> Option<(&str, &str)> {
    let rest = raw.strip_prefix("data:")?;
    let (meta, payload) = rest.split_once(',')?;
    let mime = meta.strip_suffix(";base64")?;
    if mime.is_empty() {
        Some((DEFAULT_IMAGE_MIME, payload))
    } else {
        Some((mime, payload))
    }
}

/// Identify the format from the first decoded bytes.
fn sniff_mime(data: &str) -> &'static str {
    // 16 base64 chars decode to the 12 bytes WEBP needs.
    let prefix: String = data
        .chars()
        .filter(|c| !c.is_whitespace())
        .take(16)
        .collect();
    if !prefix.is_ascii() {
        return DEFAULT_IMAGE_MIME;
    }
    let usable = prefix.len() - prefix.len() % 4;

    let bytes = match general_purpose::STANDARD.decode(&prefix[..usable]) {
        Ok(bytes) => bytes,
        Err(_) => return DEFAULT_IMAGE_MIME,
    };

    if bytes.starts_with(&[0x89, b'P', b'N', b'G']) {
        "image/png"
    } else if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        "image/jpeg"
    } else if bytes.starts_with(b"GIF8") {
        "image/gif"
    } else if bytes.len() >= 12 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
        "image/webp"
    } else {
        DEFAULT_IMAGE_MIME
    }
}

/// A model that reads images and answers a text prompt.
#[async_trait]
pub trait VisionProvider: Send + Sync {
    /// Short backend name for logs.
    fn name(&self) -> &'static str;

    /// One blocking round trip; the model's text is returned verbatim.
    async fn generate(&self, prompt: &str, images: &[ImageInput]) -> Result<String, ProviderError>;
}

//! Gemini provider implementation.
//!
//! Sends the images inline alongside the prompt to the `generateContent`
//! endpoint and returns the first candidate's text.

use super::{ImageInput, ProviderError, VisionProvider};
use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;

const API_KEY_HEADER: &str = "x-goog-api-key";

/// System instruction attached to every request.
pub const SYSTEM_INSTRUCTION: &str =
    "You are an expert educational assistant that helps students study better.";

/// Gemini provider configuration.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: Option<Secret<String>>,
    pub model: String,
    pub api_base: String,
    pub timeout: Duration,
}

/// Gemini vision provider.
pub struct GeminiVisionProvider {
    config: GeminiConfig,
    client: Client,
}

impl GeminiVisionProvider {
    pub fn new(config: GeminiConfig) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ProviderError::NetworkError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    fn api_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.api_base.trim_end_matches('/'),
            self.config.model
        )
    }

    fn build_request(prompt: &str, images: &[ImageInput]) -> GenerateContentRequest {
        let mut parts: Vec<Part> = images
            .iter()
            .map(|image| Part::InlineData {
                inline_data: InlineData {
                    mime_type: image.mime_type.clone(),
                    data: image.data.clone(),
                },
            })
            .collect();
        parts.push(Part::Text {
            text: prompt.to_string(),
        });

        GenerateContentRequest {
            system_instruction: SystemInstruction {
                parts: vec![Part::Text {
                    text: SYSTEM_INSTRUCTION.to_string(),
                }],
            },
            contents: vec![Content {
                role: "user".to_string(),
                parts,
            }],
        }
    }
}

/// Concatenated answer text of the first candidate, skipping thought parts.
fn extract_text(response: GenerateContentResponse) -> Result<String, ProviderError> {
    let candidate = match response.candidates.into_iter().next() {
        Some(candidate) => candidate,
        None => {
            let blocked = response
                .prompt_feedback
                .and_then(|f| f.block_reason)
                .is_some();
            return Err(if blocked {
                ProviderError::ContentFiltered
            } else {
                ProviderError::EmptyResponse
            });
        }
    };

    if matches!(
        candidate.finish_reason.as_deref(),
        Some("SAFETY") | Some("PROHIBITED_CONTENT") | Some("BLOCKLIST")
    ) {
        return Err(ProviderError::ContentFiltered);
    }

    let text: String = candidate
        .content
        .map(|c| c.parts)
        .unwrap_or_default()
        .into_iter()
        .filter(|p| !p.thought)
        .filter_map(|p| p.text)
        .collect();

    if text.is_empty() {
        return Err(ProviderError::EmptyResponse);
    }

    Ok(text)
}

#[async_trait]
impl VisionProvider for GeminiVisionProvider {
    fn name(&self) -> &'static str {
        "gemini"
    }

    async fn generate(&self, prompt: &str, images: &[ImageInput]) -> Result<String, ProviderError> {
        let api_key = self.config.api_key.as_ref().ok_or_else(|| {
            tracing::error!("Gemini API key is not configured");
            ProviderError::NotConfigured("Gemini API key not configured".to_string())
        })?;

        let request = Self::build_request(prompt, images);

        tracing::debug!(
            model = %self.config.model,
            prompt_len = prompt.len(),
            image_count = images.len(),
            "Sending request to Gemini API"
        );

        let response = self
            .client
            .post(self.api_url())
            .header(API_KEY_HEADER, api_key.expose_secret())
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Gemini request failed");
                ProviderError::NetworkError(e.to_string())
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, "Gemini API returned an error");

            return Err(ProviderError::ApiError(format!(
                "Gemini API error {}: {}",
                status, error_text
            )));
        }

        let api_response: GenerateContentResponse = response.json().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to parse Gemini response");
            ProviderError::ApiError(format!("Failed to parse response: {}", e))
        })?;

        let text = extract_text(api_response)?;

        tracing::debug!(
            model = %self.config.model,
            response_len = text.len(),
            "Gemini response received"
        );

        Ok(text)
    }
}

// ============================================================================
// Gemini API Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    system_instruction: SystemInstruction,
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct SystemInstruction {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Part {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<ResponseContent>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    thought: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> GenerateContentResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn request_puts_images_before_prompt() {
        let images = vec![
            ImageInput {
                mime_type: "image/png".to_string(),
                data: "AAAA".to_string(),
            },
            ImageInput {
                mime_type: "image/jpeg".to_string(),
                data: "BBBB".to_string(),
            },
        ];
        let body =
            serde_json::to_value(GeminiVisionProvider::build_request("Summarise", &images))
                .unwrap();

        assert_eq!(
            body["systemInstruction"]["parts"][0]["text"],
            SYSTEM_INSTRUCTION
        );
        let parts = body["contents"][0]["parts"].as_array().unwrap();
        assert_eq!(body["contents"][0]["role"], "user");
        assert_eq!(parts.len(), 3);
        assert_eq!(
            parts[0],
            json!({"inlineData": {"mimeType": "image/png", "data": "AAAA"}})
        );
        assert_eq!(parts[1]["inlineData"]["mimeType"], "image/jpeg");
        assert_eq!(parts[2], json!({"text": "Summarise"}));
    }

    #[test]
    fn api_url_tolerates_trailing_slash() {
        let provider = GeminiVisionProvider::new(GeminiConfig {
            api_key: None,
            model: "gemini-3-flash-preview".to_string(),
            api_base: "http://localhost:9999/v1beta/".to_string(),
            timeout: Duration::from_secs(5),
        })
        .unwrap();
        assert_eq!(
            provider.api_url(),
            "http://localhost:9999/v1beta/models/gemini-3-flash-preview:generateContent"
        );
    }

    #[test]
    fn extracts_and_joins_text_parts() {
        let response = parse(json!({
            "candidates": [{
                "content": {"role": "model", "parts": [
                    {"text": "thinking...", "thought": true},
                    {"text": "# Summary\n"},
                    {"text": "Photosynthesis converts light to energy."}
                ]},
                "finishReason": "STOP"
            }],
            "usageMetadata": {"promptTokenCount": 10}
        }));
        assert_eq!(
            extract_text(response).unwrap(),
            "# Summary\nPhotosynthesis converts light to energy."
        );
    }

    #[test]
    fn safety_stop_is_content_filtered() {
        let response = parse(json!({
            "candidates": [{"content": {"parts": []}, "finishReason": "SAFETY"}]
        }));
        assert!(matches!(
            extract_text(response),
            Err(ProviderError::ContentFiltered)
        ));
    }

    #[test]
    fn blocked_prompt_is_content_filtered() {
        let response = parse(json!({"promptFeedback": {"blockReason": "SAFETY"}}));
        assert!(matches!(
            extract_text(response),
            Err(ProviderError::ContentFiltered)
        ));
    }

    #[test]
    fn no_candidates_is_empty_response() {
        let response = parse(json!({}));
        assert!(matches!(
            extract_text(response),
            Err(ProviderError::EmptyResponse)
        ));
    }

    #[tokio::test]
    async fn missing_key_fails_before_any_request() {
        let provider = GeminiVisionProvider::new(GeminiConfig {
            api_key: None,
            model: "gemini-3-flash-preview".to_string(),
            // Unroutable: reaching the network would fail differently.
            api_base: "http://127.0.0.1:1".to_string(),
            timeout: Duration::from_secs(1),
        })
        .unwrap();

        let err = provider
            .generate("Summarise", &[ImageInput::parse("iVBORw0KGgo=")])
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::NotConfigured(_)));
    }
}

//! Gemini multimodal generation over the Vertex AI REST API

use anyhow::{Context, Result};
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::config::GoogleConfig;

use super::provider::GenerativeModel;
use super::types::{GenerateRequest, GenerateResponse, Part, TokenUsage};

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash-002";

pub struct GeminiClient {
    config: GoogleConfig,
    model: String,
    client: Client,
}

impl GeminiClient {
    pub fn new(config: GoogleConfig) -> Self {
        Self {
            config,
            model: DEFAULT_GEMINI_MODEL.to_string(),
            client: Client::new(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    fn convert_parts(parts: &[Part]) -> Vec<WirePart> {
        parts
            .iter()
            .map(|part| match part {
                Part::Text(text) => WirePart {
                    text: Some(text.clone()),
                    inline_data: None,
                },
                Part::InlineImage { mime_type, data } => WirePart {
                    text: None,
                    inline_data: Some(InlineData {
                        mime_type: mime_type.clone(),
                        data: BASE64.encode(data),
                    }),
                },
            })
            .collect()
    }
}

#[async_trait]
impl GenerativeModel for GeminiClient {
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse> {
        let url = self.config.vertex_model_url(&self.model, "generateContent");

        let wire_request = WireRequest {
            contents: vec![WireContent {
                role: "user".to_string(),
                parts: Self::convert_parts(&request.parts),
            }],
            generation_config: request.config.map(|config| WireGenerationConfig {
                response_mime_type: config.response_mime_type,
                response_schema: Some(config.response_schema),
            }),
        };

        debug!(model = %self.model, "Sending generateContent request");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.access_token)
            .json(&wire_request)
            .send()
            .await
            .context("Failed to send request to Gemini")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Gemini API error {status}: {body}");
        }

        let wire_response: WireResponse = response
            .json()
            .await
            .context("Failed to parse Gemini response")?;

        let candidate = wire_response
            .candidates
            .into_iter()
            .next()
            .context("No candidates in Gemini response")?;

        let text = candidate
            .content
            .parts
            .into_iter()
            .filter_map(|part| part.text)
            .collect::<Vec<String>>()
            .join("");

        let usage = wire_response
            .usage_metadata
            .map(|usage| TokenUsage {
                prompt_tokens: usage.prompt_token_count,
                response_tokens: usage.candidates_token_count,
                total_tokens: usage.total_token_count,
            })
            .unwrap_or_default();

        Ok(GenerateResponse { text, usage })
    }
}

// Vertex AI generateContent wire types

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WireRequest {
    contents: Vec<WireContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<WireGenerationConfig>,
}

#[derive(Debug, Serialize, Deserialize)]
struct WireContent {
    role: String,
    parts: Vec<WirePart>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WirePart {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WireGenerationConfig {
    response_mime_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_schema: Option<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireResponse {
    #[serde(default)]
    candidates: Vec<WireCandidate>,
    usage_metadata: Option<WireUsage>,
}

#[derive(Debug, Deserialize)]
struct WireCandidate {
    content: WireCandidateContent,
}

#[derive(Debug, Deserialize)]
struct WireCandidateContent {
    #[serde(default)]
    parts: Vec<WirePart>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireUsage {
    #[serde(default)]
    prompt_token_count: u32,
    #[serde(default)]
    candidates_token_count: u32,
    #[serde(default)]
    total_token_count: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_parts_are_base64_encoded() {
        let parts = GeminiClient::convert_parts(&[
            Part::InlineImage {
                mime_type: "image/jpeg".to_string(),
                data: vec![0xff, 0xd8, 0xff],
            },
            Part::Text("What is this?".to_string()),
        ]);

        assert_eq!(parts.len(), 2);
        let inline = parts[0].inline_data.as_ref().unwrap();
        assert_eq!(inline.mime_type, "image/jpeg");
        assert_eq!(inline.data, BASE64.encode([0xff, 0xd8, 0xff]));
        assert_eq!(parts[1].text.as_deref(), Some("What is this?"));
    }

    #[test]
    fn generation_config_serializes_camel_case() {
        let request = WireRequest {
            contents: vec![],
            generation_config: Some(WireGenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: Some(serde_json::json!({"type": "object"})),
            }),
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json["generationConfig"]["responseMimeType"],
            "application/json"
        );
        assert_eq!(json["generationConfig"]["responseSchema"]["type"], "object");
    }
}

//! Visual question answering via the Vertex AI imagetext model

use anyhow::{Context, Result};
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::GoogleConfig;

use super::provider::VisionQa;

pub const VQA_MODEL: &str = "imagetext@001";

pub struct VertexQaClient {
    config: GoogleConfig,
    client: Client,
}

impl VertexQaClient {
    pub fn new(config: GoogleConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }
}

#[async_trait]
impl VisionQa for VertexQaClient {
    async fn ask(&self, image: &[u8], question: &str) -> Result<Vec<String>> {
        let url = self.config.vertex_model_url(VQA_MODEL, "predict");

        let request = PredictRequest {
            instances: vec![PredictInstance {
                prompt: question.to_string(),
                image: PredictImage {
                    bytes_base64_encoded: BASE64.encode(image),
                },
            }],
            parameters: PredictParameters { sample_count: 1 },
        };

        debug!(model = VQA_MODEL, "Sending predict request");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.access_token)
            .json(&request)
            .send()
            .await
            .context("Failed to send request to Vertex AI")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Vertex AI API error {status}: {body}");
        }

        let predict_response: PredictResponse = response
            .json()
            .await
            .context("Failed to parse predict response")?;

        Ok(predict_response.predictions)
    }
}

// Vertex AI predict wire types

#[derive(Debug, Serialize)]
struct PredictRequest {
    instances: Vec<PredictInstance>,
    parameters: PredictParameters,
}

#[derive(Debug, Serialize)]
struct PredictInstance {
    prompt: String,
    image: PredictImage,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PredictImage {
    bytes_base64_encoded: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PredictParameters {
    sample_count: u32,
}

#[derive(Debug, Deserialize)]
struct PredictResponse {
    #[serde(default)]
    predictions: Vec<String>,
}

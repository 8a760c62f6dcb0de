//! Single-call analysis: image and prompt go to the generative model together

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::json;
use tracing::info;

use super::analyzer::{ImageAnalyzer, DEFAULT_LANGUAGE};
use super::provider::GenerativeModel;
use super::types::{GenerateRequest, GenerationConfig, ImageData, Part, VehicleReport};

const VEHICLE_QUESTION: &str = "What is the brand, the model and the color of this car ?";

pub struct GeminiAnalyzer {
    image: PathBuf,
    model: Arc<dyn GenerativeModel>,
}

impl GeminiAnalyzer {
    pub fn new(image: impl Into<PathBuf>, model: Arc<dyn GenerativeModel>) -> Self {
        Self {
            image: image.into(),
            model,
        }
    }

    /// The question is submitted unmodified for the default language;
    /// otherwise a language instruction is appended.
    fn build_prompt(question: &str, language: &str) -> String {
        if language == DEFAULT_LANGUAGE {
            question.to_string()
        } else {
            format!("{question}. Return an answer in {language}")
        }
    }

    fn schema_for_vehicle() -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "brand": {"type": "string"},
                "model": {"type": "string"},
                "color": {"type": "string"},
            },
            "required": ["brand", "model", "color"],
        })
    }

    /// Ask the hard-coded vehicle question in schema-constrained JSON mode.
    pub async fn describe_vehicle(&self) -> Result<VehicleReport> {
        let image = ImageData::from_file(&self.image)?;

        let request = GenerateRequest {
            parts: vec![
                Part::InlineImage {
                    mime_type: image.mime_type,
                    data: image.bytes,
                },
                Part::Text(VEHICLE_QUESTION.to_string()),
            ],
            config: Some(GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: Self::schema_for_vehicle(),
            }),
        };

        let response = self.model.generate(request).await?;
        info!("{}", response.text);

        serde_json::from_str(&response.text)
            .with_context(|| format!("Malformed vehicle report: {}", response.text))
    }
}

#[async_trait]
impl ImageAnalyzer for GeminiAnalyzer {
    async fn analyze(&self, question: &str, language: &str) -> Result<String> {
        let prompt = Self::build_prompt(question, language);
        let image = ImageData::from_file(&self.image)?;

        let request = GenerateRequest {
            parts: vec![
                Part::InlineImage {
                    mime_type: image.mime_type,
                    data: image.bytes,
                },
                Part::Text(prompt),
            ],
            config: None,
        };

        let response = self.model.generate(request).await?;
        info!("{}", response.text);

        Ok(response.text)
    }
}

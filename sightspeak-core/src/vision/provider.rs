use anyhow::Result;
use async_trait::async_trait;

use super::types::{GenerateRequest, GenerateResponse};

/// A multimodal generative model: takes an ordered list of text and image
/// parts, returns generated text.
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse>;
}

/// A visual question-answering model: takes an image and a short question,
/// returns one or more terse answers.
#[async_trait]
pub trait VisionQa: Send + Sync {
    async fn ask(&self, image: &[u8], question: &str) -> Result<Vec<String>>;
}

use anyhow::Result;
use async_trait::async_trait;

/// Language used when the caller does not ask for a specific one.
pub const DEFAULT_LANGUAGE: &str = "English";

/// Trait for image analysis strategies
///
/// Each implementation is bound to an image at construction time and answers
/// free-form questions about it in the requested language.
#[async_trait]
pub trait ImageAnalyzer: Send + Sync {
    async fn analyze(&self, question: &str, language: &str) -> Result<String>;
}

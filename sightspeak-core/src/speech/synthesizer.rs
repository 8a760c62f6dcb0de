use anyhow::Result;
use async_trait::async_trait;

use super::voices::VoiceConfig;

/// A voice as reported by the synthesis service.
#[derive(Debug, Clone)]
pub struct VoiceInfo {
    pub name: String,
    pub language_codes: Vec<String>,
    pub ssml_gender: String,
}

/// Trait for text-to-speech backends
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Synthesize text with the given voice, returning encoded audio bytes.
    async fn synthesize(&self, text: &str, voice: &VoiceConfig) -> Result<Vec<u8>>;

    /// List the voices the service offers.
    async fn list_voices(&self) -> Result<Vec<VoiceInfo>>;
}

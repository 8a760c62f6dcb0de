//! Mock synthesizer for testing

use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;

use super::synthesizer::{SpeechSynthesizer, VoiceInfo};
use super::voices::VoiceConfig;

pub struct MockSynthesizer {
    audio: Option<Vec<u8>>,
    captured: Arc<Mutex<Vec<(String, VoiceConfig)>>>,
}

impl MockSynthesizer {
    /// Replies to every call with the given audio bytes.
    pub fn new(audio: Vec<u8>) -> Self {
        Self {
            audio: Some(audio),
            captured: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Fails every call.
    pub fn failing() -> Self {
        Self {
            audio: None,
            captured: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn last_call(&self) -> Option<(String, VoiceConfig)> {
        self.captured.lock().unwrap().last().cloned()
    }

    pub fn call_count(&self) -> usize {
        self.captured.lock().unwrap().len()
    }
}

#[async_trait]
impl SpeechSynthesizer for MockSynthesizer {
    async fn synthesize(&self, text: &str, voice: &VoiceConfig) -> Result<Vec<u8>> {
        self.captured
            .lock()
            .unwrap()
            .push((text.to_string(), *voice));

        match &self.audio {
            Some(audio) => Ok(audio.clone()),
            None => anyhow::bail!("Mock synthesis failure"),
        }
    }

    async fn list_voices(&self) -> Result<Vec<VoiceInfo>> {
        Ok(Vec::new())
    }
}

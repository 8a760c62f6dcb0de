//! Google Cloud Text-to-Speech implementation

use anyhow::{Context, Result};
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::GoogleConfig;

use super::synthesizer::{SpeechSynthesizer, VoiceInfo};
use super::voices::VoiceConfig;

const SYNTHESIZE_URL: &str = "https://texttospeech.googleapis.com/v1/text:synthesize";
const VOICES_URL: &str = "https://texttospeech.googleapis.com/v1/voices";

/// The one audio format this tool produces.
const AUDIO_ENCODING: &str = "MP3";

pub struct GoogleSynthesizer {
    access_token: String,
    client: Client,
}

impl GoogleSynthesizer {
    pub fn new(config: &GoogleConfig) -> Self {
        Self {
            access_token: config.access_token.clone(),
            client: Client::new(),
        }
    }
}

#[async_trait]
impl SpeechSynthesizer for GoogleSynthesizer {
    async fn synthesize(&self, text: &str, voice: &VoiceConfig) -> Result<Vec<u8>> {
        let request = SynthesizeRequest {
            input: SynthesisInput {
                text: text.to_string(),
            },
            voice: VoiceSelection {
                language_code: voice.language_code.to_string(),
                name: voice.name.to_string(),
            },
            audio_config: AudioConfig {
                audio_encoding: AUDIO_ENCODING.to_string(),
            },
        };

        let response = self
            .client
            .post(SYNTHESIZE_URL)
            .bearer_auth(&self.access_token)
            .json(&request)
            .send()
            .await
            .context("Failed to send request to Text-to-Speech")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Text-to-Speech API error {status}: {body}");
        }

        let synthesize_response: SynthesizeResponse = response
            .json()
            .await
            .context("Failed to parse synthesis response")?;

        BASE64
            .decode(synthesize_response.audio_content)
            .context("Audio content is not valid base64")
    }

    async fn list_voices(&self) -> Result<Vec<VoiceInfo>> {
        let response = self
            .client
            .get(VOICES_URL)
            .bearer_auth(&self.access_token)
            .send()
            .await
            .context("Failed to list voices from Text-to-Speech")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Text-to-Speech API error {status}: {body}");
        }

        let voices_response: VoicesResponse = response
            .json()
            .await
            .context("Failed to parse voices response")?;

        let voices = voices_response
            .voices
            .into_iter()
            .map(|v| VoiceInfo {
                name: v.name,
                language_codes: v.language_codes,
                ssml_gender: v.ssml_gender,
            })
            .collect();

        Ok(voices)
    }
}

// Text-to-Speech wire types

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeRequest {
    input: SynthesisInput,
    voice: VoiceSelection,
    audio_config: AudioConfig,
}

#[derive(Debug, Serialize)]
struct SynthesisInput {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VoiceSelection {
    language_code: String,
    name: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AudioConfig {
    audio_encoding: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeResponse {
    audio_content: String,
}

#[derive(Debug, Deserialize)]
struct VoicesResponse {
    #[serde(default)]
    voices: Vec<VoiceEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VoiceEntry {
    name: String,
    #[serde(default)]
    language_codes: Vec<String>,
    #[serde(default)]
    ssml_gender: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synthesize_request_serializes_camel_case() {
        let request = SynthesizeRequest {
            input: SynthesisInput {
                text: "hello".to_string(),
            },
            voice: VoiceSelection {
                language_code: "en-US".to_string(),
                name: "en-US-Standard-C".to_string(),
            },
            audio_config: AudioConfig {
                audio_encoding: AUDIO_ENCODING.to_string(),
            },
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["input"]["text"], "hello");
        assert_eq!(json["voice"]["languageCode"], "en-US");
        assert_eq!(json["voice"]["name"], "en-US-Standard-C");
        assert_eq!(json["audioConfig"]["audioEncoding"], "MP3");
    }
}

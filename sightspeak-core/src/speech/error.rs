use thiserror::Error;

#[derive(Error, Debug)]
pub enum SpeechError {
    #[error("No voice configured for language {language:?} and persona {persona:?}")]
    VoiceNotFound { language: String, persona: String },

    #[error("Speech synthesis failed: {0}")]
    Synthesis(anyhow::Error),

    #[error("Failed to write audio file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Audio playback failed: {0}")]
    Playback(anyhow::Error),
}

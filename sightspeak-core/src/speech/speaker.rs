//! Synthesis orchestration: voice lookup, file output, playback

use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;

use crate::audio::decode::decode_mp3;
use crate::audio::playback::AudioPlayer;

use super::error::SpeechError;
use super::synthesizer::SpeechSynthesizer;
use super::voices;

pub const DEFAULT_OUTPUT_PATH: &str = "output.mp3";

pub struct Speaker {
    synthesizer: Arc<dyn SpeechSynthesizer>,
    player: Option<AudioPlayer>,
    output_path: PathBuf,
}

impl Speaker {
    /// Pass `None` for the player to skip local playback (headless use,
    /// tests).
    pub fn new(synthesizer: Arc<dyn SpeechSynthesizer>, player: Option<AudioPlayer>) -> Self {
        Self {
            synthesizer,
            player,
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
        }
    }

    pub fn with_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = path.into();
        self
    }

    /// Speak `text` with the configured voice for (language, persona).
    ///
    /// The voice is resolved before anything goes over the network; the audio
    /// bytes are written verbatim to the output path, overwriting whatever is
    /// there.
    pub async fn talk(
        &self,
        text: &str,
        language: &str,
        persona: &str,
    ) -> Result<(), SpeechError> {
        let voice = voices::lookup(language, persona)?;

        let audio = self
            .synthesizer
            .synthesize(text, &voice)
            .await
            .map_err(SpeechError::Synthesis)?;

        std::fs::write(&self.output_path, &audio)?;
        info!(
            voice = voice.name,
            bytes = audio.len(),
            "Wrote {}",
            self.output_path.display()
        );

        if let Some(player) = &self.player {
            let decoded = decode_mp3(&audio).map_err(SpeechError::Playback)?;
            let playback = player.play(decoded).map_err(SpeechError::Playback)?;
            playback.wait().await;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::speech::mock::MockSynthesizer;

    fn speaker_in(dir: &tempfile::TempDir, synthesizer: Arc<MockSynthesizer>) -> Speaker {
        Speaker::new(synthesizer, None).with_output_path(dir.path().join("output.mp3"))
    }

    #[tokio::test]
    async fn every_table_pair_passes_through_its_voice() {
        for (language, persona, expected) in voices::supported() {
            let dir = tempfile::tempdir().unwrap();
            let synthesizer = Arc::new(MockSynthesizer::new(vec![1, 2, 3]));
            let speaker = speaker_in(&dir, synthesizer.clone());

            speaker.talk("hello", language, persona).await.unwrap();

            let (text, voice) = synthesizer.last_call().unwrap();
            assert_eq!(text, "hello");
            assert_eq!(voice, expected, "{language}/{persona}");
        }
    }

    #[tokio::test]
    async fn unknown_pair_fails_before_any_synthesis_call() {
        let dir = tempfile::tempdir().unwrap();
        let synthesizer = Arc::new(MockSynthesizer::new(vec![1, 2, 3]));
        let speaker = speaker_in(&dir, synthesizer.clone());

        let err = speaker.talk("hello", "German", "Maria").await.unwrap_err();
        assert!(matches!(err, SpeechError::VoiceNotFound { .. }));
        assert_eq!(synthesizer.call_count(), 0);
        assert!(!dir.path().join("output.mp3").exists());
    }

    #[tokio::test]
    async fn output_file_contains_exactly_the_synthesized_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let audio: Vec<u8> = (0..=255).collect();
        let synthesizer = Arc::new(MockSynthesizer::new(audio.clone()));
        let speaker = speaker_in(&dir, synthesizer);

        speaker.talk("hello", "French", "Juan").await.unwrap();

        let written = std::fs::read(dir.path().join("output.mp3")).unwrap();
        assert_eq!(written, audio);
    }

    #[tokio::test]
    async fn output_file_is_overwritten_on_each_run() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("output.mp3");
        std::fs::write(&path, b"stale previous run").unwrap();

        let synthesizer = Arc::new(MockSynthesizer::new(vec![9, 9]));
        let speaker = Speaker::new(synthesizer, None).with_output_path(&path);
        speaker.talk("hello", "English", "Juan").await.unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), vec![9, 9]);
    }

    #[tokio::test]
    async fn synthesis_errors_surface_as_synthesis() {
        let dir = tempfile::tempdir().unwrap();
        let synthesizer = Arc::new(MockSynthesizer::failing());
        let speaker = speaker_in(&dir, synthesizer);

        let err = speaker.talk("hello", "English", "Maria").await.unwrap_err();
        assert!(matches!(err, SpeechError::Synthesis(_)));
    }
}

//! Audio decoding and playback for the spoken answer

pub mod decode;
pub mod playback;

/// Decoded PCM audio, interleaved f32 samples
#[derive(Debug, Clone)]
pub struct PcmAudio {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
    pub channels: u16,
}

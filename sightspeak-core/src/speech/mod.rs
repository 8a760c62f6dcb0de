pub mod error;
pub mod google;
pub mod mock;
pub mod speaker;
pub mod synthesizer;
pub mod voices;

pub use error::SpeechError;
pub use google::GoogleSynthesizer;
pub use speaker::Speaker;
pub use synthesizer::{SpeechSynthesizer, VoiceInfo};
pub use voices::VoiceConfig;

pub mod audio;
pub mod config;
pub mod speech;
pub mod vision;

// Public library API - the CLI wires these together, but the crate is usable
// on its own as a library.
pub use config::GoogleConfig;
pub use speech::speaker::Speaker;
pub use speech::synthesizer::SpeechSynthesizer;
pub use vision::analyzer::ImageAnalyzer;
pub use vision::one_step::GeminiAnalyzer;
pub use vision::two_step::VisionQaAnalyzer;

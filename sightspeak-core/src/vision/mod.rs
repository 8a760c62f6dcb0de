pub mod analyzer;
pub mod gemini;
pub mod mock;
pub mod one_step;
pub mod provider;
pub mod two_step;
pub mod types;
pub mod vertex_qa;

pub use analyzer::ImageAnalyzer;
pub use gemini::GeminiClient;
pub use one_step::GeminiAnalyzer;
pub use provider::{GenerativeModel, VisionQa};
pub use two_step::VisionQaAnalyzer;
pub use types::*;
pub use vertex_qa::VertexQaClient;

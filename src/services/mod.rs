pub mod gemini;
pub mod generator;

pub use gemini::GeminiClient;

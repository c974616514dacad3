mod client;
mod gemini;
mod openai;
pub mod types;

pub use client::{VisionClient, create_vision_client};
pub use gemini::GeminiClient;
pub use openai::OpenAiClient;

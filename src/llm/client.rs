use super::{GeminiClient, OpenAiClient};
use crate::{
    Result,
    config::{LlmConfig, LlmProvider},
};
use async_trait::async_trait;
use std::sync::Arc;

/// A multimodal model that answers a text prompt about one image.
#[async_trait]
pub trait VisionClient: Send + Sync {
    /// Sends `prompt` together with the image and returns the raw answer text.
    async fn generate_with_image(
        &self,
        prompt: &str,
        image: &[u8],
        mime_type: &str,
    ) -> Result<String>;
}

pub fn create_vision_client(config: &LlmConfig) -> Arc<dyn VisionClient> {
    match config.provider {
        LlmProvider::Gemini => Arc::new(GeminiClient::new(config.clone())),
        LlmProvider::Openai => Arc::new(OpenAiClient::new(config.clone())),
    }
}

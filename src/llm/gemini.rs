use super::{
    VisionClient,
    types::{Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, InlineData, Part},
};
use crate::{Error, Result, config::LlmConfig};
use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose};
use reqwest::Client;
use tracing::{debug, error};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
/// Keeps the key out of the URL, which reqwest echoes into its error messages.
const API_KEY_HEADER: &str = "x-goog-api-key";

pub struct GeminiClient {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl GeminiClient {
    pub fn new(config: LlmConfig) -> Self {
        let base_url = if config.base_url.is_empty() {
            DEFAULT_BASE_URL.to_string()
        } else {
            config.base_url.trim_end_matches('/').to_string()
        };

        Self {
            client: Client::new(),
            base_url,
            api_key: config.api_key,
            model: config.model,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }
}

#[async_trait]
impl VisionClient for GeminiClient {
    async fn generate_with_image(
        &self,
        prompt: &str,
        image: &[u8],
        mime_type: &str,
    ) -> Result<String> {
        debug!(
            "Sending {} byte {} image to Gemini model {}",
            image.len(),
            mime_type,
            self.model
        );

        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![
                    Part::Text {
                        text: prompt.to_string(),
                    },
                    Part::InlineData {
                        inline_data: InlineData {
                            mime_type: mime_type.to_string(),
                            data: general_purpose::STANDARD.encode(image),
                        },
                    },
                ],
            }],
            generation_config: Some(GenerationConfig {
                response_mime_type: "application/json".to_string(),
            }),
        };

        let response = self
            .client
            .post(self.endpoint())
            .header(API_KEY_HEADER, &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(reqwest::Error::without_url)?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            error!("Gemini API error: {} - {}", status, error_text);
            return Err(Error::llm(format!(
                "Gemini API returned {}: {}",
                status, error_text
            )));
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(reqwest::Error::without_url)?;

        if let Some(text) = body.answer_text() {
            return Ok(text);
        }

        let reason = body
            .prompt_feedback
            .and_then(|feedback| feedback.block_reason)
            .or_else(|| {
                body.candidates
                    .first()
                    .and_then(|candidate| candidate.finish_reason.clone())
            })
            .unwrap_or_else(|| "no candidates".to_string());

        Err(Error::llm(format!("Gemini returned no answer text ({})", reason)))
    }
}

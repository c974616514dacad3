use async_trait::async_trait;
use pantry_receipt::{Error, Result, llm::VisionClient};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// A request observed by [`MockVisionClient`].
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub prompt: String,
    pub image: Vec<u8>,
    pub mime_type: String,
}

/// Mock vision model for testing
#[derive(Debug, Clone)]
pub struct MockVisionClient {
    pub reply: Option<String>,
    pub error: Option<String>,
    pub delay: Option<Duration>,
    pub calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl MockVisionClient {
    pub fn new() -> Self {
        Self {
            reply: None,
            error: None,
            delay: None,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_reply(mut self, reply: impl Into<String>) -> Self {
        self.reply = Some(reply.into());
        self
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn get_calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

impl Default for MockVisionClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VisionClient for MockVisionClient {
    async fn generate_with_image(
        &self,
        prompt: &str,
        image: &[u8],
        mime_type: &str,
    ) -> Result<String> {
        self.calls.lock().unwrap().push(RecordedCall {
            prompt: prompt.to_string(),
            image: image.to_vec(),
            mime_type: mime_type.to_string(),
        });

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if let Some(ref error) = self.error {
            return Err(Error::llm(error.clone()));
        }

        self.reply
            .clone()
            .ok_or_else(|| Error::llm("No mock reply configured"))
    }
}

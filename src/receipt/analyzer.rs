use super::{
    parse::parse_items,
    prompt::RECEIPT_PROMPT,
    types::{AnalysisFailure, ItemRecord, ReceiptAnalysis, UploadedImage},
};
use crate::{Error, Result, config::LlmConfig, llm::VisionClient};
use std::{sync::Arc, time::Duration};
use tracing::{debug, error, info};

/// Turns a receipt image into item records by asking a vision model.
///
/// Every call makes at most one model request, bounded by `timeout`. Failures
/// never escape [`ReceiptAnalyzer::analyze`]; they come back as
/// [`ReceiptAnalysis::Failed`].
pub struct ReceiptAnalyzer {
    client: Arc<dyn VisionClient>,
    timeout: Duration,
    prompt: String,
}

impl ReceiptAnalyzer {
    pub fn new(client: Arc<dyn VisionClient>, timeout: Duration) -> Self {
        Self {
            client,
            timeout,
            prompt: RECEIPT_PROMPT.to_string(),
        }
    }

    pub fn from_config(client: Arc<dyn VisionClient>, config: &LlmConfig) -> Self {
        Self::new(client, config.timeout())
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub async fn analyze(&self, image: &UploadedImage) -> ReceiptAnalysis {
        match self.try_analyze(image).await {
            Ok(items) => {
                info!("Extracted {} items from receipt", items.len());
                ReceiptAnalysis::Items(items)
            }
            Err(e) => {
                let failure = AnalysisFailure::from(e);
                error!(
                    "Error processing receipt {} ({}): {}",
                    image.file_name.as_deref().unwrap_or("<unnamed>"),
                    failure.kind,
                    failure.details
                );
                ReceiptAnalysis::Failed(failure)
            }
        }
    }

    pub async fn try_analyze(&self, image: &UploadedImage) -> Result<Vec<ItemRecord>> {
        if image.bytes.is_empty() {
            return Err(Error::image("upload contains no data"));
        }

        debug!(
            "Analyzing {} byte {} upload",
            image.bytes.len(),
            image.content_type
        );

        let call = self
            .client
            .generate_with_image(&self.prompt, &image.bytes, &image.content_type);

        let raw = tokio::time::timeout(self.timeout, call)
            .await
            .map_err(|_| Error::Timeout(self.timeout))??;

        debug!("Model replied with {} characters", raw.len());

        parse_items(&raw)
    }
}

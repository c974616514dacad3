use super::types::{ErrorResponse, LIVENESS_MESSAGE, MessageResponse, NOT_AN_IMAGE};
use crate::{
    config::FailureFormat,
    receipt::{ReceiptAnalyzer, UploadedImage},
};
use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::Json,
};
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, warn};

/// Multipart field carrying the receipt image.
pub const FILE_FIELD: &str = "file";

#[derive(Clone)]
pub struct AppState {
    pub analyzer: Arc<ReceiptAnalyzer>,
    pub failure_format: FailureFormat,
}

type Rejection = (StatusCode, Json<ErrorResponse>);

fn reject(status: StatusCode, detail: impl Into<String>) -> Rejection {
    (
        status,
        Json(ErrorResponse {
            detail: detail.into(),
        }),
    )
}

pub async fn root() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: LIVENESS_MESSAGE.to_string(),
    })
}

/// Accepts one receipt image and answers with the extracted items.
///
/// Analysis failures are still 200 responses; only client mistakes are rejected.
pub async fn upload_receipt(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<Value>, Rejection> {
    let mut upload: Option<UploadedImage> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        warn!("Failed to read multipart field: {}", e);
        reject(e.status(), format!("Invalid multipart body: {}", e.body_text()))
    })? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let content_type = field.content_type().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);

        if !content_type.starts_with("image/") {
            warn!(
                "Rejected upload {} with content type '{}'",
                file_name.as_deref().unwrap_or("<unnamed>"),
                content_type
            );
            return Err(reject(StatusCode::BAD_REQUEST, NOT_AN_IMAGE));
        }

        let bytes = field.bytes().await.map_err(|e| {
            warn!("Failed to read uploaded file: {}", e);
            reject(e.status(), format!("Invalid multipart body: {}", e.body_text()))
        })?;

        let mut image = UploadedImage::new(bytes.to_vec(), content_type);
        if let Some(file_name) = file_name {
            image = image.with_file_name(file_name);
        }
        upload = Some(image);
        break;
    }

    let image = upload.ok_or_else(|| {
        reject(
            StatusCode::UNPROCESSABLE_ENTITY,
            format!("Missing {} field", FILE_FIELD),
        )
    })?;

    info!(
        "Received receipt upload {} ({} bytes)",
        image.file_name.as_deref().unwrap_or("<unnamed>"),
        image.bytes.len()
    );

    let analysis = state.analyzer.analyze(&image).await;

    Ok(Json(analysis.into_body(state.failure_format)))
}

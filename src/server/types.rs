use serde::{Deserialize, Serialize};

pub const LIVENESS_MESSAGE: &str = "Pantry Tracker API is running!";
pub const NOT_AN_IMAGE: &str = "File must be an image";

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}

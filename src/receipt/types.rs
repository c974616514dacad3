use crate::{Error, config::FailureFormat};
use serde::{Deserialize, Deserializer, Serialize, de};
use serde_json::{Value, json};
use std::fmt;

/// An image received from a client, held only for the duration of one request.
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub bytes: Vec<u8>,
    pub content_type: String,
    pub file_name: Option<String>,
}

impl UploadedImage {
    pub fn new(bytes: impl Into<Vec<u8>>, content_type: impl Into<String>) -> Self {
        Self {
            bytes: bytes.into(),
            content_type: content_type.into(),
            file_name: None,
        }
    }

    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Storage {
    Pantry,
    Fridge,
    Freezer,
    None,
}

/// One food item extracted from a receipt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemRecord {
    pub item: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage: Option<Storage>,
    #[serde(deserialize_with = "whole_days")]
    pub shelf_life_days: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,
    /// Kept as a JSON number so `1` is echoed back as `1`, not `1.0`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<serde_json::Number>,
}

/// Models sometimes write `14.0` for a day count; accept it, but not `14.5` or `-2`.
fn whole_days<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let number = serde_json::Number::deserialize(deserializer)?;
    if let Some(days) = number.as_u64() {
        return u32::try_from(days)
            .map_err(|_| de::Error::custom(format!("shelf_life_days {} out of range", days)));
    }

    match number.as_f64() {
        Some(days) if days.fract() == 0.0 && (0.0..=u32::MAX as f64).contains(&days) => Ok(days as u32),
        _ => Err(de::Error::custom(format!(
            "shelf_life_days must be a non-negative whole number, got {}",
            number
        ))),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    InvalidImage,
    Upstream,
    Timeout,
    Parse,
    Schema,
    ModelReported,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::InvalidImage => "invalid_image",
            Self::Upstream => "upstream",
            Self::Timeout => "timeout",
            Self::Parse => "parse",
            Self::Schema => "schema",
            Self::ModelReported => "model_reported",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisFailure {
    pub kind: FailureKind,
    pub details: String,
}

impl From<Error> for AnalysisFailure {
    fn from(err: Error) -> Self {
        let kind = match &err {
            Error::Image(_) => FailureKind::InvalidImage,
            Error::Timeout(_) => FailureKind::Timeout,
            Error::Parse(_) => FailureKind::Parse,
            Error::Schema(_) => FailureKind::Schema,
            Error::ModelReported(_) => FailureKind::ModelReported,
            _ => FailureKind::Upstream,
        };

        Self {
            kind,
            details: err.to_string(),
        }
    }
}

/// Outcome of analyzing one receipt. Failures are values, not errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ReceiptAnalysis {
    Items(Vec<ItemRecord>),
    Failed(AnalysisFailure),
}

pub const FAILURE_MESSAGE: &str = "Failed to analyze receipt";
pub const ERROR_CATEGORY: &str = "Error";

impl ReceiptAnalysis {
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    /// Renders the analysis as the JSON body returned to HTTP callers.
    pub fn into_body(self, format: FailureFormat) -> Value {
        match self {
            Self::Items(items) => json!(items),
            Self::Failed(failure) => match format {
                FailureFormat::Object => json!({
                    "error": FAILURE_MESSAGE,
                    "kind": failure.kind,
                    "details": failure.details,
                }),
                FailureFormat::ItemList => {
                    let placeholder = ItemRecord {
                        item: "Error parsing receipt".to_string(),
                        category: ERROR_CATEGORY.to_string(),
                        storage: Some(Storage::None),
                        shelf_life_days: 0,
                        reasoning: None,
                        quantity: None,
                    };
                    json!([placeholder])
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::time::Duration;

    #[test]
    fn test_item_record_omits_absent_fields() {
        let record: ItemRecord = serde_json::from_value(json!({
            "item": "Milk",
            "shelf_life_days": 7,
            "category": "Dairy",
            "quantity": 1
        }))
        .unwrap();

        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            json!({"item": "Milk", "shelf_life_days": 7, "category": "Dairy", "quantity": 1})
        );
    }

    #[test]
    fn test_storage_rejects_unknown_location() {
        let result = serde_json::from_value::<ItemRecord>(json!({
            "item": "Ice Cream",
            "category": "Dairy",
            "storage": "Garage",
            "shelf_life_days": 60
        }));

        assert!(result.is_err());
    }

    #[test]
    fn test_shelf_life_accepts_whole_float() {
        let record: ItemRecord = serde_json::from_value(json!({
            "item": "Yogurt",
            "category": "Dairy",
            "shelf_life_days": 14.0
        }))
        .unwrap();

        assert_eq!(record.shelf_life_days, 14);
        assert_eq!(serde_json::to_value(&record).unwrap()["shelf_life_days"], json!(14));
    }

    #[test]
    fn test_shelf_life_rejects_fraction_and_negative() {
        for days in [json!(14.5), json!(-2), json!(-3.0), json!("14"), json!(5_000_000_000u64)] {
            let result = serde_json::from_value::<ItemRecord>(json!({
                "item": "Yogurt",
                "category": "Dairy",
                "shelf_life_days": days
            }));

            assert!(result.is_err(), "accepted {}", days);
        }
    }

    #[test]
    fn test_failure_kind_from_error() {
        let cases = [
            (Error::image("empty"), FailureKind::InvalidImage),
            (Error::Timeout(Duration::from_secs(1)), FailureKind::Timeout),
            (Error::schema("bad"), FailureKind::Schema),
            (Error::model_reported("unreadable"), FailureKind::ModelReported),
            (Error::llm("503"), FailureKind::Upstream),
        ];

        for (err, expected) in cases {
            assert_eq!(AnalysisFailure::from(err).kind, expected);
        }
    }

    #[test]
    fn test_failure_object_body() {
        let analysis = ReceiptAnalysis::Failed(AnalysisFailure {
            kind: FailureKind::Timeout,
            details: "too slow".to_string(),
        });

        assert_eq!(
            analysis.into_body(FailureFormat::Object),
            json!({"error": "Failed to analyze receipt", "kind": "timeout", "details": "too slow"})
        );
    }

    #[test]
    fn test_failure_item_list_body() {
        let analysis = ReceiptAnalysis::Failed(AnalysisFailure {
            kind: FailureKind::Parse,
            details: "eof".to_string(),
        });

        assert_eq!(
            analysis.into_body(FailureFormat::ItemList),
            json!([{
                "item": "Error parsing receipt",
                "category": "Error",
                "storage": "None",
                "shelf_life_days": 0
            }])
        );
    }
}

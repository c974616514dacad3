mod analyzer;
mod parse;
mod prompt;
mod types;

pub use analyzer::ReceiptAnalyzer;
pub use parse::{parse_items, strip_code_fences};
pub use prompt::RECEIPT_PROMPT;
pub use types::{
    AnalysisFailure, ERROR_CATEGORY, FAILURE_MESSAGE, FailureKind, ItemRecord, ReceiptAnalysis,
    Storage, UploadedImage,
};

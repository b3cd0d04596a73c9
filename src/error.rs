use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum StoreError {
    #[error("Transport error: {0}")]
    Transport(String),
    #[error("{message}")]
    Reminder { channel: String, message: String },
    #[error("Invalid value {value:?} for filter {field}")]
    #[diagnostic(help("use \"all\" to clear a filter"))]
    InvalidFilter { field: String, value: String },
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, StoreError>;

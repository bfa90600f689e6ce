use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read LAS data: {0}")]
    Las(#[from] las::Error),

    #[error("failed to read CSV data: {0}")]
    Csv(#[from] csv::Error),

    #[error("required field '{0}' is missing")]
    MissingField(&'static str),

    #[error("failed to parse field '{field}' from {value:?}")]
    InvalidField { field: &'static str, value: String },

    #[error("unsupported file extension: {0}")]
    UnsupportedExtension(String),
}

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FreshnessError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid timestamp for table {table}: {value}")]
    InvalidTimestamp { table: String, value: String },

    #[error("Metadata backend error: {0}")]
    Metadata(String),

    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for FreshnessError {
    fn from(e: serde_json::Error) -> Self {
        FreshnessError::Serialize(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, FreshnessError>;

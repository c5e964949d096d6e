use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to read results file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse analysis results: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid results structure: {0}")]
    InvalidStructure(String),

    #[error("Invalid filter pattern: {0}")]
    InvalidPattern(String),

    #[error("Malformed URL '{url}': {reason}")]
    MalformedUrl { url: String, reason: String },

    #[error("Site not found: {0}")]
    SiteNotFound(String),
}

pub type Result<T> = std::result::Result<T, Error>;

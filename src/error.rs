use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BigramError {
    #[error("Could not read corpus '{}': {source}", .path.display())]
    Input {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not write report '{}': {source}", .path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Allocation Error: {0}")]
    Allocation(String),

    #[error("CSV Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration Error: {0}")]
    Config(String),
}

pub type BgResult<T> = Result<T, BigramError>;

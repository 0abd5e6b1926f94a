use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DocfolioError {
    #[error("Could not prepare document storage: {0}")]
    StorageInit(String),

    #[error("Source file not found: {0}")]
    SourceNotFound(String),

    #[error("Copy timed out after {}s", .0.as_secs())]
    CopyTimeout(Duration),

    #[error("Copy verification failed: {} is missing", .0.display())]
    CopyVerification(PathBuf),

    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    #[error("Document not found: {0}")]
    DocumentNotFound(String),

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, DocfolioError>;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("Item not found: {0}")]
    ItemNotFound(u64),

    #[error("Entry not found: {0}")]
    EntryNotFound(u64),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, TrackerError>;

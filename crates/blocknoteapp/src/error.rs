use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum BlocknoteError {
    #[error("Note not found: {0}")]
    NoteNotFound(String),

    #[error("Block not found: {0}")]
    BlockNotFound(String),

    #[error("API error: {status} ({path})")]
    Status { status: u16, path: String },

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid edit for {kind} block {block_id}: {reason}")]
    InvalidEdit {
        block_id: Uuid,
        kind: String,
        reason: String,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Api Error: {0}")]
    Api(String),
}

impl BlocknoteError {
    /// The HTTP status carried by a non-2xx response, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            BlocknoteError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, BlocknoteError>;

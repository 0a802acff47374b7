use thiserror::Error;

/// Errors from reading or writing match files
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("a match script needs exactly 2 players, found {0}")]
    PlayerCount(usize),
}

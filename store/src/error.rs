use thiserror::Error;

#[derive(Debug, Error)]
pub enum DirectoryError {
    /// A uniqueness constraint (phone number or national ID) was violated.
    #[error("duplicate voter: {0}")]
    Conflict(String),

    #[error("voter not found: {0}")]
    NotFound(String),

    #[error("voter {0} has already voted")]
    AlreadyVoted(String),

    /// The backend could not be reached or failed to answer.
    #[error("directory unavailable: {0}")]
    Unavailable(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

use ballot_store::DirectoryError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RestError {
    #[error("request failed: {0}")]
    Request(String),

    #[error("directory returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("invalid response: {0}")]
    Decode(String),

    #[error("client setup failed: {0}")]
    Setup(String),
}

impl From<RestError> for DirectoryError {
    fn from(e: RestError) -> Self {
        match e {
            RestError::Status { status: 409, body } => DirectoryError::Conflict(body),
            RestError::Decode(msg) => DirectoryError::Serialization(msg),
            other => DirectoryError::Unavailable(other.to_string()),
        }
    }
}

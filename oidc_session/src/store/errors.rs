use thiserror::Error;

#[derive(Debug, Error, Clone)]
pub enum StoreError {
    #[error("Io error: {0}")]
    Io(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Backend error: {0}")]
    Backend(String),
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

use merkle_distributor::DistributorError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, BackendError>;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error(transparent)]
    Distributor(#[from] DistributorError),

    #[error("invalid config: {0}")]
    Config(String),

    #[error("snapshot is {actual}, expected {expected}")]
    InvalidState {
        expected: &'static str,
        actual: &'static str,
    },

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<toml::de::Error> for BackendError {
    fn from(err: toml::de::Error) -> Self {
        BackendError::Config(err.to_string())
    }
}

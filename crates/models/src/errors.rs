use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("missing parameter: {0}")]
    MissingParameter(&'static str),
    #[error("unsupported http method: {0}")]
    UnsupportedMethod(String),
    #[error("{0}")]
    Validation(String),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

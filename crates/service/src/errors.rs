use models::errors::ModelError;
use thiserror::Error;

/// Failures reported by a `RecordStore` backend.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("request throttled: {0}")]
    Throttled(String),
    #[error("table {0} not found")]
    TableNotFound(String),
    #[error("invalid parameter value: {0}")]
    InvalidParameter(String),
    /// The update guard rejected the write. `record_exists` is false when the
    /// record itself is missing rather than the field being filled.
    #[error("conditional check failed")]
    ConditionFailed { record_exists: bool },
    #[error("store error: {0}")]
    Backend(String),
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("This field has been updated by another user. Please check the current value.")]
    ConcurrentUpdate,
    #[error("No record found for name: {0}")]
    RecordNotFound(String),
    #[error(transparent)]
    Model(#[from] ModelError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ServiceError {
    /// Stable numeric code for logs
    pub fn code(&self) -> u16 {
        match self {
            ServiceError::ConcurrentUpdate => 1001,
            ServiceError::RecordNotFound(_) => 1002,
            ServiceError::Model(_) => 1101,
            ServiceError::Store(StoreError::Throttled(_)) => 1201,
            ServiceError::Store(StoreError::TableNotFound(_)) => 1202,
            ServiceError::Store(StoreError::InvalidParameter(_)) => 1203,
            ServiceError::Store(StoreError::ConditionFailed { .. }) => 1204,
            ServiceError::Store(StoreError::Backend(_)) => 1299,
        }
    }
}

use std::sync::Arc;

use models::Record;
use tracing::{error, info, instrument, warn};

use crate::errors::{ServiceError, StoreError};
use crate::observability::{CONFLICTS_TOTAL, STORE_ERRORS_TOTAL};
use crate::retry::{retry_with_policy, RetryPolicy};
use crate::store::{Consistency, RecordStore};

/// Store accessor: every call goes through the retry policy, and store
/// failures are logged and translated before they reach the dispatcher.
pub struct RecordAccessor<S: RecordStore> {
    store: Arc<S>,
    policy: RetryPolicy,
}

impl<S: RecordStore> RecordAccessor<S> {
    pub fn new(store: Arc<S>, policy: RetryPolicy) -> Self {
        Self { store, policy }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Fetch a record; `Ok(None)` when the name is unknown.
    #[instrument(skip(self), fields(table = %self.store.table_name()))]
    pub async fn fetch(&self, name: &str, consistency: Consistency) -> Result<Option<Record>, ServiceError> {
        let store = &self.store;
        retry_with_policy(&self.policy, move || store.get_record(name, consistency))
            .await
            .map_err(|e| self.store_failure(e))
    }

    /// Fill `attr` with `value` if it is still blank. A filled field comes
    /// back as `ConcurrentUpdate`, an unknown name as `RecordNotFound`.
    #[instrument(skip(self, value), fields(table = %self.store.table_name()))]
    pub async fn update_if_blank(&self, name: &str, attr: &str, value: &str) -> Result<Record, ServiceError> {
        let store = &self.store;
        let result = retry_with_policy(&self.policy, move || store.update_if_blank(name, attr, value)).await;
        match result {
            Ok(record) => {
                info!(name, attr, "attribute updated");
                Ok(record)
            }
            Err(StoreError::ConditionFailed { record_exists: true }) => {
                warn!(name, attr, "Update failed: attribute no longer empty");
                CONFLICTS_TOTAL.inc();
                Err(ServiceError::ConcurrentUpdate)
            }
            Err(StoreError::ConditionFailed { record_exists: false }) => {
                warn!(name, attr, "Update failed: record does not exist");
                Err(ServiceError::RecordNotFound(name.to_string()))
            }
            Err(e) => Err(self.store_failure(e)),
        }
    }

    fn store_failure(&self, err: StoreError) -> ServiceError {
        STORE_ERRORS_TOTAL.inc();
        match &err {
            StoreError::TableNotFound(table) => error!(%table, "Table {} not found", table),
            StoreError::InvalidParameter(detail) => error!(%detail, "Invalid parameter value"),
            other => error!(error = %other, "store call failed"),
        }
        err.into()
    }
}

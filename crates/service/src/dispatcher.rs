use std::sync::Arc;

use models::agent::{AgentEvent, AgentResponse, Method};
use models::body::ResponseBody;
use tracing::{debug, error, info, instrument};

use crate::errors::ServiceError;
use crate::observability::REQUESTS_TOTAL;
use crate::records::RecordAccessor;
use crate::retry::RetryPolicy;
use crate::store::{Consistency, RecordStore};

/// Entry point for one agent event.
///
/// READ failures from the store propagate to the caller as hard errors;
/// anything that goes wrong on the WRITE path is folded into an `ERROR`
/// body inside a normal envelope.
pub struct Dispatcher<S: RecordStore> {
    records: RecordAccessor<S>,
}

impl<S: RecordStore> Dispatcher<S> {
    pub fn new(store: Arc<S>, policy: RetryPolicy) -> Self {
        Self { records: RecordAccessor::new(store, policy) }
    }

    pub fn store(&self) -> &Arc<S> {
        self.records.store()
    }

    #[instrument(skip_all, fields(action_group = %event.action_group, api_path = %event.api_path, method = %event.http_method))]
    pub async fn handle(&self, event: &AgentEvent) -> Result<AgentResponse, ServiceError> {
        REQUESTS_TOTAL.inc();
        debug!(?event, "Input from agent");

        let name = event.record_name()?;
        let body = match event.method()? {
            Method::Get => self.read(name).await?,
            Method::Post => self.write(event, name).await,
        };

        info!(name, status = body.status(), "request handled");
        Ok(AgentResponse::for_event(event, &body)?)
    }

    async fn read(&self, name: &str) -> Result<ResponseBody, ServiceError> {
        // the initial check tolerates eventually consistent data
        match self.records.fetch(name, Consistency::Eventual).await? {
            None => Ok(ResponseBody::not_found(name)),
            Some(record) => Ok(ResponseBody::found(name, &record)),
        }
    }

    async fn write(&self, event: &AgentEvent, name: &str) -> ResponseBody {
        match self.try_write(event, name).await {
            Ok(body) => body,
            Err(e) => {
                error!(error = %e, code = e.code(), "Error occurred");
                ResponseBody::error(e)
            }
        }
    }

    async fn try_write(&self, event: &AgentEvent, name: &str) -> Result<ResponseBody, ServiceError> {
        let update = event.field_update()?;
        info!(
            attribute_name = %update.attribute_name,
            attribute_value = %update.attribute_value,
            "Found values"
        );

        let written = self
            .records
            .update_if_blank(name, &update.attribute_name, &update.attribute_value)
            .await?;
        debug!(?written, "update response");

        // confirm with a strongly consistent read
        let confirmed = self
            .records
            .fetch(name, Consistency::Strong)
            .await?
            .ok_or_else(|| ServiceError::RecordNotFound(name.to_string()))?;

        Ok(ResponseBody::updated(
            name,
            &update.attribute_name,
            &update.attribute_value,
            &confirmed,
        ))
    }
}

use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_dynamodb::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_dynamodb::operation::update_item::UpdateItemError;
use aws_sdk_dynamodb::types::{AttributeValue, ReturnValue, ReturnValuesOnConditionCheckFailure};
use aws_sdk_dynamodb::config::retry::RetryConfig;
use aws_sdk_dynamodb::config::Region;
use aws_sdk_dynamodb::{Client, Config};
use aws_smithy_types::timeout::TimeoutConfig;
use models::{AttrValue, Record, KEY_ATTRIBUTE};
use tracing::debug;

use super::{Consistency, RecordStore};
use crate::errors::StoreError;

const UPDATE_EXPRESSION: &str = "SET #attr = :val";
const CONDITION_EXPRESSION: &str =
    "attribute_exists(#key) AND (attribute_not_exists(#attr) OR #attr = :empty)";

/// Record store backed by a DynamoDB table keyed on `Name`.
#[derive(Clone)]
pub struct DynamoRecordStore {
    client: Client,
    table_name: String,
}

impl std::fmt::Debug for DynamoRecordStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DynamoRecordStore")
            .field("table_name", &self.table_name)
            .finish()
    }
}

impl DynamoRecordStore {
    /// Build a client from the shared SDK config, then apply the overrides
    /// from `StoreConfig`.
    pub fn new(sdk_config: &aws_config::SdkConfig, config: &configs::StoreConfig) -> Self {
        Self {
            client: Client::from_conf(client_config(sdk_config, config)),
            table_name: config.table_name.clone(),
        }
    }

    fn key(name: &str) -> AttributeValue {
        AttributeValue::S(name.to_string())
    }
}

/// Client config for the record table. SDK-level retries are disabled so
/// `RetryPolicy` alone decides attempt count and backoff.
pub fn client_config(sdk_config: &aws_config::SdkConfig, config: &configs::StoreConfig) -> Config {
    let mut builder = aws_sdk_dynamodb::config::Builder::from(sdk_config)
        .retry_config(RetryConfig::disabled());

    if let Some(region) = &config.region {
        builder = builder.region(Region::new(region.clone()));
    }

    // e.g. DynamoDB Local
    if let Some(endpoint) = &config.endpoint {
        builder = builder.endpoint_url(endpoint);
    }

    if let Some(timeout_ms) = config.timeout_ms {
        let timeout_config = TimeoutConfig::builder()
            .operation_timeout(Duration::from_millis(timeout_ms))
            .build();
        builder = builder.timeout_config(timeout_config);
    }

    builder.build()
}

/// Convert a DynamoDB item into a record; types other than S and N are kept as `Other`.
pub fn item_to_record(item: &HashMap<String, AttributeValue>) -> Record {
    let attributes: BTreeMap<String, AttrValue> = item
        .iter()
        .map(|(k, v)| {
            let value = match v {
                AttributeValue::S(s) => AttrValue::Text(s.clone()),
                AttributeValue::N(n) => AttrValue::Number(n.clone()),
                _ => AttrValue::Other,
            };
            (k.clone(), value)
        })
        .collect();
    Record::from_attributes(attributes)
}

/// Map an SDK failure onto the store error taxonomy by service error code.
fn classify<E>(err: &SdkError<E>, table_name: &str) -> StoreError
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
{
    let message = DisplayErrorContext(err).to_string();
    let Some(service_err) = err.as_service_error() else {
        return StoreError::Backend(message);
    };
    match service_err.code() {
        Some("ProvisionedThroughputExceededException")
        | Some("ThrottlingException")
        | Some("RequestLimitExceeded") => StoreError::Throttled(message),
        Some("ResourceNotFoundException") => StoreError::TableNotFound(table_name.to_string()),
        Some("ValidationException") => StoreError::InvalidParameter(
            service_err.message().unwrap_or("validation failed").to_string(),
        ),
        _ => StoreError::Backend(message),
    }
}

fn classify_update(err: &SdkError<UpdateItemError>, table_name: &str) -> StoreError {
    if let Some(UpdateItemError::ConditionalCheckFailedException(e)) = err.as_service_error() {
        // the old image is only returned when the record exists
        return StoreError::ConditionFailed { record_exists: e.item().is_some() };
    }
    classify(err, table_name)
}

#[async_trait]
impl RecordStore for DynamoRecordStore {
    fn table_name(&self) -> &str {
        &self.table_name
    }

    async fn get_record(&self, name: &str, consistency: Consistency) -> Result<Option<Record>, StoreError> {
        let response = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key(KEY_ATTRIBUTE, Self::key(name))
            .consistent_read(consistency.is_strong())
            .send()
            .await
            .map_err(|e| classify(&e, &self.table_name))?;

        debug!(table = %self.table_name, name, found = response.item().is_some(), "GetItem");
        Ok(response.item().map(item_to_record))
    }

    async fn update_if_blank(&self, name: &str, attr: &str, value: &str) -> Result<Record, StoreError> {
        let response = self
            .client
            .update_item()
            .table_name(&self.table_name)
            .key(KEY_ATTRIBUTE, Self::key(name))
            .update_expression(UPDATE_EXPRESSION)
            .condition_expression(CONDITION_EXPRESSION)
            .expression_attribute_names("#key", KEY_ATTRIBUTE)
            .expression_attribute_names("#attr", attr)
            .expression_attribute_values(":val", AttributeValue::S(value.to_string()))
            .expression_attribute_values(":empty", AttributeValue::S(String::new()))
            .return_values(ReturnValue::AllNew)
            .return_values_on_condition_check_failure(ReturnValuesOnConditionCheckFailure::AllOld)
            .send()
            .await
            .map_err(|e| classify_update(&e, &self.table_name))?;

        debug!(table = %self.table_name, name, attr, "UpdateItem");
        response
            .attributes()
            .map(item_to_record)
            .ok_or_else(|| StoreError::Backend("UpdateItem returned no attributes".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_to_record_maps_string_number_and_other() {
        let item = HashMap::from([
            ("Name".to_string(), AttributeValue::S("alice".into())),
            ("phone".to_string(), AttributeValue::S("".into())),
            ("age".to_string(), AttributeValue::N("42".into())),
            ("remote".to_string(), AttributeValue::Bool(true)),
        ]);
        let record = item_to_record(&item);

        assert_eq!(record.name(), Some("alice"));
        assert_eq!(record.get("age"), Some(&AttrValue::Number("42".into())));
        assert_eq!(record.get("remote"), Some(&AttrValue::Other));
        assert_eq!(record.empty_attributes(), vec!["phone".to_string()]);
    }

    fn sdk_config() -> aws_config::SdkConfig {
        aws_config::SdkConfig::builder()
            .behavior_version(aws_config::BehaviorVersion::latest())
            .build()
    }

    #[test]
    fn client_config_leaves_retries_to_the_policy() {
        let conf = client_config(&sdk_config(), &configs::StoreConfig::default());
        let retry = conf.retry_config().map(|r| r.max_attempts());
        assert_eq!(retry, Some(1));
    }

    #[test]
    fn client_config_applies_store_overrides() {
        let store = configs::StoreConfig {
            region: Some("eu-west-1".into()),
            timeout_ms: Some(1500),
            ..Default::default()
        };
        let conf = client_config(&sdk_config(), &store);
        assert_eq!(conf.region().map(|r| r.as_ref()), Some("eu-west-1"));
        let timeout = conf.timeout_config().and_then(|t| t.operation_timeout());
        assert_eq!(timeout, Some(Duration::from_millis(1500)));
        assert_eq!(conf.retry_config().map(|r| r.max_attempts()), Some(1));
    }

    #[test]
    fn condition_guards_record_existence_and_blank_field() {
        assert!(CONDITION_EXPRESSION.contains("attribute_exists(#key)"));
        assert!(CONDITION_EXPRESSION.contains("attribute_not_exists(#attr) OR #attr = :empty"));
    }
}

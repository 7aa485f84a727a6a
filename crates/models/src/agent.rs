use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::body::ResponseBody;
use crate::errors::ModelError;
use crate::record::KEY_ATTRIBUTE;

pub const MESSAGE_VERSION: &str = "1.0";
pub const JSON_CONTENT_TYPE: &str = "application/json";
pub const ATTRIBUTE_NAME_PROPERTY: &str = "attribute_name";
pub const ATTRIBUTE_VALUE_PROPERTY: &str = "attribute_value";

/// Inbound action-group event as delivered by the agent runtime.
///
/// Fields the handler does not read (`agent`, `inputText`, `sessionId`...)
/// are ignored on deserialisation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AgentEvent {
    pub action_group: String,
    pub api_path: String,
    pub http_method: String,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_body: Option<RequestBody>,
    #[serde(default)]
    pub session_attributes: Map<String, Value>,
    #[serde(default)]
    pub prompt_session_attributes: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Parameter {
    pub name: String,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    pub value: String,
}

impl Parameter {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self { name: name.into(), kind: Some("string".into()), value: value.into() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct RequestBody {
    #[serde(default)]
    pub content: HashMap<String, MediaContent>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct MediaContent {
    #[serde(default)]
    pub properties: Vec<Parameter>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// Target field and new value carried by a WRITE.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldUpdate {
    pub attribute_name: String,
    pub attribute_value: String,
}

impl AgentEvent {
    pub fn method(&self) -> Result<Method, ModelError> {
        match self.http_method.to_ascii_uppercase().as_str() {
            "GET" => Ok(Method::Get),
            "POST" => Ok(Method::Post),
            _ => Err(ModelError::UnsupportedMethod(self.http_method.clone())),
        }
    }

    /// The record name travels as the first parameter.
    pub fn record_name(&self) -> Result<&str, ModelError> {
        self.parameters
            .first()
            .map(|p| p.value.as_str())
            .ok_or(ModelError::MissingParameter("name"))
    }

    fn json_properties(&self) -> &[Parameter] {
        self.request_body
            .as_ref()
            .and_then(|b| b.content.get(JSON_CONTENT_TYPE))
            .map(|c| c.properties.as_slice())
            .unwrap_or(&[])
    }

    /// Pull `attribute_name` / `attribute_value` out of the JSON body
    /// properties. Either one missing or empty fails validation, as does
    /// targeting the key attribute.
    pub fn field_update(&self) -> Result<FieldUpdate, ModelError> {
        let mut attribute_name = None;
        let mut attribute_value = None;
        for prop in self.json_properties() {
            match prop.name.as_str() {
                ATTRIBUTE_NAME_PROPERTY => attribute_name = Some(prop.value.clone()),
                ATTRIBUTE_VALUE_PROPERTY => attribute_value = Some(prop.value.clone()),
                _ => {}
            }
        }

        match (attribute_name, attribute_value) {
            (Some(name), _) if name == KEY_ATTRIBUTE => Err(ModelError::Validation(format!(
                "{KEY_ATTRIBUTE} is the record key and cannot be updated"
            ))),
            (Some(name), Some(value)) if !name.is_empty() && !value.is_empty() => {
                Ok(FieldUpdate { attribute_name: name, attribute_value: value })
            }
            _ => Err(ModelError::Validation("Missing attribute_name or attribute_value".into())),
        }
    }
}

/// Outbound envelope returned to the agent runtime.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AgentResponse {
    pub message_version: String,
    pub response: ActionResponse,
    pub session_attributes: Map<String, Value>,
    pub prompt_session_attributes: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ActionResponse {
    pub action_group: String,
    pub api_path: String,
    pub http_method: String,
    pub http_status_code: u16,
    pub response_body: HashMap<String, ResponseContent>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResponseContent {
    /// The outcome, JSON-encoded into a string as the runtime expects.
    pub body: String,
}

impl AgentResponse {
    /// Wrap a body for the given event. The status is always 200; outcome
    /// lives in the body.
    pub fn for_event(event: &AgentEvent, body: &ResponseBody) -> Result<Self, ModelError> {
        let encoded = serde_json::to_string(body)?;
        let mut response_body = HashMap::new();
        response_body.insert(JSON_CONTENT_TYPE.to_string(), ResponseContent { body: encoded });

        Ok(Self {
            message_version: MESSAGE_VERSION.to_string(),
            response: ActionResponse {
                action_group: event.action_group.clone(),
                api_path: event.api_path.clone(),
                http_method: event.http_method.clone(),
                http_status_code: 200,
                response_body,
            },
            session_attributes: event.session_attributes.clone(),
            prompt_session_attributes: event.prompt_session_attributes.clone(),
        })
    }

    /// Decode the JSON body string back into a value.
    pub fn body_json(&self) -> Result<Value, ModelError> {
        let content = self
            .response
            .response_body
            .get(JSON_CONTENT_TYPE)
            .ok_or(ModelError::MissingParameter("responseBody.application/json"))?;
        Ok(serde_json::from_str(&content.body)?)
    }
}

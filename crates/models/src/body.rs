use serde::Serialize;
use serde_json::{Map, Value};

use crate::record::Record;

/// Outcome carried inside the envelope, tagged by `status`.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "status")]
pub enum ResponseBody {
    #[serde(rename = "NOT_FOUND")]
    NotFound { message: String },
    #[serde(rename = "SUCCESS")]
    Found {
        name: String,
        empty_attributes: Vec<String>,
        current_values: Map<String, Value>,
    },
    #[serde(rename = "SUCCESS")]
    Updated {
        message: String,
        updated_values: Map<String, Value>,
    },
    #[serde(rename = "ERROR")]
    Error { message: String },
}

impl ResponseBody {
    pub fn not_found(name: &str) -> Self {
        ResponseBody::NotFound { message: format!("No record found for name: {name}") }
    }

    pub fn found(name: &str, record: &Record) -> Self {
        ResponseBody::Found {
            name: name.to_string(),
            empty_attributes: record.empty_attributes(),
            current_values: record.current_values(),
        }
    }

    pub fn updated(name: &str, attribute: &str, value: &str, record: &Record) -> Self {
        ResponseBody::Updated {
            message: format!("Successfully updated {attribute} to {value} for {name}"),
            updated_values: record.to_json_map(),
        }
    }

    pub fn error(err: impl std::fmt::Display) -> Self {
        ResponseBody::Error { message: format!("Error updating value: {err}") }
    }

    pub fn status(&self) -> &'static str {
        match self {
            ResponseBody::NotFound { .. } => "NOT_FOUND",
            ResponseBody::Found { .. } | ResponseBody::Updated { .. } => "SUCCESS",
            ResponseBody::Error { .. } => "ERROR",
        }
    }
}

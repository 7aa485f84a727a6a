use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::attribute::AttrValue;

/// Partition key attribute of the record table.
pub const KEY_ATTRIBUTE: &str = "Name";

/// One employee record: the key plus whatever attributes the store holds.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    attributes: BTreeMap<String, AttrValue>,
}

impl Record {
    pub fn new(name: impl Into<String>) -> Self {
        let mut attributes = BTreeMap::new();
        attributes.insert(KEY_ATTRIBUTE.to_string(), AttrValue::Text(name.into()));
        Self { attributes }
    }

    pub fn from_attributes(attributes: BTreeMap<String, AttrValue>) -> Self {
        Self { attributes }
    }

    pub fn with(mut self, attr: impl Into<String>, value: AttrValue) -> Self {
        self.set(attr, value);
        self
    }

    pub fn set(&mut self, attr: impl Into<String>, value: AttrValue) {
        self.attributes.insert(attr.into(), value);
    }

    pub fn name(&self) -> Option<&str> {
        self.attributes.get(KEY_ATTRIBUTE).and_then(AttrValue::as_text)
    }

    pub fn get(&self, attr: &str) -> Option<&AttrValue> {
        self.attributes.get(attr)
    }

    /// Non-key attributes whose value is blank, in name order.
    pub fn empty_attributes(&self) -> Vec<String> {
        self.attributes
            .iter()
            .filter(|(k, v)| k.as_str() != KEY_ATTRIBUTE && v.is_blank())
            .map(|(k, _)| k.clone())
            .collect()
    }

    /// Non-key attributes that hold a value, rendered for a response body.
    pub fn current_values(&self) -> Map<String, Value> {
        self.attributes
            .iter()
            .filter(|(k, v)| k.as_str() != KEY_ATTRIBUTE && !v.is_blank())
            .map(|(k, v)| (k.clone(), v.to_json()))
            .collect()
    }

    /// Every attribute including the key.
    pub fn to_json_map(&self) -> Map<String, Value> {
        self.attributes.iter().map(|(k, v)| (k.clone(), v.to_json())).collect()
    }
}

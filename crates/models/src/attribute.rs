use serde_json::Value;

/// A single attribute value as held by the record store.
///
/// Numbers stay in the store's decimal string form so nothing is lost to
/// float conversion on the way through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue {
    Text(String),
    Number(String),
    /// Any store type other than text or number (lists, maps, booleans...).
    Other,
}

impl AttrValue {
    pub fn text(s: impl Into<String>) -> Self {
        AttrValue::Text(s.into())
    }

    pub fn number(n: impl ToString) -> Self {
        AttrValue::Number(n.to_string())
    }

    /// Text holding only whitespace counts as blank; numbers and other types never do.
    pub fn is_blank(&self) -> bool {
        match self {
            AttrValue::Text(s) => s.trim().is_empty(),
            AttrValue::Number(_) | AttrValue::Other => false,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            AttrValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// JSON view used in response bodies: text and numbers as strings, anything else as null.
    pub fn to_json(&self) -> Value {
        match self {
            AttrValue::Text(s) | AttrValue::Number(s) => Value::String(s.clone()),
            AttrValue::Other => Value::Null,
        }
    }
}

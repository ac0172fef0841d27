use indexmap::IndexMap;
use serde::Serialize;

use crate::FieldValue;

/// Value stored under one request field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum RequestValue {
    Scalar(FieldValue),
    List(Vec<FieldValue>),
}

impl RequestValue {
    pub fn as_scalar(&self) -> Option<&FieldValue> {
        match self {
            RequestValue::Scalar(value) => Some(value),
            RequestValue::List(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&[FieldValue]> {
        match self {
            RequestValue::Scalar(_) => None,
            RequestValue::List(values) => Some(values),
        }
    }

    /// Text form of the value; lists are joined with newlines.
    pub fn to_text(&self) -> String {
        match self {
            RequestValue::Scalar(value) => value.to_string(),
            RequestValue::List(values) => values
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

impl From<FieldValue> for RequestValue {
    fn from(value: FieldValue) -> Self {
        RequestValue::Scalar(value)
    }
}

/// Task request body: field names in first-seen order.
///
/// Serializes as a JSON object whose keys keep insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct TaskRequest {
    fields: IndexMap<String, RequestValue>,
}

impl TaskRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&RequestValue> {
        self.fields.get(name)
    }

    pub fn scalar(&self, name: &str) -> Option<&FieldValue> {
        self.get(name).and_then(RequestValue::as_scalar)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Replaces the value in place when the field exists, appends otherwise.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<RequestValue>) {
        self.fields.insert(name.into(), value.into());
    }

    pub fn remove(&mut self, name: &str) -> Option<RequestValue> {
        self.fields.shift_remove(name)
    }

    pub(crate) fn get_mut(&mut self, name: &str) -> Option<&mut RequestValue> {
        self.fields.get_mut(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RequestValue)> {
        self.fields.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// The `url` field as displayed in history, empty when absent.
    pub fn url(&self) -> String {
        self.get("url").map(RequestValue::to_text).unwrap_or_default()
    }
}

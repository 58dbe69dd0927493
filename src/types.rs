use std::future::Future;
use std::pin::Pin;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::SubmitError;

pub type BoxedFuture<T, E = SubmitError> = Pin<Box<dyn Future<Output = Result<T, E>>>>;

pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Flat field name to value mapping read from the form at submit time.
///
/// A repeated name overwrites the earlier value but keeps the position of
/// its first appearance. Values are strings except for file entries, which
/// serialize as `{}`.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Payload(Map<String, Value>);

impl Payload {
    pub fn new() -> Self {
        Payload(Map::new())
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.insert_value(name, Value::String(value.into()));
    }

    pub fn insert_value(&mut self, name: impl Into<String>, value: Value) {
        self.0.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).and_then(Value::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_json(&self) -> Result<String, SubmitError> {
        Ok(serde_json::to_string(self)?)
    }
}

impl<K, V> FromIterator<(K, V)> for Payload
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut payload = Payload::new();
        for (name, value) in iter {
            payload.insert(name, value);
        }
        payload
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubmitRequest {
    pub url: String,
    pub content_type: &'static str,
    pub body: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Unauthorized,
    ServerError(String),
}

/// A response whose body has not been read yet.
pub trait ServerReply {
    fn status(&self) -> u16;
    fn text(self: Box<Self>) -> BoxedFuture<String>;
}

pub trait Transport {
    fn send(&self, req: SubmitRequest) -> BoxedFuture<Box<dyn ServerReply>>;
}

/// The parts of the document the submitter writes to.
pub trait Page {
    /// Makes the element visible and replaces its text. Returns `false` when
    /// no element has that id.
    fn show_message(&self, element_id: &str, text: &str) -> bool;
}

pub trait Scheduler {
    fn reload_after(&self, delay_millis: u32);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_serializes_in_field_order() {
        let payload: Payload = [("rating", "5"), ("comment", "Great stay")]
            .into_iter()
            .collect();
        assert_eq!(
            payload.to_json().unwrap(),
            r#"{"rating":"5","comment":"Great stay"}"#
        );
    }

    #[test]
    fn repeated_field_keeps_last_value() {
        let payload: Payload = [("tag", "a"), ("stars", "4"), ("tag", "b")]
            .into_iter()
            .collect();
        assert_eq!(payload.len(), 2);
        assert_eq!(payload.get("tag"), Some("b"));
        assert_eq!(payload.to_json().unwrap(), r#"{"tag":"b","stars":"4"}"#);
    }

    #[test]
    fn empty_form_is_empty_object() {
        let payload = Payload::new();
        assert!(payload.is_empty());
        assert_eq!(payload.to_json().unwrap(), "{}");
    }
}

//! Form entries and the bind decision, kept apart from web-sys so they can
//! be exercised off the browser.

use serde_json::{Map, Value};

use crate::types::Payload;

/// The value half of a `FormData` entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    /// A `File`/`Blob` entry. It has no JSON form and is sent as `{}`.
    Blob,
}

impl FieldValue {
    fn into_json(self) -> Value {
        match self {
            FieldValue::Text(text) => Value::String(text),
            FieldValue::Blob => Value::Object(Map::new()),
        }
    }
}

/// Builds the payload from entries in document order. Every name ends up
/// in the payload, carrying the value of its last entry.
pub fn payload_from_entries<I>(entries: I) -> Payload
where
    I: IntoIterator<Item = (String, FieldValue)>,
{
    let mut payload = Payload::new();
    for (name, value) in entries {
        payload.insert_value(name, value.into_json());
    }
    payload
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Binding {
    Attach,
    NoForm,
    AlreadyBound,
}

pub fn binding_for(form_found: bool, already_bound: bool) -> Binding {
    if !form_found {
        Binding::NoForm
    } else if already_bound {
        Binding::AlreadyBound
    } else {
        Binding::Attach
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(name: &str, value: &str) -> (String, FieldValue) {
        (name.to_string(), FieldValue::Text(value.to_string()))
    }

    #[test]
    fn body_has_exactly_the_form_pairs() {
        let payload = payload_from_entries(vec![text("rating", "5"), text("comment", "Great stay")]);
        assert_eq!(
            payload.to_json().unwrap(),
            r#"{"rating":"5","comment":"Great stay"}"#
        );
    }

    #[test]
    fn file_entry_keeps_its_key_as_empty_object() {
        let payload = payload_from_entries(vec![
            text("comment", "ok"),
            ("poster".to_string(), FieldValue::Blob),
        ]);
        assert_eq!(payload.len(), 2);
        assert_eq!(payload.to_json().unwrap(), r#"{"comment":"ok","poster":{}}"#);
    }

    #[test]
    fn later_file_entry_overrides_text_with_same_name() {
        let payload = payload_from_entries(vec![
            text("poster", "none"),
            text("stars", "3"),
            ("poster".to_string(), FieldValue::Blob),
        ]);
        assert_eq!(payload.get("poster"), None);
        assert_eq!(payload.to_json().unwrap(), r#"{"poster":{},"stars":"3"}"#);
    }

    #[test]
    fn empty_form_sends_empty_object() {
        let payload = payload_from_entries(Vec::new());
        assert_eq!(payload.to_json().unwrap(), "{}");
    }

    #[test]
    fn absent_form_is_not_attached() {
        assert_eq!(binding_for(false, false), Binding::NoForm);
        assert_eq!(binding_for(false, true), Binding::NoForm);
    }

    #[test]
    fn bound_form_is_not_attached_twice() {
        assert_eq!(binding_for(true, true), Binding::AlreadyBound);
        assert_eq!(binding_for(true, false), Binding::Attach);
    }
}

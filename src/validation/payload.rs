//! Structural parsing of request bodies.
//!
//! A [`RawRequest`] is what the transport hands to a pipeline: the declared
//! content type and the undecoded body. [`parse_json`] and
//! [`require_object`] are the first stages of every body-carrying pipeline.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::control::{Fault, Outcome};

/// Media type every body-carrying endpoint expects.
pub const JSON_MEDIA_TYPE: &str = "application/json";

/// A request body as received from the transport.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRequest {
    /// Declared `Content-Type`, if any.
    pub content_type: Option<String>,
    /// Undecoded body bytes.
    pub body: Vec<u8>,
}

impl RawRequest {
    /// Creates a request with an explicit content type.
    #[must_use]
    pub fn new(content_type: Option<String>, body: impl Into<Vec<u8>>) -> Self {
        Self {
            content_type,
            body: body.into(),
        }
    }

    /// Creates a request declared as JSON.
    #[must_use]
    pub fn json(body: impl Into<Vec<u8>>) -> Self {
        Self::new(Some(JSON_MEDIA_TYPE.to_string()), body)
    }

    /// Creates a JSON request from an already-built value.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        Self::json(value.to_string())
    }

    /// Returns `true` when the declared content type is JSON.
    ///
    /// Parameters such as `charset` are ignored, and `+json` suffixes count.
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.content_type.as_deref().is_some_and(|declared| {
            let essence = declared
                .split(';')
                .next()
                .unwrap_or_default()
                .trim()
                .to_ascii_lowercase();
            essence == JSON_MEDIA_TYPE || essence.ends_with("+json")
        })
    }
}

/// Structural failures: the body is not a usable JSON document.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PayloadError {
    /// The request did not declare a JSON body.
    #[error("El contenido debe ser JSON")]
    NotJson,
    /// The body was missing, malformed, `null`, or an empty object.
    #[error("No se recibieron datos JSON válidos")]
    Empty,
    /// The body was JSON but not an object.
    #[error("Datos inválidos")]
    NotAnObject,
    /// A fault raised while parsing.
    #[error("{0}")]
    Fault(Fault),
}

impl From<Fault> for PayloadError {
    fn from(fault: Fault) -> Self {
        Self::Fault(fault)
    }
}

/// Decodes the body as JSON.
///
/// # Errors
///
/// - [`PayloadError::NotJson`] if the content type is not JSON.
/// - [`PayloadError::Empty`] if the body does not decode or decodes to `null`.
pub fn parse_json(request: &RawRequest) -> Outcome<Value, PayloadError> {
    if !request.is_json() {
        return Outcome::failure(PayloadError::NotJson);
    }
    match serde_json::from_slice::<Value>(&request.body) {
        Ok(Value::Null) | Err(_) => Outcome::failure(PayloadError::Empty),
        Ok(value) => Outcome::success(value),
    }
}

/// Requires the decoded document to be a JSON object.
///
/// # Errors
///
/// Returns [`PayloadError::NotAnObject`] for any other JSON type.
pub fn require_object(value: Value) -> Outcome<Map<String, Value>, PayloadError> {
    match value {
        Value::Object(object) => Outcome::success(object),
        _ => Outcome::failure(PayloadError::NotAnObject),
    }
}

/// Deserializes an object into a typed payload structure.
///
/// Payload structures are built from `Option<FieldValue>` fields, so any
/// object decodes; a failure here means the structure itself is unusable.
pub(crate) fn decode_object<P>(object: Map<String, Value>) -> Outcome<P, PayloadError>
where
    P: for<'de> Deserialize<'de>,
{
    serde_json::from_value(Value::Object(object))
        .map_err(|_| PayloadError::NotAnObject)
        .into()
}

// =============================================================================
// FieldValue
// =============================================================================

/// A single payload field before domain validation.
///
/// `null` and absent fields are both represented by `Option::None` on the
/// enclosing payload structure.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// A JSON string.
    Text(String),
    /// A JSON number.
    Number(f64),
    /// Any other JSON value.
    Other(Value),
}

impl FieldValue {
    /// Returns the text, if this is a string.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Number(_) | Self::Other(_) => None,
        }
    }

    /// Returns `true` for strings that are empty after trimming.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.as_text().is_some_and(|text| text.trim().is_empty())
    }
}

/// Returns `true` when a field is absent, `null`, or blank text.
#[must_use]
pub fn is_missing(field: Option<&FieldValue>) -> bool {
    field.is_none_or(FieldValue::is_blank)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(Some("application/json"), true)]
    #[case(Some("application/json; charset=utf-8"), true)]
    #[case(Some("Application/JSON"), true)]
    #[case(Some("application/problem+json"), true)]
    #[case(Some("text/plain"), false)]
    #[case(None, false)]
    fn test_is_json(#[case] content_type: Option<&str>, #[case] expected: bool) {
        let request = RawRequest::new(content_type.map(str::to_string), "{}");
        assert_eq!(request.is_json(), expected);
    }

    #[rstest]
    fn test_parse_json_success() {
        let outcome = parse_json(&RawRequest::json(r#"{"key":"value"}"#));
        assert_eq!(outcome, Outcome::Ok(json!({"key": "value"})));
    }

    #[rstest]
    fn test_parse_json_rejects_non_json_content() {
        let request = RawRequest::new(Some("text/plain".to_string()), "{}");
        let outcome = parse_json(&request);
        assert_eq!(outcome.unwrap_err_message(), "El contenido debe ser JSON");
    }

    #[rstest]
    #[case("")]
    #[case("null")]
    #[case("{not json")]
    fn test_parse_json_rejects_empty_body(#[case] body: &str) {
        let outcome = parse_json(&RawRequest::json(body));
        assert_eq!(outcome, Outcome::Err(PayloadError::Empty));
        assert_eq!(
            outcome.unwrap_err_message(),
            "No se recibieron datos JSON válidos"
        );
    }

    #[rstest]
    fn test_require_object_rejects_array() {
        let outcome = require_object(json!([1, 2, 3]));
        assert_eq!(outcome.unwrap_err_message(), "Datos inválidos");
    }

    #[rstest]
    #[case(json!("empleo"), FieldValue::Text("empleo".to_string()))]
    #[case(json!(3_000_000), FieldValue::Number(3_000_000.0))]
    #[case(json!(true), FieldValue::Other(json!(true)))]
    fn test_field_value_decoding(#[case] input: Value, #[case] expected: FieldValue) {
        let decoded: FieldValue = serde_json::from_value(input).unwrap();
        assert_eq!(decoded, expected);
    }

    #[rstest]
    fn test_is_missing() {
        assert!(is_missing(None));
        assert!(is_missing(Some(&FieldValue::Text("  ".to_string()))));
        assert!(!is_missing(Some(&FieldValue::Number(0.0))));
    }
}

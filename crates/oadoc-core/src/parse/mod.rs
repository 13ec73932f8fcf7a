pub mod components;
pub mod content;
pub mod document;
pub mod lenient;
pub mod operation;
pub mod parameter;
pub mod ref_resolve;
pub mod reference;
pub mod security;
pub mod server;

use log::debug;
use serde_json::Value;

use crate::error::ParseError;
use document::ApiDocument;
use operation::BareOperation;

/// A parsed input: either a full API description or one bare operation object.
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    Document(Box<ApiDocument>),
    Operation(Box<BareOperation>),
}

/// Parse an input document from YAML.
pub fn from_yaml(input: &str) -> Result<Input, ParseError> {
    let value: Value = serde_yaml_ng::from_str(input)?;
    from_value(value)
}

/// Parse an input document from JSON.
pub fn from_json(input: &str) -> Result<Input, ParseError> {
    let value: Value = serde_json::from_str(input)?;
    from_value(value)
}

/// Classify an already-parsed value and deserialize it into the matching input shape.
///
/// A value with a truthy `openapi` and a truthy `info` field is a full API document;
/// any other object is treated as a single operation.
pub fn from_value(value: Value) -> Result<Input, ParseError> {
    let Value::Object(ref fields) = value else {
        return Err(ParseError::NotAnObject(value_kind(&value)));
    };

    if is_truthy(fields.get("openapi")) && is_truthy(fields.get("info")) {
        debug!("input has `openapi` and `info`, reading as API document");
        let document: ApiDocument = serde_json::from_value(value).map_err(ParseError::Shape)?;
        Ok(Input::Document(Box::new(document)))
    } else {
        debug!("input is not an API document, reading as bare operation");
        let operation: BareOperation =
            serde_json::from_value(value).map_err(ParseError::Shape)?;
        Ok(Input::Operation(Box::new(operation)))
    }
}

/// JavaScript-style truthiness: absent, `null`, `false`, `0` and `""` are falsy.
fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::lenient;

/// An API parameter. The location is kept as a plain string so that
/// Swagger 2 `body`/`formData` parameters pass through unchanged.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Parameter {
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(
        rename = "in",
        default,
        deserialize_with = "lenient::string",
        skip_serializing_if = "Option::is_none"
    )]
    pub location: Option<String>,

    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, deserialize_with = "lenient::flag")]
    pub required: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<serde_json::Value>,

    /// Swagger 2 inline type, used when there is no `schema`.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub param_type: Option<serde_json::Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<serde_json::Value>,

    #[serde(
        default,
        deserialize_with = "lenient::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub examples: Option<IndexMap<String, serde_json::Value>>,
}

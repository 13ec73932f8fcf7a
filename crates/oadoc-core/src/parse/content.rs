use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::lenient;

/// Content entries keyed by media type, in declaration order.
pub type Content = IndexMap<String, MediaType>;

/// One media type entry. Schemas and examples are carried as opaque JSON.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MediaType {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<Value>,

    #[serde(default, deserialize_with = "lenient::map", skip_serializing_if = "IndexMap::is_empty")]
    pub examples: IndexMap<String, Value>,
}

impl MediaType {
    /// Values of the named `examples`, in key order; `None` when there are none.
    pub fn named_examples(&self) -> Option<Vec<Value>> {
        if self.examples.is_empty() {
            None
        } else {
            Some(self.examples.values().cloned().collect())
        }
    }

    /// Named examples, else the single `example`.
    pub fn example_values(&self) -> Option<Vec<Value>> {
        self.named_examples()
            .or_else(|| self.example.clone().map(|example| vec![example]))
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RequestBody {
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, deserialize_with = "lenient::map", skip_serializing_if = "IndexMap::is_empty")]
    pub content: Content,

    #[serde(
        default,
        deserialize_with = "lenient::optional_flag",
        skip_serializing_if = "Option::is_none"
    )]
    pub required: Option<bool>,
}

impl RequestBody {
    /// Schema of the first declared media type, which body parameters are derived from.
    pub fn first_schema(&self) -> Option<&Value> {
        self.content.values().next()?.schema.as_ref()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Response {
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, deserialize_with = "lenient::map", skip_serializing_if = "IndexMap::is_empty")]
    pub content: Content,
}

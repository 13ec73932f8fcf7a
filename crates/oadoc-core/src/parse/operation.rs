use indexmap::IndexMap;
use log::warn;
use serde::Deserializer;
use serde_json::Value;
use serde::{Deserialize, Serialize};

use super::content::{RequestBody, Response};
use super::lenient;
use super::parameter::Parameter;
use super::reference::MaybeRef;
use super::security::SecurityRequirement;

/// An API operation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Operation {
    #[serde(
        rename = "operationId",
        default,
        deserialize_with = "lenient::string",
        skip_serializing_if = "Option::is_none"
    )]
    pub operation_id: Option<String>,

    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, deserialize_with = "lenient::strings", skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    #[serde(default, deserialize_with = "lenient::list", skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<MaybeRef<Parameter>>,

    #[serde(
        rename = "requestBody",
        default,
        deserialize_with = "lenient::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub request_body: Option<MaybeRef<RequestBody>>,

    #[serde(default, deserialize_with = "lenient::map", skip_serializing_if = "IndexMap::is_empty")]
    pub responses: IndexMap<String, MaybeRef<Response>>,

    #[serde(
        default,
        deserialize_with = "lenient::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub security: Option<Vec<SecurityRequirement>>,
}

/// A standalone operation object that also names its own method and path.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BareOperation {
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,

    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    #[serde(flatten)]
    pub operation: Operation,
}

/// One entry of a path item: an operation object, or any other field
/// (`summary`, `servers`, `$ref`, extensions).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PathEntry {
    Operation(Box<Operation>),
    Other(Value),
}

/// Any object reads as an operation, so one malformed field never drops an
/// operation from its tag section.
impl<'de> Deserialize<'de> for PathEntry {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        if !value.is_object() {
            return Ok(PathEntry::Other(value));
        }
        match serde_json::from_value::<Operation>(value.clone()) {
            Ok(operation) => Ok(PathEntry::Operation(Box::new(operation))),
            Err(err) => {
                warn!("path entry is not a readable operation: {err}");
                Ok(PathEntry::Other(value))
            }
        }
    }
}

/// A path item. Entries keep their declaration order, so operations are
/// visited in the order the document lists the methods.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PathItem {
    #[serde(default, deserialize_with = "lenient::list", skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<MaybeRef<Parameter>>,

    #[serde(flatten)]
    pub entries: IndexMap<String, PathEntry>,
}

impl PathItem {
    /// Operations of this path item in declaration order, keyed by method.
    pub fn operations(&self) -> impl Iterator<Item = (&str, &Operation)> {
        self.entries
            .iter()
            .filter_map(|(method, entry)| match entry {
                PathEntry::Operation(op) => Some((method.as_str(), op.as_ref())),
                PathEntry::Other(_) => None,
            })
    }
}

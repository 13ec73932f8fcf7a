use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::content::{RequestBody, Response};
use super::lenient;
use super::parameter::Parameter;
use super::reference::MaybeRef;
use super::security::SecurityScheme;

/// The reusable definitions `$ref` pointers are resolved against. Only the
/// sections the transform dereferences are modelled; `examples`, `headers`,
/// `links` and `callbacks` are ignored.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Components {
    #[serde(default, deserialize_with = "lenient::map", skip_serializing_if = "IndexMap::is_empty")]
    pub schemas: IndexMap<String, Value>,

    #[serde(default, deserialize_with = "lenient::map", skip_serializing_if = "IndexMap::is_empty")]
    pub parameters: IndexMap<String, MaybeRef<Parameter>>,

    #[serde(default, deserialize_with = "lenient::map", skip_serializing_if = "IndexMap::is_empty")]
    pub request_bodies: IndexMap<String, MaybeRef<RequestBody>>,

    #[serde(default, deserialize_with = "lenient::map", skip_serializing_if = "IndexMap::is_empty")]
    pub responses: IndexMap<String, MaybeRef<Response>>,

    #[serde(default, deserialize_with = "lenient::map", skip_serializing_if = "IndexMap::is_empty")]
    pub security_schemes: IndexMap<String, SecurityScheme>,
}

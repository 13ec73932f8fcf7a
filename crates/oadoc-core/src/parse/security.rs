use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::lenient;

/// A security scheme type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SecuritySchemeType {
    ApiKey,
    Http,
    #[serde(rename = "oauth2")]
    OAuth2,
    OpenIdConnect,
    MutualTLS,
    #[default]
    #[serde(other)]
    Unknown,
}

impl SecuritySchemeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SecuritySchemeType::ApiKey => "apiKey",
            SecuritySchemeType::Http => "http",
            SecuritySchemeType::OAuth2 => "oauth2",
            SecuritySchemeType::OpenIdConnect => "openIdConnect",
            SecuritySchemeType::MutualTLS => "mutualTLS",
            SecuritySchemeType::Unknown => "unknown",
        }
    }
}

/// A security scheme definition. Only its type is shown, next to each
/// requirement that names it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SecurityScheme {
    #[serde(rename = "type", default, deserialize_with = "lenient::or_default")]
    pub scheme_type: SecuritySchemeType,
}

/// A security requirement: map of scheme name → required scopes.
pub type SecurityRequirement = IndexMap<String, Vec<String>>;

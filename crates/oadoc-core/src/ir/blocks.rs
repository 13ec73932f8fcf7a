use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One node of the document tree. Serialized with a `type` discriminant so
/// templates can dispatch on it; `Section` is the only variant with children.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Block {
    #[serde(rename = "section")]
    Section(Section),
    #[serde(rename = "overview.meta")]
    OverviewMeta(OverviewMeta),
    #[serde(rename = "overview.description")]
    OverviewDescription(Description),
    #[serde(rename = "overview.servers")]
    Servers(ServerBlock),
    #[serde(rename = "op.header")]
    OpHeader(OpHeader),
    #[serde(rename = "op.description")]
    OpDescription(Description),
    #[serde(rename = "op.parameters")]
    Parameters(ParameterBlock),
    #[serde(rename = "op.requestBody")]
    RequestBody(RequestBodyBlock),
    #[serde(rename = "op.example")]
    Example(ExampleBlock),
    #[serde(rename = "op.responses")]
    Responses(ResponseBlock),
    #[serde(rename = "op.security")]
    Security(SecurityBlock),
}

impl Block {
    /// The `type` tag this block serializes with.
    pub fn type_name(&self) -> &'static str {
        match self {
            Block::Section(_) => "section",
            Block::OverviewMeta(_) => "overview.meta",
            Block::OverviewDescription(_) => "overview.description",
            Block::Servers(_) => "overview.servers",
            Block::OpHeader(_) => "op.header",
            Block::OpDescription(_) => "op.description",
            Block::Parameters(_) => "op.parameters",
            Block::RequestBody(_) => "op.requestBody",
            Block::Example(_) => "op.example",
            Block::Responses(_) => "op.responses",
            Block::Security(_) => "op.security",
        }
    }

    pub fn as_section(&self) -> Option<&Section> {
        match self {
            Block::Section(section) => Some(section),
            _ => None,
        }
    }
}

/// Structural grouping. `level` is the 1-based nesting depth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub title: String,
    pub level: usize,
    pub children: Vec<Block>,
}

/// Free-form narrative text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Description {
    pub body: String,
}

/// Top-level API metadata.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<LicenseInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terms_of_service: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicenseInfo {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerBlock {
    pub servers: Vec<ServerEntry>,
}

/// A server base URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerEntry {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub variables: IndexMap<String, ServerVariableEntry>,
}

/// A substitution variable in a server URL template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerVariableEntry {
    pub default: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "enum", default, skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<Value>,
}

/// Heading of a single-operation page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpHeader {
    pub title: String,
    pub method: String,
    pub path: String,
    pub operation_id: String,
}

/// Parameters grouped by location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterBlock {
    pub groups: Vec<ParameterGroup>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterGroup {
    #[serde(rename = "in")]
    pub location: String,
    pub title: String,
    pub items: Vec<ParamItem>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemKind {
    #[default]
    #[serde(rename = "param")]
    Param,
}

/// One documented parameter or request body property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamItem {
    #[serde(default)]
    pub kind: ItemKind,
    pub name: String,
    #[serde(rename = "in")]
    pub location: String,
    pub required: bool,
    pub description: String,
    /// Opaque schema of the value.
    #[serde(rename = "type")]
    pub param_type: Value,
    pub examples: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestBodyBlock {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    pub media_types: Vec<MediaTypeItem>,
}

/// A schema qualified by its content type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaTypeItem {
    pub media_type: String,
    pub schema: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExampleBlock {
    pub media_type: String,
    pub examples: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseBlock {
    pub responses: Vec<ResponseEntry>,
}

/// One status code. `primary` is absent when the response has no content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseEntry {
    pub status: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary: Option<MediaTypeItem>,
    #[serde(default)]
    pub alternates: Vec<MediaTypeItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityBlock {
    pub requirements: Vec<SecurityRequirementItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityRequirementItem {
    pub name: String,
    pub scopes: Vec<String>,
    /// Type of the matching security scheme, when the document declares one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheme_type: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_block_tags() {
        let block = Block::OpHeader(OpHeader {
            title: "List pets".to_string(),
            method: "GET".to_string(),
            path: "/pets".to_string(),
            operation_id: "listPets".to_string(),
        });
        let value = serde_json::to_value(&block).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "op.header",
                "title": "List pets",
                "method": "GET",
                "path": "/pets",
                "operationId": "listPets"
            })
        );
        assert_eq!(block.type_name(), "op.header");
    }

    #[test]
    fn test_absent_primary_is_omitted() {
        let entry = ResponseEntry {
            status: "204".to_string(),
            description: String::new(),
            primary: None,
            alternates: Vec::new(),
        };
        let value = serde_json::to_value(&entry).unwrap();
        assert!(value.get("primary").is_none());
        assert_eq!(value["alternates"], json!([]));
    }

    #[test]
    fn test_legacy_null_primary_reads_as_absent() {
        let entry: ResponseEntry = serde_json::from_value(json!({
            "status": "403",
            "description": "",
            "primary": null,
            "alternates": []
        }))
        .unwrap();
        assert!(entry.primary.is_none());
    }

    #[test]
    fn test_param_item_shape() {
        let item = ParamItem {
            kind: ItemKind::Param,
            name: "status".to_string(),
            location: "query".to_string(),
            required: true,
            description: String::new(),
            param_type: json!({ "type": "string" }),
            examples: vec![json!("available")],
        };
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["kind"], "param");
        assert_eq!(value["in"], "query");
        assert_eq!(value["type"], json!({ "type": "string" }));
    }

    #[test]
    fn test_section_round_trip() {
        let tree = Block::Section(Section {
            title: "Root".to_string(),
            level: 1,
            children: vec![
                Block::OverviewDescription(Description {
                    body: "Hello".to_string(),
                }),
                Block::Security(SecurityBlock {
                    requirements: vec![SecurityRequirementItem {
                        name: "api_key".to_string(),
                        scopes: vec![],
                        scheme_type: Some("apiKey".to_string()),
                    }],
                }),
            ],
        });
        let text = serde_json::to_string(&tree).unwrap();
        let back: Block = serde_json::from_str(&text).unwrap();
        assert_eq!(back, tree);
    }
}

use std::borrow::Cow;

use indexmap::IndexMap;
use log::debug;
use serde_json::Value;

use super::parameters::{empty_object, group_parameters};
use super::section::Depth;
use super::{Context, non_empty};
use crate::error::{ResolveError, TransformError};
use crate::ir::*;
use crate::parse::content::{Content, RequestBody, Response};
use crate::parse::operation::Operation;
use crate::parse::parameter::Parameter;
use crate::parse::ref_resolve::RefResolver;
use crate::parse::reference::MaybeRef;
use crate::parse::security::SecurityRequirement;

/// An operation together with where it lives in the document.
#[derive(Debug, Clone, Copy)]
pub struct OperationRef<'a> {
    pub path: &'a str,
    pub method: &'a str,
    pub operation: &'a Operation,
    /// Parameters declared on the enclosing path item.
    pub path_parameters: &'a [MaybeRef<Parameter>],
}

/// Build the section documenting one operation. Children always come in the
/// same order: description, parameters, request body, responses, security.
pub fn build_operation_section(
    ctx: &Context<'_>,
    depth: Depth,
    op_ref: OperationRef<'_>,
) -> Result<Block, TransformError> {
    let op = op_ref.operation;
    let title = non_empty(op.summary.as_deref())
        .or(non_empty(op.operation_id.as_deref()))
        .map(str::to_string)
        .unwrap_or_else(|| format!("{} {}", op_ref.method.to_uppercase(), op_ref.path));

    depth.section(title, |_| {
        let mut children = Vec::new();

        if let Some(description) = non_empty(op.description.as_deref()) {
            children.push(Block::OverviewDescription(Description {
                body: description.to_string(),
            }));
        }

        let declared: Vec<&MaybeRef<Parameter>> = if ctx.options.path_parameters {
            op_ref.path_parameters.iter().chain(&op.parameters).collect()
        } else {
            op.parameters.iter().collect()
        };
        let parameters = resolve_parameters(ctx, declared)?;
        if !parameters.is_empty() {
            children.push(Block::Parameters(group_parameters(&parameters)));
        }

        if let Some(ref body) = op.request_body {
            children.extend(request_body_blocks(ctx, body)?);
        }

        children.extend(response_blocks(ctx, &op.responses)?);

        if let Some(security) = effective_security(ctx, op) {
            children.extend(security_block(ctx, security));
        }

        Ok(children)
    })
}

/// Borrow an inline object or look its `$ref` up. An unresolvable reference
/// degrades to the default object under the lenient policies.
fn dereference<'a, T: Clone + Default>(
    ctx: &Context<'a>,
    item: &'a MaybeRef<T>,
    lookup: impl FnOnce(&RefResolver<'a>, &str) -> Result<&'a T, ResolveError>,
) -> Result<Cow<'a, T>, TransformError> {
    match item {
        MaybeRef::Inline(value) => Ok(Cow::Borrowed(value)),
        MaybeRef::Ref { ref_path } => Ok(ctx
            .lenient(lookup(&ctx.resolver, ref_path))?
            .map(Cow::Borrowed)
            .unwrap_or_default()),
    }
}

/// Dereference `$ref` parameters; a degraded one is left for the grouper to
/// fill with defaults.
pub(crate) fn resolve_parameters<'a>(
    ctx: &Context<'a>,
    declared: impl IntoIterator<Item = &'a MaybeRef<Parameter>>,
) -> Result<Vec<Parameter>, TransformError> {
    declared
        .into_iter()
        .map(|param| dereference(ctx, param, RefResolver::parameter).map(Cow::into_owned))
        .collect()
}

pub(crate) fn resolve_response<'a>(
    ctx: &Context<'a>,
    response: &'a MaybeRef<Response>,
) -> Result<Cow<'a, Response>, TransformError> {
    dereference(ctx, response, RefResolver::response)
}

/// The request body block, then body-derived parameters from the first media
/// type's schema, then one example block per media type with named examples.
fn request_body_blocks<'a>(
    ctx: &Context<'a>,
    body: &'a MaybeRef<RequestBody>,
) -> Result<Vec<Block>, TransformError> {
    let body = dereference(ctx, body, RefResolver::request_body)?;
    let mut blocks = vec![Block::RequestBody(RequestBodyBlock {
        description: body.description.clone(),
        required: body.required,
        media_types: media_type_items(&body.content),
    })];

    if let Some(schema) = body.first_schema() {
        let resolved = match schema.get("$ref").and_then(Value::as_str) {
            Some(ref_path) => ctx.lenient(ctx.resolver.schema(ref_path))?,
            None => Some(schema),
        };
        if let Some(items) = resolved.map(body_parameters).filter(|items| !items.is_empty()) {
            blocks.push(Block::Parameters(ParameterBlock {
                groups: vec![ParameterGroup {
                    location: "body".to_string(),
                    title: "Body".to_string(),
                    items,
                }],
            }));
        }
    }

    for (media_type, content) in &body.content {
        if let Some(examples) = content.named_examples() {
            blocks.push(Block::Example(ExampleBlock {
                media_type: media_type.clone(),
                examples,
            }));
        }
    }

    Ok(blocks)
}

/// One parameter per schema property, in declaration order.
fn body_parameters(schema: &Value) -> Vec<ParamItem> {
    let Some(properties) = schema.get("properties").and_then(Value::as_object) else {
        return Vec::new();
    };
    let required: Vec<&str> = schema
        .get("required")
        .and_then(Value::as_array)
        .map(|names| names.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default();

    properties
        .iter()
        .map(|(name, property)| ParamItem {
            kind: ItemKind::Param,
            name: name.clone(),
            location: "body".to_string(),
            required: required.contains(&name.as_str()),
            description: property
                .get("description")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            param_type: property.clone(),
            examples: property
                .get("example")
                .filter(|example| !example.is_null())
                .map(|example| vec![example.clone()])
                .unwrap_or_default(),
        })
        .collect()
}

/// Example blocks for every response media type, followed by one aggregate
/// response block.
fn response_blocks<'a>(
    ctx: &Context<'a>,
    responses: &'a IndexMap<String, MaybeRef<Response>>,
) -> Result<Vec<Block>, TransformError> {
    let mut examples = Vec::new();
    let mut entries = Vec::with_capacity(responses.len());

    for (status, response) in responses {
        let response = resolve_response(ctx, response)?;
        entries.push(response_entry(status, &response));
        examples.extend(response_examples(&response).map(Block::Example));
    }

    let mut blocks = examples;
    if !entries.is_empty() {
        blocks.push(Block::Responses(ResponseBlock { responses: entries }));
    }
    Ok(blocks)
}

/// The first media type is the primary one; the rest are alternates.
pub(crate) fn response_entry(status: &str, response: &Response) -> ResponseEntry {
    let mut items = media_type_items(&response.content).into_iter();
    ResponseEntry {
        status: status.to_string(),
        description: response.description.clone().unwrap_or_default(),
        primary: items.next(),
        alternates: items.collect(),
    }
}

fn response_examples(response: &Response) -> impl Iterator<Item = ExampleBlock> + '_ {
    response
        .content
        .iter()
        .filter_map(|(media_type, content)| {
            Some(ExampleBlock {
                media_type: media_type.clone(),
                examples: content.example_values()?,
            })
        })
}

fn media_type_items(content: &Content) -> Vec<MediaTypeItem> {
    content
        .iter()
        .map(|(media_type, mt)| MediaTypeItem {
            media_type: media_type.clone(),
            schema: mt.schema.clone().unwrap_or_else(empty_object),
        })
        .collect()
}

fn effective_security<'a>(
    ctx: &Context<'a>,
    op: &'a Operation,
) -> Option<&'a [SecurityRequirement]> {
    match (&op.security, ctx.document) {
        (Some(security), _) => Some(security.as_slice()),
        (None, Some(document)) if ctx.options.inherit_security => {
            debug!("operation has no security, inheriting document-level requirements");
            document.security.as_deref()
        }
        _ => None,
    }
}

/// Flatten requirement objects into `(name, scopes)` pairs; `None` when there are none.
pub(crate) fn security_block(
    ctx: &Context<'_>,
    security: &[SecurityRequirement],
) -> Option<Block> {
    let requirements: Vec<SecurityRequirementItem> = security
        .iter()
        .flat_map(|requirement| requirement.iter())
        .map(|(name, scopes)| SecurityRequirementItem {
            name: name.clone(),
            scopes: scopes.clone(),
            scheme_type: ctx.resolver.security_scheme_type(name).map(str::to_string),
        })
        .collect();

    if requirements.is_empty() {
        None
    } else {
        Some(Block::Security(SecurityBlock { requirements }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::TransformOptions;
    use serde_json::json;

    fn operation(value: Value) -> Operation {
        serde_json::from_value(value).unwrap()
    }

    fn build(ctx: &Context<'_>, op: &Operation) -> Section {
        let block = build_operation_section(
            ctx,
            Depth::root().child().child(),
            OperationRef {
                path: "/pets",
                method: "get",
                operation: op,
                path_parameters: &[],
            },
        )
        .unwrap();
        match block {
            Block::Section(section) => section,
            other => panic!("expected section, got {}", other.type_name()),
        }
    }

    fn types(section: &Section) -> Vec<&'static str> {
        section.children.iter().map(Block::type_name).collect()
    }

    #[test]
    fn test_title_precedence() {
        let options = TransformOptions::default();
        let ctx = Context::detached(&options);

        let s = build(&ctx, &operation(json!({ "summary": "List", "operationId": "listPets" })));
        assert_eq!(s.title, "List");
        assert_eq!(s.level, 3);

        let s = build(&ctx, &operation(json!({ "operationId": "listPets" })));
        assert_eq!(s.title, "listPets");

        let s = build(&ctx, &operation(json!({ "summary": "" })));
        assert_eq!(s.title, "GET /pets");
    }

    #[test]
    fn test_fixed_child_order() {
        let options = TransformOptions::default();
        let ctx = Context::detached(&options);
        let op = operation(json!({
            "security": [{ "petstore_auth": ["write:pets"] }],
            "responses": {
                "200": {
                    "description": "OK",
                    "content": { "application/json": { "example": { "id": 1 } } }
                }
            },
            "requestBody": {
                "content": {
                    "application/json": {
                        "schema": { "properties": { "id": {} } },
                        "examples": { "one": { "value": { "id": 1 } } }
                    }
                }
            },
            "parameters": [{ "name": "limit", "in": "query" }],
            "description": "Lists pets"
        }));

        let s = build(&ctx, &op);
        assert_eq!(
            types(&s),
            vec![
                "overview.description",
                "op.parameters",
                "op.requestBody",
                "op.parameters",
                "op.example",
                "op.example",
                "op.responses",
                "op.security",
            ]
        );
    }

    #[test]
    fn test_response_primary_and_alternates() {
        let options = TransformOptions::default();
        let ctx = Context::detached(&options);
        let op = operation(json!({
            "responses": {
                "200": {
                    "description": "OK",
                    "content": {
                        "application/json": { "schema": { "type": "object" } },
                        "application/xml": {}
                    }
                },
                "404": { "description": "Not found" }
            }
        }));

        let s = build(&ctx, &op);
        let Block::Responses(block) = &s.children[0] else {
            panic!("expected responses block");
        };
        let ok = &block.responses[0];
        let primary = ok.primary.as_ref().unwrap();
        assert_eq!(primary.media_type, "application/json");
        assert_eq!(primary.schema, json!({ "type": "object" }));
        assert_eq!(ok.alternates.len(), 1);
        assert_eq!(ok.alternates[0].media_type, "application/xml");
        assert_eq!(ok.alternates[0].schema, json!({}));

        let missing = &block.responses[1];
        assert!(missing.primary.is_none());
        assert!(missing.alternates.is_empty());
    }

    #[test]
    fn test_response_examples_prefer_named() {
        let options = TransformOptions::default();
        let ctx = Context::detached(&options);
        let op = operation(json!({
            "responses": {
                "200": {
                    "content": {
                        "application/json": {
                            "example": "ignored",
                            "examples": { "a": { "value": 1 } }
                        },
                        "text/plain": { "example": "pong" },
                        "application/xml": {}
                    }
                }
            }
        }));

        let s = build(&ctx, &op);
        assert_eq!(types(&s), vec!["op.example", "op.example", "op.responses"]);
        let Block::Example(first) = &s.children[0] else {
            panic!("expected example");
        };
        assert_eq!(first.media_type, "application/json");
        assert_eq!(first.examples, vec![json!({ "value": 1 })]);
        let Block::Example(second) = &s.children[1] else {
            panic!("expected example");
        };
        assert_eq!(second.examples, vec![json!("pong")]);
    }

    #[test]
    fn test_empty_security_is_suppressed() {
        let options = TransformOptions::default();
        let ctx = Context::detached(&options);
        let s = build(&ctx, &operation(json!({ "security": [] })));
        assert!(s.children.is_empty());

        let s = build(&ctx, &operation(json!({ "security": [{}] })));
        assert!(s.children.is_empty());
    }

    #[test]
    fn test_security_flattening_order() {
        let options = TransformOptions::default();
        let ctx = Context::detached(&options);
        let op = operation(json!({
            "security": [
                { "oauth": ["read", "write"], "api_key": [] },
                { "basic": [] }
            ]
        }));
        let s = build(&ctx, &op);
        let Block::Security(block) = &s.children[0] else {
            panic!("expected security block");
        };
        let names: Vec<&str> = block.requirements.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["oauth", "api_key", "basic"]);
        assert_eq!(block.requirements[0].scopes, vec!["read", "write"]);
        assert!(block.requirements[0].scheme_type.is_none());
    }

    #[test]
    fn test_inline_body_schema_properties() {
        let options = TransformOptions::default();
        let ctx = Context::detached(&options);
        let op = operation(json!({
            "requestBody": {
                "description": "Pet to add",
                "content": {
                    "application/json": {
                        "schema": {
                            "required": ["name"],
                            "properties": {
                                "id": { "type": "integer", "example": 10 },
                                "name": { "type": "string", "description": "Pet name" }
                            }
                        }
                    }
                }
            }
        }));

        let s = build(&ctx, &op);
        let Block::RequestBody(body) = &s.children[0] else {
            panic!("expected request body");
        };
        assert_eq!(body.description.as_deref(), Some("Pet to add"));
        assert!(body.required.is_none());

        let Block::Parameters(params) = &s.children[1] else {
            panic!("expected body parameters");
        };
        let group = &params.groups[0];
        assert_eq!(group.location, "body");
        assert_eq!(group.title, "Body");
        assert_eq!(group.items[0].name, "id");
        assert!(!group.items[0].required);
        assert_eq!(group.items[0].examples, vec![json!(10)]);
        assert_eq!(group.items[1].description, "Pet name");
        assert!(group.items[1].required);
    }
}

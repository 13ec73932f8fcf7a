use indexmap::IndexMap;
use serde_json::Value;

use super::non_empty;
use crate::ir::{ItemKind, ParamItem, ParameterBlock, ParameterGroup};
use crate::parse::parameter::Parameter;

/// Location assumed for parameters that don't declare `in`.
const DEFAULT_LOCATION: &str = "query";

/// Group parameters by location. Groups appear in the order their location is
/// first seen, and items keep their declaration order within a group.
pub fn group_parameters(parameters: &[Parameter]) -> ParameterBlock {
    let mut groups: IndexMap<String, Vec<ParamItem>> = IndexMap::new();

    for param in parameters {
        let item = param_item(param);
        groups.entry(item.location.clone()).or_default().push(item);
    }

    ParameterBlock {
        groups: groups
            .into_iter()
            .map(|(location, items)| ParameterGroup {
                title: group_title(&location),
                location,
                items,
            })
            .collect(),
    }
}

fn param_item(param: &Parameter) -> ParamItem {
    ParamItem {
        kind: ItemKind::Param,
        name: param.name.clone().unwrap_or_default(),
        location: non_empty(param.location.as_deref())
            .unwrap_or(DEFAULT_LOCATION)
            .to_string(),
        required: param.required,
        description: param.description.clone().unwrap_or_default(),
        param_type: param
            .schema
            .clone()
            .or_else(|| param.param_type.clone())
            .unwrap_or_else(empty_object),
        examples: normalize_examples(param.example.as_ref(), param.examples.as_ref()),
    }
}

/// A plural `examples` map wins (its values, in key order), then a singular
/// `example`, then nothing.
pub(crate) fn normalize_examples(
    example: Option<&Value>,
    examples: Option<&IndexMap<String, Value>>,
) -> Vec<Value> {
    match (examples, example) {
        (Some(map), _) => map.values().cloned().collect(),
        (None, Some(single)) => vec![single.clone()],
        (None, None) => Vec::new(),
    }
}

/// `"query"` → `"Query"`.
fn group_title(location: &str) -> String {
    let mut chars = location.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub(crate) fn empty_object() -> Value {
    Value::Object(serde_json::Map::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn params(value: Value) -> Vec<Parameter> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_first_seen_group_order() {
        let block = group_parameters(&params(json!([
            { "name": "limit", "in": "query" },
            { "name": "petId", "in": "path" },
            { "name": "offset", "in": "query" },
            { "name": "X-Trace", "in": "header" }
        ])));

        let order: Vec<&str> = block.groups.iter().map(|g| g.location.as_str()).collect();
        assert_eq!(order, vec!["query", "path", "header"]);

        let query: Vec<&str> = block.groups[0].items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(query, vec!["limit", "offset"]);
        assert_eq!(block.groups[0].title, "Query");
        assert_eq!(block.groups[2].title, "Header");
    }

    #[test]
    fn test_item_defaults() {
        let block = group_parameters(&params(json!([{}])));
        let item = &block.groups[0].items[0];
        assert_eq!(block.groups[0].location, "query");
        assert_eq!(item.name, "");
        assert!(!item.required);
        assert_eq!(item.description, "");
        assert_eq!(item.param_type, json!({}));
        assert!(item.examples.is_empty());
    }

    #[test]
    fn test_empty_location_falls_back_to_query() {
        let block = group_parameters(&params(json!([
            { "name": "a", "in": "" },
            { "name": "b", "in": "query" }
        ])));
        assert_eq!(block.groups.len(), 1);
        assert_eq!(block.groups[0].location, "query");
        assert_eq!(block.groups[0].title, "Query");
        assert_eq!(block.groups[0].items[0].location, "query");
    }

    #[test]
    fn test_type_precedence() {
        let block = group_parameters(&params(json!([
            { "name": "a", "schema": { "type": "integer" }, "type": "string" },
            { "name": "b", "type": "string" }
        ])));
        let items = &block.groups[0].items;
        assert_eq!(items[0].param_type, json!({ "type": "integer" }));
        assert_eq!(items[1].param_type, json!("string"));
    }

    #[test]
    fn test_example_normalization() {
        let block = group_parameters(&params(json!([
            { "name": "single", "example": "x" },
            { "name": "plural", "examples": { "b": { "value": 2 }, "a": { "value": 1 } } },
            { "name": "none" }
        ])));
        let items = &block.groups[0].items;
        assert_eq!(items[0].examples, vec![json!("x")]);
        assert_eq!(items[1].examples, vec![json!({ "value": 2 }), json!({ "value": 1 })]);
        assert!(items[2].examples.is_empty());
    }

    #[test]
    fn test_group_title() {
        assert_eq!(group_title("query"), "Query");
        assert_eq!(group_title("x-custom"), "X-custom");
        assert_eq!(group_title(""), "");
    }
}

pub mod document;
pub mod operation;
pub mod parameters;
pub mod section;

use log::warn;
use serde::Deserialize;
use serde_json::Value;

use crate::config::RefPolicy;
use crate::error::{ResolveError, TransformError};
use crate::ir::PageContainer;
use crate::parse::{self, Input};
use crate::parse::document::ApiDocument;
use crate::parse::ref_resolve::RefResolver;

pub use document::{build_operation_page, build_overview_page};
pub use operation::{OperationRef, build_operation_section};
pub use parameters::group_parameters;
pub use section::{Depth, section};

/// Options controlling how lenient the transform is and which optional
/// OpenAPI inheritance rules it applies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TransformOptions {
    pub unresolved_refs: RefPolicy,
    /// Prepend a path item's own `parameters` to each of its operations.
    pub path_parameters: bool,
    /// Fall back to document-level `security` for operations without their own.
    pub inherit_security: bool,
}

/// Transform a parsed input into its page IR.
pub fn transform(input: &Input) -> Result<PageContainer, TransformError> {
    transform_with_options(input, &TransformOptions::default())
}

/// Transform with explicit options.
pub fn transform_with_options(
    input: &Input,
    options: &TransformOptions,
) -> Result<PageContainer, TransformError> {
    match input {
        Input::Document(document) => build_overview_page(document, options),
        Input::Operation(operation) => build_operation_page(operation, options),
    }
}

/// Classify a raw JSON value and transform it in one step.
pub fn transform_value(
    value: Value,
    options: &TransformOptions,
) -> Result<PageContainer, TransformError> {
    let input = parse::from_value(value)?;
    transform_with_options(&input, options)
}

/// Shared state for one transform run.
#[derive(Debug, Clone, Copy)]
pub struct Context<'a> {
    pub document: Option<&'a ApiDocument>,
    pub resolver: RefResolver<'a>,
    pub options: &'a TransformOptions,
}

impl<'a> Context<'a> {
    pub fn for_document(document: &'a ApiDocument, options: &'a TransformOptions) -> Self {
        Self {
            document: Some(document),
            resolver: RefResolver::new(document.components.as_ref()),
            options,
        }
    }

    /// Context for an input with no surrounding document; every `$ref` is unresolvable.
    pub fn detached(options: &'a TransformOptions) -> Self {
        Self {
            document: None,
            resolver: RefResolver::new(None),
            options,
        }
    }

    /// Apply the unresolved-reference policy: `Ok(None)` means "degrade".
    pub fn lenient<T>(&self, result: Result<T, ResolveError>) -> Result<Option<T>, TransformError> {
        match result {
            Ok(target) => Ok(Some(target)),
            Err(err) => match self.options.unresolved_refs {
                RefPolicy::Ignore => Ok(None),
                RefPolicy::Warn => {
                    warn!("{err}, continuing without it");
                    Ok(None)
                }
                RefPolicy::Error => Err(err.into()),
            },
        }
    }
}

/// A string field that is present and non-empty.
pub(crate) fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}

use indexmap::IndexMap;
use serde_json::Value;

use super::components::Components;
use super::content::{RequestBody, Response};
use super::parameter::Parameter;
use super::reference::MaybeRef;
use crate::error::ResolveError;

/// Chained references followed before giving up.
const MAX_REF_HOPS: usize = 8;

/// Looks up `$ref` targets in a document's components. A reference is
/// resolved by its final path segment within the section matching the
/// caller's expectation, so `#/components/schemas/Pet` and `Pet` both
/// name the `Pet` schema.
#[derive(Debug, Clone, Copy)]
pub struct RefResolver<'a> {
    components: Option<&'a Components>,
}

enum Step<'a, T> {
    Done(&'a T),
    Next(&'a str),
}

impl<'a> RefResolver<'a> {
    pub fn new(components: Option<&'a Components>) -> Self {
        Self { components }
    }

    /// Resolve a schema reference against `components.schemas`.
    pub fn schema(&self, ref_path: &str) -> Result<&'a Value, ResolveError> {
        self.follow(
            ref_path,
            |c| &c.schemas,
            |schema| match schema.get("$ref").and_then(Value::as_str) {
                Some(inner) => Step::Next(inner),
                None => Step::Done(schema),
            },
        )
    }

    /// Resolve a parameter reference against `components.parameters`.
    pub fn parameter(&self, ref_path: &str) -> Result<&'a Parameter, ResolveError> {
        self.follow(ref_path, |c| &c.parameters, follow_maybe_ref)
    }

    /// Resolve a request body reference against `components.requestBodies`.
    pub fn request_body(&self, ref_path: &str) -> Result<&'a RequestBody, ResolveError> {
        self.follow(ref_path, |c| &c.request_bodies, follow_maybe_ref)
    }

    /// Resolve a response reference against `components.responses`.
    pub fn response(&self, ref_path: &str) -> Result<&'a Response, ResolveError> {
        self.follow(ref_path, |c| &c.responses, follow_maybe_ref)
    }

    /// The declared type of a security scheme, if the document defines it.
    pub fn security_scheme_type(&self, name: &str) -> Option<&'static str> {
        self.components
            .and_then(|c| c.security_schemes.get(name))
            .map(|scheme| scheme.scheme_type.as_str())
    }

    fn follow<T, U>(
        &self,
        ref_path: &str,
        section: impl Fn(&'a Components) -> &'a IndexMap<String, T>,
        step: impl Fn(&'a T) -> Step<'a, U>,
    ) -> Result<&'a U, ResolveError>
    where
        T: 'a,
        U: 'a,
    {
        let table = self
            .components
            .map(section)
            .ok_or_else(|| ResolveError::RefTargetNotFound(ref_path.to_string()))?;

        let mut current = ref_path;
        for _ in 0..MAX_REF_HOPS {
            let name = ref_name(current)?;
            let entry = table
                .get(name)
                .ok_or_else(|| ResolveError::RefTargetNotFound(ref_path.to_string()))?;
            match step(entry) {
                Step::Done(target) => return Ok(target),
                Step::Next(inner) => current = inner,
            }
        }
        Err(ResolveError::RefTargetNotFound(ref_path.to_string()))
    }
}

fn follow_maybe_ref<T>(entry: &MaybeRef<T>) -> Step<'_, T> {
    match entry {
        MaybeRef::Ref { ref_path } => Step::Next(ref_path),
        MaybeRef::Inline(target) => Step::Done(target),
    }
}

/// Extract the lookup key from a `$ref`: its final `/`-separated segment.
pub fn ref_name(ref_path: &str) -> Result<&str, ResolveError> {
    match ref_path.rsplit('/').next() {
        Some(name) if !name.is_empty() => Ok(name),
        _ => Err(ResolveError::InvalidRefFormat(ref_path.to_string())),
    }
}

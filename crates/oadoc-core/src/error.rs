use thiserror::Error;

/// The input could not be read as an API document or operation.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("invalid YAML input: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    #[error("invalid JSON input: {0}")]
    Json(#[from] serde_json::Error),

    /// Well-formed input that still cannot be read into the input model.
    #[error("input does not match the expected shape: {0}")]
    Shape(serde_json::Error),

    /// Holds the JSON type name of what was found instead (`array`, `string`, ...).
    #[error("expected an object at the top level, found {0}")]
    NotAnObject(&'static str),
}

#[derive(Debug, Error)]
pub enum ResolveError {
    /// A `$ref` with no usable final segment, such as `#/components/schemas/`.
    #[error("malformed reference: {0}")]
    InvalidRefFormat(String),

    /// Also raised for chains that loop or run too long.
    #[error("reference target not found: {0}")]
    RefTargetNotFound(String),
}

#[derive(Debug, Error)]
pub enum TransformError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),
}

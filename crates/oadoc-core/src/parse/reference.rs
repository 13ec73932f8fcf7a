use serde::{Deserialize, Serialize};

/// A `$ref` pointer or the inline object it stands in for.
///
/// The pointer form is tried first, so any object carrying a string `$ref`
/// is read as a reference and its sibling keys are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MaybeRef<T> {
    Ref {
        #[serde(rename = "$ref")]
        ref_path: String,
    },
    Inline(T),
}

impl<T> MaybeRef<T> {
    pub fn ref_path(&self) -> Option<&str> {
        match self {
            MaybeRef::Ref { ref_path } => Some(ref_path),
            MaybeRef::Inline(_) => None,
        }
    }

    pub fn inline(&self) -> Option<&T> {
        match self {
            MaybeRef::Ref { .. } => None,
            MaybeRef::Inline(value) => Some(value),
        }
    }
}

pub mod config;
pub mod error;
pub mod ir;
pub mod parse;
pub mod transform;

pub use ir::PageContainer;
pub use parse::Input;
pub use transform::{TransformOptions, transform, transform_value, transform_with_options};

/// Trait for renderers that turn a page IR into documentation text.
pub trait PageRenderer {
    type Error: std::error::Error;
    fn render(&self, page: &PageContainer) -> Result<String, Self::Error>;
}

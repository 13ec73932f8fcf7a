pub mod error;
pub mod helpers;
pub mod renderer;

pub use error::RenderError;
pub use renderer::TemplateRenderer;

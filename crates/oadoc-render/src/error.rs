use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("template directory not found: {}", .0.display())]
    TemplateDir(PathBuf),

    #[error("index.j2 not found in {}", .0.display())]
    MissingIndex(PathBuf),

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),
}

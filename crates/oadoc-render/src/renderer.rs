use std::ffi::OsStr;
use std::fs;
use std::path::Path;

use log::debug;
use minijinja::{AutoEscape, Environment, context};
use oadoc_core::PageContainer;
use oadoc_core::PageRenderer;
use oadoc_core::config::Theme;

use crate::error::RenderError;
use crate::helpers;

/// Entry template of every template set.
pub const INDEX_TEMPLATE: &str = "index.j2";

const TEMPLATE_EXTENSION: &str = "j2";

macro_rules! theme_templates {
    ($dir:literal: $($name:literal),+ $(,)?) => {
        &[$(($name, include_str!(concat!("../templates/", $dir, "/", $name)))),+]
    };
}

const MARKDOWN_TEMPLATES: &[(&str, &str)] = theme_templates!("markdown":
    "index.j2",
    "section.j2",
    "overview.meta.j2",
    "overview.description.j2",
    "overview.servers.j2",
    "op.header.j2",
    "op.description.j2",
    "op.parameters.j2",
    "op.requestBody.j2",
    "op.example.j2",
    "op.responses.j2",
    "op.security.j2",
);

const HTML_TEMPLATES: &[(&str, &str)] = theme_templates!("html":
    "index.j2",
    "section.j2",
    "overview.meta.j2",
    "overview.description.j2",
    "overview.servers.j2",
    "op.header.j2",
    "op.description.j2",
    "op.parameters.j2",
    "op.requestBody.j2",
    "op.example.j2",
    "op.responses.j2",
    "op.security.j2",
);

/// Renders a page IR through a set of minijinja templates.
///
/// `index.j2` receives `page` and `blocks`; each block is rendered by the
/// partial named after its type (`section.j2`, `op.header.j2`, ...), which
/// templates reach with `{% include block.type ~ ".j2" %}`.
pub struct TemplateRenderer {
    env: Environment<'static>,
}

impl TemplateRenderer {
    /// One of the template sets compiled into the crate.
    pub fn builtin(theme: Theme) -> Result<Self, RenderError> {
        let (templates, escape_html) = match theme {
            Theme::Markdown => (MARKDOWN_TEMPLATES, false),
            Theme::Html => (HTML_TEMPLATES, true),
        };

        let mut env = environment();
        env.set_auto_escape_callback(move |_| {
            if escape_html {
                AutoEscape::Html
            } else {
                AutoEscape::None
            }
        });
        for &(name, source) in templates {
            env.add_template(name, source)?;
        }
        Ok(Self { env })
    }

    /// Load every `*.j2` file in `dir`, registered under its file name.
    pub fn from_dir(dir: &Path) -> Result<Self, RenderError> {
        if !dir.is_dir() {
            return Err(RenderError::TemplateDir(dir.to_path_buf()));
        }

        let io_error = |source| RenderError::Io {
            path: dir.to_path_buf(),
            source,
        };

        let mut env = environment();
        let mut has_index = false;
        for entry in fs::read_dir(dir).map_err(io_error)? {
            let path = entry.map_err(io_error)?.path();
            if !path.is_file() || path.extension() != Some(OsStr::new(TEMPLATE_EXTENSION)) {
                continue;
            }
            let Some(name) = path.file_name().and_then(OsStr::to_str) else {
                continue;
            };

            let source = fs::read_to_string(&path).map_err(|source| RenderError::Io {
                path: path.clone(),
                source,
            })?;
            debug!("registering template {name}");
            has_index |= name == INDEX_TEMPLATE;
            env.add_template_owned(name.to_string(), source)?;
        }

        if !has_index {
            return Err(RenderError::MissingIndex(dir.to_path_buf()));
        }
        Ok(Self { env })
    }
}

impl PageRenderer for TemplateRenderer {
    type Error = RenderError;

    fn render(&self, page: &PageContainer) -> Result<String, RenderError> {
        let template = self.env.get_template(INDEX_TEMPLATE)?;
        let output = template.render(context! {
            page => &page.page,
            blocks => &page.blocks,
        })?;
        Ok(output)
    }
}

fn environment() -> Environment<'static> {
    let mut env = Environment::new();
    env.set_trim_blocks(true);
    env.set_lstrip_blocks(true);
    env.set_keep_trailing_newline(true);
    helpers::register(&mut env);
    env
}

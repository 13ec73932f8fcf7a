use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::transform::TransformOptions;

/// Top-level project configuration loaded from `.oadoc.yaml`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OadocConfig {
    /// Input document. `None` reads stdin.
    pub input: Option<String>,
    /// Output file. `None` writes stdout.
    pub output: Option<String>,
    pub format: OutputFormat,
    pub theme: Theme,
    /// Template directory overriding the built-in theme.
    pub templates: Option<String>,
    pub transform: TransformOptions,
}

/// Serialization format for `oadoc build`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

/// Built-in template set used when no template directory is given.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    #[default]
    Markdown,
    Html,
}

/// What to do when a `$ref` cannot be resolved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefPolicy {
    /// Degrade silently.
    Ignore,
    /// Degrade and log a warning.
    #[default]
    Warn,
    /// Abort the transform.
    Error,
}

/// Default config file name.
pub const CONFIG_FILE_NAME: &str = ".oadoc.yaml";

/// Load config from a YAML file. Returns `None` if the file doesn't exist.
pub fn load_config(path: &Path) -> Result<Option<OadocConfig>, String> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)
        .map_err(|e| format!("failed to read config {}: {}", path.display(), e))?;
    let config: OadocConfig = serde_yaml_ng::from_str(&content)
        .map_err(|e| format!("failed to parse config {}: {}", path.display(), e))?;
    Ok(Some(config))
}

/// Generate the default config file content.
pub fn default_config_content() -> &'static str {
    r#"# oadoc configuration
input: openapi.yaml
# output: docs/api.md   # omit to write to stdout
format: json            # json | yaml (page IR format for `oadoc build`)
theme: markdown         # markdown | html
# templates: templates  # directory with index.j2 + one partial per block type

transform:
  unresolved_refs: warn     # ignore | warn | error
  path_parameters: false    # prepend path-level parameters to each operation
  inherit_security: false   # use document-level security when an operation has none
"#
}

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use log::debug;

use oadoc_core::config::{self, CONFIG_FILE_NAME, OadocConfig, OutputFormat, Theme};
use oadoc_core::parse::{self, Input};
use oadoc_core::transform;
use oadoc_core::{PageContainer, PageRenderer};
use oadoc_render::TemplateRenderer;

/// Input path meaning "read stdin".
const STDIN: &str = "-";

#[derive(Parser)]
#[command(name = "oadoc", about = "OpenAPI documentation builder", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Transform an OpenAPI document or a single operation into the page IR
    Build {
        /// OpenAPI document or operation (YAML or JSON); `-` reads stdin
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Write the page IR to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Page IR format
        #[arg(long)]
        format: Option<FormatArg>,
    },

    /// Render a page IR produced by `oadoc build`
    Render {
        /// Page IR file (JSON or YAML); `-` or no value reads stdin
        #[arg(short, long)]
        input: Option<PathBuf>,

        #[command(flatten)]
        templates: TemplateArgs,

        /// Write the rendered document to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Build and render in one step
    Generate {
        /// OpenAPI document or operation (YAML or JSON); `-` reads stdin
        #[arg(short, long)]
        input: Option<PathBuf>,

        #[command(flatten)]
        templates: TemplateArgs,

        /// Write the rendered document to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Initialize a new oadoc configuration
    Init {
        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(clap::Args)]
struct TemplateArgs {
    /// Template directory with `index.j2` and one partial per block type
    #[arg(short, long)]
    templates: Option<PathBuf>,

    /// Built-in theme, used when no template directory is given
    #[arg(long)]
    theme: Option<ThemeArg>,
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Json,
    Yaml,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Yaml => OutputFormat::Yaml,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum ThemeArg {
    Markdown,
    Html,
}

impl From<ThemeArg> for Theme {
    fn from(arg: ThemeArg) -> Self {
        match arg {
            ThemeArg::Markdown => Theme::Markdown,
            ThemeArg::Html => Theme::Html,
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Build {
            input,
            output,
            format,
        } => cmd_build(input, output, format),

        Commands::Render {
            input,
            templates,
            output,
        } => cmd_render(input, templates, output),

        Commands::Generate {
            input,
            templates,
            output,
        } => cmd_generate(input, templates, output),

        Commands::Init { force } => cmd_init(force),

        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            clap_complete::generate(shell, &mut cmd, "oadoc", &mut io::stdout());
            Ok(())
        }
    }
}

/// Try to load the project config file from the current directory.
fn try_load_config() -> Result<Option<OadocConfig>> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);
    config::load_config(&config_path).map_err(|e| anyhow::anyhow!(e))
}

/// The explicit input, else the configured one, else stdin.
fn resolve_input(arg: Option<PathBuf>, cfg: &OadocConfig) -> Option<PathBuf> {
    arg.or_else(|| cfg.input.as_ref().map(PathBuf::from))
        .filter(|path| path.as_os_str() != STDIN)
}

/// Read a file, or all of stdin when `path` is `None`.
fn read_source(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => {
            fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
        }
        None => {
            debug!("reading input from stdin");
            let mut content = String::new();
            io::stdin()
                .read_to_string(&mut content)
                .context("failed to read stdin")?;
            Ok(content)
        }
    }
}

/// `.json` files are parsed as JSON; other files and stdin as YAML, which accepts JSON too.
fn is_json(path: Option<&Path>) -> bool {
    path.and_then(|p| p.extension())
        .and_then(|e| e.to_str())
        .is_some_and(|ext| ext == "json")
}

fn load_input(path: Option<&Path>) -> Result<Input> {
    let content = read_source(path)?;
    let input = if is_json(path) {
        parse::from_json(&content)?
    } else {
        parse::from_yaml(&content)?
    };
    Ok(input)
}

fn build_page(input: Option<PathBuf>, cfg: &OadocConfig) -> Result<PageContainer> {
    let input = resolve_input(input, cfg);
    let parsed = load_input(input.as_deref())?;
    let page = transform::transform_with_options(&parsed, &cfg.transform)?;
    debug!("built {:?} page `{}`", page.page.kind, page.page.slug);
    Ok(page)
}

fn load_page(path: Option<&Path>) -> Result<PageContainer> {
    let content = read_source(path)?;
    let page = if is_json(path) {
        serde_json::from_str(&content).context("invalid page IR")?
    } else {
        serde_yaml_ng::from_str(&content).context("invalid page IR")?
    };
    Ok(page)
}

fn renderer(args: TemplateArgs, cfg: &OadocConfig) -> Result<TemplateRenderer> {
    let templates = args
        .templates
        .or_else(|| cfg.templates.as_ref().map(PathBuf::from));

    let renderer = match templates {
        Some(dir) => TemplateRenderer::from_dir(&dir)
            .with_context(|| format!("failed to load templates from {}", dir.display()))?,
        None => {
            let theme = args.theme.map(Theme::from).unwrap_or(cfg.theme);
            TemplateRenderer::builtin(theme)?
        }
    };
    Ok(renderer)
}

/// Write to `path`, creating parent directories, or print to stdout.
fn write_output(path: Option<&Path>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create directory {}", parent.display()))?;
            }
            fs::write(path, content)
                .with_context(|| format!("failed to write {}", path.display()))?;
            eprintln!("Wrote {}", path.display());
        }
        None => print!("{content}"),
    }
    Ok(())
}

fn cmd_build(
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    format: Option<FormatArg>,
) -> Result<()> {
    let cfg = try_load_config()?.unwrap_or_default();
    let page = build_page(input, &cfg)?;

    let content = match format.map(OutputFormat::from).unwrap_or(cfg.format) {
        OutputFormat::Json => serde_json::to_string_pretty(&page)? + "\n",
        OutputFormat::Yaml => serde_yaml_ng::to_string(&page)?,
    };
    write_output(output.as_deref(), &content)
}

fn cmd_render(
    input: Option<PathBuf>,
    templates: TemplateArgs,
    output: Option<PathBuf>,
) -> Result<()> {
    let cfg = try_load_config()?.unwrap_or_default();
    let input = input.filter(|path| path.as_os_str() != STDIN);
    let page = load_page(input.as_deref())?;

    let rendered = renderer(templates, &cfg)?.render(&page)?;
    let output = output.or_else(|| cfg.output.as_ref().map(PathBuf::from));
    write_output(output.as_deref(), &rendered)
}

fn cmd_generate(
    input: Option<PathBuf>,
    templates: TemplateArgs,
    output: Option<PathBuf>,
) -> Result<()> {
    let cfg = try_load_config()?.unwrap_or_default();
    let page = build_page(input, &cfg)?;

    let rendered = renderer(templates, &cfg)?.render(&page)?;
    let output = output.or_else(|| cfg.output.as_ref().map(PathBuf::from));
    write_output(output.as_deref(), &rendered)
}

fn cmd_init(force: bool) -> Result<()> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, config::default_config_content())?;
    eprintln!("Created {}", config_path.display());
    Ok(())
}

//! gotypes command-line entry point.

use anyhow::{Context, bail};
use clap::{Parser, ValueEnum};
use gotypes::{Config, Nullability};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Generate TypeScript type definitions from Go structs.
#[derive(Parser, Debug)]
#[command(name = "gotypes", version, about)]
struct Cli {
    /// Comma-separated list of Go source directories
    source_dirs: String,

    /// Output TypeScript file
    target: PathBuf,

    /// Config file (defaults to .gotypes/config.toml if present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Union token for pointer elements of slices and maps
    #[arg(long, value_enum)]
    null_style: Option<NullStyle>,

    /// Keep Go/tag field names instead of camelCasing them
    #[arg(long)]
    preserve_field_names: bool,

    /// Render pointer map values as nullable
    #[arg(long)]
    nullable_map_values: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum NullStyle {
    Null,
    Undefined,
    NullOrUndefined,
}

impl From<NullStyle> for Nullability {
    fn from(style: NullStyle) -> Self {
        match style {
            NullStyle::Null => Nullability::Null,
            NullStyle::Undefined => Nullability::Undefined,
            NullStyle::NullOrUndefined => Nullability::NullOrUndefined,
        }
    }
}

/// Split the comma-separated directory argument, dropping empty entries.
fn split_dirs(arg: &str) -> Vec<PathBuf> {
    arg.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
        .collect()
}

/// Explicit config path, else the project config under `cwd`, else defaults.
fn load_config(explicit: Option<&Path>, cwd: &Path) -> Result<Config, gotypes::Error> {
    match explicit {
        Some(path) => Config::load_file(path),
        None => Config::load(cwd),
    }
}

/// Command-line flags take precedence over config file values.
fn apply_overrides(config: &mut Config, cli: &Cli) {
    if let Some(style) = cli.null_style {
        config.typescript.element_nullability = style.into();
    }
    if cli.preserve_field_names {
        config.extract.camel_case_fields = false;
    }
    if cli.nullable_map_values {
        config.typescript.nullable_map_values = true;
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "gotypes=debug" } else { "gotypes=info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let dirs = split_dirs(&cli.source_dirs);
    if dirs.is_empty() {
        bail!("no source directories given");
    }

    let cwd = std::env::current_dir().context("failed to resolve current directory")?;
    let mut config = load_config(cli.config.as_deref(), &cwd).context("failed to load config")?;
    apply_overrides(&mut config, cli);
    tracing::debug!(?config, "effective configuration");

    let report = gotypes::generate_from_dirs(&dirs, &cli.target, &config)
        .context("failed to generate type definitions")?;
    if !report.skipped_files.is_empty() {
        eprintln!("Skipped {} unparseable file(s)", report.skipped_files.len());
    }
    println!(
        "TypeScript type definitions generated: {}",
        cli.target.display()
    );
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

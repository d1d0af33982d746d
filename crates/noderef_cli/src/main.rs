//! noderef: generate IntelliSense references from the Node.js API docs
//!
//! Reads `all.json`, then writes the JavaScript stub source and the module
//! doc table. Both artifacts are generated in memory first, so a failed run
//! leaves no partial output behind.

use anyhow::{Context, Result};
use clap::Parser;
use noderef_gen::{DocTableFormat, DocTree, ReferenceGenerator};
use std::fs;
use std::path::PathBuf;

mod config;

use config::{Config, Overrides, Settings};

#[derive(Debug, Parser)]
#[command(
    name = "noderef",
    version,
    about = "Generate IntelliSense stubs and a module doc table from Node.js API docs"
)]
struct Cli {
    /// Config file (defaults to ./noderef.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Documentation tree in JSON form
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// JavaScript file prepended to the stubs
    #[arg(long)]
    header: Option<PathBuf>,

    /// Output path of the JavaScript stubs
    #[arg(long)]
    stubs: Option<PathBuf>,

    /// Output path of the doc table
    #[arg(long)]
    doc_table: Option<PathBuf>,

    /// Doc table format: csharp or json
    #[arg(long)]
    format: Option<DocTableFormat>,
}

fn main() -> Result<()> {
    // Use NODEREF_LOG env var for log level configuration, default to "info"
    use tracing_subscriber::EnvFilter;
    let filter =
        EnvFilter::try_from_env("NODEREF_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let cwd = std::env::current_dir().context("resolving working directory")?;

    let config = Config::discover(cli.config.as_deref(), &cwd)?;
    let overrides = Overrides {
        input: cli.input,
        header: cli.header,
        stubs_output: cli.stubs,
        doc_table_output: cli.doc_table,
        format: cli.format,
    };
    let settings = Settings::resolve(config, overrides, &cwd);

    run(&settings)
}

fn run(settings: &Settings) -> Result<()> {
    let source = fs::read_to_string(&settings.input)
        .with_context(|| format!("reading documentation at {}", settings.input.display()))?;
    let tree = DocTree::from_json(&source)
        .with_context(|| format!("parsing documentation at {}", settings.input.display()))?;

    tracing::info!(
        "Loaded {} modules from {}",
        tree.modules.len(),
        settings.input.display()
    );

    let options = settings.generator_options()?;
    let artifacts = ReferenceGenerator::with_options(&tree, options)
        .generate()
        .context("generating reference artifacts")?;

    if !artifacts.diagnostics.is_empty() {
        tracing::warn!("{} warnings during generation", artifacts.diagnostics.len());
    }

    fs::write(&settings.stubs_output, &artifacts.stubs)
        .with_context(|| format!("writing stubs to {}", settings.stubs_output.display()))?;
    fs::write(&settings.doc_table_output, &artifacts.doc_table).with_context(|| {
        format!(
            "writing doc table to {}",
            settings.doc_table_output.display()
        )
    })?;

    tracing::info!(
        "Wrote {} and {}",
        settings.stubs_output.display(),
        settings.doc_table_output.display()
    );
    Ok(())
}

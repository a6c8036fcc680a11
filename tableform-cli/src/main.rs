//! tableform CLI tool

#![forbid(unsafe_code)]
#![deny(clippy::all, clippy::pedantic, clippy::nursery)]
#![warn(clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tableform::{config::TableFormConfig, observability};
use tableform_cli_lib::{DataCommand, FieldsCommand, RenderCommand};

#[derive(Parser)]
#[command(name = "tableform")]
#[command(version)]
#[command(about = "Generate forms from table schema files", long_about = None)]
struct Cli {
    /// Configuration file (defaults to ./tableform.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the fields generated for a table
    Fields(FieldsCommand),
    /// Bind values to a table's form and print its data as JSON
    Data(DataCommand),
    /// Render a table's form as HTML
    Render(RenderCommand),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match cli.config {
        Some(ref path) => TableFormConfig::load_from(path)?,
        None => TableFormConfig::load()?,
    };
    observability::init(&config.logging)?;

    match cli.command {
        Commands::Fields(command) => command.execute(&config)?,
        Commands::Data(command) => command.execute(&config)?,
        Commands::Render(command) => command.execute(&config)?,
    }

    Ok(())
}

//! CLI command definitions and handlers.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use keurex_graph::{GraphClient, GraphConfig};

pub mod export;
pub mod status;

/// Keurex - keuringsinfo export for LS/LSDeel assets
#[derive(Parser)]
#[command(name = "keurex")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to a JSON settings file with graph connection details
    #[arg(short, long, global = true)]
    pub settings: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the keuringsinfo export pipeline
    Export(export::ExportArgs),

    /// Show graph node/relationship counts
    Status,
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        let config = match &self.settings {
            Some(path) => GraphConfig::from_settings_file(path)?,
            None => GraphConfig::from_env(),
        };
        let client = GraphClient::connect(&config).await?;

        match self.command {
            Commands::Export(args) => export::execute(&client, args).await,
            Commands::Status => status::execute(&client).await,
        }
    }
}

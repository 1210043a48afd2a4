//! ClawMark site builder.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use clawmark::commands;

#[derive(Parser)]
#[command(name = "clawmark")]
#[command(about = "Generate a link-in-bio site from a YAML configuration")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    /// Output directory
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    clawmark::init_logging(cli.verbose);

    commands::build::run(cli.config, cli.output)
}

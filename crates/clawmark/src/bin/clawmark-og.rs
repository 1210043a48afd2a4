//! ClawMark Open Graph preview image generator.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use clawmark::commands;

#[derive(Parser)]
#[command(name = "clawmark-og")]
#[command(about = "Create an Open Graph preview image from a ClawMark config")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.connor.yaml")]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    clawmark::init_logging(cli.verbose);

    commands::og::run(&cli.config)
}

//! image-dedupe - visual duplicate image finder
//!
//! Main binary entry point for the command-line interface.

use clap::Parser;
use image_dedupe::cli::{self, Cli};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    cli::run(cli)
}

//! Bunko CLI: scan, list, and configure the e-book catalog.

use anyhow::Result;
use bunko::engine::arg_parser::Cli;
use bunko::engine::handle_command;
use clap::Parser;
use std::time::Instant;

fn main() -> Result<()> {
    let start_time = Instant::now();
    let cli = Cli::parse();
    handle_command(&cli)?;
    log::debug!("Total time: {:?}", start_time.elapsed());
    Ok(())
}

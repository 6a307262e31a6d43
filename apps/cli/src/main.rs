//! seqdoc CLI — annotates generated API docs with OEIS cross-references.
//!
//! Runs the metadata producer, then splices a sequence listing into each
//! module's documentation page.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli)
}

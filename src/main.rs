mod cli;
mod command;
mod form;
mod logging;
mod model;
mod snapshot;
mod store;
mod text_view;
#[cfg(feature = "tui")]
mod tui;
mod view;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let args = cli::Cli::parse();
    cli::run(args)
}

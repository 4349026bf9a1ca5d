use std::path::PathBuf;
use std::str::FromStr;

use clap::{Parser, Subcommand};
use railgun_analyser::config::Mode;

#[derive(Parser, Debug)]
#[command(
    name = "railgun-analyser",
    version,
    about = "Summarise Railgun-style NDJSON. Use subcommands to select actions."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate external_<mode>.json and print a concise summary
    External {
        /// Dataset mode to process: test or v2
        #[arg(value_parser = Mode::from_str)]
        mode: Mode,
        /// Override the data directory, e.g. ./data
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },
}

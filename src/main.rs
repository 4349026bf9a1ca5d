mod cli;

use anyhow::Context;
use clap::Parser;
use railgun_analyser::analyser::Analyser;
use railgun_analyser::config::{ensure_input_exists, Config};

use crate::cli::{Cli, Commands};

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    let config = Config::from_env();

    match cli.command {
        Commands::External { mode, data_dir } => {
            let config = match data_dir {
                Some(dir) => Config {
                    data_dir: dir,
                    ..config
                },
                None => config,
            }
            .into_absolute()
            .context("failed to resolve data directory")?;

            let mut analyser = Analyser::new(&config, mode);
            ensure_input_exists(analyser.input_path())?;
            analyser.analyse()?;
            analyser.write_summary()?;
            print!("{}", analyser.render_summary()?);
        }
    }

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

mod cli;
mod commands;
mod config;
mod terminal;

use clap::Parser;
use config::ResolvedConfig;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("pixelcheck=info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = cli::Cli::parse();

    match cli.command {
        cli::Command::Init { force } => {
            commands::init(force)?;
        }
        cli::Command::Compare {
            expected,
            actual,
            line,
            paths,
        } => {
            let config = ResolvedConfig::new(paths)?;
            let code = commands::compare(config, &expected, &actual, line)?;
            std::process::exit(code);
        }
        cli::Command::CompareDir {
            reference,
            actual,
            paths,
        } => {
            let config = ResolvedConfig::new(paths)?;
            let code = commands::compare_dir(config, &reference, &actual)?;
            std::process::exit(code);
        }
        cli::Command::MaxDiff { a, b } => {
            let code = commands::max_diff(&a, &b)?;
            std::process::exit(code);
        }
    }

    Ok(())
}

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::CliOverrides;

#[derive(Parser)]
#[command(
    name = "pixelcheck",
    about = "Image regression checks with amplified diff images"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Create pixelcheck.toml with default settings
    Init {
        /// Overwrite an existing config
        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Compare an actual PNG against its reference (exit 0/1)
    Compare {
        /// Reference PNG (relative paths resolve against the fixtures root)
        expected: PathBuf,
        /// Actual PNG produced by the code under test
        actual: PathBuf,
        /// Line number used in messages and artifact names
        #[arg(long, default_value_t = 0)]
        line: u32,
        #[command(flatten)]
        paths: CliOverrides,
    },

    /// Compare every PNG in a reference directory with its namesake (exit 0/1)
    CompareDir {
        /// Directory of reference PNGs (relative to the fixtures root)
        reference: PathBuf,
        /// Directory of actual PNGs
        actual: PathBuf,
        #[command(flatten)]
        paths: CliOverrides,
    },

    /// Print the largest raw channel difference between two PNGs
    MaxDiff {
        a: PathBuf,
        b: PathBuf,
    },
}

use std::path::PathBuf;

use anyhow::Result;

use super::{Config, load};

const ENV_FIXTURES: &str = "PIXELCHECK_FIXTURES";
const ENV_ARTIFACTS: &str = "PIXELCHECK_ARTIFACTS";

/// Path settings that can come from the CLI or the environment.
#[derive(Clone, Debug, Default, clap::Args)]
pub struct CliOverrides {
    /// Root directory for relative reference paths
    #[arg(long)]
    pub fixtures: Option<PathBuf>,

    /// Directory for _diff.png / _out.png artifacts (default: working dir)
    #[arg(long)]
    pub artifacts: Option<PathBuf>,
}

impl CliOverrides {
    fn from_env() -> Self {
        Self {
            fixtures: std::env::var_os(ENV_FIXTURES).map(PathBuf::from),
            artifacts: std::env::var_os(ENV_ARTIFACTS).map(PathBuf::from),
        }
    }
}

/// Fully resolved config after CLI > env > file > defaults merge.
#[derive(Debug)]
pub struct ResolvedConfig {
    pub fixtures_root: PathBuf,
    pub artifact_dir: PathBuf,
}

impl ResolvedConfig {
    pub fn new(cli: CliOverrides) -> Result<Self> {
        let file = load()?.unwrap_or_default();
        Ok(Self::merge(cli, CliOverrides::from_env(), file))
    }

    fn merge(cli: CliOverrides, env: CliOverrides, file: Config) -> Self {
        Self {
            fixtures_root: cli.fixtures.or(env.fixtures).unwrap_or(file.fixtures.root),
            artifact_dir: cli
                .artifacts
                .or(env.artifacts)
                .unwrap_or(file.artifacts.dir),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file_config() -> Config {
        super::super::parse("[fixtures]\nroot = \"file-root\"\n[artifacts]\ndir = \"file-out\"\n")
            .unwrap()
    }

    #[test]
    fn file_layer_applies_without_overrides() {
        let r = ResolvedConfig::merge(
            CliOverrides::default(),
            CliOverrides::default(),
            file_config(),
        );
        assert_eq!(r.fixtures_root, PathBuf::from("file-root"));
        assert_eq!(r.artifact_dir, PathBuf::from("file-out"));
    }

    #[test]
    fn env_beats_file_and_cli_beats_env() {
        let env = CliOverrides {
            fixtures: Some("env-root".into()),
            artifacts: Some("env-out".into()),
        };
        let cli = CliOverrides {
            fixtures: Some("cli-root".into()),
            artifacts: None,
        };
        let r = ResolvedConfig::merge(cli, env, file_config());
        assert_eq!(r.fixtures_root, PathBuf::from("cli-root"));
        assert_eq!(r.artifact_dir, PathBuf::from("env-out"));
    }

    #[test]
    fn defaults_are_working_directory() {
        let r = ResolvedConfig::merge(
            CliOverrides::default(),
            CliOverrides::default(),
            Config::default(),
        );
        assert_eq!(r.fixtures_root, PathBuf::from("."));
        assert_eq!(r.artifact_dir, PathBuf::from("."));
    }
}

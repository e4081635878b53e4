pub mod resolve;
pub mod template;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::Deserialize;

pub use self::resolve::{CliOverrides, ResolvedConfig};
pub use self::template::{config_file_exists, write_template};

pub(crate) const CONFIG_FILE: &str = "pixelcheck.toml";

fn default_dir() -> PathBuf {
    PathBuf::from(".")
}

#[derive(Debug, Clone, Deserialize)]
pub struct FixturesConfig {
    /// Root that relative reference paths resolve against.
    #[serde(default = "default_dir")]
    pub root: PathBuf,
}

impl Default for FixturesConfig {
    fn default() -> Self {
        Self { root: default_dir() }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArtifactsConfig {
    /// Where `<name>_<line>_diff.png` and `<name>_<line>_out.png` go.
    #[serde(default = "default_dir")]
    pub dir: PathBuf,
}

impl Default for ArtifactsConfig {
    fn default() -> Self {
        Self { dir: default_dir() }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub fixtures: FixturesConfig,
    #[serde(default)]
    pub artifacts: ArtifactsConfig,
}

impl Config {
    fn validate(&self) -> Result<()> {
        if self.fixtures.root.as_os_str().is_empty() {
            bail!("fixtures.root must not be empty (use \".\" for the working directory)");
        }
        if self.artifacts.dir.as_os_str().is_empty() {
            bail!("artifacts.dir must not be empty (use \".\" for the working directory)");
        }
        Ok(())
    }
}

pub fn parse(content: &str) -> Result<Config> {
    let config: Config = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}

/// `Ok(None)` when the file does not exist.
pub fn load_from(path: &Path) -> Result<Option<Config>> {
    if !path.exists() {
        return Ok(None);
    }
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let config = parse(&content).with_context(|| format!("Failed to parse {}", path.display()))?;
    Ok(Some(config))
}

pub fn load() -> Result<Option<Config>> {
    load_from(Path::new(CONFIG_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let c = parse("").unwrap();
        assert_eq!(c.fixtures.root, PathBuf::from("."));
        assert_eq!(c.artifacts.dir, PathBuf::from("."));
    }

    #[test]
    fn sections_are_read() {
        let c = parse("[fixtures]\nroot = \"tests\"\n[artifacts]\ndir = \"out\"\n").unwrap();
        assert_eq!(c.fixtures.root, PathBuf::from("tests"));
        assert_eq!(c.artifacts.dir, PathBuf::from("out"));
    }

    #[test]
    fn empty_paths_are_rejected() {
        let err = parse("[artifacts]\ndir = \"\"\n").unwrap_err();
        assert!(err.to_string().contains("artifacts.dir"));
    }

    #[test]
    fn unknown_types_fail_to_parse() {
        assert!(parse("[fixtures]\nroot = 3\n").is_err());
    }

    #[test]
    fn missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_from(&dir.path().join(CONFIG_FILE)).unwrap().is_none());
    }

    #[test]
    fn template_parses() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, template::CONFIG_TEMPLATE).unwrap();
        let c = load_from(&path).unwrap().unwrap();
        assert_eq!(c.fixtures.root, PathBuf::from("tests"));
    }
}

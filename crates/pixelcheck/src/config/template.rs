use std::path::Path;

use anyhow::{Context, Result};

use super::CONFIG_FILE;

/// Written by `pixelcheck init`; optional keys stay commented out.
pub(crate) const CONFIG_TEMPLATE: &str = r#"# ─────────────────────────────────────────────────────────
# Reference images — relative paths resolve against root.
# ─────────────────────────────────────────────────────────
[fixtures]
root = "tests"

# ─────────────────────────────────────────────────────────
# Failure artifacts (<file>_<line>_diff.png / _out.png).
# ─────────────────────────────────────────────────────────
[artifacts]
# dir = "."                         # default: working directory
"#;

pub fn config_file_exists() -> bool {
    Path::new(CONFIG_FILE).exists()
}

pub fn write_template() -> Result<()> {
    let path = Path::new(CONFIG_FILE);
    std::fs::write(path, CONFIG_TEMPLATE)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

//! Test assets and scratch files.
//!
//! Asset paths resolve against a fixture root. Scratch files live in a
//! single `pixelcheck.XXXXXX` directory under the system temp dir (honours
//! `TMPDIR`), created on first use and removed with everything in it when
//! the [`Fixtures`] value is dropped.

use std::fs::File;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tracing::debug;

use crate::error::{Error, Result};
use crate::raster::Image;

const TEMP_DIR_PREFIX: &str = "pixelcheck.";
const DEFAULT_TEMPLATE: &str = "temp.XXXXXX";
const RANDOM_MARK: &str = "XXXXXX";

#[derive(Debug)]
pub struct Fixtures {
    root: PathBuf,
    temp: Option<TempDir>,
}

impl Fixtures {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            temp: None,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `root/fragments[0]/fragments[1]/...`
    pub fn file_path(&self, fragments: &[&str]) -> PathBuf {
        fragments
            .iter()
            .fold(self.root.clone(), |path, fragment| path.join(fragment))
    }

    pub fn open(&self, fragments: &[&str]) -> Result<File> {
        let path = self.file_path(fragments);
        Ok(File::open(path)?)
    }

    /// Absolute names are loaded as-is, relative ones from the fixture root.
    pub fn image_from_png(&self, name: &str) -> Result<Image> {
        let path = Path::new(name);
        if path.is_absolute() {
            Image::load_png(path)
        } else {
            Image::load_png(&self.root.join(path))
        }
    }

    pub fn temp_dir(&mut self) -> Result<&Path> {
        let dir = match self.temp.take() {
            Some(dir) => dir,
            None => {
                let root = std::env::temp_dir();
                let dir = tempfile::Builder::new()
                    .prefix(TEMP_DIR_PREFIX)
                    .tempdir_in(&root)
                    .map_err(|source| Error::TempDir {
                        root: root.display().to_string(),
                        source,
                    })?;
                debug!(path = %dir.path().display(), "created temp dir");
                dir
            }
        };
        Ok(self.temp.insert(dir).path())
    }

    /// Path for a scratch file named after `template` (default
    /// `temp.XXXXXX`). If the template contains `XXXXXX` that part is
    /// randomised and the file is created empty to reserve the name;
    /// otherwise the path is only built.
    pub fn temp_file(&mut self, template: Option<&str>) -> Result<PathBuf> {
        let template = template.unwrap_or(DEFAULT_TEMPLATE);
        let dir = self.temp_dir()?.to_path_buf();

        let Some((prefix, suffix)) = template.split_once(RANDOM_MARK) else {
            return Ok(dir.join(template));
        };
        let (_file, path) = tempfile::Builder::new()
            .prefix(prefix)
            .suffix(suffix)
            .rand_bytes(RANDOM_MARK.len())
            .tempfile_in(&dir)
            .map_err(|source| Error::TempFile {
                path: dir.join(template).display().to_string(),
                source,
            })?
            .keep()
            .map_err(|e| Error::TempFile {
                path: e.file.path().display().to_string(),
                source: e.error,
            })?;
        Ok(path)
    }

    /// A fresh scratch file opened for writing.
    pub fn temp_writer(&mut self) -> Result<File> {
        let path = self.temp_file(None)?;
        File::create(&path).map_err(|source| Error::TempFile {
            path: path.display().to_string(),
            source,
        })
    }
}

pub mod diff;

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::raster::Image;
use crate::report::{Location, Reporter};

pub use self::diff::DiffResult;

/// Compares an actual image against its reference and, on pixel
/// mismatch, writes `<basename>_<line>_diff.png` and
/// `<basename>_<line>_out.png` into the artifact directory.
#[derive(Debug, Clone)]
pub struct Comparator {
    artifact_dir: PathBuf,
}

impl Default for Comparator {
    fn default() -> Self {
        Self::new()
    }
}

/// File names of the diagnostic images for an assertion at `loc`.
pub fn artifact_names(loc: &Location) -> (String, String) {
    let base = loc.basename();
    let line = loc.line();
    (
        format!("{base}_{line}_diff.png"),
        format!("{base}_{line}_out.png"),
    )
}

/// What a comparison concluded, and which artifacts it left behind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Match,
    /// Reported without artifacts: missing image, size mismatch or an
    /// unreadable reference.
    Failed,
    /// Pixels differ. `written` holds the artifacts actually saved, in
    /// diff, out order; it stops short when a write fails.
    Changed { written: Vec<PathBuf> },
}

impl Outcome {
    pub fn is_match(&self) -> bool {
        matches!(self, Self::Match)
    }
}

impl Comparator {
    /// Artifacts go to the current working directory.
    pub fn new() -> Self {
        Self::with_artifact_dir(".")
    }

    pub fn with_artifact_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            artifact_dir: dir.into(),
        }
    }

    pub fn artifact_dir(&self) -> &Path {
        &self.artifact_dir
    }

    /// `true` when `actual` matches `expected` pixel for pixel. Any other
    /// outcome is reported through `reporter` (once) and returns `false`.
    pub fn compare_images(
        &self,
        reporter: &mut Reporter,
        loc: &Location,
        expected: &Image,
        actual: Option<&Image>,
    ) -> bool {
        self.check_images(reporter, loc, expected, actual).is_match()
    }

    /// [`compare_images`](Self::compare_images) with the full [`Outcome`].
    pub fn check_images(
        &self,
        reporter: &mut Reporter,
        loc: &Location,
        expected: &Image,
        actual: Option<&Image>,
    ) -> Outcome {
        let Some(actual) = actual else {
            reporter.error(loc, "Image is NULL");
            return Outcome::Failed;
        };

        let (width_a, height_a) = expected.dimensions();
        let (width_b, height_b) = actual.dimensions();
        if (width_a, height_a) != (width_b, height_b) {
            reporter.error(
                loc,
                &format!(
                    "Image size mismatch: ({width_a}x{height_a}) vs. \
                     ({width_b}x{height_b})\n       for {} vs. buffer",
                    loc.file()
                ),
            );
            return Outcome::Failed;
        }

        let mut surface_diff = Image::new(width_a, height_a);
        let result = diff::diff(expected, actual, Some(&mut surface_diff));
        debug!(
            location = %loc,
            pixels_changed = result.pixels_changed,
            max_diff = result.max_diff,
            "compared images"
        );
        if result.pixels_changed == 0 {
            return Outcome::Match;
        }

        reporter.error(
            loc,
            &format!(
                "Total pixels changed: {} with a maximum channel difference of {}.",
                result.pixels_changed, result.max_diff
            ),
        );
        let written = self.write_artifacts(loc, &surface_diff, actual);
        Outcome::Changed { written }
    }

    /// Load the reference from `expected_path` and compare. A reference that
    /// cannot be loaded is reported as `Cannot open PNG <path>`.
    pub fn compare_to_file(
        &self,
        reporter: &mut Reporter,
        loc: &Location,
        expected_path: &Path,
        actual: Option<&Image>,
    ) -> bool {
        self.check_file(reporter, loc, expected_path, actual).is_match()
    }

    /// [`compare_to_file`](Self::compare_to_file) with the full [`Outcome`].
    pub fn check_file(
        &self,
        reporter: &mut Reporter,
        loc: &Location,
        expected_path: &Path,
        actual: Option<&Image>,
    ) -> Outcome {
        match Image::load_png(expected_path) {
            Ok(expected) => self.check_images(reporter, loc, &expected, actual),
            Err(e) => {
                debug!(error = %e, "reference load failed");
                reporter.error(
                    loc,
                    &format!("Cannot open PNG <{}>", expected_path.display()),
                );
                Outcome::Failed
            }
        }
    }

    /// The verdict is already failed; a write error only stops further writes.
    fn write_artifacts(
        &self,
        loc: &Location,
        surface_diff: &Image,
        actual: &Image,
    ) -> Vec<PathBuf> {
        let (diff_name, out_name) = artifact_names(loc);
        let mut written = Vec::with_capacity(2);
        for (name, img) in [(diff_name, surface_diff), (out_name, actual)] {
            let path = self.artifact_dir.join(name);
            if let Err(e) = img.save_png(&path) {
                warn!(error = %e, "could not write comparison artifact");
                break;
            }
            debug!(path = %path.display(), "wrote comparison artifact");
            written.push(path);
        }
        written
    }
}

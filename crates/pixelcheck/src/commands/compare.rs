use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use pixelcheck::{Comparator, Fixtures, Image, Location, Outcome, Reporter};
use tracing::{debug, info};

use crate::config::ResolvedConfig;
use crate::terminal;

type Failed = Vec<(String, Option<(String, String)>)>;

struct Session {
    fixtures: Fixtures,
    comparator: Comparator,
    reporter: Reporter,
}

impl Session {
    fn new(config: ResolvedConfig) -> Result<Self> {
        std::fs::create_dir_all(&config.artifact_dir).with_context(|| {
            format!(
                "Failed to create artifact dir {}",
                config.artifact_dir.display()
            )
        })?;
        Ok(Self {
            fixtures: Fixtures::new(config.fixtures_root),
            comparator: Comparator::with_artifact_dir(config.artifact_dir),
            reporter: Reporter::new(),
        })
    }

    /// Relative references resolve against the fixtures root.
    fn reference_path(&self, expected: &Path) -> PathBuf {
        self.fixtures.root().join(expected)
    }

    /// `expected` is already resolved. A missing or undecodable actual image
    /// is compared as absent.
    fn check(&mut self, loc: &Location, expected: &Path, actual: &Path) -> Outcome {
        let actual_img = match Image::load_png(actual) {
            Ok(img) => Some(img),
            Err(e) => {
                debug!(error = %e, "actual image unavailable");
                None
            }
        };
        self.comparator
            .check_file(&mut self.reporter, loc, expected, actual_img.as_ref())
    }
}

/// Diff and out paths, when both were written.
fn written_artifacts(outcome: &Outcome) -> Option<(String, String)> {
    match outcome {
        Outcome::Changed { written } => match written.as_slice() {
            [diff, out] => Some((diff.display().to_string(), out.display().to_string())),
            _ => None,
        },
        Outcome::Match | Outcome::Failed => None,
    }
}

/// `pixelcheck compare` — one reference against one actual image.
/// Returns exit code: 0 = match, 1 = any failure.
pub fn compare(
    config: ResolvedConfig,
    expected: &Path,
    actual: &Path,
    line: u32,
) -> Result<i32> {
    let mut session = Session::new(config)?;
    let expected = session.reference_path(expected);
    let loc = Location::new(actual.display().to_string(), line);

    let start = Instant::now();
    let outcome = session.check(&loc, &expected, actual);
    terminal::print_line(
        &actual.display().to_string(),
        outcome.is_match(),
        start.elapsed(),
    );

    Ok(session.reporter.exit_code())
}

/// PNG file names directly inside `dir`, sorted.
fn list_pngs(dir: &Path) -> Result<BTreeSet<String>> {
    let entries =
        std::fs::read_dir(dir).with_context(|| format!("Failed to read {}", dir.display()))?;
    let mut names = BTreeSet::new();
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_file()
            && path
                .extension()
                .is_some_and(|e| e.eq_ignore_ascii_case("png"))
        {
            names.insert(entry.file_name().to_string_lossy().into_owned());
        }
    }
    Ok(names)
}

/// Compare each of `names` in `reference_dir` against `actual`. Returns the
/// pass count and the failed names with the artifacts this run wrote.
fn check_all(
    session: &mut Session,
    reference_dir: &Path,
    actual: &Path,
    names: &BTreeSet<String>,
) -> (usize, Failed) {
    let mut passed = 0usize;
    let mut failed: Failed = Vec::new();

    for name in names {
        let expected = reference_dir.join(name);
        let loc = Location::new(expected.display().to_string(), 0);
        let before = session.reporter.failures();

        let start = Instant::now();
        let outcome = session.check(&loc, &expected, &actual.join(name));
        terminal::print_line(name, outcome.is_match(), start.elapsed());

        if outcome.is_match() {
            passed += 1;
        } else {
            failed.push((name.clone(), written_artifacts(&outcome)));
        }
        debug!(
            name = %name,
            new_failures = session.reporter.failures() - before,
            "checked"
        );
    }
    (passed, failed)
}

/// `pixelcheck compare-dir` — every reference PNG against the actual PNG
/// of the same name. Returns exit code: 0 = all match, 1 = any failure.
pub fn compare_dir(config: ResolvedConfig, reference: &Path, actual: &Path) -> Result<i32> {
    let mut session = Session::new(config)?;
    let reference_dir = session.reference_path(reference);
    let names = list_pngs(&reference_dir)?;
    info!(total = names.len(), dir = %reference_dir.display(), "comparing images");

    let run_start = Instant::now();
    let (passed, failed) = check_all(&mut session, &reference_dir, actual, &names);

    terminal::print_actionable_summary(&failed);
    terminal::print_summary(
        names.len(),
        passed,
        session.reporter.failures(),
        run_start.elapsed(),
    );

    Ok(session.reporter.exit_code())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixelcheck::Pixel;

    fn config(root: &Path, out: &Path) -> ResolvedConfig {
        ResolvedConfig {
            fixtures_root: root.to_path_buf(),
            artifact_dir: out.to_path_buf(),
        }
    }

    #[test]
    fn list_pngs_is_sorted_and_filtered() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.png", "a.PNG", "notes.txt"] {
            std::fs::write(dir.path().join(name), b"").unwrap();
        }
        std::fs::create_dir(dir.path().join("sub.png")).unwrap();
        let names: Vec<String> = list_pngs(dir.path()).unwrap().into_iter().collect();
        assert_eq!(names, ["a.PNG", "b.png"]);
    }

    #[test]
    fn compare_dir_counts_mismatches_and_missing() {
        let root = tempfile::tempdir().unwrap();
        let refs = root.path().join("ref");
        let actual = root.path().join("actual");
        let out = root.path().join("out");
        std::fs::create_dir_all(&refs).unwrap();
        std::fs::create_dir_all(&actual).unwrap();

        let same = Image::from_pixel(2, 2, Pixel::new(1, 1, 1, 0));
        let changed = Image::from_pixel(2, 2, Pixel::new(9, 1, 1, 0));
        same.save_png(&refs.join("same.png")).unwrap();
        same.save_png(&actual.join("same.png")).unwrap();
        same.save_png(&refs.join("changed.png")).unwrap();
        changed.save_png(&actual.join("changed.png")).unwrap();
        same.save_png(&refs.join("missing.png")).unwrap();

        let code = compare_dir(config(root.path(), &out), Path::new("ref"), &actual).unwrap();
        assert_eq!(code, 1);
        assert!(out.join("changed.png_0_diff.png").exists());
        assert!(out.join("changed.png_0_out.png").exists());
        assert!(!out.join("same.png_0_diff.png").exists());
        assert!(!out.join("missing.png_0_diff.png").exists());
    }

    #[test]
    fn relative_fixtures_root_is_joined_once() {
        // Relative to the crate directory, where the test runs.
        let root = tempfile::tempdir_in(".").unwrap();
        let rel = PathBuf::from(root.path().file_name().unwrap());
        let refs = root.path().join("ref");
        let actual = root.path().join("actual");
        let out = root.path().join("out");
        std::fs::create_dir_all(&refs).unwrap();
        std::fs::create_dir_all(&actual).unwrap();

        let img = Image::from_pixel(2, 2, Pixel::new(7, 7, 7, 0));
        img.save_png(&refs.join("same.png")).unwrap();
        img.save_png(&actual.join("same.png")).unwrap();

        let code = compare(
            config(&rel, &out),
            Path::new("ref/same.png"),
            &actual.join("same.png"),
            3,
        )
        .unwrap();
        assert_eq!(code, 0);

        let code = compare_dir(config(&rel, &out), Path::new("ref"), &actual).unwrap();
        assert_eq!(code, 0);
    }

    #[test]
    fn size_mismatch_lists_no_stale_artifacts() {
        let root = tempfile::tempdir().unwrap();
        let refs = root.path().join("ref");
        let actual = root.path().join("actual");
        let out = root.path().join("out");
        std::fs::create_dir_all(&refs).unwrap();
        std::fs::create_dir_all(&actual).unwrap();
        std::fs::create_dir_all(&out).unwrap();

        Image::new(2, 2).save_png(&refs.join("a.png")).unwrap();
        Image::new(3, 2).save_png(&actual.join("a.png")).unwrap();
        std::fs::write(out.join("a.png_0_diff.png"), b"previous run").unwrap();
        std::fs::write(out.join("a.png_0_out.png"), b"previous run").unwrap();

        let mut session = Session::new(config(root.path(), &out)).unwrap();
        let names = list_pngs(&refs).unwrap();
        let (passed, failed) = check_all(&mut session, &refs, &actual, &names);
        assert_eq!(passed, 0);
        assert_eq!(failed, vec![("a.png".to_string(), None)]);
        assert_eq!(session.reporter.failures(), 1);
    }

    #[test]
    fn pixel_mismatch_lists_written_artifacts() {
        let root = tempfile::tempdir().unwrap();
        let refs = root.path().join("ref");
        let actual = root.path().join("actual");
        let out = root.path().join("out");
        std::fs::create_dir_all(&refs).unwrap();
        std::fs::create_dir_all(&actual).unwrap();

        Image::new(2, 2).save_png(&refs.join("b.png")).unwrap();
        Image::from_pixel(2, 2, Pixel::new(0, 0, 5, 0))
            .save_png(&actual.join("b.png"))
            .unwrap();

        let mut session = Session::new(config(root.path(), &out)).unwrap();
        let names = list_pngs(&refs).unwrap();
        let (_, failed) = check_all(&mut session, &refs, &actual, &names);
        let artifacts = (
            out.join("b.png_0_diff.png").display().to_string(),
            out.join("b.png_0_out.png").display().to_string(),
        );
        assert_eq!(failed, vec![("b.png".to_string(), Some(artifacts))]);
    }

    #[test]
    fn compare_matching_pair_exits_zero() {
        let root = tempfile::tempdir().unwrap();
        let img = Image::from_pixel(3, 3, Pixel::new(4, 5, 6, 0));
        img.save_png(&root.path().join("expected.png")).unwrap();
        img.save_png(&root.path().join("actual.png")).unwrap();

        let code = compare(
            config(root.path(), &root.path().join("out")),
            Path::new("expected.png"),
            &root.path().join("actual.png"),
            12,
        )
        .unwrap();
        assert_eq!(code, 0);
    }

    #[test]
    fn compare_changed_pair_exits_one_and_writes_artifacts() {
        let root = tempfile::tempdir().unwrap();
        let out = root.path().join("out");
        Image::from_pixel(3, 3, Pixel::new(4, 5, 6, 0))
            .save_png(&root.path().join("expected.png"))
            .unwrap();
        let actual = Image::from_pixel(3, 3, Pixel::new(4, 5, 60, 0));
        actual.save_png(&root.path().join("actual.png")).unwrap();

        let code = compare(
            config(root.path(), &out),
            Path::new("expected.png"),
            &root.path().join("actual.png"),
            7,
        )
        .unwrap();
        assert_eq!(code, 1);
        assert!(out.join("actual.png_7_diff.png").exists());
        assert_eq!(
            Image::load_png(&out.join("actual.png_7_out.png")).unwrap(),
            actual
        );
    }
}

//! pixelcheck - image regression assertions
//!
//! Compares an actual image against a reference pixel by pixel, writes an
//! amplified difference image plus a copy of the actual output when they
//! differ, and counts failures so a runner can turn them into an exit code.
//!
//! ```ignore
//! use pixelcheck::{Comparator, Fixtures, Reporter, here};
//!
//! let mut reporter = Reporter::new();
//! let fixtures = Fixtures::new("tests");
//! let actual = render();
//! Comparator::new().compare_to_file(
//!     &mut reporter,
//!     &here!(),
//!     &fixtures.file_path(&["png", "expected.png"]),
//!     Some(&actual),
//! );
//! std::process::exit(reporter.exit_code());
//! ```

pub mod compare;
mod error;
pub mod fixture;
pub mod raster;
pub mod report;

pub use compare::diff::{max_pixel_diff, MAX_DIFF_SENTINEL};
pub use compare::{Comparator, DiffResult, Outcome};
pub use error::{Error, Result};
pub use fixture::Fixtures;
pub use raster::{Image, Pixel};
pub use report::{FailureCounter, Location, Reporter};

use std::path::Path;

use anyhow::{Context, Result};
use pixelcheck::{Image, MAX_DIFF_SENTINEL, max_pixel_diff};

/// `pixelcheck max-diff` — largest raw channel difference between two PNGs.
/// Returns exit code: 0 = identical, 1 = any difference.
pub fn max_diff(a: &Path, b: &Path) -> Result<i32> {
    let left = Image::load_png(a).with_context(|| format!("Failed to load {}", a.display()))?;
    let right = Image::load_png(b).with_context(|| format!("Failed to load {}", b.display()))?;

    let (line, diff) = describe(&left, &right);
    println!("{line}");

    Ok(if diff == 0 { 0 } else { 1 })
}

/// The printed line and the raw metric.
fn describe(left: &Image, right: &Image) -> (String, u32) {
    let diff = max_pixel_diff(Some(left), Some(right));
    if diff == MAX_DIFF_SENTINEL {
        let (lw, lh) = left.dimensions();
        let (rw, rh) = right.dimensions();
        (format!("dimension mismatch: {lw}x{lh} vs {rw}x{rh}"), diff)
    } else {
        (diff.to_string(), diff)
    }
}

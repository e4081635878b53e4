use crate::raster::{ALPHA_MAX, BLUE_MAX, GREEN_MAX, Image, Pixel, RED_MAX};

/// Returned by [`max_pixel_diff`] when the images cannot be compared.
pub const MAX_DIFF_SENTINEL: u32 = u32::MAX;

/// Diff-image pixel for coordinates that did not change.
pub const UNCHANGED: Pixel = Pixel::new(255, 255, 255, 0);

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DiffResult {
    /// Pixels whose packed value differs.
    pub pixels_changed: u64,
    /// Largest amplified red/green/blue difference. Alpha is not included.
    pub max_diff: u32,
}

// The amplification constants below shape the diff image byte for byte.
// They make any nonzero delta visible; they are not a similarity metric.

pub fn amplify_alpha(c1: u32, c2: u32) -> u32 {
    let mut d = c1.abs_diff(c2) * 4;
    if d != 0 {
        d += 128;
    }
    if d > ALPHA_MAX {
        d = ALPHA_MAX / 2;
    }
    d
}

pub fn amplify_red(c1: u32, c2: u32) -> u32 {
    let mut d = c1.abs_diff(c2);
    if d != 0 {
        d += RED_MAX / 2;
    }
    d.min(255)
}

pub fn amplify_green(c1: u32, c2: u32) -> u32 {
    let mut d = c1.abs_diff(c2) * 4;
    if d != 0 {
        d += GREEN_MAX / 2;
    }
    d.min(255)
}

pub fn amplify_blue(c1: u32, c2: u32) -> u32 {
    let mut d = c1.abs_diff(c2) * 4;
    if d != 0 {
        d += BLUE_MAX / 2;
    }
    d.min(255)
}

/// Amplified per-channel difference of two pixels, packed for a diff image.
pub fn amplify(p1: Pixel, p2: Pixel) -> Pixel {
    Pixel::new(
        amplify_red(p1.red(), p2.red()),
        amplify_green(p1.green(), p2.green()),
        amplify_blue(p1.blue(), p2.blue()),
        amplify_alpha(p1.alpha(), p2.alpha()),
    )
}

/// Walk `a` and `b` pixel by pixel, counting changed pixels and tracking
/// the largest amplified colour difference. When `out` is given, each of
/// its pixels receives either the amplified difference or [`UNCHANGED`].
///
/// `a`, `b` and `out` must share dimensions; the caller checks this.
pub fn diff(a: &Image, b: &Image, mut out: Option<&mut Image>) -> DiffResult {
    let mut result = DiffResult::default();

    for y in 0..a.height() {
        for x in 0..a.width() {
            let c1 = a.get_pixel(x, y);
            let c2 = b.get_pixel(x, y);

            let marked = if c1 == c2 {
                UNCHANGED
            } else {
                let d = amplify(c1, c2);
                result.max_diff = result.max_diff.max(d.red()).max(d.green()).max(d.blue());
                result.pixels_changed += 1;
                d
            };

            if let Some(out) = out.as_deref_mut() {
                out.set_pixel(x, y, marked);
            }
        }
    }

    result
}

/// Largest raw (unamplified) difference of any channel at any pixel,
/// alpha included. [`MAX_DIFF_SENTINEL`] if either image is missing or
/// the dimensions differ.
pub fn max_pixel_diff(a: Option<&Image>, b: Option<&Image>) -> u32 {
    let (Some(a), Some(b)) = (a, b) else {
        return MAX_DIFF_SENTINEL;
    };
    if a.dimensions() != b.dimensions() {
        return MAX_DIFF_SENTINEL;
    }

    let mut diff = 0;
    for y in 0..a.height() {
        for x in 0..a.width() {
            let c1 = a.get_pixel(x, y);
            let c2 = b.get_pixel(x, y);
            if c1 == c2 {
                continue;
            }
            diff = diff
                .max(c1.alpha().abs_diff(c2.alpha()))
                .max(c1.red().abs_diff(c2.red()))
                .max(c1.green().abs_diff(c2.green()))
                .max(c1.blue().abs_diff(c2.blue()));
        }
    }
    diff
}

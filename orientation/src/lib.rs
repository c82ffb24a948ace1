//! Best-effort recovery of the dominant parking-space orientation from an
//! aerial photo of a parking area.
//!
//! The pipeline mirrors the classic marking-detection recipe: grayscale →
//! Gaussian blur → adaptive threshold → edge detection → line-segment
//! extraction → angle histogram. There's no accuracy guarantee; callers must
//! treat `None` as "lay the grid out unrotated".

pub mod angle;
pub mod edges;
pub mod filters;
pub mod image;
pub mod segments;

use log::debug;

pub use crate::image::{load_grayscale, GrayF32};
pub use crate::segments::Segment;

const BLUR_KSIZE: usize = 5;
const THRESHOLD_BLOCK_SIZE: usize = 11;
const THRESHOLD_C: f32 = 2.0;
const CANNY_LOW: f32 = 50.0;
const CANNY_HIGH: f32 = 150.0;
const MIN_LINE_LENGTH: f32 = 30.0;

const HISTOGRAM_BINS: usize = 36;
const SNAP_THRESHOLD: f64 = 10.0;
// Checked in this order; the first reference within the threshold wins, which
// is the tie-break when an angle is near two of them.
const COMMON_ANGLES: [f64; 4] = [0.0, 45.0, 90.0, 135.0];

/// Detect the dominant line orientation in an image, in degrees within
/// [0, 180). Returns `None` when no usable lines are found.
pub fn detect_orientation(img: &GrayF32) -> Option<f64> {
    let blurred = filters::gaussian_blur(img, BLUR_KSIZE);
    let binary = filters::adaptive_threshold(&blurred, THRESHOLD_BLOCK_SIZE, THRESHOLD_C);
    let grad = edges::sobel_gradients(&binary);
    let edge_mask = edges::canny(&grad, img.w, img.h, CANNY_LOW, CANNY_HIGH);
    let segments =
        segments::extract_line_segments(&edge_mask, &grad, img.w, img.h, MIN_LINE_LENGTH);
    debug!("{} line segments detected", segments.len());

    let angles: Vec<f64> = segments.iter().map(Segment::angle_degrees).collect();
    let dominant = dominant_angle(&angles)?;
    Some(snap_to_common_angle(dominant))
}

/// The midpoint of the most populated 5° bin of a histogram over [0, 180).
/// `None` for an empty input.
pub fn dominant_angle(angles: &[f64]) -> Option<f64> {
    if angles.is_empty() {
        return None;
    }
    let bin_width = 180.0 / HISTOGRAM_BINS as f64;
    let mut histogram = [0usize; HISTOGRAM_BINS];
    for angle in angles {
        let bin = ((angle / bin_width) as usize).min(HISTOGRAM_BINS - 1);
        histogram[bin] += 1;
    }
    // First max wins on ties.
    let mut dominant_bin = 0;
    for (bin, count) in histogram.iter().enumerate() {
        if *count > histogram[dominant_bin] {
            dominant_bin = bin;
        }
    }
    Some((dominant_bin as f64 + 0.5) * bin_width)
}

/// Snap an angle to the first of the common parking orientations (0°, 45°,
/// 90°, 135°) within 10°; otherwise return it unchanged.
pub fn snap_to_common_angle(angle: f64) -> f64 {
    for reference in COMMON_ANGLES {
        if (angle - reference).abs() < SNAP_THRESHOLD {
            return reference;
        }
    }
    angle
}

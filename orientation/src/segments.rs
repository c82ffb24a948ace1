//! Line-segment extraction from an edge mask by region growing: adjacent edge
//! pixels with compatible gradient orientation are grouped, then each group is
//! fit with a straight segment through its principal axis.

use nalgebra::{Matrix2, SymmetricEigen};
use serde::Serialize;

use crate::angle::{angular_difference, normalize_half_pi};
use crate::edges::Grad;

const NEIGH_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

// Pixels whose line orientation deviates more than this from the region seed
// don't join the region.
const ANGLE_TOLERANCE: f32 = std::f32::consts::PI / 8.0;

// Regions smaller than this can't support a meaningful line fit.
const MIN_REGION_PIXELS: usize = 5;

/// A straight line segment in pixel coordinates.
#[derive(Clone, Debug, Serialize)]
pub struct Segment {
    pub p0: [f32; 2],
    pub p1: [f32; 2],
}

impl Segment {
    pub fn length(&self) -> f32 {
        let dx = self.p1[0] - self.p0[0];
        let dy = self.p1[1] - self.p0[1];
        (dx * dx + dy * dy).sqrt()
    }

    /// Direction of the segment in degrees, normalized into [0, 180).
    pub fn angle_degrees(&self) -> f64 {
        let dy = f64::from(self.p1[1] - self.p0[1]);
        let dx = f64::from(self.p1[0] - self.p0[0]);
        let mut angle = dy.atan2(dx).to_degrees();
        if angle < 0.0 {
            angle += 180.0;
        }
        if angle >= 180.0 {
            angle -= 180.0;
        }
        angle
    }
}

// The orientation of the line passing through a pixel: perpendicular to its
// gradient, folded into [0, π).
#[inline]
fn line_orientation(grad: &Grad, x: usize, y: usize) -> f32 {
    normalize_half_pi(grad.gy.get(x, y).atan2(grad.gx.get(x, y)) + std::f32::consts::FRAC_PI_2)
}

/// Extract line segments from an edge mask, discarding any shorter than
/// `min_len` pixels.
pub fn extract_line_segments(
    edges: &[bool],
    grad: &Grad,
    w: usize,
    h: usize,
    min_len: f32,
) -> Vec<Segment> {
    let mut used = vec![false; w * h];
    let mut segments = Vec::new();
    let mut region: Vec<(usize, usize)> = Vec::new();
    let mut queue: Vec<(usize, usize)> = Vec::new();

    for start_y in 0..h {
        for start_x in 0..w {
            let start_idx = start_y * w + start_x;
            if !edges[start_idx] || used[start_idx] {
                continue;
            }

            let seed_angle = line_orientation(grad, start_x, start_y);
            region.clear();
            queue.clear();
            used[start_idx] = true;
            queue.push((start_x, start_y));

            while let Some((x, y)) = queue.pop() {
                region.push((x, y));
                for (dx, dy) in NEIGH_OFFSETS {
                    let nx = x as isize + dx;
                    let ny = y as isize + dy;
                    if nx < 0 || ny < 0 || nx >= w as isize || ny >= h as isize {
                        continue;
                    }
                    let (nx, ny) = (nx as usize, ny as usize);
                    let nidx = ny * w + nx;
                    if !edges[nidx] || used[nidx] {
                        continue;
                    }
                    if angular_difference(line_orientation(grad, nx, ny), seed_angle)
                        > ANGLE_TOLERANCE
                    {
                        continue;
                    }
                    used[nidx] = true;
                    queue.push((nx, ny));
                }
            }

            if region.len() < MIN_REGION_PIXELS {
                continue;
            }

            if let Some(segment) = fit_segment(&region, min_len) {
                segments.push(segment);
            }
        }
    }

    segments
}

// Least-squares line fit: endpoints are the extreme projections of the region
// onto the principal axis of its covariance.
fn fit_segment(region: &[(usize, usize)], min_len: f32) -> Option<Segment> {
    let n = region.len() as f32;
    let (mut sum_x, mut sum_y) = (0.0f32, 0.0f32);
    for &(x, y) in region {
        sum_x += x as f32;
        sum_y += y as f32;
    }
    let cx = sum_x / n;
    let cy = sum_y / n;

    let (mut sxx, mut syy, mut sxy) = (0.0f32, 0.0f32, 0.0f32);
    for &(x, y) in region {
        let dx = x as f32 - cx;
        let dy = y as f32 - cy;
        sxx += dx * dx;
        syy += dy * dy;
        sxy += dx * dy;
    }

    let eigen = SymmetricEigen::new(Matrix2::new(sxx, sxy, sxy, syy));
    let principal = if eigen.eigenvalues[0] >= eigen.eigenvalues[1] {
        eigen.eigenvectors.column(0).into_owned()
    } else {
        eigen.eigenvectors.column(1).into_owned()
    };

    let mut t_min = f32::MAX;
    let mut t_max = f32::MIN;
    for &(x, y) in region {
        let t = (x as f32 - cx) * principal[0] + (y as f32 - cy) * principal[1];
        t_min = t_min.min(t);
        t_max = t_max.max(t);
    }

    if t_max - t_min < min_len {
        return None;
    }

    Some(Segment {
        p0: [cx + t_min * principal[0], cy + t_min * principal[1]],
        p1: [cx + t_max * principal[0], cy + t_max * principal[1]],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::GrayF32;

    // A gradient field pointing straight down everywhere, so every pixel's
    // line orientation is horizontal.
    fn vertical_grad(w: usize, h: usize) -> Grad {
        let gx = GrayF32::new(w, h);
        let mut gy = GrayF32::new(w, h);
        gy.data.fill(1.0);
        let mut mag = GrayF32::new(w, h);
        mag.data.fill(1.0);
        Grad { gx, gy, mag }
    }

    #[test]
    fn fits_a_horizontal_run_of_edge_pixels() {
        let (w, h) = (64, 64);
        let mut edges = vec![false; w * h];
        for x in 5..55 {
            edges[20 * w + x] = true;
        }
        let grad = vertical_grad(w, h);

        let segments = extract_line_segments(&edges, &grad, w, h, 30.0);
        assert_eq!(segments.len(), 1);
        let seg = &segments[0];
        assert!(seg.length() >= 30.0);
        assert!(seg.angle_degrees().abs() < 1e-3);
    }

    #[test]
    fn short_runs_are_discarded() {
        let (w, h) = (64, 64);
        let mut edges = vec![false; w * h];
        for x in 5..15 {
            edges[20 * w + x] = true;
        }
        let grad = vertical_grad(w, h);

        let segments = extract_line_segments(&edges, &grad, w, h, 30.0);
        assert!(segments.is_empty());
    }

    #[test]
    fn segment_angles_by_direction() {
        let east = Segment {
            p0: [0.0, 0.0],
            p1: [10.0, 0.0],
        };
        assert_eq!(east.angle_degrees(), 0.0);

        let south = Segment {
            p0: [0.0, 0.0],
            p1: [0.0, 10.0],
        };
        assert_eq!(south.angle_degrees(), 90.0);

        let northeast = Segment {
            p0: [0.0, 0.0],
            p1: [10.0, -10.0],
        };
        assert_eq!(northeast.angle_degrees(), 135.0);
    }
}

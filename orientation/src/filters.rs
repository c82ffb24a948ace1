//! Smoothing and thresholding stages preceding edge detection.

use crate::image::GrayF32;

/// The OpenCV convention for deriving sigma from an odd kernel size.
fn sigma_for_ksize(ksize: usize) -> f32 {
    0.3 * ((ksize as f32 - 1.0) * 0.5 - 1.0) + 0.8
}

fn gaussian_kernel(ksize: usize) -> Vec<f32> {
    let sigma = sigma_for_ksize(ksize);
    let half = (ksize / 2) as isize;
    let mut kernel = Vec::with_capacity(ksize);
    let mut sum = 0.0;
    for i in -half..=half {
        let x = i as f32;
        let v = (-x * x / (2.0 * sigma * sigma)).exp();
        kernel.push(v);
        sum += v;
    }
    for v in &mut kernel {
        *v /= sum;
    }
    kernel
}

// Separable convolution with replicated borders.
fn convolve_separable(img: &GrayF32, kernel: &[f32]) -> GrayF32 {
    let half = (kernel.len() / 2) as isize;
    let w = img.w as isize;
    let h = img.h as isize;

    let mut horizontal = GrayF32::new(img.w, img.h);
    for y in 0..img.h {
        for x in 0..w {
            let mut sum = 0.0;
            for (k, weight) in kernel.iter().enumerate() {
                let xx = (x + k as isize - half).clamp(0, w - 1);
                sum += img.get(xx as usize, y) * weight;
            }
            horizontal.set(x as usize, y, sum);
        }
    }

    let mut out = GrayF32::new(img.w, img.h);
    for y in 0..h {
        for x in 0..img.w {
            let mut sum = 0.0;
            for (k, weight) in kernel.iter().enumerate() {
                let yy = (y + k as isize - half).clamp(0, h - 1);
                sum += horizontal.get(x, yy as usize) * weight;
            }
            out.set(x, y as usize, sum);
        }
    }
    out
}

/// Gaussian blur with an odd kernel size.
pub fn gaussian_blur(img: &GrayF32, ksize: usize) -> GrayF32 {
    convolve_separable(img, &gaussian_kernel(ksize))
}

/// Inverted binary adaptive threshold: a pixel becomes 255 when it falls at or
/// below the Gaussian-weighted local mean minus `c`, and 0 otherwise. Picks
/// out locally dark structure, like lane markings shadowed against bright
/// pavement in an orthophoto.
pub fn adaptive_threshold(img: &GrayF32, block_size: usize, c: f32) -> GrayF32 {
    let local_mean = convolve_separable(img, &gaussian_kernel(block_size));
    let mut out = GrayF32::new(img.w, img.h);
    for i in 0..img.data.len() {
        out.data[i] = if img.data[i] > local_mean.data[i] - c {
            0.0
        } else {
            255.0
        };
    }
    out
}

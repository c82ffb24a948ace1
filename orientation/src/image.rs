//! Owned single-channel f32 image in row-major layout.

use std::path::Path;

use anyhow::Result;
use image::RgbImage;

/// A grayscale image holding one f32 per pixel, suited for the numeric stages
/// of the pipeline.
#[derive(Clone, Debug)]
pub struct GrayF32 {
    /// Image width in pixels
    pub w: usize,
    /// Image height in pixels
    pub h: usize,
    /// Backing storage in row-major order
    pub data: Vec<f32>,
}

impl GrayF32 {
    /// Construct a zero-initialized buffer of size `w × h`.
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            data: vec![0.0; w * h],
        }
    }

    /// Convert (x, y) to a linear index into `data`.
    #[inline]
    pub fn idx(&self, x: usize, y: usize) -> usize {
        y * self.w + x
    }

    /// Get the pixel value at (x, y).
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.data[self.idx(x, y)]
    }

    /// Set the pixel value at (x, y).
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, v: f32) {
        let i = self.idx(x, y);
        self.data[i] = v;
    }

    /// BT.601 luma conversion from a 3-channel color image.
    pub fn from_rgb(img: &RgbImage) -> Self {
        let w = img.width() as usize;
        let h = img.height() as usize;
        let mut out = GrayF32::new(w, h);
        for (x, y, pixel) in img.enumerate_pixels() {
            let [r, g, b] = pixel.0;
            let luma = 0.299 * f32::from(r) + 0.587 * f32::from(g) + 0.114 * f32::from(b);
            out.set(x as usize, y as usize, luma);
        }
        out
    }
}

/// Read an image file into a grayscale buffer.
pub fn load_grayscale<P: AsRef<Path>>(path: P) -> Result<GrayF32> {
    let img = image::open(path.as_ref())?.to_rgb8();
    Ok(GrayF32::from_rgb(&img))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn luma_of_gray_pixels_is_identity() {
        let mut img = RgbImage::new(2, 1);
        img.put_pixel(0, 0, image::Rgb([100, 100, 100]));
        img.put_pixel(1, 0, image::Rgb([0, 0, 0]));
        let gray = GrayF32::from_rgb(&img);
        assert!((gray.get(0, 0) - 100.0).abs() < 0.01);
        assert!((gray.get(1, 0)).abs() < 0.01);
    }
}

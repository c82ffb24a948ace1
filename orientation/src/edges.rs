use crate::image::GrayF32;

type Kernel3 = [[f32; 3]; 3];

const SOBEL_KERNEL_X: Kernel3 = [[-1.0, 0.0, 1.0], [-2.0, 0.0, 2.0], [-1.0, 0.0, 1.0]];
const SOBEL_KERNEL_Y: Kernel3 = [[-1.0, -2.0, -1.0], [0.0, 0.0, 0.0], [1.0, 2.0, 1.0]];

#[derive(Clone, Debug)]
pub struct Grad {
    pub gx: GrayF32,
    pub gy: GrayF32,
    pub mag: GrayF32,
}

pub fn sobel_gradients(l: &GrayF32) -> Grad {
    let w = l.w;
    let h = l.h;
    let mut gx = GrayF32::new(w, h);
    let mut gy = GrayF32::new(w, h);
    let mut mag = GrayF32::new(w, h);

    if w == 0 || h == 0 {
        return Grad { gx, gy, mag };
    }

    for y in 0..h {
        let y_idx = [y.saturating_sub(1), y, (y + 1).min(h - 1)];
        for x in 0..w {
            let x_idx = [x.saturating_sub(1), x, (x + 1).min(w - 1)];

            let mut sum_x = 0.0;
            let mut sum_y = 0.0;
            for (ky, &yy) in y_idx.iter().enumerate() {
                let kernel_row_x = &SOBEL_KERNEL_X[ky];
                let kernel_row_y = &SOBEL_KERNEL_Y[ky];
                for (&xx, (&kx_weight, &ky_weight)) in x_idx
                    .iter()
                    .zip(kernel_row_x.iter().zip(kernel_row_y.iter()))
                {
                    let sample = l.get(xx, yy);
                    sum_x += sample * kx_weight;
                    sum_y += sample * ky_weight;
                }
            }

            gx.set(x, y, sum_x);
            gy.set(x, y, sum_y);
            mag.set(x, y, (sum_x * sum_x + sum_y * sum_y).sqrt());
        }
    }

    Grad { gx, gy, mag }
}

/// Canny-style edge detection: non-maximum suppression along the gradient
/// direction, then double-threshold hysteresis. Returns a boolean edge mask.
/// Ties with a neighbor survive suppression, so a perfectly symmetric step
/// edge keeps both candidate rows instead of vanishing.
pub fn canny(grad: &Grad, w: usize, h: usize, low: f32, high: f32) -> Vec<bool> {
    let mut candidate = vec![false; w * h];
    let mut strong = vec![false; w * h];
    if w < 3 || h < 3 {
        return candidate;
    }

    for y in 1..h - 1 {
        for x in 1..w - 1 {
            let mag = grad.mag.get(x, y);
            if mag < low {
                continue;
            }

            let gx = grad.gx.get(x, y);
            let gy = grad.gy.get(x, y);
            let mut angle_deg = gy.atan2(gx).to_degrees();
            if angle_deg < 0.0 {
                angle_deg += 180.0;
            }

            let (n1x, n1y, n2x, n2y) = if angle_deg < 22.5 || angle_deg >= 157.5 {
                (x - 1, y, x + 1, y)
            } else if angle_deg < 67.5 {
                (x + 1, y - 1, x - 1, y + 1)
            } else if angle_deg < 112.5 {
                (x, y - 1, x, y + 1)
            } else {
                (x - 1, y - 1, x + 1, y + 1)
            };

            if mag < grad.mag.get(n1x, n1y) || mag < grad.mag.get(n2x, n2y) {
                continue;
            }

            let idx = y * w + x;
            candidate[idx] = true;
            if mag >= high {
                strong[idx] = true;
            }
        }
    }

    // Hysteresis: keep candidates connected to a strong pixel.
    let mut edges = vec![false; w * h];
    let mut queue: Vec<usize> = (0..w * h).filter(|&i| strong[i]).collect();
    for &i in &queue {
        edges[i] = true;
    }
    while let Some(idx) = queue.pop() {
        let x = (idx % w) as isize;
        let y = (idx / w) as isize;
        for dy in -1..=1 {
            for dx in -1..=1 {
                let (nx, ny) = (x + dx, y + dy);
                if nx < 0 || ny < 0 || nx >= w as isize || ny >= h as isize {
                    continue;
                }
                let nidx = ny as usize * w + nx as usize;
                if candidate[nidx] && !edges[nidx] {
                    edges[nidx] = true;
                    queue.push(nidx);
                }
            }
        }
    }
    edges
}

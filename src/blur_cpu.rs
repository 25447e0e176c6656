//! Separable Gaussian blur over premultiplied RGBA8.
//!
//! The mapper hands out fractional blur radii (e.g. 3.6 px for f/2.8); this
//! module turns one into an integer kernel radius with a matching sigma and
//! runs two clamped convolution passes with Q16 fixed-point weights.

use crate::{ObscuraError, ObscuraResult};

/// Blur `src` by `blur_px` pixels. `blur_px <= 0` is identity.
pub fn blur_rgba8_premul(
    src: &[u8],
    width: u32,
    height: u32,
    blur_px: f64,
) -> ObscuraResult<Vec<u8>> {
    let expected_len = (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| ObscuraError::evaluation("blur buffer size overflow"))?;
    if src.len() != expected_len {
        return Err(ObscuraError::evaluation(
            "blur_rgba8_premul expects src matching width*height*4",
        ));
    }
    if !blur_px.is_finite() {
        return Err(ObscuraError::validation("blur_px must be finite"));
    }
    if blur_px <= 0.0 {
        return Ok(src.to_vec());
    }

    let radius = blur_px.ceil() as u32;
    let sigma = (blur_px / 2.0).max(0.5);
    let kernel = gaussian_kernel_q16(radius, sigma)?;

    let mut tmp = vec![0u8; expected_len];
    let mut out = vec![0u8; expected_len];
    convolve_pass(src, &mut tmp, width, height, &kernel, Axis::Horizontal);
    convolve_pass(&tmp, &mut out, width, height, &kernel, Axis::Vertical);
    Ok(out)
}

#[derive(Clone, Copy)]
enum Axis {
    Horizontal,
    Vertical,
}

fn gaussian_kernel_q16(radius: u32, sigma: f64) -> ObscuraResult<Vec<u32>> {
    if radius == 0 {
        return Ok(vec![1 << 16]);
    }
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(ObscuraError::validation("blur sigma must be > 0"));
    }

    let r = radius as i32;
    let mut weights_f = Vec::<f64>::with_capacity((2 * r + 1) as usize);
    let mut sum = 0.0f64;
    let denom = 2.0 * sigma * sigma;
    for i in -r..=r {
        let x = f64::from(i);
        let w = (-x * x / denom).exp();
        weights_f.push(w);
        sum += w;
    }
    if sum <= 0.0 {
        return Err(ObscuraError::evaluation("gaussian kernel sum is zero"));
    }

    // Quantize to Q16 and push any rounding drift into the center tap so the
    // kernel sums to exactly 1.0.
    let mut weights = Vec::<u32>::with_capacity(weights_f.len());
    let mut acc: i64 = 0;
    for &wf in &weights_f {
        let q = ((wf / sum) * 65536.0).round() as i64;
        let q = q.clamp(0, 65536);
        weights.push(q as u32);
        acc += q;
    }
    let delta = 65536i64 - acc;
    if delta != 0 {
        let mid = weights.len() / 2;
        let mid_val = i64::from(weights[mid]);
        weights[mid] = (mid_val + delta).clamp(0, 65536) as u32;
    }

    Ok(weights)
}

fn convolve_pass(src: &[u8], dst: &mut [u8], width: u32, height: u32, k: &[u32], axis: Axis) {
    let radius = (k.len() / 2) as i32;
    let w = width as i32;
    let h = height as i32;
    for y in 0..h {
        for x in 0..w {
            let mut acc = [0u64; 4];
            for (ki, &kw) in k.iter().enumerate() {
                let d = ki as i32 - radius;
                let (sx, sy) = match axis {
                    Axis::Horizontal => ((x + d).clamp(0, w - 1), y),
                    Axis::Vertical => (x, (y + d).clamp(0, h - 1)),
                };
                let idx = ((sy * w + sx) as usize) * 4;
                for c in 0..4 {
                    acc[c] += u64::from(kw) * u64::from(src[idx + c]);
                }
            }
            let out_idx = ((y * w + x) as usize) * 4;
            for c in 0..4 {
                dst[out_idx + c] = q16_to_u8(acc[c]);
            }
        }
    }
}

fn q16_to_u8(acc: u64) -> u8 {
    let v = (acc + 32768) >> 16;
    v.min(255) as u8
}

//! Premultiplied RGBA8 compositing primitives: source-over with an extra
//! opacity factor, CSS-style brightness scaling, and a clipped positioned
//! blit for the translated subject and ghost layers.

use crate::error::ObscuraResult;

pub type PremulRgba8 = [u8; 4];

/// Source-over `src` onto `dst`, attenuated by `opacity`.
pub fn over(dst: PremulRgba8, src: PremulRgba8, opacity: f32) -> PremulRgba8 {
    let opacity = opacity.clamp(0.0, 1.0);
    if opacity <= 0.0 || src[3] == 0 {
        return dst;
    }

    let op = ((opacity * 255.0).round() as i32).clamp(0, 255) as u16;
    let sa = mul_div255(u16::from(src[3]), op);
    if sa == 0 {
        return dst;
    }

    let inv = 255u16 - u16::from(sa);

    let mut out = [0u8; 4];
    out[3] = add_sat_u8(sa, mul_div255(u16::from(dst[3]), inv));

    for i in 0..3 {
        let sc = mul_div255(u16::from(src[i]), op);
        let dc = mul_div255(u16::from(dst[i]), inv);
        out[i] = add_sat_u8(sc, dc);
    }
    out
}

/// Source-over an equal-sized buffer onto `dst`.
pub fn over_in_place(dst: &mut [u8], src: &[u8], opacity: f32) -> ObscuraResult<()> {
    if dst.len() != src.len() || dst.len() % 4 != 0 {
        return Err(crate::ObscuraError::evaluation(
            "over_in_place expects equal-length rgba8 buffers",
        ));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]], opacity);
        d.copy_from_slice(&out);
    }
    Ok(())
}

/// Multiply the color channels of a premultiplied buffer by `factor`,
/// saturating at the pixel's alpha.
///
/// This is CSS `brightness()`: factors above 1 push toward white but a
/// premultiplied channel can never exceed its alpha.
pub fn scale_brightness_in_place(buf: &mut [u8], factor: f64) -> ObscuraResult<()> {
    if buf.len() % 4 != 0 {
        return Err(crate::ObscuraError::evaluation(
            "scale_brightness_in_place expects an rgba8 buffer",
        ));
    }
    if !factor.is_finite() || factor < 0.0 {
        return Err(crate::ObscuraError::validation(
            "brightness factor must be finite and >= 0",
        ));
    }
    if factor == 1.0 {
        return Ok(());
    }

    for px in buf.chunks_exact_mut(4) {
        let a = px[3];
        for c in px.iter_mut().take(3) {
            let scaled = (f64::from(*c) * factor).round();
            *c = scaled.clamp(0.0, f64::from(a)) as u8;
        }
    }
    Ok(())
}

/// Source-over `src` onto `dst` at integer offset `(dx, dy)`, clipping to
/// the destination bounds.
#[allow(clippy::too_many_arguments)]
pub fn blit_over(
    dst: &mut [u8],
    dst_w: u32,
    dst_h: u32,
    src: &[u8],
    src_w: u32,
    src_h: u32,
    dx: i32,
    dy: i32,
    opacity: f32,
) -> ObscuraResult<()> {
    check_buffer("blit_over dst", dst.len(), dst_w, dst_h)?;
    check_buffer("blit_over src", src.len(), src_w, src_h)?;

    for sy in 0..src_h as i64 {
        let ty = sy + i64::from(dy);
        if ty < 0 || ty >= i64::from(dst_h) {
            continue;
        }
        for sx in 0..src_w as i64 {
            let tx = sx + i64::from(dx);
            if tx < 0 || tx >= i64::from(dst_w) {
                continue;
            }
            let si = ((sy as usize) * (src_w as usize) + sx as usize) * 4;
            let di = ((ty as usize) * (dst_w as usize) + tx as usize) * 4;
            let out = over(
                [dst[di], dst[di + 1], dst[di + 2], dst[di + 3]],
                [src[si], src[si + 1], src[si + 2], src[si + 3]],
                opacity,
            );
            dst[di..di + 4].copy_from_slice(&out);
        }
    }
    Ok(())
}

fn check_buffer(what: &str, len: usize, w: u32, h: u32) -> ObscuraResult<()> {
    let expected = (w as usize)
        .checked_mul(h as usize)
        .and_then(|v| v.checked_mul(4));
    if expected != Some(len) {
        return Err(crate::ObscuraError::evaluation(format!(
            "{what} expects a buffer matching width*height*4"
        )));
    }
    Ok(())
}

fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}

fn add_sat_u8(a: u8, b: u8) -> u8 {
    a.saturating_add(b)
}

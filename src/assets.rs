use std::path::Path;

use anyhow::Context;

use crate::error::ObscuraResult;

/// A decoded image, held as premultiplied RGBA8.
#[derive(Clone, Debug)]
pub struct PreparedImage {
    pub width: u32,
    pub height: u32,
    pub rgba8_premul: Vec<u8>,
}

impl PreparedImage {
    /// Build from straight-alpha RGBA8 pixels, premultiplying in place.
    pub fn from_rgba8(width: u32, height: u32, mut rgba8: Vec<u8>) -> ObscuraResult<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|v| v.checked_mul(4))
            .ok_or_else(|| crate::ObscuraError::validation("image size overflow"))?;
        if rgba8.len() != expected {
            return Err(crate::ObscuraError::validation(
                "image buffer must match width*height*4",
            ));
        }
        premultiply_rgba8_in_place(&mut rgba8);
        Ok(Self {
            width,
            height,
            rgba8_premul: rgba8,
        })
    }
}

/// Decode PNG/JPEG bytes into a premultiplied RGBA8 image.
pub fn decode_image(bytes: &[u8]) -> ObscuraResult<PreparedImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    PreparedImage::from_rgba8(width, height, rgba.into_raw())
}

/// Read and decode an image file.
pub fn load_image(path: &Path) -> ObscuraResult<PreparedImage> {
    let bytes =
        std::fs::read(path).with_context(|| format!("read image '{}'", path.display()))?;
    decode_image(&bytes)
}

fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

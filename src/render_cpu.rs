//! CPU frame renderer: evaluates the layer styles for a snapshot and
//! composites background, subject and ghost into one RGBA8 frame.

use crate::{
    assets::PreparedImage,
    blur_cpu::blur_rgba8_premul,
    composite_cpu::{blit_over, over_in_place, scale_brightness_in_place},
    core::{Canvas, SubjectState},
    error::ObscuraResult,
    params::ExposureParams,
    style::{LayerStyle, eval_frame},
};

/// One rendered frame.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
    pub premultiplied: bool,
}

/// Render one frame of the scene.
///
/// Layer order matches the original shell: background below, subject above
/// it at its sway offset, ghost (when the shutter is slow enough) on top at
/// the sway offset plus its fixed lead. The subject and ghost are pinned to
/// the top-left edge vertically; only x animates.
#[tracing::instrument(skip(background, subject_img), fields(canvas_w = canvas.width, canvas_h = canvas.height))]
pub fn render_frame(
    canvas: Canvas,
    background: &PreparedImage,
    subject_img: &PreparedImage,
    params: &ExposureParams,
    subject: &SubjectState,
) -> ObscuraResult<FrameRGBA> {
    let styles = eval_frame(params, subject);
    tracing::debug!(ghost = styles.ghost.is_some(), "evaluated frame styles");

    let mut frame = vec![0u8; (canvas.width as usize) * (canvas.height as usize) * 4];

    let bg = style_layer(background, &styles.background)?;
    if background.width == canvas.width && background.height == canvas.height {
        // The common case: the background is the stage.
        over_in_place(&mut frame, &bg, 1.0)?;
    } else {
        blit_over(
            &mut frame,
            canvas.width,
            canvas.height,
            &bg,
            background.width,
            background.height,
            0,
            0,
            1.0,
        )?;
    }

    let subj = style_layer(subject_img, &styles.subject)?;
    blit_over(
        &mut frame,
        canvas.width,
        canvas.height,
        &subj,
        subject_img.width,
        subject_img.height,
        styles.subject.translate_x_px,
        0,
        styles.subject.opacity as f32,
    )?;

    if let Some(ghost) = &styles.ghost {
        let ghost_px = style_layer(subject_img, ghost)?;
        blit_over(
            &mut frame,
            canvas.width,
            canvas.height,
            &ghost_px,
            subject_img.width,
            subject_img.height,
            ghost.translate_x_px,
            0,
            ghost.opacity as f32,
        )?;
    }

    Ok(FrameRGBA {
        width: canvas.width,
        height: canvas.height,
        data: frame,
        premultiplied: true,
    })
}

/// Apply a layer's brightness and blur to a copy of its source pixels.
fn style_layer(img: &PreparedImage, style: &LayerStyle) -> ObscuraResult<Vec<u8>> {
    let mut px = img.rgba8_premul.clone();
    scale_brightness_in_place(&mut px, style.brightness)?;
    blur_rgba8_premul(&px, img.width, img.height, style.blur_px)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(width: u32, height: u32, rgba: [u8; 4]) -> PreparedImage {
        let data = rgba.repeat((width * height) as usize);
        PreparedImage {
            width,
            height,
            rgba8_premul: data,
        }
    }

    fn sharp_params() -> ExposureParams {
        // Focus on the subject depth, narrow aperture, fast shutter: every
        // derived effect except brightness is inert.
        ExposureParams {
            iso: 400,
            focus_m: 2.0,
            shutter_secs: 0.5,
            aperture_f: 16.0,
        }
    }

    #[test]
    fn opaque_subject_covers_background() {
        let canvas = Canvas::new(4, 4).unwrap();
        let bg = solid(4, 4, [0, 80, 0, 255]);
        let subj = solid(4, 4, [120, 0, 0, 255]);

        let frame = render_frame(
            canvas,
            &bg,
            &subj,
            &sharp_params(),
            &SubjectState::default(),
        )
        .unwrap();

        assert_eq!(frame.width, 4);
        assert!(frame.premultiplied);
        assert_eq!(&frame.data[0..4], &[120, 0, 0, 255]);
    }

    #[test]
    fn undersized_background_leaves_canvas_edge_clear() {
        let canvas = Canvas::new(3, 1).unwrap();
        let bg = solid(2, 1, [0, 80, 0, 255]);
        let subj = PreparedImage {
            width: 1,
            height: 1,
            rgba8_premul: vec![0, 0, 0, 0],
        };

        let frame = render_frame(
            canvas,
            &bg,
            &subj,
            &sharp_params(),
            &SubjectState::default(),
        )
        .unwrap();

        assert_eq!(&frame.data[0..4], &[0, 128, 0, 255]);
        assert_eq!(&frame.data[8..12], &[0, 0, 0, 0]);
    }

    #[test]
    fn sway_offset_shifts_subject() {
        let canvas = Canvas::new(4, 1).unwrap();
        let bg = solid(4, 1, [0, 80, 0, 255]);
        let subj = solid(1, 1, [120, 0, 0, 255]);

        let state = SubjectState::default().with_offset(2);
        let frame = render_frame(canvas, &bg, &subj, &sharp_params(), &state).unwrap();

        // Background shows through at x=0 (f/16 brightness 1.6 lifts the
        // green channel), subject lands at x=2.
        assert_eq!(&frame.data[0..4], &[0, 128, 0, 255]);
        assert_eq!(&frame.data[8..12], &[120, 0, 0, 255]);
    }

    #[test]
    fn slow_shutter_adds_ghost_lead() {
        let canvas = Canvas::new(20, 1).unwrap();
        let bg = solid(20, 1, [0, 0, 0, 255]);
        let subj = solid(1, 1, [100, 100, 100, 255]);

        let mut params = sharp_params();
        params.shutter_secs = 0.1;
        let frame = render_frame(canvas, &bg, &subj, &params, &SubjectState::default()).unwrap();

        // Ghost sits at x = 0 + 15; at opacity 0.72 over black it reads as
        // a dimmed copy of the (already 0.8x dimmed) subject.
        let ghost_px = &frame.data[15 * 4..15 * 4 + 4];
        assert!(ghost_px[0] > 0);
        assert!(ghost_px[0] < 100);

        let mut fast = params;
        fast.shutter_secs = 0.5;
        let no_ghost = render_frame(canvas, &bg, &subj, &fast, &SubjectState::default()).unwrap();
        assert_eq!(&no_ghost.data[15 * 4..15 * 4 + 4], &[0, 0, 0, 255]);
    }

    #[test]
    fn iso_scales_rendered_subject_brightness() {
        let canvas = Canvas::new(1, 1).unwrap();
        let bg = solid(1, 1, [0, 0, 0, 255]);
        let subj = solid(1, 1, [60, 60, 60, 255]);

        let at400 = render_frame(
            canvas,
            &bg,
            &subj,
            &sharp_params(),
            &SubjectState::default(),
        )
        .unwrap();

        let mut hot = sharp_params();
        hot.iso = 800;
        let at800 =
            render_frame(canvas, &bg, &subj, &hot, &SubjectState::default()).unwrap();

        assert_eq!(at400.data[0], 60);
        assert_eq!(at800.data[0], 120);
    }
}

//! Integration tests for the CPU renderer over synthetic scenes.

use obscura::{Canvas, ExposureParams, PreparedImage, SubjectState, render_frame};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

fn solid(width: u32, height: u32, rgba: [u8; 4]) -> PreparedImage {
    PreparedImage::from_rgba8(width, height, rgba.repeat((width * height) as usize)).unwrap()
}

/// Transparent except for one opaque gray pixel at `(x, y)`.
fn dot(width: u32, height: u32, x: u32, y: u32, gray: u8) -> PreparedImage {
    let mut data = vec![0u8; (width * height * 4) as usize];
    let i = ((y * width + x) * 4) as usize;
    data[i..i + 4].copy_from_slice(&[gray, gray, gray, 255]);
    PreparedImage::from_rgba8(width, height, data).unwrap()
}

fn in_focus_params() -> ExposureParams {
    ExposureParams {
        iso: 400,
        focus_m: 2.0,
        shutter_secs: 0.5,
        aperture_f: 16.0,
    }
}

#[test]
fn ghost_layer_is_the_only_difference_across_the_shutter_threshold() {
    init_tracing();

    let canvas = Canvas::new(32, 8).unwrap();
    let bg = solid(32, 8, [0, 0, 0, 255]);
    let subj = dot(32, 8, 2, 4, 200);

    let fast = render_frame(canvas, &bg, &subj, &in_focus_params(), &SubjectState::default())
        .unwrap();

    let mut slow_params = in_focus_params();
    slow_params.shutter_secs = 0.1;
    let slow =
        render_frame(canvas, &bg, &subj, &slow_params, &SubjectState::default()).unwrap();

    // The subject pixel itself is identical in both frames.
    let subj_idx = ((4 * 32 + 2) * 4) as usize;
    assert_eq!(&fast.data[subj_idx..subj_idx + 4], &slow.data[subj_idx..subj_idx + 4]);

    // The ghost appears 15px ahead only in the slow frame.
    let ghost_idx = ((4 * 32 + 17) * 4) as usize;
    assert_eq!(&fast.data[ghost_idx..ghost_idx + 4], &[0, 0, 0, 255]);
    assert!(slow.data[ghost_idx] > 0);
}

#[test]
fn defocus_blurs_the_subject() {
    init_tracing();

    let canvas = Canvas::new(9, 9).unwrap();
    let bg = solid(9, 9, [0, 0, 0, 255]);
    let subj = dot(9, 9, 4, 4, 200);

    let sharp = render_frame(canvas, &bg, &subj, &in_focus_params(), &SubjectState::default())
        .unwrap();

    let mut defocused_params = in_focus_params();
    defocused_params.focus_m = 2.6; // |2 - 2.6| * 5 = 3px blur
    let soft =
        render_frame(canvas, &bg, &subj, &defocused_params, &SubjectState::default()).unwrap();

    let center = ((4 * 9 + 4) * 4) as usize;
    let neighbor = ((4 * 9 + 5) * 4) as usize;

    assert_eq!(sharp.data[center], 200);
    assert_eq!(sharp.data[neighbor], 0);

    // Blur moves energy off the center pixel into its neighbors.
    assert!(soft.data[center] < 200);
    assert!(soft.data[neighbor] > 0);
}

#[test]
fn narrow_aperture_keeps_background_sharp_wide_aperture_blurs_it() {
    init_tracing();

    let canvas = Canvas::new(9, 1).unwrap();
    let bg = dot(9, 1, 4, 0, 200);
    let subj = PreparedImage::from_rgba8(1, 1, vec![0, 0, 0, 0]).unwrap();

    let narrow = render_frame(canvas, &bg, &subj, &in_focus_params(), &SubjectState::default())
        .unwrap();
    // f/16: blur 0, brightness 1.6 saturates the opaque dot's alpha bound.
    assert_eq!(narrow.data[4 * 4 + 3], 255);
    assert_eq!(narrow.data[5 * 4], 0);

    let mut wide_params = in_focus_params();
    wide_params.aperture_f = 1.4;
    let wide =
        render_frame(canvas, &bg, &subj, &wide_params, &SubjectState::default()).unwrap();
    // f/1.4: (10 - 1.4) * 0.5 = 4.3px of blur spreads the dot.
    assert!(wide.data[5 * 4] > 0);
    assert!(wide.data[4 * 4] < narrow.data[4 * 4]);
}

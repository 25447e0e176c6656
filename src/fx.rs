//! The exposure/visual mapper: pure derivations from a parameter snapshot.
//!
//! Every function here is total over the slider-bounded input domain and
//! order-insensitive; nothing carries state across calls. The only temporal
//! behavior in the system (the subject sway) lives in [`crate::osc`].

use crate::{core::SubjectState, params::ExposureParams};

/// ISO at which the subject renders at brightness 1.0.
pub const ISO_BASELINE: f64 = 400.0;

/// Blur gain per meter of defocus.
pub const DEPTH_BLUR_PX_PER_M: f64 = 5.0;

/// Cap on defocus blur, in pixels.
pub const MAX_DEPTH_BLUR_PX: f64 = 10.0;

/// Shutter speeds at or above this never show a ghost trail.
pub const GHOST_SHUTTER_THRESHOLD_SECS: f64 = 0.2;

/// The ghost renders this much dimmer than the primary subject.
pub const GHOST_BRIGHTNESS_FACTOR: f64 = 0.8;

/// Fixed horizontal lead of the ghost ahead of the subject, in pixels.
pub const GHOST_LEAD_PX: i32 = 15;

/// Subject brightness factor, linear around a baseline of ISO 400.
pub fn subject_brightness(iso: u32) -> f64 {
    f64::from(iso) / ISO_BASELINE
}

/// Blur radius in pixels for a point at `depth_m` when the lens focuses at
/// `focus_m`. Zero in focus, growing 5 px per meter of defocus, capped at 10.
pub fn blur_for_depth(depth_m: f64, focus_m: f64) -> f64 {
    ((depth_m - focus_m).abs() * DEPTH_BLUR_PX_PER_M).min(MAX_DEPTH_BLUR_PX)
}

/// Background blur radius in pixels. Wider apertures (lower f-stops) blur
/// more; f/10 and narrower leave the background sharp.
pub fn background_blur(aperture_f: f64) -> f64 {
    ((10.0 - aperture_f) * 0.5).max(0.0)
}

/// Background brightness factor, floored at 0.5 however far the aperture
/// closes.
pub fn background_brightness(aperture_f: f64) -> f64 {
    (aperture_f / 10.0).max(0.5)
}

/// Ghost trail opacity. Absent (exactly 0) at shutter speeds of 0.2 s and
/// above; below the threshold it rises as the shutter slows.
pub fn ghost_opacity(shutter_secs: f64) -> f64 {
    if shutter_secs < GHOST_SHUTTER_THRESHOLD_SECS {
        ((1.0 - shutter_secs) * 0.8).clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Ghost brightness: the subject's brightness, dimmed.
pub fn ghost_brightness(iso: u32) -> f64 {
    subject_brightness(iso) * GHOST_BRIGHTNESS_FACTOR
}

/// The full derived effect set for one parameter snapshot.
///
/// Recomputed on every change, never stored: a pure function of the current
/// [`ExposureParams`] and [`SubjectState`], with no hysteresis across
/// recomputation.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct VisualEffects {
    pub subject_brightness: f64,
    pub subject_blur_px: f64,
    pub background_blur_px: f64,
    pub background_brightness: f64,
    pub ghost_opacity: f64,
    pub ghost_brightness: f64,
    pub ghost_blur_px: f64,
}

impl VisualEffects {
    /// Derive every effect value from the snapshot.
    pub fn derive(params: &ExposureParams, subject: &SubjectState) -> Self {
        let subject_blur_px = blur_for_depth(subject.depth_m, params.focus_m);
        Self {
            subject_brightness: subject_brightness(params.iso),
            subject_blur_px,
            background_blur_px: background_blur(params.aperture_f),
            background_brightness: background_brightness(params.aperture_f),
            ghost_opacity: ghost_opacity(params.shutter_secs),
            ghost_brightness: ghost_brightness(params.iso),
            // The ghost is a copy of the subject, so it shares its defocus.
            ghost_blur_px: subject_blur_px,
        }
    }

    /// Whether the ghost layer renders at all for this snapshot.
    pub fn ghost_visible(&self) -> bool {
        self.ghost_opacity > 0.0
    }
}

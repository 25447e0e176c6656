use crate::error::{ObscuraError, ObscuraResult};

/// Legal ISO sensitivity range.
pub const ISO_MIN: u32 = 100;
pub const ISO_MAX: u32 = 1600;

/// Legal focus distance range in meters.
pub const FOCUS_MIN_M: f64 = 1.0;
pub const FOCUS_MAX_M: f64 = 10.0;

/// Legal shutter speed range in seconds.
pub const SHUTTER_MIN_SECS: f64 = 0.01;
pub const SHUTTER_MAX_SECS: f64 = 1.0;

/// Legal aperture range in f-stops.
pub const APERTURE_MIN_F: f64 = 1.4;
pub const APERTURE_MAX_F: f64 = 16.0;

/// The four exposure controls, owned by the hosting shell and handed to the
/// mapper as a snapshot on every change.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ExposureParams {
    /// Sensor sensitivity; brightness is linear around a baseline of 400.
    pub iso: u32,
    /// Lens focus distance in meters.
    pub focus_m: f64,
    /// Exposure duration in seconds.
    pub shutter_secs: f64,
    /// Lens opening in f-stops; lower is wider.
    pub aperture_f: f64,
}

impl Default for ExposureParams {
    fn default() -> Self {
        // The original shell's initial slider positions.
        Self {
            iso: 400,
            focus_m: 3.0,
            shutter_secs: 0.01,
            aperture_f: 2.8,
        }
    }
}

impl ExposureParams {
    /// Check every field against its slider bounds.
    ///
    /// The mapper itself is total; validation belongs at the boundary where
    /// a shell or a JSON document feeds parameters in.
    pub fn validate(&self) -> ObscuraResult<()> {
        if !(ISO_MIN..=ISO_MAX).contains(&self.iso) {
            return Err(ObscuraError::validation(format!(
                "iso {} out of range [{ISO_MIN},{ISO_MAX}]",
                self.iso
            )));
        }
        check_range("focus_m", self.focus_m, FOCUS_MIN_M, FOCUS_MAX_M)?;
        check_range(
            "shutter_secs",
            self.shutter_secs,
            SHUTTER_MIN_SECS,
            SHUTTER_MAX_SECS,
        )?;
        check_range("aperture_f", self.aperture_f, APERTURE_MIN_F, APERTURE_MAX_F)?;
        Ok(())
    }

    /// Clamp every field into its legal interval.
    ///
    /// This is the slider-bounds behavior of the original shell expressed as
    /// data; non-finite floats clamp to the low bound.
    pub fn clamped(self) -> Self {
        Self {
            iso: self.iso.clamp(ISO_MIN, ISO_MAX),
            focus_m: clamp_finite(self.focus_m, FOCUS_MIN_M, FOCUS_MAX_M),
            shutter_secs: clamp_finite(self.shutter_secs, SHUTTER_MIN_SECS, SHUTTER_MAX_SECS),
            aperture_f: clamp_finite(self.aperture_f, APERTURE_MIN_F, APERTURE_MAX_F),
        }
    }
}

fn check_range(name: &str, v: f64, lo: f64, hi: f64) -> ObscuraResult<()> {
    if !v.is_finite() {
        return Err(ObscuraError::validation(format!("{name} must be finite")));
    }
    if v < lo || v > hi {
        return Err(ObscuraError::validation(format!(
            "{name} {v} out of range [{lo},{hi}]"
        )));
    }
    Ok(())
}

fn clamp_finite(v: f64, lo: f64, hi: f64) -> f64 {
    if v.is_finite() { v.clamp(lo, hi) } else { lo }
}

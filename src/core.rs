use crate::error::{ObscuraError, ObscuraResult};

/// Output canvas dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Create a validated canvas with non-zero dimensions.
    pub fn new(width: u32, height: u32) -> ObscuraResult<Self> {
        if width == 0 || height == 0 {
            return Err(ObscuraError::validation("canvas width/height must be > 0"));
        }
        Ok(Self { width, height })
    }
}

/// Frames-per-second represented as a rational `num/den`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator (frames).
    pub num: u32,
    /// Denominator (seconds), must be non-zero.
    pub den: u32,
}

impl Fps {
    /// Create a validated FPS value.
    pub fn new(num: u32, den: u32) -> ObscuraResult<Self> {
        if num == 0 {
            return Err(ObscuraError::validation("Fps num must be > 0"));
        }
        if den == 0 {
            return Err(ObscuraError::validation("Fps den must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Whole seconds elapsed after `frames` frames.
    ///
    /// Integer arithmetic keeps this exact for any rational rate; a float
    /// round trip lands short of the boundary for rates like 49 fps, where
    /// `49 * (1.0 / 49.0) < 1.0`.
    pub fn whole_secs_elapsed(self, frames: u64) -> u64 {
        frames * u64::from(self.den) / u64::from(self.num)
    }
}

/// Where the subject currently sits: its horizontal sway offset plus its
/// simulated distance from the lens.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SubjectState {
    /// Horizontal offset in pixels, driven by the sway oscillator.
    pub position_offset_px: i32,
    /// Subject distance from the lens in meters.
    pub depth_m: f64,
}

/// Depth the rendered subject sits at, in meters.
pub const SUBJECT_DEPTH_M: f64 = 2.0;

impl Default for SubjectState {
    fn default() -> Self {
        Self {
            position_offset_px: 0,
            depth_m: SUBJECT_DEPTH_M,
        }
    }
}

impl SubjectState {
    /// Replace the sway offset, keeping the depth.
    pub fn with_offset(self, position_offset_px: i32) -> Self {
        Self {
            position_offset_px,
            ..self
        }
    }
}

//! The subject sway oscillator: a 2-state cycle clocked by the caller.
//!
//! The original shell drove this from a recurring 1-second timer tied to
//! view lifecycle. Here the cycle is explicit data and the clock stays with
//! whoever hosts it: a shell ticks on its own cadence and simply stops
//! ticking on teardown, so there is no timer to leak.

use std::time::Duration;

/// Sway amplitude in pixels; the two states are `+SWING_PX` and `-SWING_PX`.
pub const SWING_PX: i32 = 10;

/// Cadence the hosting shell is expected to tick at.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Two-state sway oscillator.
///
/// Offset is `0` until the first tick, then alternates `+10, -10, +10, ...`
/// forever.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SubjectOscillator {
    offset_px: i32,
}

impl SubjectOscillator {
    /// Oscillator in its pre-first-tick state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current offset without advancing.
    pub fn offset_px(&self) -> i32 {
        self.offset_px
    }

    /// Advance one step and return the new offset.
    pub fn tick(&mut self) -> i32 {
        // Matches the original toggle: anything that is not +10 flips to +10.
        self.offset_px = if self.offset_px == SWING_PX {
            -SWING_PX
        } else {
            SWING_PX
        };
        self.offset_px
    }

    /// Offset after `ticks` elapsed ticks, in closed form.
    ///
    /// Lets a renderer seek to an arbitrary point in time without stepping.
    pub fn offset_after_ticks(ticks: u64) -> i32 {
        if ticks == 0 {
            0
        } else if ticks % 2 == 1 {
            SWING_PX
        } else {
            -SWING_PX
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_zero_then_alternates() {
        let mut osc = SubjectOscillator::new();
        assert_eq!(osc.offset_px(), 0);
        assert_eq!(osc.tick(), 10);
        assert_eq!(osc.tick(), -10);
        assert_eq!(osc.tick(), 10);
        assert_eq!(osc.offset_px(), 10);
    }

    #[test]
    fn ticks_only_visit_the_two_swing_offsets() {
        let mut osc = SubjectOscillator::new();
        assert_eq!(osc.offset_px(), 0);
        for _ in 0..100 {
            let off = osc.tick();
            assert!(off == SWING_PX || off == -SWING_PX);
        }
    }

    #[test]
    fn closed_form_matches_stepping() {
        let mut osc = SubjectOscillator::new();
        assert_eq!(SubjectOscillator::offset_after_ticks(0), osc.offset_px());
        for n in 1..=50u64 {
            let stepped = osc.tick();
            assert_eq!(SubjectOscillator::offset_after_ticks(n), stepped);
        }
    }
}

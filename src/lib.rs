//! Obscura simulates how camera exposure settings read on screen.
//!
//! Four photographic parameters (ISO, focus distance, shutter speed,
//! aperture) map onto visual effect values: brightness factors, blur radii,
//! ghost-trail opacity and horizontal offsets. The mapping lives in [`fx`]
//! as pure functions over a parameter snapshot; [`style`] turns a snapshot
//! into per-layer styles (including CSS `filter` strings for a
//! browser-style shell), and [`render_cpu`] composites the scene (a
//! background, a subject, and an optional ghost copy) into an RGBA8 frame
//! on the CPU.
//!
//! The subject sways side to side on a 1-second cadence. That oscillator is
//! an explicit 2-state cycle in [`osc`], advanced by whatever clock the
//! caller owns; the library never spawns a timer.
#![forbid(unsafe_code)]

pub mod assets;
pub mod blur_cpu;
pub mod composite_cpu;
pub mod core;
pub mod error;
pub mod fx;
pub mod osc;
pub mod params;
pub mod render_cpu;
pub mod style;

pub use crate::core::{Canvas, Fps, SubjectState};
pub use assets::PreparedImage;
pub use error::{ObscuraError, ObscuraResult};
pub use fx::VisualEffects;
pub use osc::SubjectOscillator;
pub use params::ExposureParams;
pub use render_cpu::{FrameRGBA, render_frame};
pub use style::{FrameStyles, LayerStyle, eval_frame};

//! Per-frame style evaluation: one parameter snapshot in, one set of layer
//! styles out, in the shape a presentation surface consumes.

use crate::{
    core::SubjectState,
    fx::{GHOST_LEAD_PX, VisualEffects},
    params::ExposureParams,
};

/// Visual styling for one rendered layer.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LayerStyle {
    /// Brightness multiplier (1.0 = unchanged).
    pub brightness: f64,
    /// Gaussian blur radius in pixels.
    pub blur_px: f64,
    /// Layer opacity in `[0, 1]`.
    pub opacity: f64,
    /// Horizontal translation in pixels.
    pub translate_x_px: i32,
}

impl LayerStyle {
    /// The CSS `filter` value a browser shell would apply for this layer.
    ///
    /// Blur and brightness are both linear so their order does not change
    /// the result; one canonical order keeps the string stable.
    pub fn css_filter(&self) -> String {
        format!("blur({}px) brightness({})", self.blur_px, self.brightness)
    }
}

/// Styles for every layer of one frame.
///
/// `ghost` is `None` whenever the shutter is fast enough that no trail
/// shows; a shell skips the ghost element entirely in that case rather than
/// drawing it at opacity 0.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FrameStyles {
    pub background: LayerStyle,
    pub subject: LayerStyle,
    pub ghost: Option<LayerStyle>,
}

/// Evaluate the full layer styling for one parameter snapshot.
#[tracing::instrument(level = "debug")]
pub fn eval_frame(params: &ExposureParams, subject: &SubjectState) -> FrameStyles {
    let fx = VisualEffects::derive(params, subject);

    let ghost = if fx.ghost_visible() {
        Some(LayerStyle {
            brightness: fx.ghost_brightness,
            blur_px: fx.ghost_blur_px,
            opacity: fx.ghost_opacity,
            translate_x_px: subject.position_offset_px + GHOST_LEAD_PX,
        })
    } else {
        None
    };

    FrameStyles {
        background: LayerStyle {
            brightness: fx.background_brightness,
            blur_px: fx.background_blur_px,
            opacity: 1.0,
            translate_x_px: 0,
        },
        subject: LayerStyle {
            brightness: fx.subject_brightness,
            blur_px: fx.subject_blur_px,
            opacity: 1.0,
            translate_x_px: subject.position_offset_px,
        },
        ghost,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn slow_shutter_produces_ghost_with_fixed_lead() {
        let params = ExposureParams {
            shutter_secs: 0.1,
            ..ExposureParams::default()
        };
        let subject = SubjectState::default().with_offset(10);

        let styles = eval_frame(&params, &subject);
        assert_eq!(styles.subject.translate_x_px, 10);

        let ghost = styles.ghost.expect("ghost visible below 0.2s shutter");
        assert_eq!(ghost.translate_x_px, 25);
        assert!(approx(ghost.opacity, 0.72));
        assert_eq!(ghost.blur_px, styles.subject.blur_px);
        assert!(approx(ghost.brightness, styles.subject.brightness * 0.8));
    }

    #[test]
    fn fast_shutter_omits_ghost() {
        let params = ExposureParams {
            shutter_secs: 0.2,
            ..ExposureParams::default()
        };
        let styles = eval_frame(&params, &SubjectState::default());
        assert!(styles.ghost.is_none());
    }

    #[test]
    fn css_filter_string_is_stable() {
        let params = ExposureParams::default();
        let styles = eval_frame(&params, &SubjectState::default());
        // aperture 2.8: blur (10-2.8)*0.5 = 3.6, brightness floored at 0.5.
        assert_eq!(styles.background.css_filter(), "blur(3.6px) brightness(0.5)");
        assert_eq!(styles.subject.css_filter(), "blur(5px) brightness(1)");
    }

    #[test]
    fn styles_serialize_to_json() {
        let styles = eval_frame(&ExposureParams::default(), &SubjectState::default());
        let s = serde_json::to_string(&styles).unwrap();
        let de: FrameStyles = serde_json::from_str(&s).unwrap();
        assert_eq!(de, styles);
    }
}

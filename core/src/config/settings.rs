use std::time::Duration;

use serde::Deserialize;

use crate::{
    animation::{AnimationConfig, TimingCurve},
    engine::PointCloudLayoutEngine,
    error::LayoutError,
    layout::{CenteringPolicy, LayoutConfig},
};

/// Engine settings as stored in a settings file. Every field is optional and falls back to
/// the engine defaults.
#[derive(Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigSettings {
    layout: ConfigLayout,
    animation: ConfigAnimation,
}

#[derive(Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigLayout {
    space_divisor: f64,
    target_max_extent: f64,
    marker_radius: f64,
    centering: CenteringPolicy,
}

impl Default for ConfigLayout {
    fn default() -> Self {
        Self {
            space_divisor: LayoutConfig::DEFAULT_SPACE_DIVISOR,
            target_max_extent: LayoutConfig::DEFAULT_TARGET_MAX_EXTENT,
            marker_radius: LayoutConfig::DEFAULT_MARKER_RADIUS,
            centering: CenteringPolicy::default(),
        }
    }
}

#[derive(Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigAnimation {
    start_half_extent: f64,
    step_ms: f64,
    duration_ms: f64,
    timing: TimingCurve,
}

impl Default for ConfigAnimation {
    fn default() -> Self {
        Self {
            start_half_extent: AnimationConfig::DEFAULT_START_HALF_EXTENT,
            step_ms: AnimationConfig::DEFAULT_STEP.as_millis() as f64,
            duration_ms: AnimationConfig::DEFAULT_DURATION.as_millis() as f64,
            timing: TimingCurve::default(),
        }
    }
}

fn milliseconds(name: &str, ms: f64) -> Result<Duration, LayoutError> {
    Duration::try_from_secs_f64(ms / 1e3).map_err(|err| {
        LayoutError::InvalidConfig(format!("{name} of {ms} ms is not a valid duration: {err}"))
    })
}

impl TryFrom<ConfigSettings> for PointCloudLayoutEngine {
    type Error = LayoutError;

    fn try_from(value: ConfigSettings) -> Result<Self, Self::Error> {
        let ConfigSettings { layout, animation } = value;

        let layout = LayoutConfig {
            space_divisor: layout.space_divisor,
            target_max_extent: layout.target_max_extent,
            marker_radius: layout.marker_radius,
            centering: layout.centering,
        };

        let animation = AnimationConfig {
            start_half_extent: animation.start_half_extent,
            step: milliseconds("animation step", animation.step_ms)?,
            duration: milliseconds("animation duration", animation.duration_ms)?,
            timing: animation.timing,
        };

        PointCloudLayoutEngine::new(layout, animation)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::ConfigSettings;
    use crate::{
        animation::TimingCurve, engine::PointCloudLayoutEngine, error::LayoutError,
        layout::CenteringPolicy,
    };

    fn engine(json: &str) -> Result<PointCloudLayoutEngine, LayoutError> {
        let settings: ConfigSettings = serde_json::from_str(json).unwrap();
        PointCloudLayoutEngine::try_from(settings)
    }

    #[test]
    fn empty_settings_are_the_defaults() {
        assert_eq!(engine("{}").unwrap(), PointCloudLayoutEngine::default());
    }

    #[test]
    fn fields_override_defaults() {
        let engine = engine(
            r#"{
                "layout": { "target_max_extent": 4.0, "centering": "centroid" },
                "animation": { "step_ms": 2.5, "duration_ms": 250, "timing": "linear" }
            }"#,
        )
        .unwrap();

        assert_eq!(engine.layout_config().target_max_extent, 4.0);
        assert_eq!(engine.layout_config().space_divisor, 15.0);
        assert_eq!(engine.layout_config().centering, CenteringPolicy::Centroid);
        assert_eq!(engine.animation_config().step, Duration::from_micros(2_500));
        assert_eq!(engine.animation_config().duration, Duration::from_millis(250));
        assert_eq!(engine.animation_config().timing, TimingCurve::Linear);
    }

    #[test]
    fn negative_durations_are_rejected() {
        assert!(matches!(
            engine(r#"{ "animation": { "duration_ms": -1 } }"#),
            Err(LayoutError::InvalidConfig(_))
        ));
    }

    #[test]
    fn zero_divisor_is_rejected() {
        assert!(matches!(
            engine(r#"{ "layout": { "space_divisor": 0 } }"#),
            Err(LayoutError::InvalidConfig(_))
        ));
    }

    #[test]
    fn unknown_fields_are_parse_errors() {
        assert!(serde_json::from_str::<ConfigSettings>(r#"{ "layuot": {} }"#).is_err());
    }
}

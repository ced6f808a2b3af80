use std::io::Write;

use nalgebra::Vector3;
use serde::Serialize;

use crate::{
    animation::{AnimationPlan, AnimationStep, TimingCurve},
    engine::Layout,
    marker::{ColorToken, NormalizedMarker},
};

/// What the render layer receives: the marker set and, optionally, its reveal animation.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct LayoutDocument {
    pub color: ColorToken,
    pub markers: Vec<MarkerDescriptor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timing: Option<TimingCurve>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<Vec<PlanEntryDescriptor>>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct MarkerDescriptor {
    pub position: [f64; 3],
    pub radius: f64,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlanEntryDescriptor {
    pub index: usize,
    pub start: [f64; 3],
    pub end: [f64; 3],
    pub delay_ms: f64,
    pub duration_ms: f64,
}

impl LayoutDocument {
    pub fn new(markers: &[NormalizedMarker], plan: Option<&AnimationPlan>) -> Self {
        let color = markers
            .first()
            .map(|marker| marker.color.clone())
            .unwrap_or_default();

        Self {
            color,
            markers: markers.iter().map(MarkerDescriptor::from).collect(),
            timing: plan.map(AnimationPlan::timing),
            plan: plan.map(|plan| plan.steps().iter().map(PlanEntryDescriptor::from).collect()),
        }
    }

    pub fn to_writer(&self, writer: impl Write, pretty: bool) -> serde_json::Result<()> {
        if pretty {
            serde_json::to_writer_pretty(writer, self)
        } else {
            serde_json::to_writer(writer, self)
        }
    }
}

impl From<&Layout> for LayoutDocument {
    fn from(value: &Layout) -> Self {
        Self::new(&value.markers, Some(&value.plan))
    }
}

fn array(vector: &Vector3<f64>) -> [f64; 3] {
    [vector.x, vector.y, vector.z]
}

impl From<&NormalizedMarker> for MarkerDescriptor {
    fn from(value: &NormalizedMarker) -> Self {
        Self {
            position: array(&value.position),
            radius: value.radius,
        }
    }
}

impl From<&AnimationStep> for PlanEntryDescriptor {
    fn from(value: &AnimationStep) -> Self {
        Self {
            index: value.index,
            start: array(&value.start),
            end: array(&value.end),
            delay_ms: value.delay.as_secs_f64() * 1e3,
            duration_ms: value.duration.as_secs_f64() * 1e3,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::LayoutDocument;
    use crate::{engine::PointCloudLayoutEngine, sample::SampleSet, selection::Selection};

    #[test]
    fn serializes_the_render_contract() {
        let engine = PointCloudLayoutEngine::default();
        let samples = SampleSet::from_coordinates(&[0.0, 10.0], &[0.0, 0.0], &[0.0, 0.0]).unwrap();
        let layout = engine
            .layout(&samples, Selection::element("H").color_token(), Some(2))
            .unwrap();

        let value = serde_json::to_value(LayoutDocument::from(&layout)).unwrap();

        assert_eq!(value["color"], json!("element/H"));
        assert_eq!(value["timing"], json!("ease_in_ease_out"));
        assert_eq!(value["markers"].as_array().unwrap().len(), 2);
        assert_eq!(value["markers"][0]["radius"], json!(0.02));
        assert_eq!(value["markers"][1]["position"].as_array().unwrap().len(), 3);

        let entry = &value["plan"][1];
        assert_eq!(entry["index"], json!(1));
        assert_eq!(entry["delayMs"], json!(1.0));
        assert_eq!(entry["durationMs"], json!(500.0));
        assert_eq!(entry["end"], value["markers"][1]["position"]);
    }

    #[test]
    fn plan_is_omitted_when_absent() {
        let engine = PointCloudLayoutEngine::default();
        let samples = SampleSet::from_coordinates(&[1.0], &[2.0], &[3.0]).unwrap();
        let (_, markers) = engine.normalize(&samples, Default::default()).unwrap();

        let mut buffer = Vec::new();
        LayoutDocument::new(&markers, None)
            .to_writer(&mut buffer, false)
            .unwrap();

        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            r#"{"color":"default","markers":[{"position":[0.0,0.0,0.0],"radius":0.02}]}"#
        );
    }
}

use nalgebra::Vector3;

use crate::{
    animation::{self, AnimationConfig, AnimationPlan},
    error::LayoutError,
    layout::{self, LayoutConfig, LayoutTransform},
    marker::{ColorToken, NormalizedMarker},
    sample::SampleSet,
};

/// A laid out point cloud together with its reveal animation.
#[derive(Clone, Debug, PartialEq)]
pub struct Layout {
    pub transform: LayoutTransform,
    pub markers: Vec<NormalizedMarker>,
    pub plan: AnimationPlan,
}

/// Turns raw point clouds into render-ready marker sets.
///
/// The engine only holds validated configuration, so every call is independent of the
/// previous ones and one engine can be shared between threads.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PointCloudLayoutEngine {
    layout: LayoutConfig,
    animation: AnimationConfig,
}

impl PointCloudLayoutEngine {
    pub fn new(layout: LayoutConfig, animation: AnimationConfig) -> Result<Self, LayoutError> {
        layout.validate()?;
        animation.validate()?;
        Ok(Self { layout, animation })
    }

    pub fn layout_config(&self) -> &LayoutConfig {
        &self.layout
    }

    pub fn animation_config(&self) -> &AnimationConfig {
        &self.animation
    }

    pub fn compute_centroid(&self, samples: &SampleSet) -> Result<Vector3<f64>, LayoutError> {
        layout::compute_centroid(samples)
    }

    /// See [`layout::normalize`].
    pub fn normalize(
        &self,
        samples: &SampleSet,
        color: ColorToken,
    ) -> Result<(LayoutTransform, Vec<NormalizedMarker>), LayoutError> {
        layout::normalize(samples, &self.layout, color)
    }

    /// See [`animation::build_animation_plan`].
    pub fn build_animation_plan(
        &self,
        markers: &[NormalizedMarker],
        seed: Option<u64>,
    ) -> Result<AnimationPlan, LayoutError> {
        animation::build_animation_plan(markers, &self.animation, seed)
    }

    /// Normalizes `samples` and builds the animation for the resulting markers.
    pub fn layout(
        &self,
        samples: &SampleSet,
        color: ColorToken,
        seed: Option<u64>,
    ) -> Result<Layout, LayoutError> {
        let (transform, markers) = self.normalize(samples, color)?;
        let plan = self.build_animation_plan(&markers, seed)?;

        log::info!(
            "laid out {} markers, animation takes {:0.3?}",
            markers.len(),
            plan.total_duration()
        );

        Ok(Layout {
            transform,
            markers,
            plan,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::{sync::Arc, thread, time::Duration};

    use super::PointCloudLayoutEngine;
    use crate::{
        animation::AnimationConfig,
        error::LayoutError,
        layout::LayoutConfig,
        sample::SampleSet,
        selection::{OrbitalKind, Selection},
        testing,
    };

    #[test]
    fn rejects_invalid_configuration() {
        let layout = LayoutConfig {
            target_max_extent: -1.0,
            ..LayoutConfig::default()
        };
        assert!(matches!(
            PointCloudLayoutEngine::new(layout, AnimationConfig::default()),
            Err(LayoutError::InvalidConfig(_))
        ));

        let animation = AnimationConfig {
            start_half_extent: f64::INFINITY,
            ..AnimationConfig::default()
        };
        assert!(matches!(
            PointCloudLayoutEngine::new(LayoutConfig::default(), animation),
            Err(LayoutError::InvalidConfig(_))
        ));
    }

    #[test]
    fn layout_pairs_markers_with_plan() {
        let engine = PointCloudLayoutEngine::default();
        let samples = testing::orbital_cloud(1_500, 0xC0FFEE);
        let selection = Selection::molecule("N2", OrbitalKind::Homo);

        let layout = engine
            .layout(&samples, selection.color_token(), Some(1))
            .unwrap();

        assert_eq!(layout.markers.len(), samples.len());
        assert_eq!(layout.plan.len(), samples.len());
        assert_eq!(
            layout.plan.total_duration(),
            Duration::from_millis(1_499 + 500)
        );
        for (step, marker) in layout.plan.steps().iter().zip(&layout.markers) {
            assert_eq!(step.end, marker.position);
        }
    }

    #[test]
    fn empty_samples_fail_before_planning() {
        let engine = PointCloudLayoutEngine::default();

        assert_eq!(
            engine.layout(&SampleSet::default(), Default::default(), None),
            Err(LayoutError::EmptyInput)
        );
    }

    #[test]
    fn independent_layouts_run_concurrently() {
        let engine = Arc::new(PointCloudLayoutEngine::default());

        let handles = (0..4u64)
            .map(|seed| {
                let engine = Arc::clone(&engine);
                thread::spawn(move || {
                    let samples = testing::random_cloud(2_000, 30.0, seed);
                    let layout = engine.layout(&samples, Default::default(), Some(seed))?;
                    let again = engine.layout(&samples, Default::default(), Some(seed))?;
                    Ok::<_, LayoutError>(layout == again)
                })
            })
            .collect::<Vec<_>>();

        for handle in handles {
            assert!(handle.join().unwrap().unwrap());
        }
    }
}

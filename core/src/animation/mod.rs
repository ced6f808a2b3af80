mod timing;

pub use timing::TimingCurve;

use std::time::Duration;

use nalgebra::Vector3;
use rand::{
    distributions::{Distribution, Uniform},
    rngs::StdRng,
    SeedableRng,
};

use crate::{error::LayoutError, marker::NormalizedMarker};

/// Parameters of [`build_animation_plan`].
#[derive(Clone, Debug, PartialEq)]
pub struct AnimationConfig {
    /// start positions are drawn from the cube `[-h, h]^3`
    pub start_half_extent: f64,
    /// delay between the starts of two consecutive markers
    pub step: Duration,
    /// how long a single marker takes to reach its position
    pub duration: Duration,
    pub timing: TimingCurve,
}

impl AnimationConfig {
    pub const DEFAULT_START_HALF_EXTENT: f64 = 1.0;
    pub const DEFAULT_STEP: Duration = Duration::from_millis(1);
    pub const DEFAULT_DURATION: Duration = Duration::from_millis(500);

    pub fn validate(&self) -> Result<(), LayoutError> {
        if !(self.start_half_extent.is_finite() && self.start_half_extent >= 0.0) {
            return Err(LayoutError::InvalidConfig(format!(
                "start cube half extent must be non-negative and finite, got {}",
                self.start_half_extent
            )));
        }
        if self.step.is_zero() {
            return Err(LayoutError::InvalidConfig(
                "animation step must be longer than zero".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            start_half_extent: Self::DEFAULT_START_HALF_EXTENT,
            step: Self::DEFAULT_STEP,
            duration: Self::DEFAULT_DURATION,
            timing: TimingCurve::default(),
        }
    }
}

/// The move of a single marker from a random start into its final position.
#[derive(Clone, Debug, PartialEq)]
pub struct AnimationStep {
    /// index of the marker this step moves
    pub index: usize,
    pub start: Vector3<f64>,
    pub end: Vector3<f64>,
    /// time from the start of the plan until this marker starts moving
    pub delay: Duration,
    pub duration: Duration,
}

impl AnimationStep {
    /// Position of the marker `elapsed` after the plan started.
    pub fn position_at(&self, elapsed: Duration, timing: TimingCurve) -> Vector3<f64> {
        let Some(moving) = elapsed.checked_sub(self.delay) else {
            return self.start;
        };

        let t = if self.duration.is_zero() {
            1.0
        } else {
            moving.as_secs_f64() / self.duration.as_secs_f64()
        };

        self.start + (self.end - self.start) * timing.progress(t)
    }

    /// When this marker comes to rest, measured from the start of the plan
    pub fn finish(&self) -> Duration {
        self.delay.saturating_add(self.duration)
    }
}

/// A staggered reveal of a marker set, one step per marker in marker order.
#[derive(Clone, Debug, PartialEq)]
pub struct AnimationPlan {
    steps: Vec<AnimationStep>,
    timing: TimingCurve,
}

impl AnimationPlan {
    pub fn steps(&self) -> &[AnimationStep] {
        &self.steps
    }

    pub fn timing(&self) -> TimingCurve {
        self.timing
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Time until the last marker has come to rest
    pub fn total_duration(&self) -> Duration {
        self.steps
            .iter()
            .map(AnimationStep::finish)
            .max()
            .unwrap_or_default()
    }

    /// Positions of all markers `elapsed` after the plan started.
    pub fn positions_at(&self, elapsed: Duration) -> Vec<Vector3<f64>> {
        self.steps
            .iter()
            .map(|step| step.position_at(elapsed, self.timing))
            .collect()
    }
}

/// Builds the reveal animation for a marker set.
///
/// With a `seed` the start positions are reproducible, without one they are drawn from
/// system entropy. Delays grow by `config.step` per marker index. Fails with
/// [`LayoutError::InvalidConfig`] if the last marker would not come to rest within
/// [`Duration::MAX`].
pub fn build_animation_plan(
    markers: &[NormalizedMarker],
    config: &AnimationConfig,
    seed: Option<u64>,
) -> Result<AnimationPlan, LayoutError> {
    config.validate()?;

    if let Some(last) = markers.len().checked_sub(1) {
        stagger(config.step, last)
            .and_then(|delay| delay.checked_add(config.duration))
            .ok_or_else(|| {
                LayoutError::InvalidConfig(format!(
                    "a step of {:?} is too long to stagger {} markers",
                    config.step,
                    markers.len()
                ))
            })?;
    }

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let half_extent = config.start_half_extent;
    let cube = Uniform::new_inclusive(-half_extent, half_extent);

    let steps = markers
        .iter()
        .enumerate()
        .map(|(index, marker)| {
            let start = Vector3::new(
                cube.sample(&mut rng),
                cube.sample(&mut rng),
                cube.sample(&mut rng),
            );
            log::trace!("marker {index} starts at {:?}", start.as_slice());

            AnimationStep {
                index,
                start,
                end: marker.position,
                // bounded by the last delay, checked above
                delay: stagger(config.step, index).unwrap_or(Duration::MAX),
                duration: config.duration,
            }
        })
        .collect::<Vec<_>>();

    log::debug!(
        "animation plan for {} markers, seeded: {}",
        steps.len(),
        seed.is_some()
    );

    Ok(AnimationPlan {
        steps,
        timing: config.timing,
    })
}

fn stagger(step: Duration, index: usize) -> Option<Duration> {
    u32::try_from(index)
        .ok()
        .and_then(|index| step.checked_mul(index))
}

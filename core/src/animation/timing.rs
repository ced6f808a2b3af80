use serde::{Deserialize, Serialize};

/// Maps linear progress through a move onto eased progress.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimingCurve {
    Linear,
    /// slow start and slow finish, the cubic bézier (0.42, 0) (0.58, 1)
    #[default]
    EaseInEaseOut,
}

impl TimingCurve {
    /// `t` is clamped to `0..=1`. The result is `0` at `t = 0` and `1` at `t = 1`.
    pub fn progress(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            TimingCurve::Linear => t,
            TimingCurve::EaseInEaseOut => CubicBezier::EASE_IN_EASE_OUT.solve(t),
        }
    }
}

/// A timing bézier from (0, 0) to (1, 1) with two free control points.
#[derive(Copy, Clone, Debug)]
struct CubicBezier {
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
}

impl CubicBezier {
    const EASE_IN_EASE_OUT: Self = Self {
        x1: 0.42,
        y1: 0.0,
        x2: 0.58,
        y2: 1.0,
    };

    const EPSILON: f64 = 1e-9;

    /// one coordinate of the curve at parameter `s`
    #[inline(always)]
    fn sample(p1: f64, p2: f64, s: f64) -> f64 {
        let inv = 1.0 - s;
        3.0 * inv * inv * s * p1 + 3.0 * inv * s * s * p2 + s * s * s
    }

    #[inline(always)]
    fn sample_derivative(p1: f64, p2: f64, s: f64) -> f64 {
        let inv = 1.0 - s;
        3.0 * inv * inv * p1 + 6.0 * inv * s * (p2 - p1) + 3.0 * s * s * (1.0 - p2)
    }

    fn solve(&self, x: f64) -> f64 {
        Self::sample(self.y1, self.y2, self.parameter_for(x))
    }

    /// Finds `s` with `x(s) = x`. Newton first, bisection if the slope gets too flat.
    fn parameter_for(&self, x: f64) -> f64 {
        let mut s = x;
        for _ in 0..8 {
            let error = Self::sample(self.x1, self.x2, s) - x;
            if error.abs() < Self::EPSILON {
                return s;
            }
            let slope = Self::sample_derivative(self.x1, self.x2, s);
            if slope.abs() < 1e-6 {
                break;
            }
            s -= error / slope;
        }

        let (mut low, mut high) = (0.0, 1.0);
        s = x;
        for _ in 0..64 {
            let value = Self::sample(self.x1, self.x2, s);
            if (value - x).abs() < Self::EPSILON {
                break;
            }
            if x > value {
                low = s;
            } else {
                high = s;
            }
            s = low + (high - low) / 2.0;
        }
        s
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::TimingCurve;

    #[test]
    fn curves_hit_both_endpoints() {
        for curve in [TimingCurve::Linear, TimingCurve::EaseInEaseOut] {
            assert_relative_eq!(curve.progress(0.0), 0.0, epsilon = 1e-9);
            assert_relative_eq!(curve.progress(1.0), 1.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn progress_is_clamped() {
        assert_eq!(TimingCurve::Linear.progress(-0.5), 0.0);
        assert_eq!(TimingCurve::Linear.progress(3.0), 1.0);
        assert_relative_eq!(TimingCurve::EaseInEaseOut.progress(1.5), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn ease_in_ease_out_is_symmetric_and_monotonic() {
        let ease = TimingCurve::EaseInEaseOut;

        assert_relative_eq!(ease.progress(0.5), 0.5, epsilon = 1e-9);
        // slow start, slow finish
        assert!(ease.progress(0.1) < 0.1);
        assert!(ease.progress(0.9) > 0.9);

        let mut previous = 0.0;
        for step in 1..=100 {
            let t = step as f64 / 100.0;
            let value = ease.progress(t);
            assert!(value >= previous, "not monotonic at t = {t}");
            assert_relative_eq!(value + ease.progress(1.0 - t), 1.0, epsilon = 1e-7);
            previous = value;
        }
    }
}

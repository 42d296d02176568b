//! Easing functions
//!
//! An easing maps normalized time (0.0 to 1.0) to normalized progress.
//! The rest of the crate treats easings as opaque: sequencing, repeat
//! handling, and chaining never look at the curve, they only call
//! [`Easing::apply`]. Use [`Easing::Custom`] to plug in an externally
//! supplied policy.

/// A time-to-progress mapping applied to animation playback
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Easing {
    /// Constant-rate progress
    Linear,
    /// Starts slow, speeds up (quadratic ease-in)
    Accelerate,
    /// Starts fast, slows down (quadratic ease-out)
    Decelerate,
    /// Slow at both ends, fast in the middle
    AccelerateDecelerate,
    /// Overshoots past the end value before settling (tension 2.0)
    Overshoot,
    /// Pulls back before launching forward (tension 2.0)
    Anticipate,
    /// Externally supplied curve
    Custom(fn(f32) -> f32),
}

impl Easing {
    /// Map normalized time `t` (0.0 to 1.0) to normalized progress.
    ///
    /// Progress may leave the [0, 1] range for curves like
    /// [`Easing::Overshoot`]; callers interpolating values must not clamp.
    pub fn apply(&self, t: f32) -> f32 {
        match self {
            Easing::Linear => t,
            Easing::Accelerate => t * t,
            Easing::Decelerate => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::AccelerateDecelerate => {
                // Cosine blend, flat at both endpoints
                ((t * std::f32::consts::PI - std::f32::consts::FRAC_PI_2).sin() + 1.0) * 0.5
            }
            Easing::Overshoot => {
                const TENSION: f32 = 2.0;
                let t = t - 1.0;
                t * t * ((TENSION + 1.0) * t + TENSION) + 1.0
            }
            Easing::Anticipate => {
                const TENSION: f32 = 2.0;
                t * t * ((TENSION + 1.0) * t - TENSION)
            }
            Easing::Custom(f) => f(t),
        }
    }
}

impl Default for Easing {
    fn default() -> Self {
        Easing::Linear
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints() {
        for easing in [
            Easing::Linear,
            Easing::Accelerate,
            Easing::Decelerate,
            Easing::AccelerateDecelerate,
            Easing::Overshoot,
            Easing::Anticipate,
        ] {
            assert!(easing.apply(0.0).abs() < 1e-4, "{easing:?} at 0");
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-4, "{easing:?} at 1");
        }
    }

    #[test]
    fn test_accelerate_lags_linear() {
        assert!(Easing::Accelerate.apply(0.5) < 0.5);
        assert!(Easing::Decelerate.apply(0.5) > 0.5);
    }

    #[test]
    fn test_overshoot_exceeds_one() {
        // Somewhere in the back half the curve passes 1.0
        let peak = (50..100)
            .map(|i| Easing::Overshoot.apply(i as f32 / 100.0))
            .fold(f32::MIN, f32::max);
        assert!(peak > 1.0);
    }

    #[test]
    fn test_custom_curve() {
        let easing = Easing::Custom(|t| t * t * t);
        assert!((easing.apply(0.5) - 0.125).abs() < 1e-6);
    }
}

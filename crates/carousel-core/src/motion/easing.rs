//! Easing curves for smooth scrolls

use crate::config::EasingType;

impl EasingType {
    /// Eased share of the distance covered at progress `t` (clamped to
    /// [0, 1]). Every curve starts at 0 and ends at 1; `None` holds at 0
    /// until the last frame.
    pub fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        let left = 1.0 - t;
        match self {
            EasingType::None if t < 1.0 => 0.0,
            EasingType::None => 1.0,
            EasingType::Linear => t,
            EasingType::Cubic => 1.0 - left.powi(3),
            EasingType::Quintic => 1.0 - left.powi(5),
            // 2^(-10t) never reaches 0 on its own
            EasingType::EaseOut if t >= 1.0 => 1.0,
            EasingType::EaseOut => 1.0 - (-10.0 * t).exp2(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CURVES: [EasingType; 5] = [
        EasingType::None,
        EasingType::Linear,
        EasingType::Cubic,
        EasingType::Quintic,
        EasingType::EaseOut,
    ];

    #[test]
    fn test_curves_are_monotonic_from_zero_to_one() {
        for easing in CURVES {
            assert_eq!(easing.apply(0.0), 0.0, "{:?}", easing);
            assert_eq!(easing.apply(1.0), 1.0, "{:?}", easing);
            assert_eq!(easing.apply(1.5), 1.0, "{:?} past the end", easing);

            let samples: Vec<f64> = (0..=20).map(|i| easing.apply(i as f64 / 20.0)).collect();
            assert!(
                samples.windows(2).all(|w| w[0] <= w[1]),
                "{:?} moves backwards",
                easing
            );
        }
    }

    #[test]
    fn test_ease_out_curves_front_load_the_distance() {
        let halfway = |easing: EasingType| easing.apply(0.5);
        assert_eq!(halfway(EasingType::None), 0.0);
        assert_eq!(halfway(EasingType::Linear), 0.5);
        assert!((halfway(EasingType::Cubic) - 0.875).abs() < 1e-9);
        assert!((halfway(EasingType::Quintic) - 0.96875).abs() < 1e-9);
        assert!((halfway(EasingType::EaseOut) - 0.96875).abs() < 1e-9);
        // The exponential curve pulls ahead early on
        assert!(EasingType::EaseOut.apply(0.1) > EasingType::Quintic.apply(0.1));
    }
}

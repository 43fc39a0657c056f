//! Scoring curves
//!
//! Two families: the fixed-round games pay a speed bonus proportional to
//! unused time within the round limit; the escalating recall games pay a flat
//! amount that scales with the current sequence length. Per-game constants
//! live with each game; the shapes live here.

/// Base points plus a speed bonus, floored at a per-game minimum:
/// `round(base + max(0, (limit - elapsed) / limit) * base * multiplier)`.
///
/// A correct-but-slow answer never scores below `floor`.
pub fn speed_bonus_score(base: i32, limit: f64, elapsed: f64, multiplier: f64, floor: i32) -> i32 {
    let bonus_factor = ((limit - elapsed) / limit).max(0.0);
    let gained = (base as f64 + bonus_factor * base as f64 * multiplier).round() as i32;
    gained.max(floor)
}

/// Flat per-length points for sequence recall: `base + (len - 2) * round(base / 2)`.
/// Lengths start at 2, so the first round pays exactly `base`.
pub fn length_scaled_points(base: i32, length: u32) -> i32 {
    base + (length as i32 - 2) * half_points(base)
}

/// Half of the base points, rounded to the nearest integer. Used both as the
/// arithmetic miss penalty and as the per-length increment above.
pub fn half_points(base: i32) -> i32 {
    (base as f64 / 2.0).round() as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_arithmetic_easy_scenario() {
        // easy, base 5, limit 10 s, answered in 2.0 s:
        // bonus factor 0.8 -> round(5 + 0.8 * 5 * 2) = 13
        assert_eq!(speed_bonus_score(5, 10.0, 2.0, 2.0, 5), 13);
    }

    #[test]
    fn test_slow_answer_floors_at_base() {
        // Slower than the limit: bonus factor clamps to 0
        assert_eq!(speed_bonus_score(5, 10.0, 12.0, 2.0, 5), 5);
        assert_eq!(speed_bonus_score(10, 5.0, 4.9, 0.5, 5), 10);
    }

    #[test]
    fn test_color_rush_bounds() {
        // easy: base 10, x0.5 bonus, floor round(10/2) = 5
        let fastest = speed_bonus_score(10, 5.0, 0.0, 0.5, 5);
        let slowest = speed_bonus_score(10, 5.0, 5.0, 0.5, 5);
        assert_eq!(fastest, 15); // base + base/2
        assert_eq!(slowest, 10);
        assert!(slowest >= half_points(10));
    }

    #[test]
    fn test_length_scaled_points() {
        // sequence recall medium: base 20
        assert_eq!(length_scaled_points(20, 2), 20);
        assert_eq!(length_scaled_points(20, 3), 30);
        assert_eq!(length_scaled_points(20, 4), 40);
        // hard: base 30, increment round(15) = 15
        assert_eq!(length_scaled_points(30, 5), 75);
    }

    #[test]
    fn test_half_points_rounds() {
        assert_eq!(half_points(5), 3);
        assert_eq!(half_points(13), 7);
        assert_eq!(half_points(20), 10);
    }

    proptest! {
        #[test]
        fn prop_success_never_scores_below_floor(
            base in 1i32..=50,
            limit in 1.0f64..60.0,
            elapsed in 0.0f64..120.0,
            multiplier in 0.0f64..4.0,
        ) {
            let floor = half_points(base);
            let gained = speed_bonus_score(base, limit, elapsed, multiplier, floor);
            prop_assert!(gained >= floor);
            // and never exceeds the zero-elapsed maximum
            let max = speed_bonus_score(base, limit, 0.0, multiplier, floor);
            prop_assert!(gained <= max);
        }

        #[test]
        fn prop_escalation_pay_is_monotonic(base in 1i32..=50, len in 2u32..40) {
            prop_assert!(length_scaled_points(base, len + 1) >= length_scaled_points(base, len));
        }
    }
}

use crate::types::entity::Range;

/// How a factor treats readings outside its reference range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MatchPolicy {
    /// Anything outside the range scores zero.
    Hard,
    /// In-range optimality is lifted to at least `floor`; readings up to
    /// `tolerance` units outside decay linearly from `floor` to zero.
    Soft { tolerance: f64, floor: f64 },
}

/// Closeness of `value` to the midpoint of `range`, in `0..=1`.
///
/// Peaks at the midpoint and falls linearly to zero at the bounds (hard) or to
/// `floor` (soft). A zero-width range yields 1 only on an exact hit.
pub fn optimality(value: f64, range: &Range, policy: MatchPolicy) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }

    let half_width = range.half_width();
    if half_width <= 0.0 {
        return if value == range.min { 1.0 } else { 0.0 };
    }

    if range.contains(value) {
        let triangle = (1.0 - (value - range.midpoint()).abs() / half_width).clamp(0.0, 1.0);
        return match policy {
            MatchPolicy::Hard => triangle,
            MatchPolicy::Soft { floor, .. } => {
                let floor = floor.clamp(0.0, 1.0);
                floor + (1.0 - floor) * triangle
            }
        };
    }

    match policy {
        MatchPolicy::Hard => 0.0,
        MatchPolicy::Soft { tolerance, floor } => {
            let distance = range.distance_outside(value);
            if tolerance <= 0.0 || distance >= tolerance {
                0.0
            } else {
                floor.clamp(0.0, 1.0) * (1.0 - distance / tolerance)
            }
        }
    }
}

/// True when every `(value, range)` pair is inside its range.
pub fn all_within<'a>(pairs: impl IntoIterator<Item = (f64, &'a Range)>) -> bool {
    pairs
        .into_iter()
        .all(|(value, range)| value.is_finite() && range.contains(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOFT: MatchPolicy = MatchPolicy::Soft {
        tolerance: 5.0,
        floor: 0.5,
    };

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn midpoint_is_fully_optimal() {
        let range = Range::new(22.0, 32.0);
        assert!(close(optimality(27.0, &range, MatchPolicy::Hard), 1.0));
        assert!(close(optimality(27.0, &range, SOFT), 1.0));
    }

    #[test]
    fn hard_policy_decays_to_zero_at_bounds_and_cuts_off_outside() {
        let range = Range::new(22.0, 32.0);
        assert!(close(optimality(24.5, &range, MatchPolicy::Hard), 0.5));
        assert!(close(optimality(32.0, &range, MatchPolicy::Hard), 0.0));
        assert!(close(optimality(32.5, &range, MatchPolicy::Hard), 0.0));
    }

    #[test]
    fn soft_policy_gives_partial_credit_for_near_misses() {
        let range = Range::new(22.0, 32.0);
        assert!(close(optimality(32.0, &range, SOFT), 0.5));
        assert!(close(optimality(34.5, &range, SOFT), 0.25));
        assert!(close(optimality(37.0, &range, SOFT), 0.0));
        assert!(close(optimality(10.0, &range, SOFT), 0.0));
    }

    #[test]
    fn zero_width_range_matches_only_exact_value() {
        let range = Range::new(5.0, 5.0);
        assert!(close(optimality(5.0, &range, MatchPolicy::Hard), 1.0));
        assert!(close(optimality(5.1, &range, MatchPolicy::Hard), 0.0));
        assert!(close(optimality(5.1, &range, SOFT), 0.0));
    }

    #[test]
    fn non_finite_values_score_zero() {
        let range = Range::new(0.0, 10.0);
        assert_eq!(optimality(f64::NAN, &range, SOFT), 0.0);
        assert_eq!(optimality(f64::INFINITY, &range, MatchPolicy::Hard), 0.0);
    }

    #[test]
    fn moving_toward_midpoint_never_decreases_optimality() {
        let range = Range::new(20.0, 30.0);
        for policy in [MatchPolicy::Hard, SOFT] {
            let mut previous = 0.0;
            let mut value = 10.0;
            while value <= 25.0 {
                let current = optimality(value, &range, policy);
                assert!(current + 1e-12 >= previous, "{policy:?} dipped at {value}");
                previous = current;
                value += 0.25;
            }
        }
    }

    #[test]
    fn all_within_requires_every_pair_inside() {
        let temp = Range::new(20.0, 30.0);
        let humidity = Range::new(50.0, 100.0);
        assert!(all_within([(25.0, &temp), (60.0, &humidity)]));
        assert!(!all_within([(25.0, &temp), (40.0, &humidity)]));
        assert!(all_within(std::iter::empty()));
    }
}

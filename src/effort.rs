//! Effort (RPE) to load conversion
//!
//! Relates a rep count performed at a given effort level to a percentage
//! of the estimated one-rep maximum with a closed-form exponential:
//!
//! ```text
//! RIR            = 10 - effort
//! effective_reps = reps + RIR
//! pct            = 100 * e^(K * (effective_reps - 1))
//! ```
//!
//! `K` is a fixed empirical constant. Both directions are pure and accept
//! any real input; out-of-domain values propagate as NaN or infinity.
//! Use [`EffortModel::checked_from_load_percentage`] where a hard failure
//! is preferred.

use crate::error::CalculationError;

/// Empirical exponent constant of the reps/percentage curve
pub const RPE_CONSTANT: f64 = 0.0262;

/// Maximal effort on the RPE scale (zero reps in reserve)
pub const MAX_EFFORT: f64 = 10.0;

/// Conversion between (reps, effort) and percentage of 1RM
pub struct EffortModel;

impl EffortModel {
    /// Reps left in reserve at the given effort level
    pub fn reps_in_reserve(effort: f64) -> f64 {
        MAX_EFFORT - effort
    }

    /// Reps performed plus reps in reserve
    pub fn effective_reps(reps: f64, effort: f64) -> f64 {
        reps + Self::reps_in_reserve(effort)
    }

    /// Percentage of 1RM for `reps` performed at `effort`
    ///
    /// `to_load_percentage(1.0, 10.0)` is exactly 100.
    pub fn to_load_percentage(reps: f64, effort: f64) -> f64 {
        let effective = Self::effective_reps(reps, effort);
        100.0 * (RPE_CONSTANT * (effective - 1.0)).exp()
    }

    /// Rep count that corresponds to `pct` at `effort`, clamped to >= 0
    ///
    /// `pct == 0` clamps to 0 reps; `pct < 0` or NaN inputs yield NaN.
    /// Callers wanting a failure instead should use
    /// [`Self::checked_from_load_percentage`].
    pub fn from_load_percentage(pct: f64, effort: f64) -> f64 {
        let effective = 1.0 + (pct / 100.0).ln() / RPE_CONSTANT;
        let reps = effective - Self::reps_in_reserve(effort);
        // NaN must survive the clamp
        if reps < 0.0 {
            0.0
        } else {
            reps
        }
    }

    /// Strict variant of [`Self::from_load_percentage`]
    pub fn checked_from_load_percentage(pct: f64, effort: f64) -> Result<f64, CalculationError> {
        if !pct.is_finite() || pct <= 0.0 {
            return Err(CalculationError::DomainError {
                calculation: "from_load_percentage".to_string(),
                parameter: "pct".to_string(),
                value: pct,
            });
        }
        if !effort.is_finite() {
            return Err(CalculationError::DomainError {
                calculation: "from_load_percentage".to_string(),
                parameter: "effort".to_string(),
                value: effort,
            });
        }

        Ok(Self::from_load_percentage(pct, effort))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, tolerance: f64) -> bool {
        (a - b).abs() < tolerance
    }

    #[test]
    fn test_single_rep_at_max_effort_is_full_load() {
        assert!(approx_eq(EffortModel::to_load_percentage(1.0, 10.0), 100.0, 1e-12));
    }

    #[test]
    fn test_reps_in_reserve() {
        assert_eq!(EffortModel::reps_in_reserve(10.0), 0.0);
        assert_eq!(EffortModel::reps_in_reserve(8.0), 2.0);
        assert_eq!(EffortModel::effective_reps(5.0, 7.5), 7.5);
    }

    #[test]
    fn test_known_percentage() {
        // 5 reps @ 8 -> 7 effective reps -> 100 * e^(0.0262 * 6)
        let pct = EffortModel::to_load_percentage(5.0, 8.0);
        assert!(approx_eq(pct, 117.0, 0.1));
    }

    #[test]
    fn test_inverse_clamps_to_zero() {
        // 100% at effort 6 would need -4 reps
        assert_eq!(EffortModel::from_load_percentage(100.0, 6.0), 0.0);
        assert_eq!(EffortModel::from_load_percentage(1.0, 10.0), 0.0);
    }

    #[test]
    fn test_inverse_of_non_positive_percentage() {
        // ln(0) = -inf, clamped
        assert_eq!(EffortModel::from_load_percentage(0.0, 8.0), 0.0);
        assert!(EffortModel::from_load_percentage(-10.0, 8.0).is_nan());
        assert!(EffortModel::from_load_percentage(f64::NAN, 8.0).is_nan());
        assert!(EffortModel::checked_from_load_percentage(0.0, 8.0).is_err());
        assert!(EffortModel::checked_from_load_percentage(-10.0, 8.0).is_err());
        assert!(EffortModel::checked_from_load_percentage(f64::NAN, 8.0).is_err());
        assert!(EffortModel::checked_from_load_percentage(110.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_checked_matches_unchecked_in_domain() {
        let pct = EffortModel::to_load_percentage(6.0, 7.0);
        let checked = EffortModel::checked_from_load_percentage(pct, 7.0).unwrap();
        assert_eq!(checked, EffortModel::from_load_percentage(pct, 7.0));
    }

    #[test]
    fn test_deterministic() {
        let a = EffortModel::to_load_percentage(7.3, 8.5);
        let b = EffortModel::to_load_percentage(7.3, 8.5);
        assert_eq!(a.to_bits(), b.to_bits());
    }

    use proptest::prelude::*;

    proptest! {
        #[test]
        fn test_round_trip(reps in 0.0f64..50.0, effort in 0.1f64..=10.0) {
            let pct = EffortModel::to_load_percentage(reps, effort);
            let back = EffortModel::from_load_percentage(pct, effort);
            prop_assert!((back - reps).abs() < 1e-6);
        }

        #[test]
        fn test_monotonic_in_reps(r1 in 0.0f64..50.0, delta in 0.01f64..20.0, effort in 0.1f64..=10.0) {
            let low = EffortModel::to_load_percentage(r1, effort);
            let high = EffortModel::to_load_percentage(r1 + delta, effort);
            prop_assert!(low < high);
        }

        #[test]
        fn test_monotonic_in_effort(reps in 0.0f64..50.0, e1 in 0.1f64..9.9, delta in 0.01f64..5.0) {
            let e2 = (e1 + delta).min(10.0);
            prop_assume!(e2 > e1);
            let easier = EffortModel::to_load_percentage(reps, e1);
            let harder = EffortModel::to_load_percentage(reps, e2);
            prop_assert!(easier > harder);
        }

        #[test]
        fn test_inverse_non_negative(pct in 0.0f64..500.0, effort in 0.1f64..=10.0) {
            let reps = EffortModel::from_load_percentage(pct, effort);
            prop_assert!(reps >= 0.0);
        }
    }
}

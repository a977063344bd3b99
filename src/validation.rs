//! Input validation for calculation requests
//!
//! The calculator accepts any real input and lets out-of-domain values
//! propagate. This module is the boundary that keeps those values out:
//! finite numbers, effort in (0, 10], reps in [0, max_reps], and a
//! reference set that actually moved some weight.

use crate::calculator::{CalculationRequest, ReferenceSet, Target};
use crate::effort::MAX_EFFORT;
use crate::equipment::EquipmentModel;
use crate::error::ValidationError;
use serde::{Deserialize, Serialize};

/// Default cap on rep inputs
pub const DEFAULT_MAX_REPS: f64 = 50.0;

/// Input limits applied by [`SetValidator`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValidationLimits {
    #[serde(default = "default_max_reps")]
    pub max_reps: f64,
    #[serde(default = "default_max_effort")]
    pub max_effort: f64,
}

fn default_max_reps() -> f64 {
    DEFAULT_MAX_REPS
}

fn default_max_effort() -> f64 {
    MAX_EFFORT
}

impl Default for ValidationLimits {
    fn default() -> Self {
        Self {
            max_reps: default_max_reps(),
            max_effort: default_max_effort(),
        }
    }
}

/// Validate calculation inputs before they reach the core
pub struct SetValidator;

impl SetValidator {
    /// Validate a complete request
    pub fn validate_request(
        request: &CalculationRequest,
        limits: &ValidationLimits,
    ) -> Result<(), ValidationError> {
        let base_weight = EquipmentModel::resolve(&request.equipment).base_weight;
        Self::validate_reference(&request.reference, base_weight, limits)?;

        match &request.target {
            Target::Reps(target) => {
                Self::validate_reps("target reps", target.reps, limits)?;
                Self::validate_effort("target effort", target.effort, limits)?;
            }
            Target::Weight(target) => {
                Self::validate_finite("target weight", target.plate_weight)?;
                if target.plate_weight < 0.0 {
                    return Err(Self::out_of_range("target weight", "[0, ∞)", target.plate_weight));
                }
                Self::validate_effort("target effort", target.effort, limits)?;
            }
        }

        Ok(())
    }

    /// Validate the reference set
    ///
    /// The reference total (plate + base) must be positive, otherwise the
    /// estimated max collapses to zero. Plate weight alone may be zero on
    /// equipment with a base weight.
    pub fn validate_reference(
        reference: &ReferenceSet,
        base_weight: f64,
        limits: &ValidationLimits,
    ) -> Result<(), ValidationError> {
        Self::validate_reps("reference reps", reference.reps, limits)?;
        Self::validate_effort("reference effort", reference.effort, limits)?;
        Self::validate_finite("reference weight", reference.plate_weight)?;

        if reference.plate_weight < 0.0 {
            return Err(Self::out_of_range("reference weight", "(0, ∞)", reference.plate_weight));
        }
        if reference.plate_weight + base_weight <= 0.0 {
            return Err(Self::out_of_range("reference weight", "(0, ∞)", reference.plate_weight));
        }

        Ok(())
    }

    fn validate_reps(field: &str, reps: f64, limits: &ValidationLimits) -> Result<(), ValidationError> {
        Self::validate_finite(field, reps)?;
        if reps < 0.0 || reps > limits.max_reps {
            return Err(Self::out_of_range(field, &format!("[0, {}]", limits.max_reps), reps));
        }
        Ok(())
    }

    fn validate_effort(field: &str, effort: f64, limits: &ValidationLimits) -> Result<(), ValidationError> {
        Self::validate_finite(field, effort)?;
        if effort <= 0.0 || effort > limits.max_effort {
            return Err(Self::out_of_range(field, &format!("(0, {}]", limits.max_effort), effort));
        }
        Ok(())
    }

    fn validate_finite(field: &str, value: f64) -> Result<(), ValidationError> {
        if !value.is_finite() {
            return Err(ValidationError::NotFinite {
                field: field.to_string(),
                value,
            });
        }
        Ok(())
    }

    fn out_of_range(field: &str, range: &str, value: f64) -> ValidationError {
        ValidationError::OutOfRange {
            field: field.to_string(),
            range: range.to_string(),
            value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::{TargetByReps, TargetByWeight};
    use crate::equipment::Equipment;

    fn request(reference: ReferenceSet, target: Target, equipment: Equipment) -> CalculationRequest {
        CalculationRequest {
            reference,
            target,
            equipment,
        }
    }

    fn valid_reference() -> ReferenceSet {
        ReferenceSet {
            reps: 5.0,
            plate_weight: 100.0,
            effort: 8.0,
        }
    }

    #[test]
    fn test_valid_request() {
        let req = request(
            valid_reference(),
            Target::Reps(TargetByReps { reps: 8.0, effort: 10.0 }),
            Equipment::None,
        );
        assert!(SetValidator::validate_request(&req, &ValidationLimits::default()).is_ok());
    }

    #[test]
    fn test_effort_bounds() {
        let limits = ValidationLimits::default();
        for effort in [0.0, -1.0, 10.5, f64::NAN] {
            let mut reference = valid_reference();
            reference.effort = effort;
            let req = request(
                reference,
                Target::Reps(TargetByReps { reps: 8.0, effort: 8.0 }),
                Equipment::None,
            );
            assert!(SetValidator::validate_request(&req, &limits).is_err(), "effort {}", effort);
        }
    }

    #[test]
    fn test_reps_cap() {
        let req = request(
            valid_reference(),
            Target::Reps(TargetByReps { reps: 51.0, effort: 8.0 }),
            Equipment::None,
        );
        let err = SetValidator::validate_request(&req, &ValidationLimits::default()).unwrap_err();
        assert!(matches!(err, ValidationError::OutOfRange { ref field, .. } if field == "target reps"));
    }

    #[test]
    fn test_zero_reference_weight() {
        let mut reference = valid_reference();
        reference.plate_weight = 0.0;
        let target = Target::Weight(TargetByWeight { plate_weight: 20.0, effort: 8.0 });

        // Nothing was lifted: rejected
        let req = request(reference, target, Equipment::None);
        assert!(SetValidator::validate_request(&req, &ValidationLimits::default()).is_err());

        // The smith machine bar alone still counts
        let req = request(reference, target, Equipment::SmithMachine);
        assert!(SetValidator::validate_request(&req, &ValidationLimits::default()).is_ok());
    }

    #[test]
    fn test_negative_target_weight() {
        let req = request(
            valid_reference(),
            Target::Weight(TargetByWeight { plate_weight: -5.0, effort: 8.0 }),
            Equipment::None,
        );
        assert!(SetValidator::validate_request(&req, &ValidationLimits::default()).is_err());
    }

    #[test]
    fn test_not_finite() {
        let mut reference = valid_reference();
        reference.plate_weight = f64::INFINITY;
        let req = request(
            reference,
            Target::Reps(TargetByReps { reps: 5.0, effort: 8.0 }),
            Equipment::None,
        );
        let err = SetValidator::validate_request(&req, &ValidationLimits::default()).unwrap_err();
        assert!(matches!(err, ValidationError::NotFinite { .. }));
    }
}

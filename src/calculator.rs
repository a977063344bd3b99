//! Set calculator
//!
//! Answers two questions from a reference set (reps, plate weight, effort):
//! - what weight is needed for a target rep count at a target effort
//! - how many reps result from a target weight at a target effort
//!
//! Every call is stateless; the full request is passed in. The reference
//! set gives an estimated total-weight maximum:
//!
//! ```text
//! estimated_max = (plate + base) * 100 / pct(reference reps, reference effort)
//! ```
//!
//! Each answer comes with an achievable variant: the plate weight quantized
//! to the equipment and the rep count that weight actually corresponds to.
//! No validation happens here; see [`crate::validation`].

use crate::effort::EffortModel;
use crate::equipment::{Equipment, EquipmentModel, ResolvedEquipment};
use crate::error::CalculationError;
use crate::rounding::{RoundingDirection, WeightRounder};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A set that was actually performed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReferenceSet {
    pub reps: f64,
    pub plate_weight: f64,
    pub effort: f64,
}

/// Target set described by rep count
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetByReps {
    pub reps: f64,
    pub effort: f64,
}

/// Target set described by plate weight
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetByWeight {
    pub plate_weight: f64,
    pub effort: f64,
}

/// Which quantity to solve for
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "mode")]
pub enum Target {
    /// Solve for weight
    Reps(TargetByReps),
    /// Solve for reps
    Weight(TargetByWeight),
}

/// Complete input for one calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationRequest {
    pub reference: ReferenceSet,
    pub target: Target,
    pub equipment: Equipment,
}

/// Result of solving for weight
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WeightResult {
    /// Plate weight that hits the target exactly
    pub exact_plate_weight: f64,
    /// Nearest loadable plate weight
    pub rounded_plate_weight: f64,
    /// Reps corresponding to the rounded weight at the target effort
    pub rounded_reps: f64,
    /// Estimated total weight for one rep at effort 10
    pub estimated_max: f64,
    pub base_weight: f64,
}

/// Result of solving for reps
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RepsResult {
    /// Reps at the requested plate weight
    pub exact_reps: f64,
    /// Requested plate weight quantized to the equipment
    pub rounded_plate_weight: f64,
    /// Reps corresponding to the rounded weight at the target effort
    pub rounded_reps: f64,
    pub estimated_max: f64,
    pub base_weight: f64,
}

/// Outcome of a [`CalculationRequest`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "mode")]
pub enum CalculationOutcome {
    Weight(WeightResult),
    Reps(RepsResult),
}

impl WeightResult {
    pub fn is_finite(&self) -> bool {
        self.exact_plate_weight.is_finite()
            && self.rounded_plate_weight.is_finite()
            && self.rounded_reps.is_finite()
            && self.estimated_max.is_finite()
    }

    /// Total resistance at the exact plate weight
    pub fn exact_total_weight(&self) -> f64 {
        self.exact_plate_weight + self.base_weight
    }
}

impl RepsResult {
    pub fn is_finite(&self) -> bool {
        self.exact_reps.is_finite()
            && self.rounded_plate_weight.is_finite()
            && self.rounded_reps.is_finite()
            && self.estimated_max.is_finite()
    }
}

impl CalculationOutcome {
    pub fn is_finite(&self) -> bool {
        match self {
            CalculationOutcome::Weight(result) => result.is_finite(),
            CalculationOutcome::Reps(result) => result.is_finite(),
        }
    }
}

/// Orchestrates effort, equipment and rounding models
pub struct SetCalculator;

impl SetCalculator {
    /// Estimated total weight at one rep, effort 10
    ///
    /// Zero total reference weight gives 0; a zero percentage gives
    /// infinity. Neither is guarded.
    pub fn estimated_max(reference: &ReferenceSet, base_weight: f64) -> f64 {
        let reference_total = reference.plate_weight + base_weight;
        let reference_pct = EffortModel::to_load_percentage(reference.reps, reference.effort);
        reference_total * 100.0 / reference_pct
    }

    /// Reps achievable with `plate_weight` at `effort`
    fn reps_at_weight(plate_weight: f64, base_weight: f64, estimated_max: f64, effort: f64) -> f64 {
        let pct = (plate_weight + base_weight) * 100.0 / estimated_max;
        EffortModel::from_load_percentage(pct, effort)
    }

    /// Plate weight needed for `target.reps` at `target.effort`
    pub fn compute_target_weight(
        reference: &ReferenceSet,
        target: &TargetByReps,
        equipment: &Equipment,
    ) -> WeightResult {
        let resolved = EquipmentModel::resolve(equipment);
        Self::compute_target_weight_resolved(reference, target, &resolved)
    }

    /// [`Self::compute_target_weight`] with equipment already resolved
    pub fn compute_target_weight_resolved(
        reference: &ReferenceSet,
        target: &TargetByReps,
        equipment: &ResolvedEquipment,
    ) -> WeightResult {
        let base_weight = equipment.base_weight;
        let estimated_max = Self::estimated_max(reference, base_weight);

        let target_pct = EffortModel::to_load_percentage(target.reps, target.effort);
        let target_total = estimated_max * target_pct / 100.0;
        let exact_plate_weight = target_total - base_weight;

        let rounded_plate_weight = WeightRounder::round_weight(
            exact_plate_weight,
            equipment.rule.as_ref(),
            RoundingDirection::Nearest,
        );
        let rounded_reps =
            Self::reps_at_weight(rounded_plate_weight, base_weight, estimated_max, target.effort);

        debug!(
            base_weight,
            estimated_max,
            target_pct,
            exact_plate_weight,
            rounded_plate_weight,
            rounded_reps,
            "computed target weight"
        );

        WeightResult {
            exact_plate_weight,
            rounded_plate_weight,
            rounded_reps,
            estimated_max,
            base_weight,
        }
    }

    /// Rep count reached with `target.plate_weight` at `target.effort`
    pub fn compute_target_reps(
        reference: &ReferenceSet,
        target: &TargetByWeight,
        equipment: &Equipment,
    ) -> RepsResult {
        let resolved = EquipmentModel::resolve(equipment);
        Self::compute_target_reps_resolved(reference, target, &resolved)
    }

    /// [`Self::compute_target_reps`] with equipment already resolved
    pub fn compute_target_reps_resolved(
        reference: &ReferenceSet,
        target: &TargetByWeight,
        equipment: &ResolvedEquipment,
    ) -> RepsResult {
        let base_weight = equipment.base_weight;
        let estimated_max = Self::estimated_max(reference, base_weight);

        let exact_reps =
            Self::reps_at_weight(target.plate_weight, base_weight, estimated_max, target.effort);

        let rounded_plate_weight = WeightRounder::round_weight(
            target.plate_weight,
            equipment.rule.as_ref(),
            RoundingDirection::Nearest,
        );
        let rounded_reps =
            Self::reps_at_weight(rounded_plate_weight, base_weight, estimated_max, target.effort);

        debug!(
            base_weight,
            estimated_max,
            exact_reps,
            rounded_plate_weight,
            rounded_reps,
            "computed target reps"
        );

        RepsResult {
            exact_reps,
            rounded_plate_weight,
            rounded_reps,
            estimated_max,
            base_weight,
        }
    }

    /// Run a request
    pub fn calculate(request: &CalculationRequest) -> CalculationOutcome {
        match &request.target {
            Target::Reps(target) => CalculationOutcome::Weight(Self::compute_target_weight(
                &request.reference,
                target,
                &request.equipment,
            )),
            Target::Weight(target) => CalculationOutcome::Reps(Self::compute_target_reps(
                &request.reference,
                target,
                &request.equipment,
            )),
        }
    }

    /// Run a request, failing instead of returning non-finite values
    pub fn calculate_checked(
        request: &CalculationRequest,
    ) -> Result<CalculationOutcome, CalculationError> {
        let outcome = Self::calculate(request);
        if !outcome.is_finite() {
            let calculation = match outcome {
                CalculationOutcome::Weight(_) => "target weight",
                CalculationOutcome::Reps(_) => "target reps",
            };
            return Err(CalculationError::NonFinite {
                calculation: calculation.to_string(),
            });
        }
        Ok(outcome)
    }
}

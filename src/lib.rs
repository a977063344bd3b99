// Library interface for rpecalc modules
// The binary and integration tests both go through this crate root

pub mod calculator;
pub mod config;
pub mod display;
pub mod effort;
pub mod equipment;
pub mod error;
pub mod logging;
pub mod rounding;
pub mod validation;

// Re-export commonly used types for convenience
pub use calculator::{
    CalculationOutcome, CalculationRequest, ReferenceSet, RepsResult, SetCalculator, Target,
    TargetByReps, TargetByWeight, WeightResult,
};
pub use config::{AppConfig, ConfigLoader};
pub use effort::EffortModel;
pub use equipment::{CustomEquipment, Equipment, EquipmentModel, ResolvedEquipment};
pub use error::{CalculationError, Result, RpeCalcError, ValidationError};
pub use logging::{LogConfig, LogFormat, LogLevel};
pub use rounding::{QuantizationRule, RoundingDirection, WeightRounder};
pub use validation::{SetValidator, ValidationLimits};

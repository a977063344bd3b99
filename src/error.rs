//! Unified error hierarchy for rpecalc
//!
//! The calculation core is infallible and propagates non-finite values.
//! These types are used at the boundary: validation, strict checked
//! calculations, configuration loading and the CLI.

use thiserror::Error;

/// Top-level error type for all rpecalc operations
#[derive(Debug, Error)]
pub enum RpeCalcError {
    /// Input validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Calculation errors
    #[error("Calculation error: {0}")]
    Calculation(#[from] CalculationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Generic internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Input validation errors raised before values reach the core
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Value is NaN or infinite
    #[error("{field} must be a finite number, got {value}")]
    NotFinite { field: String, value: f64 },

    /// Value lies outside its accepted range
    #[error("{field} must be within {range}, got {value}")]
    OutOfRange {
        field: String,
        range: String,
        value: f64,
    },

    /// Equipment key not present in the catalog
    #[error("Unknown equipment: {key}")]
    UnknownEquipment { key: String },
}

/// Calculation errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalculationError {
    /// Input outside the mathematical domain of a formula
    #[error("Domain error in {calculation}: {parameter}={value}")]
    DomainError {
        calculation: String,
        parameter: String,
        value: f64,
    },

    /// Result is NaN or infinite
    #[error("Non-finite result in {calculation}")]
    NonFinite { calculation: String },
}

/// Result type alias for rpecalc operations
pub type Result<T> = std::result::Result<T, RpeCalcError>;

impl RpeCalcError {
    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            RpeCalcError::Validation(_) => ErrorSeverity::Warning,
            RpeCalcError::Calculation(_) => ErrorSeverity::Error,
            RpeCalcError::Configuration(_) => ErrorSeverity::Error,
            RpeCalcError::Io(_) => ErrorSeverity::Error,
            RpeCalcError::Internal(_) => ErrorSeverity::Critical,
        }
    }

    /// Get user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            RpeCalcError::Validation(ValidationError::OutOfRange { field, range, .. }) => {
                format!("Please enter a {} within {}.", field, range)
            }
            RpeCalcError::Validation(ValidationError::UnknownEquipment { key }) => {
                format!(
                    "'{}' is not a known equipment type. Run `rpecalc equipment` to list them.",
                    key
                )
            }
            RpeCalcError::Calculation(CalculationError::NonFinite { .. }) => {
                "The inputs do not produce a usable result. Check the reference set.".to_string()
            }
            _ => self.to_string(),
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Critical system error requiring immediate attention
    Critical,
    /// Error that prevents operation
    Error,
    /// Warning that doesn't prevent operation
    Warning,
}

impl ErrorSeverity {
    /// Convert to tracing level
    pub fn to_tracing_level(&self) -> tracing::Level {
        match self {
            ErrorSeverity::Critical => tracing::Level::ERROR,
            ErrorSeverity::Error => tracing::Level::ERROR,
            ErrorSeverity::Warning => tracing::Level::WARN,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_severity() {
        let err = RpeCalcError::Validation(ValidationError::NotFinite {
            field: "reps".to_string(),
            value: f64::NAN,
        });
        assert_eq!(err.severity(), ErrorSeverity::Warning);

        let err = RpeCalcError::Internal("test".to_string());
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert_eq!(err.severity().to_tracing_level(), tracing::Level::ERROR);
    }

    #[test]
    fn test_user_messages() {
        let err = RpeCalcError::from(ValidationError::OutOfRange {
            field: "effort".to_string(),
            range: "(0, 10]".to_string(),
            value: 11.0,
        });
        assert!(err.user_message().contains("(0, 10]"));

        let err = RpeCalcError::from(ValidationError::UnknownEquipment {
            key: "rowing".to_string(),
        });
        assert!(err.user_message().contains("rowing"));
    }

    #[test]
    fn test_calculation_error_display() {
        let err = CalculationError::DomainError {
            calculation: "from_load_percentage".to_string(),
            parameter: "pct".to_string(),
            value: -5.0,
        };
        assert_eq!(
            err.to_string(),
            "Domain error in from_load_percentage: pct=-5"
        );
    }
}

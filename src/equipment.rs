//! Equipment catalog
//!
//! Separates the weight a lifter loads (plate weight) from the resistance
//! the body moves (plate weight + base weight of the apparatus), and says
//! how each apparatus can be loaded.

use crate::error::ValidationError;
use crate::rounding::QuantizationRule;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::warn;

/// Increment used by the custom profile when none (or an invalid one) is given
pub const DEFAULT_CUSTOM_INCREMENT: f64 = 5.0;

/// Plate increment shared by barbell-style equipment
pub const PLATE_INCREMENT: f64 = 5.0;

/// Cable stack increment
pub const CABLE_INCREMENT: f64 = 2.5;

/// Smith machine bar weight
pub const SMITH_MACHINE_BASE: f64 = 25.0;

/// 45-degree leg press sled weight
pub const LEG_PRESS_45_BASE: f64 = 167.0;

/// Available single dumbbells
pub const DUMBBELL_WEIGHTS: [f64; 18] = [
    3.0, 5.0, 8.0, 10.0, 12.0, 15.0, 17.5, 20.0, 25.0, 30.0, 35.0, 40.0, 45.0, 50.0, 55.0, 60.0,
    65.0, 70.0,
];

/// Available dumbbell pairs, each entry the combined weight of two bells
pub const DUMBBELL_PAIR_WEIGHTS: [f64; 18] = [
    6.0, 10.0, 16.0, 20.0, 24.0, 30.0, 35.0, 40.0, 50.0, 60.0, 70.0, 80.0, 90.0, 100.0, 110.0,
    120.0, 130.0, 140.0,
];

/// User-defined equipment
///
/// Missing or invalid values fall back to a base weight of 0 and an
/// increment of [`DEFAULT_CUSTOM_INCREMENT`]. When `weights` is present and
/// non-empty it takes precedence over `increment`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomEquipment {
    pub base_weight: Option<f64>,
    pub increment: Option<f64>,
    pub weights: Option<Vec<f64>>,
}

impl CustomEquipment {
    pub fn new(base_weight: Option<f64>, increment: Option<f64>) -> Self {
        Self {
            base_weight,
            increment,
            weights: None,
        }
    }

    /// Use an enumerated set of loadable weights instead of an increment
    pub fn with_weights(mut self, weights: Vec<f64>) -> Self {
        self.weights = Some(weights);
        self
    }

    fn effective_base_weight(&self) -> f64 {
        match self.base_weight {
            Some(base) if base.is_finite() && base >= 0.0 => base,
            Some(base) => {
                warn!(base, "invalid custom base weight, using 0");
                0.0
            }
            None => 0.0,
        }
    }

    fn effective_rule(&self) -> QuantizationRule {
        if let Some(weights) = &self.weights {
            let rule = QuantizationRule::enumerated(weights.iter().copied());
            if matches!(&rule, QuantizationRule::Enumerated(list) if !list.is_empty()) {
                return rule;
            }
            warn!("custom weight list is empty, using increment");
        }

        match self.increment {
            Some(step) if step.is_finite() && step > 0.0 => QuantizationRule::Increment(step),
            Some(step) => {
                warn!(
                    step,
                    default = DEFAULT_CUSTOM_INCREMENT,
                    "invalid custom increment, using default"
                );
                QuantizationRule::Increment(DEFAULT_CUSTOM_INCREMENT)
            }
            None => QuantizationRule::Increment(DEFAULT_CUSTOM_INCREMENT),
        }
    }
}

/// Equipment profiles
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum Equipment {
    /// Free weights, no base weight
    #[default]
    #[serde(rename = "none")]
    None,
    #[serde(rename = "smith_machine")]
    SmithMachine,
    #[serde(rename = "leg_press_45")]
    LegPress45,
    /// Single fixed dumbbell
    #[serde(rename = "dumbbells")]
    Dumbbells,
    /// Pair of fixed dumbbells, weights combined
    #[serde(rename = "dumbbells_x2")]
    DumbbellsPair,
    #[serde(rename = "cable_purple")]
    CablePurple,
    #[serde(rename = "custom")]
    Custom(CustomEquipment),
}

impl Equipment {
    /// Catalog profiles in display order; custom is shown with its defaults
    pub fn all() -> Vec<Equipment> {
        vec![
            Equipment::None,
            Equipment::SmithMachine,
            Equipment::LegPress45,
            Equipment::Dumbbells,
            Equipment::DumbbellsPair,
            Equipment::CablePurple,
            Equipment::Custom(CustomEquipment::default()),
        ]
    }

    /// Selector key
    pub fn key(&self) -> &'static str {
        match self {
            Equipment::None => "none",
            Equipment::SmithMachine => "smith_machine",
            Equipment::LegPress45 => "leg_press_45",
            Equipment::Dumbbells => "dumbbells",
            Equipment::DumbbellsPair => "dumbbells_x2",
            Equipment::CablePurple => "cable_purple",
            Equipment::Custom(_) => "custom",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Equipment::None => "None (free weight)",
            Equipment::SmithMachine => "Smith machine",
            Equipment::LegPress45 => "45° leg press",
            Equipment::Dumbbells => "Dumbbell",
            Equipment::DumbbellsPair => "Dumbbells (pair)",
            Equipment::CablePurple => "Cable (purple stack)",
            Equipment::Custom(_) => "Custom",
        }
    }

    /// Look up a catalog key; `custom` yields a profile with default values
    pub fn from_key(key: &str) -> Option<Equipment> {
        match key.trim().to_lowercase().as_str() {
            "none" => Some(Equipment::None),
            "smith_machine" => Some(Equipment::SmithMachine),
            "leg_press_45" => Some(Equipment::LegPress45),
            "dumbbells" => Some(Equipment::Dumbbells),
            "dumbbells_x2" => Some(Equipment::DumbbellsPair),
            "cable_purple" => Some(Equipment::CablePurple),
            "custom" => Some(Equipment::Custom(CustomEquipment::default())),
            _ => None,
        }
    }
}

impl FromStr for Equipment {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Equipment::from_key(s).ok_or_else(|| ValidationError::UnknownEquipment { key: s.to_string() })
    }
}

impl fmt::Display for Equipment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Concrete base weight and loading rule for one calculation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedEquipment {
    pub base_weight: f64,
    /// `None` means weights are used as computed
    pub rule: Option<QuantizationRule>,
}

impl ResolvedEquipment {
    /// No base weight, no quantization
    pub fn identity() -> Self {
        Self {
            base_weight: 0.0,
            rule: None,
        }
    }
}

/// Resolves equipment selections to base weight and quantization rule
pub struct EquipmentModel;

impl EquipmentModel {
    /// Resolve a profile
    pub fn resolve(equipment: &Equipment) -> ResolvedEquipment {
        let (base_weight, rule) = match equipment {
            Equipment::None => (0.0, QuantizationRule::Increment(PLATE_INCREMENT)),
            Equipment::SmithMachine => (SMITH_MACHINE_BASE, QuantizationRule::Increment(PLATE_INCREMENT)),
            Equipment::LegPress45 => (LEG_PRESS_45_BASE, QuantizationRule::Increment(PLATE_INCREMENT)),
            Equipment::Dumbbells => (0.0, QuantizationRule::Enumerated(DUMBBELL_WEIGHTS.to_vec())),
            Equipment::DumbbellsPair => (0.0, QuantizationRule::Enumerated(DUMBBELL_PAIR_WEIGHTS.to_vec())),
            Equipment::CablePurple => (0.0, QuantizationRule::Increment(CABLE_INCREMENT)),
            Equipment::Custom(custom) => (custom.effective_base_weight(), custom.effective_rule()),
        };

        ResolvedEquipment {
            base_weight,
            rule: Some(rule),
        }
    }

    /// Resolve a selector key, with custom values used only for `custom`
    ///
    /// Unknown keys resolve to no base weight and identity rounding.
    pub fn resolve_key(
        key: &str,
        custom_base_weight: Option<f64>,
        custom_increment: Option<f64>,
    ) -> ResolvedEquipment {
        match Equipment::from_key(key) {
            Some(Equipment::Custom(_)) => Self::resolve(&Equipment::Custom(CustomEquipment::new(
                custom_base_weight,
                custom_increment,
            ))),
            Some(equipment) => Self::resolve(&equipment),
            None => {
                warn!(key, "unknown equipment, no base weight or rounding applied");
                ResolvedEquipment::identity()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_free_weights() {
        assert_eq!(Equipment::default(), Equipment::None);
        assert_eq!(EquipmentModel::resolve(&Equipment::default()).base_weight, 0.0);
    }

    #[test]
    fn test_catalog_base_weights() {
        assert_eq!(EquipmentModel::resolve(&Equipment::None).base_weight, 0.0);
        assert_eq!(EquipmentModel::resolve(&Equipment::SmithMachine).base_weight, 25.0);
        assert_eq!(EquipmentModel::resolve(&Equipment::LegPress45).base_weight, 167.0);
        assert_eq!(EquipmentModel::resolve(&Equipment::Dumbbells).base_weight, 0.0);
        assert_eq!(EquipmentModel::resolve(&Equipment::CablePurple).base_weight, 0.0);
    }

    #[test]
    fn test_catalog_rules() {
        assert_eq!(
            EquipmentModel::resolve(&Equipment::CablePurple).rule,
            Some(QuantizationRule::Increment(2.5))
        );
        assert_eq!(
            EquipmentModel::resolve(&Equipment::LegPress45).rule,
            Some(QuantizationRule::Increment(5.0))
        );
        match EquipmentModel::resolve(&Equipment::Dumbbells).rule {
            Some(QuantizationRule::Enumerated(weights)) => {
                assert_eq!(weights.len(), 18);
                assert_eq!(weights[6], 17.5);
            }
            other => panic!("expected enumerated rule, got {:?}", other),
        }
    }

    #[test]
    fn test_dumbbell_lists_sorted_and_unique() {
        for list in [&DUMBBELL_WEIGHTS, &DUMBBELL_PAIR_WEIGHTS] {
            assert!(list.windows(2).all(|pair| pair[0] < pair[1]));
        }
    }

    #[test]
    fn test_custom_profile() {
        let resolved = EquipmentModel::resolve_key("custom", Some(45.0), Some(2.5));
        assert_eq!(resolved.base_weight, 45.0);
        assert_eq!(resolved.rule, Some(QuantizationRule::Increment(2.5)));
    }

    #[test]
    fn test_custom_profile_defaults() {
        let resolved = EquipmentModel::resolve_key("custom", None, None);
        assert_eq!(resolved.base_weight, 0.0);
        assert_eq!(resolved.rule, Some(QuantizationRule::Increment(DEFAULT_CUSTOM_INCREMENT)));

        let resolved = EquipmentModel::resolve_key("custom", Some(-10.0), Some(0.0));
        assert_eq!(resolved.base_weight, 0.0);
        assert_eq!(resolved.rule, Some(QuantizationRule::Increment(DEFAULT_CUSTOM_INCREMENT)));

        let resolved = EquipmentModel::resolve_key("custom", Some(f64::NAN), Some(f64::INFINITY));
        assert_eq!(resolved.base_weight, 0.0);
        assert_eq!(resolved.rule, Some(QuantizationRule::Increment(DEFAULT_CUSTOM_INCREMENT)));
    }

    #[test]
    fn test_custom_values_ignored_for_catalog_keys() {
        let resolved = EquipmentModel::resolve_key("smith_machine", Some(100.0), Some(1.0));
        assert_eq!(resolved.base_weight, 25.0);
        assert_eq!(resolved.rule, Some(QuantizationRule::Increment(5.0)));
    }

    #[test]
    fn test_custom_enumerated_weights() {
        let custom = CustomEquipment::new(Some(10.0), None).with_weights(vec![20.0, 10.0, 15.0]);
        let resolved = EquipmentModel::resolve(&Equipment::Custom(custom));
        assert_eq!(resolved.base_weight, 10.0);
        assert_eq!(resolved.rule, Some(QuantizationRule::Enumerated(vec![10.0, 15.0, 20.0])));

        let custom = CustomEquipment::new(None, Some(1.0)).with_weights(vec![]);
        let resolved = EquipmentModel::resolve(&Equipment::Custom(custom));
        assert_eq!(resolved.rule, Some(QuantizationRule::Increment(1.0)));
    }

    #[test]
    fn test_unknown_key_is_identity() {
        let resolved = EquipmentModel::resolve_key("rowing_machine", Some(50.0), Some(2.0));
        assert_eq!(resolved, ResolvedEquipment::identity());
    }

    #[test]
    fn test_key_round_trip() {
        for equipment in Equipment::all() {
            let parsed: Equipment = equipment.key().parse().unwrap();
            assert_eq!(parsed, equipment);
        }
        assert!("kettlebell".parse::<Equipment>().is_err());
        assert_eq!(" Smith_Machine ".parse::<Equipment>().unwrap(), Equipment::SmithMachine);
    }
}

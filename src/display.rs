//! Presentation of calculation outcomes
//!
//! Display rounding (one decimal by default) is separate from and applied
//! after equipment quantization. Non-finite values render as a placeholder.

use crate::calculator::{CalculationOutcome, RepsResult, WeightResult};
use crate::equipment::{Equipment, EquipmentModel};
use serde::{Deserialize, Serialize};
use tabled::settings::Style;
use tabled::{Table, Tabled};

/// Shown in place of NaN or infinite values
pub const PLACEHOLDER: &str = "-";

/// Display preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplaySettings {
    /// Decimal places shown
    #[serde(default = "default_precision")]
    pub precision: usize,
    /// Unit appended to weights
    #[serde(default = "default_unit_label")]
    pub unit_label: String,
}

fn default_precision() -> usize {
    1
}

fn default_unit_label() -> String {
    "lbs".to_string()
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            precision: default_precision(),
            unit_label: default_unit_label(),
        }
    }
}

/// Format a number to `precision` decimals, trimming a trailing ".0"
pub fn format_number(value: f64, precision: usize) -> String {
    if !value.is_finite() {
        return PLACEHOLDER.to_string();
    }

    let formatted = format!("{:.*}", precision, value);
    let formatted = if formatted.contains('.') {
        formatted.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        formatted
    };

    // "-0" after rounding a tiny negative
    if formatted == "-0" {
        "0".to_string()
    } else {
        formatted
    }
}

/// Format a weight with its unit
pub fn format_weight(value: f64, settings: &DisplaySettings) -> String {
    if !value.is_finite() {
        return PLACEHOLDER.to_string();
    }
    format!("{} {}", format_number(value, settings.precision), settings.unit_label)
}

/// Format a rep count
pub fn format_reps(value: f64, settings: &DisplaySettings) -> String {
    format_number(value, settings.precision)
}

#[derive(Tabled)]
struct ReportRow {
    #[tabled(rename = "")]
    label: String,
    #[tabled(rename = "Exact")]
    exact: String,
    #[tabled(rename = "Achievable")]
    achievable: String,
}

/// Human-readable summary of an outcome
pub struct OutcomeReport<'a> {
    outcome: &'a CalculationOutcome,
    settings: &'a DisplaySettings,
}

impl<'a> OutcomeReport<'a> {
    pub fn new(outcome: &'a CalculationOutcome, settings: &'a DisplaySettings) -> Self {
        Self { outcome, settings }
    }

    /// Headline value: weight to load or reps to perform
    pub fn headline(&self) -> String {
        match self.outcome {
            CalculationOutcome::Weight(result) => {
                format_weight(result.exact_plate_weight, self.settings)
            }
            CalculationOutcome::Reps(result) => {
                format!("{} reps", format_reps(result.exact_reps, self.settings))
            }
        }
    }

    fn weight_rows(&self, result: &WeightResult) -> Vec<ReportRow> {
        let s = self.settings;
        vec![
            ReportRow {
                label: "Plate weight".to_string(),
                exact: format_weight(result.exact_plate_weight, s),
                achievable: format_weight(result.rounded_plate_weight, s),
            },
            ReportRow {
                label: "Reps".to_string(),
                exact: PLACEHOLDER.to_string(),
                achievable: format_reps(result.rounded_reps, s),
            },
            ReportRow {
                label: "Total weight".to_string(),
                exact: format_weight(result.exact_total_weight(), s),
                achievable: format_weight(result.rounded_plate_weight + result.base_weight, s),
            },
        ]
    }

    fn reps_rows(&self, result: &RepsResult) -> Vec<ReportRow> {
        let s = self.settings;
        vec![
            ReportRow {
                label: "Reps".to_string(),
                exact: format_reps(result.exact_reps, s),
                achievable: format_reps(result.rounded_reps, s),
            },
            ReportRow {
                label: "Plate weight".to_string(),
                exact: PLACEHOLDER.to_string(),
                achievable: format_weight(result.rounded_plate_weight, s),
            },
        ]
    }

    /// Table of exact and achievable values
    pub fn table(&self) -> String {
        let rows = match self.outcome {
            CalculationOutcome::Weight(result) => self.weight_rows(result),
            CalculationOutcome::Reps(result) => self.reps_rows(result),
        };
        Table::new(rows).with(Style::rounded()).to_string()
    }

    /// Estimated one-rep max line
    pub fn estimated_max(&self) -> String {
        let estimated_max = match self.outcome {
            CalculationOutcome::Weight(result) => result.estimated_max,
            CalculationOutcome::Reps(result) => result.estimated_max,
        };
        format!("Estimated 1RM (total): {}", format_weight(estimated_max, self.settings))
    }
}

#[derive(Tabled)]
struct EquipmentRow {
    #[tabled(rename = "Key")]
    key: String,
    #[tabled(rename = "Equipment")]
    name: String,
    #[tabled(rename = "Base weight")]
    base_weight: String,
    #[tabled(rename = "Loading")]
    rule: String,
}

/// Table of the equipment catalog
pub fn equipment_table(settings: &DisplaySettings) -> String {
    let rows: Vec<EquipmentRow> = Equipment::all()
        .into_iter()
        .map(|equipment| {
            let resolved = EquipmentModel::resolve(&equipment);
            let (base_weight, rule) = match &equipment {
                Equipment::Custom(_) => ("user-defined".to_string(), "user-defined".to_string()),
                _ => (
                    format_weight(resolved.base_weight, settings),
                    resolved
                        .rule
                        .map(|rule| rule.to_string())
                        .unwrap_or_else(|| "exact".to_string()),
                ),
            };
            EquipmentRow {
                key: equipment.key().to_string(),
                name: equipment.display_name().to_string(),
                base_weight,
                rule,
            }
        })
        .collect();

    Table::new(rows).with(Style::rounded()).to_string()
}

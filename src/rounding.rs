//! Weight quantization
//!
//! Maps an exact weight onto one that can actually be loaded, either on a
//! fixed increment grid (plates, pin stacks) or onto an enumerated set of
//! magnitudes (fixed dumbbells).
//!
//! Increment rounding goes through [`Decimal`] so that grids such as 2.5 or
//! 0.1 floor and ceil exactly instead of tripping over binary fractions.

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::trace;

/// Rounding direction when quantizing a weight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoundingDirection {
    /// Closest achievable weight
    #[default]
    Nearest,
    /// Closest achievable weight not above the input
    Down,
    /// Closest achievable weight not below the input
    Up,
}

impl FromStr for RoundingDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "nearest" | "round" => Ok(RoundingDirection::Nearest),
            "down" | "floor" => Ok(RoundingDirection::Down),
            "up" | "ceil" | "ceiling" => Ok(RoundingDirection::Up),
            _ => Err(format!("Invalid rounding direction: {}", s)),
        }
    }
}

impl fmt::Display for RoundingDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RoundingDirection::Nearest => "nearest",
            RoundingDirection::Down => "down",
            RoundingDirection::Up => "up",
        };
        write!(f, "{}", name)
    }
}

/// How a piece of equipment can be loaded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuantizationRule {
    /// Any multiple of the increment
    Increment(f64),
    /// Only the listed magnitudes, ascending and unique
    Enumerated(Vec<f64>),
}

impl QuantizationRule {
    /// Build an enumerated rule, sorting and de-duplicating the weights
    pub fn enumerated(weights: impl IntoIterator<Item = f64>) -> Self {
        let mut weights: Vec<f64> = weights.into_iter().filter(|w| w.is_finite()).collect();
        weights.sort_by(|a, b| a.total_cmp(b));
        weights.dedup();
        QuantizationRule::Enumerated(weights)
    }
}

impl fmt::Display for QuantizationRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuantizationRule::Increment(step) => write!(f, "increments of {}", step),
            QuantizationRule::Enumerated(weights) => {
                let list: Vec<String> = weights.iter().map(|w| w.to_string()).collect();
                write!(f, "one of {{{}}}", list.join(", "))
            }
        }
    }
}

/// Weight quantization utilities
pub struct WeightRounder;

impl WeightRounder {
    /// Round onto a multiple of `increment`
    ///
    /// A non-positive (or NaN) increment leaves the weight unchanged.
    /// `Down` never returns more than `weight` and `Up` never less.
    /// Exact midpoints under [`RoundingDirection::Nearest`] round half up,
    /// toward the higher multiple: 112.5 on a 5 grid becomes 115 and
    /// -112.5 becomes -110.
    pub fn round_to_increment(weight: f64, increment: f64, direction: RoundingDirection) -> f64 {
        if increment.is_nan() || increment <= 0.0 || !weight.is_finite() || !increment.is_finite() {
            return weight;
        }

        let (down, up) = Self::decimal_bracket(weight, increment)
            .unwrap_or_else(|| Self::float_bracket(weight, increment));

        let rounded = match direction {
            RoundingDirection::Down => down,
            RoundingDirection::Up => up,
            RoundingDirection::Nearest => {
                if up - weight <= weight - down {
                    up
                } else {
                    down
                }
            }
        };

        trace!(weight, increment, %direction, rounded, "increment rounding");
        rounded
    }

    /// Grid points immediately at or below and at or above `weight`
    ///
    /// `Decimal::from_f64` may round a weight just off a grid line onto it,
    /// so each bound is checked against the original f64 and moved one
    /// step when it lands on the wrong side.
    fn decimal_bracket(weight: f64, increment: f64) -> Option<(f64, f64)> {
        let exact = Decimal::from_f64(weight)?;
        let step = Decimal::from_f64(increment)?;
        if step.is_zero() {
            return None;
        }

        let steps = exact.checked_div(step)?;

        let floor = steps.floor();
        let mut down = floor.checked_mul(step)?.to_f64()?;
        if down > weight {
            down = floor.checked_sub(dec!(1))?.checked_mul(step)?.to_f64()?;
        }

        let ceil = steps.ceil();
        let mut up = ceil.checked_mul(step)?.to_f64()?;
        if up < weight {
            up = ceil.checked_add(dec!(1))?.checked_mul(step)?.to_f64()?;
        }

        Some((down, up))
    }

    // Fallback for magnitudes outside the Decimal range
    fn float_bracket(weight: f64, increment: f64) -> (f64, f64) {
        let steps = weight / increment;
        let mut down = steps.floor() * increment;
        if down > weight {
            down -= increment;
        }
        let mut up = steps.ceil() * increment;
        if up < weight {
            up += increment;
        }
        (down, up)
    }

    /// Round onto one of the enumerated `weights`
    ///
    /// An empty list leaves the weight unchanged, as does a NaN or infinite
    /// weight. Otherwise the result is always a member of `weights`:
    /// - `Nearest`: smallest absolute difference, the lower value on a tie
    /// - `Down`: greatest entry <= weight, else the smallest entry
    /// - `Up`: least entry >= weight, else the largest entry
    pub fn round_to_enumerated(weight: f64, weights: &[f64], direction: RoundingDirection) -> f64 {
        if weights.is_empty() || !weight.is_finite() {
            return weight;
        }

        let min = weights.iter().copied().fold(f64::INFINITY, f64::min);
        let max = weights.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        let rounded = match direction {
            RoundingDirection::Nearest => {
                let mut best = weights[0];
                let mut best_diff = (weight - best).abs();
                for &candidate in &weights[1..] {
                    let diff = (weight - candidate).abs();
                    if diff < best_diff || (diff == best_diff && candidate < best) {
                        best = candidate;
                        best_diff = diff;
                    }
                }
                best
            }
            RoundingDirection::Down => weights
                .iter()
                .copied()
                .filter(|&w| w <= weight)
                .fold(None, |acc: Option<f64>, w| Some(acc.map_or(w, |a| a.max(w))))
                .unwrap_or(min),
            RoundingDirection::Up => weights
                .iter()
                .copied()
                .filter(|&w| w >= weight)
                .fold(None, |acc: Option<f64>, w| Some(acc.map_or(w, |a| a.min(w))))
                .unwrap_or(max),
        };

        trace!(weight, %direction, rounded, "enumerated rounding");
        rounded
    }

    /// Quantize according to `rule`; no rule means identity
    pub fn round_weight(
        weight: f64,
        rule: Option<&QuantizationRule>,
        direction: RoundingDirection,
    ) -> f64 {
        match rule {
            Some(QuantizationRule::Increment(increment)) => {
                Self::round_to_increment(weight, *increment, direction)
            }
            Some(QuantizationRule::Enumerated(weights)) => {
                Self::round_to_enumerated(weight, weights, direction)
            }
            None => weight,
        }
    }
}

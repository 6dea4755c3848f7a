//! # Fee Module
//!
//! Parking fee policies. A policy maps hours parked to the amount owed.
//!
//! ## Policies
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Fee Policies                                     │
//! │                                                                         │
//! │  MinMax         hours ≤ 3   → min                                       │
//! │                 3 < h < 24  → min + add × ⌊h − 3⌋ + add  (capped)       │
//! │                 hours ≥ 24  → max                                       │
//! │                                                                         │
//! │  MinNoMax       hours ≤ 2   → min                                       │
//! │                 otherwise   → min + add × ⌊h − 2⌋ (+ add if fraction)   │
//! │                                                                         │
//! │  SpecialEvent   hours ≤ 4   → min                                       │
//! │                 otherwise   → min + add × ⌊h − 4⌋ (+ add if fraction)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All policies are pure and reject non-positive parameters at construction.
//!
//! ## Usage
//! ```rust
//! use garage_core::fee::{FeeCalculator, MinNoMaxFee};
//!
//! let calc = MinNoMaxFee::new(1.50, 0.75).unwrap();
//! assert_eq!(calc.calc_fee(2.5), 2.25);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::CoreResult;
use crate::validation::validate_fee_parameter;

/// Hours covered by the minimum fee under [`MinMaxFee`].
pub const MIN_MAX_BASE_HOURS: f64 = 3.0;

/// Hours at or beyond which [`MinMaxFee`] charges the maximum.
pub const MIN_MAX_DAY_HOURS: f64 = 24.0;

/// Hard-coded comparison value of the capped branch in [`MinMaxFee`].
///
/// This is NOT `max_fee`: the comparison has always been made against a
/// fixed $10.00, and existing fee tables depend on it.
pub const MIN_MAX_CAP_CHECK: f64 = 10.00;

/// Hours covered by the minimum fee under [`MinNoMaxFee`].
pub const MIN_NO_MAX_BASE_HOURS: f64 = 2.0;

/// Hours covered by the minimum fee under [`SpecialEventFee`].
pub const SPECIAL_EVENT_BASE_HOURS: f64 = 4.0;

// =============================================================================
// Fee Calculator Trait
// =============================================================================

/// A pricing policy: hours parked in, fee out.
///
/// Implementations must be pure. The same input always yields the same fee.
pub trait FeeCalculator: fmt::Debug + fmt::Display {
    /// Returns the fee owed for `hours_parked` hours.
    fn calc_fee(&self, hours_parked: f64) -> f64;
}

/// Splits the time beyond `base_hours` into whole hours and the remainder.
fn split_beyond(hours_parked: f64, base_hours: f64) -> (f64, f64) {
    let beyond = hours_parked - base_hours;
    let whole = beyond.trunc();
    (whole, beyond - whole)
}

/// Minimum fee, then one increment per started hour past the threshold.
fn incremental_fee(min_fee: f64, additional_fee: f64, base_hours: f64, hours_parked: f64) -> f64 {
    if hours_parked <= base_hours {
        return min_fee;
    }

    let (whole, fraction) = split_beyond(hours_parked, base_hours);
    if fraction > 0.0 {
        min_fee + additional_fee * whole + additional_fee
    } else {
        min_fee + additional_fee * whole
    }
}

// =============================================================================
// Min / Max
// =============================================================================

/// Minimum fee for the first three hours, an hourly increment after that,
/// and a flat maximum for a full day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MinMaxFee {
    min_fee: f64,
    additional_fee: f64,
    max_fee: f64,
}

impl MinMaxFee {
    /// Creates the policy, rejecting any parameter that is not > 0.
    pub fn new(min_fee: f64, additional_fee: f64, max_fee: f64) -> CoreResult<Self> {
        validate_fee_parameter("min_fee", min_fee)?;
        validate_fee_parameter("additional_fee", additional_fee)?;
        validate_fee_parameter("max_fee", max_fee)?;

        Ok(MinMaxFee {
            min_fee,
            additional_fee,
            max_fee,
        })
    }

    pub fn min_fee(&self) -> f64 {
        self.min_fee
    }

    pub fn additional_fee(&self) -> f64 {
        self.additional_fee
    }

    pub fn max_fee(&self) -> f64 {
        self.max_fee
    }
}

impl FeeCalculator for MinMaxFee {
    /// ## Capped Branch
    /// Between 3 and 24 hours the candidate always includes one extra
    /// increment, with or without a fractional hour. What differs is the
    /// value tested against [`MIN_MAX_CAP_CHECK`]:
    /// ```text
    /// fraction > 0:  test  min + add × whole + add
    /// fraction = 0:  test  min + add × whole
    /// ```
    /// When the test fails the policy returns `max_fee`.
    fn calc_fee(&self, hours_parked: f64) -> f64 {
        if hours_parked <= MIN_MAX_BASE_HOURS {
            return self.min_fee;
        }
        if hours_parked >= MIN_MAX_DAY_HOURS {
            return self.max_fee;
        }

        let (whole, fraction) = split_beyond(hours_parked, MIN_MAX_BASE_HOURS);
        let base = self.min_fee + self.additional_fee * whole;
        let candidate = base + self.additional_fee;
        let tested = if fraction > 0.0 { candidate } else { base };

        if tested < MIN_MAX_CAP_CHECK {
            candidate
        } else {
            self.max_fee
        }
    }
}

impl fmt::Display for MinMaxFee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Min. Fee: ${:.2} | Additional Fee: ${:.2}/hr | Max. Fee: ${:.2}",
            self.min_fee, self.additional_fee, self.max_fee
        )
    }
}

// =============================================================================
// Min / No Max
// =============================================================================

/// Minimum fee for the first two hours, then an unbounded hourly increment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MinNoMaxFee {
    min_fee: f64,
    additional_fee: f64,
}

impl MinNoMaxFee {
    /// Creates the policy, rejecting any parameter that is not > 0.
    pub fn new(min_fee: f64, additional_fee: f64) -> CoreResult<Self> {
        validate_fee_parameter("min_fee", min_fee)?;
        validate_fee_parameter("additional_fee", additional_fee)?;

        Ok(MinNoMaxFee {
            min_fee,
            additional_fee,
        })
    }

    pub fn min_fee(&self) -> f64 {
        self.min_fee
    }

    pub fn additional_fee(&self) -> f64 {
        self.additional_fee
    }
}

impl FeeCalculator for MinNoMaxFee {
    fn calc_fee(&self, hours_parked: f64) -> f64 {
        incremental_fee(
            self.min_fee,
            self.additional_fee,
            MIN_NO_MAX_BASE_HOURS,
            hours_parked,
        )
    }
}

impl fmt::Display for MinNoMaxFee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Min. Fee: ${:.2} | Additional Fee: ${:.2}/hr",
            self.min_fee, self.additional_fee
        )
    }
}

// =============================================================================
// Special Event
// =============================================================================

/// Event pricing: like [`MinNoMaxFee`] but the minimum covers four hours.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpecialEventFee {
    min_fee: f64,
    additional_fee: f64,
}

impl SpecialEventFee {
    /// Creates the policy, rejecting any parameter that is not > 0.
    pub fn new(min_fee: f64, additional_fee: f64) -> CoreResult<Self> {
        validate_fee_parameter("min_fee", min_fee)?;
        validate_fee_parameter("additional_fee", additional_fee)?;

        Ok(SpecialEventFee {
            min_fee,
            additional_fee,
        })
    }

    pub fn min_fee(&self) -> f64 {
        self.min_fee
    }

    pub fn additional_fee(&self) -> f64 {
        self.additional_fee
    }
}

impl FeeCalculator for SpecialEventFee {
    fn calc_fee(&self, hours_parked: f64) -> f64 {
        incremental_fee(
            self.min_fee,
            self.additional_fee,
            SPECIAL_EVENT_BASE_HOURS,
            hours_parked,
        )
    }
}

impl fmt::Display for SpecialEventFee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Event Min. Fee: ${:.2} | Additional Fee: ${:.2}/hr",
            self.min_fee, self.additional_fee
        )
    }
}

// =============================================================================
// Fee Schedule (configuration)
// =============================================================================

/// Fee policy selection as it appears in configuration.
///
/// ## Config Format
/// ```toml
/// [fee]
/// policy = "min_max"
/// min_fee = 2.0
/// additional_fee = 0.5
/// max_fee = 10.0
/// ```
///
/// [`FeeSchedule::build`] is the single place where a concrete policy is
/// chosen; callers only ever hold `Box<dyn FeeCalculator>`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum FeeSchedule {
    MinMax {
        min_fee: f64,
        additional_fee: f64,
        max_fee: f64,
    },
    MinNoMax {
        min_fee: f64,
        additional_fee: f64,
    },
    SpecialEvent {
        min_fee: f64,
        additional_fee: f64,
    },
}

impl FeeSchedule {
    /// Short policy name, matching the `policy` key in config.
    pub fn policy_name(&self) -> &'static str {
        match self {
            FeeSchedule::MinMax { .. } => "min_max",
            FeeSchedule::MinNoMax { .. } => "min_no_max",
            FeeSchedule::SpecialEvent { .. } => "special_event",
        }
    }

    /// Builds the configured policy.
    ///
    /// ## Errors
    /// `InvalidConfiguration` when any fee parameter is not > 0.
    pub fn build(&self) -> CoreResult<Box<dyn FeeCalculator>> {
        let calc: Box<dyn FeeCalculator> = match *self {
            FeeSchedule::MinMax {
                min_fee,
                additional_fee,
                max_fee,
            } => Box::new(MinMaxFee::new(min_fee, additional_fee, max_fee)?),
            FeeSchedule::MinNoMax {
                min_fee,
                additional_fee,
            } => Box::new(MinNoMaxFee::new(min_fee, additional_fee)?),
            FeeSchedule::SpecialEvent {
                min_fee,
                additional_fee,
            } => Box::new(SpecialEventFee::new(min_fee, additional_fee)?),
        };
        Ok(calc)
    }
}

impl Default for FeeSchedule {
    fn default() -> Self {
        FeeSchedule::MinMax {
            min_fee: 2.0,
            additional_fee: 0.5,
            max_fee: 10.0,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CoreError, ErrorKind};

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_min_max_within_base_hours() {
        let calc = MinMaxFee::new(2.0, 0.50, 10.00).unwrap();
        for hours in [0.0, 0.5, 1.5, 2.99, 3.0] {
            assert_eq!(calc.calc_fee(hours), 2.0);
        }
    }

    #[test]
    fn test_min_max_beyond_base_hours() {
        let calc = MinMaxFee::new(2.0, 0.50, 10.00).unwrap();
        assert_eq!(calc.calc_fee(3.5), 2.5);
        assert_close(calc.calc_fee(5.25), 3.5);
    }

    #[test]
    fn test_min_max_whole_hours_still_add_increment() {
        // Inherited behaviour: the capped branch adds the increment even
        // when there is no fractional hour.
        let calc = MinMaxFee::new(2.0, 0.50, 10.00).unwrap();
        assert_close(calc.calc_fee(4.0), 3.0);
        assert_close(calc.calc_fee(6.0), 4.0);
    }

    #[test]
    fn test_min_max_cap_and_day_rate() {
        let calc = MinMaxFee::new(2.0, 0.50, 10.00).unwrap();
        // 2 + 0.5 * 20 + 0.5 = 12.5 → capped
        assert_eq!(calc.calc_fee(23.5), 10.0);
        // whole-hour branch tests 2 + 0.5 * 17 = 10.5 → capped
        assert_eq!(calc.calc_fee(20.0), 10.0);
        assert_eq!(calc.calc_fee(24.0), 10.0);
        assert_eq!(calc.calc_fee(72.0), 10.0);
    }

    #[test]
    fn test_min_max_cap_check_is_fixed_ten_dollars() {
        // Inherited behaviour: the cap is tested against $10.00, not max_fee.
        let calc = MinMaxFee::new(2.0, 0.50, 15.00).unwrap();
        assert_close(calc.calc_fee(17.5), 9.5);
        // candidate 10.00 is below max_fee, yet fails the fixed check
        assert_eq!(calc.calc_fee(18.5), 15.0);
    }

    #[test]
    fn test_min_no_max() {
        let calc = MinNoMaxFee::new(1.50, 0.75).unwrap();
        assert_eq!(calc.calc_fee(1.0), 1.5);
        assert_eq!(calc.calc_fee(2.0), 1.5);
        assert_eq!(calc.calc_fee(2.5), 2.25);
        assert_close(calc.calc_fee(4.0), 3.0);
        assert_close(calc.calc_fee(4.25), 3.75);
        assert_close(calc.calc_fee(102.0), 1.5 + 0.75 * 100.0);
    }

    #[test]
    fn test_special_event() {
        let calc = SpecialEventFee::new(1.80, 0.15).unwrap();
        for hours in [0.0, 1.0, 3.99, 4.0] {
            assert_eq!(calc.calc_fee(hours), 1.80);
        }
        assert_close(calc.calc_fee(4.5), 1.95);
        assert_close(calc.calc_fee(6.0), 2.10);
    }

    #[test]
    fn test_rejects_non_positive_parameters() {
        let err = MinMaxFee::new(2.0, 0.0, 10.0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidConfiguration);
        assert!(matches!(
            err,
            CoreError::InvalidConfiguration { ref parameter, .. } if parameter == "additional_fee"
        ));

        assert!(MinMaxFee::new(2.0, 0.5, -1.0).is_err());
        assert!(MinNoMaxFee::new(-1.5, 0.75).is_err());
        assert!(SpecialEventFee::new(1.8, 0.0).is_err());
    }

    #[test]
    fn test_schedule_build_and_parse() {
        let schedule: FeeSchedule = serde_json::from_str(
            r#"{"policy":"min_no_max","min_fee":1.5,"additional_fee":0.75}"#,
        )
        .unwrap();
        assert_eq!(schedule.policy_name(), "min_no_max");

        let calc = schedule.build().unwrap();
        assert_eq!(calc.calc_fee(2.5), 2.25);

        let bad = FeeSchedule::SpecialEvent {
            min_fee: 0.0,
            additional_fee: 0.15,
        };
        assert!(bad.build().is_err());
    }

    #[test]
    fn test_display() {
        let calc = MinMaxFee::new(2.0, 0.5, 10.0).unwrap();
        assert_eq!(
            calc.to_string(),
            "Min. Fee: $2.00 | Additional Fee: $0.50/hr | Max. Fee: $10.00"
        );
    }
}

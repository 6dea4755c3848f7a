//! # Totals Record Encoding
//!
//! The running totals are persisted as two lines:
//!
//! ```text
//! line 1: total hours charged, two decimals      e.g. "3.50"
//! line 2: total revenue collected, plain number  e.g. "2.5"
//! ```

use crate::error::{StoreError, StoreResult};
use garage_core::format::format_hours;
use serde::Serialize;
use std::fmt;

/// Accumulated hours charged and revenue collected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalsRecord {
    pub hours_charged: f64,
    pub revenue_collected: f64,
}

impl TotalsRecord {
    pub fn new(hours_charged: f64, revenue_collected: f64) -> Self {
        TotalsRecord {
            hours_charged,
            revenue_collected,
        }
    }

    /// Returns a record with both deltas added.
    pub fn plus(self, hours: f64, revenue: f64) -> Self {
        TotalsRecord {
            hours_charged: self.hours_charged + hours,
            revenue_collected: self.revenue_collected + revenue,
        }
    }
}

/// Converts a [`TotalsRecord`] to and from stored lines.
pub trait TotalsFormatter: fmt::Debug {
    /// Encodes the record for saving.
    fn encode(&self, record: &TotalsRecord) -> StoreResult<Vec<String>>;

    /// Decodes stored lines. An empty source yields `None`.
    fn decode(&self, lines: &[String]) -> StoreResult<Option<TotalsRecord>>;
}

/// The two-line format described in the module docs.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunningTotalsFormatter;

impl RunningTotalsFormatter {
    fn check(field: &str, value: f64) -> StoreResult<()> {
        if !value.is_finite() || value < 0.0 {
            return Err(StoreError::Encoding(format!(
                "{} must be a finite, non-negative number (got {})",
                field, value
            )));
        }
        Ok(())
    }

    fn parse_line(lines: &[String], index: usize) -> StoreResult<f64> {
        let line = index + 1;
        let raw = lines.get(index).map(|s| s.trim()).unwrap_or_default();

        if raw.is_empty() {
            return Err(StoreError::Corrupt {
                line,
                reason: "missing value".to_string(),
            });
        }

        let value: f64 = raw.parse().map_err(|_| StoreError::Corrupt {
            line,
            reason: format!("'{}' is not a number", raw),
        })?;

        if !value.is_finite() || value < 0.0 {
            return Err(StoreError::Corrupt {
                line,
                reason: format!("'{}' is not a non-negative amount", raw),
            });
        }

        Ok(value)
    }
}

impl TotalsFormatter for RunningTotalsFormatter {
    fn encode(&self, record: &TotalsRecord) -> StoreResult<Vec<String>> {
        Self::check("hours charged", record.hours_charged)?;
        Self::check("revenue collected", record.revenue_collected)?;

        Ok(vec![
            format_hours(record.hours_charged),
            record.revenue_collected.to_string(),
        ])
    }

    fn decode(&self, lines: &[String]) -> StoreResult<Option<TotalsRecord>> {
        if lines.iter().all(|l| l.trim().is_empty()) {
            return Ok(None);
        }

        Ok(Some(TotalsRecord {
            hours_charged: Self::parse_line(lines, 0)?,
            revenue_collected: Self::parse_line(lines, 1)?,
        }))
    }
}

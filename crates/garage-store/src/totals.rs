//! # Running Totals
//!
//! [`TotalsAccumulator`] keeps the lifetime hours charged and revenue
//! collected for the garage.
//!
//! ## Update Cycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        update(hours, revenue)                           │
//! │                                                                         │
//! │  1. Reject negative deltas ──────────────► InvalidArgument             │
//! │  2. Reload the persisted record ─────────► Io / Corrupt                │
//! │  3. Add the deltas                                                      │
//! │  4. Encode and write back ───────────────► Encoding / Io               │
//! │  5. Adopt the new record, return summary                               │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The record is reloaded before every update so that another writer's
//! changes to the same file are never overwritten with a stale total.

use crate::error::StoreResult;
use crate::formatter::{RunningTotalsFormatter, TotalsFormatter, TotalsRecord};
use crate::lines::LineStore;
use garage_core::format::{format_hours, format_usd};
use garage_core::validation::validate_non_negative;
use tracing::{debug, info};

/// Header line of the running totals report.
pub const RUNNING_TOTALS_HEADER: &str = "REPORT: RUNNING TOTALS";

/// Lifetime totals backed by a [`LineStore`].
#[derive(Debug)]
pub struct TotalsAccumulator {
    store: Box<dyn LineStore>,
    formatter: Box<dyn TotalsFormatter>,
    totals: TotalsRecord,
}

impl TotalsAccumulator {
    /// Opens the accumulator and reads the current record.
    ///
    /// An empty store starts at zero hours and zero revenue.
    pub fn load(
        store: Box<dyn LineStore>,
        formatter: Box<dyn TotalsFormatter>,
    ) -> StoreResult<Self> {
        let mut accumulator = TotalsAccumulator {
            store,
            formatter,
            totals: TotalsRecord::default(),
        };
        accumulator.reload()?;
        Ok(accumulator)
    }

    /// Opens the accumulator with the two-line [`RunningTotalsFormatter`].
    pub fn open(store: impl LineStore + 'static) -> StoreResult<Self> {
        Self::load(Box::new(store), Box::new(RunningTotalsFormatter))
    }

    /// Re-reads the persisted record and adopts it.
    pub fn reload(&mut self) -> StoreResult<TotalsRecord> {
        let lines = self.store.read_lines()?;
        self.totals = self.formatter.decode(&lines)?.unwrap_or_default();

        debug!(
            source = %self.store.describe(),
            hours = self.totals.hours_charged,
            revenue = self.totals.revenue_collected,
            "Loaded running totals"
        );

        Ok(self.totals)
    }

    /// Adds one exit's hours and fee to the totals and persists them.
    ///
    /// Returns the refreshed running totals report. On any error the
    /// persisted record is left as it was.
    pub fn update(&mut self, add_hours: f64, add_revenue: f64) -> StoreResult<String> {
        validate_non_negative("hours parked", add_hours)?;
        validate_non_negative("fee collected", add_revenue)?;

        let current = self.reload()?;
        let updated = current.plus(add_hours, add_revenue);

        let lines = self.formatter.encode(&updated)?;
        self.store.write_lines(&lines)?;
        self.totals = updated;

        info!(
            hours = add_hours,
            revenue = add_revenue,
            total_hours = updated.hours_charged,
            total_revenue = updated.revenue_collected,
            "Running totals updated"
        );

        Ok(self.running_totals_report())
    }

    /// Current totals as last loaded or written.
    pub fn totals(&self) -> TotalsRecord {
        self.totals
    }

    pub fn hours_charged(&self) -> f64 {
        self.totals.hours_charged
    }

    pub fn revenue_collected(&self) -> f64 {
        self.totals.revenue_collected
    }

    /// Where the record lives, for log output.
    pub fn source(&self) -> String {
        self.store.describe()
    }

    /// Renders the running totals report.
    ///
    /// ```text
    /// REPORT: RUNNING TOTALS
    /// Total Time Charged: 3.50 hrs.
    /// Total Payments Collected: $2.50
    /// ```
    pub fn running_totals_report(&self) -> String {
        format!(
            "{}\nTotal Time Charged: {} hrs.\nTotal Payments Collected: {}",
            RUNNING_TOTALS_HEADER,
            format_hours(self.totals.hours_charged),
            format_usd(self.totals.revenue_collected)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{StoreError, StoreErrorKind};
    use crate::lines::{FileLineStore, MemoryLineStore};

    fn owned(lines: &[&str]) -> Vec<String> {
        lines.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_empty_source_starts_at_zero() {
        let totals = TotalsAccumulator::open(MemoryLineStore::new()).unwrap();

        assert_eq!(totals.hours_charged(), 0.0);
        assert_eq!(totals.revenue_collected(), 0.0);
    }

    #[test]
    fn test_update_from_empty_source() {
        let store = MemoryLineStore::new();
        let mut totals = TotalsAccumulator::open(store.clone()).unwrap();

        let report = totals.update(3.5, 2.5).unwrap();

        assert_eq!(store.lines(), owned(&["3.50", "2.5"]));
        assert_eq!(
            report,
            "REPORT: RUNNING TOTALS\nTotal Time Charged: 3.50 hrs.\nTotal Payments Collected: $2.50"
        );
    }

    #[test]
    fn test_update_adds_to_persisted_record() {
        let store = MemoryLineStore::with_lines(["10.00", "20.0"]);
        let mut totals = TotalsAccumulator::open(store.clone()).unwrap();

        totals.update(2.0, 2.25).unwrap();

        assert_eq!(totals.hours_charged(), 12.0);
        assert_eq!(totals.revenue_collected(), 22.25);
        assert_eq!(store.lines(), owned(&["12.00", "22.25"]));
    }

    #[test]
    fn test_update_picks_up_external_changes() {
        let store = MemoryLineStore::new();
        let mut totals = TotalsAccumulator::open(store.clone()).unwrap();
        totals.update(1.0, 2.0).unwrap();

        // Another writer bumps the record between updates.
        store.set_lines(["5.00", "7.0"]);
        totals.update(1.0, 1.0).unwrap();

        assert_eq!(store.lines(), owned(&["6.00", "8"]));
    }

    #[test]
    fn test_negative_update_leaves_record_untouched() {
        let store = MemoryLineStore::with_lines(["1.00", "2.0"]);
        let mut totals = TotalsAccumulator::open(store.clone()).unwrap();

        let err = totals.update(-1.0, 2.0).unwrap_err();
        assert_eq!(err.kind(), StoreErrorKind::InvalidArgument);

        assert!(totals.update(1.0, -0.01).is_err());
        assert!(totals.update(f64::NAN, 1.0).is_err());

        assert_eq!(store.lines(), owned(&["1.00", "2.0"]));
        assert_eq!(store.writes(), 0);
    }

    #[test]
    fn test_write_failure_keeps_previous_totals() {
        let store = MemoryLineStore::with_lines(["1.00", "2.0"]);
        let mut totals = TotalsAccumulator::open(store.clone()).unwrap();

        store.fail_writes(true);
        let err = totals.update(1.0, 1.0).unwrap_err();

        assert!(matches!(err, StoreError::Io { .. }));
        assert_eq!(totals.hours_charged(), 1.0);
        assert_eq!(store.lines(), owned(&["1.00", "2.0"]));
    }

    #[test]
    fn test_corrupt_record_fails_to_load() {
        let store = MemoryLineStore::with_lines(["lots", "2.0"]);

        let err = TotalsAccumulator::open(store).unwrap_err();
        assert!(matches!(err, StoreError::Corrupt { line: 1, .. }));
    }

    #[test]
    fn test_file_backed_totals_survive_restart() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("totals.txt");

        {
            let mut totals = TotalsAccumulator::open(FileLineStore::new(&path)).unwrap();
            totals.update(3.5, 2.5).unwrap();
            totals.update(2.5, 2.25).unwrap();
        }

        let reopened = TotalsAccumulator::open(FileLineStore::new(&path)).unwrap();
        assert_eq!(reopened.hours_charged(), 6.0);
        assert_eq!(reopened.revenue_collected(), 4.75);
        assert!(reopened
            .running_totals_report()
            .ends_with("Total Payments Collected: $4.75"));
    }
}

//! # Management Reports
//!
//! The report generator owns the running totals. Each completed exit feeds
//! its hours and fee in; once the totals are persisted, both management
//! reports are regenerated and published.
//!
//! ```text
//! ExitStation ──(hours, fee)──► ManagementReportGenerator
//!                                   │
//!                                   ├── TotalsAccumulator::update  (reload → add → persist)
//!                                   │
//!                                   └── ReportSink::publish(running totals, issued tickets)
//! ```

use garage_core::validation::validate_identifier;
use garage_core::{CoreError, TicketRegistry};
use garage_store::{StoreResult, TotalsAccumulator, TotalsRecord};
use tracing::debug;

use crate::devices::ReportSink;
use crate::error::AppResult;

/// Identifier prefix of report generators.
pub const REPORT_GENERATOR_ID_PREFIX: &str = "RPTG";

#[derive(Debug)]
pub struct ManagementReportGenerator {
    id: String,
    totals: TotalsAccumulator,
    sink: Box<dyn ReportSink>,
}

impl ManagementReportGenerator {
    pub fn new(
        id: impl Into<String>,
        totals: TotalsAccumulator,
        sink: Box<dyn ReportSink>,
    ) -> AppResult<Self> {
        let id = id.into();
        validate_identifier("report generator id", &id, REPORT_GENERATOR_ID_PREFIX)
            .map_err(CoreError::from)?;

        debug!(%id, source = %totals.source(), "Report generator ready");

        Ok(ManagementReportGenerator { id, totals, sink })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Adds one exit to the running totals and republishes the reports.
    ///
    /// Nothing is published when the update fails.
    pub fn update_totals(
        &mut self,
        hours: f64,
        revenue: f64,
        registry: &TicketRegistry,
    ) -> StoreResult<String> {
        let summary = self.totals.update(hours, revenue)?;
        self.sink.publish(&summary, &registry.issued_tickets_report());
        Ok(summary)
    }

    pub fn running_totals_report(&self) -> String {
        self.totals.running_totals_report()
    }

    pub fn issued_tickets_report(&self, registry: &TicketRegistry) -> String {
        registry.issued_tickets_report()
    }

    pub fn totals(&self) -> TotalsRecord {
        self.totals.totals()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::devices::RecordingReportSink;
    use garage_core::TicketKey;
    use garage_store::MemoryLineStore;

    fn generator(store: &MemoryLineStore, sink: &RecordingReportSink) -> ManagementReportGenerator {
        let totals = TotalsAccumulator::open(store.clone()).unwrap();
        ManagementReportGenerator::new("RPTG1", totals, Box::new(sink.clone())).unwrap()
    }

    #[test]
    fn test_rejects_bad_id() {
        let totals = TotalsAccumulator::open(MemoryLineStore::new()).unwrap();
        let sink = Box::new(RecordingReportSink::new());

        assert!(ManagementReportGenerator::new("EX1", totals, sink).is_err());
    }

    #[test]
    fn test_update_publishes_both_reports() {
        let store = MemoryLineStore::new();
        let sink = RecordingReportSink::new();
        let mut reports = generator(&store, &sink);

        let mut registry = TicketRegistry::new();
        registry
            .register(TicketKey::parse("T1").unwrap(), "ABC123")
            .unwrap();

        let summary = reports.update_totals(3.5, 2.5, &registry).unwrap();

        let published = sink.latest().unwrap();
        assert_eq!(published.running_totals, summary);
        assert!(published.issued_tickets.contains("ABC123"));
        assert_eq!(store.lines(), vec!["3.50".to_string(), "2.5".to_string()]);
        assert_eq!(reports.totals(), TotalsRecord::new(3.5, 2.5));
    }

    #[test]
    fn test_failed_update_publishes_nothing() {
        let store = MemoryLineStore::new();
        let sink = RecordingReportSink::new();
        let mut reports = generator(&store, &sink);
        let registry = TicketRegistry::new();

        assert!(reports.update_totals(-1.0, 2.0, &registry).is_err());

        store.fail_writes(true);
        assert!(reports.update_totals(1.0, 2.0, &registry).is_err());

        assert!(sink.published().is_empty());
        assert!(reports
            .running_totals_report()
            .contains("Total Payments Collected: $0.00"));
    }
}

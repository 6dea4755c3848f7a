//! # Simulation Run
//!
//! Drives a [`GarageSession`] through a list of plates: every plate is
//! admitted first, then the admitted vehicles leave in arrival order.
//! A plate that fails is recorded and the run carries on with the next.

use chrono::NaiveDateTime;
use garage_store::TotalsRecord;
use serde::Serialize;
use tracing::warn;

use crate::error::ErrorReport;
use crate::session::GarageSession;
use crate::stations::{EntryOutcome, ExitOutcome};

/// A plate whose entry or exit failed.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlateFailure {
    pub plate: String,
    pub stage: &'static str,
    pub error: ErrorReport,
}

/// Everything that happened in one run, as printed by `--json`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationSummary {
    pub garage: String,
    pub fee_policy: String,
    pub entries: Vec<EntryOutcome>,
    pub exits: Vec<ExitOutcome>,
    pub failures: Vec<PlateFailure>,
    pub totals: TotalsRecord,
    pub running_totals_report: String,
    pub issued_tickets_report: String,
}

/// Admits every plate at `now`, then releases them in order.
pub fn simulate(session: &mut GarageSession, plates: &[String], now: NaiveDateTime) -> SimulationSummary {
    let mut entries = Vec::new();
    let mut failures = Vec::new();

    for plate in plates {
        match session.admit(plate, now) {
            Ok(outcome) => entries.push(outcome),
            Err(err) => {
                warn!(%plate, error = %err, "Entry failed");
                failures.push(PlateFailure {
                    plate: plate.clone(),
                    stage: "entry",
                    error: ErrorReport::from(&err),
                });
            }
        }
    }

    let mut exits = Vec::new();
    for entry in &entries {
        match session.release(&entry.vehicle_id) {
            Ok(outcome) => exits.push(outcome),
            Err(err) => {
                warn!(vehicle = %entry.vehicle_id, error = %err, "Exit failed");
                failures.push(PlateFailure {
                    plate: entry.captured_plate.clone(),
                    stage: "exit",
                    error: ErrorReport::from(&err),
                });
            }
        }
    }

    SimulationSummary {
        garage: session.garage().to_string(),
        fee_policy: session.exit_station().fee_calculator().to_string(),
        entries,
        exits,
        failures,
        totals: session.reports().totals(),
        running_totals_report: session.running_totals_report(),
        issued_tickets_report: session.issued_tickets_report(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;
    use crate::devices::SessionDevices;
    use crate::error::ErrorCode;
    use chrono::NaiveDate;
    use garage_store::MemoryLineStore;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn session(spaces: u32) -> GarageSession {
        let mut config = SimConfig::default();
        config.garage.total_spaces = spaces;
        GarageSession::open(
            &config,
            SessionDevices::logging(),
            Box::new(MemoryLineStore::new()),
            StdRng::seed_from_u64(3),
        )
        .unwrap()
    }

    fn plates(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 19)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_simulate_all_plates() {
        let mut session = session(10);
        let summary = simulate(&mut session, &plates(&["AAA111", "BBB222", "CCC333"]), now());

        assert_eq!(summary.entries.len(), 3);
        assert_eq!(summary.exits.len(), 3);
        assert!(summary.failures.is_empty());

        let billed: f64 = summary.exits.iter().map(|e| e.fee).sum();
        assert!((summary.totals.revenue_collected - billed).abs() < 1e-9);
        assert_eq!(session.garage().full_spaces(), 0);
    }

    #[test]
    fn test_simulate_records_failures() {
        let mut session = session(1);
        let summary = simulate(&mut session, &plates(&["AAA111", "", "BBB222"]), now());

        assert_eq!(summary.entries.len(), 1);
        assert_eq!(summary.exits.len(), 1);
        assert_eq!(summary.failures.len(), 2);
        assert_eq!(summary.failures[0].error.code, ErrorCode::InvalidArgument);
        assert_eq!(summary.failures[1].plate, "BBB222");
        assert_eq!(summary.failures[1].error.code, ErrorCode::InvalidState);
    }

    #[test]
    fn test_summary_serializes() {
        let mut session = session(5);
        let summary = simulate(&mut session, &plates(&["AAA111"]), now());

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["entries"][0]["capturedPlate"], "AAA111");
        assert_eq!(json["entries"][0]["states"][0], "arrived");
        assert_eq!(json["exits"][0]["totals"]["status"], "updated");
        assert_eq!(json["exits"][0]["states"][5], "totalsUpdated");
    }
}

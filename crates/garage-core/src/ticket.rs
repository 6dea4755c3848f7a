//! # Ticket
//!
//! The slip a vehicle receives at entry.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Ticket::issue(number, vehicle_id, now, rng)                           │
//! │       │                                                                 │
//! │       ├── entry_time   = now                                           │
//! │       ├── exit_time    = now + random 1..=1438 minutes  (fixed)        │
//! │       └── hours_parked = minutes between them / 60      (frozen)       │
//! │                                                                         │
//! │  Nothing on a ticket changes after issue. The simulated departure is   │
//! │  drawn once and never regenerated.                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{Duration, NaiveDateTime};
use rand::Rng;
use serde::Serialize;

use crate::error::{CoreError, CoreResult};
use crate::format::{format_timestamp, Printable, TICKET_BORDER};
use crate::ids::{TicketKey, VehicleId};
use crate::MAX_EXIT_OFFSET_MINUTES;

/// A parking ticket for one vehicle.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    number: u64,
    vehicle_id: VehicleId,
    entry_time: NaiveDateTime,
    exit_time: NaiveDateTime,
    hours_parked: f64,
}

impl Ticket {
    /// Issues a ticket at `entry_time` with a simulated departure.
    ///
    /// The departure offset is drawn from `rng` as a single number of
    /// minutes, at least one minute and under 23 h 59 min.
    pub fn issue<R: Rng + ?Sized>(
        number: u64,
        vehicle_id: VehicleId,
        entry_time: NaiveDateTime,
        rng: &mut R,
    ) -> CoreResult<Self> {
        let offset = rng.gen_range(1..=MAX_EXIT_OFFSET_MINUTES);
        Ticket::with_times(
            number,
            vehicle_id,
            entry_time,
            entry_time + Duration::minutes(offset),
        )
    }

    /// Builds a ticket from known entry and exit times.
    ///
    /// ## Errors
    /// `InvalidArgument` unless `exit_time` is after `entry_time`.
    pub fn with_times(
        number: u64,
        vehicle_id: VehicleId,
        entry_time: NaiveDateTime,
        exit_time: NaiveDateTime,
    ) -> CoreResult<Self> {
        if exit_time <= entry_time {
            return Err(CoreError::invalid_argument(
                "exit time",
                "must be after the entry time",
            ));
        }

        Ok(Ticket {
            number,
            vehicle_id,
            entry_time,
            exit_time,
            hours_parked: hours_between(&entry_time, &exit_time),
        })
    }

    pub fn number(&self) -> u64 {
        self.number
    }

    pub fn vehicle_id(&self) -> &VehicleId {
        &self.vehicle_id
    }

    /// Registry key for this ticket (`V7` → `T7`).
    pub fn key(&self) -> TicketKey {
        self.vehicle_id.ticket_key()
    }

    pub fn entry_time(&self) -> NaiveDateTime {
        self.entry_time
    }

    pub fn exit_time(&self) -> NaiveDateTime {
        self.exit_time
    }

    /// Hours parked, computed once at issue.
    pub fn hours_parked(&self) -> f64 {
        self.hours_parked
    }
}

/// Whole hours plus leftover minutes / 60.
fn hours_between(entry: &NaiveDateTime, exit: &NaiveDateTime) -> f64 {
    let minutes = (*exit - *entry).num_minutes();
    (minutes / 60) as f64 + (minutes % 60) as f64 / 60.0
}

impl Printable for Ticket {
    fn format_for_printing(&self) -> String {
        [
            TICKET_BORDER.to_string(),
            format!("Ticket #: {}", self.number),
            format!("Vehicle ID: {}", self.vehicle_id),
            String::new(),
            format!("Entry Time: {}", format_timestamp(&self.entry_time)),
            String::new(),
            "PLACE THIS TICKET ON DASHBOARD".to_string(),
            TICKET_BORDER.to_string(),
        ]
        .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn at(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 19)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    fn vid(n: u32) -> VehicleId {
        VehicleId::parse(format!("V{}", n)).unwrap()
    }

    #[test]
    fn test_hours_parked_from_times() {
        let ticket = Ticket::with_times(1, vid(1), at(8, 0), at(11, 30)).unwrap();
        assert_eq!(ticket.hours_parked(), 3.5);

        let ticket = Ticket::with_times(2, vid(2), at(8, 0), at(8, 45)).unwrap();
        assert_eq!(ticket.hours_parked(), 0.75);
    }

    #[test]
    fn test_exit_must_follow_entry() {
        assert!(Ticket::with_times(1, vid(1), at(9, 0), at(9, 0)).is_err());
        assert!(Ticket::with_times(1, vid(1), at(9, 0), at(8, 0)).is_err());
    }

    #[test]
    fn test_issue_draws_departure_in_range() {
        let mut rng = StdRng::seed_from_u64(42);
        for n in 1..=200 {
            let ticket = Ticket::issue(n, vid(n as u32), at(7, 0), &mut rng).unwrap();
            let minutes = (ticket.exit_time() - ticket.entry_time()).num_minutes();
            assert!(minutes >= 1 && minutes <= MAX_EXIT_OFFSET_MINUTES);
            assert!(ticket.hours_parked() >= 0.0 && ticket.hours_parked() < 24.0);
        }
    }

    #[test]
    fn test_issue_is_deterministic_for_a_seed() {
        let a = Ticket::issue(1, vid(1), at(7, 0), &mut StdRng::seed_from_u64(9)).unwrap();
        let b = Ticket::issue(1, vid(1), at(7, 0), &mut StdRng::seed_from_u64(9)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_format_for_printing() {
        let ticket = Ticket::with_times(3, vid(3), at(9, 15), at(10, 0)).unwrap();
        let slip = ticket.format_for_printing();
        assert!(slip.contains("Ticket #: 3"));
        assert!(slip.contains("Vehicle ID: V3"));
        assert!(slip.contains("Entry Time: 10-19-2026 09:15"));
        assert!(slip.contains("PLACE THIS TICKET ON DASHBOARD"));
        assert_eq!(ticket.key().as_str(), "T3");
    }
}

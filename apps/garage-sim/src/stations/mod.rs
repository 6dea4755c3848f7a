//! # Entry and Exit Stations
//!
//! Each station runs one vehicle transaction to completion as a fixed
//! sequence of steps. Steps never roll back: if a later step fails, the
//! earlier ones (a filled space, an issued ticket) stay done and the error
//! goes to the caller.
//!
//! ```text
//! Entry:  Arrived ─► TicketIssued ─► SpaceFilled ─► ArmRaised ─► ArmLowered
//!
//! Exit:   Presented ─► FeeComputed ─► SpaceFreed ─► ArmRaised ─► ArmLowered ─► TotalsUpdated
//!                                                                               (best effort)
//! ```

pub mod entry;
pub mod exit;

pub use entry::{EntryOutcome, EntryState, EntryStation, ENTRY_STATION_ID_PREFIX};
pub use exit::{ExitOutcome, ExitState, ExitStation, TotalsStatus, EXIT_STATION_ID_PREFIX};

use garage_core::validation::{validate_identifier, validate_required};
use garage_core::CoreResult;

/// The barrier arm at a station lane. Starts lowered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arm {
    lowered: bool,
}

impl Arm {
    pub fn new() -> Self {
        Arm { lowered: true }
    }

    pub fn raise(&mut self) {
        self.lowered = false;
    }

    pub fn lower(&mut self) {
        self.lowered = true;
    }

    pub fn is_lowered(&self) -> bool {
        self.lowered
    }
}

impl Default for Arm {
    fn default() -> Self {
        Arm::new()
    }
}

fn validate_station(id: &str, prefix: &str, message_field: &str, message: &str) -> CoreResult<()> {
    validate_identifier("station id", id, prefix)?;
    validate_required(message_field, message)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arm_starts_lowered() {
        let mut arm = Arm::default();
        assert!(arm.is_lowered());

        arm.raise();
        assert!(!arm.is_lowered());

        arm.lower();
        assert!(arm.is_lowered());
    }

    #[test]
    fn test_validate_station() {
        assert!(validate_station("EN1", "EN", "welcome message", "Hi").is_ok());
        assert!(validate_station("EX1", "EN", "welcome message", "Hi").is_err());
        assert!(validate_station("EN1", "EN", "welcome message", "").is_err());
    }
}

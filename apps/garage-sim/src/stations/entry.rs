//! # Entry Station
//!
//! ## Transaction
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Arrived                                                                │
//! │    • screen: welcome message + "There are N spaces available."         │
//! │    • camera captures the plate                                         │
//! │  TicketIssued                                                           │
//! │    • ticket attached to the vehicle (simulated departure drawn)        │
//! │    • captured plate registered under the ticket key                    │
//! │    • ticket printed                                                    │
//! │  SpaceFilled                                                            │
//! │  ArmRaised     • screen: "Please proceed"                              │
//! │  ArmLowered                                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::NaiveDateTime;
use garage_core::{Garage, IdSequence, Ticket, TicketRegistry, Vehicle, VehicleId};
use rand::rngs::StdRng;
use serde::Serialize;
use tracing::info;

use super::{validate_station, Arm};
use crate::devices::{Camera, MessageDisplay, Printer};
use crate::error::AppResult;

/// Identifier prefix of entry stations.
pub const ENTRY_STATION_ID_PREFIX: &str = "EN";

/// Shown when the arm goes up at the entry lane.
pub const ENTRY_ARM_MESSAGE: &str = "Please proceed";

/// Steps of an entry transaction, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum EntryState {
    Arrived,
    TicketIssued,
    SpaceFilled,
    ArmRaised,
    ArmLowered,
}

/// What happened during one entry transaction.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryOutcome {
    pub station_id: String,
    pub vehicle_id: VehicleId,
    pub captured_plate: String,
    pub ticket: Ticket,
    pub states: Vec<EntryState>,
}

#[derive(Debug)]
pub struct EntryStation {
    id: String,
    welcome_message: String,
    display: Box<dyn MessageDisplay>,
    printer: Box<dyn Printer>,
    camera: Box<dyn Camera>,
    arm: Arm,
    ticket_numbers: IdSequence,
    rng: StdRng,
}

impl EntryStation {
    /// Creates a station. `rng` draws the simulated departure times.
    pub fn new(
        id: impl Into<String>,
        welcome_message: impl Into<String>,
        display: Box<dyn MessageDisplay>,
        printer: Box<dyn Printer>,
        camera: Box<dyn Camera>,
        rng: StdRng,
    ) -> AppResult<Self> {
        let id = id.into();
        let welcome_message = welcome_message.into();
        validate_station(&id, ENTRY_STATION_ID_PREFIX, "welcome message", &welcome_message)?;

        Ok(EntryStation {
            id,
            welcome_message,
            display,
            printer,
            camera,
            arm: Arm::new(),
            ticket_numbers: IdSequence::new(""),
            rng,
        })
    }

    /// Runs the entry transaction for `vehicle` at time `now`.
    ///
    /// ## Errors
    /// - `InvalidArgument` if the camera reads nothing
    /// - `InvalidState` if the vehicle already holds a ticket or the
    ///   garage is full
    /// - `DuplicateTicketKey` if the ticket key is already registered
    pub fn process(
        &mut self,
        vehicle: &mut Vehicle,
        garage: &mut Garage,
        registry: &mut TicketRegistry,
        now: NaiveDateTime,
    ) -> AppResult<EntryOutcome> {
        let mut states = vec![EntryState::Arrived];

        self.display.show(&format!(
            "{}\n\nThere are {} spaces available.",
            self.welcome_message,
            garage.empty_spaces()
        ));
        let captured_plate = self.camera.capture(vehicle.license_plate())?;

        let number = self.ticket_numbers.next_number();
        let ticket = vehicle.issue_ticket(number, now, &mut self.rng)?.clone();
        registry.register_ticket(&ticket, captured_plate.as_str())?;
        self.printer.print(&ticket);
        states.push(EntryState::TicketIssued);

        garage.fill()?;
        states.push(EntryState::SpaceFilled);

        self.raise_arm();
        states.push(EntryState::ArmRaised);

        self.arm.lower();
        states.push(EntryState::ArmLowered);

        info!(
            station = %self.id,
            vehicle = %vehicle.id(),
            ticket = ticket.number(),
            plate = %captured_plate,
            empty_spaces = garage.empty_spaces(),
            "Vehicle entered"
        );

        Ok(EntryOutcome {
            station_id: self.id.clone(),
            vehicle_id: vehicle.id().clone(),
            captured_plate,
            ticket,
            states,
        })
    }

    fn raise_arm(&mut self) {
        self.arm.raise();
        self.display.show(ENTRY_ARM_MESSAGE);
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn welcome_message(&self) -> &str {
        &self.welcome_message
    }

    pub fn camera(&self) -> &dyn Camera {
        self.camera.as_ref()
    }

    pub fn is_arm_lowered(&self) -> bool {
        self.arm.is_lowered()
    }

    /// Number of tickets this station has issued.
    pub fn tickets_issued(&self) -> u64 {
        self.ticket_numbers.issued()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::devices::{ManualEntryCamera, PlateCamera, RecordingDisplay, RecordingPrinter};
    use crate::error::AppError;
    use chrono::NaiveDate;
    use garage_core::{CoreError, TicketKey, VehicleFactory};
    use rand::SeedableRng;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 19)
            .unwrap()
            .and_hms_opt(9, 15, 0)
            .unwrap()
    }

    struct Lane {
        station: EntryStation,
        display: RecordingDisplay,
        printer: RecordingPrinter,
    }

    fn lane(camera: Box<dyn Camera>) -> Lane {
        let display = RecordingDisplay::new();
        let printer = RecordingPrinter::new();
        let station = EntryStation::new(
            "EN1",
            "Welcome to Lot A",
            Box::new(display.clone()),
            Box::new(printer.clone()),
            camera,
            StdRng::seed_from_u64(7),
        )
        .unwrap();
        Lane {
            station,
            display,
            printer,
        }
    }

    #[test]
    fn test_rejects_invalid_setup() {
        let build = |id: &str, message: &str| {
            EntryStation::new(
                id,
                message,
                Box::new(RecordingDisplay::new()),
                Box::new(RecordingPrinter::new()),
                Box::new(PlateCamera::new("CAM1")),
                StdRng::seed_from_u64(1),
            )
        };

        assert!(build("EN1", "Welcome").is_ok());
        assert!(build("EX1", "Welcome").is_err());
        assert!(build("EN1", "").is_err());
    }

    #[test]
    fn test_entry_transaction() {
        let mut lane = lane(Box::new(PlateCamera::new("CAM1")));
        let mut garage = Garage::new("Lot A", "1 Main St", 10).unwrap();
        let mut registry = TicketRegistry::new();
        let mut car = VehicleFactory::new().create_vehicle("ABC123").unwrap();

        let outcome = lane
            .station
            .process(&mut car, &mut garage, &mut registry, now())
            .unwrap();

        assert_eq!(
            outcome.states,
            vec![
                EntryState::Arrived,
                EntryState::TicketIssued,
                EntryState::SpaceFilled,
                EntryState::ArmRaised,
                EntryState::ArmLowered,
            ]
        );

        let ticket = car.ticket().unwrap();
        assert_eq!(ticket, &outcome.ticket);
        assert_eq!(ticket.number(), 1);
        assert_eq!(ticket.entry_time(), now());
        assert!(ticket.exit_time() > ticket.entry_time());
        assert!(ticket.hours_parked() < 24.0);

        assert_eq!(garage.full_spaces(), 1);
        assert_eq!(garage.empty_spaces(), 9);
        assert_eq!(
            registry.plate_for(&TicketKey::parse("T1").unwrap()),
            Some("ABC123")
        );

        assert_eq!(
            lane.display.messages(),
            vec![
                "Welcome to Lot A\n\nThere are 10 spaces available.",
                "Please proceed",
            ]
        );
        assert_eq!(lane.printer.printed().len(), 1);
        assert!(lane.printer.printed()[0].contains("Vehicle ID: V1"));
        assert!(lane.station.is_arm_lowered());
    }

    #[test]
    fn test_registers_captured_plate() {
        let mut lane = lane(Box::new(ManualEntryCamera::new("CAM1")));
        let mut garage = Garage::new("Lot A", "1 Main St", 10).unwrap();
        let mut registry = TicketRegistry::new();
        let mut car = VehicleFactory::new().create_vehicle(" xyz9").unwrap();

        let outcome = lane
            .station
            .process(&mut car, &mut garage, &mut registry, now())
            .unwrap();

        assert_eq!(outcome.captured_plate, "XYZ9");
        assert_eq!(car.license_plate(), " xyz9");
        assert_eq!(
            registry.plate_for(&TicketKey::parse("T1").unwrap()),
            Some("XYZ9")
        );
    }

    #[test]
    fn test_ticketed_vehicle_is_refused() {
        let mut lane = lane(Box::new(PlateCamera::new("CAM1")));
        let mut garage = Garage::new("Lot A", "1 Main St", 10).unwrap();
        let mut registry = TicketRegistry::new();
        let mut car = VehicleFactory::new().create_vehicle("ABC123").unwrap();

        lane.station
            .process(&mut car, &mut garage, &mut registry, now())
            .unwrap();
        let err = lane
            .station
            .process(&mut car, &mut garage, &mut registry, now())
            .unwrap_err();

        assert!(matches!(err, AppError::Core(CoreError::InvalidState { .. })));
        assert_eq!(garage.full_spaces(), 1);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_full_garage_keeps_issued_ticket() {
        let mut lane = lane(Box::new(PlateCamera::new("CAM1")));
        let mut garage = Garage::new("Lot A", "1 Main St", 1).unwrap();
        let mut registry = TicketRegistry::new();
        let mut factory = VehicleFactory::new();

        let mut first = factory.create_vehicle("AAA111").unwrap();
        lane.station
            .process(&mut first, &mut garage, &mut registry, now())
            .unwrap();

        let mut second = factory.create_vehicle("BBB222").unwrap();
        let err = lane
            .station
            .process(&mut second, &mut garage, &mut registry, now())
            .unwrap_err();

        assert!(matches!(err, AppError::Core(CoreError::InvalidState { .. })));
        // Nothing is rolled back: the ticket stays issued and registered.
        assert!(second.is_ticketed());
        assert_eq!(registry.len(), 2);
        assert_eq!(garage.full_spaces(), 1);
        assert_eq!(lane.station.tickets_issued(), 2);
    }
}

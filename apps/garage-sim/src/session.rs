//! # Garage Session
//!
//! One running garage: the lot itself, its stations, the ticket registry,
//! the report generator and the vehicles currently parked.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                           GarageSession                                 │
//! │                                                                         │
//! │  admit(plate, now)                     release(vehicle_id)              │
//! │     │                                      │                            │
//! │     ▼                                      ▼                            │
//! │  VehicleFactory ─► EntryStation        parked ─► ExitStation            │
//! │                       │                              │                  │
//! │                       ├── Garage::fill               ├── Garage::leave  │
//! │                       └── TicketRegistry             └── ManagementReportGenerator
//! │                                                                         │
//! │  Identifier sequences (EN, EX, CAM, RPTG) belong to the session.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::NaiveDateTime;
use garage_core::{Garage, IdSequence, TicketRegistry, Vehicle, VehicleFactory, VehicleId};
use garage_store::{LineStore, RunningTotalsFormatter, TotalsAccumulator};
use rand::rngs::StdRng;
use std::collections::BTreeMap;
use tracing::info;

use crate::config::SimConfig;
use crate::devices::{camera_for, SessionDevices, CAMERA_ID_PREFIX};
use crate::error::{AppError, AppResult};
use crate::report::{ManagementReportGenerator, REPORT_GENERATOR_ID_PREFIX};
use crate::stations::{
    EntryOutcome, EntryStation, ExitOutcome, ExitStation, ENTRY_STATION_ID_PREFIX,
    EXIT_STATION_ID_PREFIX,
};

#[derive(Debug)]
pub struct GarageSession {
    garage: Garage,
    registry: TicketRegistry,
    vehicles: VehicleFactory,
    entry: EntryStation,
    exit: ExitStation,
    reports: ManagementReportGenerator,
    parked: BTreeMap<VehicleId, Vehicle>,
}

impl GarageSession {
    /// Builds a session from validated configuration.
    ///
    /// `store` holds the running totals; `rng` draws simulated departures.
    pub fn open(
        config: &SimConfig,
        devices: SessionDevices,
        store: Box<dyn LineStore>,
        rng: StdRng,
    ) -> AppResult<Self> {
        let garage = Garage::new(
            config.garage.name.as_str(),
            config.garage.address.as_str(),
            config.garage.total_spaces,
        )?;

        let mut entry_ids = IdSequence::new(ENTRY_STATION_ID_PREFIX);
        let mut exit_ids = IdSequence::new(EXIT_STATION_ID_PREFIX);
        let mut camera_ids = IdSequence::new(CAMERA_ID_PREFIX);
        let mut report_ids = IdSequence::new(REPORT_GENERATOR_ID_PREFIX);

        let totals = TotalsAccumulator::load(store, Box::new(RunningTotalsFormatter))?;
        let reports =
            ManagementReportGenerator::new(report_ids.next_id(), totals, devices.report_sink)?;

        let entry = EntryStation::new(
            entry_ids.next_id(),
            config.stations.welcome_message.as_str(),
            devices.entry_display,
            devices.entry_printer,
            camera_for(config.stations.camera, &mut camera_ids),
            rng,
        )?;

        let exit = ExitStation::new(
            exit_ids.next_id(),
            config.stations.exit_message.as_str(),
            devices.exit_display,
            devices.exit_printer,
            config.fee.build()?,
        )?;

        info!(
            garage = %garage,
            fee = %exit.fee_calculator(),
            camera = %config.stations.camera,
            "Garage session opened"
        );

        Ok(GarageSession {
            garage,
            registry: TicketRegistry::new(),
            vehicles: VehicleFactory::new(),
            entry,
            exit,
            reports,
            parked: BTreeMap::new(),
        })
    }

    /// Creates a vehicle for `plate` and runs it through the entry station.
    ///
    /// The vehicle is tracked as parked only when the whole entry
    /// transaction succeeds.
    pub fn admit(&mut self, plate: &str, now: NaiveDateTime) -> AppResult<EntryOutcome> {
        let mut vehicle = self.vehicles.create_vehicle(plate)?;
        let outcome = self
            .entry
            .process(&mut vehicle, &mut self.garage, &mut self.registry, now)?;

        self.parked.insert(vehicle.id().clone(), vehicle);
        Ok(outcome)
    }

    /// Runs a parked vehicle through the exit station.
    ///
    /// The vehicle stays parked if the exit transaction fails.
    pub fn release(&mut self, vehicle_id: &VehicleId) -> AppResult<ExitOutcome> {
        let vehicle = self
            .parked
            .get(vehicle_id)
            .ok_or_else(|| AppError::UnknownVehicle(vehicle_id.to_string()))?;

        let outcome = self.exit.process(
            vehicle,
            &mut self.garage,
            &mut self.reports,
            &self.registry,
        )?;

        self.parked.remove(vehicle_id);
        Ok(outcome)
    }

    pub fn garage(&self) -> &Garage {
        &self.garage
    }

    pub fn registry(&self) -> &TicketRegistry {
        &self.registry
    }

    pub fn entry_station(&self) -> &EntryStation {
        &self.entry
    }

    pub fn exit_station(&self) -> &ExitStation {
        &self.exit
    }

    pub fn reports(&self) -> &ManagementReportGenerator {
        &self.reports
    }

    /// Vehicles currently in the garage, by id.
    pub fn parked(&self) -> impl Iterator<Item = &Vehicle> + '_ {
        self.parked.values()
    }

    pub fn running_totals_report(&self) -> String {
        self.reports.running_totals_report()
    }

    pub fn issued_tickets_report(&self) -> String {
        self.reports.issued_tickets_report(&self.registry)
    }
}

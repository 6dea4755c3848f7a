//! # Vehicle
//!
//! A vehicle passing through the garage, and the factory that numbers them.
//!
//! ## Ticket Ownership
//! ```text
//! Vehicle::new ──► ticket: None
//!       │
//!       ▼
//! issue_ticket / attach_ticket ──► ticket: Some(T)     (exactly once)
//!       │
//!       ▼
//! attach again ──► InvalidState
//! ```

use chrono::NaiveDateTime;
use rand::Rng;
use serde::Serialize;
use std::fmt;

use crate::error::{CoreError, CoreResult};
use crate::ids::{IdSequence, VehicleId};
use crate::ticket::Ticket;
use crate::validation::validate_license_plate;
use crate::VEHICLE_ID_PREFIX;

// =============================================================================
// Vehicle
// =============================================================================

/// A vehicle and, once it has entered, its ticket.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    id: VehicleId,
    license_plate: String,
    ticket: Option<Ticket>,
}

impl Vehicle {
    /// Creates an unticketed vehicle with a validated plate.
    pub fn new(id: VehicleId, license_plate: impl Into<String>) -> CoreResult<Self> {
        let license_plate = license_plate.into();
        validate_license_plate(&license_plate)?;

        Ok(Vehicle {
            id,
            license_plate,
            ticket: None,
        })
    }

    pub fn id(&self) -> &VehicleId {
        &self.id
    }

    pub fn license_plate(&self) -> &str {
        &self.license_plate
    }

    pub fn ticket(&self) -> Option<&Ticket> {
        self.ticket.as_ref()
    }

    pub fn is_ticketed(&self) -> bool {
        self.ticket.is_some()
    }

    /// Issues a ticket for this vehicle at `entry_time` and attaches it.
    ///
    /// ## Errors
    /// `InvalidState` if the vehicle already holds a ticket. The check
    /// happens before anything is drawn from `rng`.
    pub fn issue_ticket<R: Rng + ?Sized>(
        &mut self,
        number: u64,
        entry_time: NaiveDateTime,
        rng: &mut R,
    ) -> CoreResult<&Ticket> {
        self.ensure_unticketed()?;
        let ticket = Ticket::issue(number, self.id.clone(), entry_time, rng)?;
        self.attach_ticket(ticket)
    }

    /// Attaches an already issued ticket.
    ///
    /// ## Errors
    /// - `InvalidState` if a ticket is already attached
    /// - `InvalidArgument` if the ticket was issued for another vehicle
    pub fn attach_ticket(&mut self, ticket: Ticket) -> CoreResult<&Ticket> {
        self.ensure_unticketed()?;

        if ticket.vehicle_id() != &self.id {
            return Err(CoreError::invalid_argument(
                "ticket",
                format!(
                    "issued for {} but presented by {}",
                    ticket.vehicle_id(),
                    self.id
                ),
            ));
        }

        Ok(&*self.ticket.insert(ticket))
    }

    fn ensure_unticketed(&self) -> CoreResult<()> {
        match &self.ticket {
            Some(existing) => Err(CoreError::invalid_state(
                format!("Vehicle {}", self.id),
                "accept a ticket",
                format!("ticket #{} is already attached", existing.number()),
            )),
            None => Ok(()),
        }
    }
}

impl fmt::Display for Vehicle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Vehicle ID: {} | License Plate: {}",
            self.id, self.license_plate
        )
    }
}

// =============================================================================
// Vehicle Factory
// =============================================================================

/// Creates vehicles with sequential `V` identifiers.
///
/// ## Example
/// ```rust
/// use garage_core::VehicleFactory;
///
/// let mut factory = VehicleFactory::new();
/// let car = factory.create_vehicle("ABC123").unwrap();
/// assert_eq!(car.id().as_str(), "V1");
/// ```
#[derive(Debug, Clone)]
pub struct VehicleFactory {
    ids: IdSequence,
}

impl VehicleFactory {
    pub fn new() -> Self {
        VehicleFactory {
            ids: IdSequence::new(VEHICLE_ID_PREFIX),
        }
    }

    /// Validates the plate, then assigns the next identifier.
    ///
    /// An invalid plate does not consume an identifier.
    pub fn create_vehicle(&mut self, license_plate: &str) -> CoreResult<Vehicle> {
        validate_license_plate(license_plate)?;
        let id = VehicleId::parse(self.ids.next_id())?;
        Vehicle::new(id, license_plate)
    }

    /// Number of vehicles created so far.
    pub fn created(&self) -> u64 {
        self.ids.issued()
    }
}

impl Default for VehicleFactory {
    fn default() -> Self {
        VehicleFactory::new()
    }
}

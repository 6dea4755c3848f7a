//! # garage-core: Pure Business Logic for the Parking Garage
//!
//! This crate is the **heart** of the garage simulator. It contains the fee
//! policies and the vehicle/ticket/receipt lifecycle as pure code with zero
//! I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Garage Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 garage-sim (stations, session)                  │   │
//! │  │    EntryStation ──► GarageSession ◄── ExitStation               │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ garage-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │    fee    │  │  vehicle  │  │  receipt  │  │ registry  │  │   │
//! │  │   │  MinMax   │  │  Vehicle  │  │  Receipt  │  │  Ticket   │  │   │
//! │  │   │ MinNoMax  │  │  Ticket   │  │           │  │ Registry  │  │   │
//! │  │   │  Event    │  │  Garage   │  │           │  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO CLOCK • NO LOGGING • PURE FUNCTIONS              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                garage-store (Running Totals)                    │   │
//! │  │              two-line text record, reload-add-persist           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`fee`] - Fee policies and the config-facing [`FeeSchedule`]
//! - [`garage`] - Space counters
//! - [`vehicle`] / [`ticket`] / [`receipt`] - Transaction lifecycle
//! - [`registry`] - Ticket key → license plate audit map
//! - [`ids`] - Sequential identifiers
//! - [`format`] - Printable slips and currency formatting
//! - [`error`] / [`validation`] - Domain errors and input checks
//!
//! ## Example Usage
//!
//! ```rust
//! use garage_core::fee::{FeeCalculator, MinMaxFee};
//! use garage_core::{Garage, Receipt, VehicleFactory};
//! use chrono::NaiveDate;
//! use rand::SeedableRng;
//!
//! let mut garage = Garage::new("Garage", "123 Main Street", 10).unwrap();
//! let mut vehicles = VehicleFactory::new();
//! let mut rng = rand::rngs::StdRng::seed_from_u64(7);
//! let now = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap().and_hms_opt(9, 0, 0).unwrap();
//!
//! let mut car = vehicles.create_vehicle("ABC123").unwrap();
//! car.issue_ticket(1, now, &mut rng).unwrap();
//! garage.fill().unwrap();
//!
//! let calc = MinMaxFee::new(2.0, 0.5, 10.0).unwrap();
//! let ticket = car.ticket().unwrap();
//! let receipt = Receipt::new(1, &garage, ticket, &calc);
//! assert!(receipt.calc_total_due() >= 2.0);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod fee;
pub mod format;
pub mod garage;
pub mod ids;
pub mod receipt;
pub mod registry;
pub mod ticket;
pub mod validation;
pub mod vehicle;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ErrorKind, ValidationError};
pub use fee::{FeeCalculator, FeeSchedule, MinMaxFee, MinNoMaxFee, SpecialEventFee};
pub use format::Printable;
pub use garage::Garage;
pub use ids::{IdSequence, TicketKey, VehicleId};
pub use receipt::{Receipt, ReceiptSnapshot};
pub use registry::TicketRegistry;
pub use ticket::Ticket;
pub use vehicle::{Vehicle, VehicleFactory};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Longest license plate accepted, in characters.
pub const MAX_PLATE_LENGTH: usize = 7;

/// Prefix of every vehicle identifier.
pub const VEHICLE_ID_PREFIX: &str = "V";

/// Prefix of every ticket key; the number is shared with the vehicle id.
pub const TICKET_KEY_PREFIX: &str = "T";

/// Upper bound of the simulated stay, in minutes (23 h 58 min).
///
/// A departure is drawn from `1..=MAX_EXIT_OFFSET_MINUTES`, so a ticket's
/// exit time is always strictly after its entry time.
pub const MAX_EXIT_OFFSET_MINUTES: i64 = 23 * 60 + 58;

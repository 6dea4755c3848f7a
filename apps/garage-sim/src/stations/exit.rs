//! # Exit Station
//!
//! ## Transaction
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Presented      • screen: exit message                                 │
//! │  FeeComputed    • receipt built from the ticket and the fee policy     │
//! │                 • receipt printed                                      │
//! │  SpaceFreed                                                             │
//! │  ArmRaised      • screen: "See you next time!"                         │
//! │  ArmLowered                                                             │
//! │  TotalsUpdated  • hours and fee added to the running totals            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The totals update is the only step whose failure is tolerated. By then
//! the customer has the receipt and the space is free, so the failure is
//! logged and reported in the outcome as [`TotalsStatus::Failed`].

use garage_core::{
    CoreError, FeeCalculator, Garage, IdSequence, Receipt, ReceiptSnapshot, TicketRegistry,
    Vehicle, VehicleId,
};
use serde::Serialize;
use tracing::{info, warn};

use super::{validate_station, Arm};
use crate::devices::{MessageDisplay, Printer};
use crate::error::AppResult;
use crate::report::ManagementReportGenerator;

/// Identifier prefix of exit stations.
pub const EXIT_STATION_ID_PREFIX: &str = "EX";

/// Shown when the arm goes up at the exit lane.
pub const EXIT_ARM_MESSAGE: &str = "See you next time!";

/// Steps of an exit transaction, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ExitState {
    Presented,
    FeeComputed,
    SpaceFreed,
    ArmRaised,
    ArmLowered,
    TotalsUpdated,
}

/// Result of the running totals update at the end of an exit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "camelCase")]
pub enum TotalsStatus {
    /// Totals persisted; carries the running totals report.
    Updated(String),
    /// Totals left as they were; carries the error message.
    Failed(String),
}

impl TotalsStatus {
    pub fn is_updated(&self) -> bool {
        matches!(self, TotalsStatus::Updated(_))
    }
}

/// What happened during one exit transaction.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExitOutcome {
    pub station_id: String,
    pub vehicle_id: VehicleId,
    pub receipt: ReceiptSnapshot,
    pub fee: f64,
    pub states: Vec<ExitState>,
    pub totals: TotalsStatus,
}

#[derive(Debug)]
pub struct ExitStation {
    id: String,
    exit_message: String,
    display: Box<dyn MessageDisplay>,
    printer: Box<dyn Printer>,
    fee_calc: Box<dyn FeeCalculator>,
    arm: Arm,
    receipt_numbers: IdSequence,
}

impl ExitStation {
    pub fn new(
        id: impl Into<String>,
        exit_message: impl Into<String>,
        display: Box<dyn MessageDisplay>,
        printer: Box<dyn Printer>,
        fee_calc: Box<dyn FeeCalculator>,
    ) -> AppResult<Self> {
        let id = id.into();
        let exit_message = exit_message.into();
        validate_station(&id, EXIT_STATION_ID_PREFIX, "exit message", &exit_message)?;

        Ok(ExitStation {
            id,
            exit_message,
            display,
            printer,
            fee_calc,
            arm: Arm::new(),
            receipt_numbers: IdSequence::new(""),
        })
    }

    /// Runs the exit transaction for a ticketed `vehicle`.
    ///
    /// ## Errors
    /// `InvalidState` if the vehicle has no ticket or the garage has no
    /// occupied space. Totals failures are not errors; see
    /// [`ExitOutcome::totals`].
    pub fn process(
        &mut self,
        vehicle: &Vehicle,
        garage: &mut Garage,
        reports: &mut ManagementReportGenerator,
        registry: &TicketRegistry,
    ) -> AppResult<ExitOutcome> {
        let ticket = vehicle.ticket().ok_or_else(|| {
            CoreError::invalid_state(
                format!("Vehicle {}", vehicle.id()),
                "exit",
                "no ticket was issued",
            )
        })?;
        let mut states = vec![ExitState::Presented];
        self.display.show(&self.exit_message);

        let receipt = {
            let receipt = Receipt::new(
                self.receipt_numbers.next_number(),
                garage,
                ticket,
                self.fee_calc.as_ref(),
            );
            self.printer.print(&receipt);
            receipt.snapshot()
        };
        let fee = receipt.total_due;
        states.push(ExitState::FeeComputed);

        garage.leave()?;
        states.push(ExitState::SpaceFreed);

        self.raise_arm();
        states.push(ExitState::ArmRaised);

        self.arm.lower();
        states.push(ExitState::ArmLowered);

        info!(
            station = %self.id,
            vehicle = %vehicle.id(),
            receipt = receipt.number,
            hours = ticket.hours_parked(),
            fee,
            "Vehicle exited"
        );

        let totals = match reports.update_totals(ticket.hours_parked(), fee, registry) {
            Ok(summary) => {
                states.push(ExitState::TotalsUpdated);
                TotalsStatus::Updated(summary)
            }
            Err(err) => {
                warn!(
                    station = %self.id,
                    vehicle = %vehicle.id(),
                    error = %err,
                    "Running totals not updated"
                );
                TotalsStatus::Failed(err.to_string())
            }
        };

        Ok(ExitOutcome {
            station_id: self.id.clone(),
            vehicle_id: vehicle.id().clone(),
            receipt,
            fee,
            states,
            totals,
        })
    }

    fn raise_arm(&mut self) {
        self.arm.raise();
        self.display.show(EXIT_ARM_MESSAGE);
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn exit_message(&self) -> &str {
        &self.exit_message
    }

    pub fn fee_calculator(&self) -> &dyn FeeCalculator {
        self.fee_calc.as_ref()
    }

    pub fn is_arm_lowered(&self) -> bool {
        self.arm.is_lowered()
    }
}

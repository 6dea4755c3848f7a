//! # Receipt
//!
//! The bill handed over at exit, derived from a ticket and a fee policy.
//!
//! A receipt stores nothing it can derive: [`Receipt::calc_total_due`]
//! asks the fee policy every time it is called.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::fee::FeeCalculator;
use crate::format::{format_hours, format_timestamp, format_usd, Printable, RECEIPT_BORDER};
use crate::garage::Garage;
use crate::ids::VehicleId;
use crate::ticket::Ticket;

/// A receipt borrowing the garage, the ticket and the fee policy.
#[derive(Debug, Clone, Copy)]
pub struct Receipt<'a> {
    number: u64,
    garage: &'a Garage,
    ticket: &'a Ticket,
    fee_calc: &'a dyn FeeCalculator,
}

impl<'a> Receipt<'a> {
    pub fn new(
        number: u64,
        garage: &'a Garage,
        ticket: &'a Ticket,
        fee_calc: &'a dyn FeeCalculator,
    ) -> Self {
        Receipt {
            number,
            garage,
            ticket,
            fee_calc,
        }
    }

    pub fn number(&self) -> u64 {
        self.number
    }

    pub fn ticket(&self) -> &'a Ticket {
        self.ticket
    }

    pub fn garage(&self) -> &'a Garage {
        self.garage
    }

    /// The receipt is dated at the ticket's departure time.
    pub fn exit_time(&self) -> NaiveDateTime {
        self.ticket.exit_time()
    }

    /// Amount owed for the ticket's hours under the fee policy.
    pub fn calc_total_due(&self) -> f64 {
        self.fee_calc.calc_fee(self.ticket.hours_parked())
    }

    /// Owned copy of what was printed, for logs and session summaries.
    pub fn snapshot(&self) -> ReceiptSnapshot {
        ReceiptSnapshot {
            number: self.number,
            vehicle_id: self.ticket.vehicle_id().clone(),
            exit_time: self.exit_time(),
            hours_parked: self.ticket.hours_parked(),
            total_due: self.calc_total_due(),
        }
    }
}

impl Printable for Receipt<'_> {
    fn format_for_printing(&self) -> String {
        [
            RECEIPT_BORDER.to_string(),
            format!(
                "Receipt #: {}    {}",
                self.number,
                format_timestamp(&self.exit_time())
            ),
            String::new(),
            self.garage.name().to_string(),
            self.garage.address().to_string(),
            String::new(),
            format!("Vehicle ID: {}", self.ticket.vehicle_id()),
            format!("Hours Parked: {}", format_hours(self.ticket.hours_parked())),
            String::new(),
            format!("TOTAL DUE: {}", format_usd(self.calc_total_due())),
            RECEIPT_BORDER.to_string(),
        ]
        .join("\n")
    }
}

/// Plain-data view of a printed receipt.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptSnapshot {
    pub number: u64,
    pub vehicle_id: VehicleId,
    pub exit_time: NaiveDateTime,
    pub hours_parked: f64,
    pub total_due: f64,
}

//! # Ticket Registry
//!
//! Maps each issued ticket to the license plate captured at entry.
//! Management uses it to audit which plates received which tickets.
//!
//! ## Report Order
//! ```text
//! register(T2, "BBB222")          report():
//! register(T10, "KKK000")   ──►     T1   AAA111
//! register(T1, "AAA111")            T10  KKK000
//!                                   T2   BBB222
//!
//! Keys sort by their string form. Each call to report() starts over.
//! ```

use serde::Serialize;
use std::collections::BTreeMap;

use crate::error::{CoreError, CoreResult};
use crate::ids::TicketKey;
use crate::ticket::Ticket;
use crate::validation::validate_required;

/// Registry of issued tickets, keyed by ticket key.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TicketRegistry {
    tickets: BTreeMap<TicketKey, String>,
}

impl TicketRegistry {
    pub fn new() -> Self {
        TicketRegistry::default()
    }

    /// Records that `key` was issued to `plate`.
    ///
    /// ## Errors
    /// - Validation error for a blank plate
    /// - `DuplicateTicketKey` if the key is already present (keys are
    ///   unique per run, so a repeat is a caller bug)
    pub fn register(&mut self, key: TicketKey, plate: impl Into<String>) -> CoreResult<()> {
        let plate = plate.into();
        validate_required("license plate", &plate)?;

        if self.tickets.contains_key(&key) {
            return Err(CoreError::DuplicateTicketKey(key.to_string()));
        }

        self.tickets.insert(key, plate);
        Ok(())
    }

    /// Registers a ticket under its derived key.
    pub fn register_ticket(&mut self, ticket: &Ticket, plate: impl Into<String>) -> CoreResult<()> {
        self.register(ticket.key(), plate)
    }

    /// The plate recorded for `key`, if any.
    pub fn plate_for(&self, key: &TicketKey) -> Option<&str> {
        self.tickets.get(key).map(String::as_str)
    }

    /// All (key, plate) pairs in ascending key order.
    ///
    /// The iterator is lazy and finite; call again to start over.
    pub fn report(&self) -> impl ExactSizeIterator<Item = (&TicketKey, &str)> + '_ {
        self.tickets.iter().map(|(key, plate)| (key, plate.as_str()))
    }

    pub fn len(&self) -> usize {
        self.tickets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tickets.is_empty()
    }

    /// Renders the issued-tickets table shown to management.
    pub fn issued_tickets_report(&self) -> String {
        let mut lines = vec![
            "REPORT: ISSUED TICKETS".to_string(),
            String::new(),
            "Ticket #  |  License Plate".to_string(),
            "--------------------------".to_string(),
        ];
        lines.extend(
            self.report()
                .map(|(key, plate)| format!("{:<10}   {}", key.as_str(), plate)),
        );
        lines.join("\n")
    }
}

//! # Identifiers
//!
//! Sequential, prefixed identifiers (`V1`, `T1`, `EN1`, ...).
//!
//! ## Ownership
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Every counter is owned by the object that mints the identifiers:      │
//! │                                                                         │
//! │  VehicleFactory  ──► IdSequence("V")    ──► V1, V2, V3 ...              │
//! │  EntryStation    ──► ticket numbers      ──► 1, 2, 3 ...                │
//! │  ExitStation     ──► receipt numbers     ──► 1, 2, 3 ...                │
//! │                                                                         │
//! │  Two factories never share a counter, so tests never see each other's │
//! │  identifiers.                                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::CoreResult;
use crate::validation::validate_identifier;
use crate::{TICKET_KEY_PREFIX, VEHICLE_ID_PREFIX};

// =============================================================================
// Id Sequence
// =============================================================================

/// A counter that hands out `prefix + n` identifiers, starting at 1.
#[derive(Debug, Clone)]
pub struct IdSequence {
    prefix: String,
    issued: u64,
}

impl IdSequence {
    /// Creates a sequence that has issued nothing yet.
    pub fn new(prefix: impl Into<String>) -> Self {
        IdSequence {
            prefix: prefix.into(),
            issued: 0,
        }
    }

    /// Advances the counter and returns the next number.
    pub fn next_number(&mut self) -> u64 {
        self.issued += 1;
        self.issued
    }

    /// Advances the counter and returns the next prefixed identifier.
    pub fn next_id(&mut self) -> String {
        let n = self.next_number();
        format!("{}{}", self.prefix, n)
    }

    /// How many identifiers this sequence has handed out.
    pub fn issued(&self) -> u64 {
        self.issued
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

// =============================================================================
// Vehicle Id
// =============================================================================

/// Vehicle identifier, always `V` followed by a number.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VehicleId(String);

impl VehicleId {
    /// Parses and validates a vehicle identifier.
    pub fn parse(value: impl Into<String>) -> CoreResult<Self> {
        let value = value.into();
        validate_identifier("vehicle id", &value, VEHICLE_ID_PREFIX)?;
        Ok(VehicleId(value))
    }

    /// Derives the registry key: the same number with a `T` prefix.
    ///
    /// ## Example
    /// ```rust
    /// use garage_core::ids::VehicleId;
    ///
    /// let id = VehicleId::parse("V12").unwrap();
    /// assert_eq!(id.ticket_key().as_str(), "T12");
    /// ```
    pub fn ticket_key(&self) -> TicketKey {
        TicketKey(format!(
            "{}{}",
            TICKET_KEY_PREFIX,
            &self.0[VEHICLE_ID_PREFIX.len()..]
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VehicleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for VehicleId {
    type Error = crate::error::CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        VehicleId::parse(value)
    }
}

impl From<VehicleId> for String {
    fn from(id: VehicleId) -> Self {
        id.0
    }
}

// =============================================================================
// Ticket Key
// =============================================================================

/// Registry key for an issued ticket, always `T` followed by a number.
///
/// Keys order by their string form, so `T10` sorts before `T2`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TicketKey(String);

impl TicketKey {
    /// Parses and validates a ticket key.
    pub fn parse(value: impl Into<String>) -> CoreResult<Self> {
        let value = value.into();
        validate_identifier("ticket key", &value, TICKET_KEY_PREFIX)?;
        Ok(TicketKey(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TicketKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for TicketKey {
    type Error = crate::error::CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        TicketKey::parse(value)
    }
}

impl From<TicketKey> for String {
    fn from(key: TicketKey) -> Self {
        key.0
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

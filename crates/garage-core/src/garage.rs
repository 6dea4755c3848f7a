//! # Garage
//!
//! The parking structure and its space counters.
//!
//! ## Invariant
//! ```text
//! full_spaces + empty_spaces == total_spaces      (both ≥ 0)
//!
//!   fill()  : full += 1, empty -= 1   (InvalidState when empty == 0)
//!   leave() : full -= 1, empty += 1   (InvalidState when full == 0)
//! ```

use serde::Serialize;
use std::fmt;

use crate::error::{CoreError, CoreResult};
use crate::validation::{validate_required, validate_total_spaces};

/// A parking garage. Created once from configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Garage {
    name: String,
    address: String,
    total_spaces: u32,
    full_spaces: u32,
    empty_spaces: u32,
}

impl Garage {
    /// Creates an empty garage.
    ///
    /// ## Errors
    /// Validation errors for a blank name or address, or zero spaces.
    ///
    /// ## Example
    /// ```rust
    /// use garage_core::Garage;
    ///
    /// let garage = Garage::new("Garage", "123 Main Street", 10).unwrap();
    /// assert_eq!(garage.empty_spaces(), 10);
    /// ```
    pub fn new(
        name: impl Into<String>,
        address: impl Into<String>,
        total_spaces: u32,
    ) -> CoreResult<Self> {
        let name = name.into();
        let address = address.into();
        validate_required("garage name", &name)?;
        validate_required("garage address", &address)?;
        validate_total_spaces(total_spaces)?;

        Ok(Garage {
            name,
            address,
            total_spaces,
            full_spaces: 0,
            empty_spaces: total_spaces,
        })
    }

    /// Marks one space as occupied.
    pub fn fill(&mut self) -> CoreResult<()> {
        if self.empty_spaces == 0 {
            return Err(CoreError::invalid_state(
                format!("Garage '{}'", self.name),
                "fill a space",
                "no empty spaces remain",
            ));
        }
        self.full_spaces += 1;
        self.empty_spaces -= 1;
        Ok(())
    }

    /// Marks one occupied space as free again.
    pub fn leave(&mut self) -> CoreResult<()> {
        if self.full_spaces == 0 {
            return Err(CoreError::invalid_state(
                format!("Garage '{}'", self.name),
                "free a space",
                "no spaces are occupied",
            ));
        }
        self.full_spaces -= 1;
        self.empty_spaces += 1;
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn total_spaces(&self) -> u32 {
        self.total_spaces
    }

    pub fn full_spaces(&self) -> u32 {
        self.full_spaces
    }

    pub fn empty_spaces(&self) -> u32 {
        self.empty_spaces
    }

    /// True when no space is left to fill.
    pub fn is_full(&self) -> bool {
        self.empty_spaces == 0
    }
}

impl fmt::Display for Garage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}\nTotal Parking Spaces: {}\nFull Parking Spaces: {}\nEmpty Parking Spaces: {}",
            self.name, self.address, self.total_spaces, self.full_spaces, self.empty_spaces
        )
    }
}

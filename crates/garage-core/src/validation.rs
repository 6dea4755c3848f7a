//! # Validation Module
//!
//! Input validation utilities for the garage domain.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Config loading (garage-sim)                                  │
//! │  ├── TOML shape and numeric parsing                                    │
//! │  └── Startup fails fast on malformed keys                              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Constructors (THIS MODULE)                                   │
//! │  ├── License plates, garage details, fee parameters                    │
//! │  └── Objects are never built in an invalid state                       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Lifecycle methods                                            │
//! │  └── InvalidState for illegal transitions                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use garage_core::validation::{validate_license_plate, validate_fee_parameter};
//!
//! assert!(validate_license_plate("ABC1234").is_ok());
//! assert!(validate_fee_parameter("min_fee", 2.0).is_ok());
//! ```

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::MAX_PLATE_LENGTH;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a license plate.
///
/// ## Rules
/// - Must not be empty or blank
/// - Must be at most 7 characters
///
/// ## Example
/// ```rust
/// use garage_core::validation::validate_license_plate;
///
/// assert!(validate_license_plate("XYZ 123").is_ok());
/// assert!(validate_license_plate("").is_err());
/// assert!(validate_license_plate("TOO-LONG1").is_err());
/// ```
pub fn validate_license_plate(plate: &str) -> ValidationResult<()> {
    if plate.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "license plate".to_string(),
        });
    }

    if plate.chars().count() > MAX_PLATE_LENGTH {
        return Err(ValidationError::TooLong {
            field: "license plate".to_string(),
            max: MAX_PLATE_LENGTH,
        });
    }

    Ok(())
}

/// Validates that a free-text field (garage name, message, ...) is present.
pub fn validate_required(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates that an identifier carries the expected prefix and a number.
///
/// ## Example
/// ```rust
/// use garage_core::validation::validate_identifier;
///
/// assert!(validate_identifier("vehicle id", "V12", "V").is_ok());
/// assert!(validate_identifier("vehicle id", "T12", "V").is_err());
/// ```
pub fn validate_identifier(field: &str, value: &str, prefix: &str) -> ValidationResult<()> {
    let digits = value
        .strip_prefix(prefix)
        .ok_or_else(|| ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: format!("must start with '{}'", prefix),
        })?;

    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: format!("must be '{}' followed by a number", prefix),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a fee policy parameter.
///
/// ## Rules
/// - Must be strictly greater than zero (NaN is rejected too)
///
/// Failure is reported as `InvalidConfiguration`, because fee parameters
/// only ever come from configuration.
pub fn validate_fee_parameter(parameter: &str, value: f64) -> CoreResult<()> {
    if !(value > 0.0) || !value.is_finite() {
        return Err(CoreError::InvalidConfiguration {
            parameter: parameter.to_string(),
            value,
        });
    }

    Ok(())
}

/// Validates the total number of spaces in a garage.
pub fn validate_total_spaces(total: u32) -> ValidationResult<()> {
    if total == 0 {
        return Err(ValidationError::MustBePositive {
            field: "total spaces".to_string(),
        });
    }

    Ok(())
}

/// Validates an amount that must be zero or more (hours, revenue).
pub fn validate_non_negative(field: &str, value: f64) -> ValidationResult<()> {
    if !(value >= 0.0) {
        return Err(ValidationError::MustBeNonNegative {
            field: field.to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

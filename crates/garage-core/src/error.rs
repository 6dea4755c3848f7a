//! # Error Types
//!
//! Domain-specific error types for garage-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  garage-core errors (this file)                                        │
//! │  ├── CoreError        - Lifecycle and configuration failures           │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  garage-store errors (separate crate)                                  │
//! │  └── StoreError       - Encoding and file failures                     │
//! │                                                                         │
//! │  garage-sim errors (in app)                                            │
//! │  └── AppError         - Everything a station transaction can hit       │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → AppError → display message        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every `CoreError` maps onto one [`ErrorKind`], so callers can branch on
//! the category without matching each variant.

use thiserror::Error;

// =============================================================================
// Error Kind
// =============================================================================

/// Coarse classification of a [`CoreError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad constructor or method input.
    InvalidArgument,

    /// Illegal lifecycle transition (double ticketing, full garage, ...).
    InvalidState,

    /// A fee policy was configured with a non-positive parameter.
    InvalidConfiguration,
}

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A method received an argument it cannot work with.
    #[error("Invalid {field}: {reason}")]
    InvalidArgument { field: String, reason: String },

    /// The requested transition is not legal in the current state.
    ///
    /// ## When This Occurs
    /// - Attaching a second ticket to a vehicle
    /// - Filling a space when the garage is full
    /// - Freeing a space when the garage is empty
    /// - Presenting a vehicle at the exit without a ticket
    #[error("{entity} cannot {action}: {reason}")]
    InvalidState {
        entity: String,
        action: String,
        reason: String,
    },

    /// A fee policy parameter is out of range.
    #[error("Invalid fee configuration: {parameter} must be greater than 0 (got {value})")]
    InvalidConfiguration { parameter: String, value: f64 },

    /// The same ticket key was registered twice.
    #[error("Ticket {0} is already registered")]
    DuplicateTicketKey(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Creates an InvalidArgument error.
    pub fn invalid_argument(field: impl Into<String>, reason: impl Into<String>) -> Self {
        CoreError::InvalidArgument {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Creates an InvalidState error.
    pub fn invalid_state(
        entity: impl Into<String>,
        action: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        CoreError::InvalidState {
            entity: entity.into(),
            action: action.into(),
            reason: reason.into(),
        }
    }

    /// Returns the category this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CoreError::InvalidArgument { .. }
            | CoreError::DuplicateTicketKey(_)
            | CoreError::Validation(_) => ErrorKind::InvalidArgument,
            CoreError::InvalidState { .. } => ErrorKind::InvalidState,
            CoreError::InvalidConfiguration { .. } => ErrorKind::InvalidConfiguration,
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when caller input doesn't meet requirements.
/// Constructors run these checks before building any domain object.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustBeNonNegative { field: String },

    /// Invalid format (e.g. identifier with the wrong prefix).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::invalid_state("Vehicle V1", "accept a ticket", "already ticketed");
        assert_eq!(
            err.to_string(),
            "Vehicle V1 cannot accept a ticket: already ticketed"
        );

        let err = CoreError::InvalidConfiguration {
            parameter: "min_fee".to_string(),
            value: 0.0,
        };
        assert_eq!(
            err.to_string(),
            "Invalid fee configuration: min_fee must be greater than 0 (got 0)"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "license plate".to_string(),
        };
        assert_eq!(err.to_string(), "license plate is required");

        let err = ValidationError::TooLong {
            field: "license plate".to_string(),
            max: 7,
        };
        assert_eq!(err.to_string(), "license plate must be at most 7 characters");
    }

    #[test]
    fn test_kinds() {
        let validation: CoreError = ValidationError::Required {
            field: "plate".to_string(),
        }
        .into();
        assert!(matches!(validation, CoreError::Validation(_)));
        assert_eq!(validation.kind(), ErrorKind::InvalidArgument);

        assert_eq!(
            CoreError::DuplicateTicketKey("T1".to_string()).kind(),
            ErrorKind::InvalidArgument
        );
        assert_eq!(
            CoreError::invalid_state("Garage", "fill a space", "full").kind(),
            ErrorKind::InvalidState
        );
    }
}

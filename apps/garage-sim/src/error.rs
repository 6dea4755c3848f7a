//! # Application Error Type
//!
//! Unified error type for the simulator.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in garage-sim                             │
//! │                                                                         │
//! │  session.admit("ABC123")                                                │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Station / Session                                               │  │
//! │  │  Result<T, AppError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Lifecycle error? ─── CoreError::InvalidState ───┐              │  │
//! │  │         │                                        │              │  │
//! │  │         ▼                                        ▼              │  │
//! │  │  Totals error? ────── StoreError::Io ──────── AppError ────────►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  --json output:  { "code": "INVALID_STATE", "message": "..." }         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use garage_core::{CoreError, ErrorKind};
use garage_store::{StoreError, StoreErrorKind};
use serde::Serialize;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors surfaced by the simulator.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The `--json` summary could not be produced.
    #[error("Failed to encode summary: {0}")]
    Json(#[from] serde_json::Error),

    /// Release requested for a vehicle that is not parked.
    #[error("No parked vehicle with id {0}")]
    UnknownVehicle(String),
}

/// Machine-readable error codes for the `--json` summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    InvalidArgument,
    InvalidState,
    InvalidConfiguration,
    EncodingFailure,
    IoFailure,
    NotFound,
}

impl AppError {
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Core(err) => match err.kind() {
                ErrorKind::InvalidArgument => ErrorCode::InvalidArgument,
                ErrorKind::InvalidState => ErrorCode::InvalidState,
                ErrorKind::InvalidConfiguration => ErrorCode::InvalidConfiguration,
            },
            AppError::Store(err) => match err.kind() {
                StoreErrorKind::InvalidArgument => ErrorCode::InvalidArgument,
                StoreErrorKind::EncodingFailure => ErrorCode::EncodingFailure,
                StoreErrorKind::IoFailure => ErrorCode::IoFailure,
            },
            AppError::Config(_) => ErrorCode::InvalidConfiguration,
            AppError::Json(_) => ErrorCode::EncodingFailure,
            AppError::UnknownVehicle(_) => ErrorCode::NotFound,
        }
    }
}

/// Serializable view of an [`AppError`].
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorReport {
    pub code: ErrorCode,
    pub message: String,
}

impl From<&AppError> for ErrorReport {
    fn from(err: &AppError) -> Self {
        ErrorReport {
            code: err.code(),
            message: err.to_string(),
        }
    }
}

/// Result type for simulator operations.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err: AppError = CoreError::invalid_state("Garage 'Lot A'", "fill a space", "full").into();
        assert_eq!(err.code(), ErrorCode::InvalidState);
        assert_eq!(err.to_string(), "Garage 'Lot A' cannot fill a space: full");

        let err: AppError = StoreError::Encoding("NaN".into()).into();
        assert_eq!(err.code(), ErrorCode::EncodingFailure);

        let err = AppError::UnknownVehicle("V9".into());
        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[test]
    fn test_error_report_json() {
        let err = AppError::UnknownVehicle("V9".into());
        let json = serde_json::to_string(&ErrorReport::from(&err)).unwrap();

        assert_eq!(
            json,
            r#"{"code":"NOT_FOUND","message":"No parked vehicle with id V9"}"#
        );
    }
}

//! # Entry Lane Cameras
//!
//! A camera captures the plate of the vehicle at the entry lane. The
//! captured text, not the vehicle's own record, is what gets registered
//! against the issued ticket.

use garage_core::{CoreError, CoreResult, IdSequence};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::config::ConfigError;

/// Identifier prefix of entry lane cameras.
pub const CAMERA_ID_PREFIX: &str = "CAM";

/// Plate capture at the entry lane.
pub trait Camera: fmt::Debug {
    /// Camera identifier (`CAM1`, `CAM2`, ...).
    fn id(&self) -> &str;

    /// Captures the plate presented at the lane and returns the text read.
    ///
    /// ## Errors
    /// `InvalidArgument` when nothing legible was captured.
    fn capture(&mut self, plate: &str) -> CoreResult<String>;

    /// Text from the most recent successful capture.
    fn last_capture(&self) -> Option<&str>;
}

fn nothing_captured(id: &str) -> CoreError {
    CoreError::invalid_argument("captured plate", format!("{} read an empty plate", id))
}

// =============================================================================
// Plate Camera
// =============================================================================

/// Reads the plate exactly as presented.
#[derive(Debug, Clone)]
pub struct PlateCamera {
    id: String,
    data: Option<String>,
}

impl PlateCamera {
    pub fn new(id: impl Into<String>) -> Self {
        PlateCamera {
            id: id.into(),
            data: None,
        }
    }
}

impl Camera for PlateCamera {
    fn id(&self) -> &str {
        &self.id
    }

    fn capture(&mut self, plate: &str) -> CoreResult<String> {
        if plate.is_empty() {
            return Err(nothing_captured(&self.id));
        }
        self.data = Some(plate.to_string());
        Ok(plate.to_string())
    }

    fn last_capture(&self) -> Option<&str> {
        self.data.as_deref()
    }
}

// =============================================================================
// Manual Entry
// =============================================================================

/// An attendant keys the plate in by hand.
///
/// Operator input is trimmed and upper-cased.
#[derive(Debug, Clone)]
pub struct ManualEntryCamera {
    id: String,
    data: Option<String>,
}

impl ManualEntryCamera {
    pub fn new(id: impl Into<String>) -> Self {
        ManualEntryCamera {
            id: id.into(),
            data: None,
        }
    }
}

impl Camera for ManualEntryCamera {
    fn id(&self) -> &str {
        &self.id
    }

    fn capture(&mut self, plate: &str) -> CoreResult<String> {
        let keyed = plate.trim().to_uppercase();
        if keyed.is_empty() {
            return Err(nothing_captured(&self.id));
        }
        self.data = Some(keyed.clone());
        Ok(keyed)
    }

    fn last_capture(&self) -> Option<&str> {
        self.data.as_deref()
    }
}

// =============================================================================
// Camera Selection
// =============================================================================

/// Camera implementation selected in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CameraKind {
    #[default]
    Plate,
    Manual,
}

impl fmt::Display for CameraKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CameraKind::Plate => write!(f, "plate"),
            CameraKind::Manual => write!(f, "manual"),
        }
    }
}

impl FromStr for CameraKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "plate" => Ok(CameraKind::Plate),
            "manual" | "attendant" => Ok(CameraKind::Manual),
            other => Err(ConfigError::InvalidValue {
                key: "stations.camera".to_string(),
                value: other.to_string(),
                reason: "valid options: plate, manual".to_string(),
            }),
        }
    }
}

/// Builds the configured camera, minting its id from `ids`.
pub fn camera_for(kind: CameraKind, ids: &mut IdSequence) -> Box<dyn Camera> {
    let id = ids.next_id();
    match kind {
        CameraKind::Plate => Box::new(PlateCamera::new(id)),
        CameraKind::Manual => Box::new(ManualEntryCamera::new(id)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plate_camera_echoes() {
        let mut camera = PlateCamera::new("CAM1");

        assert_eq!(camera.capture("abc 12").unwrap(), "abc 12");
        assert_eq!(camera.last_capture(), Some("abc 12"));
        assert!(camera.capture("").is_err());
        assert_eq!(camera.last_capture(), Some("abc 12"));
    }

    #[test]
    fn test_manual_camera_normalizes() {
        let mut camera = ManualEntryCamera::new("CAM2");

        assert_eq!(camera.capture("  abc123 ").unwrap(), "ABC123");
        assert!(camera.capture("   ").is_err());
    }

    #[test]
    fn test_camera_factory_mints_ids() {
        let mut ids = IdSequence::new(CAMERA_ID_PREFIX);

        let first = camera_for(CameraKind::Plate, &mut ids);
        let second = camera_for(CameraKind::Manual, &mut ids);

        assert_eq!(first.id(), "CAM1");
        assert_eq!(second.id(), "CAM2");
    }

    #[test]
    fn test_camera_kind_parsing() {
        assert_eq!("plate".parse::<CameraKind>().unwrap(), CameraKind::Plate);
        assert_eq!("MANUAL".parse::<CameraKind>().unwrap(), CameraKind::Manual);
        assert!("infrared".parse::<CameraKind>().is_err());
    }
}

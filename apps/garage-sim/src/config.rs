//! # Simulator Configuration
//!
//! Configuration for the garage, its fee policy, the stations and the
//! running totals file.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     GARAGE_NAME=Airport Long Stay                                      │
//! │     GARAGE_FEE_POLICY=special_event                                    │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     --config PATH, or the platform config dir:                         │
//! │     ~/.config/garage-sim/garage.toml (Linux)                           │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     50 spaces, min/max fee policy, plate camera                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [garage]
//! name = "Downtown Parking"
//! address = "123 Main Street"
//! total_spaces = 50
//!
//! [fee]
//! policy = "min_max"   # min_max | min_no_max | special_event
//! min_fee = 2.0
//! additional_fee = 0.5
//! max_fee = 10.0
//!
//! [stations]
//! welcome_message = "Welcome to Downtown Parking"
//! exit_message = "Thank you for parking with us"
//! camera = "plate"     # plate | manual
//!
//! [totals]
//! path = "/var/lib/garage/running_totals.txt"
//! ```

use directories::ProjectDirs;
use garage_core::validation::{validate_required, validate_total_spaces};
use garage_core::{CoreError, FeeSchedule, ValidationError};
use garage_store::DEFAULT_TOTALS_FILE;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

use crate::devices::CameraKind;

/// Configuration file name inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "garage.toml";

/// Cap used when an override switches to `min_max` from an uncapped policy.
pub const DEFAULT_MAX_FEE: f64 = 10.0;

// =============================================================================
// Config Errors
// =============================================================================

/// Startup configuration failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value '{value}' for {key}: {reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(#[from] CoreError),

    #[error("Could not determine the platform data directory; set totals.path")]
    NoDataDir,
}

impl From<ValidationError> for ConfigError {
    fn from(err: ValidationError) -> Self {
        ConfigError::Invalid(CoreError::from(err))
    }
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Garage Settings
// =============================================================================

/// The garage itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GarageSettings {
    #[serde(default = "default_garage_name")]
    pub name: String,

    #[serde(default = "default_garage_address")]
    pub address: String,

    #[serde(default = "default_total_spaces")]
    pub total_spaces: u32,
}

fn default_garage_name() -> String {
    "Downtown Parking".to_string()
}

fn default_garage_address() -> String {
    "123 Main Street".to_string()
}

fn default_total_spaces() -> u32 {
    50
}

impl Default for GarageSettings {
    fn default() -> Self {
        GarageSettings {
            name: default_garage_name(),
            address: default_garage_address(),
            total_spaces: default_total_spaces(),
        }
    }
}

// =============================================================================
// Station Settings
// =============================================================================

/// Entry and exit station behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationSettings {
    /// First line on the entry screen, followed by the free space count.
    #[serde(default = "default_welcome_message")]
    pub welcome_message: String,

    /// Shown when a vehicle reaches the exit.
    #[serde(default = "default_exit_message")]
    pub exit_message: String,

    #[serde(default)]
    pub camera: CameraKind,
}

fn default_welcome_message() -> String {
    "Welcome to Downtown Parking".to_string()
}

fn default_exit_message() -> String {
    "Thank you for parking with us".to_string()
}

impl Default for StationSettings {
    fn default() -> Self {
        StationSettings {
            welcome_message: default_welcome_message(),
            exit_message: default_exit_message(),
            camera: CameraKind::default(),
        }
    }
}

// =============================================================================
// Totals Settings
// =============================================================================

/// Where the running totals record is kept.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TotalsSettings {
    /// Defaults to `running_totals.txt` in the platform data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl TotalsSettings {
    /// Returns the configured path, or the platform default.
    pub fn resolve_path(&self) -> ConfigResult<PathBuf> {
        if let Some(path) = &self.path {
            return Ok(path.clone());
        }

        project_dirs()
            .map(|dirs| dirs.data_dir().join(DEFAULT_TOTALS_FILE))
            .ok_or(ConfigError::NoDataDir)
    }
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete simulator configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    #[serde(default)]
    pub garage: GarageSettings,

    #[serde(default)]
    pub fee: FeeSchedule,

    #[serde(default)]
    pub stations: StationSettings,

    #[serde(default)]
    pub totals: TotalsSettings,
}

impl SimConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`garage.toml`)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = match config_path.or_else(Self::default_config_path) {
            Some(path) if path.exists() => Self::from_file(&path)?,
            Some(path) => {
                debug!(?path, "Config file not found, using defaults");
                Self::default()
            }
            None => Self::default(),
        };

        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;

        Ok(config)
    }

    /// Parses a config file without applying overrides.
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        info!(?path, "Loading garage config from file");
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Checks everything the garage and stations will refuse later.
    pub fn validate(&self) -> ConfigResult<()> {
        validate_required("garage name", &self.garage.name)?;
        validate_required("garage address", &self.garage.address)?;
        validate_total_spaces(self.garage.total_spaces)?;
        validate_required("welcome message", &self.stations.welcome_message)?;
        validate_required("exit message", &self.stations.exit_message)?;

        self.fee.build()?;

        Ok(())
    }

    /// Applies overrides looked up through `var`.
    ///
    /// | Variable              | Setting               |
    /// |-----------------------|-----------------------|
    /// | `GARAGE_NAME`         | `garage.name`         |
    /// | `GARAGE_ADDRESS`      | `garage.address`      |
    /// | `GARAGE_TOTAL_SPACES` | `garage.total_spaces` |
    /// | `GARAGE_FEE_POLICY`   | `fee.policy`          |
    /// | `GARAGE_TOTALS_PATH`  | `totals.path`         |
    pub fn apply_overrides<F>(&mut self, var: F) -> ConfigResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(name) = var("GARAGE_NAME") {
            debug!(%name, "Overriding garage name from environment");
            self.garage.name = name;
        }

        if let Some(address) = var("GARAGE_ADDRESS") {
            self.garage.address = address;
        }

        if let Some(spaces) = var("GARAGE_TOTAL_SPACES") {
            self.garage.total_spaces =
                spaces
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidValue {
                        key: "GARAGE_TOTAL_SPACES".to_string(),
                        value: spaces.clone(),
                        reason: "expected a whole number of spaces".to_string(),
                    })?;
        }

        if let Some(policy) = var("GARAGE_FEE_POLICY") {
            debug!(%policy, "Overriding fee policy from environment");
            self.fee = with_policy(self.fee, &policy)?;
        }

        if let Some(path) = var("GARAGE_TOTALS_PATH") {
            self.totals.path = Some(PathBuf::from(path));
        }

        Ok(())
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "garage", "garage-sim")
}

/// Switches the fee policy, keeping the configured fee amounts.
fn with_policy(current: FeeSchedule, policy: &str) -> ConfigResult<FeeSchedule> {
    let (min_fee, additional_fee, max_fee) = match current {
        FeeSchedule::MinMax {
            min_fee,
            additional_fee,
            max_fee,
        } => (min_fee, additional_fee, Some(max_fee)),
        FeeSchedule::MinNoMax {
            min_fee,
            additional_fee,
        }
        | FeeSchedule::SpecialEvent {
            min_fee,
            additional_fee,
        } => (min_fee, additional_fee, None),
    };

    match policy.trim().to_lowercase().as_str() {
        "min_max" => {
            Ok(FeeSchedule::MinMax {
                min_fee,
                additional_fee,
                max_fee: max_fee.unwrap_or(DEFAULT_MAX_FEE),
            })
        }
        "min_no_max" => Ok(FeeSchedule::MinNoMax {
            min_fee,
            additional_fee,
        }),
        "special_event" => Ok(FeeSchedule::SpecialEvent {
            min_fee,
            additional_fee,
        }),
        other => Err(ConfigError::InvalidValue {
            key: "GARAGE_FEE_POLICY".to_string(),
            value: other.to_string(),
            reason: "valid options: min_max, min_no_max, special_event".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = SimConfig::default();

        assert_eq!(config.garage.total_spaces, 50);
        assert_eq!(config.fee.policy_name(), "min_max");
        assert_eq!(config.stations.camera, CameraKind::Plate);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_full_file() {
        let config = SimConfig::from_toml(
            r#"
            [garage]
            name = "Airport Long Stay"
            address = "1 Terminal Road"
            total_spaces = 400

            [fee]
            policy = "min_no_max"
            min_fee = 1.5
            additional_fee = 0.75

            [stations]
            welcome_message = "Welcome"
            exit_message = "Safe travels"
            camera = "manual"

            [totals]
            path = "/tmp/totals.txt"
            "#,
        )
        .unwrap();

        assert_eq!(config.garage.name, "Airport Long Stay");
        assert_eq!(config.garage.total_spaces, 400);
        assert_eq!(
            config.fee,
            FeeSchedule::MinNoMax {
                min_fee: 1.5,
                additional_fee: 0.75
            }
        );
        assert_eq!(config.stations.camera, CameraKind::Manual);
        assert_eq!(
            config.totals.resolve_path().unwrap(),
            PathBuf::from("/tmp/totals.txt")
        );
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config = SimConfig::from_toml("[garage]\ntotal_spaces = 3\n").unwrap();

        assert_eq!(config.garage.total_spaces, 3);
        assert_eq!(config.garage.name, "Downtown Parking");
        assert_eq!(config.fee, FeeSchedule::default());
    }

    #[test]
    fn test_malformed_file_fails() {
        assert!(matches!(
            SimConfig::from_toml("[garage]\ntotal_spaces = \"many\"\n"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            SimConfig::from_toml("[fee]\npolicy = \"hourly\"\n"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut config = SimConfig::default();
        config.garage.total_spaces = 0;
        assert!(config.validate().is_err());

        let mut config = SimConfig::default();
        config.stations.exit_message = "  ".to_string();
        assert!(config.validate().is_err());

        let mut config = SimConfig::default();
        config.fee = FeeSchedule::SpecialEvent {
            min_fee: 0.0,
            additional_fee: 0.15,
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid(CoreError::InvalidConfiguration { .. }))
        ));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = SimConfig::default();
        config
            .apply_overrides(vars(&[
                ("GARAGE_NAME", "Harbor Lot"),
                ("GARAGE_TOTAL_SPACES", "12"),
                ("GARAGE_FEE_POLICY", "special_event"),
                ("GARAGE_TOTALS_PATH", "/srv/garage/totals.txt"),
            ]))
            .unwrap();

        assert_eq!(config.garage.name, "Harbor Lot");
        assert_eq!(config.garage.total_spaces, 12);
        assert_eq!(
            config.fee,
            FeeSchedule::SpecialEvent {
                min_fee: 2.0,
                additional_fee: 0.5
            }
        );
        assert_eq!(
            config.totals.path,
            Some(PathBuf::from("/srv/garage/totals.txt"))
        );
    }

    #[test]
    fn test_env_policy_back_to_min_max_takes_default_cap() {
        let mut config = SimConfig::default();
        config.fee = FeeSchedule::MinNoMax {
            min_fee: 1.5,
            additional_fee: 0.75,
        };

        config
            .apply_overrides(vars(&[("GARAGE_FEE_POLICY", "MIN_MAX")]))
            .unwrap();

        assert_eq!(
            config.fee,
            FeeSchedule::MinMax {
                min_fee: 1.5,
                additional_fee: 0.75,
                max_fee: 10.0
            }
        );
    }

    #[test]
    fn test_malformed_env_override_fails() {
        let mut config = SimConfig::default();

        let err = config
            .apply_overrides(vars(&[("GARAGE_TOTAL_SPACES", "lots")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));

        let err = config
            .apply_overrides(vars(&[("GARAGE_FEE_POLICY", "hourly")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[garage]\nname = \"File Lot\"\n").unwrap();

        let config = SimConfig::from_file(&path).unwrap();
        assert_eq!(config.garage.name, "File Lot");

        let err = SimConfig::from_file(&dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_toml_serialization() {
        let toml_str = toml::to_string_pretty(&SimConfig::default()).unwrap();

        assert!(toml_str.contains("[garage]"));
        assert!(toml_str.contains("policy = \"min_max\""));
    }
}

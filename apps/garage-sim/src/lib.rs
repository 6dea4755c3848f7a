//! # garage-sim
//!
//! Parking garage simulator: entry and exit stations wired to console
//! devices, with running totals kept in a text file between runs.
//!
//! ## Module Organization
//! ```text
//! garage_sim/
//! ├── lib.rs          ◄─── You are here (startup & run)
//! ├── cli.rs          ◄─── Argument parsing
//! ├── config.rs       ◄─── SimConfig: TOML file + environment overrides
//! ├── devices/
//! │   ├── camera.rs   ◄─── Plate capture, CameraKind factory
//! │   ├── display.rs  ◄─── Station screens
//! │   ├── printer.rs  ◄─── Ticket/receipt printers
//! │   └── sink.rs     ◄─── Management report destinations
//! ├── stations/
//! │   ├── mod.rs      ◄─── Arm
//! │   ├── entry.rs    ◄─── EntryStation
//! │   └── exit.rs     ◄─── ExitStation
//! ├── report.rs       ◄─── ManagementReportGenerator
//! ├── session.rs      ◄─── GarageSession facade
//! ├── simulation.rs   ◄─── Batch run over a list of plates
//! └── error.rs        ◄─── AppError
//! ```

pub mod cli;
pub mod config;
pub mod devices;
pub mod error;
pub mod report;
pub mod session;
pub mod simulation;
pub mod stations;

use chrono::Local;
use garage_store::FileLineStore;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

pub use cli::{parse_args, CliArgs, Command, USAGE};
pub use config::{ConfigError, SimConfig};
pub use devices::SessionDevices;
pub use error::{AppError, AppResult, ErrorCode, ErrorReport};
pub use report::ManagementReportGenerator;
pub use session::GarageSession;
pub use simulation::{simulate, SimulationSummary};
pub use stations::{EntryOutcome, EntryStation, ExitOutcome, ExitStation, TotalsStatus};

/// Runs one simulation.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Simulator Startup                                 │
/// │                                                                         │
/// │  1. Load Configuration ───────────────────────────────────────────────► │
/// │     • --config PATH or the platform config dir                          │
/// │     • GARAGE_* environment overrides, then validation                   │
/// │                                                                         │
/// │  2. Locate Running Totals ────────────────────────────────────────────► │
/// │     • totals.path, GARAGE_TOTALS_PATH or the platform data dir          │
/// │                                                                         │
/// │  3. Open Session ─────────────────────────────────────────────────────► │
/// │     • Garage, stations, camera, report generator                        │
/// │     • Console devices, or log-only devices with --json                  │
/// │                                                                         │
/// │  4. Admit every plate, then release them in order                       │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run(args: &CliArgs) -> AppResult<()> {
    let config = SimConfig::load(args.config.clone())?;
    let totals_path = config.totals.resolve_path()?;
    info!(?totals_path, "Running totals location determined");

    let devices = if args.json {
        SessionDevices::logging()
    } else {
        SessionDevices::console()
    };

    let mut session = GarageSession::open(
        &config,
        devices,
        Box::new(FileLineStore::new(totals_path)),
        StdRng::from_entropy(),
    )?;

    let summary = simulate(&mut session, &args.plates, Local::now().naive_local());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        for failure in &summary.failures {
            eprintln!(
                "{} failed at {}: {}",
                failure.plate, failure.stage, failure.error.message
            );
        }
        println!(
            "Processed {} of {} vehicles.",
            summary.exits.len(),
            args.plates.len()
        );
    }

    info!(
        entries = summary.entries.len(),
        exits = summary.exits.len(),
        failures = summary.failures.len(),
        "Simulation finished"
    );

    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// Logs go to stderr so stdout carries only slips, reports or JSON.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=garage_store=trace` - Trace the totals store only
/// - Default: `info,garage=debug`
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,garage=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

//! # garage-store: Totals Persistence
//!
//! Keeps the garage's lifetime running totals (hours charged and revenue
//! collected) in a small line-oriented text record.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          garage-store                                   │
//! │                                                                         │
//! │  ┌───────────────────────────────────────────────────────────────────┐  │
//! │  │                    TotalsAccumulator                              │  │
//! │  │   reload ─► add deltas ─► encode ─► write ─► summary              │  │
//! │  └─────────────────────────┬─────────────────────┬───────────────────┘  │
//! │                            │                     │                      │
//! │                            ▼                     ▼                      │
//! │  ┌──────────────────────────────┐  ┌──────────────────────────────┐    │
//! │  │  formatter                   │  │  lines                       │    │
//! │  │  TotalsFormatter             │  │  LineStore                   │    │
//! │  │  └── RunningTotalsFormatter  │  │  ├── FileLineStore           │    │
//! │  └──────────────────────────────┘  │  └── MemoryLineStore         │    │
//! │                                    └──────────────────────────────┘    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//! ```rust
//! use garage_store::{MemoryLineStore, TotalsAccumulator};
//!
//! let store = MemoryLineStore::new();
//! let mut totals = TotalsAccumulator::open(store.clone()).unwrap();
//!
//! totals.update(3.5, 2.5).unwrap();
//! assert_eq!(store.lines(), vec!["3.50".to_string(), "2.5".to_string()]);
//! ```

pub mod error;
pub mod formatter;
pub mod lines;
pub mod totals;

pub use error::{StoreError, StoreErrorKind, StoreResult};
pub use formatter::{RunningTotalsFormatter, TotalsFormatter, TotalsRecord};
pub use lines::{FileLineStore, LineStore, MemoryLineStore};
pub use totals::{TotalsAccumulator, RUNNING_TOTALS_HEADER};

/// Default file name of the totals record.
pub const DEFAULT_TOTALS_FILE: &str = "running_totals.txt";

//! # Station Devices
//!
//! Collaborators the stations talk to. Each is a trait with a console
//! implementation, a log-only implementation (used with `--json`, so
//! stdout carries nothing but the summary) and a recording
//! implementation for tests.
//!
//! ```text
//! ┌──────────────────┬─────────────────────┬──────────────┬────────────────────┐
//! │ Capability       │ Console             │ Log only     │ Recording          │
//! ├──────────────────┼─────────────────────┼──────────────┼────────────────────┤
//! │ MessageDisplay   │ ConsoleDisplay      │ LogDisplay   │ RecordingDisplay   │
//! │ Printer          │ ConsolePrinter      │ LogPrinter   │ RecordingPrinter   │
//! │ ReportSink       │ ConsoleReportSink   │ LogReportSink│ RecordingReportSink│
//! │ Camera           │ PlateCamera / ManualEntryCamera (see `CameraKind`)      │
//! └──────────────────┴─────────────────────┴──────────────┴────────────────────┘
//! ```

pub mod camera;
pub mod display;
pub mod printer;
pub mod sink;

pub use camera::{camera_for, Camera, CameraKind, ManualEntryCamera, PlateCamera, CAMERA_ID_PREFIX};
pub use display::{ConsoleDisplay, LogDisplay, MessageDisplay, RecordingDisplay};
pub use printer::{ConsolePrinter, LogPrinter, Printer, RecordingPrinter};
pub use sink::{ConsoleReportSink, LogReportSink, PublishedReports, RecordingReportSink, ReportSink};

/// Display, printer and report sink for a whole session.
#[derive(Debug)]
pub struct SessionDevices {
    pub entry_display: Box<dyn MessageDisplay>,
    pub entry_printer: Box<dyn Printer>,
    pub exit_display: Box<dyn MessageDisplay>,
    pub exit_printer: Box<dyn Printer>,
    pub report_sink: Box<dyn ReportSink>,
}

impl SessionDevices {
    /// Everything goes to the terminal.
    pub fn console() -> Self {
        SessionDevices {
            entry_display: Box::new(ConsoleDisplay),
            entry_printer: Box::new(ConsolePrinter),
            exit_display: Box::new(ConsoleDisplay),
            exit_printer: Box::new(ConsolePrinter),
            report_sink: Box::new(ConsoleReportSink),
        }
    }

    /// Everything goes to the log.
    pub fn logging() -> Self {
        SessionDevices {
            entry_display: Box::new(LogDisplay),
            entry_printer: Box::new(LogPrinter),
            exit_display: Box::new(LogDisplay),
            exit_printer: Box::new(LogPrinter),
            report_sink: Box::new(LogReportSink),
        }
    }
}

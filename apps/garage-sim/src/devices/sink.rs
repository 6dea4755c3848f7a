//! Destinations for the management reports.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use tracing::{debug, info};

/// Receives freshly generated management reports.
pub trait ReportSink: fmt::Debug {
    fn publish(&mut self, running_totals: &str, issued_tickets: &str);
}

/// Prints the reports to stdout.
#[derive(Debug, Clone, Default)]
pub struct ConsoleReportSink;

impl ReportSink for ConsoleReportSink {
    fn publish(&mut self, running_totals: &str, issued_tickets: &str) {
        info!("Management reports refreshed");
        println!("{}\n\n{}\n", running_totals, issued_tickets);
    }
}

/// Logs the reports only.
#[derive(Debug, Clone, Default)]
pub struct LogReportSink;

impl ReportSink for LogReportSink {
    fn publish(&mut self, running_totals: &str, issued_tickets: &str) {
        debug!(%running_totals, %issued_tickets, "Management reports refreshed");
    }
}

/// One publication received by a [`RecordingReportSink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedReports {
    pub running_totals: String,
    pub issued_tickets: String,
}

/// Keeps every publication. Clones share the same history.
#[derive(Debug, Clone, Default)]
pub struct RecordingReportSink {
    published: Rc<RefCell<Vec<PublishedReports>>>,
}

impl RecordingReportSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn published(&self) -> Vec<PublishedReports> {
        self.published.borrow().clone()
    }

    pub fn latest(&self) -> Option<PublishedReports> {
        self.published.borrow().last().cloned()
    }
}

impl ReportSink for RecordingReportSink {
    fn publish(&mut self, running_totals: &str, issued_tickets: &str) {
        self.published.borrow_mut().push(PublishedReports {
            running_totals: running_totals.to_string(),
            issued_tickets: issued_tickets.to_string(),
        });
    }
}

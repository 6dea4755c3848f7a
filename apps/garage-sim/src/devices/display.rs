//! Station screens.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use tracing::debug;

/// Shows status text to the driver at a station.
pub trait MessageDisplay: fmt::Debug {
    fn show(&mut self, message: &str);
}

/// Writes messages to stdout.
#[derive(Debug, Clone, Default)]
pub struct ConsoleDisplay;

impl MessageDisplay for ConsoleDisplay {
    fn show(&mut self, message: &str) {
        println!("{}\n", message);
    }
}

/// Sends messages to the log instead of the terminal.
#[derive(Debug, Clone, Default)]
pub struct LogDisplay;

impl MessageDisplay for LogDisplay {
    fn show(&mut self, message: &str) {
        debug!(%message, "Station display");
    }
}

/// Keeps every message shown. Clones share the same history.
#[derive(Debug, Clone, Default)]
pub struct RecordingDisplay {
    shown: Rc<RefCell<Vec<String>>>,
}

impl RecordingDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.shown.borrow().clone()
    }
}

impl MessageDisplay for RecordingDisplay {
    fn show(&mut self, message: &str) {
        self.shown.borrow_mut().push(message.to_string());
    }
}

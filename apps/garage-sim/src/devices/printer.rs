//! Ticket and receipt printers.

use garage_core::Printable;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use tracing::debug;

/// Prints anything [`Printable`].
pub trait Printer: fmt::Debug {
    fn print(&mut self, item: &dyn Printable);
}

/// Prints slips to stdout.
#[derive(Debug, Clone, Default)]
pub struct ConsolePrinter;

impl Printer for ConsolePrinter {
    fn print(&mut self, item: &dyn Printable) {
        println!("{}\n", item.format_for_printing());
    }
}

/// Sends slips to the log instead of the terminal.
#[derive(Debug, Clone, Default)]
pub struct LogPrinter;

impl Printer for LogPrinter {
    fn print(&mut self, item: &dyn Printable) {
        debug!(slip = %item.format_for_printing(), "Printed slip");
    }
}

/// Keeps the rendered text of every slip. Clones share the same output.
#[derive(Debug, Clone, Default)]
pub struct RecordingPrinter {
    printed: Rc<RefCell<Vec<String>>>,
}

impl RecordingPrinter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn printed(&self) -> Vec<String> {
        self.printed.borrow().clone()
    }
}

impl Printer for RecordingPrinter {
    fn print(&mut self, item: &dyn Printable) {
        self.printed.borrow_mut().push(item.format_for_printing());
    }
}

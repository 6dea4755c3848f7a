//! # Line Stores
//!
//! The persistence capability behind the totals record: read every line of
//! a text source, or replace it with new lines.
//!
//! ```text
//! ┌─────────────────────┐        ┌──────────────────────────┐
//! │  TotalsAccumulator  │───────►│  dyn LineStore           │
//! └─────────────────────┘        │  ├── FileLineStore       │
//!                                │  └── MemoryLineStore     │
//!                                └──────────────────────────┘
//! ```

use crate::error::{StoreError, StoreResult};
use std::cell::RefCell;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tracing::debug;

/// A source of text lines that can be read whole and rewritten whole.
pub trait LineStore: fmt::Debug {
    /// Returns every line currently stored, in order.
    fn read_lines(&self) -> StoreResult<Vec<String>>;

    /// Replaces the stored content with `lines`.
    fn write_lines(&mut self, lines: &[String]) -> StoreResult<()>;

    /// Human-readable location, used in log output.
    fn describe(&self) -> String;
}

// =============================================================================
// File Store
// =============================================================================

/// Lines kept in a plain text file, one per line.
///
/// A missing file reads as empty, which is the state of a fresh install.
/// Writing creates any missing parent directories.
#[derive(Debug, Clone)]
pub struct FileLineStore {
    path: PathBuf,
}

impl FileLineStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileLineStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LineStore for FileLineStore {
    fn read_lines(&self) -> StoreResult<Vec<String>> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(content.lines().map(str::to_string).collect()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "Totals file not found, starting empty");
                Ok(Vec::new())
            }
            Err(err) => Err(StoreError::io(&self.path, err)),
        }
    }

    fn write_lines(&mut self, lines: &[String]) -> StoreResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|err| StoreError::io(parent, err))?;
        }

        let mut content = lines.join("\n");
        content.push('\n');

        fs::write(&self.path, content).map_err(|err| StoreError::io(&self.path, err))?;
        debug!(path = %self.path.display(), lines = lines.len(), "Wrote totals file");

        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

// =============================================================================
// Memory Store
// =============================================================================

#[derive(Debug, Default)]
struct MemoryState {
    lines: Vec<String>,
    fail_reads: bool,
    fail_writes: bool,
    writes: usize,
}

/// Lines held in memory.
///
/// Clones share the same buffer, so a test can hand one clone to an
/// accumulator and inspect or tamper with the content through another.
/// Reads and writes can be made to fail to exercise error paths.
#[derive(Debug, Clone, Default)]
pub struct MemoryLineStore {
    state: Rc<RefCell<MemoryState>>,
}

impl MemoryLineStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that already holds `lines`.
    pub fn with_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let store = Self::new();
        store.set_lines(lines);
        store
    }

    /// Current content.
    pub fn lines(&self) -> Vec<String> {
        self.state.borrow().lines.clone()
    }

    /// Overwrites the content without counting as a write.
    pub fn set_lines<I, S>(&self, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.state.borrow_mut().lines = lines.into_iter().map(Into::into).collect();
    }

    /// Number of successful `write_lines` calls.
    pub fn writes(&self) -> usize {
        self.state.borrow().writes
    }

    pub fn fail_reads(&self, fail: bool) {
        self.state.borrow_mut().fail_reads = fail;
    }

    pub fn fail_writes(&self, fail: bool) {
        self.state.borrow_mut().fail_writes = fail;
    }
}

impl LineStore for MemoryLineStore {
    fn read_lines(&self) -> StoreResult<Vec<String>> {
        let state = self.state.borrow();
        if state.fail_reads {
            return Err(StoreError::io(
                self.describe(),
                io::Error::new(io::ErrorKind::Other, "read refused"),
            ));
        }
        Ok(state.lines.clone())
    }

    fn write_lines(&mut self, lines: &[String]) -> StoreResult<()> {
        let mut state = self.state.borrow_mut();
        if state.fail_writes {
            return Err(StoreError::io(
                self.describe(),
                io::Error::new(io::ErrorKind::Other, "write refused"),
            ));
        }
        state.lines = lines.to_vec();
        state.writes += 1;
        Ok(())
    }

    fn describe(&self) -> String {
        "<memory>".to_string()
    }
}

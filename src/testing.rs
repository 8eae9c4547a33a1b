//! Fakes for the command runner and version store capabilities

use crate::executor::{CommandLine, CommandOutcome, CommandRunner};
use crate::pipeline::ReleaseError;
use crate::version::{ManifestDocument, VersionStore};
use std::cell::{Cell, RefCell};

/// Records every command and fails the first one whose text starts with
/// the configured prefix
#[derive(Debug, Default)]
pub struct RecordingRunner {
    calls: RefCell<Vec<String>>,
    fail_on: Option<String>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on(prefix: &str) -> Self {
        Self {
            calls: RefCell::default(),
            fail_on: Some(prefix.to_string()),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    pub fn count(&self, prefix: &str) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|call| call.starts_with(prefix))
            .count()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, command: &CommandLine) -> CommandOutcome {
        let text = command.to_string();
        let fails = self
            .fail_on
            .as_deref()
            .is_some_and(|prefix| text.starts_with(prefix));
        self.calls.borrow_mut().push(text);

        if fails {
            CommandOutcome::Failed { code: Some(1) }
        } else {
            CommandOutcome::Success
        }
    }
}

/// Manifest kept in memory, counting saves
#[derive(Debug)]
pub struct MemoryStore {
    text: RefCell<String>,
    saves: Cell<usize>,
}

impl MemoryStore {
    pub fn new(text: &str) -> Self {
        Self {
            text: RefCell::new(text.to_string()),
            saves: Cell::new(0),
        }
    }

    pub fn text(&self) -> String {
        self.text.borrow().clone()
    }

    pub fn saves(&self) -> usize {
        self.saves.get()
    }
}

impl VersionStore for MemoryStore {
    fn load(&self) -> Result<ManifestDocument, ReleaseError> {
        Ok(ManifestDocument::parse(&self.text.borrow()))
    }

    fn save(&self, document: &ManifestDocument) -> Result<(), ReleaseError> {
        *self.text.borrow_mut() = document.to_text();
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }
}

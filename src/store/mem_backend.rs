use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use super::backend::StorageBackend;
use crate::error::{Result, TaskError};

/// In-memory storage backend for testing logic without filesystem I/O.
///
/// Interior mutability keeps the [`StorageBackend`] methods `&self`,
/// matching the file backend. The whole core is single-threaded, so a
/// `RefCell` is sufficient.
#[derive(Default)]
pub struct MemBackend {
    data: RefCell<HashMap<String, String>>,
    simulate_write_error: Cell<bool>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent write fail, for exercising the
    /// persistence-failure policy (mutation kept, error surfaced).
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.set(simulate);
    }

    /// Raw access to a stored payload, for assertions in tests.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.data.borrow().get(key).cloned()
    }
}

impl StorageBackend for MemBackend {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.data.borrow().get(key).cloned())
    }

    fn write(&self, key: &str, payload: &str) -> Result<()> {
        if self.simulate_write_error.get() {
            return Err(TaskError::Persistence(format!(
                "simulated write error for key '{}'",
                key
            )));
        }
        self.data
            .borrow_mut()
            .insert(key.to_string(), payload.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.data.borrow_mut().remove(key);
        Ok(())
    }
}

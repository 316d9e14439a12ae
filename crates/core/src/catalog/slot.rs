//! Durable key-value slots backing the catalog cache.

use std::collections::HashMap;
use std::sync::Mutex;

use super::SlotError;

/// A named key-value store holding textual values.
pub trait DurableSlot: Send + Sync {
    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>, SlotError>;

    /// Overwrite the value stored under `key`.
    fn put(&self, key: &str, value: &str) -> Result<(), SlotError>;

    /// Remove the value stored under `key`.
    fn remove(&self, key: &str) -> Result<(), SlotError>;
}

/// In-process slot, lost on restart.
#[derive(Debug, Default)]
pub struct MemorySlot {
    values: Mutex<HashMap<String, String>>,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>, SlotError> {
        self.values
            .lock()
            .map_err(|e| SlotError::Internal(format!("slot lock poisoned: {}", e)))
    }
}

impl DurableSlot for MemorySlot {
    fn get(&self, key: &str) -> Result<Option<String>, SlotError> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn put(&self, key: &str, value: &str) -> Result<(), SlotError> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), SlotError> {
        self.lock()?.remove(key);
        Ok(())
    }
}

//! Registry of BOM artifact ids already generated.
//!
//! Generation is keyed on the BOM's artifact id: the first caller to register
//! an id generates it, every later caller skips. The registry is owned by the
//! caller (one per process, or a fresh one per test) and shared by `Arc`.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

/// Shared set of generated BOM ids with atomic add-if-absent.
#[derive(Debug, Clone, Default)]
pub struct GeneratedRegistry {
    ids: Arc<Mutex<HashSet<String>>>,
}

impl GeneratedRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        GeneratedRegistry::default()
    }

    /// Claim an id. Returns true for the first claimant only.
    pub fn register(&self, id: &str) -> bool {
        let mut ids = match self.ids.lock() {
            Ok(guard) => guard,
            // Insert-only set, poisoning leaves it consistent
            Err(poisoned) => poisoned.into_inner(),
        };
        ids.insert(id.to_string())
    }

    /// Has the id been claimed?
    pub fn contains(&self, id: &str) -> bool {
        match self.ids.lock() {
            Ok(ids) => ids.contains(id),
            Err(poisoned) => poisoned.into_inner().contains(id),
        }
    }

    /// Number of claimed ids.
    pub fn len(&self) -> usize {
        match self.ids.lock() {
            Ok(ids) => ids.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }

    /// Is the registry empty?
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

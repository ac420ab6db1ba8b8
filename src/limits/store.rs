//! Limit Store
//!
//! In-memory view of the configured limits, backed by a [`ConfigStore`].
//! The persisted layer is authoritative: a write reaches the backing store
//! first, and the in-memory map only changes once that write succeeded.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use tracing::{debug, info, warn};

use super::persist::{limit_key, ConfigStore, MemoryStore, LIMITS_SECTION};
use crate::catalog::EnchantmentId;
use crate::error::PersistenceError;

/// Raw value that clears a limit
const UNLIMITED_RAW: i64 = -1;

/// Largest raw value accepted as a cap
const MAX_RAW: i64 = i32::MAX as i64;

/// Maximum allowed level for an enchantment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Limit {
    /// No limit configured
    Unlimited,
    /// Levels above this are capped; `0` removes the enchantment entirely
    Max(u32),
}

impl Limit {
    /// Interpret a raw configuration value
    ///
    /// `-1` means unlimited and `0..=i32::MAX` is a cap. Anything else is
    /// rejected.
    pub fn from_raw(raw: i64) -> Option<Self> {
        match raw {
            UNLIMITED_RAW => Some(Limit::Unlimited),
            0..=MAX_RAW => u32::try_from(raw).ok().map(Limit::Max),
            _ => None,
        }
    }

    /// The cap, if one is configured
    pub fn cap(self) -> Option<u32> {
        match self {
            Limit::Unlimited => None,
            Limit::Max(n) => Some(n),
        }
    }
}

impl fmt::Display for Limit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Limit::Unlimited => write!(f, "None"),
            Limit::Max(n) => write!(f, "{}", n),
        }
    }
}

/// Mapping from enchantment to configured limit
#[derive(Debug)]
pub struct LimitStore {
    limits: HashMap<EnchantmentId, u32>,
    backend: Box<dyn ConfigStore>,
}

impl LimitStore {
    /// Load every `enchantment-limits.*` entry from the backing store
    pub fn load(mut backend: Box<dyn ConfigStore>) -> Result<Self, PersistenceError> {
        let prefix = format!("{}.", LIMITS_SECTION);
        let mut limits = HashMap::new();

        for (key, raw) in backend.load()? {
            let Some(enchantment) = key.strip_prefix(&prefix) else {
                continue;
            };
            match Limit::from_raw(raw) {
                Some(Limit::Max(n)) => {
                    limits.insert(EnchantmentId::new(enchantment), n);
                }
                Some(Limit::Unlimited) => {
                    debug!(enchantment = %enchantment, "limit explicitly unlimited");
                }
                None => {
                    warn!(enchantment = %enchantment, raw, "ignoring out-of-range limit");
                }
            }
        }

        info!(count = limits.len(), "loaded enchantment limits");
        Ok(Self { limits, backend })
    }

    /// A store with no persistence beyond the process
    pub fn in_memory() -> Self {
        Self {
            limits: HashMap::new(),
            backend: Box::new(MemoryStore::new()),
        }
    }

    /// Configured limit, `Unlimited` when absent
    pub fn get(&self, id: &EnchantmentId) -> Limit {
        self.limits
            .get(id)
            .copied()
            .map(Limit::Max)
            .unwrap_or(Limit::Unlimited)
    }

    /// Overwrite a limit; `Unlimited` clears the entry
    ///
    /// # Errors
    ///
    /// Returns the backing store's error unchanged. The in-memory value is
    /// left exactly as it was before the call.
    pub fn set(&mut self, id: &EnchantmentId, limit: Limit) -> Result<(), PersistenceError> {
        let key = limit_key(id.as_str());
        let value = match limit {
            Limit::Unlimited => None,
            Limit::Max(n) => Some(i64::from(n)),
        };

        if let Err(e) = self.backend.save(&key, value) {
            warn!(enchantment = %id, error = %e, "limit write failed, keeping previous value");
            return Err(e);
        }

        match limit {
            Limit::Unlimited => {
                self.limits.remove(id);
            }
            Limit::Max(n) => {
                self.limits.insert(id.clone(), n);
            }
        }
        info!(enchantment = %id, limit = %limit, "enchantment limit updated");
        Ok(())
    }

    /// All configured limits, sorted by identifier
    pub fn entries(&self) -> Vec<(EnchantmentId, u32)> {
        let mut entries: Vec<_> = self
            .limits
            .iter()
            .map(|(id, limit)| (id.clone(), *limit))
            .collect();
        entries.sort();
        entries
    }

    /// Number of configured limits
    pub fn count(&self) -> usize {
        self.limits.len()
    }
}

impl Default for LimitStore {
    fn default() -> Self {
        Self::in_memory()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sharpness() -> EnchantmentId {
        EnchantmentId::sharpness()
    }

    #[test]
    fn test_limit_from_raw() {
        assert_eq!(Limit::from_raw(-1), Some(Limit::Unlimited));
        assert_eq!(Limit::from_raw(0), Some(Limit::Max(0)));
        assert_eq!(Limit::from_raw(3), Some(Limit::Max(3)));
        assert_eq!(Limit::from_raw(2_147_483_647), Some(Limit::Max(2_147_483_647)));
        assert_eq!(Limit::from_raw(-7), None);
        assert_eq!(Limit::from_raw(2_147_483_648), None);
    }

    #[test]
    fn test_limit_display() {
        assert_eq!(Limit::Unlimited.to_string(), "None");
        assert_eq!(Limit::Max(4).to_string(), "4");
    }

    #[test]
    fn test_absent_is_unlimited() {
        let store = LimitStore::in_memory();
        assert_eq!(store.get(&sharpness()), Limit::Unlimited);
        assert_eq!(store.count(), 0);
    }

    #[test]
    fn test_set_and_clear() {
        let mut store = LimitStore::in_memory();
        store.set(&sharpness(), Limit::Max(2)).unwrap();
        assert_eq!(store.get(&sharpness()), Limit::Max(2));

        store.set(&sharpness(), Limit::Max(0)).unwrap();
        assert_eq!(store.get(&sharpness()), Limit::Max(0));

        store.set(&sharpness(), Limit::Unlimited).unwrap();
        assert_eq!(store.get(&sharpness()), Limit::Unlimited);
        assert_eq!(store.count(), 0);
    }

    #[test]
    fn test_load_filters_and_skips_negative() {
        let backend = MemoryStore::with_values([
            ("enchantment-limits.sharpness", 2),
            ("enchantment-limits.mending", -1),
            ("enchantment-limits.looting", -5),
            ("enchantment-limits.power", 1 << 40),
            ("unrelated", 9),
        ]);
        let store = LimitStore::load(Box::new(backend)).unwrap();
        assert_eq!(store.get(&sharpness()), Limit::Max(2));
        assert_eq!(store.get(&EnchantmentId::new("mending")), Limit::Unlimited);
        assert_eq!(store.get(&EnchantmentId::new("looting")), Limit::Unlimited);
        assert_eq!(store.get(&EnchantmentId::new("power")), Limit::Unlimited);
        assert_eq!(store.count(), 1);
    }

    #[test]
    fn test_failed_write_keeps_memory() {
        let backend = MemoryStore::with_values([("enchantment-limits.sharpness", 3)]);
        let mut store = LimitStore::load(Box::new(backend.clone())).unwrap();

        backend.set_reject_writes(true);
        assert!(store.set(&sharpness(), Limit::Max(1)).is_err());
        assert!(store.set(&sharpness(), Limit::Unlimited).is_err());

        assert_eq!(store.get(&sharpness()), Limit::Max(3));
        assert_eq!(backend.value("enchantment-limits.sharpness"), Some(3));
    }

    #[test]
    fn test_set_persists_flat_key() {
        let backend = MemoryStore::new();
        let mut store = LimitStore::load(Box::new(backend.clone())).unwrap();
        store.set(&EnchantmentId::new("fire_aspect"), Limit::Max(1)).unwrap();
        assert_eq!(backend.value("enchantment-limits.fire_aspect"), Some(1));

        store.set(&EnchantmentId::new("fire_aspect"), Limit::Unlimited).unwrap();
        assert_eq!(backend.value("enchantment-limits.fire_aspect"), None);
    }

    #[test]
    fn test_entries_sorted() {
        let mut store = LimitStore::in_memory();
        store.set(&EnchantmentId::new("unbreaking"), Limit::Max(1)).unwrap();
        store.set(&EnchantmentId::new("fortune"), Limit::Max(2)).unwrap();
        let ids: Vec<_> = store.entries().into_iter().map(|(id, _)| id.to_string()).collect();
        assert_eq!(ids, vec!["fortune", "unbreaking"]);
    }
}

//! Selection Sessions
//!
//! Per-administrator state of the two-step configuration menu, kept as an
//! explicit state table:
//!
//! ```text
//!   Idle ──pick(id)──▶ Choosing(id) ──confirm(level)──▶ Idle
//!    ▲                  │    ▲   │
//!    └────abandon───────┘    └───┘ pick(other)
//! ```
//!
//! Sessions of different administrators never affect each other.

use std::collections::HashMap;

use tracing::debug;

use crate::catalog::EnchantmentId;
use crate::error::PersistenceError;
use crate::host::AgentId;
use crate::limits::{Limit, LimitStore};

/// State of one administrator's session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionState {
    Idle,
    Choosing(EnchantmentId),
}

/// Result of a level confirmation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Confirmation {
    /// The limit was written and the session returned to `Idle`
    Applied {
        enchantment: EnchantmentId,
        limit: u32,
    },
    /// No matching `Choosing` state; nothing changed
    Stale,
}

/// Session table keyed by administrator
#[derive(Debug, Default)]
pub struct SelectionSessions {
    choosing: HashMap<AgentId, EnchantmentId>,
}

impl SelectionSessions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self, admin: AgentId) -> SelectionState {
        match self.choosing.get(&admin) {
            Some(id) => SelectionState::Choosing(id.clone()),
            None => SelectionState::Idle,
        }
    }

    /// Idle or Choosing(*) → Choosing(id)
    pub fn pick_enchantment(&mut self, admin: AgentId, id: EnchantmentId) {
        debug!(admin = %admin, enchantment = %id, "enchantment picked");
        self.choosing.insert(admin, id);
    }

    /// Choosing(id) → Idle, writing `level` as the limit for `id`
    ///
    /// An `Idle` session yields [`Confirmation::Stale`] without touching the
    /// store. A failed write leaves the session in `Choosing(id)`.
    pub fn confirm_level(
        &mut self,
        admin: AgentId,
        level: u32,
        limits: &mut LimitStore,
    ) -> Result<Confirmation, PersistenceError> {
        let Some(id) = self.choosing.get(&admin).cloned() else {
            debug!(admin = %admin, level, "ignoring confirmation without selection");
            return Ok(Confirmation::Stale);
        };
        self.apply(admin, id, level, limits)
    }

    /// Like [`confirm_level`](Self::confirm_level), but only when the live
    /// selection is `expected`; confirmations from an outdated picker are stale
    pub fn confirm_level_for(
        &mut self,
        admin: AgentId,
        expected: &EnchantmentId,
        level: u32,
        limits: &mut LimitStore,
    ) -> Result<Confirmation, PersistenceError> {
        match self.choosing.get(&admin).cloned() {
            Some(id) if &id == expected => self.apply(admin, id, level, limits),
            current => {
                debug!(
                    admin = %admin,
                    expected = %expected,
                    current = ?current,
                    "ignoring confirmation for outdated selection"
                );
                Ok(Confirmation::Stale)
            }
        }
    }

    fn apply(
        &mut self,
        admin: AgentId,
        id: EnchantmentId,
        level: u32,
        limits: &mut LimitStore,
    ) -> Result<Confirmation, PersistenceError> {
        limits.set(&id, Limit::Max(level))?;
        self.choosing.remove(&admin);
        Ok(Confirmation::Applied {
            enchantment: id,
            limit: level,
        })
    }

    /// Any → Idle; returns whether a selection was dropped
    pub fn abandon(&mut self, admin: AgentId) -> bool {
        let dropped = self.choosing.remove(&admin);
        if let Some(id) = &dropped {
            debug!(admin = %admin, enchantment = %id, "selection abandoned");
        }
        dropped.is_some()
    }

    /// Number of administrators currently choosing
    pub fn active(&self) -> usize {
        self.choosing.len()
    }
}

//! Enchantment Limit Enforcement
//!
//! Configured per-enchantment caps and the logic that applies them to items.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                    Inventory Scanner                      │
//! │      storage slots → armor slots → off-hand slot          │
//! ├──────────────────────────────────────────────────────────┤
//! │                      Rule Engine                          │
//! │   1. no Sharpness on axes   2. cap / remove over limit    │
//! ├──────────────────────────────────────────────────────────┤
//! │   Limit Store (in-memory)  ──save──▶  Config Store (file) │
//! └──────────────────────────────────────────────────────────┘
//! ```

pub mod persist;
pub mod rules;
pub mod scanner;
pub mod store;

#[cfg(test)]
mod proptests;

pub use persist::{limit_key, ConfigStore, MemoryStore, TomlFileStore};
pub use rules::{evaluate, Evaluation, Notification};
pub use scanner::{scan, ScanReport};
pub use store::{Limit, LimitStore};

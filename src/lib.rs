//! EnchLimit Library
//!
//! Per-enchantment level caps for items held by players, plus the two-step
//! administrator menu used to configure them.

pub mod catalog;
pub mod command;
pub mod config;
pub mod console;
pub mod error;
pub mod host;
pub mod item;
pub mod limits;
pub mod logging;
pub mod menu;
pub mod plugin;

pub use catalog::{Catalog, Enchantment, EnchantmentId, VanillaCatalog};
pub use error::{LimitError, PersistenceError};
pub use host::{AgentId, CloseReason, CommandSender, Player};
pub use limits::{Limit, LimitStore};
pub use plugin::Plugin;

//! Rule Engine
//!
//! Pure evaluation of one item's enchantments against the configured limits.
//! Two rules run in a fixed order:
//!
//! 1. Sharpness is never allowed on an axe, whatever its configured limit.
//! 2. Any enchantment above its limit is capped at the limit, or removed when
//!    the limit is `0`.
//!
//! The engine never touches the item itself; callers apply the corrected set.

use std::fmt;

use crate::catalog::{Catalog, EnchantmentId};
use crate::item::{ItemCategory, ItemEnchantmentSet};

use super::store::{Limit, LimitStore};

/// Something the item's holder must be told about
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// Sharpness was stripped from an axe
    SharpnessOnAxeRemoved,
    /// An enchantment exceeded its limit; `limit == 0` means it was removed
    EnchantmentCapped {
        enchantment: EnchantmentId,
        limit: u32,
    },
}

impl Notification {
    /// Message shown to the affected player
    pub fn message(&self, catalog: &dyn Catalog) -> String {
        match self {
            Notification::SharpnessOnAxeRemoved => "You cannot have Sharpness on an axe!".to_string(),
            Notification::EnchantmentCapped { enchantment, limit } => format!(
                "Enchantment {} was capped at level {}.",
                catalog.display_name(enchantment),
                limit
            ),
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notification::SharpnessOnAxeRemoved => write!(f, "sharpness removed from axe"),
            Notification::EnchantmentCapped { enchantment, limit } => {
                write!(f, "{} capped at {}", enchantment, limit)
            }
        }
    }
}

/// Output of one evaluation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    pub corrected: ItemEnchantmentSet,
    pub notifications: Vec<Notification>,
}

impl Evaluation {
    /// Whether the corrected set differs from the input
    pub fn changed(&self) -> bool {
        !self.notifications.is_empty()
    }
}

/// Compute the corrected enchantment set for one item
pub fn evaluate(
    category: ItemCategory,
    enchantments: &ItemEnchantmentSet,
    limits: &LimitStore,
) -> Evaluation {
    let mut corrected = enchantments.clone();
    let mut notifications = Vec::new();

    let sharpness = EnchantmentId::sharpness();
    if category == ItemCategory::Axe && corrected.remove(&sharpness).is_some() {
        notifications.push(Notification::SharpnessOnAxeRemoved);
    }

    let over_limit: Vec<(EnchantmentId, u32)> = corrected
        .iter()
        .filter_map(|(id, level)| match limits.get(id) {
            Limit::Max(limit) if level > limit => Some((id.clone(), limit)),
            _ => None,
        })
        .collect();

    for (id, limit) in over_limit {
        if limit > 0 {
            corrected.insert(id.clone(), limit);
        } else {
            corrected.remove(&id);
        }
        notifications.push(Notification::EnchantmentCapped {
            enchantment: id,
            limit,
        });
    }

    Evaluation {
        corrected,
        notifications,
    }
}

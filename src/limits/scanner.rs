//! Inventory Scanner
//!
//! Applies the rule engine to every item a player holds: primary storage in
//! slot order, then armor, then the off-hand.

use tracing::debug;

use super::rules::{evaluate, Notification};
use super::store::LimitStore;
use crate::catalog::Catalog;
use crate::host::Player;
use crate::item::SlotRef;

/// What a scan did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanReport {
    /// Slots whose enchantments were corrected, in visitation order
    pub changed_slots: Vec<SlotRef>,

    /// Every notification, in visitation order
    pub notifications: Vec<Notification>,
}

impl ScanReport {
    pub fn changed(&self) -> bool {
        !self.changed_slots.is_empty()
    }
}

/// Correct every item a player holds
///
/// Notifications are delivered as messages in slot order. When at least one
/// slot changed the client inventory is refreshed once, after all slots.
pub fn scan<P: Player + ?Sized>(
    player: &mut P,
    catalog: &dyn Catalog,
    limits: &LimitStore,
) -> ScanReport {
    let mut report = ScanReport::default();
    let inventory = player.inventory_mut();

    for slot in inventory.slots() {
        let Some(item) = inventory.get_mut(slot) else {
            continue;
        };
        let evaluation = evaluate(item.category(), &item.enchantments, limits);
        if !evaluation.changed() {
            continue;
        }
        item.enchantments = evaluation.corrected;
        report.changed_slots.push(slot);
        report.notifications.extend(evaluation.notifications);
    }

    for notification in &report.notifications {
        player.send_message(&notification.message(catalog));
    }

    if report.changed() {
        player.update_inventory();
    }

    debug!(
        player = %player.name(),
        changed = report.changed_slots.len(),
        notifications = report.notifications.len(),
        "inventory scanned"
    );
    report
}

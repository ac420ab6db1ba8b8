//! Menu Views
//!
//! Structured descriptions of the two picker screens. Hosts render them
//! however they like and hand the clicked [`MenuEntry`] back; the entry itself
//! carries what was chosen, so nothing is ever parsed out of a label.

use tracing::warn;

use crate::catalog::{to_roman, Catalog, Enchantment, EnchantmentId};
use crate::limits::LimitStore;

/// Title of the enchantment picker
pub const ENCHANTMENT_PICKER_TITLE: &str = "Enchantment Limits";

/// Title prefix of the level picker; the enchantment name follows
pub const LEVEL_PICKER_TITLE_PREFIX: &str = "Select Level for ";

/// Slots in the enchantment picker
pub const ENCHANTMENT_PICKER_SIZE: usize = 54;

/// Slots in the level picker: level 0 plus levels 1..=8
pub const LEVEL_PICKER_SIZE: usize = 9;

/// Highest level the level picker offers
pub const MAX_PICKER_LEVEL: u32 = (LEVEL_PICKER_SIZE - 1) as u32;

/// Which of the two screens a view is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuKind {
    EnchantmentPicker,
    LevelPicker,
}

impl MenuKind {
    /// Recognize one of our screens by its title
    pub fn from_title(title: &str) -> Option<Self> {
        if title == ENCHANTMENT_PICKER_TITLE {
            Some(MenuKind::EnchantmentPicker)
        } else if title.starts_with(LEVEL_PICKER_TITLE_PREFIX) {
            Some(MenuKind::LevelPicker)
        } else {
            None
        }
    }
}

/// What selecting an entry does
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryAction {
    /// Start configuring this enchantment
    PickEnchantment(EnchantmentId),
    /// Set the limit of `enchantment` to `level`
    SetLevel {
        enchantment: EnchantmentId,
        level: u32,
    },
}

/// One selectable entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    pub slot: usize,
    /// Item used as the entry's icon
    pub icon: &'static str,
    pub label: String,
    pub lore: Vec<String>,
    pub action: EntryAction,
}

/// A rendered screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuView {
    pub kind: MenuKind,
    pub title: String,
    pub size: usize,
    pub entries: Vec<MenuEntry>,
}

impl MenuView {
    /// Entry at a slot, if the slot holds one
    pub fn entry_at(&self, slot: usize) -> Option<&MenuEntry> {
        self.entries.iter().find(|e| e.slot == slot)
    }
}

/// One entry per catalog enchantment, annotated with its current limit
pub fn enchantment_picker(catalog: &dyn Catalog, limits: &LimitStore) -> MenuView {
    let enchantments = catalog.enchantments();
    if enchantments.len() > ENCHANTMENT_PICKER_SIZE {
        warn!(
            count = enchantments.len(),
            shown = ENCHANTMENT_PICKER_SIZE,
            "catalog larger than the picker; extra enchantments are only reachable by command"
        );
    }

    let entries = enchantments
        .iter()
        .take(ENCHANTMENT_PICKER_SIZE)
        .enumerate()
        .map(|(slot, enchantment)| MenuEntry {
            slot,
            icon: "ENCHANTED_BOOK",
            label: enchantment.display_name.clone(),
            lore: vec![format!("Current Limit: {}", limits.get(&enchantment.id))],
            action: EntryAction::PickEnchantment(enchantment.id.clone()),
        })
        .collect();

    MenuView {
        kind: MenuKind::EnchantmentPicker,
        title: ENCHANTMENT_PICKER_TITLE.to_string(),
        size: ENCHANTMENT_PICKER_SIZE,
        entries,
    }
}

/// Level 0 plus levels `1..=min(max_level, 8)`
pub fn level_picker(enchantment: &Enchantment) -> MenuView {
    let top = enchantment.max_level.min(MAX_PICKER_LEVEL);
    let entries = (0..=top)
        .map(|level| {
            let (icon, label) = if level == 0 {
                ("RED_STAINED_GLASS_PANE", "Remove Enchantment".to_string())
            } else {
                (
                    "LIME_STAINED_GLASS_PANE",
                    format!("{} {}", enchantment.display_name, to_roman(level)),
                )
            };
            MenuEntry {
                slot: level as usize,
                icon,
                label,
                lore: vec![format!("Set limit to {}", level)],
                action: EntryAction::SetLevel {
                    enchantment: enchantment.id.clone(),
                    level,
                },
            }
        })
        .collect();

    MenuView {
        kind: MenuKind::LevelPicker,
        title: format!("{}{}", LEVEL_PICKER_TITLE_PREFIX, enchantment.display_name),
        size: LEVEL_PICKER_SIZE,
        entries,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{FixedCatalog, VanillaCatalog};
    use crate::limits::Limit;

    #[test]
    fn test_titles_recognized() {
        assert_eq!(
            MenuKind::from_title("Enchantment Limits"),
            Some(MenuKind::EnchantmentPicker)
        );
        assert_eq!(
            MenuKind::from_title("Select Level for Sharpness"),
            Some(MenuKind::LevelPicker)
        );
        assert_eq!(MenuKind::from_title("Chest"), None);
        assert_eq!(MenuKind::from_title("Enchantment Limits 2"), None);
    }

    #[test]
    fn test_enchantment_picker_annotations() {
        let catalog = VanillaCatalog::new();
        let mut limits = LimitStore::in_memory();
        limits.set(&EnchantmentId::sharpness(), Limit::Max(2)).unwrap();

        let view = enchantment_picker(&catalog, &limits);
        assert_eq!(view.entries.len(), catalog.enchantments().len());
        assert_eq!(view.entries[0].label, "Protection");
        assert_eq!(view.entries[0].lore, vec!["Current Limit: None"]);

        let sharpness = view
            .entries
            .iter()
            .find(|e| e.action == EntryAction::PickEnchantment(EnchantmentId::sharpness()))
            .unwrap();
        assert_eq!(sharpness.lore, vec!["Current Limit: 2"]);
    }

    #[test]
    fn test_enchantment_picker_truncates_large_catalog() {
        let entries = (0..60)
            .map(|i| Enchantment::new(&format!("custom_{}", i), 1))
            .collect();
        let catalog = FixedCatalog::new(entries);
        let view = enchantment_picker(&catalog, &LimitStore::in_memory());
        assert_eq!(view.entries.len(), ENCHANTMENT_PICKER_SIZE);
    }

    #[test]
    fn test_level_picker_small_enchantment() {
        let view = level_picker(&Enchantment::new("fire_aspect", 2));
        assert_eq!(view.title, "Select Level for Fire Aspect");
        assert_eq!(view.entries.len(), 3);
        assert_eq!(view.entries[0].label, "Remove Enchantment");
        assert_eq!(view.entries[2].label, "Fire Aspect II");
        assert_eq!(view.entries[2].lore, vec!["Set limit to 2"]);
        assert_eq!(
            view.entry_at(1).unwrap().action,
            EntryAction::SetLevel {
                enchantment: EnchantmentId::new("fire_aspect"),
                level: 1
            }
        );
    }

    #[test]
    fn test_level_picker_caps_at_eight() {
        let view = level_picker(&Enchantment::new("custom_power", 10));
        assert_eq!(view.entries.len(), LEVEL_PICKER_SIZE);
        let top = view.entries.last().unwrap();
        assert_eq!(top.slot, 8);
        assert_eq!(top.label, "Custom Power VIII");
    }
}

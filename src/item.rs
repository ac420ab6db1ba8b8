//! Items, enchantment sets and player inventories

use serde::{Deserialize, Serialize};

use crate::catalog::EnchantmentId;

/// Number of primary inventory slots
pub const STORAGE_SLOTS: usize = 36;

/// Number of armor slots (boots, leggings, chestplate, helmet)
pub const ARMOR_SLOTS: usize = 4;

/// Enchantments attached to one item, in insertion order
///
/// Serialized as a list of `[id, level]` pairs. Deserialization goes through
/// [`ItemEnchantmentSet::insert`], so a repeated id keeps one entry with the
/// last level.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "Vec<(EnchantmentId, u32)>",
    into = "Vec<(EnchantmentId, u32)>"
)]
pub struct ItemEnchantmentSet {
    entries: Vec<(EnchantmentId, u32)>,
}

impl ItemEnchantmentSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an enchantment; a replaced entry keeps its position
    pub fn insert(&mut self, id: EnchantmentId, level: u32) {
        match self.entries.iter_mut().find(|(existing, _)| *existing == id) {
            Some(entry) => entry.1 = level,
            None => self.entries.push((id, level)),
        }
    }

    /// Remove an enchantment, returning its level
    pub fn remove(&mut self, id: &EnchantmentId) -> Option<u32> {
        let index = self.entries.iter().position(|(existing, _)| existing == id)?;
        Some(self.entries.remove(index).1)
    }

    pub fn level(&self, id: &EnchantmentId) -> Option<u32> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == id)
            .map(|(_, level)| *level)
    }

    pub fn contains(&self, id: &EnchantmentId) -> bool {
        self.level(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&EnchantmentId, u32)> {
        self.entries.iter().map(|(id, level)| (id, *level))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<I: Into<EnchantmentId>> FromIterator<(I, u32)> for ItemEnchantmentSet {
    fn from_iter<T: IntoIterator<Item = (I, u32)>>(iter: T) -> Self {
        let mut set = Self::new();
        for (id, level) in iter {
            set.insert(id.into(), level);
        }
        set
    }
}

impl From<Vec<(EnchantmentId, u32)>> for ItemEnchantmentSet {
    fn from(entries: Vec<(EnchantmentId, u32)>) -> Self {
        entries.into_iter().collect()
    }
}

impl From<ItemEnchantmentSet> for Vec<(EnchantmentId, u32)> {
    fn from(set: ItemEnchantmentSet) -> Self {
        set.entries
    }
}

/// Item category as far as the rules are concerned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemCategory {
    Axe,
    Other,
}

impl ItemCategory {
    /// Classify a material name such as `DIAMOND_AXE`
    pub fn of(material: &str) -> Self {
        if material.to_uppercase().ends_with("_AXE") {
            ItemCategory::Axe
        } else {
            ItemCategory::Other
        }
    }
}

/// One item instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStack {
    /// Material name, e.g. `DIAMOND_SWORD`
    pub material: String,

    #[serde(default, skip_serializing_if = "ItemEnchantmentSet::is_empty")]
    pub enchantments: ItemEnchantmentSet,
}

impl ItemStack {
    pub fn new(material: impl Into<String>) -> Self {
        Self {
            material: material.into(),
            enchantments: ItemEnchantmentSet::new(),
        }
    }

    /// Builder-style enchantment helper
    pub fn with_enchantment(mut self, id: impl Into<EnchantmentId>, level: u32) -> Self {
        self.enchantments.insert(id.into(), level);
        self
    }

    pub fn category(&self) -> ItemCategory {
        ItemCategory::of(&self.material)
    }
}

/// Where an inventory slot lives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotRef {
    Storage(usize),
    Armor(usize),
    OffHand,
}

/// A player's inventory: primary storage, armor and off-hand
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerInventory {
    #[serde(default = "empty_storage")]
    pub storage: Vec<Option<ItemStack>>,

    #[serde(default = "empty_armor")]
    pub armor: Vec<Option<ItemStack>>,

    #[serde(default)]
    pub off_hand: Option<ItemStack>,
}

fn empty_storage() -> Vec<Option<ItemStack>> {
    vec![None; STORAGE_SLOTS]
}

fn empty_armor() -> Vec<Option<ItemStack>> {
    vec![None; ARMOR_SLOTS]
}

impl Default for PlayerInventory {
    fn default() -> Self {
        Self {
            storage: empty_storage(),
            armor: empty_armor(),
            off_hand: None,
        }
    }
}

impl PlayerInventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every slot in visitation order: storage by index, then armor, then off-hand
    pub fn slots(&self) -> Vec<SlotRef> {
        (0..self.storage.len())
            .map(SlotRef::Storage)
            .chain((0..self.armor.len()).map(SlotRef::Armor))
            .chain(std::iter::once(SlotRef::OffHand))
            .collect()
    }

    pub fn get(&self, slot: SlotRef) -> Option<&ItemStack> {
        match slot {
            SlotRef::Storage(i) => self.storage.get(i).and_then(Option::as_ref),
            SlotRef::Armor(i) => self.armor.get(i).and_then(Option::as_ref),
            SlotRef::OffHand => self.off_hand.as_ref(),
        }
    }

    pub fn get_mut(&mut self, slot: SlotRef) -> Option<&mut ItemStack> {
        match slot {
            SlotRef::Storage(i) => self.storage.get_mut(i).and_then(Option::as_mut),
            SlotRef::Armor(i) => self.armor.get_mut(i).and_then(Option::as_mut),
            SlotRef::OffHand => self.off_hand.as_mut(),
        }
    }

    /// Place an item; out-of-range storage or armor indices are ignored
    pub fn set(&mut self, slot: SlotRef, item: Option<ItemStack>) {
        match slot {
            SlotRef::Storage(i) => {
                if let Some(s) = self.storage.get_mut(i) {
                    *s = item;
                }
            }
            SlotRef::Armor(i) => {
                if let Some(s) = self.armor.get_mut(i) {
                    *s = item;
                }
            }
            SlotRef::OffHand => self.off_hand = item,
        }
    }
}

//! Enchantment Catalog
//!
//! The fixed, enumerable set of enchantment types known to the environment.
//! Rule evaluation and the menus only ever see the catalog through the
//! [`Catalog`] trait, so tests can run against a small synthetic catalog.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Key of the enchantment that may never appear on an axe
pub const SHARPNESS: &str = "sharpness";

/// Stable identifier of an enchantment type (its lowercase key)
#[derive(Debug, Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(from = "String")]
pub struct EnchantmentId(String);

impl EnchantmentId {
    /// Create an identifier from a key; keys are normalized to lowercase
    pub fn new(key: impl AsRef<str>) -> Self {
        Self(key.as_ref().trim().to_lowercase())
    }

    /// The Sharpness identifier
    pub fn sharpness() -> Self {
        Self::new(SHARPNESS)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EnchantmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EnchantmentId {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl From<String> for EnchantmentId {
    fn from(key: String) -> Self {
        Self::new(key)
    }
}

/// One catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enchantment {
    /// Stable identifier
    pub id: EnchantmentId,

    /// Highest level the environment normally grants
    pub max_level: u32,

    /// Human-readable name shown in menus and messages
    pub display_name: String,
}

impl Enchantment {
    /// Create an entry whose display name is derived from the key
    pub fn new(key: &str, max_level: u32) -> Self {
        Self {
            id: EnchantmentId::new(key),
            max_level,
            display_name: display_name_for(key),
        }
    }
}

/// Capability interface over the environment's enchantment registry
pub trait Catalog {
    /// All enchantments, in the fixed enumeration order
    fn enchantments(&self) -> &[Enchantment];

    /// Look up an enchantment by identifier
    fn get(&self, id: &EnchantmentId) -> Option<&Enchantment> {
        self.enchantments().iter().find(|e| &e.id == id)
    }

    /// Resolve a user-typed name against keys and display names
    ///
    /// Matching is case-insensitive and treats spaces and underscores alike,
    /// so `fire_aspect`, `Fire Aspect` and `FIRE ASPECT` all resolve.
    fn find_by_name(&self, name: &str) -> Option<&Enchantment> {
        let wanted = normalize_name(name);
        if wanted.is_empty() {
            return None;
        }
        self.enchantments().iter().find(|e| {
            normalize_name(e.id.as_str()) == wanted || normalize_name(&e.display_name) == wanted
        })
    }

    /// Display name for an identifier, falling back to formatting the key
    fn display_name(&self, id: &EnchantmentId) -> String {
        self.get(id)
            .map(|e| e.display_name.clone())
            .unwrap_or_else(|| display_name_for(id.as_str()))
    }
}

fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase().replace(' ', "_")
}

/// Turn a key such as `fire_aspect` into `Fire Aspect`
pub fn display_name_for(key: &str) -> String {
    key.split(['_', ' '])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

const ROMAN: [&str; 16] = [
    "", "I", "II", "III", "IV", "V", "VI", "VII", "VIII", "IX", "X", "XI", "XII", "XIII", "XIV",
    "XV",
];

/// Roman numeral for menu labels; `0` and anything above XV print as digits
pub fn to_roman(level: u32) -> String {
    match level {
        0 => "0".to_string(),
        n if (n as usize) < ROMAN.len() => ROMAN[n as usize].to_string(),
        n => n.to_string(),
    }
}

/// Standard enchantments in registry order: (key, max level)
const VANILLA: &[(&str, u32)] = &[
    ("protection", 4),
    ("fire_protection", 4),
    ("feather_falling", 4),
    ("blast_protection", 4),
    ("projectile_protection", 4),
    ("respiration", 3),
    ("aqua_affinity", 1),
    ("thorns", 3),
    ("depth_strider", 3),
    ("frost_walker", 2),
    ("binding_curse", 1),
    ("soul_speed", 3),
    ("swift_sneak", 3),
    ("sharpness", 5),
    ("smite", 5),
    ("bane_of_arthropods", 5),
    ("knockback", 2),
    ("fire_aspect", 2),
    ("looting", 3),
    ("sweeping_edge", 3),
    ("efficiency", 5),
    ("silk_touch", 1),
    ("unbreaking", 3),
    ("fortune", 3),
    ("power", 5),
    ("punch", 2),
    ("flame", 1),
    ("infinity", 1),
    ("luck_of_the_sea", 3),
    ("lure", 3),
    ("loyalty", 3),
    ("impaling", 5),
    ("riptide", 3),
    ("channeling", 1),
    ("multishot", 1),
    ("quick_charge", 3),
    ("piercing", 4),
    ("density", 5),
    ("breach", 4),
    ("wind_burst", 3),
    ("mending", 1),
    ("vanishing_curse", 1),
];

/// The standard enchantment registry
#[derive(Debug, Clone)]
pub struct VanillaCatalog {
    entries: Vec<Enchantment>,
}

impl VanillaCatalog {
    pub fn new() -> Self {
        Self {
            entries: VANILLA
                .iter()
                .map(|(key, max)| Enchantment::new(key, *max))
                .collect(),
        }
    }
}

impl Default for VanillaCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl Catalog for VanillaCatalog {
    fn enchantments(&self) -> &[Enchantment] {
        &self.entries
    }
}

/// A catalog built from an explicit list, used by embedders and tests
#[derive(Debug, Clone, Default)]
pub struct FixedCatalog {
    entries: Vec<Enchantment>,
}

impl FixedCatalog {
    pub fn new(entries: Vec<Enchantment>) -> Self {
        Self { entries }
    }
}

impl Catalog for FixedCatalog {
    fn enchantments(&self) -> &[Enchantment] {
        &self.entries
    }
}

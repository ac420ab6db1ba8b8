//! Configuration Menu
//!
//! Two-step picker for administrators: choose an enchantment, then choose the
//! level to cap it at.
//!
//! # Flow
//!
//! ```text
//! /enchlimit gui ──▶ Enchantment Limits ──click──▶ Select Level for <Name>
//!                                                        │
//!                                        click level ────┘──▶ limit written
//! ```

pub mod controller;
pub mod session;
pub mod view;

pub use controller::{ClickOutcome, MenuController};
pub use session::{Confirmation, SelectionSessions, SelectionState};
pub use view::{
    enchantment_picker, level_picker, EntryAction, MenuEntry, MenuKind, MenuView,
    ENCHANTMENT_PICKER_TITLE, LEVEL_PICKER_TITLE_PREFIX,
};

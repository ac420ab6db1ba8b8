//! Menu Controller
//!
//! Opens the pickers and turns clicks and closes into session transitions and
//! limit writes.

use tracing::error;

use super::session::{Confirmation, SelectionSessions, SelectionState};
use super::view::{enchantment_picker, level_picker, EntryAction, MenuEntry, MenuKind};
use crate::catalog::{Catalog, EnchantmentId};
use crate::error::LimitError;
use crate::host::{AgentId, CloseReason, Player};
use crate::limits::LimitStore;

/// What the host should do with a click event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Not one of our menus; let the click through
    Ignored,
    /// One of our menus; cancel the click so nothing is taken out
    Cancelled,
}

/// Drives the enchantment picker and level picker
#[derive(Debug, Default)]
pub struct MenuController {
    sessions: SelectionSessions,
}

impl MenuController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self, admin: AgentId) -> SelectionState {
        self.sessions.state(admin)
    }

    /// Show the enchantment picker
    pub fn open(&mut self, player: &mut dyn Player, catalog: &dyn Catalog, limits: &LimitStore) {
        player.open_menu(enchantment_picker(catalog, limits));
    }

    /// Handle a click in any menu
    pub fn on_click(
        &mut self,
        player: &mut dyn Player,
        title: &str,
        entry: Option<&MenuEntry>,
        catalog: &dyn Catalog,
        limits: &mut LimitStore,
    ) -> ClickOutcome {
        let Some(kind) = MenuKind::from_title(title) else {
            return ClickOutcome::Ignored;
        };
        let Some(entry) = entry else {
            return ClickOutcome::Cancelled;
        };

        let result = match (kind, &entry.action) {
            (MenuKind::EnchantmentPicker, EntryAction::PickEnchantment(id)) => {
                self.pick(player, id, catalog);
                Ok(())
            }
            (MenuKind::LevelPicker, EntryAction::SetLevel { enchantment, level }) => {
                self.confirm(player, enchantment, *level, catalog, limits)
            }
            _ => Ok(()),
        };

        if let Err(e) = result {
            if let LimitError::Persistence(cause) = &e {
                error!(player = %player.name(), error = %cause, "failed to persist limit from menu");
            }
            if e.is_user_visible() {
                player.send_message(&e.to_string());
            }
        }
        ClickOutcome::Cancelled
    }

    /// Handle a menu closing; dismissing either picker abandons the selection
    pub fn on_close(&mut self, admin: AgentId, title: &str, reason: CloseReason) {
        if reason == CloseReason::Replaced || MenuKind::from_title(title).is_none() {
            return;
        }
        self.sessions.abandon(admin);
    }

    fn pick(&mut self, player: &mut dyn Player, id: &EnchantmentId, catalog: &dyn Catalog) {
        let Some(enchantment) = catalog.get(id) else {
            return;
        };
        self.sessions.pick_enchantment(player.id(), enchantment.id.clone());
        player.open_menu(level_picker(enchantment));
    }

    fn confirm(
        &mut self,
        player: &mut dyn Player,
        enchantment: &EnchantmentId,
        level: u32,
        catalog: &dyn Catalog,
        limits: &mut LimitStore,
    ) -> Result<(), LimitError> {
        match self
            .sessions
            .confirm_level_for(player.id(), enchantment, level, limits)?
        {
            Confirmation::Applied { enchantment, limit } => {
                player.send_message(&format!(
                    "Enchantment limit for {} set to {}.",
                    catalog.display_name(&enchantment),
                    limit
                ));
                player.close_menu();
                Ok(())
            }
            Confirmation::Stale => Err(LimitError::StaleSelection),
        }
    }
}

//! Plugin Façade
//!
//! Single entry point for host events. Owns the catalog, the limit store, the
//! menu sessions and the text command, and routes each event to them.

use tracing::info;

use crate::catalog::Catalog;
use crate::command::{CommandOutcome, LimitCommand};
use crate::config::Config;
use crate::error::{LimitError, PersistenceError};
use crate::host::{CloseReason, CommandSender, Player};
use crate::limits::{scan, ConfigStore, LimitStore, ScanReport};
use crate::menu::{ClickOutcome, MenuController, MenuEntry};

/// Loaded limit enforcement, ready to receive events
pub struct Plugin {
    catalog: Box<dyn Catalog>,
    limits: LimitStore,
    menus: MenuController,
    command: LimitCommand,
}

impl Plugin {
    /// Load the persisted limits and enable the plugin
    pub fn load(
        config: &Config,
        catalog: Box<dyn Catalog>,
        store: Box<dyn ConfigStore>,
    ) -> Result<Self, PersistenceError> {
        let limits = LimitStore::load(store)?;
        let command = LimitCommand::from(&config.command);
        info!(
            limits = limits.count(),
            enchantments = catalog.enchantments().len(),
            command = %command.label(),
            "enchantment limits enabled"
        );
        Ok(Self {
            catalog,
            limits,
            menus: MenuController::new(),
            command,
        })
    }

    pub fn catalog(&self) -> &dyn Catalog {
        self.catalog.as_ref()
    }

    pub fn limits(&self) -> &LimitStore {
        &self.limits
    }

    pub fn menus(&self) -> &MenuController {
        &self.menus
    }

    /// A player joined: correct everything they carry
    pub fn on_join(&mut self, player: &mut dyn Player) -> ScanReport {
        scan(player, self.catalog.as_ref(), &self.limits)
    }

    /// Any container view closed
    ///
    /// Dismissing one of the pickers abandons the player's selection. The
    /// player's inventory is scanned regardless of which view closed.
    pub fn on_inventory_close(
        &mut self,
        player: &mut dyn Player,
        title: &str,
        reason: CloseReason,
    ) -> ScanReport {
        self.menus.on_close(player.id(), title, reason);
        scan(player, self.catalog.as_ref(), &self.limits)
    }

    /// A menu entry was clicked; `entry` is `None` for empty slots
    pub fn on_menu_click(
        &mut self,
        player: &mut dyn Player,
        title: &str,
        entry: Option<&MenuEntry>,
    ) -> ClickOutcome {
        self.menus.on_click(
            player,
            title,
            entry,
            self.catalog.as_ref(),
            &mut self.limits,
        )
    }

    /// The text command was invoked
    pub fn on_command<S: AsRef<str>>(
        &mut self,
        sender: &mut dyn CommandSender,
        args: &[S],
    ) -> Result<CommandOutcome, LimitError> {
        self.command.handle(
            sender,
            args,
            self.catalog.as_ref(),
            &mut self.limits,
            &mut self.menus,
        )
    }
}

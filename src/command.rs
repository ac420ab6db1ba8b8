//! Text Command
//!
//! `/<label> <enchantment> <level>` sets a limit directly; `/<label> gui`
//! opens the enchantment picker. Players need the configured permission node;
//! the console is always allowed.

use tracing::error;

use crate::catalog::{Catalog, EnchantmentId};
use crate::config::CommandConfig;
use crate::error::LimitError;
use crate::host::CommandSender;
use crate::limits::{Limit, LimitStore};
use crate::menu::MenuController;

/// What a successful invocation did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// A limit was written; `raw` is the number as typed
    LimitSet {
        enchantment: EnchantmentId,
        limit: Limit,
        raw: i64,
    },
    /// The enchantment picker was opened for the sender
    MenuOpened,
}

/// The `enchlimit` command
#[derive(Debug, Clone)]
pub struct LimitCommand {
    label: String,
    permission: String,
}

impl LimitCommand {
    pub fn new(label: impl Into<String>, permission: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            permission: permission.into(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Run the command and report the result to the sender
    ///
    /// Every failure becomes one message to the sender.
    pub fn handle<S: AsRef<str>>(
        &self,
        sender: &mut dyn CommandSender,
        args: &[S],
        catalog: &dyn Catalog,
        limits: &mut LimitStore,
        menus: &mut MenuController,
    ) -> Result<CommandOutcome, LimitError> {
        let result = self.execute(sender, args, catalog, limits, menus);
        match &result {
            Ok(CommandOutcome::LimitSet { raw, .. }) => {
                let typed = args.first().map(|a| a.as_ref()).unwrap_or_default();
                sender.send_message(&format!(
                    "Enchantment limit for {} set to {}.",
                    typed, raw
                ));
            }
            Ok(CommandOutcome::MenuOpened) => {}
            Err(e) => {
                if let LimitError::Persistence(cause) = e {
                    error!(error = %cause, "failed to persist limit from command");
                }
                if e.is_user_visible() {
                    sender.send_message(&e.to_string());
                }
            }
        }
        result
    }

    /// Run the command without sending any feedback
    pub fn execute<S: AsRef<str>>(
        &self,
        sender: &mut dyn CommandSender,
        args: &[S],
        catalog: &dyn Catalog,
        limits: &mut LimitStore,
        menus: &mut MenuController,
    ) -> Result<CommandOutcome, LimitError> {
        let is_player = sender.as_player().is_some();
        if is_player && !sender.has_permission(&self.permission) {
            return Err(LimitError::Unauthorized);
        }

        if args.len() == 1 && args[0].as_ref().eq_ignore_ascii_case("gui") {
            let player = sender.as_player().ok_or(LimitError::PlayerOnly)?;
            menus.open(player, catalog, limits);
            return Ok(CommandOutcome::MenuOpened);
        }

        let [name, level, ..] = args else {
            return Err(LimitError::Usage {
                label: self.label.clone(),
            });
        };
        let (name, level) = (name.as_ref(), level.as_ref());

        let enchantment = catalog
            .find_by_name(name)
            .ok_or_else(|| LimitError::InvalidEnchantmentName(name.to_string()))?;
        let invalid = || LimitError::InvalidLevelFormat(level.to_string());
        let raw: i64 = level.parse().map_err(|_| invalid())?;
        let limit = Limit::from_raw(raw).ok_or_else(invalid)?;
        limits.set(&enchantment.id, limit)?;
        Ok(CommandOutcome::LimitSet {
            enchantment: enchantment.id.clone(),
            limit,
            raw,
        })
    }
}

impl From<&CommandConfig> for LimitCommand {
    fn from(config: &CommandConfig) -> Self {
        Self::new(config.label.clone(), config.permission.clone())
    }
}

impl Default for LimitCommand {
    fn default() -> Self {
        Self::from(&CommandConfig::default())
    }
}

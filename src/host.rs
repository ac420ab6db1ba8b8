//! Host Environment Interfaces
//!
//! The traits an embedding environment implements so events can be routed into
//! the limit engine. Every call happens on the host's single event thread.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::item::PlayerInventory;
use crate::menu::MenuView;

/// Stable unique identity of an agent
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AgentId(Uuid);

impl AgentId {
    pub fn new(id: Uuid) -> Self {
        Self(id)
    }

    /// A fresh random identity
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Anything that can invoke the text command
pub trait CommandSender {
    /// Deliver a user-visible message
    fn send_message(&mut self, message: &str);

    /// Permission check against a permission node
    fn has_permission(&self, node: &str) -> bool;

    /// The player behind this sender, if any (the console has none)
    fn as_player(&mut self) -> Option<&mut dyn Player>;
}

/// A connected player
pub trait Player: CommandSender {
    fn id(&self) -> AgentId;

    fn name(&self) -> &str;

    fn inventory_mut(&mut self) -> &mut PlayerInventory;

    /// Push the current inventory state to the client
    fn update_inventory(&mut self);

    /// Show a menu, replacing whatever menu is open
    ///
    /// A menu replaced this way must be reported with
    /// [`CloseReason::Replaced`] if the host reports the close at all.
    fn open_menu(&mut self, menu: MenuView);

    /// Close the open menu
    fn close_menu(&mut self);
}

/// Why a container view closed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    /// The player dismissed it, or it was closed programmatically
    Dismissed,
    /// Another menu was opened in its place
    Replaced,
}

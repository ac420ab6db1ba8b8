//! Console Host
//!
//! A terminal stand-in for the game server. `ConsoleSender` is the server
//! console (no player behind it); `ConsolePlayer` is a player whose messages
//! and menus are printed to a writer. [`run_menu`] drives the two pickers from
//! line input.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use tracing::debug;

use crate::host::{AgentId, CloseReason, CommandSender, Player};
use crate::item::PlayerInventory;
use crate::menu::MenuView;
use crate::plugin::Plugin;

/// The server console
pub struct ConsoleSender<W: Write> {
    out: W,
}

impl<W: Write> ConsoleSender<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> CommandSender for ConsoleSender<W> {
    fn send_message(&mut self, message: &str) {
        let _ = writeln!(self.out, "{}", message);
    }

    fn has_permission(&self, _node: &str) -> bool {
        true
    }

    fn as_player(&mut self) -> Option<&mut dyn Player> {
        None
    }
}

/// A player attached to the terminal
pub struct ConsolePlayer<W: Write> {
    id: AgentId,
    name: String,
    permissions: Vec<String>,
    inventory: PlayerInventory,
    out: W,
    open: Option<MenuView>,

    /// Close events not yet delivered to the plugin
    closed: Vec<(String, CloseReason)>,

    refreshes: usize,
}

impl<W: Write> ConsolePlayer<W> {
    pub fn new(name: impl Into<String>, out: W) -> Self {
        Self {
            id: AgentId::random(),
            name: name.into(),
            permissions: Vec::new(),
            inventory: PlayerInventory::new(),
            out,
            open: None,
            closed: Vec::new(),
            refreshes: 0,
        }
    }

    /// Grant a permission node
    pub fn with_permission(mut self, node: impl Into<String>) -> Self {
        self.permissions.push(node.into());
        self
    }

    pub fn with_inventory(mut self, inventory: PlayerInventory) -> Self {
        self.inventory = inventory;
        self
    }

    pub fn inventory(&self) -> &PlayerInventory {
        &self.inventory
    }

    pub fn open_view(&self) -> Option<&MenuView> {
        self.open.as_ref()
    }

    /// Number of client inventory refreshes requested so far
    pub fn refreshes(&self) -> usize {
        self.refreshes
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Hand queued close events to the plugin
    pub fn dispatch_closes(&mut self, plugin: &mut Plugin) {
        for (title, reason) in std::mem::take(&mut self.closed) {
            plugin.on_inventory_close(self, &title, reason);
        }
    }

    fn render(&mut self, view: &MenuView) -> std::io::Result<()> {
        writeln!(self.out, "== {} ==", view.title)?;
        for entry in &view.entries {
            if entry.lore.is_empty() {
                writeln!(self.out, "  [{}] {}", entry.slot, entry.label)?;
            } else {
                writeln!(
                    self.out,
                    "  [{}] {} ({})",
                    entry.slot,
                    entry.label,
                    entry.lore.join("; ")
                )?;
            }
        }
        write!(self.out, "Select an entry (q to close): ")?;
        self.out.flush()
    }
}

impl<W: Write> CommandSender for ConsolePlayer<W> {
    fn send_message(&mut self, message: &str) {
        let _ = writeln!(self.out, "{}", message);
    }

    fn has_permission(&self, node: &str) -> bool {
        self.permissions.iter().any(|p| p == node)
    }

    fn as_player(&mut self) -> Option<&mut dyn Player> {
        Some(self)
    }
}

impl<W: Write> Player for ConsolePlayer<W> {
    fn id(&self) -> AgentId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn inventory_mut(&mut self) -> &mut PlayerInventory {
        &mut self.inventory
    }

    fn update_inventory(&mut self) {
        self.refreshes += 1;
    }

    fn open_menu(&mut self, menu: MenuView) {
        if let Some(previous) = self.open.replace(menu) {
            self.closed.push((previous.title, CloseReason::Replaced));
        }
    }

    fn close_menu(&mut self) {
        if let Some(previous) = self.open.take() {
            self.closed.push((previous.title, CloseReason::Dismissed));
        }
    }
}

/// Open the enchantment picker and drive it from `input` until it closes
///
/// Each line is a slot number or `q`. End of input dismisses the open menu.
pub fn run_menu<R: BufRead, W: Write>(
    plugin: &mut Plugin,
    player: &mut ConsolePlayer<W>,
    input: R,
) -> Result<()> {
    plugin
        .on_command(player, &["gui"])
        .context("Failed to open the enchantment picker")?;
    player.dispatch_closes(plugin);

    let mut lines = input.lines();
    while let Some(view) = player.open.clone() {
        player.render(&view).context("Failed to write menu")?;

        let Some(line) = lines.next() else {
            debug!(player = %player.name, "input closed, dismissing menu");
            player.close_menu();
            player.dispatch_closes(plugin);
            break;
        };
        let line = line.context("Failed to read input")?;
        let choice = line.trim().to_lowercase();

        match choice.as_str() {
            "q" | "quit" | "exit" => player.close_menu(),
            _ => match choice.parse::<usize>() {
                Ok(slot) => {
                    plugin.on_menu_click(player, &view.title, view.entry_at(slot));
                }
                Err(_) => {
                    player.send_message("Invalid choice. Enter a slot number or 'q'.");
                }
            },
        }
        player.dispatch_closes(plugin);
    }

    let _ = player.out.flush();
    Ok(())
}

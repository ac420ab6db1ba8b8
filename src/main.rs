// EnchLimit - Main Entry Point
//
// Console host for the enchantment limit engine:
// - Text command as the server console
// - Limit and catalog listings
// - Inventory scans of serialized inventories
// - Interactive configuration menu

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use enchlimit::config::Config;
use enchlimit::console::{run_menu, ConsolePlayer, ConsoleSender};
use enchlimit::item::PlayerInventory;
use enchlimit::limits::TomlFileStore;
use enchlimit::logging::init_tracing;
use enchlimit::{Plugin, VanillaCatalog};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::info;

/// EnchLimit: enchantment level caps
#[derive(Parser, Debug)]
#[command(name = "enchlimit")]
#[command(version)]
#[command(about = "Enforce and configure per-enchantment level caps", long_about = None)]
struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Configuration file (default: ~/.config/enchlimit/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the text command as the server console
    Command {
        /// `<enchantment> <level>` or `gui`
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// List configured limits
    Limits,
    /// List known enchantments and their max levels
    Catalog,
    /// Correct a serialized inventory
    Scan {
        /// Path to an inventory JSON file
        inventory: PathBuf,

        /// Write the corrected inventory back instead of printing it
        #[arg(long)]
        write: bool,
    },
    /// Configure limits through the interactive menu
    Menu {
        /// Name of the administrator driving the menu
        #[arg(long, default_value = "admin")]
        admin: String,
    },
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();

    let config_path = args.config.clone().unwrap_or_else(Config::config_path);
    let config = Config::load_from_path(&config_path)?;
    init_tracing(&config.logging, args.verbose)?;

    let store = TomlFileStore::new(config.limits_path());
    info!(path = %store.path().display(), "using limits file");
    let mut plugin = Plugin::load(&config, Box::new(VanillaCatalog::new()), Box::new(store))
        .context("Failed to load enchantment limits")?;

    match args.command {
        Some(Commands::Command { args }) => {
            let mut console = ConsoleSender::new(io::stdout());
            if plugin.on_command(&mut console, &args).is_err() {
                return Ok(ExitCode::FAILURE);
            }
        }
        Some(Commands::Limits) => list_limits(&plugin),
        Some(Commands::Catalog) => list_catalog(&plugin),
        Some(Commands::Scan { inventory, write }) => scan_file(&mut plugin, &inventory, write)?,
        Some(Commands::Menu { admin }) => {
            let mut player =
                ConsolePlayer::new(admin, io::stdout()).with_permission(&config.command.permission);
            run_menu(&mut plugin, &mut player, io::stdin().lock())?;
            println!();
        }
        None => {
            info!("No command specified. Use \"enchlimit --help\" for usage.");
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn list_limits(plugin: &Plugin) {
    let entries = plugin.limits().entries();
    if entries.is_empty() {
        println!("No enchantment limits configured.");
        return;
    }
    for (id, limit) in entries {
        println!("{:<24} {}", id.as_str(), limit);
    }
}

fn list_catalog(plugin: &Plugin) {
    for enchantment in plugin.catalog().enchantments() {
        println!(
            "{:<24} {:<24} {}",
            enchantment.id.as_str(),
            enchantment.display_name,
            enchantment.max_level
        );
    }
}

/// Scan an inventory file, printing messages and the corrected inventory
fn scan_file(plugin: &mut Plugin, path: &Path, write: bool) -> Result<()> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read inventory from {:?}", path))?;
    let inventory: PlayerInventory = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse inventory from {:?}", path))?;

    let mut player = ConsolePlayer::new("console", io::stdout()).with_inventory(inventory);
    let report = plugin.on_join(&mut player);
    let corrected = serde_json::to_string_pretty(player.inventory())?;

    if write {
        if report.changed() {
            fs::write(path, corrected + "\n")
                .with_context(|| format!("Failed to write inventory to {:?}", path))?;
        }
        println!(
            "{} slot(s) corrected in {}",
            report.changed_slots.len(),
            path.display()
        );
    } else {
        println!("{}", corrected);
    }
    Ok(())
}

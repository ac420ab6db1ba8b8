//! Error Types
//!
//! This module defines the errors raised by the command path, the menu path
//! and the limit store. The `Display` text of every user-facing variant is the
//! exact message delivered to the initiating agent.

/// Failure of the external configuration store
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    /// Reading or writing the backing file failed
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The backing file could not be parsed
    #[error("Malformed limits file {path}: {reason}")]
    Malformed { path: String, reason: String },

    /// The store refused the write
    #[error("Write rejected: {0}")]
    Rejected(String),
}

/// Error types for command and menu operations
#[derive(Debug, thiserror::Error)]
pub enum LimitError {
    /// Unknown enchantment identifier in the text command
    #[error("Invalid enchantment name.")]
    InvalidEnchantmentName(String),

    /// Non-integer level argument
    #[error("Invalid level. Must be a number.")]
    InvalidLevelFormat(String),

    /// Permission check failed
    #[error("You do not have permission to use this command.")]
    Unauthorized,

    /// A console sender asked for the picker
    #[error("This command can only be used by a player.")]
    PlayerOnly,

    /// Too few arguments
    #[error("Usage: /{label} <enchantment> <level>\nOr: /{label} gui")]
    Usage { label: String },

    /// Confirmation without a matching `Choosing` state; never shown to players
    #[error("No enchantment selection in progress")]
    StaleSelection,

    /// The configuration store failed; in-memory state is unchanged
    #[error("Failed to save enchantment limit: {0}")]
    Persistence(#[from] PersistenceError),
}

impl LimitError {
    /// Whether this error should be reported to the initiating agent
    pub fn is_user_visible(&self) -> bool {
        !matches!(self, LimitError::StaleSelection)
    }
}

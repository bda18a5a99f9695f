//! Unified error types for `SentenceBuddy`.
//!
//! Store lookups that can legitimately miss (`NoSentences`, `IndexOutOfRange`) are
//! ordinary variants here so the command handler can match on them and pick a reply.

use std::path::PathBuf;
use thiserror::Error;

/// Every error the crate can produce.
#[derive(Debug, Error)]
pub enum Error {
    /// The guild has no registered sentences.
    #[error("No sentences registered for guild {guild_id}")]
    NoSentences {
        /// Guild that was queried
        guild_id: String,
    },

    /// A 1-based index that does not address an existing sentence.
    #[error("Index {index} does not address a registered sentence")]
    IndexOutOfRange {
        /// The index as supplied by the user
        index: i64,
    },

    /// Writing the sentence file failed. The in-memory state is no longer durable.
    #[error("Failed to persist sentences to {path:?}: {source}")]
    Persist {
        /// Target file
        path: PathBuf,
        /// Underlying I/O failure
        source: std::io::Error,
    },

    /// The bot was stopped after a persistence failure.
    #[error("Bot halted because sentence storage could not be written")]
    StorageHalted,

    /// The client stopped before framework setup (command registration) completed.
    #[error("Bot stopped before setup completed")]
    SetupFailed,

    /// Encoding or decoding the sentence file failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Building a reply string failed.
    #[error("Formatting error: {0}")]
    Format(#[from] std::fmt::Error),

    /// Invalid or unreadable settings.
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable description
        message: String,
    },

    /// Filesystem error outside of persisting sentences.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A required environment variable is missing or not unicode.
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    /// A command name the bot does not handle.
    #[error("Unknown command: {name}")]
    UnknownCommand {
        /// Name as received
        name: String,
    },

    /// A command that needs an argument was sent without one.
    #[error("Command `{command}` requires an argument")]
    MissingArgument {
        /// Command missing its argument
        command: String,
    },

    /// An argument that could not be parsed for its command.
    #[error("Invalid argument for `{command}`: {value}")]
    InvalidArgument {
        /// Command that received it
        command: String,
        /// Raw argument text
        value: String,
    },

    /// The store mutex was poisoned by a panicking holder.
    #[error("Sentence store lock was poisoned")]
    StateLock,

    /// A guild-scoped command was invoked outside a guild.
    #[error("This command can only be used inside a server")]
    GuildOnly,

    /// Discord client or framework failure.
    #[error("Serenity/Poise framework error: {0}")]
    Framework(Box<poise::serenity_prelude::Error>),
}

impl From<poise::serenity_prelude::Error> for Error {
    fn from(value: poise::serenity_prelude::Error) -> Self {
        Self::Framework(Box::new(value))
    }
}

impl Error {
    /// Whether the bot must stop after this error.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::Persist { .. } | Self::StateLock)
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;

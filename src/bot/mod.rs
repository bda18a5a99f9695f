//! Bot layer - Discord-specific interface and command handlers
//!
//! This module provides the Discord interface for `SentenceBuddy`: the slash
//! commands, command registration, error reporting and the shared bot context.

/// Discord command implementations (sentence and general commands)
pub mod commands;
/// Framework setup, error hook and the bot run loop
pub mod framework;
/// Discord event handlers (command registration)
pub mod handlers;

use crate::{
    config::Settings,
    core::{Command, SentenceStore, handle},
    errors::{Error, Result},
};
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicBool, Ordering},
};

/// Poise context carrying [`BotData`].
pub type Context<'a> = poise::Context<'a, BotData, Error>;

/// Shared data available to all bot commands.
///
/// The store sits behind a mutex that is only held for the synchronous store
/// call, never across an `.await`.
pub struct BotData {
    /// Every guild's sentences
    pub store: Mutex<SentenceStore>,
    /// Settings the bot was started with
    pub settings: Settings,
    halted: Arc<AtomicBool>,
}

impl BotData {
    /// Creates a new `BotData`. `halted` is shared with the run loop so it can tell a
    /// deliberate stop after a storage failure from a normal shutdown.
    #[must_use]
    pub fn new(store: SentenceStore, settings: Settings, halted: Arc<AtomicBool>) -> Self {
        Self {
            store: Mutex::new(store),
            settings,
            halted,
        }
    }

    /// Runs `command` for `guild_id` under the store lock and returns the reply.
    pub fn dispatch(&self, guild_id: &str, command: &Command) -> Result<String> {
        let mut store = self.store.lock().map_err(|_| Error::StateLock)?;
        handle(&mut store, guild_id, command)
    }

    /// Parses a command invocation by name and runs it.
    ///
    /// `guild_id` is the invoking guild, if any. Every command except `help` needs one.
    pub fn dispatch_named(
        &self,
        guild_id: Option<&str>,
        name: &str,
        argument: Option<&str>,
    ) -> Result<String> {
        let command = Command::parse(name, argument)?;
        let guild_id = match (guild_id, &command) {
            (Some(guild_id), _) => guild_id,
            (None, Command::Help) => "",
            (None, _) => return Err(Error::GuildOnly),
        };
        self.dispatch(guild_id, &command)
    }

    /// Marks the bot as stopped because of an unrecoverable error.
    pub fn halt(&self) {
        self.halted.store(true, Ordering::SeqCst);
    }

    /// Whether [`Self::halt`] has been called.
    #[must_use]
    pub fn is_halted(&self) -> bool {
        self.halted.load(Ordering::SeqCst)
    }
}

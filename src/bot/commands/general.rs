//! General Discord commands.
//! This module contains commands that don't read or change any sentences.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, commands::respond},
        errors::{Error, Result},
    };

    /// Shows how to use the bot.
    #[poise::command(slash_command)]
    pub async fn help(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        respond(ctx, None).await
    }
}

// Re-export all commands
pub use inner::*;

//! Sentence Discord commands - register, random, list and delete.
//!
//! Each command forwards its name and raw option to the shared store through
//! [`crate::bot::BotData::dispatch_named`] and sends the reply as-is.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, commands::respond},
        errors::{Error, Result},
    };

    /// Registers a sentence. Separate several sentences with /.
    #[poise::command(slash_command, guild_only)]
    pub async fn register(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Sentence to register (use / to register several at once)"]
        sentence: String,
    ) -> Result<()> {
        respond(ctx, Some(sentence)).await
    }

    /// Shows one of the registered sentences at random.
    #[poise::command(slash_command, guild_only)]
    pub async fn random(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        respond(ctx, None).await
    }

    /// Shows every registered sentence.
    #[poise::command(slash_command, guild_only)]
    pub async fn list(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        respond(ctx, None).await
    }

    /// Deletes one registered sentence by its number.
    #[poise::command(slash_command, guild_only)]
    pub async fn delete(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Number of the sentence to delete (see /list)"] index: i64,
    ) -> Result<()> {
        respond(ctx, Some(index.to_string())).await
    }
}

pub use inner::*;

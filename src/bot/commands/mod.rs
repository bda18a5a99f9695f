//! Discord command implementations organized by category.

/// Help command
pub mod general;

/// Sentence commands: register, random, list, delete
pub mod sentence;

// Export commands
pub use general::*;
pub use sentence::*;

use crate::{
    bot::BotData,
    errors::{Error, Result},
};
use tracing::debug;

/// Every slash command the bot exposes, in help-text order.
#[must_use]
pub fn all() -> Vec<poise::Command<BotData, Error>> {
    vec![register(), random(), list(), delete(), help()]
}

/// Runs the invoked command by name with its raw argument and sends the reply.
pub(crate) async fn respond(
    ctx: poise::Context<'_, BotData, Error>,
    argument: Option<String>,
) -> Result<()> {
    let name = &ctx.command().name;
    let guild_id = ctx.guild_id().map(|id| id.to_string());
    debug!(
        "/{} {:?} from {} in guild {:?}",
        name,
        argument,
        ctx.author().name,
        guild_id
    );

    let reply = ctx
        .data()
        .dispatch_named(guild_id.as_deref(), name, argument.as_deref())?;
    ctx.say(reply).await?;
    Ok(())
}

//! Slash command registration.
//!
//! In guild scope the commands are registered per guild, which Discord applies
//! immediately: for every guild listed in `ready`, and again whenever the bot
//! joins a new one.

use crate::{
    bot::BotData,
    config::CommandScope,
    errors::{Error, Result},
};
use poise::serenity_prelude as serenity;
use tracing::{error, info};

/// Registers `commands` in each guild, logging and skipping guilds that fail.
///
/// Returns how many guilds were registered successfully.
pub async fn register_in_guilds<I>(
    ctx: &serenity::Context,
    commands: &[poise::Command<BotData, Error>],
    guild_ids: I,
) -> usize
where
    I: IntoIterator<Item = serenity::GuildId>,
{
    let mut registered = 0;
    for guild_id in guild_ids {
        match poise::builtins::register_in_guild(ctx, commands, guild_id).await {
            Ok(()) => {
                info!("Registered commands in guild {}", guild_id);
                registered += 1;
            }
            Err(e) => error!("Failed to register commands in guild {}: {}", guild_id, e),
        }
    }
    registered
}

/// Registers commands when the bot first connects.
pub async fn register_on_ready(
    ctx: &serenity::Context,
    ready: &serenity::Ready,
    commands: &[poise::Command<BotData, Error>],
    scope: CommandScope,
) -> Result<()> {
    match scope {
        CommandScope::Global => {
            info!("Registering commands globally...");
            poise::builtins::register_globally(ctx, commands).await?;
        }
        CommandScope::Guild => {
            let guild_ids: Vec<serenity::GuildId> =
                ready.guilds.iter().map(|guild| guild.id).collect();
            let registered = register_in_guilds(ctx, commands, guild_ids).await;
            info!(
                "Registered commands in {}/{} guilds",
                registered,
                ready.guilds.len()
            );
        }
    }
    Ok(())
}

/// Gateway event hook: registers commands in guilds the bot joins after startup.
pub async fn event_handler(
    ctx: &serenity::Context,
    event: &serenity::FullEvent,
    framework: poise::FrameworkContext<'_, BotData, Error>,
    data: &BotData,
) -> Result<()> {
    if let serenity::FullEvent::GuildCreate { guild, is_new } = event {
        if data.settings.command_scope == CommandScope::Guild && *is_new == Some(true) {
            info!("Joined guild {} ({})", guild.name, guild.id);
            register_in_guilds(ctx, &framework.options.commands, [guild.id]).await;
        }
    }
    Ok(())
}

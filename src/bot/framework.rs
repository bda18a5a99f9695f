//! Poise framework setup and the bot run loop.

use crate::{
    bot::{BotData, commands, handlers::registration},
    config::Settings,
    core::SentenceStore,
    errors::{Error, Result},
};
use poise::serenity_prelude as serenity;
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};
use tracing::{error, info, instrument};

async fn on_error(error: poise::FrameworkError<'_, BotData, Error>) {
    match error {
        poise::FrameworkError::Setup {
            error, framework, ..
        } => {
            // No user data means no event can ever be served
            error!("Failed to start bot, shutting down: {:?}", error);
            framework.shard_manager().shutdown_all().await;
        }
        poise::FrameworkError::Command { error, ctx, .. } if error.is_fatal() => {
            error!(
                "Fatal error in command `{}`, stopping bot: {:?}",
                ctx.command().name,
                error
            );
            if let Err(e) = ctx
                .say("Sentences could not be saved. The bot is shutting down.")
                .await
            {
                error!("Failed to send error message: {}", e);
            }
            ctx.data().halt();
            ctx.framework().shard_manager().shutdown_all().await;
        }
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!("Error in command `{}`: {:?}", ctx.command().name, error);
            if let Err(e) = ctx.say(format!("An error occurred: {error}")).await {
                error!("Failed to send error message: {}", e);
            }
        }
        error => {
            if let Err(e) = poise::builtins::on_error(error).await {
                error!("Error while handling error: {}", e);
            }
        }
    }
}

/// Connects to Discord and serves commands until the client stops.
///
/// Returns [`Error::SetupFailed`] when the client stopped before setup finished, and
/// [`Error::StorageHalted`] when the bot was stopped because the sentence file could
/// not be written.
#[instrument(skip(token, store))]
pub async fn run_bot(token: String, store: SentenceStore, settings: Settings) -> Result<()> {
    let halted = Arc::new(AtomicBool::new(false));
    let setup_done = Arc::new(AtomicBool::new(false));
    let data = BotData::new(store, settings, Arc::clone(&halted));
    let setup_flag = Arc::clone(&setup_done);

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: commands::all(),
            on_error: |error| Box::pin(on_error(error)),
            event_handler: |ctx, event, framework, data| {
                Box::pin(registration::event_handler(ctx, event, framework, data))
            },
            ..Default::default()
        })
        .setup(move |ctx, ready, framework| {
            Box::pin(async move {
                info!("Logged in as {}", ready.user.name);
                registration::register_on_ready(
                    ctx,
                    ready,
                    &framework.options().commands,
                    data.settings.command_scope,
                )
                .await?;
                setup_flag.store(true, Ordering::SeqCst);
                Ok(data)
            })
        })
        .build();

    // Slash commands only need guild events
    let intents = serenity::GatewayIntents::GUILDS;

    info!("Setting up Serenity client for Poise framework...");
    let mut client = serenity::ClientBuilder::new(&token, intents)
        .framework(framework)
        .await
        .inspect_err(|e| error!("Error creating client: {:?}", e))?;

    info!("Starting bot client...");
    client
        .start()
        .await
        .inspect_err(|e| error!("Client error: {:?}", e))?;

    exit_status(setup_done.load(Ordering::SeqCst), halted.load(Ordering::SeqCst))
}

/// Maps how the client stopped to the result `run_bot` reports.
fn exit_status(setup_done: bool, halted: bool) -> Result<()> {
    if !setup_done {
        return Err(Error::SetupFailed);
    }
    if halted {
        return Err(Error::StorageHalted);
    }
    Ok(())
}

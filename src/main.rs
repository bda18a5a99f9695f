use dotenvy::dotenv;
use sentence_buddy::{bot::framework, config, core::SentenceStore, errors::Result};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file, non-fatal since env vars can be set externally
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Load settings
    let settings = config::load_settings()?;

    // 4. Load sentences; a missing or unreadable file starts empty
    let store = SentenceStore::load(&settings.storage_path);

    // 5. Run the bot
    let token = config::get_bot_token()
        .inspect_err(|e| error!("DISCORD_BOT_TOKEN not found: {}", e))?;

    framework::run_bot(token, store, settings)
        .await
        .inspect_err(|e| error!("Bot stopped with error: {}", e))
}

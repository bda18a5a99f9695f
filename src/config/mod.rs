/// Bot settings from config.toml and environment overrides
pub mod settings;

pub use settings::{CommandScope, Settings, get_bot_token, load_settings};

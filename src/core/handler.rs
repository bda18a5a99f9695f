//! Command handling - turns a command invocation into a store call and a reply.
//!
//! Nothing here knows about Discord. The bot layer builds a [`Command`] from slash
//! command options, calls [`handle`] with the invoking guild, and sends back the
//! returned string.

use crate::{
    core::store::SentenceStore,
    errors::{Error, Result},
};
use std::fmt::Write;

/// Static usage text for `/help`.
pub const HELP_TEXT: &str = "\
/register [sentence] - Registers a sentence. Separate several sentences with / to register them at once.\n\
/random - Shows one of the registered sentences at random.\n\
/list - Shows every registered sentence.\n\
/delete [number] - Deletes the sentence with that number. (Numbers are shown by /list)\n\
/help - Shows this usage guide.";

/// One inbound command with its parsed argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Register one or more `/`-separated sentences.
    Register(String),
    /// Reply with a random sentence.
    Random,
    /// Reply with the numbered list.
    List,
    /// Delete by 1-based index.
    Delete(i64),
    /// Reply with usage text.
    Help,
}

impl Command {
    /// Builds a command from its name and optional raw argument.
    pub fn parse(name: &str, argument: Option<&str>) -> Result<Self> {
        let required = |command: &str| {
            argument.ok_or_else(|| Error::MissingArgument {
                command: command.to_string(),
            })
        };

        match name {
            "register" => Ok(Self::Register(required(name)?.to_string())),
            "random" => Ok(Self::Random),
            "list" => Ok(Self::List),
            "delete" => {
                let raw = required(name)?;
                raw.trim()
                    .parse::<i64>()
                    .map(Self::Delete)
                    .map_err(|_| Error::InvalidArgument {
                        command: name.to_string(),
                        value: raw.to_string(),
                    })
            }
            "help" => Ok(Self::Help),
            other => Err(Error::UnknownCommand {
                name: other.to_string(),
            }),
        }
    }
}

/// Runs `command` for `guild_id` against the store and returns the reply text.
///
/// Missing sentences and bad indices become user-facing replies. Any other store
/// error, such as a failed write, is returned as-is.
pub fn handle(store: &mut SentenceStore, guild_id: &str, command: &Command) -> Result<String> {
    match command {
        Command::Register(raw_input) => {
            let added = store.add(guild_id, raw_input)?;
            Ok(format_registered(&added))
        }
        Command::Random => match store.random_pick(guild_id) {
            Ok(sentence) => Ok(format!("{sentence}.")),
            Err(Error::NoSentences { .. }) => Ok(
                "No sentences registered. Use \"/register [sentence]\" to add one.".to_string(),
            ),
            Err(e) => Err(e),
        },
        Command::List => format_list(store.list(guild_id)),
        Command::Delete(index) => match store.delete_at(guild_id, *index) {
            Ok(removed) => Ok(format!("Sentence deleted: \"{removed}.\"")),
            Err(Error::IndexOutOfRange { .. }) => {
                Ok("Please enter a valid number. (Check it with /list).".to_string())
            }
            Err(e) => Err(e),
        },
        Command::Help => Ok(HELP_TEXT.to_string()),
    }
}

fn format_registered(added: &[String]) -> String {
    match added {
        [only] => format!("Sentence registered: \"{only}\"."),
        _ => format!("{} sentences registered.", added.len()),
    }
}

fn format_list(sentences: &[String]) -> Result<String> {
    if sentences.is_empty() {
        return Ok("No sentences registered.".to_string());
    }

    let mut reply = String::from("Registered sentences:");
    for (i, sentence) in sentences.iter().enumerate() {
        write!(reply, "\n{}. {sentence}.", i + 1)?;
    }
    Ok(reply)
}

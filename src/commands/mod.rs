//! # Command System
//!
//! Prefix commands (`!ping`, `?kick @user`, ...) routed through a fixed
//! table of handlers. The prefix is resolved per guild from the
//! [`PrefixStore`].
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.0.0: Initial command table with moderation, info and admin commands

pub mod admin;
pub mod info;
pub mod moderation;
pub mod quick;
pub mod reply;

#[cfg(test)]
pub(crate) mod testing;

use serenity::model::permissions::Permissions;

use crate::error::CommandError;
use crate::platform::ModerationApi;
use crate::prefix_store::PrefixStore;

// Re-export the CommandHandler from the handler module
pub use crate::command_handler::CommandHandler;
pub use reply::{EmbedReply, Reply};

pub type CommandResult = Result<Reply, CommandError>;

/// A message that matched the guild prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Lower-cased command name
    pub name: String,
    /// Whitespace-separated arguments after the name
    pub args: Vec<String>,
}

impl Invocation {
    pub fn first_arg(&self) -> Option<&str> {
        self.args.first().map(|s| s.as_str())
    }
}

/// Parse a command from raw message text.
///
/// Returns `None` when `content` does not start with `prefix` or nothing
/// follows the prefix.
///
/// # Example
/// ```
/// use warden::commands::parse_invocation;
///
/// let invocation = parse_invocation("?KICK <@42> spam", "?").unwrap();
/// assert_eq!(invocation.name, "kick");
/// assert_eq!(invocation.args, vec!["<@42>", "spam"]);
/// assert!(parse_invocation("kick <@42>", "?").is_none());
/// ```
pub fn parse_invocation(content: &str, prefix: &str) -> Option<Invocation> {
    let body = content.strip_prefix(prefix)?.trim();
    let mut parts = body.split_whitespace();

    let name = parts.next()?.to_lowercase();
    let args: Vec<String> = parts.map(|s| s.to_string()).collect();

    Some(Invocation { name, args })
}

/// Everything a handler may touch while running.
pub struct CommandContext<'a> {
    pub guild_id: &'a str,
    /// Prefix the invocation was parsed with
    pub prefix: &'a str,
    pub store: &'a PrefixStore,
    pub api: &'a dyn ModerationApi,
}

impl CommandContext<'_> {
    /// Fails with `PermissionDenied` unless the invoker holds `flag` or is an administrator.
    pub async fn require_permission(
        &self,
        flag: Permissions,
        action: &'static str,
    ) -> Result<(), CommandError> {
        let permissions = self
            .api
            .invoker_permissions()
            .await
            .map_err(|source| CommandError::PlatformCallFailure {
                reply: "Sorry, I couldn't check your permissions.",
                source,
            })?;

        if permissions.contains(Permissions::ADMINISTRATOR) || permissions.contains(flag) {
            Ok(())
        } else {
            Err(CommandError::PermissionDenied { action })
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Ping,
    Kick,
    Ban,
    Unban,
    Help,
    SetPrefix,
}

impl Command {
    /// All commands, in help order.
    pub const ALL: [Command; 6] = [
        Command::Ping,
        Command::Kick,
        Command::Ban,
        Command::Unban,
        Command::Help,
        Command::SetPrefix,
    ];

    pub fn from_name(name: &str) -> Option<Command> {
        Self::ALL
            .into_iter()
            .find(|command| command.name().eq_ignore_ascii_case(name))
    }

    pub fn name(self) -> &'static str {
        match self {
            Command::Ping => "ping",
            Command::Kick => "kick",
            Command::Ban => "ban",
            Command::Unban => "unban",
            Command::Help => "help",
            Command::SetPrefix => "setprefix",
        }
    }

    /// Usage line without the prefix.
    pub fn usage(self) -> &'static str {
        match self {
            Command::Ping => "ping",
            Command::Kick => "kick @user",
            Command::Ban => "ban @user",
            Command::Unban => "unban <userID>",
            Command::Help => "help",
            Command::SetPrefix => "setprefix <newPrefix>",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Command::Ping => "Checks the bot's latency.",
            Command::Kick => "Kicks the mentioned user.",
            Command::Ban => "Bans the mentioned user.",
            Command::Unban => "Unbans the user with the given ID.",
            Command::Help => "Displays this help message.",
            Command::SetPrefix => "Sets a new command prefix.",
        }
    }

    /// `ping` works but is not listed by `help`.
    pub fn listed_in_help(self) -> bool {
        !matches!(self, Command::Ping)
    }

    pub async fn execute(self, cx: &CommandContext<'_>, args: &[String]) -> CommandResult {
        match self {
            Command::Ping => quick::ping(cx, args).await,
            Command::Kick => moderation::kick(cx, args).await,
            Command::Ban => moderation::ban(cx, args).await,
            Command::Unban => moderation::unban(cx, args).await,
            Command::Help => info::help(cx, args).await,
            Command::SetPrefix => admin::set_prefix(cx, args).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_command() {
        let invocation = parse_invocation("?help", "?").unwrap();
        assert_eq!(invocation.name, "help");
        assert!(invocation.args.is_empty());
    }

    #[test]
    fn test_message_without_prefix_is_not_a_command() {
        assert!(parse_invocation("help", "?").is_none());
        assert!(parse_invocation(" ?help", "?").is_none());
    }

    #[test]
    fn test_parse_command_with_args() {
        let invocation = parse_invocation("!setprefix   $$", "!").unwrap();
        assert_eq!(invocation.name, "setprefix");
        assert_eq!(invocation.args, vec!["$$"]);
        assert_eq!(invocation.first_arg(), Some("$$"));
    }

    #[test]
    fn test_parse_lowercases_name_only() {
        let invocation = parse_invocation(">>UnBan ABC", ">>").unwrap();
        assert_eq!(invocation.name, "unban");
        assert_eq!(invocation.args, vec!["ABC"]);
    }

    #[test]
    fn test_parse_allows_space_after_prefix() {
        let invocation = parse_invocation("! ping", "!").unwrap();
        assert_eq!(invocation.name, "ping");
    }

    #[test]
    fn test_prefix_alone_is_not_a_command() {
        assert!(parse_invocation("!", "!").is_none());
        assert!(parse_invocation("!   ", "!").is_none());
    }

    #[test]
    fn test_command_lookup() {
        assert_eq!(Command::from_name("setprefix"), Some(Command::SetPrefix));
        assert_eq!(Command::from_name("KICK"), Some(Command::Kick));
        assert_eq!(Command::from_name("warn"), None);
        for command in Command::ALL {
            assert_eq!(Command::from_name(command.name()), Some(command));
        }
    }
}

//! Info commands: help

use super::reply::BLUE;
use super::{Command, CommandContext, CommandResult, EmbedReply, Reply};

/// Build the help embed for the given guild prefix.
pub fn help_embed(prefix: &str) -> EmbedReply {
    Command::ALL.into_iter().filter(|c| c.listed_in_help()).fold(
        EmbedReply::new("Help Command", "Here are the available commands:", BLUE),
        |embed, command| {
            embed.field(
                format!("{}{}", prefix, command.usage()),
                command.description(),
            )
        },
    )
}

pub async fn help(cx: &CommandContext<'_>, _args: &[String]) -> CommandResult {
    Ok(Reply::Embed(help_embed(cx.prefix)))
}

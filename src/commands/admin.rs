//! Admin commands: setprefix

use log::info;
use serenity::model::permissions::Permissions;

use super::reply::GREEN;
use super::{CommandContext, CommandResult, EmbedReply, Reply};
use crate::error::CommandError;

/// Change the guild prefix. Requires MANAGE_GUILD.
pub async fn set_prefix(cx: &CommandContext<'_>, args: &[String]) -> CommandResult {
    cx.require_permission(Permissions::MANAGE_GUILD, "change the prefix")
        .await?;
    let new_prefix = args.first().ok_or(CommandError::MissingArgument {
        reply: "Please provide a new prefix.",
    })?;

    cx.store.set(cx.guild_id, new_prefix).await?;

    info!("🔧 Prefix for guild {} changed to '{}'", cx.guild_id, new_prefix);
    Ok(Reply::Embed(EmbedReply::new(
        "Prefix Changed",
        format!("The command prefix has been changed to `{}`.", new_prefix),
        GREEN,
    )))
}

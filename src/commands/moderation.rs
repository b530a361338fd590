//! Moderation commands: kick, ban, unban

use log::info;
use regex::Regex;
use serenity::model::id::UserId;
use serenity::model::permissions::Permissions;
use std::sync::OnceLock;

use super::reply::{GREEN, RED};
use super::{CommandContext, CommandResult, EmbedReply, Reply};
use crate::error::CommandError;
use crate::platform::TargetMember;

const UNBAN_FAILED: &str = "An error occurred while unbanning the user.";

fn mention_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^(?:<@!?(\d+)>|(\d+))$").expect("mention pattern is valid"))
}

/// Parse a target user from `<@id>`, `<@!id>`, or a raw ID.
pub fn parse_target_user(raw: &str) -> Option<UserId> {
    let captures = mention_pattern().captures(raw.trim())?;
    let digits = captures.get(1).or_else(|| captures.get(2))?;
    let id = digits.as_str().parse::<u64>().ok()?;
    if id == 0 {
        return None;
    }
    Some(UserId(id))
}

/// Resolve the first argument that names a user, wherever it appears.
async fn resolve_target(
    cx: &CommandContext<'_>,
    args: &[String],
    missing: &'static str,
) -> Result<TargetMember, CommandError> {
    let user_id = args
        .iter()
        .find_map(|arg| parse_target_user(arg))
        .ok_or(CommandError::MissingArgument { reply: missing })?;

    cx.api
        .find_member(user_id)
        .await
        .map_err(|source| CommandError::PlatformCallFailure {
            reply: "Sorry, I couldn't look up that user. Please try again.",
            source,
        })?
        .ok_or(CommandError::TargetNotFound)
}

pub async fn kick(cx: &CommandContext<'_>, args: &[String]) -> CommandResult {
    cx.require_permission(Permissions::KICK_MEMBERS, "kick members")
        .await?;
    let target = resolve_target(cx, args, "Please mention the user to kick.").await?;

    cx.api
        .kick(target.user_id)
        .await
        .map_err(|source| CommandError::PlatformCallFailure {
            reply: "I cannot kick this user.",
            source,
        })?;

    info!("👢 Kicked {} from guild {}", target.tag, cx.guild_id);
    Ok(Reply::Embed(EmbedReply::new(
        "User Kicked",
        format!("{} has been kicked.", target.tag),
        RED,
    )))
}

pub async fn ban(cx: &CommandContext<'_>, args: &[String]) -> CommandResult {
    cx.require_permission(Permissions::BAN_MEMBERS, "ban members")
        .await?;
    let target = resolve_target(cx, args, "Please mention the user to ban.").await?;

    cx.api
        .ban(target.user_id)
        .await
        .map_err(|source| CommandError::PlatformCallFailure {
            reply: "I cannot ban this user.",
            source,
        })?;

    info!("🔨 Banned {} from guild {}", target.tag, cx.guild_id);
    Ok(Reply::Embed(EmbedReply::new(
        "User Banned",
        format!("{} has been banned.", target.tag),
        RED,
    )))
}

/// Unban by ID. The user is not a member, so nothing is resolved first.
pub async fn unban(cx: &CommandContext<'_>, args: &[String]) -> CommandResult {
    cx.require_permission(Permissions::BAN_MEMBERS, "unban members")
        .await?;
    let raw = args.first().ok_or(CommandError::MissingArgument {
        reply: "Please provide the user ID to unban.",
    })?;

    let user_id = parse_target_user(raw).ok_or_else(|| CommandError::InvalidArgument {
        value: raw.clone(),
        reply: UNBAN_FAILED,
    })?;

    cx.api
        .unban(user_id)
        .await
        .map_err(|source| CommandError::PlatformCallFailure {
            reply: UNBAN_FAILED,
            source,
        })?;

    info!("🕊️ Unbanned {} in guild {}", user_id, cx.guild_id);
    Ok(Reply::Embed(EmbedReply::new(
        "User Unbanned",
        format!("User with ID {} has been unbanned.", user_id),
        GREEN,
    )))
}

//! Guild-scoped calls into Discord used by the moderation commands.

use log::debug;
use serenity::async_trait;
use serenity::http::HttpError;
use serenity::model::id::{GuildId, RoleId, UserId};
use serenity::model::permissions::Permissions;
use serenity::prelude::Context;
use std::collections::HashMap;

/// A guild member resolved as a moderation target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetMember {
    pub user_id: UserId,
    /// `name#discriminator`
    pub tag: String,
}

/// Everything a command needs from the platform, scoped to one guild and
/// one invoking user.
#[async_trait]
pub trait ModerationApi: Send + Sync {
    /// Effective guild permissions of the invoking member.
    async fn invoker_permissions(&self) -> serenity::Result<Permissions>;

    /// `Ok(None)` when the user is not a member of the guild.
    async fn find_member(&self, user_id: UserId) -> serenity::Result<Option<TargetMember>>;

    async fn kick(&self, user_id: UserId) -> serenity::Result<()>;

    async fn ban(&self, user_id: UserId) -> serenity::Result<()>;

    async fn unban(&self, user_id: UserId) -> serenity::Result<()>;
}

pub struct SerenityGuild<'a> {
    ctx: &'a Context,
    guild_id: GuildId,
    invoker: UserId,
}

impl<'a> SerenityGuild<'a> {
    pub fn new(ctx: &'a Context, guild_id: GuildId, invoker: UserId) -> Self {
        SerenityGuild {
            ctx,
            guild_id,
            invoker,
        }
    }
}

/// Guild-level permissions of `member`: everything for the owner, otherwise
/// `@everyone` plus the member's roles, with ADMINISTRATOR granting all.
pub fn guild_permissions(
    guild_id: GuildId,
    owner_id: UserId,
    member: UserId,
    role_permissions: &HashMap<RoleId, Permissions>,
    member_roles: &[RoleId],
) -> Permissions {
    if member == owner_id {
        return Permissions::all();
    }

    let everyone = RoleId(guild_id.0);
    let permissions = std::iter::once(&everyone)
        .chain(member_roles)
        .filter_map(|id| role_permissions.get(id))
        .fold(Permissions::empty(), |acc, role| acc | *role);

    if permissions.contains(Permissions::ADMINISTRATOR) {
        Permissions::all()
    } else {
        permissions
    }
}

/// True for a 404 from the API (Unknown Member / Unknown User).
pub fn is_not_found(err: &serenity::Error) -> bool {
    match err {
        serenity::Error::Http(http) => matches!(
            &**http,
            HttpError::UnsuccessfulRequest(response) if response.status_code.as_u16() == 404
        ),
        _ => false,
    }
}

#[async_trait]
impl ModerationApi for SerenityGuild<'_> {
    async fn invoker_permissions(&self) -> serenity::Result<Permissions> {
        let guild = self.guild_id.to_partial_guild(self.ctx).await?;
        let member = self.guild_id.member(self.ctx, self.invoker).await?;
        let role_permissions: HashMap<RoleId, Permissions> = guild
            .roles
            .iter()
            .map(|(id, role)| (*id, role.permissions))
            .collect();
        Ok(guild_permissions(
            self.guild_id,
            guild.owner_id,
            self.invoker,
            &role_permissions,
            &member.roles,
        ))
    }

    async fn find_member(&self, user_id: UserId) -> serenity::Result<Option<TargetMember>> {
        match self.guild_id.member(self.ctx, user_id).await {
            Ok(member) => Ok(Some(TargetMember {
                user_id,
                tag: member.user.tag(),
            })),
            Err(e) if is_not_found(&e) => {
                debug!("Member {} not in guild {}: {}", user_id, self.guild_id, e);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    async fn kick(&self, user_id: UserId) -> serenity::Result<()> {
        self.guild_id.kick(&self.ctx.http, user_id).await
    }

    async fn ban(&self, user_id: UserId) -> serenity::Result<()> {
        self.guild_id.ban(&self.ctx.http, user_id, 0).await
    }

    async fn unban(&self, user_id: UserId) -> serenity::Result<()> {
        self.guild_id.unban(&self.ctx.http, user_id).await
    }
}

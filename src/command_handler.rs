use anyhow::Result;
use log::{debug, error, info, warn};
use serenity::client::bridge::gateway::{ShardId, ShardManager};
use serenity::model::channel::Message;
use serenity::prelude::{Context, Mutex, TypeMapKey};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::commands::quick::{pong_message, PINGING};
use crate::commands::{parse_invocation, Command, CommandContext, Reply};
use crate::platform::{ModerationApi, SerenityGuild};
use crate::prefix_store::PrefixStore;

/// Client data key for the shard manager; ping reads heartbeat latency from it.
pub struct ShardManagerContainer;

impl TypeMapKey for ShardManagerContainer {
    type Value = Arc<Mutex<ShardManager>>;
}

#[derive(Clone)]
pub struct CommandHandler {
    store: PrefixStore,
}

impl CommandHandler {
    pub fn new(store: PrefixStore) -> Self {
        CommandHandler { store }
    }

    pub fn store(&self) -> &PrefixStore {
        &self.store
    }

    pub async fn handle_message(&self, ctx: &Context, msg: &Message) -> Result<()> {
        let Some(guild_id) = msg.guild_id else {
            return Ok(());
        };

        let api = SerenityGuild::new(ctx, guild_id, msg.author.id);
        let guild_key = guild_id.to_string();

        if let Some(reply) = self.dispatch(&guild_key, &msg.content, &api).await {
            self.send_reply(ctx, msg, reply).await?;
        }

        Ok(())
    }

    /// Route one message. `None` means it was not a known command.
    pub async fn dispatch(
        &self,
        guild_id: &str,
        content: &str,
        api: &dyn ModerationApi,
    ) -> Option<Reply> {
        let prefix = self.store.get(guild_id);
        let invocation = parse_invocation(content, &prefix)?;

        let Some(command) = Command::from_name(&invocation.name) else {
            debug!("Ignoring unknown command '{}' in guild {}", invocation.name, guild_id);
            return None;
        };

        info!("Processing command: {} in guild: {}", command.name(), guild_id);

        let cx = CommandContext {
            guild_id,
            prefix: &prefix,
            store: &self.store,
            api,
        };

        match command.execute(&cx, &invocation.args).await {
            Ok(reply) => Some(reply),
            Err(e) => {
                if e.is_internal() {
                    error!("Command '{}' failed in guild {}: {}", command.name(), guild_id, e);
                } else {
                    warn!("Command '{}' refused in guild {}: {}", command.name(), guild_id, e);
                }
                Some(Reply::Text(e.user_message()))
            }
        }
    }

    async fn send_reply(&self, ctx: &Context, msg: &Message, reply: Reply) -> Result<()> {
        match reply {
            Reply::Text(text) => {
                msg.reply(ctx, text).await?;
            }
            Reply::Embed(embed) => {
                msg.channel_id
                    .send_message(&ctx.http, |m| m.embed(|e| embed.apply(e)))
                    .await?;
            }
            Reply::Pong => {
                let started = Instant::now();
                let mut sent = msg.reply(ctx, PINGING).await?;
                let latency = started.elapsed();
                let api_latency = Self::heartbeat_latency(ctx).await;
                sent.edit(ctx, |m| m.content(pong_message(latency, api_latency)))
                    .await?;
            }
        }
        Ok(())
    }

    async fn heartbeat_latency(ctx: &Context) -> Option<Duration> {
        let shard_manager = {
            let data = ctx.data.read().await;
            data.get::<ShardManagerContainer>()?.clone()
        };
        let manager = shard_manager.lock().await;
        let runners = manager.runners.lock().await;
        runners.get(&ShardId(ctx.shard_id))?.latency
    }
}

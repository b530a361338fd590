//! In-memory stand-in for a Discord guild.

use serenity::async_trait;
use serenity::model::id::UserId;
use serenity::model::permissions::Permissions;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::platform::{ModerationApi, TargetMember};

pub struct FakeGuild {
    pub permissions: Permissions,
    pub members: HashMap<UserId, String>,
    pub reject_calls: bool,
    pub failing_lookups: bool,
    pub calls: Mutex<Vec<String>>,
}

impl FakeGuild {
    pub fn with_permissions(permissions: Permissions) -> Self {
        FakeGuild {
            permissions,
            members: HashMap::new(),
            reject_calls: false,
            failing_lookups: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn member(mut self, id: u64, tag: &str) -> Self {
        self.members.insert(UserId(id), tag.to_string());
        self
    }

    pub fn rejecting(mut self) -> Self {
        self.reject_calls = true;
        self
    }

    pub fn failing_lookups(mut self) -> Self {
        self.failing_lookups = true;
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: &str, user_id: UserId) -> serenity::Result<()> {
        if self.reject_calls {
            return Err(serenity::Error::Other("Missing Permissions"));
        }
        self.calls.lock().unwrap().push(format!("{} {}", call, user_id.0));
        Ok(())
    }
}

#[async_trait]
impl ModerationApi for FakeGuild {
    async fn invoker_permissions(&self) -> serenity::Result<Permissions> {
        Ok(self.permissions)
    }

    async fn find_member(&self, user_id: UserId) -> serenity::Result<Option<TargetMember>> {
        if self.failing_lookups {
            return Err(serenity::Error::Other("Discord API unavailable"));
        }
        Ok(self.members.get(&user_id).map(|tag| TargetMember {
            user_id,
            tag: tag.clone(),
        }))
    }

    async fn kick(&self, user_id: UserId) -> serenity::Result<()> {
        self.record("kick", user_id)
    }

    async fn ban(&self, user_id: UserId) -> serenity::Result<()> {
        self.record("ban", user_id)
    }

    async fn unban(&self, user_id: UserId) -> serenity::Result<()> {
        self.record("unban", user_id)
    }
}

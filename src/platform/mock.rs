//! In-memory [`Platform`] that records every call, for tests.

use async_trait::async_trait;
use parking_lot::Mutex;
use poise::serenity_prelude::{ChannelId, GuildId, MessageId, RoleId, UserId};
use std::collections::HashMap;

use super::Platform;
use crate::error::{BotError, Result};
use crate::verification::{
    ChannelInfo, MemberInfo, NewRole, ReactingUser, RoleInfo, VerificationPrompt,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    FetchUser(UserId),
    GuildChannels(GuildId),
    SendPrompt(ChannelId, VerificationPrompt),
    AddReaction(ChannelId, MessageId, String),
    Member(GuildId, UserId),
    GuildRoles(GuildId),
    CreateRole(GuildId, NewRole),
    AddMemberRole(GuildId, UserId, RoleId),
    RemoveMemberRole(GuildId, UserId, RoleId),
}

impl Call {
    pub fn is_role_mutation(&self) -> bool {
        matches!(
            self,
            Call::CreateRole(..) | Call::AddMemberRole(..) | Call::RemoveMemberRole(..)
        )
    }

    pub fn touches_roles(&self) -> bool {
        self.is_role_mutation() || matches!(self, Call::GuildRoles(..))
    }
}

fn failure(what: &str) -> BotError {
    BotError::Discord {
        message: format!("{} failed", what),
    }
}

#[derive(Default)]
pub struct MockPlatform {
    pub calls: Mutex<Vec<Call>>,
    pub channels: Vec<ChannelInfo>,
    pub users: HashMap<UserId, ReactingUser>,
    pub members: Vec<UserId>,
    pub roles: Mutex<Vec<RoleInfo>>,
    pub next_message_id: u64,
    pub fail_send: bool,
    pub fail_react: bool,
    pub fail_create_role: bool,
    pub fail_add_role: bool,
    pub fail_remove_role: bool,
}

impl MockPlatform {
    pub fn new() -> Self {
        Self {
            next_message_id: 9000,
            ..Default::default()
        }
    }

    pub fn with_channels(mut self, channels: Vec<ChannelInfo>) -> Self {
        self.channels = channels;
        self
    }

    pub fn with_user(mut self, user: ReactingUser) -> Self {
        self.users.insert(user.id, user);
        self
    }

    pub fn with_member(mut self, user_id: UserId) -> Self {
        self.members.push(user_id);
        self
    }

    pub fn with_role(self, id: u64, name: &str) -> Self {
        self.roles.lock().push(RoleInfo {
            id: RoleId::new(id),
            name: name.to_string(),
        });
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().clear();
    }

    fn record(&self, call: Call) {
        self.calls.lock().push(call);
    }
}

#[async_trait]
impl Platform for MockPlatform {
    async fn fetch_user(&self, user_id: UserId) -> Result<ReactingUser> {
        self.record(Call::FetchUser(user_id));
        self.users
            .get(&user_id)
            .cloned()
            .ok_or_else(|| failure("fetch user"))
    }

    async fn guild_channels(&self, guild_id: GuildId) -> Result<Vec<ChannelInfo>> {
        self.record(Call::GuildChannels(guild_id));
        Ok(self.channels.clone())
    }

    async fn send_prompt(
        &self,
        channel_id: ChannelId,
        prompt: &VerificationPrompt,
    ) -> Result<MessageId> {
        self.record(Call::SendPrompt(channel_id, prompt.clone()));
        if self.fail_send {
            return Err(failure("send"));
        }
        Ok(MessageId::new(self.next_message_id))
    }

    async fn add_reaction(
        &self,
        channel_id: ChannelId,
        message_id: MessageId,
        emoji: &str,
    ) -> Result<()> {
        self.record(Call::AddReaction(channel_id, message_id, emoji.to_string()));
        if self.fail_react {
            return Err(failure("react"));
        }
        Ok(())
    }

    async fn member(&self, guild_id: GuildId, user_id: UserId) -> Result<MemberInfo> {
        self.record(Call::Member(guild_id, user_id));
        if !self.members.contains(&user_id) {
            return Err(BotError::MemberNotFound {
                user_id: user_id.to_string(),
                guild_id: guild_id.to_string(),
            });
        }
        Ok(MemberInfo {
            user_id,
            display_name: format!("member-{}", user_id),
        })
    }

    async fn guild_roles(&self, guild_id: GuildId) -> Result<Vec<RoleInfo>> {
        self.record(Call::GuildRoles(guild_id));
        Ok(self.roles.lock().clone())
    }

    async fn create_role(&self, guild_id: GuildId, role: &NewRole) -> Result<RoleInfo> {
        self.record(Call::CreateRole(guild_id, role.clone()));
        if self.fail_create_role {
            return Err(failure("create role"));
        }
        let mut roles = self.roles.lock();
        let created = RoleInfo {
            id: RoleId::new(500 + roles.len() as u64),
            name: role.name.clone(),
        };
        roles.push(created.clone());
        Ok(created)
    }

    async fn add_member_role(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        role_id: RoleId,
    ) -> Result<()> {
        self.record(Call::AddMemberRole(guild_id, user_id, role_id));
        if self.fail_add_role {
            return Err(failure("add role"));
        }
        Ok(())
    }

    async fn remove_member_role(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        role_id: RoleId,
    ) -> Result<()> {
        self.record(Call::RemoveMemberRole(guild_id, user_id, role_id));
        if self.fail_remove_role {
            return Err(failure("remove role"));
        }
        Ok(())
    }
}

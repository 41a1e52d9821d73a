//! Outbound calls to the chat platform.
//!
//! The verification controller only talks to Discord through [`Platform`],
//! so its behaviour can be exercised against an in-memory implementation.

pub mod discord;
#[cfg(test)]
pub mod mock;

use async_trait::async_trait;
use poise::serenity_prelude::{ChannelId, GuildId, MessageId, RoleId, UserId};

use crate::error::Result;
use crate::verification::{
    ChannelInfo, MemberInfo, NewRole, ReactingUser, RoleInfo, VerificationPrompt,
};

pub use discord::DiscordPlatform;

#[async_trait]
pub trait Platform: Send + Sync {
    /// Fetch full data for a user referenced by a partial payload
    async fn fetch_user(&self, user_id: UserId) -> Result<ReactingUser>;

    /// Channels of a guild, in the order they are listed in the client
    async fn guild_channels(&self, guild_id: GuildId) -> Result<Vec<ChannelInfo>>;

    /// Post the prompt embed, returning the new message id
    async fn send_prompt(
        &self,
        channel_id: ChannelId,
        prompt: &VerificationPrompt,
    ) -> Result<MessageId>;

    async fn add_reaction(
        &self,
        channel_id: ChannelId,
        message_id: MessageId,
        emoji: &str,
    ) -> Result<()>;

    async fn member(&self, guild_id: GuildId, user_id: UserId) -> Result<MemberInfo>;

    async fn guild_roles(&self, guild_id: GuildId) -> Result<Vec<RoleInfo>>;

    async fn create_role(&self, guild_id: GuildId, role: &NewRole) -> Result<RoleInfo>;

    async fn add_member_role(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        role_id: RoleId,
    ) -> Result<()>;

    async fn remove_member_role(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        role_id: RoleId,
    ) -> Result<()>;
}

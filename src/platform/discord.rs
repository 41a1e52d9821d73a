use async_trait::async_trait;
use poise::serenity_prelude::{self as serenity, ChannelId, GuildId, MessageId, RoleId, UserId};
use tracing::debug;

use super::Platform;
use crate::error::{BotError, Result};
use crate::verification::{
    ChannelInfo, MemberInfo, NewRole, ReactingUser, RoleInfo, VerificationPrompt,
};

/// [`Platform`] backed by a live serenity client
pub struct DiscordPlatform<'a> {
    ctx: &'a serenity::Context,
}

impl<'a> DiscordPlatform<'a> {
    pub fn new(ctx: &'a serenity::Context) -> Self {
        Self { ctx }
    }
}

/// Channels that accept regular messages
fn is_text_capable(kind: serenity::ChannelType) -> bool {
    matches!(
        kind,
        serenity::ChannelType::Text | serenity::ChannelType::News
    )
}

#[async_trait]
impl Platform for DiscordPlatform<'_> {
    async fn fetch_user(&self, user_id: UserId) -> Result<ReactingUser> {
        let user = user_id.to_user(self.ctx).await?;
        Ok(ReactingUser {
            id: user.id,
            tag: user.tag(),
            bot: user.bot,
        })
    }

    async fn guild_channels(&self, guild_id: GuildId) -> Result<Vec<ChannelInfo>> {
        let channels = guild_id.channels(&self.ctx.http).await?;

        let mut channels: Vec<serenity::GuildChannel> = channels.into_values().collect();
        channels.sort_by_key(|c| (c.position, c.id));

        debug!("Fetched {} channels for guild {}", channels.len(), guild_id);

        Ok(channels
            .into_iter()
            .map(|c| ChannelInfo {
                id: c.id,
                text_capable: is_text_capable(c.kind),
                name: c.name,
            })
            .collect())
    }

    async fn send_prompt(
        &self,
        channel_id: ChannelId,
        prompt: &VerificationPrompt,
    ) -> Result<MessageId> {
        let embed = serenity::CreateEmbed::new()
            .title(&prompt.title)
            .description(&prompt.description)
            .colour(prompt.colour)
            .footer(serenity::CreateEmbedFooter::new(&prompt.footer));

        let message = channel_id
            .send_message(&self.ctx.http, serenity::CreateMessage::new().embed(embed))
            .await?;

        Ok(message.id)
    }

    async fn add_reaction(
        &self,
        channel_id: ChannelId,
        message_id: MessageId,
        emoji: &str,
    ) -> Result<()> {
        let reaction =
            serenity::ReactionType::try_from(emoji).map_err(|_| BotError::InvalidEmoji {
                emoji: emoji.to_string(),
            })?;

        channel_id
            .create_reaction(&self.ctx.http, message_id, reaction)
            .await?;
        Ok(())
    }

    async fn member(&self, guild_id: GuildId, user_id: UserId) -> Result<MemberInfo> {
        let member = guild_id.member(self.ctx, user_id).await.map_err(|e| {
            debug!("Member lookup for {} failed: {}", user_id, e);
            BotError::MemberNotFound {
                user_id: user_id.to_string(),
                guild_id: guild_id.to_string(),
            }
        })?;

        Ok(MemberInfo {
            user_id: member.user.id,
            display_name: member.display_name().to_string(),
        })
    }

    async fn guild_roles(&self, guild_id: GuildId) -> Result<Vec<RoleInfo>> {
        let roles = guild_id.roles(&self.ctx.http).await?;

        let mut roles: Vec<serenity::Role> = roles.into_values().collect();
        roles.sort_by_key(|r| (r.position, r.id));

        Ok(roles
            .into_iter()
            .map(|r| RoleInfo {
                id: r.id,
                name: r.name,
            })
            .collect())
    }

    async fn create_role(&self, guild_id: GuildId, role: &NewRole) -> Result<RoleInfo> {
        let created = guild_id
            .create_role(
                self.ctx,
                serenity::EditRole::new()
                    .name(&role.name)
                    .colour(role.colour)
                    .audit_log_reason(&role.reason),
            )
            .await?;

        Ok(RoleInfo {
            id: created.id,
            name: created.name,
        })
    }

    async fn add_member_role(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        role_id: RoleId,
    ) -> Result<()> {
        self.ctx
            .http
            .add_member_role(guild_id, user_id, role_id, None)
            .await?;
        Ok(())
    }

    async fn remove_member_role(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        role_id: RoleId,
    ) -> Result<()> {
        self.ctx
            .http
            .remove_member_role(guild_id, user_id, role_id, None)
            .await?;
        Ok(())
    }
}

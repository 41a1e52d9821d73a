use poise::serenity_prelude::{ChannelId, GuildId, MessageId, RoleId, UserId};

use crate::error::Result;
use crate::platform::Platform;

/// The prompt message whose reactions drive verification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WatchedMessage {
    pub channel_id: ChannelId,
    pub message_id: MessageId,
}

/// A guild channel as seen during channel selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelInfo {
    pub id: ChannelId,
    pub name: String,
    /// Whether messages can be posted in the channel
    pub text_capable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleInfo {
    pub id: RoleId,
    pub name: String,
}

/// Role to create when the verified role is missing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRole {
    pub name: String,
    pub colour: u32,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberInfo {
    pub user_id: UserId,
    pub display_name: String,
}

/// Full data about the user behind a reaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactingUser {
    pub id: UserId,
    pub tag: String,
    pub bot: bool,
}

/// Embed content of the verification prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationPrompt {
    pub title: String,
    pub description: String,
    pub colour: u32,
    pub footer: String,
}

/// A reaction added to or removed from some message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactionEvent {
    pub guild_id: GuildId,
    pub channel_id: ChannelId,
    pub message_id: MessageId,
    pub user_id: UserId,
    /// Unicode emoji, or the name of a custom emoji
    pub emoji_name: Option<String>,
    /// Present when the payload carried the user; `None` means partial
    pub user: Option<ReactingUser>,
}

impl ReactionEvent {
    pub fn is_partial(&self) -> bool {
        self.user.is_none()
    }

    /// Full user data for this reaction, fetched when the payload was partial
    pub async fn resolve_user(&self, platform: &dyn Platform) -> Result<ReactingUser> {
        match &self.user {
            Some(user) => Ok(user.clone()),
            None => platform.fetch_user(self.user_id).await,
        }
    }
}

/// Name part of a configured emoji.
///
/// Custom emojis may be configured in mention form (`<:name:id>` or
/// `<a:name:id>`); reaction payloads only carry the name.
pub fn configured_emoji_name(configured: &str) -> &str {
    let Some(inner) = configured
        .strip_prefix('<')
        .and_then(|s| s.strip_suffix('>'))
    else {
        return configured;
    };

    let mut parts = inner.split(':');
    match (parts.next(), parts.next(), parts.next()) {
        (Some("" | "a"), Some(name), Some(_id)) if !name.is_empty() => name,
        _ => configured,
    }
}

/// Whether a reaction's emoji name is the configured verification emoji
pub fn emoji_matches(configured: &str, name: Option<&str>) -> bool {
    match name {
        Some(name) => name == configured || name == configured_emoji_name(configured),
        None => false,
    }
}

/// Pick the channel the prompt is posted in.
///
/// Prefers a text channel named `preferred`, otherwise the first text
/// channel in the given order.
pub fn select_channel<'a>(channels: &'a [ChannelInfo], preferred: &str) -> Option<&'a ChannelInfo> {
    channels
        .iter()
        .find(|c| c.text_capable && c.name == preferred)
        .or_else(|| channels.iter().find(|c| c.text_capable))
}

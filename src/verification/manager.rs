use once_cell::sync::OnceCell;
use poise::serenity_prelude::{ChannelId, GuildId, MessageId, RoleId};
use tracing::{debug, error, info, warn};

use super::types::{
    emoji_matches, select_channel, NewRole, ReactionEvent, RoleInfo, VerificationPrompt,
    WatchedMessage,
};
use crate::config::VerificationConfig;
use crate::error::Result;
use crate::messages::{verification_prompt, ROLE_CREATE_REASON, VERIFIED_COLOUR};
use crate::platform::Platform;

/// What the startup sequence ended with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartupOutcome {
    /// Prompt posted and seeded; reactions on it are now actionable
    Posted(WatchedMessage),
    /// A prompt was already posted by this process
    AlreadyPosted(WatchedMessage),
    NoGuild,
    ChannelListFailed,
    NoTextChannel,
    PostFailed,
}

/// What a single reaction event ended with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReactionOutcome {
    IgnoredBot,
    /// Not the watched message, or not the verification emoji
    Unmatched,
    UserFetchFailed,
    MemberNotFound,
    RoleLookupFailed,
    /// Verified role absent on removal
    RoleMissing,
    RoleCreateFailed,
    RoleChangeFailed,
    Granted { role_id: RoleId, created: bool },
    Revoked { role_id: RoleId },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReactionKind {
    Added,
    Removed,
}

/// Posts the verification prompt and maps reactions on it to role changes.
///
/// The watched message is set at most once per process. Every handler is
/// its own error boundary: failures are logged and reported as an outcome,
/// never returned.
pub struct VerificationController {
    config: VerificationConfig,
    watched: OnceCell<WatchedMessage>,
}

impl VerificationController {
    pub fn new(config: VerificationConfig) -> Self {
        Self {
            config,
            watched: OnceCell::new(),
        }
    }

    pub fn watched_message(&self) -> Option<WatchedMessage> {
        self.watched.get().copied()
    }

    fn is_watched(&self, message_id: MessageId) -> bool {
        self.watched
            .get()
            .is_some_and(|w| w.message_id == message_id)
    }

    /// Run the startup sequence against the guilds the session belongs to
    pub async fn start(&self, platform: &dyn Platform, guilds: &[GuildId]) -> StartupOutcome {
        if let Some(watched) = self.watched_message() {
            warn!(
                "Verification message {} already posted, skipping startup",
                watched.message_id
            );
            return StartupOutcome::AlreadyPosted(watched);
        }

        let Some(&guild_id) = guilds.first() else {
            error!("Bot is not in any server!");
            return StartupOutcome::NoGuild;
        };

        let channels = match platform.guild_channels(guild_id).await {
            Ok(channels) => channels,
            Err(e) => {
                error!("Failed to list channels for guild {}: {}", guild_id, e);
                return StartupOutcome::ChannelListFailed;
            }
        };

        let Some(channel) = select_channel(&channels, &self.config.verification_channel_name)
        else {
            error!("No text channels found in guild {}!", guild_id);
            return StartupOutcome::NoTextChannel;
        };

        info!("Using channel: #{} for verification", channel.name);

        let prompt = verification_prompt(&self.config.verification_message);
        let watched = match self.post_prompt(platform, channel.id, &prompt).await {
            Ok(watched) => watched,
            Err(e) => {
                error!("Error posting verification message: {}", e);
                return StartupOutcome::PostFailed;
            }
        };

        if let Err(ours) = self.watched.set(watched) {
            let current = self.watched_message().unwrap_or(ours);
            warn!(
                "Verification message {} already watched, leaving {} unwatched",
                current.message_id, ours.message_id
            );
            return StartupOutcome::AlreadyPosted(current);
        }

        info!("Verification message posted in #{}", channel.name);
        StartupOutcome::Posted(watched)
    }

    /// Send the prompt and seed it with the verification emoji
    async fn post_prompt(
        &self,
        platform: &dyn Platform,
        channel_id: ChannelId,
        prompt: &VerificationPrompt,
    ) -> Result<WatchedMessage> {
        let message_id = platform.send_prompt(channel_id, prompt).await?;
        platform
            .add_reaction(channel_id, message_id, &self.config.verification_emoji)
            .await?;

        Ok(WatchedMessage {
            channel_id,
            message_id,
        })
    }

    /// A user reacted: grant the verified role, creating it if needed
    pub async fn handle_reaction_added(
        &self,
        platform: &dyn Platform,
        event: &ReactionEvent,
    ) -> ReactionOutcome {
        self.handle_reaction(platform, event, ReactionKind::Added)
            .await
    }

    /// A user un-reacted: revoke the verified role if it exists
    pub async fn handle_reaction_removed(
        &self,
        platform: &dyn Platform,
        event: &ReactionEvent,
    ) -> ReactionOutcome {
        self.handle_reaction(platform, event, ReactionKind::Removed)
            .await
    }

    async fn handle_reaction(
        &self,
        platform: &dyn Platform,
        event: &ReactionEvent,
        kind: ReactionKind,
    ) -> ReactionOutcome {
        // Bot flag is known up front unless the payload is partial
        if event.user.as_ref().is_some_and(|u| u.bot) {
            return ReactionOutcome::IgnoredBot;
        }

        if !self.is_watched(event.message_id)
            || !emoji_matches(
                &self.config.verification_emoji,
                event.emoji_name.as_deref(),
            )
        {
            debug!(
                "Ignoring reaction {:?} on message {} in channel {}",
                event.emoji_name, event.message_id, event.channel_id
            );
            return ReactionOutcome::Unmatched;
        }

        // Partial payloads are hydrated for matching events only
        if event.is_partial() {
            debug!("Fetching user {} for partial reaction", event.user_id);
        }

        let user = match event.resolve_user(platform).await {
            Ok(user) => user,
            Err(e) => {
                error!("Error fetching reaction user {}: {}", event.user_id, e);
                return ReactionOutcome::UserFetchFailed;
            }
        };

        if user.bot {
            return ReactionOutcome::IgnoredBot;
        }

        let guild_id = event.guild_id;
        let role_name = &self.config.verified_role_name;

        let member = match platform.member(guild_id, user.id).await {
            Ok(member) => member,
            Err(e) => {
                error!("Could not find member {}: {}", user.tag, e);
                return ReactionOutcome::MemberNotFound;
            }
        };
        debug!("Resolved {} as member {}", member.user_id, member.display_name);

        let existing = match platform.guild_roles(guild_id).await {
            Ok(roles) => roles.into_iter().find(|r| &r.name == role_name),
            Err(e) => {
                error!("Error looking up roles in guild {}: {}", guild_id, e);
                return ReactionOutcome::RoleLookupFailed;
            }
        };

        match kind {
            ReactionKind::Added => {
                let (role, created) = match existing {
                    Some(role) => (role, false),
                    None => match self.create_verified_role(platform, guild_id).await {
                        Ok(role) => (role, true),
                        Err(e) => {
                            error!("Error creating verified role: {}", e);
                            return ReactionOutcome::RoleCreateFailed;
                        }
                    },
                };

                match platform.add_member_role(guild_id, user.id, role.id).await {
                    Ok(()) => {
                        info!("Added {} role to {}", role_name, user.tag);
                        ReactionOutcome::Granted {
                            role_id: role.id,
                            created,
                        }
                    }
                    Err(e) => {
                        error!("Error adding role to {}: {}", user.tag, e);
                        ReactionOutcome::RoleChangeFailed
                    }
                }
            }
            ReactionKind::Removed => {
                let Some(role) = existing else {
                    error!("{} role not found", role_name);
                    return ReactionOutcome::RoleMissing;
                };

                match platform.remove_member_role(guild_id, user.id, role.id).await {
                    Ok(()) => {
                        info!("Removed {} role from {}", role_name, user.tag);
                        ReactionOutcome::Revoked { role_id: role.id }
                    }
                    Err(e) => {
                        error!("Error removing role from {}: {}", user.tag, e);
                        ReactionOutcome::RoleChangeFailed
                    }
                }
            }
        }
    }

    async fn create_verified_role(
        &self,
        platform: &dyn Platform,
        guild_id: GuildId,
    ) -> Result<RoleInfo> {
        let role = platform
            .create_role(
                guild_id,
                &NewRole {
                    name: self.config.verified_role_name.clone(),
                    colour: VERIFIED_COLOUR,
                    reason: ROLE_CREATE_REASON.to_string(),
                },
            )
            .await?;

        info!("Created {} role", role.name);
        Ok(role)
    }
}

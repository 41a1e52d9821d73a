use poise::serenity_prelude as serenity;
use tracing::debug;

use crate::platform::DiscordPlatform;
use crate::verification::{ReactingUser, ReactionEvent};
use crate::Data;

/// Name the verification emoji is compared against
pub fn emoji_name(emoji: &serenity::ReactionType) -> Option<String> {
    match emoji {
        serenity::ReactionType::Unicode(s) => Some(s.clone()),
        serenity::ReactionType::Custom { name, .. } => name.clone(),
        _ => None,
    }
}

/// Convert a gateway reaction into a [`ReactionEvent`].
///
/// Reactions outside a guild, or without a user, can't be verified and
/// yield `None`.
pub fn reaction_event(reaction: &serenity::Reaction) -> Option<ReactionEvent> {
    let guild_id = reaction.guild_id?;
    let user_id = reaction.user_id?;

    // Only guild add events carry the member; removals are always partial
    let user = reaction.member.as_ref().map(|m| ReactingUser {
        id: m.user.id,
        tag: m.user.tag(),
        bot: m.user.bot,
    });

    Some(ReactionEvent {
        guild_id,
        channel_id: reaction.channel_id,
        message_id: reaction.message_id,
        user_id,
        emoji_name: emoji_name(&reaction.emoji),
        user,
    })
}

/// Handle a reaction being added to any message
pub async fn handle_reaction_add(
    ctx: &serenity::Context,
    reaction: &serenity::Reaction,
    data: &Data,
) {
    let Some(event) = reaction_event(reaction) else {
        debug!("Ignoring reaction outside a guild on {}", reaction.message_id);
        return;
    };

    let platform = DiscordPlatform::new(ctx);
    let outcome = data
        .controller
        .handle_reaction_added(&platform, &event)
        .await;
    debug!("Reaction add on {} -> {:?}", event.message_id, outcome);
}

/// Handle a reaction being removed from any message
pub async fn handle_reaction_remove(
    ctx: &serenity::Context,
    reaction: &serenity::Reaction,
    data: &Data,
) {
    let Some(event) = reaction_event(reaction) else {
        debug!("Ignoring reaction outside a guild on {}", reaction.message_id);
        return;
    };

    let platform = DiscordPlatform::new(ctx);
    let outcome = data
        .controller
        .handle_reaction_removed(&platform, &event)
        .await;
    debug!("Reaction remove on {} -> {:?}", event.message_id, outcome);
}

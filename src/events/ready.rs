use poise::serenity_prelude as serenity;
use tracing::info;

use crate::platform::DiscordPlatform;
use crate::verification::{StartupOutcome, VerificationController};

/// Post the verification prompt once the session is ready
pub async fn handle_ready(
    ctx: &serenity::Context,
    ready: &serenity::Ready,
    controller: &VerificationController,
) -> StartupOutcome {
    info!(
        "Bot is online as {} (in {} guilds)",
        ready.user.name,
        ready.guilds.len()
    );

    let guild_ids: Vec<serenity::GuildId> = ready.guilds.iter().map(|g| g.id).collect();
    let platform = DiscordPlatform::new(ctx);

    controller.start(&platform, &guild_ids).await
}

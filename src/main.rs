use anyhow::{Context as _, Result};
use clap::Parser;
use dotenv::dotenv;
use poise::serenity_prelude as serenity;
use tracing::{error, info, warn};

/// Discord bot that grants a role to members who react to a verification prompt
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the JSON verification config
    #[arg(long, short = 'c', env = "CONFIG_PATH", default_value = "config.json")]
    config: String,
}

mod config;
mod error;
mod events;
mod logging;
mod messages;
mod platform;
mod verification;

use config::VerificationConfig;
use events::{handle_reaction_add, handle_reaction_remove, handle_ready};
use verification::{StartupOutcome, VerificationController};

type Error = Box<dyn std::error::Error + Send + Sync>;

/// Shared application state
pub struct Data {
    pub controller: VerificationController,
}

async fn event_handler(
    ctx: &serenity::Context,
    event: &serenity::FullEvent,
    _framework: poise::FrameworkContext<'_, Data, Error>,
    data: &Data,
) -> Result<(), Error> {
    match event {
        serenity::FullEvent::ReactionAdd { add_reaction } => {
            handle_reaction_add(ctx, add_reaction, data).await;
        }
        serenity::FullEvent::ReactionRemove { removed_reaction } => {
            handle_reaction_remove(ctx, removed_reaction, data).await;
        }
        _ => {}
    }
    Ok(())
}

/// Log the bot id encoded in the first segment of the token
fn log_bot_id(token: &str) {
    use base64::Engine;

    let Some(bot_id_b64) = token.split('.').next() else {
        return;
    };

    // Discord tokens use base64 without padding, usually URL-safe
    let decoded = base64::engine::general_purpose::STANDARD_NO_PAD
        .decode(bot_id_b64)
        .or_else(|_| base64::engine::general_purpose::URL_SAFE_NO_PAD.decode(bot_id_b64));

    if let Ok(Ok(id_str)) = decoded.map(String::from_utf8) {
        info!("Bot ID: {}", id_str);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    let args = Args::parse();

    logging::init();
    logging::install_panic_hook();

    let token = std::env::var("BOT_TOKEN")
        .or_else(|_| std::env::var("DISCORD_TOKEN"))
        .context("Missing BOT_TOKEN environment variable")?;
    log_bot_id(&token);

    info!("Loading verification config from {}...", args.config);
    let config = VerificationConfig::load_from_file(&args.config)?;
    info!(
        "Verifying with {} in #{} for role '{}'",
        config.verification_emoji, config.verification_channel_name, config.verified_role_name
    );

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: vec![],
            event_handler: |ctx, event, framework, data| {
                Box::pin(event_handler(ctx, event, framework, data))
            },
            on_error: |error| {
                Box::pin(async move {
                    match error {
                        poise::FrameworkError::Setup { error, .. } => {
                            error!("Error during setup: {}", error);
                        }
                        poise::FrameworkError::EventHandler { error, .. } => {
                            error!("Error in event handler: {}", error);
                        }
                        other => {
                            error!("Discord client error: {}", other);
                        }
                    }
                })
            },
            ..Default::default()
        })
        .setup(move |ctx, ready, _framework| {
            Box::pin(async move {
                let controller = VerificationController::new(config);

                // Startup failures are logged; the bot stays up without a watched message
                match handle_ready(ctx, ready, &controller).await {
                    StartupOutcome::Posted(watched) => {
                        info!(
                            "Watching message {} in channel {}",
                            watched.message_id, watched.channel_id
                        );
                    }
                    outcome => {
                        warn!("Verification inactive until restart ({:?})", outcome);
                    }
                }

                Ok(Data { controller })
            })
        })
        .build();

    let intents =
        serenity::GatewayIntents::GUILDS | serenity::GatewayIntents::GUILD_MESSAGE_REACTIONS;

    let mut client = serenity::ClientBuilder::new(token, intents)
        .framework(framework)
        .await
        .context("Failed to create Discord client")?;

    info!("Starting bot...");
    if let Err(e) = client.start().await {
        error!("Failed to login: {}", e);
        return Err(e.into());
    }
    warn!("Bot ended.");

    Ok(())
}

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BotError {
    // Configuration errors
    #[error("Failed to load config file '{path}': {source}")]
    ConfigLoad {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ConfigParse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    // Discord errors
    #[error("Discord API error: {message}")]
    Discord { message: String },

    #[error("Member not found: {user_id} in guild {guild_id}")]
    MemberNotFound { user_id: String, guild_id: String },

    #[error("Invalid emoji '{emoji}'")]
    InvalidEmoji { emoji: String },
}

impl From<serenity::Error> for BotError {
    fn from(err: serenity::Error) -> Self {
        BotError::Discord {
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, BotError>;

use serde::Deserialize;

/// Reaction verification settings, loaded from config.json
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationConfig {
    /// Channel the prompt is posted in, when it exists
    pub verification_channel_name: String,

    /// Body text of the prompt embed
    pub verification_message: String,

    /// Emoji users react with, unicode (`✅`) or custom (`<:name:id>`)
    pub verification_emoji: String,

    /// Role granted on reaction and revoked on un-reaction
    pub verified_role_name: String,
}

impl VerificationConfig {
    /// Load from a JSON file
    pub fn load_from_file(path: &str) -> crate::error::Result<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|e| crate::error::BotError::ConfigLoad {
                path: path.to_string(),
                source: e,
            })?;

        Self::from_json(&content).map_err(|e| crate::error::BotError::ConfigParse {
            path: path.to_string(),
            source: e,
        })
    }

    pub fn from_json(content: &str) -> serde_json::Result<Self> {
        serde_json::from_str(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BotError;

    #[test]
    fn test_parse_config() {
        let json = r##"{
            "verificationChannelName": "verify",
            "verificationMessage": "React below to get access.",
            "verificationEmoji": "✅",
            "verifiedRoleName": "Verified"
        }"##;

        let config = VerificationConfig::from_json(json).unwrap();
        assert_eq!(config.verification_channel_name, "verify");
        assert_eq!(config.verification_message, "React below to get access.");
        assert_eq!(config.verification_emoji, "✅");
        assert_eq!(config.verified_role_name, "Verified");
    }

    #[test]
    fn test_missing_field_is_rejected() {
        let json = r#"{
            "verificationChannelName": "verify",
            "verificationMessage": "React below to get access.",
            "verificationEmoji": "✅"
        }"#;

        assert!(VerificationConfig::from_json(json).is_err());
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let json = r#"{
            "verificationChannelName": "verify",
            "verificationMessage": "hi",
            "verificationEmoji": "✅",
            "verifiedRoleName": "Verified",
            "prefix": "!"
        }"#;

        assert!(VerificationConfig::from_json(json).is_ok());
    }

    #[test]
    fn test_load_missing_file() {
        let err = VerificationConfig::load_from_file("does/not/exist.json").unwrap_err();
        assert!(matches!(err, BotError::ConfigLoad { .. }));
        assert!(err.to_string().contains("does/not/exist.json"));
    }

    #[test]
    fn test_load_malformed_file() {
        let path = std::env::temp_dir().join(format!(
            "reaction-verify-malformed-{}.json",
            std::process::id()
        ));
        std::fs::write(&path, "{ not json").unwrap();

        let err = VerificationConfig::load_from_file(path.to_str().unwrap()).unwrap_err();
        assert!(matches!(err, BotError::ConfigParse { .. }));

        std::fs::remove_file(&path).ok();
    }
}

// src/messages.rs

use crate::verification::VerificationPrompt;

/// Green used for the prompt embed and the created role
pub const VERIFIED_COLOUR: u32 = 0x00ff00;

pub const PROMPT_TITLE: &str = "Gotta make sure you're human!";
pub const PROMPT_FOOTER: &str = "Click the reaction below to verify!";

pub const ROLE_CREATE_REASON: &str = "Verification role created by bot";

pub fn verification_prompt(body: &str) -> VerificationPrompt {
    VerificationPrompt {
        title: PROMPT_TITLE.to_string(),
        description: body.to_string(),
        colour: VERIFIED_COLOUR,
        footer: PROMPT_FOOTER.to_string(),
    }
}

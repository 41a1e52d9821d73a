pub mod manager;
pub mod types;

pub use manager::{StartupOutcome, VerificationController};
pub use types::{
    ChannelInfo, MemberInfo, NewRole, ReactingUser, ReactionEvent, RoleInfo, VerificationPrompt,
};

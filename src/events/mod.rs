pub mod reaction;
pub mod ready;

pub use reaction::{handle_reaction_add, handle_reaction_remove};
pub use ready::handle_ready;

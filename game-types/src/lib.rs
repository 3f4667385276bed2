pub mod errors;
pub mod game;
pub mod messages;
pub mod team;

// Re-export all types
pub use errors::*;
pub use game::*;
pub use messages::*;
pub use team::*;

pub type SessionId = uuid::Uuid;

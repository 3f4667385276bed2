pub mod alphabet;
pub mod game_events;
pub mod game_state;
pub mod round;
pub mod scoring;
pub mod session;
pub mod transitions;
pub mod word_bank;

// Re-export main components
pub use alphabet::{ALPHABET, normalize, normalize_word};
pub use game_events::*;
pub use game_state::*;
pub use round::{GuessOutcome, Round, RoundState, failure_stages, revealed_parts};
pub use scoring::*;
pub use session::{Participants, Roster, Session, Stage, Team, Teams};
pub use transitions::*;
pub use word_bank::*;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::{GameMode, ParticipantsView, ScoreLine, SessionId, TeamSide};

/// Mistake budget for a session. Each level maps to its own failure-stage
/// sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Difficulty {
    Easy, // 12 mistakes
    #[default]
    Medium, // 8 mistakes
    Hard, // 4 mistakes
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn max_mistakes(self) -> u32 {
        match self {
            Difficulty::Easy => 12,
            Difficulty::Medium => 8,
            Difficulty::Hard => 4,
        }
    }

    /// Maps a raw mistake budget to a level. Unsupported budgets fall back to
    /// `Medium`.
    pub fn from_max_mistakes(max_mistakes: u32) -> Self {
        Self::ALL
            .into_iter()
            .find(|level| level.max_mistakes() == max_mistakes)
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum HangmanPart {
    Head,
    Body,
    ArmRight,
    ArmLeft,
    LegRight,
    LegLeft,
    EyeRight,
    EyeLeft,
    Mouth,
    EarRight,
    EarLeft,
    Hair,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum LetterState {
    Unguessed,
    Correct,   // Green - letter is in the word
    Incorrect, // Red - letter is not in the word
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct KeyState {
    pub letter: String,
    pub state: LetterState,
}

/// One position of the secret word as the guessers see it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum WordSlot {
    Space,
    Hidden,
    Revealed { letter: String }, // Raw letterform as the word-master typed it
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum RoundOutcome {
    Win,
    Loss,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum SessionPhase {
    Setup,                               // Rosters and settings are editable
    AwaitingSecretWord,                  // Word-master is typing
    InProgress,                          // Guessers are picking letters
    Resolved { outcome: RoundOutcome },  // Dwell before the summary
    RoundOver,                           // Summary shown, waiting for continue
    MatchOver,                           // A team reached the target score
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum NextAction {
    NextRound,
    NewMatch,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RoundSummary {
    pub outcome: RoundOutcome,
    pub title: String,
    pub message: String,
    pub word: String,
    pub continue_label: String,
    pub next_action: NextAction,
    pub point_to: Option<TeamSide>,
    pub match_winner: Option<TeamSide>,
    pub scores: Vec<ScoreLine>,
}

/// Everything a presentation layer needs to draw the current session.
/// The secret word only appears through `word` slots, which hide unguessed
/// letters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SessionSnapshot {
    pub id: SessionId,
    pub mode: GameMode,
    pub phase: SessionPhase,
    pub participants: ParticipantsView,
    pub word_master: Option<String>,
    pub word_master_team: Option<TeamSide>,
    pub guessing_team: Option<TeamSide>,
    pub word: Vec<WordSlot>,
    pub keyboard: Vec<KeyState>,
    pub wrong_guesses: u32,
    pub max_mistakes: u32,
    pub difficulty: Difficulty,
    pub revealed_parts: Vec<HangmanPart>,
    pub is_losing: bool,
    pub hint: Option<String>,
    pub target_score: u32,
    pub scores: Vec<ScoreLine>,
    pub summary: Option<RoundSummary>,
    pub created_at: String, // ISO 8601 string
}

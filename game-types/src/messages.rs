use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::{GameMode, RoundSummary, SessionSnapshot, TeamSide};

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum ClientMessage {
    SelectMode { mode: GameMode },
    AddParticipant { team: Option<TeamSide>, name: String },
    RemoveParticipant { team: Option<TeamSide>, index: usize },
    SetTeamName { team: TeamSide, name: String },
    SetDifficulty { max_mistakes: u32 },
    SetTargetScore { target: u32 },
    StartMatch,
    SubmitSecretWord { word: String, hint: String },
    GuessLetter { letter: String },
    Continue,
    RequestSuggestions,
    ReturnToMenu,
    Heartbeat,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Suggestion {
    pub category: String,
    pub word: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum ServerMessage {
    StateUpdate { state: SessionSnapshot },
    RoundEnded { summary: RoundSummary },
    Suggestions { suggestions: Vec<Suggestion> },
    ReturnedToMenu,
    Error { message: String },
}

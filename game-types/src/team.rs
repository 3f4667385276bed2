use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum GameMode {
    SoloPlayers, // Players take turns as word-master
    Teams,       // Two sides swap word-master role every round
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum TeamSide {
    TeamA,
    TeamB,
}

impl TeamSide {
    pub const BOTH: [TeamSide; 2] = [TeamSide::TeamA, TeamSide::TeamB];

    pub fn opponent(self) -> Self {
        match self {
            TeamSide::TeamA => TeamSide::TeamB,
            TeamSide::TeamB => TeamSide::TeamA,
        }
    }

    /// Display name used until the players rename the side.
    pub fn default_name(self) -> &'static str {
        match self {
            TeamSide::TeamA => "الأبطال",
            TeamSide::TeamB => "النجوم",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TeamView {
    pub side: TeamSide,
    pub name: String,
    pub members: Vec<String>,
    pub score: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum ParticipantsView {
    Solo { players: Vec<String> },
    Teams { teams: Vec<TeamView> },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScoreLine {
    pub side: TeamSide,
    pub name: String,
    pub score: u32,
}

use game_types::{
    Difficulty, GameError, GameMode, ParticipantsView, RoundSummary, ScoreLine, SessionId,
    SessionPhase, SessionSnapshot, TeamSide, TeamView,
};
use uuid::Uuid;

use crate::round::{Round, RoundState};

/// Ordered list of names with a rotation cursor. The cursor is kept in
/// bounds on every mutation, so `current` never indexes past the end.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    members: Vec<String>,
    cursor: usize,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a trimmed name. Names are compared exactly, case included.
    pub fn add(&mut self, name: &str) -> Result<(), GameError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(GameError::EmptyInput);
        }
        if self.members.iter().any(|member| member == name) {
            return Err(GameError::DuplicateParticipant {
                name: name.to_string(),
            });
        }
        self.members.push(name.to_string());
        Ok(())
    }

    pub fn remove_at(&mut self, index: usize) -> Result<String, GameError> {
        if index >= self.members.len() {
            return Err(GameError::InvalidIndex {
                index,
                len: self.members.len(),
            });
        }
        let removed = self.members.remove(index);
        self.cursor = match self.members.len() {
            0 => 0,
            len => self.cursor % len,
        };
        Ok(removed)
    }

    pub fn current(&self) -> Option<&str> {
        self.current_index()
            .and_then(|index| self.members.get(index))
            .map(String::as_str)
    }

    pub fn current_index(&self) -> Option<usize> {
        match self.members.len() {
            0 => None,
            len => Some(self.cursor % len),
        }
    }

    /// Move the cursor to the next member, wrapping at the end.
    pub fn advance(&mut self) {
        if let Some(index) = self.current_index() {
            self.cursor = (index + 1) % self.members.len();
        }
    }

    pub fn members(&self) -> &[String] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct Team {
    pub name: String,
    pub roster: Roster,
    pub score: u32,
}

impl Team {
    fn new(side: TeamSide) -> Self {
        Self {
            name: side.default_name().to_string(),
            roster: Roster::new(),
            score: 0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Teams {
    team_a: Team,
    team_b: Team,
    word_master: TeamSide,
}

impl Teams {
    fn new() -> Self {
        Self {
            team_a: Team::new(TeamSide::TeamA),
            team_b: Team::new(TeamSide::TeamB),
            word_master: TeamSide::TeamA,
        }
    }

    pub fn team(&self, side: TeamSide) -> &Team {
        match side {
            TeamSide::TeamA => &self.team_a,
            TeamSide::TeamB => &self.team_b,
        }
    }

    pub fn team_mut(&mut self, side: TeamSide) -> &mut Team {
        match side {
            TeamSide::TeamA => &mut self.team_a,
            TeamSide::TeamB => &mut self.team_b,
        }
    }

    pub fn word_master(&self) -> TeamSide {
        self.word_master
    }

    pub fn guessing(&self) -> TeamSide {
        self.word_master.opponent()
    }

    /// Hand the word-master role to the side that was guessing.
    pub fn swap_roles(&mut self) {
        self.word_master = self.word_master.opponent();
    }

    pub fn score_lines(&self) -> Vec<ScoreLine> {
        TeamSide::BOTH
            .into_iter()
            .map(|side| ScoreLine {
                side,
                name: self.team(side).name.clone(),
                score: self.team(side).score,
            })
            .collect()
    }
}

/// Mode-specific payload. The variant fixes the session mode for its whole
/// lifetime.
#[derive(Debug, Clone)]
pub enum Participants {
    Solo(Roster),
    Teams(Teams),
}

impl Participants {
    pub fn mode(&self) -> GameMode {
        match self {
            Participants::Solo(_) => GameMode::SoloPlayers,
            Participants::Teams(_) => GameMode::Teams,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Setup,
    Playing,
    RoundOver,
    MatchOver,
}

#[derive(Debug, Clone)]
pub struct Session {
    id: SessionId,
    created_at: String,
    pub(crate) participants: Participants,
    difficulty: Difficulty,
    target_score: u32,
    pub(crate) stage: Stage,
    pub(crate) round: Round,
    pub(crate) last_summary: Option<RoundSummary>,
}

impl Session {
    pub fn new(mode: GameMode, difficulty: Difficulty, target_score: u32) -> Self {
        let participants = match mode {
            GameMode::SoloPlayers => Participants::Solo(Roster::new()),
            GameMode::Teams => Participants::Teams(Teams::new()),
        };

        Self {
            id: Uuid::new_v4(),
            created_at: chrono::Utc::now().to_rfc3339(),
            participants,
            difficulty,
            target_score: target_score.max(1),
            stage: Stage::Setup,
            round: Round::new(difficulty.max_mistakes()),
            last_summary: None,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn mode(&self) -> GameMode {
        self.participants.mode()
    }

    pub fn participants(&self) -> &Participants {
        &self.participants
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn target_score(&self) -> u32 {
        self.target_score
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn round(&self) -> &Round {
        &self.round
    }

    pub fn last_summary(&self) -> Option<&RoundSummary> {
        self.last_summary.as_ref()
    }

    pub fn phase(&self) -> SessionPhase {
        match self.stage {
            Stage::Setup => SessionPhase::Setup,
            Stage::RoundOver => SessionPhase::RoundOver,
            Stage::MatchOver => SessionPhase::MatchOver,
            Stage::Playing => match self.round.state() {
                RoundState::AwaitingSecretWord => SessionPhase::AwaitingSecretWord,
                RoundState::InProgress => SessionPhase::InProgress,
                RoundState::Resolved(outcome) => SessionPhase::Resolved { outcome },
            },
        }
    }

    pub(crate) fn ensure_stage(&self, expected: Stage) -> Result<(), GameError> {
        if self.stage == expected {
            Ok(())
        } else {
            Err(GameError::InvalidPhase {
                current_phase: format!("{:?}", self.phase()),
            })
        }
    }

    fn roster_mut(&mut self, side: Option<TeamSide>) -> Result<&mut Roster, GameError> {
        let mode = self.mode();
        match (&mut self.participants, side) {
            (Participants::Solo(roster), None) => Ok(roster),
            (Participants::Teams(teams), Some(side)) => Ok(&mut teams.team_mut(side).roster),
            _ => Err(GameError::WrongMode { mode }),
        }
    }

    /// `side` names the roster in team mode and must be `None` for solo play.
    pub fn add_participant(&mut self, side: Option<TeamSide>, name: &str) -> Result<(), GameError> {
        self.ensure_stage(Stage::Setup)?;
        self.roster_mut(side)?.add(name)
    }

    pub fn remove_participant_at(
        &mut self,
        side: Option<TeamSide>,
        index: usize,
    ) -> Result<String, GameError> {
        self.ensure_stage(Stage::Setup)?;
        self.roster_mut(side)?.remove_at(index)
    }

    /// Rename a side. A blank name restores the side's default.
    pub fn set_team_name(&mut self, side: TeamSide, name: &str) -> Result<(), GameError> {
        self.ensure_stage(Stage::Setup)?;
        let Participants::Teams(teams) = &mut self.participants else {
            return Err(GameError::WrongMode {
                mode: GameMode::SoloPlayers,
            });
        };

        let name = name.trim();
        teams.team_mut(side).name = if name.is_empty() {
            side.default_name().to_string()
        } else {
            name.to_string()
        };
        Ok(())
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) -> Result<(), GameError> {
        self.ensure_stage(Stage::Setup)?;
        self.difficulty = difficulty;
        self.round = Round::new(difficulty.max_mistakes());
        Ok(())
    }

    pub fn set_target_score(&mut self, target: u32) -> Result<(), GameError> {
        self.ensure_stage(Stage::Setup)?;
        if target == 0 {
            return Err(GameError::InvalidTargetScore);
        }
        self.target_score = target;
        Ok(())
    }

    /// Leave setup once every roster is large enough.
    pub fn start_match(&mut self) -> Result<(), GameError> {
        self.ensure_stage(Stage::Setup)?;
        let ready = match &self.participants {
            Participants::Solo(roster) => roster.len() >= 2,
            Participants::Teams(teams) => TeamSide::BOTH
                .into_iter()
                .all(|side| !teams.team(side).roster.is_empty()),
        };
        if !ready {
            return Err(GameError::InsufficientParticipants { mode: self.mode() });
        }

        if let Participants::Teams(teams) = &mut self.participants {
            for side in TeamSide::BOTH {
                teams.team_mut(side).score = 0;
            }
        }
        self.begin_round();
        Ok(())
    }

    /// Reset per-round state and wait for the next word-master's word.
    pub(crate) fn begin_round(&mut self) {
        self.round = Round::new(self.difficulty.max_mistakes());
        self.last_summary = None;
        self.stage = Stage::Playing;
    }

    pub fn word_master(&self) -> Option<&str> {
        match &self.participants {
            Participants::Solo(roster) => roster.current(),
            Participants::Teams(teams) => teams.team(teams.word_master()).roster.current(),
        }
    }

    pub fn word_master_team(&self) -> Option<TeamSide> {
        match &self.participants {
            Participants::Solo(_) => None,
            Participants::Teams(teams) => Some(teams.word_master()),
        }
    }

    pub fn scores(&self) -> Vec<ScoreLine> {
        match &self.participants {
            Participants::Solo(_) => Vec::new(),
            Participants::Teams(teams) => teams.score_lines(),
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let participants = match &self.participants {
            Participants::Solo(roster) => ParticipantsView::Solo {
                players: roster.members().to_vec(),
            },
            Participants::Teams(teams) => ParticipantsView::Teams {
                teams: TeamSide::BOTH
                    .into_iter()
                    .map(|side| {
                        let team = teams.team(side);
                        TeamView {
                            side,
                            name: team.name.clone(),
                            members: team.roster.members().to_vec(),
                            score: team.score,
                        }
                    })
                    .collect(),
            },
        };

        let word_master_team = self.word_master_team();
        let in_round = self.stage != Stage::Setup;

        SessionSnapshot {
            id: self.id,
            mode: self.mode(),
            phase: self.phase(),
            participants,
            word_master: in_round
                .then(|| self.word_master().map(str::to_string))
                .flatten(),
            word_master_team: word_master_team.filter(|_| in_round),
            guessing_team: word_master_team
                .filter(|_| in_round)
                .map(TeamSide::opponent),
            word: self.round.word_slots(),
            keyboard: self.round.keyboard(),
            wrong_guesses: self.round.wrong_guesses(),
            max_mistakes: self.round.max_mistakes(),
            difficulty: self.difficulty,
            revealed_parts: self.round.revealed_parts(),
            is_losing: self.round.is_losing(),
            hint: self.round.hint().map(str::to_string),
            target_score: self.target_score,
            scores: self.scores(),
            summary: self.last_summary.clone(),
            created_at: self.created_at.clone(),
        }
    }
}

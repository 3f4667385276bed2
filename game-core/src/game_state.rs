use game_types::{
    Difficulty, GameError, GameMode, NextAction, RoundSummary, SessionSnapshot, Suggestion,
    TeamSide,
};
use rand::Rng;
use tracing::{debug, info};

use crate::round::GuessOutcome;
use crate::session::{Session, Stage};
use crate::{
    DwellTimings, GameEvent, GameEventBus, GameEventHandler, ScheduledTransition, ScoringEngine,
    WordBank,
};

/// Defaults applied to every new session.
#[derive(Debug, Clone)]
pub struct GameSettings {
    pub default_difficulty: Difficulty,
    pub default_target_score: u32,
    pub dwell: DwellTimings,
    pub suggestion_count: usize,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            default_difficulty: Difficulty::Medium,
            default_target_score: 5,
            dwell: DwellTimings::default(),
            suggestion_count: 3,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GuessResponse {
    pub snapshot: SessionSnapshot,
    pub outcome: GuessOutcome,
    /// Set only by the pick that resolved the round.
    pub transition: Option<ScheduledTransition>,
}

/// Command/query facade over the single live session. Commands either apply
/// fully or return an error and leave the session as it was.
pub struct Game {
    session: Option<Session>,
    settings: GameSettings,
    word_bank: WordBank,
    event_bus: GameEventBus,
}

impl Game {
    pub fn new(settings: GameSettings, word_bank: WordBank) -> Self {
        Self {
            session: None,
            settings,
            word_bank,
            event_bus: GameEventBus::new(),
        }
    }

    pub fn add_event_handler(&mut self, handler: Box<dyn GameEventHandler>) {
        self.event_bus.add_handler(handler);
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    fn session_mut(&mut self) -> Result<&mut Session, GameError> {
        self.session.as_mut().ok_or(GameError::NoActiveSession)
    }

    pub fn snapshot(&self) -> Option<SessionSnapshot> {
        self.session.as_ref().map(Session::snapshot)
    }

    fn current_snapshot(&self) -> Result<SessionSnapshot, GameError> {
        self.snapshot().ok_or(GameError::NoActiveSession)
    }

    /// Start a fresh session in `mode`, discarding any previous one.
    pub fn create_session(&mut self, mode: GameMode) -> SessionSnapshot {
        self.discard_session();

        let session = Session::new(
            mode,
            self.settings.default_difficulty,
            self.settings.default_target_score,
        );
        info!("Created {:?} session {}", mode, session.id());
        self.event_bus.publish(GameEvent::SessionCreated {
            session_id: session.id(),
            mode,
        });

        let snapshot = session.snapshot();
        self.session = Some(session);
        snapshot
    }

    /// Drop the live session and go back to mode selection.
    pub fn return_to_menu(&mut self) {
        self.discard_session();
    }

    fn discard_session(&mut self) {
        if let Some(session) = self.session.take() {
            info!("Discarding session {}", session.id());
            self.event_bus.publish(GameEvent::SessionDiscarded {
                session_id: session.id(),
            });
        }
    }

    pub fn add_participant(
        &mut self,
        team: Option<TeamSide>,
        name: &str,
    ) -> Result<SessionSnapshot, GameError> {
        self.session_mut()?.add_participant(team, name)?;
        self.current_snapshot()
    }

    pub fn remove_participant(
        &mut self,
        team: Option<TeamSide>,
        index: usize,
    ) -> Result<SessionSnapshot, GameError> {
        let removed = self.session_mut()?.remove_participant_at(team, index)?;
        debug!("Removed participant {}", removed);
        self.current_snapshot()
    }

    pub fn set_team_name(&mut self, team: TeamSide, name: &str) -> Result<SessionSnapshot, GameError> {
        self.session_mut()?.set_team_name(team, name)?;
        self.current_snapshot()
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) -> Result<SessionSnapshot, GameError> {
        self.session_mut()?.set_difficulty(difficulty)?;
        self.current_snapshot()
    }

    pub fn set_target_score(&mut self, target: u32) -> Result<SessionSnapshot, GameError> {
        self.session_mut()?.set_target_score(target)?;
        self.current_snapshot()
    }

    pub fn start_match(&mut self) -> Result<SessionSnapshot, GameError> {
        let session = self.session_mut()?;
        session.start_match()?;

        let event = GameEvent::MatchStarted {
            session_id: session.id(),
            difficulty: session.difficulty(),
            target_score: session.target_score(),
        };
        info!(
            "Match started in session {} ({:?}, target {})",
            session.id(),
            session.difficulty(),
            session.target_score()
        );
        self.event_bus.publish(event);
        self.current_snapshot()
    }

    pub fn submit_secret_word(&mut self, word: &str, hint: &str) -> Result<SessionSnapshot, GameError> {
        let session = self.session_mut()?;
        session.ensure_stage(Stage::Playing)?;
        session.round.submit_secret_word(word, hint)?;

        let event = GameEvent::RoundStarted {
            session_id: session.id(),
            word_master: session.word_master().map(str::to_string),
            word_length: session.round().normalized_word().chars().count(),
        };
        self.event_bus.publish(event);
        self.current_snapshot()
    }

    /// Apply a letter pick. Ignored picks are not errors; they return the
    /// unchanged snapshot.
    pub fn guess_letter(&mut self, letter: char) -> Result<GuessResponse, GameError> {
        let dwell = self.settings.dwell;
        let session = self.session_mut()?;
        let session_id = session.id();

        let outcome = if session.stage() == Stage::Playing {
            session.round.guess(letter)
        } else {
            GuessOutcome::Ignored
        };

        let mut transition = None;
        if outcome != GuessOutcome::Ignored {
            let round = session.round();
            let guessed = crate::alphabet::normalize(letter);
            let wrong_guesses = round.wrong_guesses();
            let resolved = round.outcome();

            self.event_bus.publish(GameEvent::LetterGuessed {
                session_id,
                letter: guessed,
                correct: outcome == GuessOutcome::Hit,
                wrong_guesses,
            });

            if let Some(round_outcome) = resolved {
                info!("Round in session {} resolved: {:?}", session_id, round_outcome);
                self.event_bus.publish(GameEvent::RoundResolved {
                    session_id,
                    outcome: round_outcome,
                });
                transition = Some(ScheduledTransition::conclude_round(round_outcome, &dwell));
            }
        }

        Ok(GuessResponse {
            snapshot: self.current_snapshot()?,
            outcome,
            transition,
        })
    }

    /// Run the end-of-round rules once the dwell has elapsed. Returns `None`
    /// when there is no resolved round waiting, so repeated calls are safe.
    pub fn conclude_round(&mut self) -> Option<RoundSummary> {
        let session = self.session.as_mut()?;
        if session.stage() != Stage::Playing {
            return None;
        }
        let outcome = session.round().outcome()?;

        let target_score = session.target_score();
        let word = session.round().raw_word().to_string();
        let summary =
            ScoringEngine::resolve_round(&mut session.participants, target_score, outcome, &word);

        session.stage = match summary.next_action {
            NextAction::NextRound => Stage::RoundOver,
            NextAction::NewMatch => Stage::MatchOver,
        };
        session.last_summary = Some(summary.clone());
        let session_id = session.id();

        self.event_bus.publish(GameEvent::RoundConcluded {
            session_id,
            summary: summary.clone(),
        });
        if let Some(winner) = summary.match_winner {
            self.event_bus.publish(GameEvent::MatchWon {
                session_id,
                winner,
                final_scores: summary.scores.clone(),
            });
        }

        Some(summary)
    }

    /// Open the next round with the next word-master.
    pub fn start_next_round(&mut self) -> Result<SessionSnapshot, GameError> {
        let session = self.session_mut()?;
        session.ensure_stage(Stage::RoundOver)?;
        session.begin_round();
        debug!(
            "Next round in session {}, word-master {:?}",
            session.id(),
            session.word_master()
        );
        self.current_snapshot()
    }

    /// The summary's continue button: next round, or back to the menu once a
    /// match is won. Returns `None` when the session was discarded.
    pub fn continue_after_round(&mut self) -> Result<Option<SessionSnapshot>, GameError> {
        let next_action = self
            .session
            .as_ref()
            .ok_or(GameError::NoActiveSession)?
            .last_summary()
            .map(|summary| summary.next_action);

        match next_action {
            Some(NextAction::NewMatch) => {
                self.return_to_menu();
                Ok(None)
            }
            _ => self.start_next_round().map(Some),
        }
    }

    pub fn suggest_words<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<Suggestion> {
        self.word_bank.suggest(self.settings.suggestion_count, rng)
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new(GameSettings::default(), WordBank::default())
    }
}

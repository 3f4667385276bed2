use game_types::{Difficulty, GameMode, RoundOutcome, RoundSummary, ScoreLine, SessionId, TeamSide};

#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    SessionCreated {
        session_id: SessionId,
        mode: GameMode,
    },
    MatchStarted {
        session_id: SessionId,
        difficulty: Difficulty,
        target_score: u32,
    },
    RoundStarted {
        session_id: SessionId,
        word_master: Option<String>,
        word_length: usize,
    },
    LetterGuessed {
        session_id: SessionId,
        letter: char,
        correct: bool,
        wrong_guesses: u32,
    },
    RoundResolved {
        session_id: SessionId,
        outcome: RoundOutcome,
    },
    RoundConcluded {
        session_id: SessionId,
        summary: RoundSummary,
    },
    MatchWon {
        session_id: SessionId,
        winner: TeamSide,
        final_scores: Vec<ScoreLine>,
    },
    SessionDiscarded {
        session_id: SessionId,
    },
}

impl GameEvent {
    pub fn session_id(&self) -> SessionId {
        match self {
            GameEvent::SessionCreated { session_id, .. } => *session_id,
            GameEvent::MatchStarted { session_id, .. } => *session_id,
            GameEvent::RoundStarted { session_id, .. } => *session_id,
            GameEvent::LetterGuessed { session_id, .. } => *session_id,
            GameEvent::RoundResolved { session_id, .. } => *session_id,
            GameEvent::RoundConcluded { session_id, .. } => *session_id,
            GameEvent::MatchWon { session_id, .. } => *session_id,
            GameEvent::SessionDiscarded { session_id } => *session_id,
        }
    }
}

/// Event handler trait for processing game events
pub trait GameEventHandler: Send {
    fn handle_event(&mut self, event: GameEvent);
}

/// Simple event bus for distributing game events
pub struct GameEventBus {
    handlers: Vec<Box<dyn GameEventHandler>>,
}

impl GameEventBus {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    pub fn add_handler(&mut self, handler: Box<dyn GameEventHandler>) {
        self.handlers.push(handler);
    }

    pub fn publish(&mut self, event: GameEvent) {
        for handler in &mut self.handlers {
            handler.handle_event(event.clone());
        }
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }
}

impl Default for GameEventBus {
    fn default() -> Self {
        Self::new()
    }
}

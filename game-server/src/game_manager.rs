use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::websocket::connection::ConnectionManager;
use game_core::{
    Game, GameEvent, GameEventHandler, GameSettings, GuessOutcome, ScheduledTransition,
    TransitionKind, WordBank,
};
use game_types::{
    ClientMessage, Difficulty, GameError, RoundSummary, ServerMessage, SessionId, SessionSnapshot,
};

/// Mirrors domain events into the server log.
struct EventLogger;

impl GameEventHandler for EventLogger {
    fn handle_event(&mut self, event: GameEvent) {
        match event {
            GameEvent::SessionCreated { session_id, mode } => {
                info!("Session {} created in {:?} mode", session_id, mode)
            }
            GameEvent::MatchStarted {
                session_id,
                difficulty,
                target_score,
            } => info!(
                "Session {} match started ({:?}, first to {})",
                session_id, difficulty, target_score
            ),
            GameEvent::RoundStarted {
                session_id,
                word_master,
                word_length,
            } => info!(
                "Session {} round started by {:?}, {} letters",
                session_id, word_master, word_length
            ),
            GameEvent::LetterGuessed {
                session_id,
                letter,
                correct,
                wrong_guesses,
            } => debug!(
                "Session {} guessed '{}' (correct: {}, wrong so far: {})",
                session_id, letter, correct, wrong_guesses
            ),
            GameEvent::RoundResolved {
                session_id,
                outcome,
            } => info!("Session {} round resolved: {:?}", session_id, outcome),
            GameEvent::RoundConcluded {
                session_id,
                summary,
            } => info!(
                "Session {} round concluded, point to {:?}",
                session_id, summary.point_to
            ),
            GameEvent::MatchWon {
                session_id,
                winner,
                final_scores,
            } => info!(
                "Session {} match won by {:?}: {:?}",
                session_id, winner, final_scores
            ),
            GameEvent::SessionDiscarded { session_id } => {
                info!("Session {} discarded", session_id)
            }
        }
    }
}

/// Owns the one live session shared by every connected view and turns
/// client commands into broadcasts.
pub struct GameManager {
    game: Mutex<Game>,
    connection_manager: Arc<ConnectionManager>,
}

impl GameManager {
    pub fn new(
        connection_manager: Arc<ConnectionManager>,
        settings: GameSettings,
        word_bank: WordBank,
    ) -> Self {
        let mut game = Game::new(settings, word_bank);
        game.add_event_handler(Box::new(EventLogger));

        Self {
            game: Mutex::new(game),
            connection_manager,
        }
    }

    pub fn connection_manager(&self) -> &Arc<ConnectionManager> {
        &self.connection_manager
    }

    pub async fn current_state(&self) -> Option<SessionSnapshot> {
        self.game.lock().await.snapshot()
    }

    /// Apply one command. State changes are broadcast to every view while the
    /// session lock is held, so views see them in order. The returned message,
    /// if any, is meant for the sender alone.
    pub async fn apply(
        self: &Arc<Self>,
        command: ClientMessage,
    ) -> Result<Option<ServerMessage>, GameError> {
        let mut game = self.game.lock().await;

        let update = match command {
            ClientMessage::SelectMode { mode } => game.create_session(mode),
            ClientMessage::AddParticipant { team, name } => game.add_participant(team, &name)?,
            ClientMessage::RemoveParticipant { team, index } => {
                game.remove_participant(team, index)?
            }
            ClientMessage::SetTeamName { team, name } => game.set_team_name(team, &name)?,
            ClientMessage::SetDifficulty { max_mistakes } => {
                game.set_difficulty(Difficulty::from_max_mistakes(max_mistakes))?
            }
            ClientMessage::SetTargetScore { target } => game.set_target_score(target)?,
            ClientMessage::StartMatch => game.start_match()?,
            ClientMessage::SubmitSecretWord { word, hint } => {
                game.submit_secret_word(&word, &hint)?
            }
            ClientMessage::GuessLetter { letter } => {
                let Some(letter) = single_letter(&letter) else {
                    debug!("Ignoring malformed letter pick {:?}", letter);
                    return Ok(None);
                };

                let response = game.guess_letter(letter)?;
                if response.outcome == GuessOutcome::Ignored {
                    return Ok(None);
                }
                if let Some(transition) = response.transition {
                    self.schedule(response.snapshot.id, transition);
                }
                response.snapshot
            }
            ClientMessage::Continue => match game.continue_after_round()? {
                Some(snapshot) => snapshot,
                None => {
                    self.connection_manager
                        .broadcast(ServerMessage::ReturnedToMenu)
                        .await;
                    return Ok(None);
                }
            },
            ClientMessage::ReturnToMenu => {
                game.return_to_menu();
                self.connection_manager
                    .broadcast(ServerMessage::ReturnedToMenu)
                    .await;
                return Ok(None);
            }
            ClientMessage::RequestSuggestions => {
                let suggestions = {
                    let mut rng = rand::thread_rng();
                    game.suggest_words(&mut rng)
                };
                return Ok(Some(ServerMessage::Suggestions { suggestions }));
            }
            ClientMessage::Heartbeat => return Ok(None),
        };

        self.connection_manager
            .broadcast(ServerMessage::StateUpdate { state: update })
            .await;
        Ok(None)
    }

    /// Run the end-of-round rules for `session_id` if that session is still
    /// live and has a resolved round waiting.
    pub async fn conclude_round(&self, session_id: SessionId) -> Option<RoundSummary> {
        let mut game = self.game.lock().await;
        if game.session().map(|session| session.id()) != Some(session_id) {
            debug!("Session {} is gone, skipping round conclusion", session_id);
            return None;
        }

        let summary = game.conclude_round()?;
        self.connection_manager
            .broadcast(ServerMessage::RoundEnded {
                summary: summary.clone(),
            })
            .await;
        if let Some(state) = game.snapshot() {
            self.connection_manager
                .broadcast(ServerMessage::StateUpdate { state })
                .await;
        }

        Some(summary)
    }

    fn schedule(self: &Arc<Self>, session_id: SessionId, transition: ScheduledTransition) {
        let manager = Arc::clone(self);
        tokio::spawn(async move {
            tokio::time::sleep(transition.delay).await;
            match transition.kind {
                TransitionKind::ConcludeRound => {
                    manager.conclude_round(session_id).await;
                }
            }
        });
    }
}

/// A pick must be exactly one character; anything else is ignored.
fn single_letter(raw: &str) -> Option<char> {
    let mut chars = raw.trim().chars();
    match (chars.next(), chars.next()) {
        (Some(letter), None) => Some(letter),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_letter_parsing() {
        assert_eq!(single_letter("ب"), Some('ب'));
        assert_eq!(single_letter(" ت "), Some('ت'));
        assert_eq!(single_letter(""), None);
        assert_eq!(single_letter("بت"), None);
    }
}

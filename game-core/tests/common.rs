#![allow(dead_code)]

use game_core::{DwellTimings, Game, GameEvent, GameEventHandler, GameSettings, WordBank};
use game_types::{Difficulty, GameMode, RoundSummary, SessionSnapshot, TeamSide};
use std::sync::{Arc, Mutex};

/// Creates a game whose round-end dwell is zero
pub fn create_instant_game() -> Game {
    Game::new(
        GameSettings {
            dwell: DwellTimings::instant(),
            ..GameSettings::default()
        },
        WordBank::default(),
    )
}

/// Creates a started solo game with the given players
pub fn create_solo_game(players: &[&str], difficulty: Difficulty) -> Game {
    let mut game = create_instant_game();
    game.create_session(GameMode::SoloPlayers);
    for player in players {
        game.add_participant(None, player).unwrap();
    }
    game.set_difficulty(difficulty).unwrap();
    game.start_match().unwrap();
    game
}

/// Creates a started team game with the given rosters
pub fn create_team_game(team_a: &[&str], team_b: &[&str], target_score: u32) -> Game {
    let mut game = create_instant_game();
    game.create_session(GameMode::Teams);
    for (side, members) in [(TeamSide::TeamA, team_a), (TeamSide::TeamB, team_b)] {
        for member in members.iter() {
            game.add_participant(Some(side), member).unwrap();
        }
    }
    game.set_target_score(target_score).unwrap();
    game.start_match().unwrap();
    game
}

/// Submits `word` and picks every letter of it
pub fn win_round(game: &mut Game, word: &str) -> RoundSummary {
    game.submit_secret_word(word, "").unwrap();
    for letter in word.chars().filter(|c| !c.is_whitespace()) {
        game.guess_letter(letter).unwrap();
    }
    game.conclude_round().expect("round should be resolved")
}

/// Submits `word` and picks letters that are not in it until the round is lost
pub fn lose_round(game: &mut Game, word: &str) -> RoundSummary {
    game.submit_secret_word(word, "").unwrap();
    let normalized = game_core::normalize_word(word);
    for letter in game_core::ALPHABET {
        if normalized.contains(letter) {
            continue;
        }
        let response = game.guess_letter(letter).unwrap();
        if response.transition.is_some() {
            break;
        }
    }
    game.conclude_round().expect("round should be resolved")
}

pub fn snapshot(game: &Game) -> SessionSnapshot {
    game.snapshot().expect("session should exist")
}

pub fn score_of(snapshot: &SessionSnapshot, side: TeamSide) -> u32 {
    snapshot
        .scores
        .iter()
        .find(|line| line.side == side)
        .map(|line| line.score)
        .unwrap_or(0)
}

/// Event collector for testing event emissions
#[derive(Clone)]
pub struct EventCollector {
    events: Arc<Mutex<Vec<GameEvent>>>,
}

impl EventCollector {
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn get_events(&self) -> Vec<GameEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn event_count(&self) -> usize {
        self.events.lock().unwrap().len()
    }

    pub fn has_event_type(&self, check_fn: impl Fn(&GameEvent) -> bool) -> bool {
        self.events.lock().unwrap().iter().any(check_fn)
    }
}

impl GameEventHandler for EventCollector {
    fn handle_event(&mut self, event: GameEvent) {
        self.events.lock().unwrap().push(event);
    }
}

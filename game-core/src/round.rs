use game_types::{GameError, HangmanPart, KeyState, LetterState, RoundOutcome, WordSlot};
use std::collections::BTreeSet;
use tracing::debug;

use crate::alphabet::{self, ALPHABET};
use game_types::HangmanPart::*;

const EASY_STAGES: &[&[HangmanPart]] = &[
    &[Head],
    &[Body],
    &[ArmRight],
    &[ArmLeft],
    &[LegRight],
    &[LegLeft],
    &[EyeRight],
    &[EyeLeft],
    &[Mouth],
    &[EarRight],
    &[EarLeft],
    &[Hair],
];

const MEDIUM_STAGES: &[&[HangmanPart]] = &[
    &[Head],
    &[Body],
    &[ArmRight],
    &[ArmLeft],
    &[LegRight],
    &[LegLeft],
    &[EyeRight, EyeLeft],
    &[Mouth, Hair],
];

const HARD_STAGES: &[&[HangmanPart]] = &[
    &[Head],
    &[Body],
    &[ArmRight, ArmLeft],
    &[LegRight, LegLeft, EyeRight, EyeLeft, Mouth, Hair],
];

/// Ordered part groups revealed one stage per wrong guess.
pub fn failure_stages(max_mistakes: u32) -> &'static [&'static [HangmanPart]] {
    match max_mistakes {
        12 => EASY_STAGES,
        4 => HARD_STAGES,
        _ => MEDIUM_STAGES,
    }
}

/// Union of every group up to and including stage `wrong_guesses`.
pub fn revealed_parts(max_mistakes: u32, wrong_guesses: u32) -> Vec<HangmanPart> {
    failure_stages(max_mistakes)
        .iter()
        .take(wrong_guesses as usize)
        .flat_map(|group| group.iter().copied())
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundState {
    AwaitingSecretWord,
    InProgress,
    Resolved(RoundOutcome),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessOutcome {
    Ignored,
    Hit,
    Miss,
}

#[derive(Debug, Clone)]
pub struct Round {
    state: RoundState,
    raw_word: String,
    normalized_word: String,
    hint: Option<String>,
    guessed_letters: BTreeSet<char>,
    wrong_guesses: u32,
    max_mistakes: u32,
}

impl Round {
    pub fn new(max_mistakes: u32) -> Self {
        Self {
            state: RoundState::AwaitingSecretWord,
            raw_word: String::new(),
            normalized_word: String::new(),
            hint: None,
            guessed_letters: BTreeSet::new(),
            wrong_guesses: 0,
            max_mistakes,
        }
    }

    /// Store the word-master's word and open the round for guessing. On error
    /// the round is left exactly as it was.
    pub fn submit_secret_word(&mut self, raw: &str, hint: &str) -> Result<(), GameError> {
        if self.state != RoundState::AwaitingSecretWord {
            return Err(GameError::InvalidPhase {
                current_phase: self.state_label().to_string(),
            });
        }

        let word = alphabet::validate_secret_word(raw)?;
        let hint = hint.trim();

        self.raw_word = word.to_string();
        self.normalized_word = alphabet::normalize_word(word);
        self.hint = (!hint.is_empty()).then(|| hint.to_string());
        self.guessed_letters.clear();
        self.wrong_guesses = 0;
        self.state = RoundState::InProgress;

        debug!(
            "Round opened with {} letters",
            self.normalized_word.chars().filter(|c| *c != ' ').count()
        );
        Ok(())
    }

    /// Apply a letter pick. Picks outside the alphabet, repeated picks and
    /// picks outside an in-progress round are ignored.
    pub fn guess(&mut self, letter: char) -> GuessOutcome {
        if self.state != RoundState::InProgress {
            return GuessOutcome::Ignored;
        }

        let letter = alphabet::normalize(letter);
        if !alphabet::is_guessable(letter) || !self.guessed_letters.insert(letter) {
            return GuessOutcome::Ignored;
        }

        let outcome = if self.normalized_word.contains(letter) {
            GuessOutcome::Hit
        } else {
            self.wrong_guesses += 1;
            GuessOutcome::Miss
        };

        // Win is checked first so a completing pick never counts as a loss
        if self.is_word_guessed() {
            self.state = RoundState::Resolved(RoundOutcome::Win);
        } else if self.wrong_guesses >= self.max_mistakes {
            self.state = RoundState::Resolved(RoundOutcome::Loss);
        }

        outcome
    }

    pub fn is_word_guessed(&self) -> bool {
        !self.normalized_word.is_empty()
            && self
                .normalized_word
                .chars()
                .all(|c| c == ' ' || self.guessed_letters.contains(&c))
    }

    pub fn outcome(&self) -> Option<RoundOutcome> {
        match self.state {
            RoundState::Resolved(outcome) => Some(outcome),
            _ => None,
        }
    }

    pub fn state(&self) -> RoundState {
        self.state
    }

    pub fn raw_word(&self) -> &str {
        &self.raw_word
    }

    pub fn normalized_word(&self) -> &str {
        &self.normalized_word
    }

    pub fn hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }

    pub fn guessed_letters(&self) -> &BTreeSet<char> {
        &self.guessed_letters
    }

    pub fn wrong_guesses(&self) -> u32 {
        self.wrong_guesses
    }

    pub fn max_mistakes(&self) -> u32 {
        self.max_mistakes
    }

    pub fn is_losing(&self) -> bool {
        self.wrong_guesses >= self.max_mistakes
    }

    pub fn letter_state(&self, letter: char) -> LetterState {
        if !self.guessed_letters.contains(&letter) {
            LetterState::Unguessed
        } else if self.normalized_word.contains(letter) {
            LetterState::Correct
        } else {
            LetterState::Incorrect
        }
    }

    pub fn keyboard(&self) -> Vec<KeyState> {
        ALPHABET
            .iter()
            .map(|&letter| KeyState {
                letter: letter.to_string(),
                state: self.letter_state(letter),
            })
            .collect()
    }

    /// Word display: spaces stay visible, letters show their raw form once the
    /// folded letter has been guessed.
    pub fn word_slots(&self) -> Vec<WordSlot> {
        self.raw_word
            .chars()
            .map(|c| {
                let folded = alphabet::normalize(c);
                if folded == ' ' {
                    WordSlot::Space
                } else if self.guessed_letters.contains(&folded) {
                    WordSlot::Revealed {
                        letter: c.to_string(),
                    }
                } else {
                    WordSlot::Hidden
                }
            })
            .collect()
    }

    pub fn revealed_parts(&self) -> Vec<HangmanPart> {
        revealed_parts(self.max_mistakes, self.wrong_guesses)
    }

    fn state_label(&self) -> &'static str {
        match self.state {
            RoundState::AwaitingSecretWord => "awaiting secret word",
            RoundState::InProgress => "round in progress",
            RoundState::Resolved(_) => "round resolved",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round_with_word(max_mistakes: u32, word: &str) -> Round {
        let mut round = Round::new(max_mistakes);
        round.submit_secret_word(word, "").unwrap();
        round
    }

    #[test]
    fn test_stage_lengths_match_budget() {
        assert_eq!(failure_stages(12).len(), 12);
        assert_eq!(failure_stages(8).len(), 8);
        assert_eq!(failure_stages(4).len(), 4);
        // Unsupported budgets use the medium sequence
        assert_eq!(failure_stages(6), failure_stages(8));
    }

    #[test]
    fn test_every_sequence_reveals_full_figure_at_the_end() {
        for budget in [12, 8, 4] {
            let mut parts = revealed_parts(budget, budget);
            parts.sort();
            parts.dedup();
            let expected = if budget == 12 { 12 } else { 10 };
            assert_eq!(parts.len(), expected, "budget {}", budget);
        }
    }

    #[test]
    fn test_revealed_parts_are_cumulative() {
        assert!(revealed_parts(8, 0).is_empty());
        assert_eq!(revealed_parts(8, 1), vec![Head]);
        assert_eq!(
            revealed_parts(8, 7),
            vec![
                Head, Body, ArmRight, ArmLeft, LegRight, LegLeft, EyeRight, EyeLeft
            ]
        );
        assert_eq!(revealed_parts(4, 3), vec![Head, Body, ArmRight, ArmLeft]);
        // Counts past the sequence do not invent parts
        assert_eq!(revealed_parts(4, 9).len(), revealed_parts(4, 4).len());
    }

    #[test]
    fn test_submit_rejects_invalid_words_without_mutation() {
        let mut round = Round::new(8);
        assert_eq!(
            round.submit_secret_word("abc123", ""),
            Err(GameError::InvalidCharacterSet)
        );
        assert_eq!(round.submit_secret_word("  ", "hint"), Err(GameError::EmptyInput));
        assert_eq!(round.state(), RoundState::AwaitingSecretWord);
        assert_eq!(round.raw_word(), "");
        assert_eq!(round.normalized_word(), "");
        assert_eq!(round.hint(), None);
    }

    #[test]
    fn test_submit_stores_raw_and_normalized() {
        let round = round_with_word(8, " زرافة ");
        assert_eq!(round.raw_word(), "زرافة");
        assert_eq!(round.normalized_word(), "زرافه");
        assert_eq!(round.state(), RoundState::InProgress);
    }

    #[test]
    fn test_hint_is_trimmed_and_optional() {
        let mut round = Round::new(8);
        round.submit_secret_word("فيل", "  حيوان كبير ").unwrap();
        assert_eq!(round.hint(), Some("حيوان كبير"));

        let mut round = Round::new(8);
        round.submit_secret_word("فيل", "   ").unwrap();
        assert_eq!(round.hint(), None);
    }

    #[test]
    fn test_second_submission_is_rejected() {
        let mut round = round_with_word(8, "بيت");
        let result = round.submit_secret_word("قلم", "");
        assert!(matches!(result, Err(GameError::InvalidPhase { .. })));
        assert_eq!(round.raw_word(), "بيت");
    }

    #[test]
    fn test_win_scenario() {
        let mut round = round_with_word(8, "بيت");
        assert_eq!(round.guess('ب'), GuessOutcome::Hit);
        assert_eq!(round.guess('ي'), GuessOutcome::Hit);
        assert_eq!(round.outcome(), None);
        assert_eq!(round.guess('ت'), GuessOutcome::Hit);
        assert_eq!(round.outcome(), Some(RoundOutcome::Win));
        assert_eq!(round.wrong_guesses(), 0);
    }

    #[test]
    fn test_loss_scenario() {
        let mut round = round_with_word(4, "قلم");
        for letter in ['س', 'د', 'ك'] {
            assert_eq!(round.guess(letter), GuessOutcome::Miss);
            assert_eq!(round.outcome(), None);
        }
        assert_eq!(round.guess('ط'), GuessOutcome::Miss);
        assert_eq!(round.outcome(), Some(RoundOutcome::Loss));
        assert_eq!(round.wrong_guesses(), 4);
        assert!(round.is_losing());

        // Resolved rounds ignore further picks
        assert_eq!(round.guess('ق'), GuessOutcome::Ignored);
        assert_eq!(round.wrong_guesses(), 4);
        assert!(!round.guessed_letters().contains(&'ق'));
    }

    #[test]
    fn test_duplicate_and_invalid_guesses_are_ignored() {
        let mut round = round_with_word(8, "قلم");
        assert_eq!(round.guess('س'), GuessOutcome::Miss);
        assert_eq!(round.guess('س'), GuessOutcome::Ignored);
        assert_eq!(round.guess('x'), GuessOutcome::Ignored);
        assert_eq!(round.guess(' '), GuessOutcome::Ignored);
        assert_eq!(round.wrong_guesses(), 1);
        assert_eq!(round.guessed_letters().len(), 1);
    }

    #[test]
    fn test_guess_is_folded_before_matching() {
        let mut round = round_with_word(8, "أسد");
        // A variant pick folds to the keyboard letter
        assert_eq!(round.guess('إ'), GuessOutcome::Hit);
        assert!(round.guessed_letters().contains(&'ا'));
        assert_eq!(round.guess('ا'), GuessOutcome::Ignored);
    }

    #[test]
    fn test_guess_before_word_is_ignored() {
        let mut round = Round::new(8);
        assert_eq!(round.guess('ب'), GuessOutcome::Ignored);
        assert!(round.guessed_letters().is_empty());
    }

    #[test]
    fn test_spaces_count_as_satisfied() {
        let mut round = round_with_word(8, "بيت كبير");
        for letter in ['ب', 'ي', 'ت', 'ك', 'ر'] {
            round.guess(letter);
        }
        assert_eq!(round.outcome(), Some(RoundOutcome::Win));
    }

    #[test]
    fn test_word_slots_reveal_raw_letterforms() {
        let mut round = round_with_word(8, "أب ة");
        round.guess('ا');
        round.guess('ه');
        assert_eq!(
            round.word_slots(),
            vec![
                WordSlot::Revealed {
                    letter: "أ".to_string()
                },
                WordSlot::Hidden,
                WordSlot::Space,
                WordSlot::Revealed {
                    letter: "ة".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_keyboard_states() {
        let mut round = round_with_word(8, "بيت");
        round.guess('ب');
        round.guess('س');

        let keyboard = round.keyboard();
        assert_eq!(keyboard.len(), ALPHABET.len());
        let state_of = |letter: &str| {
            keyboard
                .iter()
                .find(|key| key.letter == letter)
                .map(|key| key.state)
                .unwrap()
        };
        assert_eq!(state_of("ب"), LetterState::Correct);
        assert_eq!(state_of("س"), LetterState::Incorrect);
        assert_eq!(state_of("ت"), LetterState::Unguessed);
    }
}

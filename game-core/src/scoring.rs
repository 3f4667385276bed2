use game_types::{NextAction, RoundOutcome, RoundSummary, TeamSide};
use tracing::info;

use crate::session::{Participants, Roster, Teams};

const WIN_TITLE: &str = "🎉 انتهت الجولة!";
const LOSS_TITLE: &str = "😟 انتهت الجولة";
const SOLO_WIN_MESSAGE: &str = "أحسنتم! خمنتم الكلمة بنجاح!";
const SOLO_LOSS_MESSAGE: &str = "للأسف! حظ أوفر في المرة القادمة.";
const NEXT_TURN_LABEL: &str = "الدور التالي";
const NEXT_ROUND_LABEL: &str = "الجولة التالية";
const NEW_MATCH_LABEL: &str = "مباراة جديدة";

/// Turn rotation and point attribution once a round is resolved.
pub struct ScoringEngine;

impl ScoringEngine {
    /// Apply the end-of-round rules for the session's mode and describe what
    /// happens next.
    pub fn resolve_round(
        participants: &mut Participants,
        target_score: u32,
        outcome: RoundOutcome,
        word: &str,
    ) -> RoundSummary {
        match participants {
            Participants::Solo(roster) => Self::resolve_solo(roster, outcome, word),
            Participants::Teams(teams) => Self::resolve_teams(teams, target_score, outcome, word),
        }
    }

    /// The side that earns the point: guessers on a win, the word-master on a
    /// loss.
    pub fn point_recipient(word_master: TeamSide, outcome: RoundOutcome) -> TeamSide {
        match outcome {
            RoundOutcome::Win => word_master.opponent(),
            RoundOutcome::Loss => word_master,
        }
    }

    /// First side (A before B) whose score reached the target.
    pub fn match_winner(teams: &Teams, target_score: u32) -> Option<TeamSide> {
        TeamSide::BOTH
            .into_iter()
            .find(|&side| teams.team(side).score >= target_score)
    }

    fn resolve_solo(roster: &mut Roster, outcome: RoundOutcome, word: &str) -> RoundSummary {
        roster.advance();

        let message = match outcome {
            RoundOutcome::Win => SOLO_WIN_MESSAGE,
            RoundOutcome::Loss => SOLO_LOSS_MESSAGE,
        };

        RoundSummary {
            outcome,
            title: title_for(outcome).to_string(),
            message: message.to_string(),
            word: word.to_string(),
            continue_label: NEXT_TURN_LABEL.to_string(),
            next_action: NextAction::NextRound,
            point_to: None,
            match_winner: None,
            scores: Vec::new(),
        }
    }

    fn resolve_teams(
        teams: &mut Teams,
        target_score: u32,
        outcome: RoundOutcome,
        word: &str,
    ) -> RoundSummary {
        let word_master = teams.word_master();
        let point_to = Self::point_recipient(word_master, outcome);

        teams.team_mut(point_to).score += 1;
        teams.team_mut(word_master).roster.advance();

        let scores = teams.score_lines();

        if let Some(winner) = Self::match_winner(teams, target_score) {
            let winner_name = &teams.team(winner).name;
            info!("Team {:?} ({}) wins the match", winner, winner_name);

            return RoundSummary {
                outcome,
                title: WIN_TITLE.to_string(),
                message: format!("🏆 فريق {} يفوز بالمباراة!", winner_name),
                word: word.to_string(),
                continue_label: NEW_MATCH_LABEL.to_string(),
                next_action: NextAction::NewMatch,
                point_to: Some(point_to),
                match_winner: Some(winner),
                scores,
            };
        }

        teams.swap_roles();

        RoundSummary {
            outcome,
            title: title_for(outcome).to_string(),
            message: format!("نقطة لفريق {}!", teams.team(point_to).name),
            word: word.to_string(),
            continue_label: NEXT_ROUND_LABEL.to_string(),
            next_action: NextAction::NextRound,
            point_to: Some(point_to),
            match_winner: None,
            scores,
        }
    }
}

fn title_for(outcome: RoundOutcome) -> &'static str {
    match outcome {
        RoundOutcome::Win => WIN_TITLE,
        RoundOutcome::Loss => LOSS_TITLE,
    }
}

use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

use crate::GameMode;

/// Every recoverable rejection the game core can report. A rejected command
/// leaves the session untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum GameError {
    #[error("input is empty")]
    EmptyInput,
    #[error("participant '{name}' is already on this roster")]
    DuplicateParticipant { name: String },
    #[error("word contains characters outside the alphabet")]
    InvalidCharacterSet,
    #[error("index {index} is out of range for a roster of {len}")]
    InvalidIndex { index: usize, len: usize },
    #[error("not enough participants to start a {mode:?} match")]
    InsufficientParticipants { mode: GameMode },
    #[error("target score must be at least 1")]
    InvalidTargetScore,
    #[error("operation is not available in {mode:?} mode")]
    WrongMode { mode: GameMode },
    #[error("operation is not allowed while {current_phase}")]
    InvalidPhase { current_phase: String },
    #[error("no active session")]
    NoActiveSession,
}

impl GameError {
    /// Text shown to the players in the alert dialog.
    pub fn user_message(&self) -> String {
        match self {
            GameError::EmptyInput => "الرجاء إدخال كلمة.".to_string(),
            GameError::DuplicateParticipant { name } => format!("الاسم {} موجود بالفعل.", name),
            GameError::InvalidCharacterSet => "الرجاء استخدام حروف عربية فقط.".to_string(),
            GameError::InvalidIndex { .. } => "هذا اللاعب غير موجود.".to_string(),
            GameError::InsufficientParticipants { mode } => match mode {
                GameMode::SoloPlayers => {
                    "تحتاج إلى لاعبين على الأقل في وضع دور اللاعبين.".to_string()
                }
                GameMode::Teams => "يجب أن يحتوي كل فريق على لاعب واحد على الأقل.".to_string(),
            },
            GameError::InvalidTargetScore => "يجب أن يكون الهدف رقماً أكبر من صفر.".to_string(),
            GameError::WrongMode { .. } => "هذا الإجراء غير متاح في وضع اللعب الحالي.".to_string(),
            GameError::InvalidPhase { .. } => "لا يمكن تنفيذ هذا الإجراء الآن.".to_string(),
            GameError::NoActiveSession => "اختر وضع اللعب أولاً.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_participants_message_depends_on_mode() {
        let solo = GameError::InsufficientParticipants {
            mode: GameMode::SoloPlayers,
        };
        let teams = GameError::InsufficientParticipants {
            mode: GameMode::Teams,
        };
        assert_ne!(solo.user_message(), teams.user_message());
    }

    #[test]
    fn test_error_serializes_with_variant_tag() {
        let json = serde_json::to_string(&GameError::InvalidIndex { index: 3, len: 2 }).unwrap();
        assert_eq!(json, r#"{"InvalidIndex":{"index":3,"len":2}}"#);
    }
}

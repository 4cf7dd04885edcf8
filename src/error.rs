//! Error taxonomy
//!
//! Every ladder error is recoverable: the session stays in its prior state
//! and the caller may retry with corrected input.

use crate::sim::SessionPhase;

/// Rejected engine operation
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LadderError {
    #[error("a ladder needs at least 2 columns, got {0}")]
    InvalidColumnCount(usize),
    #[error("{requested} players requested but at most {max} are allowed")]
    TooManyPlayers { requested: usize, max: usize },
    #[error("{needed} prizes needed but only {available} available")]
    NotEnoughPrizes { needed: usize, available: usize },
    #[error("expected {expected} prizes, {selected} selected")]
    PrizeSelectionMismatch { expected: usize, selected: usize },
    #[error("prize {0} is not in the pool")]
    UnknownPrize(String),
    #[error("prize {0} selected more than once")]
    DuplicatePrize(String),
    #[error("column {0} has already been played")]
    AlreadyPlayed(usize),
    #[error("a path reveal is still in progress")]
    AnimationInProgress,
    #[error("cannot {action} while in {phase:?}")]
    WrongPhase {
        phase: SessionPhase,
        action: &'static str,
    },
    #[error("column {column} out of range for a ladder with {columns} columns")]
    ColumnOutOfRange { column: usize, columns: usize },
    #[error("round is not finished")]
    NotFinished,
    #[error("invalid settings: {0}")]
    InvalidSettings(&'static str),
}

/// Settings/history file failure
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Ladder(#[from] LadderError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = LadderError::PrizeSelectionMismatch {
            expected: 3,
            selected: 2,
        };
        assert_eq!(err.to_string(), "expected 3 prizes, 2 selected");

        let err = LadderError::WrongPhase {
            phase: SessionPhase::Setup,
            action: "play",
        };
        assert_eq!(err.to_string(), "cannot play while in Setup");
    }

    #[test]
    fn test_store_error_from_ladder() {
        let err: StoreError = LadderError::InvalidSettings("top must be above bottom").into();
        assert!(matches!(err, StoreError::Ladder(_)));
        assert_eq!(err.to_string(), "invalid settings: top must be above bottom");
    }
}

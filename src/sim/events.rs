//! Puzzle output: events for the host and per-call outcomes

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::environment::EnvironmentFacts;
use super::grid::{Digit, Position};
use super::rules::InvalidPress;

/// Why the puzzle struck
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum StrikeCause {
    #[error(transparent)]
    Rejected(#[from] InvalidPress),
    #[error("display #{layer} not sorted")]
    NotSorted { layer: usize },
    #[error("no input for too long")]
    IdleTimeout,
}

/// Notifications queued for the host, in the order they happened.
/// Rendering and audio react to these; nothing flows back into the puzzle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum PuzzleEvent {
    Activated { facts: EnvironmentFacts },
    DigitChanged { pos: Position, digit: Option<Digit> },
    NextCellChanged { pos: Position, is_next: bool },
    ResetGateChanged { active: bool },
    LayerCompleted { layer: usize },
    Strike { cause: StrikeCause },
    Pass,
}

/// Why a press had no effect. Never strikes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum IgnoredPress {
    #[error("puzzle is not active yet")]
    Inactive,
    #[error("puzzle is finished")]
    Finished,
    #[error("button {0} is out of range")]
    OutOfRange(Position),
    #[error("button {0} shows no digit")]
    EmptyCell(Position),
}

/// Why a reset request was dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum ResetDenied {
    #[error("reset is not armed")]
    GateInactive,
    #[error("puzzle is already solved")]
    Solved,
}

/// Result of a single press
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PressOutcome {
    /// Dropped without state change
    Ignored(IgnoredPress),
    /// Digit stored; cursor moved within the layer
    Accepted { digit: Digit },
    /// Digit stored and the layer filled; cursor moved to the next layer
    LayerCompleted { layer: usize },
    /// Final layer sorted
    Solved,
    Strike(StrikeCause),
}

impl PressOutcome {
    pub fn is_strike(&self) -> bool {
        matches!(self, PressOutcome::Strike(_))
    }

    /// Whether the pressed digit was written to the grid
    pub fn stored_digit(&self) -> bool {
        matches!(
            self,
            PressOutcome::Accepted { .. }
                | PressOutcome::LayerCompleted { .. }
                | PressOutcome::Solved
                | PressOutcome::Strike(StrikeCause::NotSorted { .. })
        )
    }
}

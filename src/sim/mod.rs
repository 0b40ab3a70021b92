//! Deterministic puzzle module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Randomness only through an injected `RandomSource`
//! - Every grid mutation is reported as a `PuzzleEvent`
//! - No rendering, audio or platform dependencies

pub mod environment;
pub mod events;
pub mod grid;
pub mod idle;
pub mod progress;
pub mod random;
pub mod rules;
pub mod state;
#[cfg(test)]
pub(crate) mod testing;

pub use environment::{BombInfo, BombSnapshot, EnvironmentFacts};
pub use events::{IgnoredPress, PressOutcome, PuzzleEvent, ResetDenied, StrikeCause};
pub use grid::{Cell, Digit, Grid, Position};
pub use idle::IdleTimer;
pub use random::{RandomSource, ScriptedRandom};
pub use rules::{InvalidPress, check_digit, is_acceptable};
pub use state::{Cursor, Progress, Puzzle, PuzzleSnapshot};

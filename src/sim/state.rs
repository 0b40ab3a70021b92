//! Puzzle state and core types
//!
//! Everything a single puzzle instance owns lives here. The transitions that
//! mutate it (activation, presses, strikes, reset) are in `progress`.

use std::sync::atomic::{AtomicU32, Ordering};

use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::environment::EnvironmentFacts;
use super::events::PuzzleEvent;
use super::grid::{Digit, Grid, Position};
use super::random::{RandomSource, seeded};

/// The input cursor: the single selectable cell of the active layer
pub type Cursor = Position;

/// Where the puzzle is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Progress {
    /// Waiting for the activation signal
    Inactive,
    /// Accepting digits at the cursor (layers 1-4)
    Filling(Cursor),
    /// Final layer filled but not sorted; only a reset continues play
    Unsorted,
    /// Final layer sorted
    Solved,
}

impl Progress {
    pub fn cursor(&self) -> Option<Cursor> {
        match self {
            Progress::Filling(cursor) => Some(*cursor),
            _ => None,
        }
    }
}

/// Serializable view of a puzzle for hosts and logs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PuzzleSnapshot {
    pub module_id: u32,
    pub grid: Grid,
    pub progress: Progress,
    pub facts: EnvironmentFacts,
    pub reset_active: bool,
    pub solved: bool,
}

static MODULE_ID_COUNTER: AtomicU32 = AtomicU32::new(1);

fn next_module_id() -> u32 {
    MODULE_ID_COUNTER.fetch_add(1, Ordering::Relaxed)
}

/// One puzzle instance
#[derive(Debug, Clone)]
pub struct Puzzle<R = Pcg32> {
    pub(crate) module_id: u32,
    pub(crate) grid: Grid,
    pub(crate) progress: Progress,
    pub(crate) facts: EnvironmentFacts,
    pub(crate) reset_active: bool,
    pub(crate) solved: bool,
    pub(crate) rng: R,
    pub(crate) events: Vec<PuzzleEvent>,
}

impl Puzzle<Pcg32> {
    /// Create a puzzle with a seeded generator
    pub fn with_seed(seed: u64) -> Self {
        Self::new(seeded(seed))
    }
}

impl<R: RandomSource> Puzzle<R> {
    /// Create an inactive puzzle; call `activate` to seed it
    pub fn new(rng: R) -> Self {
        Self {
            module_id: next_module_id(),
            grid: Grid::new(),
            progress: Progress::Inactive,
            facts: EnvironmentFacts::default(),
            reset_active: false,
            solved: false,
            rng,
            events: Vec::new(),
        }
    }

    pub fn module_id(&self) -> u32 {
        self.module_id
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn progress(&self) -> Progress {
        self.progress
    }

    pub fn cursor(&self) -> Option<Cursor> {
        self.progress.cursor()
    }

    pub fn facts(&self) -> &EnvironmentFacts {
        &self.facts
    }

    pub fn reset_active(&self) -> bool {
        self.reset_active
    }

    pub fn is_solved(&self) -> bool {
        self.solved
    }

    pub fn is_filling(&self) -> bool {
        matches!(self.progress, Progress::Filling(_))
    }

    /// Layers 1-4 not yet completed (0 once the final layer is filled)
    pub fn remaining_layers(&self) -> usize {
        match self.progress {
            Progress::Inactive => crate::consts::LAYERS_COUNT - 1,
            Progress::Filling(cursor) => crate::consts::LAYERS_COUNT - cursor.layer,
            Progress::Unsorted | Progress::Solved => 0,
        }
    }

    /// Take all queued events, oldest first
    pub fn drain_events(&mut self) -> Vec<PuzzleEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> PuzzleSnapshot {
        PuzzleSnapshot {
            module_id: self.module_id,
            grid: self.grid.clone(),
            progress: self.progress,
            facts: self.facts,
            reset_active: self.reset_active,
            solved: self.solved,
        }
    }

    pub(crate) fn write_digit(&mut self, pos: Position, digit: Digit) {
        self.grid.set_digit(pos.layer, pos.column, digit);
        self.events.push(PuzzleEvent::DigitChanged {
            pos,
            digit: Some(digit),
        });
    }

    pub(crate) fn erase_digit(&mut self, pos: Position) {
        if self.grid.digit(pos.layer, pos.column).is_some() {
            self.grid.clear_digit(pos.layer, pos.column);
            self.events
                .push(PuzzleEvent::DigitChanged { pos, digit: None });
        }
    }

    pub(crate) fn flag_next(&mut self, pos: Position, is_next: bool) {
        if self.grid.is_next(pos.layer, pos.column) != is_next {
            self.grid.set_next(pos.layer, pos.column, is_next);
            self.events.push(PuzzleEvent::NextCellChanged { pos, is_next });
        }
    }

    pub(crate) fn set_reset_active(&mut self, active: bool) {
        if self.reset_active != active {
            self.reset_active = active;
            self.events.push(PuzzleEvent::ResetGateChanged { active });
        }
    }
}

//! Puzzle transitions
//!
//! Activation seeds layer 0, presses move the cursor through layers 1-4 in a
//! random column order, strikes arm the reset gate and a reset clears every
//! entered layer.

use super::environment::{BombInfo, EnvironmentFacts};
use super::events::{IgnoredPress, PressOutcome, PuzzleEvent, ResetDenied, StrikeCause};
use super::grid::{Digit, Position};
use super::random::RandomSource;
use super::rules::{InvalidPress, check_digit};
use super::state::{Progress, Puzzle};
use crate::consts::{COLUMNS_COUNT, FINAL_LAYER, LAYERS_COUNT};

impl<R: RandomSource> Puzzle<R> {
    /// Handle the activation signal: capture bomb facts, shuffle layer 0 and
    /// place the first cursor. Ignored if already active.
    pub fn activate(&mut self, bomb: &dyn BombInfo) {
        self.activate_with(EnvironmentFacts::capture(bomb));
    }

    /// Activate with facts captured elsewhere
    pub fn activate_with(&mut self, facts: EnvironmentFacts) {
        if self.progress != Progress::Inactive {
            log::warn!("[MWISort #{}] Activated twice, ignoring", self.module_id);
            return;
        }
        // Draw without replacement, column by column
        let mut remaining: Vec<Digit> = Digit::ALL.to_vec();
        let layer0 = std::array::from_fn(|_| remaining.remove(self.rng.pick(remaining.len())));
        self.activate_seeded(facts, layer0);
    }

    /// Activate with a fixed layer 0, for scripted setups
    pub fn activate_seeded(&mut self, facts: EnvironmentFacts, layer0: [Digit; COLUMNS_COUNT]) {
        if self.progress != Progress::Inactive {
            log::warn!("[MWISort #{}] Activated twice, ignoring", self.module_id);
            return;
        }
        self.facts = facts;
        self.events.push(PuzzleEvent::Activated { facts });
        for (column, digit) in layer0.into_iter().enumerate() {
            self.write_digit(Position::new(0, column), digit);
        }
        log::info!(
            "[MWISort #{}] Display #0 digits: {}",
            self.module_id,
            self.grid.row_string(0)
        );
        self.start_layer(1);
    }

    /// Press the button at `pos`. Its displayed digit is entered at the cursor.
    pub fn press(&mut self, pos: Position) -> PressOutcome {
        let cursor = match self.progress {
            Progress::Filling(cursor) => cursor,
            Progress::Inactive => return self.ignore(IgnoredPress::Inactive),
            Progress::Unsorted | Progress::Solved => return self.ignore(IgnoredPress::Finished),
        };
        let Some(cell) = self.grid.cell(pos) else {
            return self.ignore(IgnoredPress::OutOfRange(pos));
        };
        let Some(digit) = cell.digit else {
            return self.ignore(IgnoredPress::EmptyCell(pos));
        };

        if let Err(invalid) = check_digit(cursor, digit, &self.grid, &self.facts) {
            if let InvalidPress::Duplicate { layer, .. } = invalid {
                log::warn!(
                    "[MWISort #{}] Duplicate digits are pressed. Display #{}: {}. Strike!",
                    self.module_id,
                    layer,
                    self.grid.row_with_candidate(layer, cursor.column, digit)
                );
            } else {
                log::warn!("[MWISort #{}] {}. Strike!", self.module_id, invalid);
            }
            let cause = StrikeCause::Rejected(invalid);
            self.strike(cause);
            return PressOutcome::Strike(cause);
        }

        self.write_digit(cursor, digit);
        self.flag_next(cursor, false);

        let unset = self.grid.unset_columns(cursor.layer);
        if !unset.is_empty() {
            let column = unset[self.rng.pick(unset.len())];
            let next = Position::new(cursor.layer, column);
            self.progress = Progress::Filling(next);
            self.flag_next(next, true);
            return PressOutcome::Accepted { digit };
        }

        log::info!(
            "[MWISort #{}] Display #{} answer: {}",
            self.module_id,
            cursor.layer,
            self.grid.row_string(cursor.layer)
        );
        self.events.push(PuzzleEvent::LayerCompleted {
            layer: cursor.layer,
        });

        if cursor.layer < FINAL_LAYER {
            self.start_layer(cursor.layer + 1);
            return PressOutcome::LayerCompleted {
                layer: cursor.layer,
            };
        }

        self.progress = Progress::Unsorted;
        if self.grid.is_identity(FINAL_LAYER) {
            log::info!(
                "[MWISort #{}] Display #{} sorted. Module solved!",
                self.module_id,
                FINAL_LAYER
            );
            self.progress = Progress::Solved;
            self.solved = true;
            self.events.push(PuzzleEvent::Pass);
            PressOutcome::Solved
        } else {
            log::warn!(
                "[MWISort #{}] Display #{} not sorted. Strike!",
                self.module_id,
                FINAL_LAYER
            );
            let cause = StrikeCause::NotSorted { layer: FINAL_LAYER };
            self.strike(cause);
            PressOutcome::Strike(cause)
        }
    }

    /// Enter a digit directly, pressing whichever layer-0 button shows it
    pub fn enter_digit(&mut self, digit: Digit) -> PressOutcome {
        match self.grid.column_of(0, digit) {
            Some(column) => self.press(Position::new(0, column)),
            None => self.ignore(IgnoredPress::Inactive),
        }
    }

    /// Handle the reset button. Clears layers 1-4 and restarts the cursor in
    /// layer 1 when the gate is armed.
    pub fn reset(&mut self) -> Result<(), ResetDenied> {
        if self.solved {
            return Err(ResetDenied::Solved);
        }
        if !self.reset_active {
            return Err(ResetDenied::GateInactive);
        }
        log::info!("[MWISort #{}] Reset pressed", self.module_id);

        for layer in 1..LAYERS_COUNT {
            for column in 0..COLUMNS_COUNT {
                let pos = Position::new(layer, column);
                self.erase_digit(pos);
                self.flag_next(pos, false);
            }
        }
        self.start_layer(1);
        self.set_reset_active(false);
        Ok(())
    }

    /// Hook for the idle timer. Strikes only while digits are being entered.
    pub fn idle_timeout(&mut self) -> Option<StrikeCause> {
        if !self.is_filling() {
            return None;
        }
        log::warn!(
            "[MWISort #{}] More than the allowed time has passed since the last entry. Strike!",
            self.module_id
        );
        let cause = StrikeCause::IdleTimeout;
        self.strike(cause);
        Some(cause)
    }

    fn strike(&mut self, cause: StrikeCause) {
        self.events.push(PuzzleEvent::Strike { cause });
        if !self.at_first_input() {
            self.set_reset_active(true);
        }
    }

    /// Cursor in layer 1 with nothing entered there yet
    fn at_first_input(&self) -> bool {
        match self.progress {
            Progress::Filling(cursor) => {
                cursor.layer == 1 && self.grid.unset_columns(1).len() == COLUMNS_COUNT
            }
            _ => false,
        }
    }

    fn start_layer(&mut self, layer: usize) {
        let next = Position::new(layer, self.rng.pick(COLUMNS_COUNT));
        self.progress = Progress::Filling(next);
        self.flag_next(next, true);
    }

    fn ignore(&self, reason: IgnoredPress) -> PressOutcome {
        log::debug!("[MWISort #{}] Press ignored: {}", self.module_id, reason);
        PressOutcome::Ignored(reason)
    }
}

//! Shared helpers for unit tests

use super::environment::EnvironmentFacts;
use super::grid::{Digit, Grid, Position};
use super::random::{RandomSource, ScriptedRandom};
use super::rules::is_acceptable;
use super::state::Puzzle;

/// Layer 0 used by the scripted scenarios
pub const SEED_LAYER: [u8; 10] = [5, 2, 8, 0, 3, 9, 1, 6, 4, 7];

pub fn d(value: u8) -> Digit {
    Digit::new(value).unwrap()
}

/// Active puzzle over `SEED_LAYER` whose cursor always takes the lowest
/// unset column. Activation events are already drained.
pub fn scripted_puzzle(facts: EnvironmentFacts) -> Puzzle<ScriptedRandom> {
    let mut puzzle = Puzzle::new(ScriptedRandom::first());
    puzzle.activate_seeded(facts, SEED_LAYER.map(d));
    puzzle.drain_events();
    puzzle
}

/// A legal full answer for `layer` given the layers above it. `allow` adds
/// extra per-column constraints.
pub fn solve_layer(
    grid: &Grid,
    facts: &EnvironmentFacts,
    layer: usize,
    allow: &dyn Fn(usize, Digit) -> bool,
) -> [Digit; 10] {
    fn fill(
        grid: &mut Grid,
        facts: &EnvironmentFacts,
        layer: usize,
        column: usize,
        allow: &dyn Fn(usize, Digit) -> bool,
    ) -> bool {
        if column == 10 {
            return true;
        }
        for digit in Digit::ALL {
            if allow(column, digit) && is_acceptable(Position::new(layer, column), digit, grid, facts) {
                grid.set_digit(layer, column, digit);
                if fill(grid, facts, layer, column + 1, allow) {
                    return true;
                }
                grid.clear_digit(layer, column);
            }
        }
        false
    }

    let mut grid = grid.clone();
    for column in 0..10 {
        grid.clear_digit(layer, column);
    }
    assert!(fill(&mut grid, facts, layer, 0, allow), "layer {layer} has no answer");
    std::array::from_fn(|column| grid.digit(layer, column).unwrap())
}

/// Enter `answer[cursor.column]` until the cursor leaves `layer`
pub fn enter_answer<R: RandomSource>(puzzle: &mut Puzzle<R>, layer: usize, answer: &[Digit; 10]) {
    while let Some(cursor) = puzzle.cursor().filter(|c| c.layer == layer) {
        let outcome = puzzle.enter_digit(answer[cursor.column]);
        if outcome.is_strike() {
            break;
        }
    }
}

/// Solve and enter one layer with no extra constraints
pub fn fill_layer<R: RandomSource>(puzzle: &mut Puzzle<R>, layer: usize) {
    let answer = solve_layer(puzzle.grid(), puzzle.facts(), layer, &|_, _| true);
    enter_answer(puzzle, layer, &answer);
}

/// Answer for layer 3 that lets layer 4 read 0123456789
pub fn sortable_layer3(grid: &Grid, facts: &EnvironmentFacts) -> [Digit; 10] {
    let wildcard = facts.battery_column();
    solve_layer(grid, facts, 3, &|column, digit| {
        column == wildcard || digit.index() != column
    })
}

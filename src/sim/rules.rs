//! Layer rule engine
//!
//! Decides whether a candidate digit may be entered at the cursor. Each layer
//! is checked against the layer directly above it:
//!
//! | Layer | Key | At the key | Elsewhere |
//! |-------|-----|------------|-----------|
//! | 1 | column `start_minutes % 10` | equal to above | differ from above |
//! | 2 | digit `id_count % 10` | equal to above | differ from above |
//! | 3 | column `battery_count % 10` | equal to above | differ from above |
//! | 4 | column `battery_count % 10` | anything | differ from above |
//!
//! Layer 2 keys off the digit being entered, not the column. Every layer also
//! rejects a digit already present in the same layer.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::environment::EnvironmentFacts;
use super::grid::{Digit, Grid, Position};

/// Why a press was refused. Always resolves to a strike.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum InvalidPress {
    #[error("digit {digit} is already on display #{layer}")]
    Duplicate { layer: usize, digit: Digit },
    #[error("display #{layer} digit #{column} must equal the digit above it")]
    ColumnMustMatch { layer: usize, column: usize },
    #[error("display #{layer} digit #{column} must differ from the digit above it")]
    ColumnMustDiffer { layer: usize, column: usize },
    #[error("display #{layer} digit \"{digit}\" must equal the digit above it")]
    DigitMustMatch { layer: usize, digit: Digit },
    #[error("display #{layer} digit \"{digit}\" must differ from the digit above it")]
    DigitMustDiffer { layer: usize, digit: Digit },
    #[error("display #{layer} does not accept input")]
    LockedLayer { layer: usize },
}

/// Check a candidate digit for the cursor cell
pub fn check_digit(
    cursor: Position,
    digit: Digit,
    grid: &Grid,
    facts: &EnvironmentFacts,
) -> Result<(), InvalidPress> {
    let Position { layer, column } = cursor;
    if layer == 0 || !cursor.in_bounds() {
        return Err(InvalidPress::LockedLayer { layer });
    }

    if grid.contains(layer, digit) {
        return Err(InvalidPress::Duplicate { layer, digit });
    }

    let above = grid.digit(layer - 1, column);
    let matches_above = above == Some(digit);

    match layer {
        1 => column_rule(layer, column, facts.minutes_column(), matches_above),
        2 => {
            if digit == facts.id_digit() {
                if matches_above {
                    Ok(())
                } else {
                    Err(InvalidPress::DigitMustMatch { layer, digit })
                }
            } else if matches_above {
                Err(InvalidPress::DigitMustDiffer { layer, digit })
            } else {
                Ok(())
            }
        }
        3 => column_rule(layer, column, facts.battery_column(), matches_above),
        _ => {
            // Wildcard column
            if column == facts.battery_column() || !matches_above {
                Ok(())
            } else {
                Err(InvalidPress::ColumnMustDiffer { layer, column })
            }
        }
    }
}

/// Boolean form of [`check_digit`]
pub fn is_acceptable(
    cursor: Position,
    digit: Digit,
    grid: &Grid,
    facts: &EnvironmentFacts,
) -> bool {
    check_digit(cursor, digit, grid, facts).is_ok()
}

fn column_rule(
    layer: usize,
    column: usize,
    key_column: usize,
    matches_above: bool,
) -> Result<(), InvalidPress> {
    match (column == key_column, matches_above) {
        (true, true) | (false, false) => Ok(()),
        (true, false) => Err(InvalidPress::ColumnMustMatch { layer, column }),
        (false, true) => Err(InvalidPress::ColumnMustDiffer { layer, column }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn d(value: u8) -> Digit {
        Digit::new(value).unwrap()
    }

    fn grid_with(layers: &[(usize, [u8; 10])]) -> Grid {
        let mut grid = Grid::new();
        for (layer, digits) in layers {
            for (column, value) in digits.iter().enumerate() {
                grid.set_digit(*layer, column, d(*value));
            }
        }
        grid
    }

    const SEED: [u8; 10] = [5, 2, 8, 0, 3, 9, 1, 6, 4, 7];

    #[test]
    fn test_layer1_key_column_must_match() {
        let grid = grid_with(&[(0, SEED)]);
        let facts = EnvironmentFacts::new(23, 0, 0);

        // Column 3 sits under a 0
        assert!(is_acceptable(Position::new(1, 3), d(0), &grid, &facts));
        assert_eq!(
            check_digit(Position::new(1, 3), d(4), &grid, &facts),
            Err(InvalidPress::ColumnMustMatch { layer: 1, column: 3 })
        );
    }

    #[test]
    fn test_layer1_other_columns_must_differ() {
        let grid = grid_with(&[(0, SEED)]);
        let facts = EnvironmentFacts::new(23, 0, 0);

        for column in (0..10).filter(|&c| c != 3) {
            let above = grid.digit(0, column).unwrap();
            assert_eq!(
                check_digit(Position::new(1, column), above, &grid, &facts),
                Err(InvalidPress::ColumnMustDiffer { layer: 1, column })
            );
            let other = Digit::from_mod10(above.index() + 1);
            assert!(is_acceptable(Position::new(1, column), other, &grid, &facts));
        }
    }

    #[test]
    fn test_layer2_keys_off_digit_value() {
        let layer1 = [0, 1, 2, 3, 4, 5, 6, 7, 8, 9];
        let grid = grid_with(&[(0, SEED), (1, layer1)]);
        let facts = EnvironmentFacts::new(0, 14, 0);

        // 4 may only go under a 4
        assert!(is_acceptable(Position::new(2, 4), d(4), &grid, &facts));
        assert_eq!(
            check_digit(Position::new(2, 6), d(4), &grid, &facts),
            Err(InvalidPress::DigitMustMatch { layer: 2, digit: d(4) })
        );
        // Anything else must not repeat the digit above
        assert_eq!(
            check_digit(Position::new(2, 7), d(7), &grid, &facts),
            Err(InvalidPress::DigitMustDiffer { layer: 2, digit: d(7) })
        );
        assert!(is_acceptable(Position::new(2, 7), d(8), &grid, &facts));
    }

    #[test]
    fn test_layer3_battery_column() {
        let layer2 = [9, 8, 7, 6, 5, 4, 3, 2, 1, 0];
        let grid = grid_with(&[(0, SEED), (2, layer2)]);
        let facts = EnvironmentFacts::new(0, 0, 12);

        assert!(is_acceptable(Position::new(3, 2), d(7), &grid, &facts));
        assert!(!is_acceptable(Position::new(3, 2), d(6), &grid, &facts));
        assert!(!is_acceptable(Position::new(3, 5), d(4), &grid, &facts));
        assert!(is_acceptable(Position::new(3, 5), d(3), &grid, &facts));
    }

    #[test]
    fn test_layer4_wildcard_column() {
        let layer3 = [0, 1, 2, 3, 4, 5, 6, 7, 8, 9];
        let grid = grid_with(&[(0, SEED), (3, layer3)]);
        let facts = EnvironmentFacts::new(0, 0, 6);

        // Column 6 takes anything, even the digit above
        assert!(is_acceptable(Position::new(4, 6), d(6), &grid, &facts));
        assert!(is_acceptable(Position::new(4, 6), d(1), &grid, &facts));
        assert!(!is_acceptable(Position::new(4, 2), d(2), &grid, &facts));
        assert!(is_acceptable(Position::new(4, 2), d(3), &grid, &facts));
    }

    #[test]
    fn test_layer0_is_locked() {
        let grid = Grid::new();
        let facts = EnvironmentFacts::default();
        assert_eq!(
            check_digit(Position::new(0, 0), d(0), &grid, &facts),
            Err(InvalidPress::LockedLayer { layer: 0 })
        );
    }

    proptest! {
        #[test]
        fn prop_duplicate_always_rejected(
            layer in 1usize..5,
            filled in prop::sample::subsequence((0usize..10).collect::<Vec<_>>(), 1..10),
            pick in any::<prop::sample::Index>(),
            minutes in 0usize..100,
            ids in 0usize..100,
            batteries in 0usize..100,
        ) {
            let mut grid = grid_with(&[(0, SEED)]);
            for &column in &filled {
                grid.set_digit(layer, column, Digit::from_mod10(column + 3));
            }
            let cursor_column = (0..10).find(|c| !filled.contains(c));
            prop_assume!(cursor_column.is_some());
            let cursor = Position::new(layer, cursor_column.unwrap());
            let existing = grid.digit(layer, filled[pick.index(filled.len())]).unwrap();
            let facts = EnvironmentFacts::new(minutes, ids, batteries);

            prop_assert_eq!(
                check_digit(cursor, existing, &grid, &facts),
                Err(InvalidPress::Duplicate { layer, digit: existing })
            );
        }

        #[test]
        fn prop_layer1_key_column(minutes in 0usize..200, column in 0usize..10, value in 0u8..10) {
            let grid = grid_with(&[(0, SEED)]);
            let facts = EnvironmentFacts::new(minutes, 0, 0);
            let digit = d(value);
            let above = grid.digit(0, column);
            let expected = if column == minutes % 10 {
                above == Some(digit)
            } else {
                above != Some(digit)
            };
            prop_assert_eq!(is_acceptable(Position::new(1, column), digit, &grid, &facts), expected);
        }

        #[test]
        fn prop_layer2_key_digit(ids in 0usize..200, column in 0usize..10, value in 0u8..10) {
            let grid = grid_with(&[(0, SEED), (1, [3, 7, 0, 5, 8, 1, 9, 2, 6, 4])]);
            let facts = EnvironmentFacts::new(0, ids, 0);
            let digit = d(value);
            let above = grid.digit(1, column);
            let expected = if value as usize == ids % 10 {
                above == Some(digit)
            } else {
                above != Some(digit)
            };
            prop_assert_eq!(is_acceptable(Position::new(2, column), digit, &grid, &facts), expected);
        }
    }
}

//! Grid store: five layers of ten digit buttons
//!
//! A plain container. No validation happens here; the rule engine decides
//! what may be written and the puzzle reports every write as an event.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{COLUMNS_COUNT, LAYERS_COUNT};

/// A single decimal digit (0-9)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Digit(u8);

/// Raised when a value outside 0-9 is used as a digit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{0} is not a decimal digit")]
pub struct NotADigit(pub u8);

impl Digit {
    /// Every digit in ascending order
    pub const ALL: [Digit; 10] = [
        Digit(0),
        Digit(1),
        Digit(2),
        Digit(3),
        Digit(4),
        Digit(5),
        Digit(6),
        Digit(7),
        Digit(8),
        Digit(9),
    ];

    pub fn new(value: u8) -> Option<Self> {
        (value <= 9).then_some(Self(value))
    }

    /// Digit from a column index or a count reduced mod 10
    pub fn from_mod10(value: usize) -> Self {
        Self((value % 10) as u8)
    }

    /// Parse a single ASCII character
    pub fn from_char(c: char) -> Option<Self> {
        c.to_digit(10).map(|d| Self(d as u8))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl TryFrom<u8> for Digit {
    type Error = NotADigit;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(NotADigit(value))
    }
}

impl From<Digit> for u8 {
    fn from(digit: Digit) -> Self {
        digit.0
    }
}

impl fmt::Display for Digit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A button address: layer (row) and column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub layer: usize,
    pub column: usize,
}

impl Position {
    pub const fn new(layer: usize, column: usize) -> Self {
        Self { layer, column }
    }

    /// Whether the position addresses a real button
    pub fn in_bounds(&self) -> bool {
        self.layer < LAYERS_COUNT && self.column < COLUMNS_COUNT
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.layer, self.column)
    }
}

/// One button: its displayed digit and whether it is the input cursor
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub digit: Option<Digit>,
    pub is_next: bool,
}

impl Cell {
    /// Text shown on the button face
    pub fn label(&self) -> char {
        match (self.digit, self.is_next) {
            (Some(d), _) => char::from(b'0' + d.value()),
            (None, true) => '_',
            (None, false) => ' ',
        }
    }
}

/// The full 5x10 button matrix
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    cells: [[Cell; COLUMNS_COUNT]; LAYERS_COUNT],
}

impl Grid {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cell at a position, `None` when out of bounds
    pub fn cell(&self, pos: Position) -> Option<&Cell> {
        self.cells.get(pos.layer)?.get(pos.column)
    }

    pub fn layer(&self, layer: usize) -> &[Cell; COLUMNS_COUNT] {
        &self.cells[layer]
    }

    pub fn digit(&self, layer: usize, column: usize) -> Option<Digit> {
        self.cells[layer][column].digit
    }

    pub fn set_digit(&mut self, layer: usize, column: usize, digit: Digit) {
        self.cells[layer][column].digit = Some(digit);
    }

    pub fn clear_digit(&mut self, layer: usize, column: usize) {
        self.cells[layer][column].digit = None;
    }

    pub fn is_next(&self, layer: usize, column: usize) -> bool {
        self.cells[layer][column].is_next
    }

    pub fn set_next(&mut self, layer: usize, column: usize, is_next: bool) {
        self.cells[layer][column].is_next = is_next;
    }

    /// Columns of a layer that hold no digit yet, ascending
    pub fn unset_columns(&self, layer: usize) -> Vec<usize> {
        self.cells[layer]
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.digit.is_none())
            .map(|(column, _)| column)
            .collect()
    }

    pub fn is_complete(&self, layer: usize) -> bool {
        self.cells[layer].iter().all(|cell| cell.digit.is_some())
    }

    pub fn contains(&self, layer: usize, digit: Digit) -> bool {
        self.column_of(layer, digit).is_some()
    }

    /// Column of a layer showing the given digit
    pub fn column_of(&self, layer: usize, digit: Digit) -> Option<usize> {
        self.cells[layer]
            .iter()
            .position(|cell| cell.digit == Some(digit))
    }

    /// True when every column holds its own index (0123456789)
    pub fn is_identity(&self, layer: usize) -> bool {
        self.cells[layer]
            .iter()
            .enumerate()
            .all(|(column, cell)| cell.digit.map(Digit::index) == Some(column))
    }

    /// Column currently flagged as the cursor in a layer
    pub fn next_column(&self, layer: usize) -> Option<usize> {
        self.cells[layer].iter().position(|cell| cell.is_next)
    }

    /// Layer rendered as text, `_` for empty cells
    pub fn row_string(&self, layer: usize) -> String {
        self.cells[layer]
            .iter()
            .map(|cell| cell.digit.map_or('_', |d| char::from(b'0' + d.value())))
            .collect()
    }

    /// Layer rendered as text with a candidate digit shown at one column
    pub fn row_with_candidate(&self, layer: usize, column: usize, candidate: Digit) -> String {
        self.cells[layer]
            .iter()
            .enumerate()
            .map(|(c, cell)| {
                let digit = if c == column { Some(candidate) } else { cell.digit };
                digit.map_or('_', |d| char::from(b'0' + d.value()))
            })
            .collect()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (layer, row) in self.cells.iter().enumerate() {
            let labels: String = row
                .iter()
                .flat_map(|cell| [cell.label(), ' '])
                .collect();
            writeln!(f, "#{layer} | {}", labels.trim_end())?;
        }
        Ok(())
    }
}

//! MWI Sort - A layered digit-sorting puzzle
//!
//! Core modules:
//! - `sim`: Deterministic puzzle logic (grid, rules, progression, strikes)
//! - `commands`: Scripted-input adapter (text commands to button presses)
//! - `host`: Event loop wiring the puzzle to the idle timer and commands
//! - `settings`: JSON configuration

pub mod commands;
pub mod host;
pub mod settings;
pub mod sim;

pub use commands::{Command, CommandError};
pub use host::Host;
pub use settings::Settings;

/// Puzzle configuration constants
pub mod consts {
    /// Number of layers (display rows), including the pre-seeded layer 0
    pub const LAYERS_COUNT: usize = 5;
    /// Buttons per layer; also the number of distinct digits
    pub const COLUMNS_COUNT: usize = 10;
    /// Last layer, which must end up sorted
    pub const FINAL_LAYER: usize = LAYERS_COUNT - 1;
    /// Default idle window before an idle strike (seconds)
    pub const SECONDS_FOR_INPUT: f32 = 10.0;
}

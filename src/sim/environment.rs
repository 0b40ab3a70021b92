//! Environment facts read from the host bomb at activation

use serde::{Deserialize, Serialize};

use super::grid::Digit;

/// What the host bomb exposes to the puzzle
pub trait BombInfo {
    /// Bomb timer reading in seconds
    fn time_secs(&self) -> f32;
    /// Number of module ids installed on the bomb
    fn module_ids(&self) -> usize;
    /// Number of batteries on the bomb
    fn battery_count(&self) -> usize;
}

/// Fixed bomb readings, for hosts without a live bomb and for tests
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BombSnapshot {
    pub time_secs: f32,
    pub module_ids: usize,
    pub battery_count: usize,
}

impl Default for BombSnapshot {
    fn default() -> Self {
        Self {
            time_secs: 300.0,
            module_ids: 11,
            battery_count: 2,
        }
    }
}

impl BombInfo for BombSnapshot {
    fn time_secs(&self) -> f32 {
        self.time_secs
    }

    fn module_ids(&self) -> usize {
        self.module_ids
    }

    fn battery_count(&self) -> usize {
        self.battery_count
    }
}

/// Values captured once at activation; immutable afterwards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EnvironmentFacts {
    /// Bomb time at activation in whole minutes
    pub start_minutes: usize,
    /// Installed module count
    pub id_count: usize,
    pub battery_count: usize,
}

impl EnvironmentFacts {
    pub fn new(start_minutes: usize, id_count: usize, battery_count: usize) -> Self {
        Self {
            start_minutes,
            id_count,
            battery_count,
        }
    }

    /// Read the bomb. Negative or non-finite times count as zero minutes.
    pub fn capture(bomb: &dyn BombInfo) -> Self {
        let minutes = (bomb.time_secs() / 60.0).floor();
        let start_minutes = if minutes.is_finite() && minutes > 0.0 {
            minutes as usize
        } else {
            0
        };
        Self::new(start_minutes, bomb.module_ids(), bomb.battery_count())
    }

    /// Layer 1 key column
    pub fn minutes_column(&self) -> usize {
        self.start_minutes % 10
    }

    /// Layer 2 key digit
    pub fn id_digit(&self) -> Digit {
        Digit::from_mod10(self.id_count)
    }

    /// Layer 3 and 4 key column
    pub fn battery_column(&self) -> usize {
        self.battery_count % 10
    }
}

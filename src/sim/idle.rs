//! Idle timer
//!
//! Strikes the player when no digit has been accepted for too long. The timer
//! is armed by accepted input and cleared by any strike, so it never fires
//! before the first entry or right after a strike. The host polls it; the
//! puzzle itself has no notion of time.

use super::events::PuzzleEvent;
use crate::consts::SECONDS_FOR_INPUT;

#[derive(Debug, Clone)]
pub struct IdleTimer {
    /// Allowed seconds between accepted inputs
    window_secs: f32,
    enabled: bool,
    /// Host time of the last accepted input
    last_input: Option<f32>,
}

impl Default for IdleTimer {
    fn default() -> Self {
        Self::new(SECONDS_FOR_INPUT)
    }
}

impl IdleTimer {
    pub fn new(window_secs: f32) -> Self {
        Self {
            window_secs,
            enabled: true,
            last_input: None,
        }
    }

    pub fn window_secs(&self) -> f32 {
        self.window_secs
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Disabling also forgets the last input
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.last_input = None;
        }
    }

    pub fn is_armed(&self) -> bool {
        self.last_input.is_some()
    }

    /// Update from a puzzle event that happened at `now`
    pub fn observe(&mut self, event: &PuzzleEvent, now: f32) {
        match event {
            PuzzleEvent::DigitChanged {
                pos,
                digit: Some(_),
            } if pos.layer > 0 => {
                if self.enabled {
                    self.last_input = Some(now);
                }
            }
            PuzzleEvent::Strike { .. } | PuzzleEvent::Pass => self.last_input = None,
            _ => {}
        }
    }

    /// True once when the window has elapsed; the timer disarms itself
    pub fn poll(&mut self, now: f32) -> bool {
        if !self.enabled {
            return false;
        }
        match self.last_input {
            Some(last) if now > last + self.window_secs => {
                self.last_input = None;
                true
            }
            _ => false,
        }
    }
}

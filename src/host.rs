//! Host loop
//!
//! Owns one puzzle, the idle timer and the strike count. Every entry point
//! takes the host's current time in seconds, forwards puzzle events to the
//! idle timer and queues them for the front-end.

use rand_pcg::Pcg32;

use crate::commands::{Command, CommandError};
use crate::settings::Settings;
use crate::sim::{
    BombInfo, IdleTimer, Position, PressOutcome, Puzzle, PuzzleEvent, RandomSource, ResetDenied,
};

pub struct Host<R = Pcg32> {
    puzzle: Puzzle<R>,
    idle: IdleTimer,
    /// Whether the idle timer is wanted outside scripted mode
    idle_wanted: bool,
    scripted: bool,
    strikes: u32,
    events: Vec<PuzzleEvent>,
}

impl Host<Pcg32> {
    /// Build a host from settings. The puzzle is not yet active.
    pub fn from_settings(settings: &Settings) -> Self {
        let seed = settings.effective_seed();
        log::info!("Puzzle seed: {}", seed);
        let idle = match settings.effective_idle_window() {
            Some(window) => IdleTimer::new(window),
            None => {
                let mut idle = IdleTimer::new(settings.idle_timeout_secs);
                idle.set_enabled(false);
                idle
            }
        };
        Self::new(Puzzle::with_seed(seed), idle)
    }
}

impl<R: RandomSource> Host<R> {
    pub fn new(puzzle: Puzzle<R>, idle: IdleTimer) -> Self {
        let idle_wanted = idle.is_enabled();
        Self {
            puzzle,
            idle,
            idle_wanted,
            scripted: false,
            strikes: 0,
            events: Vec::new(),
        }
    }

    pub fn puzzle(&self) -> &Puzzle<R> {
        &self.puzzle
    }

    pub fn idle_timer(&self) -> &IdleTimer {
        &self.idle
    }

    /// Strikes handed to the bomb so far
    pub fn strikes(&self) -> u32 {
        self.strikes
    }

    pub fn is_scripted(&self) -> bool {
        self.scripted
    }

    /// Scripted input has no idle limit
    pub fn set_scripted(&mut self, scripted: bool) {
        self.scripted = scripted;
        self.idle.set_enabled(self.idle_wanted && !scripted);
    }

    /// Take all events queued since the last call
    pub fn drain_events(&mut self) -> Vec<PuzzleEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn activate(&mut self, bomb: &dyn BombInfo, now: f32) {
        self.puzzle.activate(bomb);
        self.pump(now);
    }

    pub fn press(&mut self, pos: Position, now: f32) -> PressOutcome {
        let outcome = self.puzzle.press(pos);
        self.pump(now);
        outcome
    }

    pub fn reset(&mut self, now: f32) -> Result<(), ResetDenied> {
        let result = self.puzzle.reset();
        self.pump(now);
        result
    }

    /// Parse and run a command line. Nothing is pressed if parsing fails.
    pub fn run_command(&mut self, line: &str, now: f32) -> Result<Vec<PressOutcome>, CommandError> {
        let command = Command::parse(line)?;
        let result = command.run(&mut self.puzzle);
        self.pump(now);
        result
    }

    /// Per-frame check. Returns true if the idle timer struck.
    pub fn update(&mut self, now: f32) -> bool {
        if !self.idle.poll(now) {
            return false;
        }
        let struck = self.puzzle.idle_timeout().is_some();
        self.pump(now);
        struck
    }

    fn pump(&mut self, now: f32) {
        for event in self.puzzle.drain_events() {
            self.idle.observe(&event, now);
            match &event {
                PuzzleEvent::Strike { cause } => {
                    self.strikes += 1;
                    log::debug!(
                        "[MWISort #{}] Strike {} ({})",
                        self.puzzle.module_id(),
                        self.strikes,
                        cause
                    );
                }
                PuzzleEvent::Pass => {
                    log::debug!("[MWISort #{}] Pass", self.puzzle.module_id());
                }
                _ => {}
            }
            self.events.push(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::testing::{SEED_LAYER, d, fill_layer};
    use crate::sim::{BombSnapshot, EnvironmentFacts, ScriptedRandom};

    fn host() -> Host<ScriptedRandom> {
        let mut puzzle = Puzzle::new(ScriptedRandom::first());
        puzzle.activate_seeded(EnvironmentFacts::new(23, 14, 2), SEED_LAYER.map(d));
        let mut host = Host::new(puzzle, IdleTimer::new(10.0));
        host.pump(0.0);
        host.drain_events();
        host
    }

    #[test]
    fn test_idle_strike_mid_layer_fires_once() {
        let mut host = host();
        assert_eq!(host.run_command("press 1 3", 1.0).unwrap().len(), 2);
        let grid = host.puzzle().grid().clone();

        assert!(!host.update(5.0));
        assert!(host.update(11.5));
        assert!(!host.update(30.0));
        assert!(!host.update(300.0));

        assert_eq!(host.strikes(), 1);
        assert_eq!(host.puzzle().grid(), &grid);
        assert!(host.puzzle().reset_active());
        let strikes = host
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, PuzzleEvent::Strike { .. }))
            .count();
        assert_eq!(strikes, 1);
    }

    #[test]
    fn test_no_idle_strike_before_first_input() {
        let mut host = host();
        assert!(!host.update(1000.0));
        assert_eq!(host.strikes(), 0);
    }

    #[test]
    fn test_idle_timer_rearms_after_strike_on_next_input() {
        let mut host = host();
        host.run_command("press 1", 0.0).unwrap();
        assert!(host.update(10.5));
        host.run_command("press 3", 20.0).unwrap();
        assert!(!host.update(29.0));
        assert!(host.update(30.5));
        assert_eq!(host.strikes(), 2);
    }

    #[test]
    fn test_scripted_mode_disables_idle_timer() {
        let mut host = host();
        host.set_scripted(true);
        host.run_command("press 1 3", 0.0).unwrap();
        assert!(!host.update(500.0));
        assert_eq!(host.strikes(), 0);

        host.set_scripted(false);
        host.run_command("press 4", 600.0).unwrap();
        assert!(host.update(611.0));
    }

    #[test]
    fn test_malformed_command_changes_nothing() {
        let mut host = host();
        let before = host.puzzle().snapshot();
        assert!(host.run_command("press 1 2 q", 0.0).is_err());
        assert_eq!(host.puzzle().snapshot(), before);
        assert!(host.drain_events().is_empty());
    }

    #[test]
    fn test_strikes_counted_across_sources() {
        let mut host = host();
        // Repeats the digit above column 0
        assert!(host.press(Position::new(0, 0), 0.0).is_strike());
        host.run_command("press 1 1", 1.0).unwrap();
        assert_eq!(host.strikes(), 2);
        assert_eq!(host.reset(2.0), Ok(()));
        assert_eq!(host.reset(3.0), Err(ResetDenied::GateInactive));
    }

    #[test]
    fn test_activation_through_host() {
        let mut host = Host::new(Puzzle::new(ScriptedRandom::first()), IdleTimer::default());
        host.activate(&BombSnapshot::default(), 0.0);
        let events = host.drain_events();
        assert!(matches!(events.first(), Some(PuzzleEvent::Activated { .. })));
        assert_eq!(
            events
                .iter()
                .filter(|e| matches!(e, PuzzleEvent::DigitChanged { .. }))
                .count(),
            10
        );
        assert!(!host.idle_timer().is_armed());
    }

    #[test]
    fn test_layer_completion_keeps_timer_armed() {
        let mut host = host();
        fill_layer(&mut host.puzzle, 1);
        host.pump(4.0);
        assert!(host.idle_timer().is_armed());
        assert!(host.update(14.5));
    }

    #[test]
    fn test_from_settings_respects_idle_toggle() {
        let settings = Settings {
            seed: Some(3),
            idle_timeout_enabled: false,
            ..Default::default()
        };
        let host = Host::from_settings(&settings);
        assert!(!host.idle_timer().is_enabled());
        assert!(!host.puzzle().is_filling());
    }
}

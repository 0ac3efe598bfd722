//! Run controller
//!
//! Owns the [`GameState`] between frames. The browser (or a headless driver)
//! calls [`GameLoop::frame`] once per scheduled frame and reads the returned
//! [`FrameReport`]. Whether frames keep being scheduled is decided by
//! [`GameLoop::is_running`], which is independent of the run being over: a
//! finished run keeps rendering its overlay until restarted.

use crate::config::GameConfig;
use crate::sim::{GameEvent, GameState, TickInput, tick};

/// What presentation needs after a frame
#[derive(Debug, Clone, PartialEq)]
pub struct FrameReport {
    pub events: Vec<GameEvent>,
    pub terminal: bool,
    /// HUD line (GPA, failing count, catches)
    pub summary: String,
}

pub struct GameLoop {
    state: GameState,
    running: bool,
    /// Restart key currently held (restart acts on the press edge only)
    restart_held: bool,
}

impl GameLoop {
    pub fn new(config: GameConfig, seed: u64) -> Self {
        log::info!("Game initialized with seed: {seed}");
        Self {
            state: GameState::new(config, seed),
            running: true,
            restart_held: false,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct access for debugging tools and tests
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }

    /// Stop scheduling further frames
    pub fn stop(&mut self) {
        if self.running {
            log::info!("Game loop stopped after {} frames", self.state.frame_count);
        }
        self.running = false;
    }

    /// Run one frame of simulation. Does nothing once stopped.
    pub fn frame(&mut self, input: &TickInput, now_ms: f64) -> FrameReport {
        let events = if self.running {
            tick(&mut self.state, input, now_ms)
        } else {
            Vec::new()
        };
        FrameReport {
            events,
            terminal: self.state.is_terminal(),
            summary: self.summary(),
        }
    }

    pub fn summary(&self) -> String {
        self.state.run.summary(&self.state.config.limits)
    }

    /// Restart key went down. Resets only on a fresh press while the run is
    /// over; returns whether a reset happened.
    pub fn press_restart(&mut self) -> bool {
        if self.restart_held {
            return false;
        }
        self.restart_held = true;
        self.request_restart()
    }

    /// Restart key went up
    pub fn release_restart(&mut self) {
        self.restart_held = false;
    }

    /// Reset the run if it is over; a live run ignores the request
    pub fn request_restart(&mut self) -> bool {
        if !self.state.is_terminal() {
            return false;
        }
        self.state.reset();
        log::info!("Game restarted");
        true
    }

    /// Drive frames from `next` until it yields `None`, the loop is stopped,
    /// or `max_frames` have run. Returns the number of frames run.
    pub fn run_until<F>(&mut self, mut next: F, max_frames: u64) -> u64
    where
        F: FnMut(&GameState) -> Option<(TickInput, f64)>,
    {
        let mut frames = 0;
        while self.running && frames < max_frames {
            let Some((input, now_ms)) = next(&self.state) else {
                break;
            };
            self.frame(&input, now_ms);
            frames += 1;
        }
        frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiet_loop() -> GameLoop {
        let mut config = GameConfig::default();
        config.spawn.base_probability = 0.0;
        GameLoop::new(config, 5)
    }

    #[test]
    fn test_restart_ignored_while_playing() {
        let mut game = quiet_loop();
        game.frame(&TickInput::default(), 0.0);
        assert!(!game.press_restart());
        assert_eq!(game.state().frame_count, 1);
    }

    #[test]
    fn test_stop_halts_frames() {
        let mut game = quiet_loop();
        game.stop();
        assert!(!game.is_running());
        let report = game.frame(&TickInput::default(), 0.0);
        assert!(report.events.is_empty());
        assert_eq!(game.state().frame_count, 0);
    }

    #[test]
    fn test_run_until_respects_cap_and_source() {
        let mut game = quiet_loop();
        let ran = game.run_until(
            |state| Some((TickInput::default(), state.headless_clock_ms())),
            30,
        );
        assert_eq!(ran, 30);

        let mut budget = 5;
        let ran = game.run_until(
            |_| {
                budget -= 1;
                (budget >= 0).then_some((TickInput::default(), 0.0))
            },
            100,
        );
        assert_eq!(ran, 5);
    }

    #[test]
    fn test_report_summary() {
        let mut game = quiet_loop();
        let report = game.frame(&TickInput::default(), 0.0);
        assert!(!report.terminal);
        assert_eq!(report.summary, "GPA: 0.00 | F: 0/4 | Caught: 0/7");
    }
}

//! Border pulse shown while a lookup is in flight.
//!
//! The border walks idle -> highlight -> idle, `PULSE_STEPS` steps per
//! half-cycle, one step every `PULSE_STEP_MS`. A running loop holds the
//! generation it was started with; `step` refuses any generation other than
//! the current one, so a loop from an earlier `Active` period (or one left
//! over after `stop`) cannot paint another color.

#[cfg(test)]
#[path = "pulse_test.rs"]
mod pulse_test;

use crate::state::login::Progress;
use crate::util::color::{Rgb, interpolate_color};

/// Duration of one half-cycle.
pub const PULSE_DURATION_MS: u64 = 2000;
/// Steps per half-cycle.
pub const PULSE_STEPS: u64 = 100;
pub const PULSE_STEP_MS: u64 = PULSE_DURATION_MS / PULSE_STEPS;

/// DimGray.
pub const IDLE_BORDER: Rgb = Rgb::new(0x69, 0x69, 0x69);
/// LightGoldenRodYellow.
pub const HIGHLIGHT_BORDER: Rgb = Rgb::new(0xFA, 0xFA, 0xD2);

/// Color at position `tick` of the endless idle/highlight cycle.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn pulse_color(tick: u64) -> Rgb {
    let position = tick % (PULSE_STEPS * 2);
    let (from, to, step) = if position < PULSE_STEPS {
        (IDLE_BORDER, HIGHLIGHT_BORDER, position)
    } else {
        (HIGHLIGHT_BORDER, IDLE_BORDER, position - PULSE_STEPS)
    };
    interpolate_color(from, to, step as f32 / PULSE_STEPS as f32)
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BorderPulse {
    generation: u64,
    running: bool,
    tick: u64,
    color: Rgb,
}

impl Default for BorderPulse {
    fn default() -> Self {
        Self { generation: 0, running: false, tick: 0, color: IDLE_BORDER }
    }
}

impl BorderPulse {
    /// Restart from the idle color; returns the generation the new loop owns.
    pub fn start(&mut self) -> u64 {
        self.generation += 1;
        self.running = true;
        self.tick = 0;
        self.color = IDLE_BORDER;
        self.generation
    }

    pub fn stop(&mut self) {
        self.generation += 1;
        self.running = false;
        self.color = IDLE_BORDER;
    }

    /// Follow the form's progress. Returns a generation when a new loop
    /// must be spawned.
    pub fn sync(&mut self, progress: Progress) -> Option<u64> {
        match (progress == Progress::Active, self.running) {
            (true, false) => Some(self.start()),
            (false, true) => {
                self.stop();
                None
            }
            _ => None,
        }
    }

    /// Advance one step for the loop owning `generation`. `None` tells that
    /// loop to exit.
    pub fn step(&mut self, generation: u64) -> Option<Rgb> {
        if !self.running || generation != self.generation {
            return None;
        }
        let color = pulse_color(self.tick);
        self.tick += 1;
        self.color = color;
        Some(color)
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    #[must_use]
    pub fn color(&self) -> Rgb {
        self.color
    }
}

/// Border color the form should render right now.
#[must_use]
pub fn border_color(progress: Progress, pulse: &BorderPulse) -> Rgb {
    if progress == Progress::Active { pulse.color() } else { IDLE_BORDER }
}

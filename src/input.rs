//! Button handling
//!
//! Both buttons are pulled up: a released button reads `High`, a pressed one
//! reads `Low`.

use embedded_hal::digital::v2::PinState;

use crate::config::ModePolicy;
use crate::display::DisplayMode;

/// One sample of both button levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonLevels {
    pub reset: PinState,
    pub mode: PinState,
}

impl ButtonLevels {
    pub const RELEASED: Self = Self {
        reset: PinState::High,
        mode: PinState::High,
    };
}

/// Result of polling both buttons once
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InputEvent {
    pub mode: DisplayMode,
    /// Reset button was pressed since the previous poll
    pub reset: bool,
}

#[derive(Debug, Clone)]
pub struct InputHandler {
    prev_reset: PinState,
    policy: ModePolicy,
    mode: DisplayMode,
    candidate: DisplayMode,
    streak: u8,
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new(ModePolicy::Level)
    }
}

impl InputHandler {
    pub fn new(policy: ModePolicy) -> Self {
        Self {
            prev_reset: PinState::High,
            policy,
            mode: DisplayMode::Time,
            candidate: DisplayMode::Time,
            streak: 0,
        }
    }

    /// True exactly once per released-to-pressed transition.
    pub fn poll_reset(&mut self, level: PinState) -> bool {
        let pressed = level == PinState::Low && self.prev_reset == PinState::High;
        self.prev_reset = level;
        pressed
    }

    /// Voltage mode while the button is held, time mode otherwise.
    pub fn poll_mode(&mut self, level: PinState) -> DisplayMode {
        let raw = match level {
            PinState::Low => DisplayMode::Voltage,
            PinState::High => DisplayMode::Time,
        };

        match self.policy {
            ModePolicy::Level => self.mode = raw,
            ModePolicy::Debounced { samples } => {
                if raw == self.candidate {
                    self.streak = self.streak.saturating_add(1);
                } else {
                    self.candidate = raw;
                    self.streak = 1;
                }
                if self.streak >= samples {
                    self.mode = self.candidate;
                }
            }
        }

        self.mode
    }

    pub fn poll(&mut self, levels: ButtonLevels) -> InputEvent {
        InputEvent {
            reset: self.poll_reset(levels.reset),
            mode: self.poll_mode(levels.mode),
        }
    }

    pub fn mode(&self) -> DisplayMode {
        self.mode
    }
}

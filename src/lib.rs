//! Timer and voltmeter core for a 4-digit shift-register LED shield
//!
//! Everything here is board-agnostic and runs on the host:
//!
//! - Segment and digit-select tables
//! - Elapsed-time counter driven by a 1 Hz tick
//! - Button edge and level handling
//! - The per-digit renderer and the multiplexing cursor
//! - A latched shift-register driver over `embedded-hal` pins
//!
//! The RP2040 firmware in `main.rs` wires these to real peripherals.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod clock;
pub mod config;
pub mod display;
pub mod input;
pub mod multiplex;
pub mod segments;
pub mod shift;
pub mod voltage;

pub use clock::ElapsedTime;
pub use config::{ConfigError, ModePolicy, ShieldConfig};
pub use display::{DigitFrame, DisplayMode, DisplayRenderer};
pub use input::{InputEvent, InputHandler};
pub use multiplex::{DigitCursor, Multiplexer};
pub use shift::{DisplayError, FrameSink, ShiftRegister};
pub use voltage::{Centivolts, VoltageSource};

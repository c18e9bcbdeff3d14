//! Latched shift-register transport
//!
//! The shield chains two 74HC595s: the first byte shifted ends up in the
//! segment register, the second in the digit-select register. Outputs only
//! change when the latch goes high, so a half-shifted frame is never shown.

use embedded_hal::digital::v2::{OutputPin, PinState};

/// Anything that can latch one segment/select byte pair onto the display
pub trait FrameSink {
    type Error;

    fn write_frame(&mut self, segments: u8, select: u8) -> Result<(), Self::Error>;
}

/// Bit-banged driver for the two cascaded shift registers
pub struct ShiftRegister<DATA, CLK, LATCH> {
    data: DATA,
    clock: CLK,
    latch: LATCH,
}

impl<DATA, CLK, LATCH, E> ShiftRegister<DATA, CLK, LATCH>
where
    DATA: OutputPin<Error = E>,
    CLK: OutputPin<Error = E>,
    LATCH: OutputPin<Error = E>,
{
    pub fn new(data: DATA, clock: CLK, latch: LATCH) -> Self {
        Self { data, clock, latch }
    }

    pub fn destroy(self) -> (DATA, CLK, LATCH) {
        (self.data, self.clock, self.latch)
    }

    /// Shift one byte, MSB first. Data is sampled on the rising clock edge.
    fn shift_byte(&mut self, byte: u8) -> Result<(), DisplayError<E>> {
        for bit in (0..8).rev() {
            self.data.set_state(PinState::from((byte >> bit) & 1 == 1))?;
            self.clock.set_low()?;
            self.clock.set_high()?;
        }
        Ok(())
    }
}

impl<DATA, CLK, LATCH, E> FrameSink for ShiftRegister<DATA, CLK, LATCH>
where
    DATA: OutputPin<Error = E>,
    CLK: OutputPin<Error = E>,
    LATCH: OutputPin<Error = E>,
{
    type Error = DisplayError<E>;

    fn write_frame(&mut self, segments: u8, select: u8) -> Result<(), Self::Error> {
        self.latch.set_low()?;
        self.shift_byte(segments)?;
        self.shift_byte(select)?;
        self.latch.set_high()?;
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError<E> {
    Pin(E),
}

impl<E> From<E> for DisplayError<E> {
    fn from(error: E) -> Self {
        DisplayError::Pin(error)
    }
}

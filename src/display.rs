//! Per-digit rendering
//!
//! A frame is rendered for one digit position at a time. The renderer keeps
//! no history: the output depends only on the mode, the cursor and the data
//! passed in.

use crate::clock::ElapsedTime;
use crate::multiplex::DigitCursor;
use crate::segments::{self, BLANK};
use crate::voltage::{Centivolts, REFERENCE_VOLTS};

/// What the four digits are showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayMode {
    /// Elapsed time as MM.SS
    #[default]
    Time,
    /// Analog input as V.VV, fourth digit blank
    Voltage,
}

/// Segment and digit-select bytes for a single digit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DigitFrame {
    pub segments: u8,
    pub select: u8,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayRenderer {
    reference_volts: f32,
    suppress_leading_zero: bool,
}

impl Default for DisplayRenderer {
    fn default() -> Self {
        Self::new(REFERENCE_VOLTS, false)
    }
}

impl DisplayRenderer {
    pub fn new(reference_volts: f32, suppress_leading_zero: bool) -> Self {
        Self {
            reference_volts,
            suppress_leading_zero,
        }
    }

    /// Frame for `cursor`. `voltage_sample` is ignored in time mode.
    pub fn render(
        &self,
        mode: DisplayMode,
        cursor: DigitCursor,
        time: &ElapsedTime,
        voltage_sample: f32,
    ) -> DigitFrame {
        let segments = match mode {
            DisplayMode::Time => self.time_digit(cursor, time),
            DisplayMode::Voltage => self.voltage_digit(
                cursor,
                Centivolts::from_sample(voltage_sample, self.reference_volts),
            ),
        };

        DigitFrame {
            segments,
            select: segments::select(cursor.position()),
        }
    }

    fn time_digit(&self, cursor: DigitCursor, time: &ElapsedTime) -> u8 {
        let minutes = time.minutes();
        let seconds = time.seconds();

        match cursor.position() {
            0 if self.suppress_leading_zero && minutes < 10 => BLANK,
            0 => segments::encode(minutes / 10),
            // Dot after the minutes separates MM.SS
            1 => segments::with_decimal_point(segments::encode(minutes % 10)),
            2 => segments::encode(seconds / 10),
            _ => segments::encode(seconds % 10),
        }
    }

    fn voltage_digit(&self, cursor: DigitCursor, reading: Centivolts) -> u8 {
        let frac = reading.frac_part();

        match cursor.position() {
            0 => segments::with_decimal_point(segments::encode(reading.int_part())),
            1 => segments::encode(frac / 10),
            2 => segments::encode(frac % 10),
            _ => BLANK,
        }
    }
}

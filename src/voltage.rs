//! Analog input scaling
//!
//! The ADC is an external collaborator; the core only sees a normalized
//! sample and turns it into a fixed-point centivolt reading.

/// Full-scale voltage of the analog input
pub const REFERENCE_VOLTS: f32 = 3.3;

/// Largest reading the three voltage digits can show (9.99 V)
pub const MAX_CENTIVOLTS: u16 = 999;

/// Source of normalized analog samples in `0.0..=1.0`
pub trait VoltageSource {
    fn sample(&mut self) -> f32;
}

/// Constant source, handy on the host and for a detached potentiometer
impl VoltageSource for f32 {
    fn sample(&mut self) -> f32 {
        *self
    }
}

/// Voltage reading in hundredths of a volt, saturated at [`MAX_CENTIVOLTS`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Centivolts(u16);

impl Centivolts {
    /// Scale a normalized sample against the reference voltage.
    ///
    /// Truncates toward zero. Negative and NaN samples read as zero.
    pub fn from_sample(sample: f32, reference_volts: f32) -> Self {
        let volts = sample * reference_volts;
        // float-to-int `as` saturates and maps NaN to 0
        Self::saturating((volts * 100.0) as u32)
    }

    pub fn saturating(raw: u32) -> Self {
        Self(raw.min(u32::from(MAX_CENTIVOLTS)) as u16)
    }

    pub fn value(self) -> u16 {
        self.0
    }

    /// Units of volts (0-9)
    pub fn int_part(self) -> u8 {
        (self.0 / 100) as u8
    }

    /// Hundredths after the decimal point (0-99)
    pub fn frac_part(self) -> u8 {
        (self.0 % 100) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_half_scale() {
        let cv = Centivolts::from_sample(0.5, REFERENCE_VOLTS);
        assert_eq!(cv.value(), 165);
        assert_eq!(cv.int_part(), 1);
        assert_eq!(cv.frac_part(), 65);
    }

    #[test]
    fn test_saturates_instead_of_wrapping() {
        let cv = Centivolts::saturating(1200);
        assert_eq!(cv.value(), 999);
        assert_eq!(cv.int_part(), 9);
        assert_eq!(cv.frac_part(), 99);

        // 1.0 * 12 V would be 1200 cV
        assert_eq!(Centivolts::from_sample(1.0, 12.0).value(), 999);
    }

    #[test]
    fn test_out_of_range_samples() {
        assert_eq!(Centivolts::from_sample(0.0, REFERENCE_VOLTS).value(), 0);
        assert_eq!(Centivolts::from_sample(-0.2, REFERENCE_VOLTS).value(), 0);
        assert_eq!(Centivolts::from_sample(f32::NAN, REFERENCE_VOLTS).value(), 0);
        assert_eq!(Centivolts::from_sample(1.0, REFERENCE_VOLTS).value(), 330);
    }
}

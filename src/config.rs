//! Shield configuration
//!
//! Values are fixed at build time; the firmware validates them once at boot.

use core::fmt;

use crate::clock::WRAP_SECONDS;
use crate::voltage::REFERENCE_VOLTS;

/// Period of the elapsed-time tick in microseconds
pub const SECOND_TICK_US: u32 = 1_000_000;

/// Period of the multiplex refresh tick in microseconds (one digit per tick)
pub const REFRESH_TICK_US: u32 = 2_000;

/// How the mode button level becomes a display mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ModePolicy {
    /// Follow the raw level on every poll; contact bounce may flip one frame
    #[default]
    Level,
    /// Change mode only after this many identical consecutive polls
    Debounced { samples: u8 },
}

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Wrap bound is zero or above [`WRAP_SECONDS`]
    WrapOutOfRange(u16),
    /// Reference voltage is not a positive number
    InvalidReference,
    /// A tick period is zero
    ZeroPeriod,
    /// The refresh tick must be faster than the second tick
    RefreshTooSlow,
    /// Debounce needs at least one sample
    ZeroDebounce,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::WrapOutOfRange(wrap) => {
                write!(f, "wrap bound {} outside 1..={}", wrap, WRAP_SECONDS)
            }
            ConfigError::InvalidReference => write!(f, "reference voltage must be positive"),
            ConfigError::ZeroPeriod => write!(f, "tick period must be non-zero"),
            ConfigError::RefreshTooSlow => {
                write!(f, "refresh tick must be shorter than the second tick")
            }
            ConfigError::ZeroDebounce => write!(f, "debounce needs at least one sample"),
        }
    }
}

/// Complete shield configuration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ShieldConfig {
    /// Elapsed-time rollover in seconds
    pub wrap_seconds: u16,
    /// Voltage at full ADC scale
    pub reference_volts: f32,
    /// Mode button handling
    pub mode_policy: ModePolicy,
    /// Blank the minutes-tens digit while it is zero
    pub suppress_leading_zero: bool,
    /// Elapsed-time tick period (µs)
    pub second_tick_us: u32,
    /// Multiplex refresh period (µs)
    pub refresh_tick_us: u32,
}

impl Default for ShieldConfig {
    fn default() -> Self {
        Self {
            wrap_seconds: WRAP_SECONDS,
            reference_volts: REFERENCE_VOLTS,
            mode_policy: ModePolicy::Level,
            suppress_leading_zero: false,
            second_tick_us: SECOND_TICK_US,
            refresh_tick_us: REFRESH_TICK_US,
        }
    }
}

impl ShieldConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.wrap_seconds == 0 || self.wrap_seconds > WRAP_SECONDS {
            return Err(ConfigError::WrapOutOfRange(self.wrap_seconds));
        }
        // also rejects NaN
        if !(self.reference_volts > 0.0) {
            return Err(ConfigError::InvalidReference);
        }
        if self.second_tick_us == 0 || self.refresh_tick_us == 0 {
            return Err(ConfigError::ZeroPeriod);
        }
        if self.refresh_tick_us >= self.second_tick_us {
            return Err(ConfigError::RefreshTooSlow);
        }
        if let ModePolicy::Debounced { samples: 0 } = self.mode_policy {
            return Err(ConfigError::ZeroDebounce);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert_eq!(ShieldConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_rejects_bad_wrap() {
        let mut config = ShieldConfig::default();
        config.wrap_seconds = 0;
        assert_eq!(config.validate(), Err(ConfigError::WrapOutOfRange(0)));
        config.wrap_seconds = WRAP_SECONDS + 1;
        assert_eq!(
            config.validate(),
            Err(ConfigError::WrapOutOfRange(WRAP_SECONDS + 1))
        );
    }

    #[test]
    fn test_rejects_bad_reference() {
        let mut config = ShieldConfig::default();
        config.reference_volts = 0.0;
        assert_eq!(config.validate(), Err(ConfigError::InvalidReference));
        config.reference_volts = f32::NAN;
        assert_eq!(config.validate(), Err(ConfigError::InvalidReference));
    }

    #[test]
    fn test_rejects_bad_periods() {
        let mut config = ShieldConfig::default();
        config.refresh_tick_us = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroPeriod));
        config.refresh_tick_us = SECOND_TICK_US;
        assert_eq!(config.validate(), Err(ConfigError::RefreshTooSlow));
    }

    #[test]
    fn test_rejects_zero_debounce() {
        let config = ShieldConfig {
            mode_policy: ModePolicy::Debounced { samples: 0 },
            ..ShieldConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroDebounce));
    }
}

/// Seconds after which the counter rolls back to zero.
///
/// 6000 s is 100 minutes, so the display runs 00:00 through 99:59 and the
/// minute digits never need a third place.
pub const WRAP_SECONDS: u16 = 6000;

/// Elapsed-time state shared between the 1 Hz tick and the display loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ElapsedTime {
    total: u16,
    wrap: u16,
}

impl Default for ElapsedTime {
    fn default() -> Self {
        Self::new()
    }
}

impl ElapsedTime {
    pub const fn new() -> Self {
        Self {
            total: 0,
            wrap: WRAP_SECONDS,
        }
    }

    /// Counter with a custom rollover, clamped to `1..=WRAP_SECONDS`.
    pub fn with_wrap(wrap: u16) -> Self {
        Self {
            total: 0,
            wrap: wrap.clamp(1, WRAP_SECONDS),
        }
    }

    /// Increments the second, rolling over at the wrap bound.
    pub fn advance(&mut self) {
        self.total += 1;
        if self.total >= self.wrap {
            self.total = 0;
        }
    }

    pub fn reset(&mut self) {
        self.total = 0;
    }

    pub fn total_seconds(&self) -> u16 {
        self.total
    }

    /// Whole minutes; not folded into hours.
    pub fn minutes(&self) -> u8 {
        (self.total / 60) as u8
    }

    pub fn seconds(&self) -> u8 {
        (self.total % 60) as u8
    }

    pub fn wrap(&self) -> u16 {
        self.wrap
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn advanced(n: u32) -> ElapsedTime {
        let mut time = ElapsedTime::new();
        for _ in 0..n {
            time.advance();
        }
        time
    }

    #[test]
    fn test_minutes_do_not_wrap_at_sixty() {
        let time = advanced(3661);
        assert_eq!(time.minutes(), 61);
        assert_eq!(time.seconds(), 1);
    }

    #[test]
    fn test_wraps_at_bound() {
        let mut time = advanced(5999);
        assert_eq!(time.total_seconds(), 5999);
        assert_eq!(time.minutes(), 99);
        assert_eq!(time.seconds(), 59);
        time.advance();
        assert_eq!(time.total_seconds(), 0);
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut time = advanced(125);
        time.reset();
        assert_eq!(time.total_seconds(), 0);
        time.reset();
        assert_eq!(time.total_seconds(), 0);
    }

    #[test]
    fn test_custom_wrap_is_clamped() {
        assert_eq!(ElapsedTime::with_wrap(0).wrap(), 1);
        assert_eq!(ElapsedTime::with_wrap(9000).wrap(), WRAP_SECONDS);

        let mut time = ElapsedTime::with_wrap(60);
        for _ in 0..59 {
            time.advance();
        }
        assert_eq!(time.seconds(), 59);
        time.advance();
        assert_eq!(time.total_seconds(), 0);
    }
}

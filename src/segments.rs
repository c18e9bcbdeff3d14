//! Segment and digit-select encodings for the shield
//!
//! Segment bytes are active-low for a common-anode display: a cleared bit
//! lights the segment. Bit layout, LSB first: A B C D E F G DP.

/// Segment patterns for the decimal digits 0-9
pub const SEGMENT_MAP: [u8; 10] = [
    0xC0, // 0
    0xF9, // 1
    0xA4, // 2
    0xB0, // 3
    0x99, // 4
    0x92, // 5
    0x82, // 6
    0xF8, // 7
    0x80, // 8
    0x90, // 9
];

/// All segments off
pub const BLANK: u8 = 0xFF;

/// Decimal point bit; clear it to light the dot
pub const DECIMAL_POINT: u8 = 0x80;

/// Number of physical digits on the shield
pub const DIGIT_COUNT: usize = 4;

/// Digit enable bytes, one per position (left to right)
///
/// The low nibble drives the digit lines and is one-hot; the high nibble is
/// unwired and stays set.
pub const DIGIT_SELECT: [u8; DIGIT_COUNT] = [0xF1, 0xF2, 0xF4, 0xF8];

/// Segment pattern for a decimal digit.
///
/// Callers derive digits with `/ 10` and `% 10`, so they are always 0-9;
/// anything larger folds to its units digit.
pub fn encode(digit: u8) -> u8 {
    SEGMENT_MAP[usize::from(digit % 10)]
}

/// Light the decimal point on an existing pattern
pub const fn with_decimal_point(pattern: u8) -> u8 {
    pattern & !DECIMAL_POINT
}

/// Digit-select byte for a position 0-3
pub fn select(position: u8) -> u8 {
    DIGIT_SELECT[usize::from(position) % DIGIT_COUNT]
}

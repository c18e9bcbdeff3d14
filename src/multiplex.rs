//! Digit multiplexing
//!
//! Only one digit is lit at a time. Each refresh renders the digit under the
//! cursor, latches it out and moves the cursor on, so at a 2 ms refresh the
//! whole display is redrawn every 8 ms.

use heapless::spsc::{Consumer, Producer, Queue};

use crate::clock::ElapsedTime;
use crate::display::{DigitFrame, DisplayMode, DisplayRenderer};
use crate::segments::DIGIT_COUNT;
use crate::shift::FrameSink;
use crate::voltage::VoltageSource;

/// Marker passed from the refresh tick to the display loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RefreshTick;

/// Refresh handoff with room for a single pending tick
pub type RefreshQueue = Queue<RefreshTick, 2>;
pub type RefreshProducer<'a> = Producer<'a, RefreshTick, 2>;
pub type RefreshConsumer<'a> = Consumer<'a, RefreshTick, 2>;

/// Mark a refresh as due. Returns `false` if one was already pending, in
/// which case the two ticks coalesce.
pub fn signal_refresh(producer: &mut RefreshProducer<'_>) -> bool {
    producer.enqueue(RefreshTick).is_ok()
}

/// Take the pending refresh, if any
pub fn take_refresh(consumer: &mut RefreshConsumer<'_>) -> bool {
    consumer.dequeue().is_some()
}

/// Digit position, always in `0..4`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DigitCursor(u8);

impl DigitCursor {
    /// Cursor at `position`, folded into range
    pub const fn at(position: u8) -> Self {
        Self(position % DIGIT_COUNT as u8)
    }

    pub const fn position(self) -> u8 {
        self.0
    }

    pub fn advance(&mut self) {
        self.0 = (self.0 + 1) % DIGIT_COUNT as u8;
    }
}

#[derive(Debug, Clone, Default)]
pub struct Multiplexer {
    cursor: DigitCursor,
    renderer: DisplayRenderer,
}

impl Multiplexer {
    pub fn new(renderer: DisplayRenderer) -> Self {
        Self {
            cursor: DigitCursor::default(),
            renderer,
        }
    }

    pub fn cursor(&self) -> DigitCursor {
        self.cursor
    }

    /// Render and latch the digit under the cursor, then advance it.
    ///
    /// The voltage source is only sampled in voltage mode. On a transport
    /// error the cursor stays put so the same digit is retried next tick.
    pub fn refresh<V, S>(
        &mut self,
        mode: DisplayMode,
        time: &ElapsedTime,
        voltage: &mut V,
        sink: &mut S,
    ) -> Result<DigitFrame, S::Error>
    where
        V: VoltageSource,
        S: FrameSink,
    {
        let sample = match mode {
            DisplayMode::Voltage => voltage.sample(),
            DisplayMode::Time => 0.0,
        };

        let frame = self.renderer.render(mode, self.cursor, time, sample);
        sink.write_frame(frame.segments, frame.select)?;
        self.cursor.advance();

        Ok(frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segments::{encode, select, with_decimal_point, BLANK};

    #[derive(Default)]
    struct RecordingSink {
        frames: Vec<(u8, u8)>,
        fail: bool,
    }

    impl FrameSink for RecordingSink {
        type Error = ();

        fn write_frame(&mut self, segments: u8, select: u8) -> Result<(), ()> {
            if self.fail {
                return Err(());
            }
            self.frames.push((segments, select));
            Ok(())
        }
    }

    struct CountingSource {
        value: f32,
        samples: usize,
    }

    impl VoltageSource for CountingSource {
        fn sample(&mut self) -> f32 {
            self.samples += 1;
            self.value
        }
    }

    #[test]
    fn test_cursor_wraps() {
        let mut cursor = DigitCursor::default();
        let mut seen = [0u8; 5];
        for slot in seen.iter_mut() {
            *slot = cursor.position();
            cursor.advance();
        }
        assert_eq!(seen, [0, 1, 2, 3, 0]);
        assert_eq!(DigitCursor::at(6).position(), 2);
    }

    #[test]
    fn test_full_time_scan() {
        let mut mux = Multiplexer::default();
        let mut sink = RecordingSink::default();
        let mut source = CountingSource {
            value: 0.5,
            samples: 0,
        };
        let mut time = ElapsedTime::new();
        for _ in 0..125 {
            time.advance();
        }

        for _ in 0..4 {
            mux.refresh(DisplayMode::Time, &time, &mut source, &mut sink)
                .unwrap();
        }

        assert_eq!(
            sink.frames,
            vec![
                (encode(0), select(0)),
                (with_decimal_point(encode(2)), select(1)),
                (encode(0), select(2)),
                (encode(5), select(3)),
            ]
        );
        assert_eq!(source.samples, 0);
        assert_eq!(mux.cursor().position(), 0);
    }

    #[test]
    fn test_voltage_mode_samples_each_refresh() {
        let mut mux = Multiplexer::default();
        let mut sink = RecordingSink::default();
        let mut source = CountingSource {
            value: 0.5,
            samples: 0,
        };
        let time = ElapsedTime::new();

        for _ in 0..4 {
            mux.refresh(DisplayMode::Voltage, &time, &mut source, &mut sink)
                .unwrap();
        }

        assert_eq!(source.samples, 4);
        assert_eq!(sink.frames[3], (BLANK, select(3)));
    }

    #[test]
    fn test_cursor_held_on_write_error() {
        let mut mux = Multiplexer::default();
        let mut sink = RecordingSink {
            fail: true,
            ..Default::default()
        };
        let time = ElapsedTime::new();

        assert!(mux
            .refresh(DisplayMode::Time, &time, &mut 0.0f32, &mut sink)
            .is_err());
        assert_eq!(mux.cursor().position(), 0);
    }

    #[test]
    fn test_refresh_signals_coalesce() {
        let mut queue: RefreshQueue = Queue::new();
        let (mut producer, mut consumer) = queue.split();

        assert!(!take_refresh(&mut consumer));
        assert!(signal_refresh(&mut producer));
        assert!(!signal_refresh(&mut producer));
        assert!(take_refresh(&mut consumer));
        assert!(!take_refresh(&mut consumer));
    }
}

//! Mocks shared by the unit tests.

use crate::color::{Channel, Color};
use crate::hal::{Buzzer, RgbOutput};
use crate::time::{TimeDuration, TimeInstant};
use palette::Srgb;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestDuration(pub u64);

impl TimeDuration for TestDuration {
    fn as_millis(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestInstant(pub u64);

impl TimeInstant for TestInstant {
    type Duration = TestDuration;

    fn duration_since(&self, earlier: Self) -> Self::Duration {
        TestDuration(self.0 - earlier.0)
    }
}

/// Buzzer that records every call.
#[derive(Default)]
pub struct MockBuzzer {
    pub tones: heapless::Vec<u16, 64>,
    pub stops: usize,
    pub sounding: Option<u16>,
}

impl Buzzer for MockBuzzer {
    fn start_tone(&mut self, frequency: u16) {
        let _ = self.tones.push(frequency);
        self.sounding = Some(frequency);
    }

    fn stop_tone(&mut self) {
        self.stops += 1;
        self.sounding = None;
    }
}

/// Output that remembers the last color asserted.
pub struct MockOutput {
    pub color: Color,
    pub writes: usize,
}

impl MockOutput {
    pub fn new() -> Self {
        Self {
            color: Srgb::new(0, 0, 0),
            writes: 0,
        }
    }
}

impl RgbOutput for MockOutput {
    fn set_channel(&mut self, channel: Channel, intensity: u8) {
        match channel {
            Channel::Red => self.color.red = intensity,
            Channel::Green => self.color.green = intensity,
            Channel::Blue => self.color.blue = intensity,
        }
    }

    fn set_color(&mut self, color: Color) {
        self.color = color;
        self.writes += 1;
    }
}

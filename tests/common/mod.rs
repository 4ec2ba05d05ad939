//! Shared test infrastructure for kitty-lamp integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use kitty_lamp::{
    Buzzer, Channel, Color, Config, DEFAULT_CONFIG, Device, ModeButton, OFF, Pad, RgbOutput,
    TimeDuration, TimeInstant, TimeSource, TouchSensor,
};
use rand_core::{Error, RngCore};

// ============================================================================
// Mock Time Types
// ============================================================================

/// Mock duration type for testing (wraps milliseconds)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestDuration(pub u64);

impl TimeDuration for TestDuration {
    fn as_millis(&self) -> u64 {
        self.0
    }
}

/// Mock instant type for testing
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestInstant(pub u64);

impl TimeInstant for TestInstant {
    type Duration = TestDuration;

    fn duration_since(&self, earlier: Self) -> Self::Duration {
        TestDuration(self.0 - earlier.0)
    }
}

// ============================================================================
// Mock Time Source
// ============================================================================

/// Mock time source with controllable time advancement
pub struct MockTimeSource {
    current_time: core::cell::Cell<TestInstant>,
}

impl MockTimeSource {
    pub fn new() -> Self {
        Self {
            current_time: core::cell::Cell::new(TestInstant(0)),
        }
    }

    /// Advance time by the given number of milliseconds
    pub fn advance(&self, millis: u64) {
        let current = self.current_time.get();
        self.current_time.set(TestInstant(current.0 + millis));
    }

    pub fn set_time(&self, millis: u64) {
        self.current_time.set(TestInstant(millis));
    }

    pub fn millis(&self) -> u64 {
        self.current_time.get().0
    }
}

impl TimeSource<TestInstant> for MockTimeSource {
    fn now(&self) -> TestInstant {
        self.current_time.get()
    }
}

// ============================================================================
// Mock Board
// ============================================================================

/// Board that records outputs and serves scripted inputs
pub struct MockBoard {
    pub color: Color,
    pub color_writes: usize,
    pub pads: [u8; 4],
    pub pad_reads: usize,
    pub button: bool,
    pub tones: Vec<u16>,
    pub sounding: Option<u16>,
}

impl MockBoard {
    pub fn new() -> Self {
        Self {
            color: OFF,
            color_writes: 0,
            pads: [0; 4],
            pad_reads: 0,
            button: false,
            tones: Vec::new(),
            sounding: None,
        }
    }
}

impl RgbOutput for MockBoard {
    fn set_channel(&mut self, channel: Channel, intensity: u8) {
        self.color = channel.with(self.color, intensity);
    }

    fn set_color(&mut self, color: Color) {
        self.color = color;
        self.color_writes += 1;
    }
}

impl TouchSensor for MockBoard {
    fn read_pad(&mut self, pad: Pad) -> u8 {
        self.pad_reads += 1;
        self.pads[pad.index()]
    }
}

impl Buzzer for MockBoard {
    fn start_tone(&mut self, frequency: u16) {
        self.tones.push(frequency);
        self.sounding = Some(frequency);
    }

    fn stop_tone(&mut self) {
        self.sounding = None;
    }
}

impl ModeButton for MockBoard {
    fn is_pressed(&mut self) -> bool {
        self.button
    }
}

// ============================================================================
// Mock RNG
// ============================================================================

/// Returns scripted values in order, then repeats the last one
pub struct ScriptedRng {
    values: Vec<u32>,
    next: usize,
}

impl ScriptedRng {
    pub fn new(values: &[u32]) -> Self {
        Self {
            values: values.to_vec(),
            next: 0,
        }
    }
}

impl RngCore for ScriptedRng {
    fn next_u32(&mut self) -> u32 {
        let value = self.values[self.next.min(self.values.len() - 1)];
        self.next += 1;
        value
    }

    fn next_u64(&mut self) -> u64 {
        u64::from(self.next_u32())
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        dest.fill(0);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

// ============================================================================
// Test Helper Functions
// ============================================================================

pub type TestDevice<'t> = Device<'t, TestInstant, MockTimeSource, MockBoard, ScriptedRng>;

/// Default config without the power-on melody, so tone assertions start clean
pub fn quiet_config() -> Config {
    Config {
        startup_melody: false,
        ..DEFAULT_CONFIG
    }
}

pub fn quiet_device<'t>(timer: &'t MockTimeSource, script: &[u32]) -> TestDevice<'t> {
    Device::with_config(MockBoard::new(), ScriptedRng::new(script), timer, quiet_config()).unwrap()
}

/// Advance time 1 ms at a time, ticking after each step
pub fn run_for(device: &mut TestDevice<'_>, timer: &MockTimeSource, millis: u64) {
    for _ in 0..millis {
        timer.advance(1);
        device.tick();
    }
}

/// Hold the mode button for `millis`, then release and let the release register
pub fn press_button(device: &mut TestDevice<'_>, timer: &MockTimeSource, millis: u64) {
    device.board_mut().button = true;
    run_for(device, timer, millis);
    device.board_mut().button = false;
    run_for(device, timer, 10);
}

/// Short presses until `count` modes have passed, then wait out the mode flash
pub fn advance_modes(device: &mut TestDevice<'_>, timer: &MockTimeSource, count: usize) {
    for _ in 0..count {
        press_button(device, timer, 30);
    }
    run_for(device, timer, 300);
}

/// Touch a pad long enough to be sampled, then release it
pub fn tap_pad(device: &mut TestDevice<'_>, timer: &MockTimeSource, pad: Pad) {
    device.board_mut().pads[pad.index()] = 50;
    run_for(device, timer, 20);
    device.board_mut().pads[pad.index()] = 0;
    run_for(device, timer, 20);
}

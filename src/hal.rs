//! Hardware boundary traits.
//!
//! Implement these for your board (PWM timers, capacitive pins, buzzer
//! driver, button GPIO). None of the calls may fail: handle hardware errors
//! inside the implementation. Every call is expected to return within
//! microseconds because the whole firmware shares one polling loop.

use crate::color::{Channel, Color};
use crate::touch::Pad;

/// PWM outputs for the RGB LED.
pub trait RgbOutput {
    /// Sets one channel's intensity (0-255). Idempotent.
    fn set_channel(&mut self, channel: Channel, intensity: u8);

    /// Asserts a whole color.
    ///
    /// The default writes the three channels in order. Override this if the
    /// hardware can latch all three at once.
    fn set_color(&mut self, color: Color) {
        for channel in Channel::ALL {
            self.set_channel(channel, channel.of(color));
        }
    }
}

/// Capacitive touch pads.
pub trait TouchSensor {
    /// Returns the relative charge-time magnitude for `pad`.
    ///
    /// Larger values mean more finger influence. This is a single bounded
    /// micro-measurement; the scheduler treats it as instantaneous.
    fn read_pad(&mut self, pad: Pad) -> u8;
}

/// Square-wave piezo driver.
pub trait Buzzer {
    /// Starts (or retunes) a tone. Fire-and-forget.
    fn start_tone(&mut self, frequency: u16);

    /// Silences the buzzer.
    fn stop_tone(&mut self);
}

/// The mode selector push-button.
pub trait ModeButton {
    /// Returns true while the button is held down.
    fn is_pressed(&mut self) -> bool;
}

/// Everything the device drives, bundled.
///
/// Implemented automatically for any type that provides all four boundaries.
pub trait Board: RgbOutput + TouchSensor + Buzzer + ModeButton {}

impl<T: RgbOutput + TouchSensor + Buzzer + ModeButton> Board for T {}

//! Color representation and per-channel brightness ceilings.
//!
//! Colors are plain 8-bit `Srgb<u8>` triples. The LED's green die is much
//! brighter than red and blue at the same duty cycle, so each channel has its
//! own ceiling and every displayed color is clamped to it.

use palette::Srgb;

/// An 8-bit RGB color as driven onto the PWM outputs.
pub type Color = Srgb<u8>;

/// Absolute red ceiling.
pub const MAXIMUM_RED: u8 = 254;
/// Absolute green ceiling.
pub const MAXIMUM_GREEN: u8 = 130;
/// Absolute blue ceiling.
pub const MAXIMUM_BLUE: u8 = 254;

pub const OFF: Color = Srgb::new(0, 0, 0);
pub const RED: Color = Srgb::new(MAXIMUM_RED, 0, 0);
pub const GREEN: Color = Srgb::new(0, MAXIMUM_GREEN, 0);
pub const BLUE: Color = Srgb::new(0, 0, MAXIMUM_BLUE);
pub const YELLOW: Color = Srgb::new(MAXIMUM_RED, MAXIMUM_GREEN, 0);
pub const WHITE: Color = Srgb::new(MAXIMUM_RED, MAXIMUM_GREEN, MAXIMUM_BLUE);

/// One of the three LED channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    /// All channels in output order.
    pub const ALL: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];

    /// The brightness ceiling for this channel.
    #[inline]
    pub const fn maximum(self) -> u8 {
        match self {
            Channel::Red => MAXIMUM_RED,
            Channel::Green => MAXIMUM_GREEN,
            Channel::Blue => MAXIMUM_BLUE,
        }
    }

    /// Reads this channel out of `color`.
    #[inline]
    pub fn of(self, color: Color) -> u8 {
        match self {
            Channel::Red => color.red,
            Channel::Green => color.green,
            Channel::Blue => color.blue,
        }
    }

    /// Returns `color` with this channel replaced by `value`.
    #[inline]
    pub fn with(self, color: Color, value: u8) -> Color {
        let mut out = color;
        match self {
            Channel::Red => out.red = value,
            Channel::Green => out.green = value,
            Channel::Blue => out.blue = value,
        }
        out
    }
}

/// Clamps each channel of `color` to its ceiling.
#[inline]
pub fn clamp(color: Color) -> Color {
    Srgb::new(
        color.red.min(MAXIMUM_RED),
        color.green.min(MAXIMUM_GREEN),
        color.blue.min(MAXIMUM_BLUE),
    )
}

/// Additive blend of two colors, clamped.
#[inline]
pub fn blend(a: Color, b: Color) -> Color {
    clamp(Srgb::new(
        a.red.saturating_add(b.red),
        a.green.saturating_add(b.green),
        a.blue.saturating_add(b.blue),
    ))
}

/// Moves `current` toward `target` by at most `step`, never overshooting.
#[inline]
pub fn approach(current: u8, target: u8, step: u8) -> u8 {
    if current < target {
        current.saturating_add(step).min(target)
    } else {
        current.saturating_sub(step).max(target)
    }
}

/// True when every channel of `current` is within `step` of `target`.
pub fn within_step(current: Color, target: Color, step: u8) -> bool {
    Channel::ALL
        .iter()
        .all(|ch| ch.of(current).abs_diff(ch.of(target)) <= step)
}

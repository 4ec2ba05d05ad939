//! Capacitive pad classification and tap tracking.
//!
//! A pad is held while its raw magnitude is above the threshold. There is no
//! smoothing: the sample interval is the only debounce, and electrical noise
//! may produce the occasional false touch.

use crate::time::{TimeInstant, millis_since};
use heapless::Vec;

/// Number of touch pads on the device.
pub const PAD_COUNT: usize = 4;

/// One of the four touch pads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Pad {
    One,
    Two,
    Three,
    Four,
}

impl Pad {
    /// All pads in sampling order.
    pub const ALL: [Pad; PAD_COUNT] = [Pad::One, Pad::Two, Pad::Three, Pad::Four];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Pad::One => 0,
            Pad::Two => 1,
            Pad::Three => 2,
            Pad::Four => 3,
        }
    }
}

/// A change in a pad's held state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TouchEvent {
    Pressed(Pad),
    Released(Pad),
}

/// Held state of a single pad.
#[derive(Debug, Clone, Copy)]
pub struct TouchState<I> {
    held_since: Option<I>,
}

impl<I: TimeInstant> TouchState<I> {
    const RELEASED: Self = Self { held_since: None };

    pub fn is_held(&self) -> bool {
        self.held_since.is_some()
    }

    /// When the current touch started.
    pub fn held_since(&self) -> Option<I> {
        self.held_since
    }
}

/// Edges produced by one sample of all pads.
pub type TouchEvents = Vec<TouchEvent, PAD_COUNT>;

/// The four pads, sampled together.
pub struct TouchPads<I> {
    pads: [TouchState<I>; PAD_COUNT],
    threshold: u8,
    last_press: Option<I>,
    tap_gap_ms: Option<u64>,
}

impl<I: TimeInstant> TouchPads<I> {
    /// Creates released pads.
    ///
    /// # Arguments
    /// * `threshold` - Magnitudes strictly above this count as a touch
    pub fn new(threshold: u8) -> Self {
        Self {
            pads: [TouchState::RELEASED; PAD_COUNT],
            threshold,
            last_press: None,
            tap_gap_ms: None,
        }
    }

    /// Classifies one set of readings taken in the same tick.
    ///
    /// `readings` is indexed by [`Pad::index`]. Returns the press and release
    /// edges in pad order.
    pub fn sample(&mut self, readings: [u8; PAD_COUNT], now: I) -> TouchEvents {
        let mut events = Vec::new();
        let mut pressed_any = false;

        for pad in Pad::ALL {
            let touched = readings[pad.index()] > self.threshold;
            let state = &mut self.pads[pad.index()];

            match (state.is_held(), touched) {
                (false, true) => {
                    state.held_since = Some(now);
                    pressed_any = true;
                    let _ = events.push(TouchEvent::Pressed(pad));
                }
                (true, false) => {
                    state.held_since = None;
                    let _ = events.push(TouchEvent::Released(pad));
                }
                _ => {}
            }
        }

        // Simultaneous presses count as one tap
        if pressed_any {
            if let Some(previous) = self.last_press {
                self.tap_gap_ms = Some(millis_since(now, previous));
            }
            self.last_press = Some(now);
        }

        events
    }

    pub fn is_held(&self, pad: Pad) -> bool {
        self.pads[pad.index()].is_held()
    }

    pub fn state(&self, pad: Pad) -> &TouchState<I> {
        &self.pads[pad.index()]
    }

    /// Pads currently held, in pad order.
    pub fn held(&self) -> impl Iterator<Item = Pad> + '_ {
        Pad::ALL.into_iter().filter(|pad| self.is_held(*pad))
    }

    /// Milliseconds between the two most recent taps on any pad.
    pub fn tap_gap_ms(&self) -> Option<u64> {
        self.tap_gap_ms
    }

    /// Forgets tap history. Held pads stay held.
    pub fn forget_taps(&mut self) {
        self.last_press = None;
        self.tap_gap_ms = None;
    }
}

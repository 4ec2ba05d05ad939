//! Lighting modes and the displayed color.
//!
//! [`Lighting`] owns the color currently shown on the LED. Every mode computes
//! its next color completely and then hands it to [`Lighting::show`], which
//! clamps it to the channel ceilings, stores it and asserts it to the output
//! in a single call.

use crate::color::{self, BLUE, Color, GREEN, OFF, RED, WHITE, YELLOW, approach, within_step};
use crate::device::Mode;
use crate::hal::RgbOutput;
use crate::time::TimeInstant;
use crate::touch::{Pad, TouchPads};
use palette::Srgb;

/// Fade visits these in order, wrapping around.
pub const FADE_ROTATION: [Color; 3] = [BLUE, RED, GREEN];

/// Blink shows these in order, one per on/off cycle.
pub const BLINK_ROTATION: [Color; 3] = [RED, GREEN, BLUE];

/// How manual mode turns pads into a color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ManualStyle {
    /// The last pressed pad's color stays lit.
    Solid,
    /// Held pads are mixed together; nothing held is dark.
    Blend,
}

/// The base color a pad selects in manual mode.
pub const fn pad_color(pad: Pad) -> Color {
    match pad {
        Pad::One => RED,
        Pad::Two => GREEN,
        Pad::Three => BLUE,
        Pad::Four => YELLOW,
    }
}

#[derive(Debug, Clone, Copy)]
struct FadeState {
    target: usize,
}

#[derive(Debug, Clone, Copy)]
struct BlinkState {
    lit: bool,
    next: usize,
}

#[derive(Debug, Clone, Copy)]
struct ManualState {
    style: ManualStyle,
    selected: Option<Pad>,
}

/// The color engine.
pub struct Lighting {
    color: Color,
    fade_step: u8,
    fade: FadeState,
    blink: BlinkState,
    strobe_lit: bool,
    manual: ManualState,
}

impl Lighting {
    /// Creates the engine with the LED considered dark.
    pub fn new(fade_step: u8) -> Self {
        Self {
            color: OFF,
            fade_step,
            fade: FadeState { target: 0 },
            blink: BlinkState {
                lit: false,
                next: 0,
            },
            strobe_lit: false,
            manual: ManualState {
                style: ManualStyle::Solid,
                selected: None,
            },
        }
    }

    /// The color last asserted to the output.
    pub fn color(&self) -> Color {
        self.color
    }

    /// Clamps, stores and asserts `color`.
    pub fn show<O: RgbOutput>(&mut self, next: Color, out: &mut O) {
        self.color = color::clamp(next);
        out.set_color(self.color);
    }

    /// Resets the per-mode state for a mode that is about to start.
    ///
    /// Fade deliberately keeps its target so it resumes from the current
    /// color instead of jumping.
    pub fn enter(&mut self, mode: Mode) {
        match mode {
            Mode::Fade | Mode::Simon => {}
            Mode::Blink => {
                self.blink = BlinkState {
                    lit: false,
                    next: 0,
                }
            }
            Mode::Strobe => self.strobe_lit = false,
            Mode::Manual => self.manual.selected = None,
        }
    }

    /// One fade step.
    ///
    /// Once all three channels are within one step of the target the color
    /// snaps onto it and the rotation moves on; otherwise every channel moves
    /// toward the target by at most one step.
    ///
    /// # Returns
    /// `true` if the rotation advanced on this step.
    pub fn fade<O: RgbOutput>(&mut self, out: &mut O) -> bool {
        let target = FADE_ROTATION[self.fade.target];
        let step = self.fade_step;

        let (next, advanced) = if within_step(self.color, target, step) {
            self.fade.target = (self.fade.target + 1) % FADE_ROTATION.len();
            (target, true)
        } else {
            let current = self.color;
            (
                Srgb::new(
                    approach(current.red, target.red, step),
                    approach(current.green, target.green, step),
                    approach(current.blue, target.blue, step),
                ),
                false,
            )
        };

        self.show(next, out);
        advanced
    }

    /// The color fade is currently heading toward.
    pub fn fade_target(&self) -> Color {
        FADE_ROTATION[self.fade.target]
    }

    /// Toggles between the current rotation color and off.
    pub fn blink<O: RgbOutput>(&mut self, out: &mut O) {
        let next = if self.blink.lit {
            self.blink.next = (self.blink.next + 1) % BLINK_ROTATION.len();
            OFF
        } else {
            BLINK_ROTATION[self.blink.next]
        };
        self.blink.lit = !self.blink.lit;
        self.show(next, out);
    }

    /// Toggles between white and off.
    pub fn strobe<O: RgbOutput>(&mut self, out: &mut O) {
        self.strobe_lit = !self.strobe_lit;
        let next = if self.strobe_lit { WHITE } else { OFF };
        self.show(next, out);
    }

    /// Records a manual mode pad press.
    pub fn select(&mut self, pad: Pad) {
        self.manual.selected = Some(pad);
    }

    /// Redraws manual mode from the pad state.
    pub fn manual<I: TimeInstant, O: RgbOutput>(&mut self, touch: &TouchPads<I>, out: &mut O) {
        let next = match self.manual.style {
            ManualStyle::Solid => self.manual.selected.map(pad_color).unwrap_or(OFF),
            ManualStyle::Blend => touch
                .held()
                .fold(OFF, |acc, pad| color::blend(acc, pad_color(pad))),
        };
        self.show(next, out);
    }

    pub fn manual_style(&self) -> ManualStyle {
        self.manual.style
    }

    /// Switches between solid and blend manual lighting.
    pub fn toggle_manual_style(&mut self) -> ManualStyle {
        self.manual.style = match self.manual.style {
            ManualStyle::Solid => ManualStyle::Blend,
            ManualStyle::Blend => ManualStyle::Solid,
        };
        self.manual.selected = None;
        self.manual.style
    }
}

//! Mode button press classification.

/// A completed button press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonEvent {
    /// Released at or before the long-press threshold.
    ShortPress,
    /// Held past the long-press threshold.
    LongPress,
}

/// Tracks how long the mode button has been held.
///
/// Call [`ButtonState::sample`] once per button check interval. The press is
/// classified when the button is released, so a long press never also
/// produces a short one.
#[derive(Debug, Clone, Copy)]
pub struct ButtonState {
    pressed: bool,
    held_ticks: u32,
    long_press_ticks: u32,
}

impl ButtonState {
    /// Creates a released button.
    ///
    /// # Arguments
    /// * `long_press_ticks` - A press held for more checks than this is long
    pub fn new(long_press_ticks: u32) -> Self {
        Self {
            pressed: false,
            held_ticks: 0,
            long_press_ticks,
        }
    }

    /// Feeds one sample of the raw button level.
    ///
    /// # Returns
    /// The press classification on the release edge, otherwise `None`.
    pub fn sample(&mut self, pressed: bool) -> Option<ButtonEvent> {
        if pressed {
            self.pressed = true;
            self.held_ticks = self.held_ticks.saturating_add(1);
            return None;
        }

        if !self.pressed {
            return None;
        }

        let event = if self.held_ticks > self.long_press_ticks {
            ButtonEvent::LongPress
        } else {
            ButtonEvent::ShortPress
        };
        self.pressed = false;
        self.held_ticks = 0;
        Some(event)
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Checks counted during the current press.
    pub fn held_ticks(&self) -> u32 {
        self.held_ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hold(button: &mut ButtonState, ticks: u32) -> Option<ButtonEvent> {
        for _ in 0..ticks {
            assert_eq!(button.sample(true), None);
        }
        button.sample(false)
    }

    #[test]
    fn idle_button_reports_nothing() {
        let mut button = ButtonState::new(5);
        assert_eq!(button.sample(false), None);
        assert!(!button.is_pressed());
    }

    #[test]
    fn press_under_threshold_is_short() {
        let mut button = ButtonState::new(5);
        assert_eq!(hold(&mut button, 1), Some(ButtonEvent::ShortPress));
        assert_eq!(hold(&mut button, 4), Some(ButtonEvent::ShortPress));
    }

    #[test]
    fn press_at_threshold_is_still_short() {
        let mut button = ButtonState::new(5);
        assert_eq!(hold(&mut button, 5), Some(ButtonEvent::ShortPress));
    }

    #[test]
    fn press_over_threshold_is_long() {
        let mut button = ButtonState::new(5);
        assert_eq!(hold(&mut button, 6), Some(ButtonEvent::LongPress));
    }

    #[test]
    fn held_ticks_reset_on_release() {
        let mut button = ButtonState::new(5);
        button.sample(true);
        button.sample(true);
        assert_eq!(button.held_ticks(), 2);
        button.sample(false);
        assert_eq!(button.held_ticks(), 0);
        assert!(!button.is_pressed());
        assert_eq!(button.sample(false), None);
    }
}

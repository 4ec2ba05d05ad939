//! Timing and threshold configuration.
//!
//! All intervals are in milliseconds. [`DEFAULT_CONFIG`] holds the values the
//! toy ships with; boards can start from it and override individual fields.

use crate::device::Mode;

/// Simon game pacing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SimonTiming {
    /// Pause between starting a game and the first symbol.
    pub lead_in_ms: u32,
    /// How long each symbol is lit during playback.
    pub flash_ms: u32,
    /// Dark gap after each played-back symbol.
    pub gap_ms: u32,
    /// How long a player's input stays lit.
    pub echo_ms: u32,
    /// Success indication between rounds.
    pub success_ms: u32,
    /// Failure indication before the game goes idle.
    pub fail_ms: u32,
}

pub const DEFAULT_SIMON_TIMING: SimonTiming = SimonTiming {
    lead_in_ms: 750,
    flash_ms: 400,
    gap_ms: 150,
    echo_ms: 250,
    success_ms: 600,
    fail_ms: 1500,
};

impl Default for SimonTiming {
    fn default() -> Self {
        DEFAULT_SIMON_TIMING
    }
}

/// Device configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// Length of the "mode changed" flash.
    pub mode_switch_ms: u32,
    /// Time between fade steps.
    pub fade_interval_ms: u32,
    /// Per-channel change per fade step.
    pub fade_step: u8,
    /// Time between blink on/off toggles.
    pub blink_interval_ms: u32,
    /// Strobe toggle interval before any taps have been seen.
    pub strobe_interval_ms: u32,
    /// Fastest strobe toggle interval reachable by tapping.
    pub strobe_min_ms: u32,
    /// Slowest strobe toggle interval reachable by tapping.
    pub strobe_max_ms: u32,
    /// Manual mode redraw interval.
    pub manual_interval_ms: u32,
    /// Mode button sample interval.
    pub button_check_interval_ms: u32,
    /// Button checks after which a press counts as long.
    pub long_press_ticks: u32,
    /// Touch pad sample interval.
    pub touch_check_interval_ms: u32,
    /// Pad magnitudes above this are a touch.
    pub touch_threshold: u8,
    /// Simon state machine update interval.
    pub simon_interval_ms: u32,
    pub simon: SimonTiming,
    /// Play the greeting melody on power-up.
    pub startup_melody: bool,
}

pub const DEFAULT_CONFIG: Config = Config {
    mode_switch_ms: 250,
    fade_interval_ms: 40,
    fade_step: 1,
    blink_interval_ms: 500,
    strobe_interval_ms: 30,
    strobe_min_ms: 30,
    strobe_max_ms: 500,
    manual_interval_ms: 10,
    button_check_interval_ms: 10,
    long_press_ticks: 200,
    touch_check_interval_ms: 10,
    touch_threshold: 3,
    simon_interval_ms: 10,
    simon: DEFAULT_SIMON_TIMING,
    startup_melody: true,
};

impl Default for Config {
    fn default() -> Self {
        DEFAULT_CONFIG
    }
}

/// Configuration validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Fade would never move.
    ZeroFadeStep,

    /// `strobe_min_ms` is above `strobe_max_ms`.
    InvalidStrobeRange,

    /// Every press would be long.
    ZeroLongPress,

    /// A Simon flash or echo of zero length would never be visible.
    ZeroSimonTiming,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::ZeroFadeStep => write!(f, "fade step must be non-zero"),
            ConfigError::InvalidStrobeRange => {
                write!(f, "strobe minimum interval exceeds the maximum")
            }
            ConfigError::ZeroLongPress => {
                write!(f, "long press threshold must be at least one check")
            }
            ConfigError::ZeroSimonTiming => {
                write!(f, "simon flash and echo durations must be non-zero")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

impl Config {
    /// Checks the configuration for values the firmware cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fade_step == 0 {
            return Err(ConfigError::ZeroFadeStep);
        }
        if self.strobe_min_ms > self.strobe_max_ms {
            return Err(ConfigError::InvalidStrobeRange);
        }
        if self.long_press_ticks == 0 {
            return Err(ConfigError::ZeroLongPress);
        }
        if self.simon.flash_ms == 0 || self.simon.echo_ms == 0 {
            return Err(ConfigError::ZeroSimonTiming);
        }
        Ok(())
    }

    /// Update interval for the behavior of `mode`.
    pub fn mode_interval_ms(&self, mode: Mode) -> u32 {
        match mode {
            Mode::Fade => self.fade_interval_ms,
            Mode::Blink => self.blink_interval_ms,
            Mode::Strobe => self.strobe_interval_ms,
            Mode::Manual => self.manual_interval_ms,
            Mode::Simon => self.simon_interval_ms,
        }
    }

    /// Strobe toggle interval for a tap gap.
    ///
    /// Half the gap, so one full on/off flash per tap, clamped to the
    /// configured range.
    pub fn strobe_interval_for_gap(&self, tap_gap_ms: u64) -> u32 {
        let half = u32::try_from(tap_gap_ms / 2).unwrap_or(u32::MAX);
        half.max(self.strobe_min_ms).min(self.strobe_max_ms)
    }
}

#![cfg_attr(not(any(feature = "std", test)), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`Device`**: Owns the board and all state; call `tick()` from the main loop
//! - **`TaskTable`**: Keyed interval timers polled once per tick
//! - **`Mode`**: Fade, Blink, Strobe, Manual or Simon; the button cycles through them
//! - **`Lighting`**: The color engine and sole writer of the displayed color
//! - **`SongPlayer`**: Non-blocking note sequencer for the buzzer
//! - **`SimonGame`**: The memory game state machine
//! - **`Board`**: Traits to implement for your hardware (`RgbOutput`, `TouchSensor`, `Buzzer`, `ModeButton`)
//! - **`TimeSource`**: Trait to implement for your timing system
//! - **`Config`**: Intervals and thresholds, with shipped defaults in `DEFAULT_CONFIG`
//!
//! Colors are `Srgb<u8>` and are always clamped to the per-channel ceilings
//! (`MAXIMUM_RED`, `MAXIMUM_GREEN`, `MAXIMUM_BLUE`) before reaching the LED.

// Re-export Srgb from palette for user convenience
pub use palette::Srgb;

#[macro_use]
mod fmt;

pub mod button;
pub mod color;
pub mod config;
pub mod device;
pub mod hal;
pub mod lighting;
pub mod pitches;
pub mod player;
pub mod simon;
pub mod songs;
pub mod task;
pub mod time;
pub mod touch;

#[cfg(test)]
mod testing;

pub use button::{ButtonEvent, ButtonState};
pub use color::{
    BLUE, Channel, Color, GREEN, MAXIMUM_BLUE, MAXIMUM_GREEN, MAXIMUM_RED, OFF, RED, WHITE, YELLOW,
};
pub use config::{Config, ConfigError, DEFAULT_CONFIG, DEFAULT_SIMON_TIMING, SimonTiming};
pub use device::{Device, DeviceState, Mode, TaskId};
pub use hal::{Board, Buzzer, ModeButton, RgbOutput, TouchSensor};
pub use lighting::{Lighting, ManualStyle};
pub use player::{Note, PlaybackCursor, PlayerState, Song, SongPlayer};
pub use simon::{InputOutcome, MAX_SEQUENCE_LEN, SimonGame, SimonState, Symbol};
pub use task::{DueTasks, TaskError, TaskTable, TimedTask};
pub use time::{TimeDuration, TimeInstant, TimeSource};
pub use touch::{PAD_COUNT, Pad, TouchEvent, TouchPads, TouchState};

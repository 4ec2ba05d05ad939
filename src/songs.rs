//! Built-in melodies and feedback tones.

use crate::pitches::*;
use crate::player::Note;

/// Power-on melody.
pub static GREETING: [Note; 8] = [
    Note::new(NOTE_C4, 4),
    Note::new(NOTE_G3, 8),
    Note::new(NOTE_G3, 8),
    Note::new(NOTE_GS3, 8),
    Note::new(NOTE_G3, 4),
    Note::rest(4),
    Note::new(NOTE_B3, 4),
    Note::new(NOTE_C4, 4),
];

/// Mode change and long-press acknowledgement.
pub static BEEP_TONE: [Note; 1] = [Note::new(BEEP, 32)];

pub static SIMON_RED_TONE: [Note; 1] = [Note::new(NOTE_G3, 4)];
pub static SIMON_GREEN_TONE: [Note; 1] = [Note::new(NOTE_A3, 4)];
pub static SIMON_BLUE_TONE: [Note; 1] = [Note::new(NOTE_B3, 4)];
pub static SIMON_YELLOW_TONE: [Note; 1] = [Note::new(NOTE_C4, 4)];

/// Played after a fully matched round.
pub static SIMON_SUCCESS: [Note; 2] = [Note::new(NOTE_C5, 16), Note::new(NOTE_G5, 16)];

/// Played on a mismatch.
pub static SIMON_FAIL: [Note; 3] = [
    Note::new(NOTE_DS3, 8),
    Note::new(NOTE_D3, 8),
    Note::new(NOTE_C3, 2),
];

/// Played when the sequence cap is reached.
pub static SIMON_WIN: [Note; 13] = [
    Note::new(NOTE_C4, 8),
    Note::new(NOTE_F4, 4),
    Note::new(NOTE_C4, 8),
    Note::new(NOTE_F4, 4),
    Note::new(NOTE_C4, 8),
    Note::new(NOTE_F4, 2),
    Note::new(NOTE_C4, 8),
    Note::new(NOTE_F4, 8),
    Note::new(NOTE_G4, 8),
    Note::new(NOTE_F4, 8),
    Note::new(NOTE_E4, 4),
    Note::new(NOTE_F4, 8),
    Note::new(NOTE_G4, 2),
];

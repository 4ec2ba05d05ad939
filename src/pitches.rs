//! Note frequencies in Hz (equal temperament, A4 = 440).

pub const NOTE_C3: u16 = 131;
pub const NOTE_CS3: u16 = 139;
pub const NOTE_D3: u16 = 147;
pub const NOTE_DS3: u16 = 156;
pub const NOTE_E3: u16 = 165;
pub const NOTE_F3: u16 = 175;
pub const NOTE_FS3: u16 = 185;
pub const NOTE_G3: u16 = 196;
pub const NOTE_GS3: u16 = 208;
pub const NOTE_A3: u16 = 220;
pub const NOTE_AS3: u16 = 233;
pub const NOTE_B3: u16 = 247;
pub const NOTE_C4: u16 = 262;
pub const NOTE_CS4: u16 = 277;
pub const NOTE_D4: u16 = 294;
pub const NOTE_DS4: u16 = 311;
pub const NOTE_E4: u16 = 330;
pub const NOTE_F4: u16 = 349;
pub const NOTE_FS4: u16 = 370;
pub const NOTE_G4: u16 = 392;
pub const NOTE_GS4: u16 = 415;
pub const NOTE_A4: u16 = 440;
pub const NOTE_AS4: u16 = 466;
pub const NOTE_B4: u16 = 494;
pub const NOTE_C5: u16 = 523;
pub const NOTE_CS5: u16 = 554;
pub const NOTE_D5: u16 = 587;
pub const NOTE_DS5: u16 = 622;
pub const NOTE_E5: u16 = 659;
pub const NOTE_F5: u16 = 698;
pub const NOTE_FS5: u16 = 740;
pub const NOTE_G5: u16 = 784;
pub const NOTE_GS5: u16 = 831;
pub const NOTE_A5: u16 = 880;
pub const NOTE_AS5: u16 = 932;
pub const NOTE_B5: u16 = 988;
pub const NOTE_C6: u16 = 1047;

/// Short feedback chirp, well above the melody range.
pub const BEEP: u16 = 3000;

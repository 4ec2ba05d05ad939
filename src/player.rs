//! Non-blocking song player.
//!
//! Provides [`SongPlayer`], which walks a [`PlaybackCursor`] through a static
//! slice of [`Note`]s one poll at a time. Starting a tone is a fire-and-forget
//! call on the [`Buzzer`], so an update never waits for a note to finish.

use crate::hal::Buzzer;
use crate::time::{TimeInstant, has_elapsed};

/// Length of a whole note in milliseconds. Sets the tempo of every song.
pub const WHOLE_NOTE_MS: u32 = 1000;

/// A single note or rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Note {
    /// Frequency in Hz, or 0 for a rest.
    pub pitch: u16,

    /// Note value as a fraction denominator: 4 is a quarter note, 8 an eighth.
    pub length: u8,
}

impl Note {
    #[inline]
    pub const fn new(pitch: u16, length: u8) -> Self {
        Self { pitch, length }
    }

    /// A silent note of the given length.
    #[inline]
    pub const fn rest(length: u8) -> Self {
        Self { pitch: 0, length }
    }

    pub const fn is_rest(&self) -> bool {
        self.pitch == 0
    }

    /// How long the note lasts. A zero length is treated as a whole note.
    #[inline]
    pub const fn duration_ms(&self) -> u32 {
        let length = if self.length == 0 { 1 } else { self.length as u32 };
        WHOLE_NOTE_MS / length
    }
}

/// A song is just a static run of notes.
pub type Song = &'static [Note];

/// Result of one player update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PlayerState {
    /// No song assigned.
    Idle,
    /// A note (or rest) is sounding.
    Playing,
    /// The last note just ended. The cursor has been released.
    Finished,
}

/// Position within a song.
#[derive(Debug, Clone, Copy)]
pub struct PlaybackCursor<I> {
    song: Song,
    index: usize,
    note_started: Option<I>,
}

impl<I: TimeInstant> PlaybackCursor<I> {
    fn new(song: Song) -> Self {
        Self {
            song,
            index: 0,
            note_started: None,
        }
    }

    /// Index of the current note.
    pub fn index(&self) -> usize {
        self.index
    }

    /// True until the first note has been started.
    pub fn is_pending(&self) -> bool {
        self.note_started.is_none()
    }

    fn current(&self) -> Option<&Note> {
        self.song.get(self.index)
    }
}

/// Plays one song at a time on a buzzer.
///
/// `play` only assigns the cursor; the buzzer is touched exclusively from
/// `update` and `stop`. A song that is replaced before the next update
/// therefore never makes a sound.
pub struct SongPlayer<I> {
    cursor: Option<PlaybackCursor<I>>,
}

impl<I: TimeInstant> SongPlayer<I> {
    pub const fn new() -> Self {
        Self { cursor: None }
    }

    /// Assigns `song`, discarding anything in progress.
    pub fn play(&mut self, song: Song) {
        debug!("song requested ({} notes)", song.len());
        self.cursor = Some(PlaybackCursor::new(song));
    }

    /// Advances playback.
    ///
    /// Starts the first note of a freshly assigned song, or moves to the next
    /// note once the current one has lasted its duration.
    pub fn update<B: Buzzer>(&mut self, now: I, buzzer: &mut B) -> PlayerState {
        let Some(cursor) = self.cursor.as_mut() else {
            return PlayerState::Idle;
        };

        match cursor.note_started {
            None => {}
            Some(started) => {
                let Some(note) = cursor.current() else {
                    return self.finish(buzzer);
                };
                if !has_elapsed(now, started, note.duration_ms()) {
                    return PlayerState::Playing;
                }
                cursor.index += 1;
            }
        }

        let Some(note) = cursor.current().copied() else {
            return self.finish(buzzer);
        };
        if note.is_rest() {
            buzzer.stop_tone();
        } else {
            buzzer.start_tone(note.pitch);
        }
        cursor.note_started = Some(now);
        trace!("note {} at {} Hz", cursor.index, note.pitch);
        PlayerState::Playing
    }

    fn finish<B: Buzzer>(&mut self, buzzer: &mut B) -> PlayerState {
        buzzer.stop_tone();
        self.cursor = None;
        PlayerState::Finished
    }

    pub fn is_playing(&self) -> bool {
        self.cursor.is_some()
    }

    /// The current cursor, if a song is assigned.
    pub fn cursor(&self) -> Option<&PlaybackCursor<I>> {
        self.cursor.as_ref()
    }
}

impl<I: TimeInstant> Default for SongPlayer<I> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockBuzzer, TestInstant};

    static SONG_A: [Note; 2] = [Note::new(440, 4), Note::new(523, 8)];
    static SONG_B: [Note; 2] = [Note::new(196, 4), Note::rest(4)];

    #[test]
    fn note_duration_is_a_fraction_of_a_whole_note() {
        assert_eq!(Note::new(440, 4).duration_ms(), 250);
        assert_eq!(Note::new(440, 8).duration_ms(), 125);
        assert_eq!(Note::new(440, 1).duration_ms(), 1000);
        assert_eq!(Note::new(440, 0).duration_ms(), 1000);
    }

    #[test]
    fn idle_player_does_nothing() {
        let mut player = SongPlayer::<TestInstant>::new();
        let mut buzzer = MockBuzzer::default();
        assert_eq!(player.update(TestInstant(0), &mut buzzer), PlayerState::Idle);
        assert!(buzzer.tones.is_empty());
        assert_eq!(buzzer.stops, 0);
    }

    #[test]
    fn notes_advance_after_their_duration() {
        let mut player = SongPlayer::new();
        let mut buzzer = MockBuzzer::default();
        player.play(&SONG_A);

        assert_eq!(player.update(TestInstant(0), &mut buzzer), PlayerState::Playing);
        assert_eq!(buzzer.sounding, Some(440));

        assert_eq!(player.update(TestInstant(249), &mut buzzer), PlayerState::Playing);
        assert_eq!(buzzer.tones.as_slice(), &[440]);

        player.update(TestInstant(250), &mut buzzer);
        assert_eq!(buzzer.tones.as_slice(), &[440, 523]);

        assert_eq!(player.update(TestInstant(374), &mut buzzer), PlayerState::Playing);
        assert_eq!(player.update(TestInstant(375), &mut buzzer), PlayerState::Finished);
        assert_eq!(buzzer.sounding, None);
        assert!(!player.is_playing());
        assert_eq!(player.update(TestInstant(400), &mut buzzer), PlayerState::Idle);
    }

    #[test]
    fn rest_silences_but_keeps_time() {
        let mut player = SongPlayer::new();
        let mut buzzer = MockBuzzer::default();
        player.play(&SONG_B);

        player.update(TestInstant(0), &mut buzzer);
        player.update(TestInstant(250), &mut buzzer);
        assert_eq!(buzzer.sounding, None);
        assert!(player.is_playing());
        assert_eq!(player.cursor().unwrap().index(), 1);

        assert_eq!(player.update(TestInstant(499), &mut buzzer), PlayerState::Playing);
        assert_eq!(player.update(TestInstant(500), &mut buzzer), PlayerState::Finished);
    }

    #[test]
    fn new_request_before_first_note_means_only_the_second_song_sounds() {
        let mut player = SongPlayer::new();
        let mut buzzer = MockBuzzer::default();

        player.play(&SONG_A);
        player.play(&SONG_B);

        let mut t = 0;
        while player.update(TestInstant(t), &mut buzzer) != PlayerState::Finished {
            t += 10;
        }
        assert_eq!(buzzer.tones.as_slice(), &[196]);
    }

    #[test]
    fn new_request_interrupts_the_current_song() {
        let mut player = SongPlayer::new();
        let mut buzzer = MockBuzzer::default();

        player.play(&SONG_A);
        player.update(TestInstant(0), &mut buzzer);
        player.play(&SONG_B);
        assert!(player.cursor().unwrap().is_pending());

        player.update(TestInstant(10), &mut buzzer);
        assert_eq!(buzzer.sounding, Some(196));
        assert_eq!(buzzer.tones.as_slice(), &[440, 196]);
    }

    #[test]
    fn empty_song_finishes_immediately() {
        static EMPTY: [Note; 0] = [];
        let mut player = SongPlayer::new();
        let mut buzzer = MockBuzzer::default();
        player.play(&EMPTY);
        assert_eq!(player.update(TestInstant(0), &mut buzzer), PlayerState::Finished);
        assert!(buzzer.tones.is_empty());
    }
}

//! The Simon memory game.
//!
//! [`SimonGame`] is a polled state machine. Each round appends one random
//! [`Symbol`] to the sequence, plays the whole sequence back (color plus
//! tone), then waits for the player to repeat it on the pads. Input is
//! compared against the sequence prefix after every press, so a wrong pad
//! ends the game immediately.
//!
//! ```text
//! Idle -> RoundStart -> Playback -> AwaitingInput -> RoundWon -> Playback ...
//!                                                 -> Failed -> Idle
//!                                                 -> Won
//! ```

use crate::color::{BLUE, Color, GREEN, OFF, RED, WHITE, YELLOW};
use crate::config::SimonTiming;
use crate::player::{Song, SongPlayer};
use crate::songs;
use crate::time::{TimeInstant, has_elapsed, millis_since};
use crate::touch::Pad;
use heapless::Vec;
use rand_core::RngCore;

/// Longest sequence the game will build. Matching all of it wins.
pub const MAX_SEQUENCE_LEN: usize = 100;

/// Period of the white flashing shown after a mismatch.
const FAIL_FLASH_MS: u64 = 125;

/// How long each color is shown while celebrating a win.
const WIN_CYCLE_MS: u64 = 250;

/// The ordered symbols of one game.
pub type SimonSequence = Vec<Symbol, MAX_SEQUENCE_LEN>;

/// One of the four game colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Symbol {
    Red,
    Green,
    Blue,
    Yellow,
}

impl Symbol {
    pub const ALL: [Symbol; 4] = [Symbol::Red, Symbol::Green, Symbol::Blue, Symbol::Yellow];

    /// Picks a symbol uniformly at random.
    pub fn random<R: RngCore>(rng: &mut R) -> Self {
        // 4 divides 2^32, so the modulo is unbiased
        Self::ALL[(rng.next_u32() % 4) as usize]
    }

    pub const fn color(self) -> Color {
        match self {
            Symbol::Red => RED,
            Symbol::Green => GREEN,
            Symbol::Blue => BLUE,
            Symbol::Yellow => YELLOW,
        }
    }

    /// The tone played alongside this symbol.
    pub fn tone(self) -> Song {
        match self {
            Symbol::Red => &songs::SIMON_RED_TONE,
            Symbol::Green => &songs::SIMON_GREEN_TONE,
            Symbol::Blue => &songs::SIMON_BLUE_TONE,
            Symbol::Yellow => &songs::SIMON_YELLOW_TONE,
        }
    }

    /// The symbol entered by touching `pad`.
    pub const fn from_pad(pad: Pad) -> Self {
        match pad {
            Pad::One => Symbol::Red,
            Pad::Two => Symbol::Green,
            Pad::Three => Symbol::Blue,
            Pad::Four => Symbol::Yellow,
        }
    }
}

/// Externally visible game state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SimonState {
    /// No game running. Waiting for an explicit start.
    Idle,
    /// Waiting to append the next symbol.
    RoundStart,
    /// Showing the sequence. Input is ignored.
    Playback,
    /// Waiting for the player to repeat the sequence.
    AwaitingInput,
    /// Round matched; success indication before the next round.
    RoundWon,
    /// Mismatch; failure indication before going idle.
    Failed,
    /// The full sequence was matched. Terminal until restarted.
    Won,
}

/// What a single pad press did to the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputOutcome {
    /// The game was not waiting for input.
    Ignored,
    /// Correct so far; more input needed.
    Accepted,
    /// The whole sequence was repeated correctly.
    RoundComplete { length: usize },
    /// Wrong symbol at `index`. The game is over.
    Mismatch { index: usize },
    /// The maximum sequence was repeated correctly.
    Won,
}

#[derive(Debug, Clone, Copy)]
enum Phase<I> {
    Idle,
    RoundStart { since: I },
    Playback { index: usize, lit: bool, since: I },
    AwaitingInput,
    RoundWon { since: I, chirped: bool },
    Failed { since: I },
    Won { since: I, chirped: bool },
}

/// Simon game engine.
pub struct SimonGame<I> {
    sequence: SimonSequence,
    input: SimonSequence,
    phase: Phase<I>,
    echo: Option<(Symbol, I)>,
    score: Option<usize>,
    best_score: usize,
    timing: SimonTiming,
}

impl<I: TimeInstant> SimonGame<I> {
    /// Creates an idle game.
    pub fn new(timing: SimonTiming) -> Self {
        Self {
            sequence: Vec::new(),
            input: Vec::new(),
            phase: Phase::Idle,
            echo: None,
            score: None,
            best_score: 0,
            timing,
        }
    }

    /// Starts a new game, discarding any game in progress.
    ///
    /// The sequence is empty until the first round begins after the lead-in.
    pub fn start(&mut self, now: I) {
        info!("simon: new game");
        self.sequence.clear();
        self.input.clear();
        self.echo = None;
        self.phase = Phase::RoundStart { since: now };
    }

    /// Abandons the game without scoring it.
    pub fn exit(&mut self) {
        self.phase = Phase::Idle;
        self.echo = None;
    }

    /// Advances timers and returns the color the game wants shown.
    pub fn update<R: RngCore>(&mut self, now: I, rng: &mut R, player: &mut SongPlayer<I>) -> Color {
        match self.phase {
            Phase::Idle => OFF,
            Phase::RoundStart { since } => {
                if has_elapsed(now, since, self.timing.lead_in_ms) {
                    self.begin_round(now, rng, player)
                } else {
                    OFF
                }
            }
            Phase::Playback { index, lit, since } => self.playback(index, lit, since, now, player),
            Phase::AwaitingInput => self.echo_color(now),
            Phase::RoundWon { since, chirped } => {
                if has_elapsed(now, since, self.timing.success_ms) {
                    return self.begin_round(now, rng, player);
                }
                if !chirped && has_elapsed(now, since, self.timing.echo_ms) {
                    player.play(&songs::SIMON_SUCCESS);
                    self.phase = Phase::RoundWon {
                        since,
                        chirped: true,
                    };
                }
                self.echo_color(now)
            }
            Phase::Failed { since } => {
                if has_elapsed(now, since, self.timing.fail_ms) {
                    debug!("simon: idle");
                    self.phase = Phase::Idle;
                    OFF
                } else if (millis_since(now, since) / FAIL_FLASH_MS) % 2 == 0 {
                    WHITE
                } else {
                    OFF
                }
            }
            Phase::Won { since, chirped } => {
                if !chirped && has_elapsed(now, since, self.timing.echo_ms) {
                    player.play(&songs::SIMON_WIN);
                    self.phase = Phase::Won {
                        since,
                        chirped: true,
                    };
                }
                let slot = (millis_since(now, since) / WIN_CYCLE_MS) as usize % Symbol::ALL.len();
                Symbol::ALL[slot].color()
            }
        }
    }

    /// Feeds one pad press into the game.
    ///
    /// Only accepted while awaiting input. The press is echoed and checked
    /// against the sequence prefix right away. A correct press plays its own
    /// tone; a round's success chirp follows once the echo is over.
    pub fn on_input(&mut self, symbol: Symbol, now: I, player: &mut SongPlayer<I>) -> InputOutcome {
        if !matches!(self.phase, Phase::AwaitingInput) {
            return InputOutcome::Ignored;
        }
        if self.input.push(symbol).is_err() {
            return InputOutcome::Ignored;
        }
        self.echo = Some((symbol, now));

        if !self.sequence.starts_with(&self.input) {
            let index = self.input.len() - 1;
            self.fail(now, player);
            return InputOutcome::Mismatch { index };
        }

        player.play(symbol.tone());
        if self.input.len() < self.sequence.len() {
            return InputOutcome::Accepted;
        }

        let length = self.sequence.len();
        if length >= MAX_SEQUENCE_LEN {
            info!("simon: won with {} symbols", length);
            self.best_score = self.best_score.max(length);
            self.score = Some(length);
            self.phase = Phase::Won {
                since: now,
                chirped: false,
            };
            return InputOutcome::Won;
        }

        debug!("simon: round {} complete", length);
        self.phase = Phase::RoundWon {
            since: now,
            chirped: false,
        };
        InputOutcome::RoundComplete { length }
    }

    fn begin_round<R: RngCore>(&mut self, now: I, rng: &mut R, player: &mut SongPlayer<I>) -> Color {
        let symbol = Symbol::random(rng);
        if self.sequence.push(symbol).is_err() {
            // Only reachable if the cap was hit without being matched
            self.phase = Phase::Won {
                since: now,
                chirped: true,
            };
            return OFF;
        }
        debug!("simon: round {} adds {}", self.sequence.len(), symbol);

        self.input.clear();
        self.echo = None;
        self.phase = Phase::Playback {
            index: 0,
            lit: true,
            since: now,
        };
        self.first_tone(player);
        self.sequence[0].color()
    }

    fn first_tone(&self, player: &mut SongPlayer<I>) {
        if let Some(first) = self.sequence.first() {
            player.play(first.tone());
        }
    }

    fn playback(
        &mut self,
        index: usize,
        lit: bool,
        since: I,
        now: I,
        player: &mut SongPlayer<I>,
    ) -> Color {
        let Some(symbol) = self.sequence.get(index).copied() else {
            self.await_input();
            return OFF;
        };

        if lit {
            if has_elapsed(now, since, self.timing.flash_ms) {
                self.phase = Phase::Playback {
                    index,
                    lit: false,
                    since: now,
                };
                return OFF;
            }
            return symbol.color();
        }

        if !has_elapsed(now, since, self.timing.gap_ms) {
            return OFF;
        }

        match self.sequence.get(index + 1).copied() {
            Some(next) => {
                self.phase = Phase::Playback {
                    index: index + 1,
                    lit: true,
                    since: now,
                };
                player.play(next.tone());
                next.color()
            }
            None => {
                self.await_input();
                OFF
            }
        }
    }

    fn await_input(&mut self) {
        trace!("simon: awaiting input");
        self.input.clear();
        self.phase = Phase::AwaitingInput;
    }

    fn fail(&mut self, now: I, player: &mut SongPlayer<I>) {
        let reached = self.sequence.len();
        info!("simon: failed at length {}", reached);
        self.score = Some(reached);
        self.best_score = self.best_score.max(reached);
        self.sequence.clear();
        self.input.clear();
        self.phase = Phase::Failed { since: now };
        player.play(&songs::SIMON_FAIL);
    }

    fn echo_color(&self, now: I) -> Color {
        match self.echo {
            Some((symbol, at)) if !has_elapsed(now, at, self.timing.echo_ms) => symbol.color(),
            _ => OFF,
        }
    }

    pub fn state(&self) -> SimonState {
        match self.phase {
            Phase::Idle => SimonState::Idle,
            Phase::RoundStart { .. } => SimonState::RoundStart,
            Phase::Playback { .. } => SimonState::Playback,
            Phase::AwaitingInput => SimonState::AwaitingInput,
            Phase::RoundWon { .. } => SimonState::RoundWon,
            Phase::Failed { .. } => SimonState::Failed,
            Phase::Won { .. } => SimonState::Won,
        }
    }

    /// The symbols generated so far this game.
    pub fn sequence(&self) -> &[Symbol] {
        &self.sequence
    }

    /// The symbols entered so far this round.
    pub fn input(&self) -> &[Symbol] {
        &self.input
    }

    /// Sequence length reached by the last finished game.
    pub fn score(&self) -> Option<usize> {
        self.score
    }

    /// Longest sequence length reached since power-up.
    pub fn best_score(&self) -> usize {
        self.best_score
    }
}

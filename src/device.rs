//! Top-level mode scheduler.
//!
//! Provides [`Device`], which owns the board, the task table and all
//! [`DeviceState`], and runs one cooperative tick at a time. Each tick stamps
//! the due tasks and dispatches them in a fixed order: button, touch, the
//! active mode, then sound. Input sampled in a tick therefore affects the
//! rendering of that same tick.

use crate::button::{ButtonEvent, ButtonState};
use crate::color::{Color, OFF, WHITE};
use crate::config::{Config, ConfigError, DEFAULT_CONFIG};
use crate::hal::Board;
use crate::lighting::Lighting;
use crate::player::{PlayerState, SongPlayer};
use crate::simon::{SimonGame, Symbol};
use crate::songs;
use crate::task::{DueTasks, TaskTable};
use crate::time::{TimeInstant, TimeSource, has_elapsed};
use crate::touch::{Pad, TouchEvent, TouchPads};
use rand_core::RngCore;

/// The mutually exclusive top-level behaviors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// Smooth blue, red, green color cycle.
    Fade,
    /// Red, green, blue on/off blinking.
    Blink,
    /// White strobe, rate set by tapping the pads.
    Strobe,
    /// Pads pick the color.
    Manual,
    /// The memory game.
    Simon,
}

impl Mode {
    /// All modes in button order.
    pub const ALL: [Mode; 5] = [Mode::Fade, Mode::Blink, Mode::Strobe, Mode::Manual, Mode::Simon];

    pub const fn index(self) -> usize {
        match self {
            Mode::Fade => 0,
            Mode::Blink => 1,
            Mode::Strobe => 2,
            Mode::Manual => 3,
            Mode::Simon => 4,
        }
    }

    /// The mode at `index`, wrapping around.
    pub const fn from_index(index: usize) -> Self {
        Self::ALL[index % Self::ALL.len()]
    }

    /// The mode the button moves to next.
    pub const fn next(self) -> Self {
        Self::from_index(self.index() + 1)
    }
}

/// Keys of the scheduler's task table, in dispatch order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TaskId {
    Button,
    Touch,
    Mode,
    Sound,
}

const TASK_COUNT: usize = 4;

/// All mutable device state, owned in one place.
pub struct DeviceState<I> {
    pub mode: Mode,
    /// Set while the mode-changed flash is showing.
    pub mode_switched_at: Option<I>,
    pub lighting: Lighting,
    pub touch: TouchPads<I>,
    pub button: ButtonState,
    pub player: SongPlayer<I>,
    pub simon: SimonGame<I>,
}

impl<I: TimeInstant> DeviceState<I> {
    fn new(config: &Config) -> Self {
        Self {
            mode: Mode::Fade,
            mode_switched_at: None,
            lighting: Lighting::new(config.fade_step),
            touch: TouchPads::new(config.touch_threshold),
            button: ButtonState::new(config.long_press_ticks),
            player: SongPlayer::new(),
            simon: SimonGame::new(config.simon),
        }
    }
}

/// The toy: board, timing and state driven by one cooperative loop.
///
/// # Type Parameters
/// * `'t` - Lifetime of the time source reference
/// * `I` - Time instant type
/// * `T` - Time source implementation type
/// * `B` - Board implementation type
/// * `R` - Random number generator for the Simon game
pub struct Device<'t, I: TimeInstant, T: TimeSource<I>, B: Board, R: RngCore> {
    board: B,
    rng: R,
    time_source: &'t T,
    config: Config,
    tasks: TaskTable<TaskId, I, TASK_COUNT>,
    state: DeviceState<I>,
}

impl<'t, I, T, B, R> Device<'t, I, T, B, R>
where
    I: TimeInstant,
    T: TimeSource<I>,
    B: Board,
    R: RngCore,
{
    /// Creates a device with the default configuration, starting in Fade.
    pub fn new(board: B, rng: R, time_source: &'t T) -> Self {
        Self::build(board, rng, time_source, DEFAULT_CONFIG)
    }

    /// Creates a device with a custom configuration.
    ///
    /// # Errors
    /// Any [`ConfigError`] reported by [`Config::validate`].
    pub fn with_config(
        board: B,
        rng: R,
        time_source: &'t T,
        config: Config,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(board, rng, time_source, config))
    }

    fn build(mut board: B, rng: R, time_source: &'t T, config: Config) -> Self {
        let now = time_source.now();
        let mut state = DeviceState::new(&config);
        state.lighting.show(OFF, &mut board);
        if config.startup_melody {
            state.player.play(&songs::GREETING);
        }

        let tasks = TaskTable::new(
            [
                (TaskId::Button, config.button_check_interval_ms),
                (TaskId::Touch, config.touch_check_interval_ms),
                (TaskId::Mode, config.mode_interval_ms(state.mode)),
                (TaskId::Sound, 0),
            ],
            now,
        );

        info!("device ready in {}", state.mode);

        Self {
            board,
            rng,
            time_source,
            config,
            tasks,
            state,
        }
    }

    /// Runs one pass of the scheduler.
    ///
    /// # Returns
    /// The tasks that ran, in the order they ran.
    pub fn tick(&mut self) -> DueTasks<TaskId, TASK_COUNT> {
        let now = self.time_source.now();
        let due = self.tasks.poll(now);

        for task in due.iter().copied() {
            match task {
                TaskId::Button => self.check_button(now),
                TaskId::Touch => self.check_touch(now),
                TaskId::Mode => self.update_mode(now),
                TaskId::Sound => self.update_sound(now),
            }
        }

        due
    }

    /// Ticks forever.
    pub fn run(&mut self) -> ! {
        loop {
            self.tick();
        }
    }

    fn check_button(&mut self, now: I) {
        let pressed = self.board.is_pressed();
        match self.state.button.sample(pressed) {
            Some(ButtonEvent::ShortPress) => self.next_mode(now),
            Some(ButtonEvent::LongPress) => self.long_press(now),
            None => {}
        }
    }

    fn check_touch(&mut self, now: I) {
        let readings = Pad::ALL.map(|pad| self.board.read_pad(pad));
        let events = self.state.touch.sample(readings, now);

        for event in events {
            if let TouchEvent::Pressed(pad) = event {
                self.pad_pressed(pad, now);
            }
        }
    }

    fn pad_pressed(&mut self, pad: Pad, now: I) {
        if self.state.mode_switched_at.is_some() {
            return;
        }
        trace!("pad {} pressed", pad);

        match self.state.mode {
            Mode::Fade | Mode::Blink => {}
            Mode::Strobe => {
                if let Some(gap) = self.state.touch.tap_gap_ms() {
                    let interval = self.config.strobe_interval_for_gap(gap);
                    debug!("strobe interval {} ms", interval);
                    self.retime_mode_task(interval, None);
                }
            }
            Mode::Manual => {
                self.state.lighting.select(pad);
                self.state.player.play(Symbol::from_pad(pad).tone());
            }
            Mode::Simon => {
                let outcome = self.state.simon.on_input(
                    Symbol::from_pad(pad),
                    now,
                    &mut self.state.player,
                );
                trace!("simon input: {}", outcome);
            }
        }
    }

    fn next_mode(&mut self, now: I) {
        let previous = self.state.mode;
        if previous == Mode::Simon {
            self.state.simon.exit();
        }

        let mode = previous.next();
        info!("mode {} -> {}", previous, mode);
        self.state.mode = mode;
        self.state.mode_switched_at = Some(now);
        self.state.player.play(&songs::BEEP_TONE);
        self.state.lighting.show(WHITE, &mut self.board);

        self.retime_mode_task(self.config.mode_switch_ms, Some(now));
    }

    fn long_press(&mut self, now: I) {
        debug!("long press in {}", self.state.mode);
        match self.state.mode {
            Mode::Simon => {
                if self.state.mode_switched_at.is_none() {
                    self.state.simon.start(now);
                }
            }
            Mode::Manual => {
                let style = self.state.lighting.toggle_manual_style();
                debug!("manual style {}", style);
            }
            Mode::Fade | Mode::Blink | Mode::Strobe => {}
        }
        self.state.player.play(&songs::BEEP_TONE);
    }

    /// Starts the current mode's own behavior once the mode flash is over.
    fn enter_mode(&mut self, now: I) {
        let mode = self.state.mode;
        self.state.lighting.enter(mode);
        match mode {
            // Tempo only counts taps made while strobing
            Mode::Strobe => self.state.touch.forget_taps(),
            Mode::Simon => self.state.simon.start(now),
            Mode::Fade | Mode::Blink | Mode::Manual => {}
        }
        self.retime_mode_task(self.config.mode_interval_ms(mode), None);
    }

    /// Sets the Mode task's interval, optionally restarting its period at `restart`.
    fn retime_mode_task(&mut self, interval_ms: u32, restart: Option<I>) {
        // Every TaskId is registered in `build`, so neither lookup can fail
        let _ = self.tasks.set_interval(TaskId::Mode, interval_ms);
        if let Some(now) = restart {
            let _ = self.tasks.reset(TaskId::Mode, now);
        }
    }

    fn update_mode(&mut self, now: I) {
        if let Some(since) = self.state.mode_switched_at {
            if !has_elapsed(now, since, self.config.mode_switch_ms) {
                self.state.lighting.show(WHITE, &mut self.board);
                return;
            }
            self.state.mode_switched_at = None;
            self.enter_mode(now);
        }

        let state = &mut self.state;
        let board = &mut self.board;
        match state.mode {
            Mode::Fade => {
                state.lighting.fade(board);
            }
            Mode::Blink => state.lighting.blink(board),
            Mode::Strobe => state.lighting.strobe(board),
            Mode::Manual => state.lighting.manual(&state.touch, board),
            Mode::Simon => {
                let color = state.simon.update(now, &mut self.rng, &mut state.player);
                state.lighting.show(color, board);
            }
        }
    }

    fn update_sound(&mut self, now: I) {
        if self.state.player.update(now, &mut self.board) == PlayerState::Finished {
            trace!("song finished");
        }
    }

    pub fn mode(&self) -> Mode {
        self.state.mode
    }

    /// The color currently shown on the LED.
    pub fn color(&self) -> Color {
        self.state.lighting.color()
    }

    /// True while the mode-changed flash is showing.
    pub fn is_switching_mode(&self) -> bool {
        self.state.mode_switched_at.is_some()
    }

    pub fn state(&self) -> &DeviceState<I> {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut DeviceState<I> {
        &mut self.state
    }

    pub fn tasks(&self) -> &TaskTable<TaskId, I, TASK_COUNT> {
        &self.tasks
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn board(&self) -> &B {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut B {
        &mut self.board
    }
}

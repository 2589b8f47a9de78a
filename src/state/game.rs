use rand::Rng;
use thiserror::Error;
use time::{Duration, OffsetDateTime};

use crate::state::{
    timer::{Timer, TimerTick},
    words::WordBank,
};

/// Default countdown length applied to a fresh session.
pub const DEFAULT_TIMER_DURATION: Duration = Duration::seconds(60);

/// Game type governing which word list is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameMode {
    /// Players draw the word for their team.
    Drawing,
    /// Players mime the word for their team.
    Charades,
}

impl GameMode {
    /// Every selectable mode, in display order.
    pub const ALL: [GameMode; 2] = [GameMode::Drawing, GameMode::Charades];

    /// Identifier used by the word bank file and the public API.
    pub fn key(self) -> &'static str {
        match self {
            GameMode::Drawing => "pictionary",
            GameMode::Charades => "mimic",
        }
    }
}

/// How the next mode should be chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeChoice {
    /// Use the given mode.
    Explicit(GameMode),
    /// Spin the wheel: uniform draw between the two modes.
    Random,
}

/// Recoverable conditions reported by session operations. None of them
/// alters the session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// A word was requested before any mode was chosen.
    #[error("no game mode selected")]
    NoModeSelected,
    /// The word list for the current mode is empty.
    #[error("no words available for mode `{}`", .0.key())]
    NoWordsAvailable(GameMode),
    /// Countdowns must last a strictly positive amount of time.
    #[error("timer duration must be strictly positive")]
    InvalidDuration,
}

/// Ephemeral per-session game state: mode, word and countdown.
///
/// Teams and scores live in the [`Scoreboard`](crate::state::scores::Scoreboard)
/// so a soft reset of the session never touches them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSession {
    mode: Option<GameMode>,
    word: Option<String>,
    timer: Option<Timer>,
    timer_duration: Duration,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(DEFAULT_TIMER_DURATION)
    }
}

impl GameSession {
    /// Fresh session with no mode, no word, no running timer.
    pub fn new(timer_duration: Duration) -> Self {
        Self {
            mode: None,
            word: None,
            timer: None,
            timer_duration,
        }
    }

    /// Currently selected mode.
    pub fn mode(&self) -> Option<GameMode> {
        self.mode
    }

    /// Currently drawn word.
    pub fn word(&self) -> Option<&str> {
        self.word.as_deref()
    }

    /// Running countdown, if any.
    pub fn timer(&self) -> Option<&Timer> {
        self.timer.as_ref()
    }

    /// Countdown length used when a timer is started without an explicit duration.
    pub fn timer_duration(&self) -> Duration {
        self.timer_duration
    }

    /// Change the default countdown length. Does not affect a running timer.
    pub fn set_timer_duration(&mut self, duration: Duration) -> Result<(), SessionError> {
        if !duration.is_positive() {
            return Err(SessionError::InvalidDuration);
        }
        self.timer_duration = duration;
        Ok(())
    }

    /// Select the mode explicitly or at random, clearing the word and timer.
    pub fn select_mode<R: Rng + ?Sized>(&mut self, choice: ModeChoice, rng: &mut R) -> GameMode {
        let mode = match choice {
            ModeChoice::Explicit(mode) => mode,
            ModeChoice::Random => {
                if rng.random_bool(0.5) {
                    GameMode::Drawing
                } else {
                    GameMode::Charades
                }
            }
        };

        self.mode = Some(mode);
        self.word = None;
        self.timer = None;
        mode
    }

    /// Draw a new word for the current mode and clear the timer.
    pub fn draw_word<R: Rng + ?Sized>(
        &mut self,
        words: &WordBank,
        rng: &mut R,
    ) -> Result<&str, SessionError> {
        let mode = self.mode.ok_or(SessionError::NoModeSelected)?;
        let word = words
            .pick(mode, rng)
            .ok_or(SessionError::NoWordsAvailable(mode))?;

        self.timer = None;
        Ok(self.word.insert(word.to_owned()).as_str())
    }

    /// Start (or restart) the countdown at `now`.
    pub fn start_timer(
        &mut self,
        duration: Duration,
        now: OffsetDateTime,
    ) -> Result<&Timer, SessionError> {
        if !duration.is_positive() {
            return Err(SessionError::InvalidDuration);
        }
        Ok(&*self.timer.insert(Timer::new(now, duration)))
    }

    /// Clear the countdown. Returns whether a timer was running.
    pub fn stop_timer(&mut self) -> bool {
        self.timer.take().is_some()
    }

    /// Poll the countdown at `now`. An expired timer is cleared and reported
    /// as [`TimerTick::TimeUp`] exactly once.
    pub fn tick(&mut self, now: OffsetDateTime) -> TimerTick {
        let Some(timer) = self.timer else {
            return TimerTick::Idle;
        };

        let remaining = timer.remaining_at(now);
        if remaining.is_positive() {
            return TimerTick::Running {
                remaining,
                duration: timer.duration(),
            };
        }

        self.timer = None;
        TimerTick::TimeUp
    }

    /// Soft reset: forget mode, word and timer. The timer duration setting stays.
    pub fn change_mode(&mut self) {
        self.mode = None;
        self.word = None;
        self.timer = None;
    }
}

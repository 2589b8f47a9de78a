use time::{Duration, OffsetDateTime};

/// Countdown started at a wall-clock instant for a fixed duration.
///
/// Nothing is scheduled: the remaining time is recomputed from the start
/// timestamp every time the timer is polled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timer {
    started_at: OffsetDateTime,
    duration: Duration,
}

/// Result of polling a session timer at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerTick {
    /// No countdown is running.
    Idle,
    /// Countdown still running with the given time left (always positive).
    Running {
        /// Time left before the countdown expires.
        remaining: Duration,
        /// Full length of the countdown.
        duration: Duration,
    },
    /// The countdown just reached zero. Reported once, then the timer is cleared.
    TimeUp,
}

impl Timer {
    /// Start a countdown at `started_at`. Callers guarantee a positive `duration`.
    pub fn new(started_at: OffsetDateTime, duration: Duration) -> Self {
        Self {
            started_at,
            duration,
        }
    }

    /// Instant the countdown was started.
    pub fn started_at(&self) -> OffsetDateTime {
        self.started_at
    }

    /// Full length of the countdown.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Remaining time at `now`, clamped to `[0, duration]`.
    ///
    /// A `now` earlier than the start (clock adjusted backwards) counts as no
    /// elapsed time, so the result never grows as `now` advances.
    pub fn remaining_at(&self, now: OffsetDateTime) -> Duration {
        let elapsed = (now - self.started_at).max(Duration::ZERO);
        (self.duration - elapsed).max(Duration::ZERO)
    }
}

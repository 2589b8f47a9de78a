use serde::{Deserialize, Serialize};
use time::Duration;
use utoipa::ToSchema;

use crate::state::timer::TimerTick;

/// Countdown state as seen by clients.
#[derive(Debug, Serialize, ToSchema, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TimerState {
    /// No countdown running.
    Idle,
    /// Countdown in progress.
    Running,
    /// The countdown expired during this poll.
    TimeUp,
}

/// Result of polling the session timer.
#[derive(Debug, Serialize, ToSchema, Clone, PartialEq, Eq)]
pub struct TimerStatus {
    pub state: TimerState,
    /// Whole seconds left, rounded up. Present while running.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining_seconds: Option<u64>,
    /// Milliseconds left. Present while running.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining_ms: Option<u64>,
    /// Full countdown length. Present while running.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_seconds: Option<u64>,
}

impl From<TimerTick> for TimerStatus {
    fn from(tick: TimerTick) -> Self {
        match tick {
            TimerTick::Idle => Self::bare(TimerState::Idle),
            TimerTick::TimeUp => Self::bare(TimerState::TimeUp),
            TimerTick::Running {
                remaining,
                duration,
            } => {
                let remaining_ms = whole_millis(remaining);
                Self {
                    state: TimerState::Running,
                    remaining_seconds: Some(remaining_ms.div_ceil(1000)),
                    remaining_ms: Some(remaining_ms),
                    duration_seconds: Some(u64::try_from(duration.whole_seconds()).unwrap_or(0)),
                }
            }
        }
    }
}

impl TimerStatus {
    fn bare(state: TimerState) -> Self {
        Self {
            state,
            remaining_seconds: None,
            remaining_ms: None,
            duration_seconds: None,
        }
    }
}

fn whole_millis(duration: Duration) -> u64 {
    u64::try_from(duration.whole_milliseconds()).unwrap_or(0)
}

/// Request to start the countdown. Without `seconds` the session default is used.
#[derive(Debug, Deserialize, ToSchema, Default)]
pub struct StartTimerRequest {
    #[serde(default)]
    pub seconds: Option<u32>,
}

/// Request to change the session default countdown length.
#[derive(Debug, Deserialize, ToSchema)]
pub struct TimerDurationRequest {
    pub seconds: u32,
}

/// Response describing the timer configuration of the session.
#[derive(Debug, Serialize, ToSchema)]
pub struct TimerDurationResponse {
    pub seconds: u32,
    pub min_seconds: u32,
    pub max_seconds: u32,
    pub step_seconds: u32,
}

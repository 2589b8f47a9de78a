use serde::Serialize;
use time::OffsetDateTime;
use utoipa::ToSchema;

use crate::dto::{
    format_timestamp,
    session::GameModeDto,
    team::{StandingDto, TeamSummary},
};

#[derive(Clone, Debug)]
/// Dispatched payload carried across SSE channels.
pub struct ServerEvent {
    pub event: Option<String>,
    pub data: String,
}

impl ServerEvent {
    /// Plain text event.
    pub fn new<E: Into<Option<String>>>(event: E, data: String) -> Self {
        Self {
            event: event.into(),
            data,
        }
    }

    /// Convenience wrapper that serialises `payload` into the SSE data field.
    pub fn json<E, T>(event: E, payload: &T) -> serde_json::Result<Self>
    where
        E: Into<Option<String>>,
        T: Serialize,
    {
        Ok(Self {
            event: event.into(),
            data: serde_json::to_string(payload)?,
        })
    }
}

#[derive(Debug, Serialize, ToSchema)]
/// Broadcast when a mode is selected, explicitly or by the wheel.
pub struct ModeSelectedEvent {
    pub mode: GameModeDto,
    /// True when the mode came from a wheel spin.
    pub random: bool,
}

#[derive(Debug, Serialize, ToSchema)]
/// Broadcast when a new word is drawn.
pub struct WordDrawnEvent {
    pub mode: GameModeDto,
    pub word: String,
}

#[derive(Debug, Serialize, ToSchema)]
/// Broadcast when a countdown starts.
pub struct TimerStartedEvent {
    pub duration_seconds: i64,
    /// RFC 3339 start timestamp.
    pub started_at: String,
}

impl TimerStartedEvent {
    pub fn new(duration_seconds: i64, started_at: OffsetDateTime) -> Self {
        Self {
            duration_seconds,
            started_at: format_timestamp(started_at),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
/// Event emitted when a new team is created.
pub struct TeamCreatedEvent {
    pub team: TeamSummary,
}

#[derive(Debug, Serialize, ToSchema)]
/// Event emitted when a team has been deleted.
pub struct TeamDeletedEvent {
    pub name: String,
}

#[derive(Debug, Serialize, ToSchema)]
/// Event emitted when a team score changes.
pub struct ScoreUpdatedEvent {
    pub team: TeamSummary,
    pub standing: StandingDto,
}

#[derive(Debug, Serialize, ToSchema)]
/// Event emitted when every score has been reset.
pub struct ScoresResetEvent {
    pub teams: Vec<TeamSummary>,
}

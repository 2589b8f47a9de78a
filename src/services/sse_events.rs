use serde::Serialize;
use time::OffsetDateTime;
use tracing::warn;

use crate::{
    dto::{
        sse::{
            ModeSelectedEvent, ScoreUpdatedEvent, ScoresResetEvent, ServerEvent,
            TeamCreatedEvent, TeamDeletedEvent, TimerStartedEvent, WordDrawnEvent,
        },
        team::{StandingDto, TeamSummary},
    },
    state::{SharedState, game::GameMode},
};

const EVENT_MODE_SELECTED: &str = "mode.selected";
const EVENT_MODE_CLEARED: &str = "mode.cleared";
const EVENT_WORD_DRAWN: &str = "word.drawn";
const EVENT_TIMER_STARTED: &str = "timer.started";
const EVENT_TIMER_STOPPED: &str = "timer.stopped";
const EVENT_TIMER_EXPIRED: &str = "timer.expired";
const EVENT_TEAM_CREATED: &str = "team.created";
const EVENT_TEAM_DELETED: &str = "team.deleted";
const EVENT_SCORE_UPDATED: &str = "score.updated";
const EVENT_SCORES_RESET: &str = "scores.reset";
const EVENT_SESSION_RESET: &str = "session.reset";

/// Broadcast the newly selected mode.
pub fn broadcast_mode_selected(state: &SharedState, mode: GameMode, random: bool) {
    let payload = ModeSelectedEvent {
        mode: mode.into(),
        random,
    };
    send_event(state, EVENT_MODE_SELECTED, &payload);
}

/// Broadcast that the mode, word and timer were cleared.
pub fn broadcast_mode_cleared(state: &SharedState) {
    send_info(state, EVENT_MODE_CLEARED, "mode cleared");
}

/// Broadcast the word drawn for the current mode.
pub fn broadcast_word_drawn(state: &SharedState, mode: GameMode, word: &str) {
    let payload = WordDrawnEvent {
        mode: mode.into(),
        word: word.to_owned(),
    };
    send_event(state, EVENT_WORD_DRAWN, &payload);
}

/// Broadcast a countdown start.
pub fn broadcast_timer_started(state: &SharedState, duration_seconds: i64, at: OffsetDateTime) {
    let payload = TimerStartedEvent::new(duration_seconds, at);
    send_event(state, EVENT_TIMER_STARTED, &payload);
}

/// Broadcast that the countdown was stopped by a client.
pub fn broadcast_timer_stopped(state: &SharedState) {
    send_info(state, EVENT_TIMER_STOPPED, "timer stopped");
}

/// Broadcast the one-time "time's up" notification.
pub fn broadcast_timer_expired(state: &SharedState) {
    send_info(state, EVENT_TIMER_EXPIRED, "time's up");
}

/// Broadcast the creation of a new team.
pub fn broadcast_team_created(state: &SharedState, team: TeamSummary) {
    send_event(state, EVENT_TEAM_CREATED, &TeamCreatedEvent { team });
}

/// Broadcast that a team has been deleted.
pub fn broadcast_team_deleted(state: &SharedState, name: &str) {
    let payload = TeamDeletedEvent {
        name: name.to_owned(),
    };
    send_event(state, EVENT_TEAM_DELETED, &payload);
}

/// Broadcast a score adjustment for a specific team.
pub fn broadcast_score_updated(state: &SharedState, team: TeamSummary, standing: StandingDto) {
    send_event(
        state,
        EVENT_SCORE_UPDATED,
        &ScoreUpdatedEvent { team, standing },
    );
}

/// Broadcast the scoreboard after a global reset.
pub fn broadcast_scores_reset(state: &SharedState, teams: Vec<TeamSummary>) {
    send_event(state, EVENT_SCORES_RESET, &ScoresResetEvent { teams });
}

/// Broadcast that the session was torn down and replaced.
pub fn broadcast_session_reset(state: &SharedState) {
    send_info(state, EVENT_SESSION_RESET, "session reset");
}

fn send_event(state: &SharedState, event: &str, payload: &impl Serialize) {
    match ServerEvent::json(Some(event.to_string()), payload) {
        Ok(event) => state.events().broadcast(event),
        Err(err) => warn!(event, error = %err, "failed to serialize SSE payload"),
    }
}

fn send_info(state: &SharedState, event: &str, message: &str) {
    state
        .events()
        .broadcast(ServerEvent::new(Some(event.to_string()), message.to_string()));
}

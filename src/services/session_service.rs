//! Business logic behind the session routes: mode selection, word draws and
//! the countdown. Every operation goes through the [`GameSession`] held by
//! the shared state and reports changes on the event stream.

use rand::rng;
use time::{Duration, OffsetDateTime};
use tracing::{debug, info};

use crate::{
    config::TimerConfig,
    dto::{
        session::{ActionResponse, ModeResponse, SessionSnapshot, WordResponse},
        team::StandingDto,
        timer::{StartTimerRequest, TimerDurationResponse, TimerStatus},
    },
    error::ServiceError,
    services::sse_events,
    state::{
        SharedState,
        game::{GameMode, GameSession, ModeChoice, SessionError},
        timer::TimerTick,
    },
};

/// Current mode, word, timer and standing. Polling here also advances the timer.
pub async fn snapshot(state: &SharedState) -> SessionSnapshot {
    let now = OffsetDateTime::now_utc();
    let (mode, word, tick, duration) = state
        .with_session_mut(|session| {
            let tick = session.tick(now);
            (
                session.mode(),
                session.word().map(str::to_owned),
                tick,
                session.timer_duration(),
            )
        })
        .await;
    notify_tick(state, tick);

    let standing = state.read_scoreboard(|board| board.standing()).await;

    SessionSnapshot {
        mode: mode.map(Into::into),
        word,
        timer: tick.into(),
        timer_duration_seconds: whole_seconds(duration),
        standing: StandingDto::from(standing),
    }
}

/// Select a mode explicitly or by spinning the wheel.
pub async fn select_mode(state: &SharedState, choice: ModeChoice) -> ModeResponse {
    let mode = state
        .with_session_mut(|session| session.select_mode(choice, &mut rng()))
        .await;

    let random = matches!(choice, ModeChoice::Random);
    info!(mode = mode.key(), random, "game mode selected");
    sse_events::broadcast_mode_selected(state, mode, random);

    ModeResponse { mode: mode.into() }
}

/// Forget the mode, word and timer while keeping teams and scores.
pub async fn change_mode(state: &SharedState) -> ActionResponse {
    state.with_session_mut(GameSession::change_mode).await;
    info!("game mode cleared");
    sse_events::broadcast_mode_cleared(state);

    ActionResponse {
        message: "mode cleared".into(),
    }
}

/// Draw a random word for the current mode.
pub async fn draw_word(state: &SharedState) -> Result<WordResponse, ServiceError> {
    let words = state.words();
    let (mode, word) = state
        .with_session_mut(|session| -> Result<(GameMode, String), SessionError> {
            let word = session.draw_word(words, &mut rng())?.to_owned();
            let mode = session.mode().ok_or(SessionError::NoModeSelected)?;
            Ok((mode, word))
        })
        .await?;

    debug!(mode = mode.key(), "word drawn");
    sse_events::broadcast_word_drawn(state, mode, &word);

    Ok(WordResponse {
        mode: mode.into(),
        word,
    })
}

/// Change the default countdown length, checked against the configured range.
pub async fn set_timer_duration(
    state: &SharedState,
    seconds: u32,
) -> Result<TimerDurationResponse, ServiceError> {
    let config = state.config();
    ensure_duration_allowed(&config.timer, seconds)?;

    state
        .with_session_mut(|session| {
            session.set_timer_duration(Duration::seconds(i64::from(seconds)))
        })
        .await?;
    info!(seconds, "timer duration updated");

    Ok(TimerDurationResponse {
        seconds,
        min_seconds: config.timer.min_seconds,
        max_seconds: config.timer.max_seconds,
        step_seconds: config.timer.step_seconds,
    })
}

/// Start (or restart) the countdown now.
pub async fn start_timer(
    state: &SharedState,
    request: StartTimerRequest,
) -> Result<TimerStatus, ServiceError> {
    let config = state.config();
    if let Some(seconds) = request.seconds {
        ensure_duration_allowed(&config.timer, seconds)?;
    }

    let now = OffsetDateTime::now_utc();
    let (duration, tick) = state
        .with_session_mut(|session| {
            let duration = request
                .seconds
                .map(|seconds| Duration::seconds(i64::from(seconds)))
                .unwrap_or_else(|| session.timer_duration());
            session.start_timer(duration, now)?;
            Ok::<_, ServiceError>((duration, session.tick(now)))
        })
        .await?;

    info!(seconds = duration.whole_seconds(), "timer started");
    sse_events::broadcast_timer_started(state, duration.whole_seconds(), now);

    Ok(tick.into())
}

/// Stop the countdown. Stopping an idle timer is not an error.
pub async fn stop_timer(state: &SharedState) -> ActionResponse {
    let was_running = state.with_session_mut(GameSession::stop_timer).await;
    if was_running {
        info!("timer stopped");
        sse_events::broadcast_timer_stopped(state);
    }

    ActionResponse {
        message: if was_running {
            "timer stopped".into()
        } else {
            "timer was not running".into()
        },
    }
}

/// Recompute the remaining time. Expiry is announced once on the event stream.
pub async fn poll_timer(state: &SharedState) -> TimerStatus {
    let now = OffsetDateTime::now_utc();
    let tick = state.with_session_mut(|session| session.tick(now)).await;
    notify_tick(state, tick);
    tick.into()
}

/// End the current session and start a fresh one; scores survive.
pub async fn reset_session(state: &SharedState) -> ActionResponse {
    state.reset_session().await;
    info!("session reset");
    sse_events::broadcast_session_reset(state);

    ActionResponse {
        message: "session reset".into(),
    }
}

fn notify_tick(state: &SharedState, tick: TimerTick) {
    if tick == TimerTick::TimeUp {
        info!("time's up");
        sse_events::broadcast_timer_expired(state);
    }
}

fn ensure_duration_allowed(
    timer: &TimerConfig,
    seconds: u32,
) -> Result<(), ServiceError> {
    if timer.accepts(seconds) {
        return Ok(());
    }
    Err(ServiceError::InvalidInput(format!(
        "timer duration must be between {} and {} seconds in steps of {} (got {seconds})",
        timer.min_seconds, timer.max_seconds, timer.step_seconds
    )))
}

fn whole_seconds(duration: Duration) -> u32 {
    u32::try_from(duration.whole_seconds()).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tokio::sync::broadcast::error::TryRecvError;

    use super::*;
    use crate::{
        config::AppConfig,
        dao::score_store::MemoryScoreStore,
        dto::timer::TimerState,
        state::{AppState, words::WordBank},
    };

    async fn state_with(words: WordBank) -> SharedState {
        AppState::new(
            AppConfig::default(),
            words,
            Arc::new(MemoryScoreStore::default()),
        )
        .await
    }

    fn words() -> WordBank {
        WordBank::new(
            vec!["haunted house".into(), "black cat".into()],
            vec!["frankenstein".into()],
        )
    }

    #[tokio::test]
    async fn drawing_requires_a_mode() {
        let state = state_with(words()).await;
        let err = draw_word(&state).await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidState(_)));
    }

    #[tokio::test]
    async fn select_draw_and_time_flow() {
        let state = state_with(words()).await;
        let mut events = state.events().subscribe();

        let selected = select_mode(&state, ModeChoice::Explicit(GameMode::Charades)).await;
        assert_eq!(GameMode::from(selected.mode), GameMode::Charades);

        let drawn = draw_word(&state).await.unwrap();
        assert_eq!(drawn.word, "frankenstein");

        let status = start_timer(&state, StartTimerRequest { seconds: Some(45) })
            .await
            .unwrap();
        assert_eq!(status.state, TimerState::Running);
        assert_eq!(status.duration_seconds, Some(45));

        let snapshot = snapshot(&state).await;
        assert_eq!(snapshot.word.as_deref(), Some("frankenstein"));
        assert_eq!(snapshot.timer.state, TimerState::Running);

        let names: Vec<_> = std::iter::from_fn(|| events.try_recv().ok())
            .filter_map(|event| event.event)
            .collect();
        assert_eq!(names, ["mode.selected", "word.drawn", "timer.started"]);
    }

    #[tokio::test]
    async fn empty_word_list_is_reported_without_state_change() {
        let state = state_with(WordBank::new(vec!["skull".into()], Vec::new())).await;
        select_mode(&state, ModeChoice::Explicit(GameMode::Charades)).await;

        let err = draw_word(&state).await.unwrap_err();

        assert!(matches!(err, ServiceError::NotFound(_)));
        assert_eq!(snapshot(&state).await.word, None);
    }

    #[tokio::test]
    async fn start_timer_uses_session_default_and_rejects_out_of_range() {
        let state = state_with(words()).await;
        set_timer_duration(&state, 90).await.unwrap();

        let status = start_timer(&state, StartTimerRequest::default())
            .await
            .unwrap();
        assert_eq!(status.duration_seconds, Some(90));

        assert!(matches!(
            start_timer(&state, StartTimerRequest { seconds: Some(20) }).await,
            Err(ServiceError::InvalidInput(_))
        ));
        assert!(matches!(
            set_timer_duration(&state, 301).await,
            Err(ServiceError::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn expired_timer_is_announced_once() {
        let state = state_with(words()).await;
        let now = OffsetDateTime::now_utc();
        state
            .with_session_mut(|session| {
                session
                    .start_timer(Duration::seconds(30), now - Duration::seconds(31))
                    .map(|_| ())
            })
            .await
            .unwrap();
        let mut events = state.events().subscribe();

        assert_eq!(poll_timer(&state).await.state, TimerState::TimeUp);
        assert_eq!(poll_timer(&state).await.state, TimerState::Idle);

        let expired = events.try_recv().unwrap();
        assert_eq!(expired.event.as_deref(), Some("timer.expired"));
        assert!(matches!(events.try_recv(), Err(TryRecvError::Empty)));
    }

    #[tokio::test]
    async fn stop_and_change_mode_leave_timer_idle() {
        let state = state_with(words()).await;
        select_mode(&state, ModeChoice::Random).await;
        start_timer(&state, StartTimerRequest::default())
            .await
            .unwrap();

        stop_timer(&state).await;
        assert_eq!(poll_timer(&state).await.state, TimerState::Idle);
        assert_eq!(
            stop_timer(&state).await.message,
            "timer was not running"
        );

        start_timer(&state, StartTimerRequest::default())
            .await
            .unwrap();
        change_mode(&state).await;
        let snapshot = snapshot(&state).await;
        assert_eq!(snapshot.mode, None);
        assert_eq!(snapshot.timer.state, TimerState::Idle);
    }

    #[tokio::test]
    async fn reset_session_restores_configured_defaults() {
        let state = state_with(words()).await;
        set_timer_duration(&state, 120).await.unwrap();
        select_mode(&state, ModeChoice::Explicit(GameMode::Drawing)).await;

        reset_session(&state).await;

        let snapshot = snapshot(&state).await;
        assert_eq!(snapshot.mode, None);
        assert_eq!(snapshot.timer_duration_seconds, 60);
    }
}

pub mod game;
pub mod scores;
mod sse;
pub mod timer;
pub mod words;

use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use tracing::{info, warn};

use crate::{
    config::AppConfig,
    dao::{score_store::ScoreStore, storage::StorageError},
    state::{
        game::GameSession,
        scores::{ScoreError, Scoreboard, Scores, Standing},
        words::WordBank,
    },
};

pub use self::sse::SseHub;

pub type SharedState = Arc<AppState>;

const EVENTS_CAPACITY: usize = 32;

/// Result of a scoreboard mutation once persistence has been attempted.
///
/// The in-memory scoreboard stays authoritative: a failed save is reported in
/// `persist_error` but the mutation is kept.
#[derive(Debug)]
pub struct ScoreUpdate<T> {
    /// Value returned by the mutation itself.
    pub value: T,
    /// Full mapping after the mutation.
    pub scores: Scores,
    /// Leader or tie after the mutation.
    pub standing: Standing,
    /// Set when the mapping could not be written to the store.
    pub persist_error: Option<StorageError>,
}

/// Central application state: the live session, the scoreboard and its store.
pub struct AppState {
    config: Arc<AppConfig>,
    words: WordBank,
    session: RwLock<GameSession>,
    scoreboard: Mutex<Scoreboard>,
    score_store: Arc<dyn ScoreStore>,
    events: SseHub,
}

impl AppState {
    /// Build the shared state, loading the persisted scores from `score_store`.
    pub async fn new(
        config: AppConfig,
        words: WordBank,
        score_store: Arc<dyn ScoreStore>,
    ) -> SharedState {
        let scores = score_store.load().await;
        info!(teams = scores.len(), "scoreboard loaded");

        let session = GameSession::new(config.timer.default_duration());
        Arc::new(Self {
            config: Arc::new(config),
            words,
            session: RwLock::new(session),
            scoreboard: Mutex::new(Scoreboard::from(scores)),
            score_store,
            events: SseHub::new(EVENTS_CAPACITY),
        })
    }

    /// Obtain a handle to the immutable runtime configuration.
    pub fn config(&self) -> Arc<AppConfig> {
        self.config.clone()
    }

    /// Word lists loaded at startup.
    pub fn words(&self) -> &WordBank {
        &self.words
    }

    /// Broadcast hub used for the public SSE stream.
    pub fn events(&self) -> &SseHub {
        &self.events
    }

    /// Run a mutating closure against the current session.
    pub async fn with_session_mut<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&mut GameSession) -> T,
    {
        let mut guard = self.session.write().await;
        f(&mut guard)
    }

    /// Tear down the current session and start a fresh one. Scores are kept.
    pub async fn reset_session(&self) {
        let mut guard = self.session.write().await;
        *guard = GameSession::new(self.config.timer.default_duration());
    }

    /// Run a read-only closure against the scoreboard.
    pub async fn read_scoreboard<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&Scoreboard) -> T,
    {
        let guard = self.scoreboard.lock().await;
        f(&guard)
    }

    /// Apply a scoreboard mutation and persist the full mapping.
    ///
    /// The lock is held across the save so writes reach the store in the same
    /// order as the mutations. Nothing is saved when the mutation fails.
    pub async fn with_scoreboard_mut<F, T>(&self, f: F) -> Result<ScoreUpdate<T>, ScoreError>
    where
        F: FnOnce(&mut Scoreboard) -> Result<T, ScoreError>,
    {
        let mut guard = self.scoreboard.lock().await;
        let value = f(&mut guard)?;
        let scores = guard.scores().clone();
        let standing = guard.standing();

        let persist_error = match self.score_store.save(scores.clone()).await {
            Ok(()) => None,
            Err(err) => {
                warn!(error = %err, "failed to persist scores; keeping in-memory state");
                Some(err)
            }
        };

        Ok(ScoreUpdate {
            value,
            scores,
            standing,
            persist_error,
        })
    }
}

use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};
#[cfg(test)]
use std::sync::{Arc, Mutex};

use futures::future::{BoxFuture, FutureExt};
use indexmap::IndexMap;
use serde_json::Number;
use tracing::{debug, warn};

use crate::{
    dao::storage::{StorageError, StorageResult},
    state::scores::Scores,
};

/// Abstraction over the durable team score mapping.
///
/// `load` never fails: anything unreadable is treated as an empty mapping.
/// `save` replaces the whole persisted mapping in one shot.
pub trait ScoreStore: Send + Sync {
    /// Read the persisted mapping.
    fn load(&self) -> BoxFuture<'static, Scores>;
    /// Replace the persisted mapping with `scores`.
    fn save(&self, scores: Scores) -> BoxFuture<'static, StorageResult<()>>;
}

/// JSON file backend (`{"team": score, ...}`, pretty printed).
#[derive(Debug, Clone)]
pub struct JsonScoreFile {
    path: PathBuf,
}

impl JsonScoreFile {
    /// Store backed by the file at `path`, created on first save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ScoreStore for JsonScoreFile {
    fn load(&self) -> BoxFuture<'static, Scores> {
        let path = self.path.clone();
        async move {
            match tokio::fs::read_to_string(&path).await {
                Ok(contents) => parse_scores(&path, &contents),
                Err(err) if err.kind() == ErrorKind::NotFound => {
                    debug!(path = %path.display(), "score file not found; starting empty");
                    Scores::new()
                }
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "failed to read score file; starting empty"
                    );
                    Scores::new()
                }
            }
        }
        .boxed()
    }

    fn save(&self, scores: Scores) -> BoxFuture<'static, StorageResult<()>> {
        let path = self.path.clone();
        async move {
            let payload = serde_json::to_string_pretty(&scores)
                .map_err(|err| StorageError::write(&path, "serializing scores", err))?;

            // Write next to the target then rename so readers never observe a partial file.
            let staging = staging_path(&path);
            tokio::fs::write(&staging, payload)
                .await
                .map_err(|err| StorageError::write(&staging, "writing scores", err))?;
            tokio::fs::rename(&staging, &path)
                .await
                .map_err(|err| StorageError::write(&path, "replacing score file", err))?;

            debug!(path = %path.display(), teams = scores.len(), "scores saved");
            Ok(())
        }
        .boxed()
    }
}

/// Volatile backend keeping the last saved mapping in memory.
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub struct MemoryScoreStore {
    saved: Arc<Mutex<Scores>>,
}

#[cfg(test)]
impl MemoryScoreStore {
    /// Store pre-seeded with `initial`, as if it had been saved before.
    pub fn new(initial: Scores) -> Self {
        Self {
            saved: Arc::new(Mutex::new(initial)),
        }
    }

    /// Copy of the last saved mapping.
    pub fn snapshot(&self) -> Scores {
        self.saved
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

#[cfg(test)]
impl ScoreStore for MemoryScoreStore {
    fn load(&self) -> BoxFuture<'static, Scores> {
        let scores = self.snapshot();
        async move { scores }.boxed()
    }

    fn save(&self, scores: Scores) -> BoxFuture<'static, StorageResult<()>> {
        if let Ok(mut guard) = self.saved.lock() {
            *guard = scores;
        }
        async { Ok(()) }.boxed()
    }
}

fn parse_scores(path: &Path, contents: &str) -> Scores {
    match serde_json::from_str::<IndexMap<String, Number>>(contents) {
        Ok(raw) => raw
            .into_iter()
            .map(|(team, score)| {
                let value = score.as_u64().unwrap_or_else(|| {
                    warn!(
                        team = %team,
                        %score,
                        "persisted score is not a non-negative integer; using 0"
                    );
                    0
                });
                (team, value)
            })
            .collect(),
        Err(err) => {
            warn!(
                path = %path.display(),
                error = %err,
                "score file is malformed; starting empty"
            );
            Scores::new()
        }
    }
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    static COUNTER: AtomicUsize = AtomicUsize::new(0);

    /// Unique path under the system temp dir; the file itself is not created.
    pub(crate) fn temp_path(label: &str) -> PathBuf {
        let id = COUNTER.fetch_add(1, Ordering::Relaxed);
        std::env::temp_dir().join(format!(
            "party-games-{label}-{}-{id}.json",
            std::process::id()
        ))
    }

    fn scores(entries: &[(&str, u64)]) -> Scores {
        entries
            .iter()
            .map(|(name, score)| (name.to_string(), *score))
            .collect()
    }

    #[tokio::test]
    async fn missing_file_loads_empty() {
        let store = JsonScoreFile::new(temp_path("missing"));
        assert!(store.load().await.is_empty());
    }

    #[tokio::test]
    async fn malformed_file_loads_empty() {
        let path = temp_path("malformed");
        tokio::fs::write(&path, "{ not json").await.unwrap();

        let store = JsonScoreFile::new(&path);
        assert!(store.load().await.is_empty());

        tokio::fs::remove_file(&path).await.unwrap();
    }

    #[tokio::test]
    async fn negative_persisted_scores_clamp_to_zero() {
        let path = temp_path("negative");
        tokio::fs::write(&path, r#"{"Ghouls": -3, "Bats": 2}"#)
            .await
            .unwrap();

        let loaded = JsonScoreFile::new(&path).load().await;
        assert_eq!(loaded, scores(&[("Ghouls", 0), ("Bats", 2)]));

        tokio::fs::remove_file(&path).await.unwrap();
    }

    #[tokio::test]
    async fn scores_beyond_32_bits_round_trip_exactly() {
        let path = temp_path("large");
        let store = JsonScoreFile::new(&path);
        let expected = scores(&[("Liches", 5_000_000_000), ("Imps", u64::MAX)]);

        store.save(expected.clone()).await.unwrap();

        assert_eq!(store.load().await, expected);
        tokio::fs::remove_file(&path).await.unwrap();
    }

    #[tokio::test]
    async fn save_then_load_preserves_mapping_and_order() {
        let path = temp_path("roundtrip");
        let store = JsonScoreFile::new(&path);
        let expected = scores(&[("Zombies", 4), ("Brujas", 0), ("Calabazas 🎃", 12)]);

        store.save(expected.clone()).await.unwrap();
        let loaded = store.load().await;

        assert_eq!(loaded, expected);
        assert_eq!(
            loaded.keys().collect::<Vec<_>>(),
            expected.keys().collect::<Vec<_>>()
        );
        tokio::fs::remove_file(&path).await.unwrap();
    }

    #[tokio::test]
    async fn saving_a_loaded_mapping_is_byte_identical() {
        let path = temp_path("idempotent");
        let store = JsonScoreFile::new(&path);
        store
            .save(scores(&[("Vampires", 3), ("Momias", 1)]))
            .await
            .unwrap();
        let first = tokio::fs::read(&path).await.unwrap();

        let loaded = store.load().await;
        store.save(loaded).await.unwrap();
        let second = tokio::fs::read(&path).await.unwrap();

        assert_eq!(first, second);
        assert!(!staging_path(&path).exists());
        tokio::fs::remove_file(&path).await.unwrap();
    }

    #[tokio::test]
    async fn save_into_missing_directory_fails() {
        let path = temp_path("nodir").join("scores.json");
        let err = JsonScoreFile::new(&path)
            .save(scores(&[("A", 1)]))
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::Write { .. }));
    }

    #[tokio::test]
    async fn memory_store_returns_last_saved_mapping() {
        let store = MemoryScoreStore::default();
        assert!(store.load().await.is_empty());
        store.save(scores(&[("A", 2)])).await.unwrap();
        assert_eq!(store.load().await, scores(&[("A", 2)]));
    }
}

use indexmap::IndexMap;
use thiserror::Error;

/// Team name to score mapping, in insertion (display) order.
pub type Scores = IndexMap<String, u64>;

/// Recoverable conditions reported by roster and score operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoreError {
    /// Team names must not be empty.
    #[error("team name must not be empty")]
    EmptyName,
    /// A team with this exact name already exists.
    #[error("team `{0}` already exists")]
    AlreadyExists(String),
    /// No team with this exact name exists.
    #[error("team `{0}` not found")]
    NotFound(String),
}

/// Derived leader information; never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Standing {
    /// No team, or every team is still at zero.
    NoLeader,
    /// A single team holds the highest score.
    Leader {
        /// Leading team name.
        team: String,
        /// Its score.
        score: u64,
    },
    /// Several teams share the highest score.
    Tie {
        /// Tied team names in display order.
        teams: Vec<String>,
        /// Shared score.
        score: u64,
    },
}

/// In-memory roster and scores. The roster is the key set of the mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scoreboard {
    scores: Scores,
}

impl From<Scores> for Scoreboard {
    fn from(scores: Scores) -> Self {
        Self { scores }
    }
}

impl Scoreboard {
    /// Borrow the full mapping, e.g. to persist it.
    pub fn scores(&self) -> &Scores {
        &self.scores
    }

    /// Score of a single team.
    pub fn score(&self, name: &str) -> Option<u64> {
        self.scores.get(name).copied()
    }

    /// Team names in display order.
    pub fn team_names(&self) -> impl Iterator<Item = &str> {
        self.scores.keys().map(String::as_str)
    }

    /// Register a new team with a zero score. Names are compared as-is.
    pub fn add_team(&mut self, name: &str) -> Result<(), ScoreError> {
        if name.is_empty() {
            return Err(ScoreError::EmptyName);
        }
        if self.scores.contains_key(name) {
            return Err(ScoreError::AlreadyExists(name.to_owned()));
        }
        self.scores.insert(name.to_owned(), 0);
        Ok(())
    }

    /// Remove a team and its score, keeping the order of the others.
    pub fn remove_team(&mut self, name: &str) -> Result<u64, ScoreError> {
        self.scores
            .shift_remove(name)
            .ok_or_else(|| ScoreError::NotFound(name.to_owned()))
    }

    /// Add `delta` to a team score, clamping at zero. Returns the new score.
    pub fn adjust_score(&mut self, name: &str, delta: i64) -> Result<u64, ScoreError> {
        let score = self
            .scores
            .get_mut(name)
            .ok_or_else(|| ScoreError::NotFound(name.to_owned()))?;

        *score = score.saturating_add_signed(delta);
        Ok(*score)
    }

    /// Zero the score of every listed team. Unknown names are skipped.
    pub fn reset_all<'a>(&mut self, names: impl IntoIterator<Item = &'a str>) {
        for name in names {
            if let Some(score) = self.scores.get_mut(name) {
                *score = 0;
            }
        }
    }

    /// Compute the current leader or tie.
    pub fn standing(&self) -> Standing {
        let Some(max) = self.scores.values().copied().max() else {
            return Standing::NoLeader;
        };
        if max == 0 {
            return Standing::NoLeader;
        }

        let mut winners: Vec<String> = self
            .scores
            .iter()
            .filter(|(_, score)| **score == max)
            .map(|(name, _)| name.clone())
            .collect();

        if winners.len() == 1 {
            Standing::Leader {
                team: winners.remove(0),
                score: max,
            }
        } else {
            Standing::Tie {
                teams: winners,
                score: max,
            }
        }
    }
}

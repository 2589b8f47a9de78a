use std::collections::HashMap;

use rand::{Rng, seq::IndexedRandom};

use crate::state::game::GameMode;

/// Immutable per-mode word lists loaded once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordBank {
    words: HashMap<GameMode, Vec<String>>,
}

impl Default for WordBank {
    fn default() -> Self {
        Self::new(Vec::new(), Vec::new())
    }
}

impl WordBank {
    /// Build a bank from explicit drawing and charades lists.
    pub fn new(drawing: Vec<String>, charades: Vec<String>) -> Self {
        let mut words = HashMap::with_capacity(2);
        words.insert(GameMode::Drawing, drawing);
        words.insert(GameMode::Charades, charades);
        Self { words }
    }

    /// Words available for `mode`. Absent entries behave as empty lists.
    pub fn words(&self, mode: GameMode) -> &[String] {
        self.words.get(&mode).map(Vec::as_slice).unwrap_or_default()
    }

    /// Number of words per mode, used for startup logging.
    pub fn len(&self, mode: GameMode) -> usize {
        self.words(mode).len()
    }

    /// Pick a word uniformly at random for `mode`, with replacement across calls.
    pub fn pick<R: Rng + ?Sized>(&self, mode: GameMode, rng: &mut R) -> Option<&str> {
        self.words(mode).choose(rng).map(String::as_str)
    }
}

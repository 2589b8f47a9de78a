use std::{collections::HashMap, fs, io::ErrorKind, path::Path};

use tracing::{info, warn};

use crate::state::{game::GameMode, words::WordBank};

/// Load the word bank from a JSON object keyed by mode identifier
/// (`{"pictionary": [...], "mimic": [...]}`).
///
/// Any failure degrades to empty lists so the game can still run; drawing a
/// word then reports that no words are available.
pub fn load(path: &Path) -> WordBank {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            warn!(path = %path.display(), "word bank not found; every mode starts empty");
            return WordBank::default();
        }
        Err(err) => {
            warn!(
                path = %path.display(),
                error = %err,
                "failed to read word bank; every mode starts empty"
            );
            return WordBank::default();
        }
    };

    let bank = parse(path, &contents);
    info!(
        path = %path.display(),
        pictionary = bank.len(GameMode::Drawing),
        mimic = bank.len(GameMode::Charades),
        "loaded word bank"
    );
    bank
}

fn parse(path: &Path, contents: &str) -> WordBank {
    let mut raw = match serde_json::from_str::<HashMap<String, Vec<String>>>(contents) {
        Ok(raw) => raw,
        Err(err) => {
            warn!(
                path = %path.display(),
                error = %err,
                "failed to parse word bank; every mode starts empty"
            );
            return WordBank::default();
        }
    };

    let mut take = |mode: GameMode| {
        raw.remove(mode.key()).unwrap_or_else(|| {
            warn!(mode = mode.key(), "word bank has no entry for mode; using an empty list");
            Vec::new()
        })
    };

    let drawing = take(GameMode::Drawing);
    let charades = take(GameMode::Charades);
    WordBank::new(drawing, charades)
}

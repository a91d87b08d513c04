use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::data::PlayerId;
use crate::state::{AppState, Favorites};

const DATA_DIR: &str = "squaddeck_terminal";
const FAVORITES_FILE: &str = "favorites.json";
const FAVORITES_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct FavoritesFile {
    version: u32,
    players: Vec<PlayerId>,
}

/// Loads the persisted favorites into the state, dropping ids the dataset
/// does not know about.
pub fn load_into_state(state: &mut AppState) {
    let Some(path) = state.favorites_path.clone() else {
        return;
    };
    let mut favorites = Favorites::from_ids(load_favorites(&path));
    favorites.retain_known(&state.dataset);
    let count = favorites.len();
    state.favorites = favorites;
    state.refresh_favorites_view();
    if count > 0 {
        state.push_log(format!("[INFO] Loaded {count} favorites"));
    }
}

/// Absent, unreadable, unparsable, and version-mismatched files all read
/// as an empty list.
pub fn load_favorites(path: &Path) -> Vec<PlayerId> {
    let Ok(raw) = fs::read_to_string(path) else {
        return Vec::new();
    };
    let Ok(file) = serde_json::from_str::<FavoritesFile>(&raw) else {
        return Vec::new();
    };
    if file.version != FAVORITES_VERSION {
        return Vec::new();
    }
    file.players
}

/// One synchronous write of the full set; errors are swallowed.
pub fn save_favorites(path: &Path, ids: &[PlayerId]) {
    if let Some(dir) = path.parent() {
        let _ = fs::create_dir_all(dir);
    }
    let file = FavoritesFile {
        version: FAVORITES_VERSION,
        players: ids.to_vec(),
    };
    let Ok(json) = serde_json::to_string(&file) else {
        return;
    };
    let tmp = path.with_extension("json.tmp");
    if fs::write(&tmp, json).is_ok() {
        let _ = fs::rename(&tmp, path);
    }
}

pub fn favorites_path() -> Option<PathBuf> {
    if let Ok(base) = std::env::var("XDG_DATA_HOME") {
        if !base.trim().is_empty() {
            return Some(PathBuf::from(base).join(DATA_DIR).join(FAVORITES_FILE));
        }
    }
    let home = std::env::var("HOME").ok()?;
    if home.trim().is_empty() {
        return None;
    }
    Some(
        PathBuf::from(home)
            .join(".local")
            .join("share")
            .join(DATA_DIR)
            .join(FAVORITES_FILE),
    )
}

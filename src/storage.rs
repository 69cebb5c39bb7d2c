use crate::models::WorkoutSet;
use std::{env, path::Path, path::PathBuf};
use tokio::fs;
use tracing::{error, warn};

pub const STREAK_SLOT: &str = "pullup-streak";
pub const SETS_SLOT: &str = "pullup-sets";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersistedState {
    pub streak: u64,
    pub sets: Vec<WorkoutSet>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveOutcome {
    pub streak_saved: bool,
    pub sets_saved: bool,
}

impl SaveOutcome {
    pub fn is_complete(&self) -> bool {
        self.streak_saved && self.sets_saved
    }
}

pub fn resolve_data_dir() -> Result<PathBuf, std::io::Error> {
    if let Ok(path) = env::var("APP_DATA_DIR") {
        return Ok(PathBuf::from(path));
    }

    Ok(PathBuf::from("data"))
}

/// Best-effort load of both slots. Missing or corrupt slots fall back to
/// their zero value; this never fails.
pub async fn load_state(dir: &Path) -> PersistedState {
    let streak = match read_slot(dir, STREAK_SLOT).await {
        Some(raw) => parse_streak(&raw),
        None => 0,
    };
    let sets = match read_slot(dir, SETS_SLOT).await {
        Some(raw) => parse_sets(&raw),
        None => Vec::new(),
    };

    PersistedState { streak, sets }
}

/// Writes both slots independently. Failures are logged, never returned.
pub async fn save_state(dir: &Path, streak: u64, sets: &[WorkoutSet]) -> SaveOutcome {
    let streak_saved = match write_slot(dir, STREAK_SLOT, streak.to_string().into_bytes()).await {
        Ok(()) => true,
        Err(err) => {
            error!("failed to save {STREAK_SLOT}: {err}");
            false
        }
    };

    let sets_saved = match serde_json::to_vec(sets) {
        Ok(payload) => match write_slot(dir, SETS_SLOT, payload).await {
            Ok(()) => true,
            Err(err) => {
                error!("failed to save {SETS_SLOT}: {err}");
                false
            }
        },
        Err(err) => {
            error!("failed to encode {SETS_SLOT}: {err}");
            false
        }
    };

    SaveOutcome {
        streak_saved,
        sets_saved,
    }
}

async fn read_slot(dir: &Path, slot: &str) -> Option<String> {
    match fs::read_to_string(dir.join(slot)).await {
        Ok(raw) => Some(raw),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => None,
        Err(err) => {
            error!("failed to read {slot}: {err}");
            None
        }
    }
}

async fn write_slot(dir: &Path, slot: &str, payload: Vec<u8>) -> std::io::Result<()> {
    fs::write(dir.join(slot), payload).await
}

fn parse_streak(raw: &str) -> u64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0;
    }
    match trimmed.parse::<u64>() {
        Ok(value) => value,
        Err(err) => {
            warn!("ignoring unparsable {STREAK_SLOT} value {trimmed:?}: {err}");
            0
        }
    }
}

fn parse_sets(raw: &str) -> Vec<WorkoutSet> {
    let value: serde_json::Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(err) => {
            error!("failed to parse {SETS_SLOT}: {err}");
            return Vec::new();
        }
    };

    let serde_json::Value::Array(items) = value else {
        warn!("{SETS_SLOT} is not an array, starting fresh");
        return Vec::new();
    };

    items
        .into_iter()
        .enumerate()
        .filter_map(|(position, item)| match serde_json::from_value(item) {
            Ok(set) => Some(set),
            Err(err) => {
                warn!("skipping invalid set at position {position}: {err}");
                None
            }
        })
        .collect()
}

use crate::editor::coerce_reps;
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SetKind {
    #[serde(rename = "banded")]
    Banded,
    #[default]
    #[serde(rename = "no-band")]
    NoBand,
}

/// One recorded set. Position in the list is its only identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutSet {
    #[serde(alias = "type")]
    pub kind: SetKind,
    #[serde(default, deserialize_with = "deserialize_reps")]
    pub reps: u32,
    pub checked: bool,
}

fn deserialize_reps<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = serde_json::Value::deserialize(deserializer)?;
    Ok(coerce_reps(&raw))
}

impl Default for WorkoutSet {
    fn default() -> Self {
        Self {
            kind: SetKind::NoBand,
            reps: 0,
            checked: true,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct KindRequest {
    pub kind: SetKind,
}

#[derive(Debug, Deserialize)]
pub struct RepsRequest {
    #[serde(default)]
    pub reps: serde_json::Value,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StateResponse {
    pub date: String,
    pub streak: u64,
    pub sets: Vec<WorkoutSet>,
    pub summary: String,
}

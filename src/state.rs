use crate::counter::Streak;
use crate::editor::SetList;
use crate::models::StateResponse;
use crate::storage::{PersistedState, SaveOutcome, save_state};
use crate::summary::{SummaryGlyphs, format_summary};
use chrono::NaiveDate;
use std::{path::Path, path::PathBuf, sync::Arc};
use tokio::sync::Mutex;

/// In-memory log for the current process. The summary is derived and is
/// refreshed explicitly after every change.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub sets: SetList,
    pub streak: Streak,
    pub summary: String,
}

impl Session {
    pub fn from_persisted(persisted: PersistedState) -> Self {
        Self {
            sets: SetList::new(persisted.sets),
            streak: Streak::new(persisted.streak),
            summary: String::new(),
        }
    }

    pub async fn persist(&self, dir: &Path) -> SaveOutcome {
        save_state(dir, self.streak.value(), self.sets.as_slice()).await
    }

    pub fn refresh_summary(&mut self, today: NaiveDate, glyphs: &SummaryGlyphs) {
        self.summary = format_summary(today, self.streak.value(), self.sets.as_slice(), glyphs);
    }

    pub fn to_response(&self, today: NaiveDate) -> StateResponse {
        StateResponse {
            date: today.to_string(),
            streak: self.streak.value(),
            sets: self.sets.as_slice().to_vec(),
            summary: self.summary.clone(),
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub data_dir: PathBuf,
    pub glyphs: Arc<SummaryGlyphs>,
    pub session: Arc<Mutex<Session>>,
}

impl AppState {
    pub fn new(data_dir: PathBuf, glyphs: SummaryGlyphs, session: Session) -> Self {
        Self {
            data_dir,
            glyphs: Arc::new(glyphs),
            session: Arc::new(Mutex::new(session)),
        }
    }
}

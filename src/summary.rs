use crate::models::{SetKind, WorkoutSet};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

const GROUP_SIZE: u32 = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KindGlyphs {
    pub emoji: String,
    pub check: String,
}

/// Glyph table for the shareable summary. Same shape as the glyph file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryGlyphs {
    pub streak: String,
    pub band: KindGlyphs,
    pub normal: KindGlyphs,
}

impl SummaryGlyphs {
    pub fn for_kind(&self, kind: SetKind) -> &KindGlyphs {
        match kind {
            SetKind::Banded => &self.band,
            SetKind::NoBand => &self.normal,
        }
    }
}

impl Default for SummaryGlyphs {
    fn default() -> Self {
        Self {
            streak: "🔥".to_string(),
            band: KindGlyphs {
                emoji: "🎗️".to_string(),
                check: "🟨".to_string(),
            },
            normal: KindGlyphs {
                emoji: "💪".to_string(),
                check: "🟩".to_string(),
            },
        }
    }
}

pub fn format_summary(
    date: NaiveDate,
    streak: u64,
    sets: &[WorkoutSet],
    glyphs: &SummaryGlyphs,
) -> String {
    let mut out = format!("{}/{}\n", date.day(), date.month());
    out.push_str(&format!("{} Streak: {}\n", glyphs.streak, streak));

    for set in sets.iter().filter(|set| set.checked) {
        let kind = glyphs.for_kind(set.kind);
        out.push_str(&format!("{} {}\n", kind.emoji, rep_run(&kind.check, set.reps)));
    }

    out
}

fn rep_run(check: &str, reps: u32) -> String {
    let mut run = String::new();
    for i in 0..reps {
        run.push_str(check);
        if i % GROUP_SIZE == GROUP_SIZE - 1 {
            run.push(' ');
        }
    }
    run
}

use crate::models::{SetKind, WorkoutSet};
use std::fmt;

/// Ceiling for every coerced rep count, from form input or the sets slot.
///
/// Values above it saturate rather than being rejected. The summary renders
/// one glyph per rep, so an unbounded count would let a single typo or a
/// hand-edited slot build a multi-gigabyte string.
pub const MAX_REPS: u32 = 9_999;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditError {
    OutOfRange { index: usize, len: usize },
}

impl fmt::Display for EditError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange { index, len } => {
                write!(f, "set {index} does not exist (list has {len} sets)")
            }
        }
    }
}

impl std::error::Error for EditError {}

/// Ordered list of sets. Every index-taking operation is bounds checked and
/// leaves the list untouched on failure.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SetList {
    sets: Vec<WorkoutSet>,
}

impl SetList {
    pub fn new(sets: Vec<WorkoutSet>) -> Self {
        Self { sets }
    }

    pub fn as_slice(&self) -> &[WorkoutSet] {
        &self.sets
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    pub fn append(&mut self, set: WorkoutSet) -> usize {
        self.sets.push(set);
        self.sets.len() - 1
    }

    pub fn push_default(&mut self) -> usize {
        self.append(WorkoutSet::default())
    }

    pub fn set_kind(&mut self, index: usize, kind: SetKind) -> Result<(), EditError> {
        self.get_mut(index)?.kind = kind;
        Ok(())
    }

    pub fn set_reps(&mut self, index: usize, reps: u32) -> Result<(), EditError> {
        self.get_mut(index)?.reps = reps;
        Ok(())
    }

    pub fn toggle(&mut self, index: usize) -> Result<bool, EditError> {
        let set = self.get_mut(index)?;
        set.checked = !set.checked;
        Ok(set.checked)
    }

    pub fn remove(&mut self, index: usize) -> Result<WorkoutSet, EditError> {
        self.check(index)?;
        Ok(self.sets.remove(index))
    }

    /// Returns `Ok(false)` when the set is already first.
    pub fn move_up(&mut self, index: usize) -> Result<bool, EditError> {
        self.check(index)?;
        if index == 0 {
            return Ok(false);
        }
        self.sets.swap(index - 1, index);
        Ok(true)
    }

    /// Returns `Ok(false)` when the set is already last.
    pub fn move_down(&mut self, index: usize) -> Result<bool, EditError> {
        self.check(index)?;
        if index + 1 == self.sets.len() {
            return Ok(false);
        }
        self.sets.swap(index, index + 1);
        Ok(true)
    }

    fn check(&self, index: usize) -> Result<(), EditError> {
        if index < self.sets.len() {
            Ok(())
        } else {
            Err(EditError::OutOfRange {
                index,
                len: self.sets.len(),
            })
        }
    }

    fn get_mut(&mut self, index: usize) -> Result<&mut WorkoutSet, EditError> {
        let len = self.sets.len();
        self.sets
            .get_mut(index)
            .ok_or(EditError::OutOfRange { index, len })
    }
}

/// Coerces raw form input to a rep count: leading digits are taken, anything
/// without digits or negative becomes 0, large values saturate at [`MAX_REPS`].
pub fn parse_reps(input: &str) -> u32 {
    let trimmed = input.trim();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits = rest.bytes().take_while(u8::is_ascii_digit);
    let mut value = 0u32;
    let mut seen = false;
    for digit in digits {
        seen = true;
        value = value
            .saturating_mul(10)
            .saturating_add(u32::from(digit - b'0'));
    }

    if !seen || negative {
        0
    } else {
        value.min(MAX_REPS)
    }
}

pub fn coerce_reps(value: &serde_json::Value) -> u32 {
    match value {
        serde_json::Value::String(text) => parse_reps(text),
        serde_json::Value::Number(number) => {
            if let Some(n) = number.as_u64() {
                u32::try_from(n).unwrap_or(u32::MAX).min(MAX_REPS)
            } else if number.as_i64().is_some() {
                0
            } else {
                match number.as_f64() {
                    Some(n) if n.is_finite() && n > 0.0 => n.trunc().min(f64::from(MAX_REPS)) as u32,
                    _ => 0,
                }
            }
        }
        _ => 0,
    }
}

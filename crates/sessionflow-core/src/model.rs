//! Shared domain records: backlog tasks, templates, history, settings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of playlist entry a record turns into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TaskKind {
    #[default]
    Task,
    Break,
}

/// A task sitting in the backlog, waiting to be placed on the timeline.
///
/// `duration_min` is mutable while the task is in the backlog and is
/// logically split when the task is partially allocated to a slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskRecord {
    pub id: String,
    pub title: String,
    /// Duration in minutes, always > 0.
    pub duration_min: u64,
    /// Category color tag, e.g. "emerald" or "blue".
    pub color: String,
    #[serde(default, skip_serializing_if = "is_default_kind")]
    pub kind: TaskKind,
}

fn is_default_kind(kind: &TaskKind) -> bool {
    *kind == TaskKind::Task
}

/// Default duration for tasks created without an explicit length.
pub const DEFAULT_TASK_MIN: u64 = 60;

/// Default color tag for new backlog tasks.
pub const DEFAULT_TASK_COLOR: &str = "emerald";

impl TaskRecord {
    pub fn new(title: impl Into<String>, duration_min: u64, color: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            duration_min: duration_min.max(1),
            color: color.into(),
            kind: TaskKind::Task,
        }
    }
}

/// A reusable task blueprint. Identity is its title (case-insensitive).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Template {
    pub id: String,
    pub title: String,
    pub duration_min: u64,
    pub color: String,
}

impl Template {
    pub fn new(title: impl Into<String>, duration_min: u64, color: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            duration_min,
            color: color.into(),
        }
    }
}

/// Append-only log entry written once per completed non-break task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub title: String,
    pub duration_min: u64,
    pub color: String,
    pub completed_at: DateTime<Utc>,
}

/// User settings persisted as a single opaque blob.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Play ambient noise while a session is active.
    #[serde(default)]
    pub zen_mode: bool,
    /// Auto-insert a 5-minute break after tasks of an hour or more.
    #[serde(default = "default_true")]
    pub smart_breaks: bool,
}

fn default_true() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            zen_mode: false,
            smart_breaks: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_default_smart_breaks_on() {
        let s = Settings::default();
        assert!(!s.zen_mode);
        assert!(s.smart_breaks);
    }

    #[test]
    fn settings_blob_roundtrip() {
        let s = Settings {
            zen_mode: true,
            smart_breaks: false,
        };
        let json = serde_json::to_string(&s).unwrap();
        let back: Settings = serde_json::from_str(&json).unwrap();
        assert!(back.zen_mode);
        assert!(!back.smart_breaks);
    }

    #[test]
    fn settings_missing_fields_take_defaults() {
        let back: Settings = serde_json::from_str("{}").unwrap();
        assert!(!back.zen_mode);
        assert!(back.smart_breaks);
    }

    #[test]
    fn task_record_clamps_zero_duration() {
        let t = TaskRecord::new("Edge", 0, DEFAULT_TASK_COLOR);
        assert_eq!(t.duration_min, 1);
    }
}

//! A task placed into a specific hour slot.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::TaskKind;

/// Capacity of one hour slot, in minutes.
pub const SLOT_CAPACITY_MIN: u64 = 60;

/// A Task Record copy placed into an hour slot.
///
/// `instance_id` is unique per placement and is the removal handle.
/// `source_task_id` points back to the originating backlog record, or is
/// `None` when the placement came from a template. Duration is immutable
/// once instantiated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Allocation {
    pub instance_id: String,
    pub source_task_id: Option<String>,
    pub title: String,
    pub duration_min: u64,
    pub color: String,
    #[serde(default)]
    pub kind: TaskKind,
}

impl Allocation {
    pub fn new(
        source_task_id: Option<String>,
        title: impl Into<String>,
        duration_min: u64,
        color: impl Into<String>,
    ) -> Self {
        Self {
            instance_id: Uuid::new_v4().to_string(),
            source_task_id,
            title: title.into(),
            duration_min,
            color: color.into(),
            kind: TaskKind::Task,
        }
    }
}

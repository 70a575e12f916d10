//! The plan board: backlog, templates, and the hour-slot allocation store.
//!
//! The board exclusively owns all allocations. Dropping a backlog task
//! into a slot truncates the allocation to the slot's remaining capacity
//! and returns the remainder to the backlog record; unscheduling reverses
//! the split. Invalid mutations (unknown ids, full slots) are no-ops, not
//! errors.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::allocation::{Allocation, SLOT_CAPACITY_MIN};
use crate::error::{CoreError, Result};
use crate::model::{TaskRecord, Template, DEFAULT_TASK_COLOR, DEFAULT_TASK_MIN};

/// Upper bound on the configured session length, in hours.
pub const MAX_TARGET_HOURS: u64 = 12;

/// What was picked up by a drag gesture.
#[derive(Debug, Clone)]
pub enum DragSource {
    Backlog(String),
    Template(String),
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PlanBoard {
    pub backlog: Vec<TaskRecord>,
    pub templates: Vec<Template>,
    /// Hour slot index -> ordered allocations within that hour.
    pub slots: BTreeMap<usize, Vec<Allocation>>,
    #[serde(default = "default_target_hours")]
    pub target_hours: u64,
}

fn default_target_hours() -> u64 {
    6
}

impl PlanBoard {
    pub fn new() -> Self {
        Self {
            backlog: Vec::new(),
            templates: Vec::new(),
            slots: BTreeMap::new(),
            target_hours: default_target_hours(),
        }
    }

    // ── Backlog ──────────────────────────────────────────────────────

    /// Add a task from free-text input. An exact (case-insensitive)
    /// template title match adopts that template's duration and color.
    pub fn add_task(&mut self, title: &str) -> Option<&TaskRecord> {
        let title = title.trim();
        if title.is_empty() {
            return None;
        }
        let record = match self.template_by_title(title) {
            Some(t) => TaskRecord::new(t.title.clone(), t.duration_min, t.color.clone()),
            None => TaskRecord::new(title, DEFAULT_TASK_MIN, DEFAULT_TASK_COLOR),
        };
        self.backlog.push(record);
        self.backlog.last()
    }

    /// Templates whose title contains `input` (case-insensitive).
    pub fn suggestions(&self, input: &str) -> Vec<&Template> {
        let needle = input.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        self.templates
            .iter()
            .filter(|t| t.title.to_lowercase().contains(&needle))
            .collect()
    }

    /// Nudge a backlog task's duration by `delta_min`, clamped to >= 1.
    pub fn adjust_duration(&mut self, task_id: &str, delta_min: i64) {
        if let Some(task) = self.backlog.iter_mut().find(|t| t.id == task_id) {
            let next = task.duration_min as i64 + delta_min;
            task.duration_min = next.max(1) as u64;
        }
    }

    /// Set an exact duration from raw input. Non-numeric or non-positive
    /// input is rejected and the prior duration retained.
    pub fn set_duration(&mut self, task_id: &str, input: &str) -> Result<()> {
        let minutes: u64 = input.trim().parse().map_err(|_| CoreError::InvalidDuration {
            input: input.to_string(),
            message: "not a number".into(),
        })?;
        if minutes == 0 {
            return Err(CoreError::InvalidDuration {
                input: input.to_string(),
                message: "must be greater than zero".into(),
            });
        }
        if let Some(task) = self.backlog.iter_mut().find(|t| t.id == task_id) {
            task.duration_min = minutes;
        }
        Ok(())
    }

    pub fn delete_task(&mut self, task_id: &str) -> bool {
        let before = self.backlog.len();
        self.backlog.retain(|t| t.id != task_id);
        self.backlog.len() != before
    }

    // ── Templates ────────────────────────────────────────────────────

    fn template_by_title(&self, title: &str) -> Option<&Template> {
        self.templates
            .iter()
            .find(|t| t.title.eq_ignore_ascii_case(title))
    }

    /// Save a reusable template. Duplicate titles are rejected.
    pub fn save_template(
        &mut self,
        title: &str,
        duration_min: u64,
        color: &str,
    ) -> Result<&Template> {
        if self.template_by_title(title).is_some() {
            return Err(CoreError::DuplicateTemplate(title.to_string()));
        }
        self.templates
            .push(Template::new(title, duration_min.max(1), color));
        Ok(&self.templates[self.templates.len() - 1])
    }

    pub fn delete_template(&mut self, template_id: &str) -> bool {
        let before = self.templates.len();
        self.templates.retain(|t| t.id != template_id);
        self.templates.len() != before
    }

    // ── Allocation store ─────────────────────────────────────────────

    pub fn allocations(&self, slot: usize) -> &[Allocation] {
        self.slots.get(&slot).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Minutes already committed within a slot.
    pub fn slot_used_min(&self, slot: usize) -> u64 {
        self.allocations(slot).iter().map(|a| a.duration_min).sum()
    }

    pub fn slot_remaining_min(&self, slot: usize) -> u64 {
        SLOT_CAPACITY_MIN.saturating_sub(self.slot_used_min(slot))
    }

    /// Drop a dragged task or template into an hour slot.
    ///
    /// The allocation is truncated to the slot's remaining capacity; the
    /// remainder stays on the backlog record (which is removed when it
    /// collapses to zero). Dropping onto a full slot or with an unknown
    /// source id is a silent no-op. Returns the placed allocation's
    /// instance id.
    pub fn drop_onto_slot(&mut self, source: DragSource, slot: usize) -> Option<String> {
        let remaining = self.slot_remaining_min(slot);
        if remaining == 0 {
            return None;
        }

        let alloc = match source {
            DragSource::Backlog(id) => {
                let task = self.backlog.iter_mut().find(|t| t.id == id)?;
                let granted = task.duration_min.min(remaining);
                let alloc =
                    Allocation::new(Some(task.id.clone()), &task.title, granted, &task.color);
                task.duration_min -= granted;
                if task.duration_min == 0 {
                    self.backlog.retain(|t| t.id != id);
                }
                alloc
            }
            DragSource::Template(id) => {
                let template = self.templates.iter().find(|t| t.id == id)?;
                let granted = template.duration_min.min(remaining);
                Allocation::new(None, &template.title, granted, &template.color)
            }
        };

        let instance_id = alloc.instance_id.clone();
        self.slots.entry(slot).or_default().push(alloc);
        Some(instance_id)
    }

    /// Remove an allocation and return its minutes to the backlog.
    ///
    /// If the originating record still exists its duration grows back;
    /// if it was consumed entirely, a backlog record is recreated under
    /// the original id. Template-sourced allocations are simply dropped.
    pub fn unschedule(&mut self, slot: usize, instance_id: &str) {
        let Some(list) = self.slots.get_mut(&slot) else {
            return;
        };
        let Some(pos) = list.iter().position(|a| a.instance_id == instance_id) else {
            return;
        };
        let alloc = list.remove(pos);
        if list.is_empty() {
            self.slots.remove(&slot);
        }

        if let Some(source_id) = alloc.source_task_id {
            match self.backlog.iter_mut().find(|t| t.id == source_id) {
                Some(task) => task.duration_min += alloc.duration_min,
                None => self.backlog.push(TaskRecord {
                    id: source_id,
                    title: alloc.title,
                    duration_min: alloc.duration_min,
                    color: alloc.color,
                    kind: alloc.kind,
                }),
            }
        }
    }

    pub fn clear_slots(&mut self) {
        // Return everything to the backlog before wiping.
        let slots: Vec<usize> = self.slots.keys().copied().collect();
        for slot in slots {
            let ids: Vec<String> = self
                .allocations(slot)
                .iter()
                .map(|a| a.instance_id.clone())
                .collect();
            for id in ids {
                self.unschedule(slot, &id);
            }
        }
    }

    pub fn set_target_hours(&mut self, hours: u64) {
        self.target_hours = hours.clamp(1, MAX_TARGET_HOURS);
    }

    /// Total allocation count across the first `target_hours` slots.
    pub fn scheduled_count(&self) -> usize {
        (0..self.target_hours as usize)
            .map(|slot| self.allocations(slot).len())
            .sum()
    }
}

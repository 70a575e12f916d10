//! The session compiler: plan board -> ordered playlist.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{CoreError, Result};
use crate::model::TaskKind;
use crate::plan::{Allocation, PlanBoard};

/// Duration of an injected smart break, in minutes.
pub const SMART_BREAK_MIN: u64 = 5;

/// Allocated duration at or above which a smart break follows.
const SMART_BREAK_THRESHOLD_MIN: u64 = 60;

/// One entry of a compiled playlist.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistEntry {
    pub instance_id: String,
    pub title: String,
    pub duration_min: u64,
    pub color: String,
    pub kind: TaskKind,
}

impl PlaylistEntry {
    fn from_allocation(alloc: &Allocation) -> Self {
        Self {
            instance_id: alloc.instance_id.clone(),
            title: alloc.title.clone(),
            duration_min: alloc.duration_min,
            color: alloc.color.clone(),
            kind: alloc.kind,
        }
    }

    fn smart_break() -> Self {
        Self {
            instance_id: Uuid::new_v4().to_string(),
            title: "Micro-Break".into(),
            duration_min: SMART_BREAK_MIN,
            color: "gray".into(),
            kind: TaskKind::Break,
        }
    }

    pub fn is_break(&self) -> bool {
        self.kind == TaskKind::Break
    }
}

/// Ordered, finite sequence of entries compiled at session start.
/// Immutable for the lifetime of one playback session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Playlist {
    entries: Vec<PlaylistEntry>,
}

impl Playlist {
    /// Flatten the board's hour slots `0..target_hours` in order,
    /// injecting a smart break after every entry of an hour or more when
    /// enabled. Pure function of its inputs.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::EmptyTimeline`] when nothing is scheduled;
    /// the caller must not start playback.
    pub fn compile(board: &PlanBoard, smart_breaks: bool) -> Result<Self> {
        let mut entries = Vec::new();
        for slot in 0..board.target_hours as usize {
            for alloc in board.allocations(slot) {
                let entry = PlaylistEntry::from_allocation(alloc);
                let wants_break = smart_breaks && entry.duration_min >= SMART_BREAK_THRESHOLD_MIN;
                entries.push(entry);
                if wants_break {
                    entries.push(PlaylistEntry::smart_break());
                }
            }
        }

        if entries.is_empty() {
            return Err(CoreError::EmptyTimeline);
        }
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[PlaylistEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&PlaylistEntry> {
        self.entries.get(index)
    }

    pub fn total_duration_min(&self) -> u64 {
        self.entries.iter().map(|e| e.duration_min).sum()
    }

    #[cfg(test)]
    pub(crate) fn from_entries(entries: Vec<PlaylistEntry>) -> Self {
        Self { entries }
    }

    #[cfg(test)]
    pub(crate) fn of_tasks(specs: &[(&str, u64)]) -> Self {
        let entries = specs
            .iter()
            .map(|(title, minutes)| PlaylistEntry {
                instance_id: Uuid::new_v4().to_string(),
                title: (*title).into(),
                duration_min: *minutes,
                color: "emerald".into(),
                kind: TaskKind::Task,
            })
            .collect();
        Self { entries }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::DragSource;

    fn board_with(slots: &[(usize, &str, u64)]) -> PlanBoard {
        let mut board = PlanBoard::new();
        for (slot, title, minutes) in slots {
            let id = board.add_task(title).unwrap().id.clone();
            board.set_duration(&id, &minutes.to_string()).unwrap();
            board.drop_onto_slot(DragSource::Backlog(id), *slot).unwrap();
        }
        board
    }

    #[test]
    fn compiles_in_slot_order_then_intra_slot_order() {
        let board = board_with(&[(2, "C", 20), (0, "A", 30), (0, "B", 15)]);
        let playlist = Playlist::compile(&board, false).unwrap();
        let titles: Vec<_> = playlist.entries().iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, ["A", "B", "C"]);
        assert_eq!(playlist.len(), 3);
    }

    #[test]
    fn smart_breaks_follow_hour_long_entries_only() {
        let board = board_with(&[(0, "Write", 60), (1, "Email", 15)]);
        let playlist = Playlist::compile(&board, true).unwrap();
        let titles: Vec<_> = playlist.entries().iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, ["Write", "Micro-Break", "Email"]);
        assert_eq!(playlist.get(1).unwrap().duration_min, SMART_BREAK_MIN);
        assert!(playlist.get(1).unwrap().is_break());
    }

    #[test]
    fn disabled_smart_breaks_keep_allocation_count() {
        let board = board_with(&[(0, "Write", 60), (1, "Email", 15), (3, "Review", 45)]);
        let playlist = Playlist::compile(&board, false).unwrap();
        assert_eq!(playlist.len(), board.scheduled_count());
        assert!(playlist.entries().iter().all(|e| !e.is_break()));
    }

    #[test]
    fn slots_beyond_target_hours_are_ignored() {
        let mut board = board_with(&[(0, "A", 30), (8, "Late", 30)]);
        board.set_target_hours(3);
        let playlist = Playlist::compile(&board, false).unwrap();
        assert_eq!(playlist.len(), 1);
        assert_eq!(playlist.get(0).unwrap().title, "A");
    }

    #[test]
    fn empty_board_reports_empty_timeline() {
        let mut board = PlanBoard::new();
        board.set_target_hours(3);
        let err = Playlist::compile(&board, true).unwrap_err();
        assert!(matches!(err, CoreError::EmptyTimeline));
    }

    #[test]
    fn compilation_is_deterministic() {
        let board = board_with(&[(0, "Write", 60), (1, "Email", 15)]);
        let a = Playlist::compile(&board, true).unwrap();
        let b = Playlist::compile(&board, true).unwrap();
        let titles = |p: &Playlist| {
            p.entries()
                .iter()
                .map(|e| (e.title.clone(), e.duration_min))
                .collect::<Vec<_>>()
        };
        assert_eq!(titles(&a), titles(&b));
    }
}

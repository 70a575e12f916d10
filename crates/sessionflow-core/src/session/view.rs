//! Widget view model: a pure projection of engine state.
//!
//! Regenerated on every push by replaying the playlist forward from the
//! current cursor; never cached or mutated incrementally.

use chrono::{DateTime, Duration, Local, Utc};
use serde::{Deserialize, Serialize};

use super::engine::{PlaybackEngine, PlaybackStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WidgetStatus {
    /// Sentinel pushed at teardown; the receiving surface renders nothing.
    Idle,
    Active,
    Transition,
    Completed,
}

/// One row of the upcoming-task queue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueueEntry {
    pub title: String,
    /// Local clock time the entry is projected to start; `None` for the
    /// current entry, which shows the live countdown instead.
    pub start_time: Option<String>,
    pub is_current: bool,
}

/// Snapshot mirrored to the widget surface on every tick/state change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WidgetSnapshot {
    pub title: String,
    pub color: String,
    pub time_left_secs: i64,
    pub status: WidgetStatus,
    pub queue: Vec<QueueEntry>,
}

impl WidgetSnapshot {
    pub fn idle() -> Self {
        Self {
            title: String::new(),
            color: String::new(),
            time_left_secs: 0,
            status: WidgetStatus::Idle,
            queue: Vec::new(),
        }
    }

    /// Project `(PlaybackState, Playlist) -> ViewModel`.
    pub fn project(engine: &PlaybackEngine) -> Self {
        let Some(current) = engine.current_entry() else {
            return Self::idle();
        };

        let mut queue = vec![QueueEntry {
            title: current.title.clone(),
            start_time: None,
            is_current: true,
        }];
        let mut acc: DateTime<Utc> = engine.end_at();
        for entry in engine
            .playlist()
            .entries()
            .iter()
            .skip(engine.current_index() + 1)
        {
            queue.push(QueueEntry {
                title: entry.title.clone(),
                start_time: Some(acc.with_timezone(&Local).format("%H:%M").to_string()),
                is_current: false,
            });
            acc += Duration::minutes(entry.duration_min as i64);
        }

        let (title, color, time_left_secs, status) = match engine.status() {
            PlaybackStatus::Active if current.is_break() => (
                current.title.clone(),
                "blue".to_string(),
                engine.time_left_secs(),
                WidgetStatus::Active,
            ),
            PlaybackStatus::Active => (
                current.title.clone(),
                current.color.clone(),
                engine.time_left_secs(),
                WidgetStatus::Active,
            ),
            PlaybackStatus::Transition => (
                "Done!".to_string(),
                "emerald".to_string(),
                0,
                WidgetStatus::Transition,
            ),
            PlaybackStatus::Completed => (
                "Finished!".to_string(),
                current.color.clone(),
                0,
                WidgetStatus::Completed,
            ),
        };

        Self {
            title,
            color,
            time_left_secs,
            status,
            queue,
        }
    }
}

/// Format a second count as `MM:SS`.
pub fn format_clock(secs: i64) -> String {
    let secs = secs.max(0);
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::playlist::Playlist;
    use chrono::Utc;

    #[test]
    fn queue_walks_forward_with_running_start_sums() {
        let now = Utc::now();
        let (engine, _) =
            PlaybackEngine::start(Playlist::of_tasks(&[("A", 30), ("B", 45), ("C", 15)]), now)
                .unwrap();
        let snap = WidgetSnapshot::project(&engine);

        assert_eq!(snap.queue.len(), 3);
        assert!(snap.queue[0].is_current);
        assert!(snap.queue[0].start_time.is_none());

        let end = engine.end_at();
        let expect = |t: DateTime<Utc>| t.with_timezone(&Local).format("%H:%M").to_string();
        assert_eq!(snap.queue[1].start_time.as_deref(), Some(expect(end).as_str()));
        assert_eq!(
            snap.queue[2].start_time.as_deref(),
            Some(expect(end + Duration::minutes(45)).as_str())
        );
    }

    #[test]
    fn transition_overrides_title_and_zeroes_countdown() {
        let now = Utc::now();
        let (mut engine, _) =
            PlaybackEngine::start(Playlist::of_tasks(&[("A", 1), ("B", 1)]), now).unwrap();
        engine.tick_at(now + Duration::minutes(1));
        let snap = WidgetSnapshot::project(&engine);
        assert_eq!(snap.status, WidgetStatus::Transition);
        assert_eq!(snap.title, "Done!");
        assert_eq!(snap.time_left_secs, 0);
        assert_eq!(snap.color, "emerald");
    }

    #[test]
    fn completed_shows_finished() {
        let now = Utc::now();
        let (mut engine, _) =
            PlaybackEngine::start(Playlist::of_tasks(&[("A", 1)]), now).unwrap();
        engine.tick_at(now + Duration::minutes(1));
        let snap = WidgetSnapshot::project(&engine);
        assert_eq!(snap.status, WidgetStatus::Completed);
        assert_eq!(snap.title, "Finished!");
    }

    #[test]
    fn clock_formatting_pads_and_clamps() {
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(65), "01:05");
        assert_eq!(format_clock(-3), "00:00");
        assert_eq!(format_clock(3600), "60:00");
    }
}

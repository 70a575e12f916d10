//! Playback engine: the focus-mode state machine.
//!
//! The engine is wall-clock based and has no internal thread; the caller
//! (normally [`super::SessionDriver`]) invokes `tick_at()` periodically.
//! The displayed countdown is always recomputed from the absolute
//! `end_at` timestamp, never from accumulated decrements, so a suspended
//! or backgrounded host resynchronizes on the next tick.
//!
//! ## State transitions
//!
//! ```text
//! Active -> Transition -> Active -> ... -> Completed
//!   \______________ stop ______________/
//! ```
//!
//! Expiry handling is entered only from `Active` and moves the status
//! atomically within one `tick_at` call, so a rapid double-fire of the
//! expiry check cannot double-record history or double-advance.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::playlist::Playlist;
use crate::error::{CoreError, Result};
use crate::events::Event;
use crate::model::HistoryRecord;

/// Length of the non-interactive display window between entries.
pub const TRANSITION_SECS: i64 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackStatus {
    Active,
    Transition,
    Completed,
}

/// Drives a single compiled playlist to completion.
///
/// Owns the playlist exclusively for the session's duration; the playlist
/// is read-only once handed over.
#[derive(Debug, Clone)]
pub struct PlaybackEngine {
    playlist: Playlist,
    index: usize,
    status: PlaybackStatus,
    /// Wall-clock end of the current entry.
    end_at: DateTime<Utc>,
    /// Wall-clock end of the transition window, when in `Transition`.
    transition_until: Option<DateTime<Utc>>,
    time_left_secs: i64,
    stopped: bool,
}

impl PlaybackEngine {
    /// Start playback of a non-empty playlist.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::EmptyTimeline`] for an empty playlist; the
    /// engine must not start in that case.
    pub fn start(playlist: Playlist, now: DateTime<Utc>) -> Result<(Self, Event)> {
        let first = playlist.get(0).ok_or(CoreError::EmptyTimeline)?;
        let duration_min = first.duration_min;
        let title = first.title.clone();
        let engine = Self {
            end_at: now + Duration::minutes(duration_min as i64),
            time_left_secs: (duration_min * 60) as i64,
            playlist,
            index: 0,
            status: PlaybackStatus::Active,
            transition_until: None,
            stopped: false,
        };
        let event = Event::SessionStarted {
            entry_index: 0,
            title,
            duration_min,
            at: now,
        };
        Ok((engine, event))
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn status(&self) -> PlaybackStatus {
        self.status
    }

    pub fn current_index(&self) -> usize {
        self.index
    }

    pub fn current_entry(&self) -> Option<&super::playlist::PlaylistEntry> {
        self.playlist.get(self.index)
    }

    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    /// Seconds left on the current entry, clamped at zero for display.
    pub fn time_left_secs(&self) -> i64 {
        self.time_left_secs.max(0)
    }

    pub fn end_at(&self) -> DateTime<Utc> {
        self.end_at
    }

    fn is_last(&self) -> bool {
        self.index + 1 >= self.playlist.len()
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Advance wall-clock state. Call with a granularity of 250 ms or
    /// finer for a smooth countdown.
    pub fn tick(&mut self) -> Vec<Event> {
        self.tick_at(Utc::now())
    }

    pub fn tick_at(&mut self, now: DateTime<Utc>) -> Vec<Event> {
        match self.status {
            PlaybackStatus::Active => {
                let left_ms = (self.end_at - now).num_milliseconds();
                self.time_left_secs = ceil_secs(left_ms);
                if left_ms <= 0 {
                    self.finish_current(now)
                } else {
                    Vec::new()
                }
            }
            PlaybackStatus::Transition => {
                match self.transition_until {
                    Some(until) if now >= until => self.advance(now),
                    _ => Vec::new(),
                }
            }
            PlaybackStatus::Completed => Vec::new(),
        }
    }

    /// Terminate the session from any state. No further ticks have any
    /// effect; the current entry gets no history record.
    pub fn stop(&mut self, now: DateTime<Utc>) -> Option<Event> {
        if self.stopped {
            return None;
        }
        self.stopped = true;
        self.status = PlaybackStatus::Completed;
        self.transition_until = None;
        Some(Event::SessionStopped { at: now })
    }

    // ── Internal ─────────────────────────────────────────────────────

    /// Completion handler, entered only from `Active`. Transitions the
    /// status before returning, which is the one-shot latch: a second
    /// expiry for the same entry is unreachable.
    fn finish_current(&mut self, now: DateTime<Utc>) -> Vec<Event> {
        let mut events = Vec::new();
        self.time_left_secs = 0;

        if let Some(entry) = self.playlist.get(self.index) {
            if !entry.is_break() {
                events.push(Event::TaskCompleted {
                    record: HistoryRecord {
                        title: entry.title.clone(),
                        duration_min: entry.duration_min,
                        color: entry.color.clone(),
                        completed_at: now,
                    },
                    at: now,
                });
            }
        }

        if self.is_last() {
            self.status = PlaybackStatus::Completed;
            self.transition_until = None;
            events.push(Event::SessionCompleted { at: now });
        } else {
            self.status = PlaybackStatus::Transition;
            self.transition_until = Some(now + Duration::seconds(TRANSITION_SECS));
            let next_title = self
                .playlist
                .get(self.index + 1)
                .map(|e| e.title.clone())
                .unwrap_or_default();
            events.push(Event::TransitionStarted {
                completed_index: self.index,
                next_title,
                at: now,
            });
        }
        events
    }

    fn advance(&mut self, now: DateTime<Utc>) -> Vec<Event> {
        let next = self.index + 1;
        let Some(entry) = self.playlist.get(next) else {
            // Cursor can never run past the playlist; treat as done.
            self.status = PlaybackStatus::Completed;
            self.transition_until = None;
            return Vec::new();
        };
        self.index = next;
        self.status = PlaybackStatus::Active;
        self.transition_until = None;
        self.end_at = now + Duration::minutes(entry.duration_min as i64);
        self.time_left_secs = (entry.duration_min * 60) as i64;
        vec![Event::EntryStarted {
            entry_index: next,
            title: entry.title.clone(),
            duration_min: entry.duration_min,
            at: now,
        }]
    }
}

fn ceil_secs(ms: i64) -> i64 {
    if ms <= 0 {
        0
    } else {
        (ms + 999) / 1000
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine_of(specs: &[(&str, u64)]) -> (PlaybackEngine, DateTime<Utc>) {
        let now = Utc::now();
        let (engine, _) = PlaybackEngine::start(Playlist::of_tasks(specs), now).unwrap();
        (engine, now)
    }

    #[test]
    fn empty_playlist_does_not_start() {
        let err = PlaybackEngine::start(Playlist::of_tasks(&[]), Utc::now()).unwrap_err();
        assert!(matches!(err, CoreError::EmptyTimeline));
    }

    #[test]
    fn countdown_is_anchored_to_end_timestamp() {
        let (mut engine, now) = engine_of(&[("Write", 25)]);
        assert_eq!(engine.time_left_secs(), 25 * 60);
        // A tick far in the future resynchronizes instead of drifting.
        engine.tick_at(now + Duration::seconds(100));
        assert_eq!(engine.time_left_secs(), 25 * 60 - 100);
        engine.tick_at(now + Duration::milliseconds(100_500));
        assert_eq!(engine.time_left_secs(), 25 * 60 - 100);
    }

    #[test]
    fn expiry_on_last_entry_completes_session_with_one_record() {
        let (mut engine, now) = engine_of(&[("Write", 1)]);
        let events = engine.tick_at(now + Duration::minutes(1));
        assert_eq!(engine.status(), PlaybackStatus::Completed);
        assert!(events
            .iter()
            .any(|e| matches!(e, Event::TaskCompleted { record, .. } if record.title == "Write")));
        assert!(events.iter().any(|e| matches!(e, Event::SessionCompleted { .. })));
        // No further ticks change state.
        assert!(engine.tick_at(now + Duration::minutes(2)).is_empty());
        assert_eq!(engine.status(), PlaybackStatus::Completed);
    }

    #[test]
    fn second_expiry_delivery_is_idempotent() {
        let (mut engine, now) = engine_of(&[("A", 1), ("B", 1)]);
        let expiry = now + Duration::minutes(1);
        let first = engine.tick_at(expiry);
        assert_eq!(engine.status(), PlaybackStatus::Transition);
        assert_eq!(
            first
                .iter()
                .filter(|e| matches!(e, Event::TaskCompleted { .. }))
                .count(),
            1
        );
        // Replayed expiry while the latch is set: no record, no advance.
        let second = engine.tick_at(expiry);
        assert!(second.is_empty());
        assert_eq!(engine.current_index(), 0);
    }

    #[test]
    fn transition_window_is_wall_clock_anchored() {
        let (mut engine, now) = engine_of(&[("A", 1), ("B", 2)]);
        let expiry = now + Duration::minutes(1);
        engine.tick_at(expiry);
        assert_eq!(engine.status(), PlaybackStatus::Transition);
        // One second in: still transitioning.
        assert!(engine.tick_at(expiry + Duration::seconds(1)).is_empty());
        // Past the window (even if ticks were missed entirely): advance.
        let resumed = expiry + Duration::seconds(TRANSITION_SECS + 7);
        let events = engine.tick_at(resumed);
        assert_eq!(engine.status(), PlaybackStatus::Active);
        assert_eq!(engine.current_index(), 1);
        assert!(matches!(events[0], Event::EntryStarted { entry_index: 1, .. }));
        assert_eq!(engine.end_at(), resumed + Duration::minutes(2));
    }

    #[test]
    fn break_entries_do_not_emit_history() {
        let playlist = {
            let mut entries = Playlist::of_tasks(&[("Write", 60)]).entries().to_vec();
            entries.push(super::super::playlist::PlaylistEntry {
                instance_id: "b".into(),
                title: "Micro-Break".into(),
                duration_min: 5,
                color: "gray".into(),
                kind: crate::model::TaskKind::Break,
            });
            Playlist::from_entries(entries)
        };
        let now = Utc::now();
        let (mut engine, _) = PlaybackEngine::start(playlist, now).unwrap();
        engine.tick_at(now + Duration::minutes(60));
        engine.tick_at(now + Duration::minutes(60) + Duration::seconds(TRANSITION_SECS));
        assert_eq!(engine.current_index(), 1);
        let events = engine.tick_at(now + Duration::minutes(70));
        assert!(!events.iter().any(|e| matches!(e, Event::TaskCompleted { .. })));
        assert!(events.iter().any(|e| matches!(e, Event::SessionCompleted { .. })));
    }

    #[test]
    fn stop_wins_over_a_pending_expiry() {
        let (mut engine, now) = engine_of(&[("Write", 1)]);
        let stop_event = engine.stop(now + Duration::seconds(59));
        assert!(matches!(stop_event, Some(Event::SessionStopped { .. })));
        assert_eq!(engine.status(), PlaybackStatus::Completed);
        // Expiry processed after the stop does nothing: no history record.
        let events = engine.tick_at(now + Duration::minutes(1));
        assert!(events.is_empty());
        // Stop is idempotent.
        assert!(engine.stop(now + Duration::minutes(1)).is_none());
    }

    #[test]
    fn display_seconds_round_up() {
        let (mut engine, now) = engine_of(&[("Write", 1)]);
        engine.tick_at(now + Duration::milliseconds(59_100));
        assert_eq!(engine.time_left_secs(), 1);
    }
}

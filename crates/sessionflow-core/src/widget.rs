//! Widget presentation state: a peekable viewport over the last pushed
//! snapshot.
//!
//! Pure presentation; nothing here feeds back into the engine except the
//! stop command the surface may send over the reverse channel. Peeked
//! entries are static strings from the last snapshot; no independent
//! timer runs for them.

use crate::session::{format_clock, WidgetSnapshot, WidgetStatus};

/// Whether the transparent host surface should forward pointer events
/// through itself or capture them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Passthrough {
    /// Surface is interactive; host stops forwarding pointer events.
    Capture,
    /// Host forwards all pointer events through the surface.
    Forward,
}

/// What the widget surface renders right now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetDisplay {
    pub label: &'static str,
    pub title: String,
    /// Live countdown for the current entry, or the peeked entry's
    /// precomputed start time.
    pub time_text: String,
}

#[derive(Debug, Clone)]
pub struct WidgetPresenter {
    snapshot: WidgetSnapshot,
    peek_index: usize,
    hovered: bool,
}

impl Default for WidgetPresenter {
    fn default() -> Self {
        Self::new()
    }
}

impl WidgetPresenter {
    pub fn new() -> Self {
        Self {
            snapshot: WidgetSnapshot::idle(),
            peek_index: 0,
            hovered: false,
        }
    }

    /// Accept a pushed snapshot, re-clamping the peek cursor against the
    /// new queue length.
    pub fn apply(&mut self, snapshot: WidgetSnapshot) {
        self.snapshot = snapshot;
        self.peek_index = self.clamp(self.peek_index);
    }

    fn clamp(&self, index: usize) -> usize {
        index.min(self.snapshot.queue.len().saturating_sub(1))
    }

    /// Scroll gesture: positive peeks forward, negative back toward the
    /// current entry. Always clamped, never out of bounds.
    pub fn scroll(&mut self, delta: i32) {
        if delta > 0 {
            self.peek_index = self.clamp(self.peek_index + 1);
        } else {
            self.peek_index = self.peek_index.saturating_sub(1);
        }
    }

    pub fn pointer_enter(&mut self) -> Passthrough {
        self.hovered = true;
        Passthrough::Capture
    }

    /// Leaving always snaps back to the current entry.
    pub fn pointer_leave(&mut self) -> Passthrough {
        self.hovered = false;
        self.peek_index = 0;
        Passthrough::Forward
    }

    pub fn peek_index(&self) -> usize {
        self.peek_index
    }

    pub fn status(&self) -> WidgetStatus {
        self.snapshot.status
    }

    /// Idle sentinel means render nothing.
    pub fn is_visible(&self) -> bool {
        self.snapshot.status != WidgetStatus::Idle
    }

    /// Expanded iff hovered or the session is transitioning/finished.
    pub fn is_expanded(&self) -> bool {
        self.hovered
            || matches!(
                self.snapshot.status,
                WidgetStatus::Transition | WidgetStatus::Completed
            )
    }

    pub fn display(&self) -> WidgetDisplay {
        let peeked = if self.peek_index > 0 {
            self.snapshot.queue.get(self.peek_index)
        } else {
            None
        };

        match (self.snapshot.status, peeked) {
            (WidgetStatus::Transition, _) => WidgetDisplay {
                label: "Completed",
                title: self.snapshot.title.clone(),
                time_text: "DONE!".into(),
            },
            (WidgetStatus::Completed, _) => WidgetDisplay {
                label: "Session",
                title: self.snapshot.title.clone(),
                time_text: "FINISH".into(),
            },
            (_, Some(entry)) => WidgetDisplay {
                label: "Up Next",
                title: entry.title.clone(),
                time_text: entry.start_time.clone().unwrap_or_else(|| "--:--".into()),
            },
            (_, None) => WidgetDisplay {
                label: "Working on",
                title: self.snapshot.title.clone(),
                time_text: format_clock(self.snapshot.time_left_secs),
            },
        }
    }
}

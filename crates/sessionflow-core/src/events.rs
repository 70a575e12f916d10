use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::HistoryRecord;

/// Every playback state change produces an Event.
/// The driver consumes these to fire audio cues, append history, and
/// refresh the pushed widget snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    SessionStarted {
        entry_index: usize,
        title: String,
        duration_min: u64,
        at: DateTime<Utc>,
    },
    /// The transition window elapsed and the next entry began counting.
    EntryStarted {
        entry_index: usize,
        title: String,
        duration_min: u64,
        at: DateTime<Utc>,
    },
    /// A non-break entry ran to expiry; append this record to history.
    TaskCompleted {
        record: HistoryRecord,
        at: DateTime<Utc>,
    },
    /// An entry expired with more entries remaining.
    TransitionStarted {
        completed_index: usize,
        next_title: String,
        at: DateTime<Utc>,
    },
    /// The last entry expired; the session is complete.
    SessionCompleted {
        at: DateTime<Utc>,
    },
    /// User- or widget-initiated stop; no history for an unexpired entry.
    SessionStopped {
        at: DateTime<Utc>,
    },
}

//! Session compilation and playback.

mod driver;
mod engine;
mod playlist;
mod view;

pub use driver::{SessionDriver, SessionHandle, WidgetCommand, DEFAULT_TICK};
pub use engine::{PlaybackEngine, PlaybackStatus, TRANSITION_SECS};
pub use playlist::{Playlist, PlaylistEntry, SMART_BREAK_MIN};
pub use view::{format_clock, QueueEntry, WidgetSnapshot, WidgetStatus};

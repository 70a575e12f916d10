//! # Sessionflow Core Library
//!
//! This library provides the core logic for the Sessionflow focus-session
//! planner. It implements a CLI-first philosophy where all operations are
//! available via a standalone CLI binary, with any GUI shell being a thin
//! layer over the same core library.
//!
//! ## Architecture
//!
//! - **Plan Board**: The hourly allocation store — backlog tasks dragged
//!   into 60-minute slots, templates, and the session length target
//! - **Session**: Playlist compilation (with smart breaks), a wall-clock
//!   playback engine that requires the caller to periodically invoke
//!   `tick()`, and an async driver that owns the engine and pushes
//!   widget snapshots over a watch channel
//! - **Widget**: Presentation state for the compact always-on-top widget
//! - **Storage**: SQLite-based persistence and TOML-based configuration
//!
//! ## Key Components
//!
//! - [`PlanBoard`]: Backlog, templates, and hour-slot allocations
//! - [`Playlist`]: Compiled ordered session timeline
//! - [`PlaybackEngine`]: Wall-clock playback state machine
//! - [`SessionDriver`]: Async ticker and snapshot channel
//! - [`Database`]: Plan, settings, and history persistence
//! - [`Config`]: Application configuration management

pub mod audio;
pub mod error;
pub mod events;
pub mod horizons;
pub mod model;
pub mod plan;
pub mod session;
pub mod stats;
pub mod storage;
pub mod widget;

pub use audio::{AudioService, Cue, NoopAudio};
pub use error::{ConfigError, CoreError, DatabaseError, Result};
pub use events::Event;
pub use horizons::{HorizonBoard, HorizonTask};
pub use model::{HistoryRecord, Settings, TaskKind, TaskRecord, Template};
pub use plan::{Allocation, DragSource, PlanBoard, MAX_TARGET_HOURS, SLOT_CAPACITY_MIN};
pub use session::{
    PlaybackEngine, PlaybackStatus, Playlist, PlaylistEntry, QueueEntry, SessionDriver,
    SessionHandle, WidgetSnapshot, WidgetStatus,
};
pub use stats::DayCell;
pub use storage::{Config, Database};
pub use widget::{Passthrough, WidgetPresenter};

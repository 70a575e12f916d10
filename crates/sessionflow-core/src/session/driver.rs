//! Session driver: owns a running engine and the cross-surface channels.
//!
//! One ticker task per session. Ticks and inbound widget commands are
//! serialized through a single `select!` loop, so a stop received in the
//! same tick window as an expiry wins if it is processed first. Snapshot
//! pushes are fire-and-forget over a `watch` channel; a closed or absent
//! receiver never affects engine state.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info};

use super::engine::PlaybackEngine;
use super::playlist::Playlist;
use super::view::{WidgetSnapshot, WidgetStatus};
use crate::audio::{AudioService, Cue};
use crate::error::Result;
use crate::events::Event;

/// Recommended tick granularity for a smooth countdown.
pub const DEFAULT_TICK: Duration = Duration::from_millis(200);

/// Commands the widget surface may send back into the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetCommand {
    /// Treated identically to a local user-initiated stop.
    Stop,
}

/// Spawns and supervises one playback session.
pub struct SessionDriver;

impl SessionDriver {
    /// Compile-side caller hands over a non-empty playlist; the driver
    /// starts the engine, switches ambient audio on when requested, and
    /// spawns the ticker.
    ///
    /// # Errors
    ///
    /// Returns [`crate::CoreError::EmptyTimeline`] without starting
    /// anything when the playlist is empty.
    pub fn start(
        playlist: Playlist,
        zen_mode: bool,
        tick: Duration,
        audio: Arc<dyn AudioService>,
    ) -> Result<SessionHandle> {
        let now = Utc::now();
        let (engine, started) = PlaybackEngine::start(playlist, now)?;
        info!(entries = engine.playlist().len(), "session started");

        if zen_mode {
            audio.set_ambient(true);
        }

        let (snapshot_tx, snapshot_rx) = watch::channel(WidgetSnapshot::project(&engine));
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let _ = event_tx.send(started);

        let task = tokio::spawn(run_loop(
            engine,
            snapshot_tx,
            command_rx,
            event_tx,
            audio,
            tick,
        ));

        Ok(SessionHandle {
            snapshots: snapshot_rx,
            events: event_rx,
            commands: command_tx,
            task,
        })
    }
}

/// Handle to a running session. Dropping it tears the ticker down and
/// pushes the idle sentinel.
pub struct SessionHandle {
    snapshots: watch::Receiver<WidgetSnapshot>,
    pub events: mpsc::UnboundedReceiver<Event>,
    commands: mpsc::UnboundedSender<WidgetCommand>,
    task: JoinHandle<()>,
}

impl SessionHandle {
    /// Subscribe to snapshot pushes.
    pub fn snapshots(&self) -> watch::Receiver<WidgetSnapshot> {
        self.snapshots.clone()
    }

    /// Sender half handed to the widget surface for the reverse channel.
    pub fn command_sender(&self) -> mpsc::UnboundedSender<WidgetCommand> {
        self.commands.clone()
    }

    /// Local user-initiated stop.
    pub fn stop(&self) {
        let _ = self.commands.send(WidgetCommand::Stop);
    }

    /// Stop (if still running) and wait for the ticker to wind down.
    pub async fn shutdown(self) {
        let _ = self.commands.send(WidgetCommand::Stop);
        let _ = self.task.await;
    }
}

async fn run_loop(
    mut engine: PlaybackEngine,
    snapshot_tx: watch::Sender<WidgetSnapshot>,
    mut command_rx: mpsc::UnboundedReceiver<WidgetCommand>,
    event_tx: mpsc::UnboundedSender<Event>,
    audio: Arc<dyn AudioService>,
    tick: Duration,
) {
    let mut interval = time::interval(tick);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut last_key: Option<(WidgetStatus, i64, usize)> = None;

    loop {
        tokio::select! {
            command = command_rx.recv() => {
                // `None` means the handle was dropped: same teardown path.
                if matches!(command, Some(WidgetCommand::Stop) | None) {
                    if let Some(event) = engine.stop(Utc::now()) {
                        audio.set_ambient(false);
                        let _ = event_tx.send(event);
                        info!("session stopped");
                    }
                    let _ = snapshot_tx.send(WidgetSnapshot::idle());
                    break;
                }
            }
            _ = interval.tick() => {
                let events = engine.tick();
                for event in events {
                    match &event {
                        Event::TransitionStarted { next_title, .. } => {
                            debug!(next = %next_title, "entry complete");
                            audio.cue(Cue::TaskComplete);
                        }
                        Event::SessionCompleted { .. } => {
                            info!("session complete");
                            audio.cue(Cue::SessionComplete);
                            audio.set_ambient(false);
                        }
                        _ => {}
                    }
                    let _ = event_tx.send(event);
                }

                let snapshot = WidgetSnapshot::project(&engine);
                let key = (snapshot.status, snapshot.time_left_secs, snapshot.queue.len());
                if last_key != Some(key) {
                    last_key = Some(key);
                    let _ = snapshot_tx.send(snapshot);
                }
            }
        }
    }
}

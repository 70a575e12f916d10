//! Session playback commands.
//!
//! `start` compiles the plan and drives playback in the foreground,
//! mirroring the widget line from the pushed snapshots. `status` is a
//! dry-run compile: it previews the playlist without starting anything.

use std::sync::Arc;
use std::time::Duration;

use clap::Subcommand;
use sessionflow_core::audio::NoopAudio;
use sessionflow_core::session::{format_clock, Playlist, SessionDriver, WidgetCommand, WidgetStatus};
use sessionflow_core::storage::{Config, Database};
use sessionflow_core::Event;

#[derive(Subcommand)]
pub enum SessionAction {
    /// Compile the plan and run playback in the foreground
    Start {
        /// Override zen mode for this session
        #[arg(long)]
        zen: bool,
    },
    /// Preview the compiled playlist without starting playback
    Status,
}

pub fn run(action: SessionAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let board = db.load_plan()?;
    let settings = db.load_settings()?;

    match action {
        SessionAction::Start { zen } => {
            let config = Config::load_or_default();
            let playlist = Playlist::compile(&board, settings.smart_breaks)?;
            let tick = Duration::from_millis(config.session.tick_ms.max(50));
            let zen_mode = zen || settings.zen_mode;

            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(run_session(&db, playlist, zen_mode, tick))?;
        }
        SessionAction::Status => {
            match Playlist::compile(&board, settings.smart_breaks) {
                Ok(playlist) => {
                    println!(
                        "{} entries, {} min total",
                        playlist.len(),
                        playlist.total_duration_min()
                    );
                    for entry in playlist.entries() {
                        let marker = if entry.is_break() { "break" } else { "task " };
                        println!("  [{marker}] {:>3} min  {}", entry.duration_min, entry.title);
                    }
                }
                Err(e) => println!("nothing to play: {e}"),
            }
        }
    }
    Ok(())
}

async fn run_session(
    db: &Database,
    playlist: Playlist,
    zen_mode: bool,
    tick: Duration,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut handle = SessionDriver::start(playlist, zen_mode, tick, Arc::new(NoopAudio))?;
    let mut snapshots = handle.snapshots();
    let commands = handle.command_sender();

    loop {
        tokio::select! {
            event = handle.events.recv() => {
                match event {
                    Some(Event::TaskCompleted { record, .. }) => {
                        db.append_history(&record)?;
                        println!("completed: {} ({} min)", record.title, record.duration_min);
                    }
                    Some(Event::SessionCompleted { .. }) => {
                        println!("session complete");
                    }
                    Some(Event::SessionStopped { .. }) | None => break,
                    Some(_) => {}
                }
            }
            changed = snapshots.changed() => {
                if changed.is_err() {
                    break;
                }
                let snap = snapshots.borrow_and_update().clone();
                match snap.status {
                    WidgetStatus::Active => {
                        println!("{}  {}", format_clock(snap.time_left_secs), snap.title);
                    }
                    WidgetStatus::Transition => println!("{}", snap.title),
                    WidgetStatus::Completed => {
                        println!("{}", snap.title);
                        break;
                    }
                    WidgetStatus::Idle => break,
                }
            }
            _ = tokio::signal::ctrl_c() => {
                let _ = commands.send(WidgetCommand::Stop);
            }
        }
    }

    // Completion records can still be queued behind the last snapshot.
    while let Ok(event) = handle.events.try_recv() {
        if let Event::TaskCompleted { record, .. } = event {
            db.append_history(&record)?;
            println!("completed: {} ({} min)", record.title, record.duration_min);
        }
    }

    handle.shutdown().await;
    Ok(())
}

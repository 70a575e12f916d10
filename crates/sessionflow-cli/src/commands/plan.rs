//! Hourly timeline editing commands.

use clap::Subcommand;
use sessionflow_core::plan::DragSource;
use sessionflow_core::storage::Database;

#[derive(Subcommand)]
pub enum PlanAction {
    /// Show the hourly timeline
    Show,
    /// Drop a backlog task or template into an hour slot
    Drop {
        /// Hour slot index (0-based)
        slot: usize,
        /// Backlog task ID
        #[arg(long, conflicts_with = "template")]
        task: Option<String>,
        /// Template ID
        #[arg(long)]
        template: Option<String>,
    },
    /// Remove an allocation, returning its minutes to the backlog
    Remove {
        /// Hour slot index
        slot: usize,
        /// Allocation instance ID
        instance: String,
    },
    /// Clear all slots, returning everything to the backlog
    Clear,
    /// Set the session length target in hours
    Hours {
        /// Target hours (1-12)
        hours: u64,
    },
}

pub fn run(action: PlanAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let mut board = db.load_plan()?;

    match action {
        PlanAction::Show => {
            println!("target hours: {}", board.target_hours);
            for slot in 0..board.target_hours as usize {
                let used = board.slot_used_min(slot);
                println!("slot {slot:>2} ({used:>2}/60 min):");
                for alloc in board.allocations(slot) {
                    println!(
                        "  {} {:>3} min  {}",
                        alloc.instance_id, alloc.duration_min, alloc.title
                    );
                }
            }
        }
        PlanAction::Drop {
            slot,
            task,
            template,
        } => {
            let source = match (task, template) {
                (Some(id), _) => DragSource::Backlog(id),
                (None, Some(id)) => DragSource::Template(id),
                (None, None) => {
                    eprintln!("pass --task or --template");
                    std::process::exit(1);
                }
            };
            match board.drop_onto_slot(source, slot) {
                Some(instance) => println!("Placed: {instance}"),
                None => println!("Nothing placed (unknown id or full slot)"),
            }
        }
        PlanAction::Remove { slot, instance } => {
            board.unschedule(slot, &instance);
            println!("ok");
        }
        PlanAction::Clear => {
            board.clear_slots();
            println!("ok");
        }
        PlanAction::Hours { hours } => {
            board.set_target_hours(hours);
            println!("target hours: {}", board.target_hours);
        }
    }

    db.save_plan(&board)?;
    Ok(())
}

//! Far-future bucket commands.

use clap::Subcommand;
use sessionflow_core::horizons::HorizonBoard;
use sessionflow_core::storage::Database;

#[derive(Subcommand)]
pub enum HorizonsAction {
    /// Add a task to a bucket
    Add {
        /// Task title
        title: String,
        /// Bucket key: "later" or a month label such as "August 2026";
        /// defaults to the current month
        #[arg(long)]
        bucket: Option<String>,
    },
    /// List the planning buckets
    List,
    /// Move a bucketed task into the backlog
    Promote {
        /// Bucket key
        bucket: String,
        /// Task ID
        id: String,
    },
    /// Remove a bucketed task
    Remove {
        /// Bucket key
        bucket: String,
        /// Task ID
        id: String,
    },
}

pub fn run(action: HorizonsAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let mut horizons = db.load_horizons()?;

    match action {
        HorizonsAction::Add { title, bucket } => {
            let bucket = bucket.unwrap_or_else(|| sessionflow_core::horizons::month_key(0));
            match horizons.add(&bucket, &title) {
                Some(task) => println!("Added to {bucket}: {}", task.id),
                None => {
                    eprintln!("title must not be blank");
                    std::process::exit(1);
                }
            }
        }
        HorizonsAction::List => {
            for (key, label) in HorizonBoard::bucket_keys() {
                println!("{label} ({key}):");
                for task in horizons.tasks(&key) {
                    println!("  {}  {}", task.id, task.title);
                }
            }
        }
        HorizonsAction::Promote { bucket, id } => {
            let mut board = db.load_plan()?;
            if horizons.promote(&bucket, &id, &mut board) {
                db.save_plan(&board)?;
                println!("Promoted to backlog: {id}");
            } else {
                println!("Task not found: {id}");
            }
        }
        HorizonsAction::Remove { bucket, id } => {
            if horizons.remove(&bucket, &id) {
                println!("Removed: {id}");
            } else {
                println!("Task not found: {id}");
            }
        }
    }

    db.save_horizons(&horizons)?;
    Ok(())
}

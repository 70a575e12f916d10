//! Backlog and template management commands.

use clap::Subcommand;
use sessionflow_core::storage::Database;

#[derive(Subcommand)]
pub enum TaskAction {
    /// Add a task to the backlog
    Add {
        /// Task title; an exact template-title match adopts that template
        title: String,
    },
    /// List backlog tasks
    List,
    /// Set or nudge a task's duration
    Duration {
        /// Task ID
        id: String,
        /// Exact duration in minutes
        #[arg(long, conflicts_with = "delta")]
        minutes: Option<String>,
        /// Signed adjustment in minutes (clamped at 1)
        #[arg(long, allow_hyphen_values = true)]
        delta: Option<i64>,
    },
    /// Delete a backlog task
    Delete {
        /// Task ID
        id: String,
    },
    /// Template management
    Template {
        #[command(subcommand)]
        action: TemplateAction,
    },
}

#[derive(Subcommand)]
pub enum TemplateAction {
    /// Save a reusable template
    Save {
        /// Template title (duplicates are rejected)
        title: String,
        /// Duration in minutes
        #[arg(long, default_value = "60")]
        minutes: u64,
        /// Color tag
        #[arg(long, default_value = "emerald")]
        color: String,
    },
    /// List templates, optionally filtered by a title fragment
    List {
        /// Case-insensitive title filter
        #[arg(long)]
        matching: Option<String>,
    },
    /// Delete a template
    Delete {
        /// Template ID
        id: String,
    },
}

pub fn run(action: TaskAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let mut board = db.load_plan()?;

    match action {
        TaskAction::Add { title } => match board.add_task(&title) {
            Some(task) => {
                println!("Task added: {}", task.id);
                println!("{}", serde_json::to_string_pretty(task)?);
            }
            None => {
                eprintln!("title must not be blank");
                std::process::exit(1);
            }
        },
        TaskAction::List => {
            println!("{}", serde_json::to_string_pretty(&board.backlog)?);
        }
        TaskAction::Duration { id, minutes, delta } => {
            match (minutes, delta) {
                (Some(input), _) => board.set_duration(&id, &input)?,
                (None, Some(delta)) => board.adjust_duration(&id, delta),
                (None, None) => {
                    eprintln!("pass --minutes or --delta");
                    std::process::exit(1);
                }
            }
            match board.backlog.iter().find(|t| t.id == id) {
                Some(task) => println!("{}", serde_json::to_string_pretty(task)?),
                None => println!("Task not found: {id}"),
            }
        }
        TaskAction::Delete { id } => {
            if board.delete_task(&id) {
                println!("Task deleted: {id}");
            } else {
                println!("Task not found: {id}");
            }
        }
        TaskAction::Template { action } => match action {
            TemplateAction::Save {
                title,
                minutes,
                color,
            } => {
                let template = board.save_template(&title, minutes, &color)?;
                println!("Template saved: {}", template.id);
            }
            TemplateAction::List { matching } => match matching {
                Some(fragment) => {
                    println!("{}", serde_json::to_string_pretty(&board.suggestions(&fragment))?)
                }
                None => println!("{}", serde_json::to_string_pretty(&board.templates)?),
            },
            TemplateAction::Delete { id } => {
                if board.delete_template(&id) {
                    println!("Template deleted: {id}");
                } else {
                    println!("Template not found: {id}");
                }
            }
        },
    }

    db.save_plan(&board)?;
    Ok(())
}

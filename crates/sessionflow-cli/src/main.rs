use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "sessionflow-cli", version, about = "Sessionflow CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Backlog and template management
    Task {
        #[command(subcommand)]
        action: commands::task::TaskAction,
    },
    /// Hourly timeline editing
    Plan {
        #[command(subcommand)]
        action: commands::plan::PlanAction,
    },
    /// Session playback
    Session {
        #[command(subcommand)]
        action: commands::session::SessionAction,
    },
    /// Far-future task buckets
    Horizons {
        #[command(subcommand)]
        action: commands::horizons::HorizonsAction,
    },
    /// Focus analytics
    Stats {
        #[command(subcommand)]
        action: commands::stats::StatsAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Persisted user settings
    Settings {
        #[command(subcommand)]
        action: commands::settings::SettingsAction,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Task { action } => commands::task::run(action),
        Commands::Plan { action } => commands::plan::run(action),
        Commands::Session { action } => commands::session::run(action),
        Commands::Horizons { action } => commands::horizons::run(action),
        Commands::Stats { action } => commands::stats::run(action),
        Commands::Config { action } => commands::config::run(action),
        Commands::Settings { action } => commands::settings::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

pub mod config;
pub mod horizons;
pub mod plan;
pub mod session;
pub mod settings;
pub mod stats;
pub mod task;

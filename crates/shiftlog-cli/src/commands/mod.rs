//! CLI subcommand implementations.

pub mod early_exits;
pub mod events;
pub mod sessions;
pub mod show_config;
pub mod summary;
pub mod util;

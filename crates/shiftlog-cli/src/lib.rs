//! Badge-log shift report CLI library.
//!
//! Reads raw badge rows, hands them to `shiftlog-core` and renders the
//! resulting tables.

mod cli;
pub mod commands;
mod config;
pub mod input;
pub mod render;

pub use cli::{Cli, Commands, ReportArgs};
pub use config::{Config, FilterConfig};
pub use input::InputFormat;

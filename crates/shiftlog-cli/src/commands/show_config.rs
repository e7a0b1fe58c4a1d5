//! `shiftlog config`: print the effective configuration.

use anyhow::Result;

use crate::Config;

pub fn run(config: &Config) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(config)?);
    Ok(())
}

//! `hauler config` – show the config path and resolved contents.

use anyhow::Result;
use hauler_core::config::{self, HaulerConfig};

pub fn run_config(cfg: &HaulerConfig) -> Result<()> {
    let path = config::config_path()?;
    println!("# {}", path.display());
    print!("{}", toml::to_string_pretty(cfg)?);
    Ok(())
}

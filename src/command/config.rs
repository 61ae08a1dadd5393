//! Prints the effective configuration.
use crate::{cli::ConfigArgs, config::Config, result::Result};

/// Execute config command.
pub fn execute(config_args: &ConfigArgs, config: &Config) -> Result<()> {
    println!("{}", config.render(config_args.output)?);
    Ok(())
}

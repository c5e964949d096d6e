use anyhow::Result;
use clap::Command;
use clap_complete::{Shell, generate};
use std::io;

/// Generate a completion script for the given shell on stdout
pub fn execute(shell: Shell, cmd: &mut Command) -> Result<()> {
    let bin_name = cmd.get_name().to_string();
    tracing::debug!("Generating {} completions for {}", shell, bin_name);
    generate(shell, cmd, bin_name, &mut io::stdout());
    Ok(())
}

//! Shell completion generation.

use anyhow::Result;
use clap::CommandFactory;
use clap_complete::Shell;

use diagsift::cli::Cli;

/// Print completions for `shell` to stdout.
#[cfg(not(tarpaulin_include))]
pub fn handle(shell: Shell) -> Result<()> {
    let mut cmd = Cli::command();
    clap_complete::generate(shell, &mut cmd, "diagsift", &mut std::io::stdout());
    Ok(())
}

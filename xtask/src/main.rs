//! Development tasks for diagsift.
//!
//! Usage: `cargo run -p xtask -- man [--out-dir <dir>]`

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "xtask")]
struct Xtask {
    #[command(subcommand)]
    task: Task,
}

#[derive(Subcommand)]
enum Task {
    /// Generate man pages for diagsift and its subcommands
    Man {
        /// Output directory
        #[arg(long, default_value = "target/man")]
        out_dir: PathBuf,
    },
}

fn main() -> Result<()> {
    match Xtask::parse().task {
        Task::Man { out_dir } => generate_man_pages(&out_dir),
    }
}

fn generate_man_pages(out_dir: &Path) -> Result<()> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create {}", out_dir.display()))?;

    let cmd = diagsift::cli::Cli::command();
    write_page(&cmd, out_dir, "diagsift")?;

    for sub in cmd.get_subcommands() {
        let name = format!("diagsift-{}", sub.get_name());
        write_page(sub, out_dir, &name)?;
    }

    println!("Man pages written to {}", out_dir.display());
    Ok(())
}

fn write_page(cmd: &clap::Command, out_dir: &Path, name: &str) -> Result<()> {
    let mut buffer = Vec::new();
    clap_mangen::Man::new(cmd.clone())
        .render(&mut buffer)
        .with_context(|| format!("Failed to render man page for {}", name))?;

    let path = out_dir.join(format!("{}.1", name));
    fs::write(&path, buffer).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

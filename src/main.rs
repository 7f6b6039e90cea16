//! diagsift command-line entry point.

mod commands;

use anyhow::{Context, Result};
use clap::Parser;

use diagsift::cli::{AnalyzeCommands, Cli, Commands, ConfigCommands};
use diagsift::theme::current_theme;
use diagsift::{logging, Config};

#[cfg(not(tarpaulin_include))]
fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(err) = run(cli) {
        let theme = current_theme();
        eprintln!("{} {:#}", theme.error_text("Error:"), err);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Completions { shell } => commands::completions::handle(shell),
        Commands::Config(cmd) => match cmd {
            ConfigCommands::Show => commands::config::handle_show(),
            ConfigCommands::Edit => commands::config::handle_edit(),
            ConfigCommands::Migrate { yes } => commands::config::handle_migrate(yes),
        },
        Commands::Analyze(cmd) => {
            let config = load_config()?;
            match cmd {
                AnalyzeCommands::Linux {
                    target,
                    file,
                    measure,
                    jobs,
                    log_dir,
                } => commands::analyze::handle_linux(
                    &config,
                    commands::analyze::LinuxArgs {
                        target,
                        file,
                        measure,
                        jobs,
                        log_dir,
                    },
                ),
                AnalyzeCommands::Test { target, jobs } => {
                    commands::analyze::handle_test(&config, &target, jobs)
                }
            }
        }
        Commands::CountWarning { logfile, json } => {
            let config = load_config()?;
            commands::count::handle_warning(&config, &logfile, json)
        }
        Commands::CountTime { logfile, json } => commands::count::handle_time(&logfile, json),
    }
}

fn load_config() -> Result<Config> {
    Config::load().context("Failed to load configuration")
}

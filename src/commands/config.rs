//! Config subcommands handler

use anyhow::Result;
use std::fs;
use std::io::{self, BufRead, Write};

use diagsift::config::migrate_config;
use diagsift::theme::{ansi, current_theme};
use diagsift::Config;

/// Show the effective configuration (file plus environment) as TOML.
#[cfg(not(tarpaulin_include))]
pub fn handle_show() -> Result<()> {
    let config = Config::load()?;
    let theme = current_theme();
    println!(
        "{}",
        theme.secondary_text(&format!("# {}", Config::config_path()?.display()))
    );
    println!("{}", theme.primary_text(&toml::to_string_pretty(&config)?));
    Ok(())
}

/// Open the config file in `$EDITOR` (default `vi`), creating it first.
#[cfg(not(tarpaulin_include))]
pub fn handle_edit() -> Result<()> {
    let config_path = Config::config_path()?;
    let theme = current_theme();

    if !config_path.exists() {
        let config = Config::default();
        config.save()?;
    }

    let editor = std::env::var("EDITOR").unwrap_or_else(|_| "vi".to_string());

    println!(
        "{}",
        theme.primary_text(&format!(
            "Opening {} with {}",
            config_path.display(),
            editor
        ))
    );

    let status = std::process::Command::new(&editor)
        .arg(&config_path)
        .status()
        .map_err(|e| anyhow::anyhow!("Failed to open editor: {}", e))?;
    if !status.success() {
        anyhow::bail!("{} exited with {}", editor, status);
    }

    Config::from_file(&config_path)
        .map_err(|e| anyhow::anyhow!("Config no longer parses after editing: {}", e))?;

    Ok(())
}

/// Add fields missing from the config file.
///
/// Shows the added lines and asks before writing unless `yes` is set.
#[cfg(not(tarpaulin_include))]
pub fn handle_migrate(yes: bool) -> Result<()> {
    let theme = current_theme();
    let config_path = Config::config_path()?;
    let file_exists = config_path.exists();

    let content = if file_exists {
        fs::read_to_string(&config_path)?
    } else {
        String::new()
    };
    let result = migrate_config(&content)?;

    if !result.has_changes() {
        println!("{}", theme.primary_text("Config is already up to date."));
        return Ok(());
    }

    let question = if file_exists {
        println!(
            "{}",
            theme.primary_text(&format!(
                "Found {} missing field(s), {} new section(s):",
                result.added_fields.len(),
                result.sections_added.len()
            ))
        );
        format!("Apply these changes to {}?", config_path.display())
    } else {
        println!(
            "{}",
            theme.primary_text("No config file yet, it will be created with defaults:")
        );
        format!("Create {}?", config_path.display())
    };
    println!();
    print_additions(&result.content, &result.added_fields);
    println!();

    if !yes && !prompt_confirmation(&question)? {
        println!("{}", theme.primary_text("No changes made."));
        return Ok(());
    }

    if let Some(parent) = config_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&config_path, &result.content)?;
    println!(
        "{}",
        theme.success_text(&format!("Wrote {}", config_path.display()))
    );
    Ok(())
}

/// Print each added `section.key` as a green `+` line under its section.
fn print_additions(new_content: &str, added_fields: &[String]) {
    let mut section = "";
    let mut header_printed = false;

    for line in new_content.lines() {
        let trimmed = line.trim();
        if trimmed.starts_with('[') && trimmed.ends_with(']') {
            section = &trimmed[1..trimmed.len() - 1];
            header_printed = false;
            continue;
        }

        let Some((key, _)) = trimmed.split_once('=') else {
            continue;
        };
        let field = format!("{}.{}", section, key.trim());
        if !added_fields.contains(&field) {
            continue;
        }

        if !header_printed {
            println!("  [{}]", section);
            header_printed = true;
        }
        println!("{}+ {}{}", ansi::GREEN, line, ansi::RESET);
    }
}

/// Ask a yes/no question. Non-interactive stdin counts as "no".
fn prompt_confirmation(message: &str) -> Result<bool> {
    let theme = current_theme();

    if !atty::is(atty::Stream::Stdin) {
        println!(
            "{}",
            theme.secondary_text("stdin is not a terminal; rerun with --yes to apply")
        );
        return Ok(false);
    }

    print!("{} [y/N] ", theme.primary_text(message));
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().lock().read_line(&mut input)?;

    let response = input.trim().to_lowercase();
    Ok(response == "y" || response == "yes")
}

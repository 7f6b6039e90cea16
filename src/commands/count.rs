//! count-warning and count-time handlers.

use std::path::Path;

use anyhow::Result;

use diagsift::stats::{TimeSamples, WarningCounter};
use diagsift::theme::current_theme;
use diagsift::Config;

/// Print the warning label histogram of `logfile`.
pub fn handle_warning(config: &Config, logfile: &Path, json: bool) -> Result<()> {
    let mut counter = WarningCounter::new(config.reduce.delimiter.clone());
    counter.observe_file(logfile)?;
    let report = counter.report();

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let theme = current_theme();
    for entry in &report.counts {
        println!("{}: {}", theme.accent_text(&entry.label), entry.count);
    }
    println!("{}", theme.primary_text(&format!("total: {}", report.total)));
    if report.malformed > 0 {
        println!(
            "{}",
            theme.warning_text(&format!("malformed lines skipped: {}", report.malformed))
        );
    }
    Ok(())
}

/// Print the 50th/90th/99th percentile analysis times in `logfile`.
pub fn handle_time(logfile: &Path, json: bool) -> Result<()> {
    let mut samples = TimeSamples::new();
    samples.observe_file(logfile)?;
    let summary = samples.summary(&logfile.display().to_string())?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    let theme = current_theme();
    print!("{}", summary.render());
    let skipped = summary.not_numeric + summary.non_positive;
    if skipped > 0 {
        println!(
            "{}",
            theme.secondary_text(&format!(
                "skipped {} line(s): {} without a numeric value, {} zero or negative",
                skipped, summary.not_numeric, summary.non_positive
            ))
        );
    }
    Ok(())
}

//! analyze linux / analyze test handlers.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::Local;
use humansize::{format_size, BINARY};
use rayon::prelude::*;

use diagsift::aggregate::discover_c_sources;
use diagsift::driver::{
    BuildDriver, BuildOutput, BuildRequest, DriverError, Interrupt, KernelBuild, SingleFileBuild,
};
use diagsift::files::{timestamp_stem, ReportWriter};
use diagsift::theme::current_theme;
use diagsift::{Aggregator, Config, Origin, RawStream, Reducer};

/// Flags of `analyze linux`, unresolved against the config.
#[derive(Debug, Clone, Default)]
pub struct LinuxArgs {
    pub target: Option<PathBuf>,
    pub file: Option<String>,
    pub measure: bool,
    pub jobs: Option<usize>,
    pub log_dir: Option<PathBuf>,
}

/// Build the kernel tree with the detector loaded and write the reports.
#[cfg(not(tarpaulin_include))]
pub fn handle_linux(config: &Config, args: LinuxArgs) -> Result<()> {
    let theme = current_theme();
    let target = args.target.unwrap_or_else(|| config.paths.target_root.clone());
    let log_dir = args.log_dir.unwrap_or_else(|| config.paths.log_dir.clone());
    let jobs = args.jobs.unwrap_or_else(|| config.jobs());

    let stem = timestamp_stem(&Local::now(), &config.report.timestamp_format)?;
    let writer = ReportWriter::new(log_dir, stem);
    writer.prepare()?;

    let mut make_flags = Vec::new();
    if let Some(object) = &args.file {
        remove_stale_object(&target.join(object))?;
        make_flags.push(object.clone());
    }

    let driver = KernelBuild::from_config(&config.build);
    let request = BuildRequest::new(&target)
        .jobs(jobs)
        .compiler_flags(config.instrumentation_flags(args.measure))
        .make_flags(make_flags);
    let command = driver.command(&request).join(" ");

    let interrupt = Interrupt::install()?;
    let (primary, spawn_failure) = match driver.run(&request) {
        Ok(output) => {
            interrupt.check()?;
            report_build_status(&output);
            writer.write_raw(&config.reduce.primary_log_name, &output.stderr)?;
            println!(
                "{} {:.2?}",
                theme.secondary_text("Runtime:"),
                output.duration
            );
            (RawStream::from_bytes(Origin::Primary, &output.stderr), None)
        }
        Err(err @ (DriverError::NotAvailable { .. } | DriverError::Spawn { .. })) => {
            tracing::warn!(error = %err, "build did not run, reducing auxiliary logs only");
            eprintln!("{} {}", theme.warning_text("Warning:"), err);
            (RawStream::from_text(Origin::Primary, ""), Some(err))
        }
        Err(err) => return Err(err.into()),
    };
    println!("{} {}", theme.secondary_text("Command:"), command);

    let aggregate = Aggregator::new(&config.reduce)
        .aggregate(primary, &target)
        .with_context(|| format!("Failed to collect logs under {}", target.display()))?;

    let report_path = writer.write_report(&aggregate.report_text())?;
    print_written(&report_path);
    if args.measure {
        let measure_path = writer.write_measure(&aggregate.measure_text())?;
        print_written(&measure_path);
    }

    println!(
        "{} {} block(s) kept, {} duplicate(s) dropped, {} source(s)",
        theme.secondary_text("Blocks:"),
        aggregate.report.len(),
        aggregate.dropped_blocks,
        aggregate.sources.len()
    );
    if aggregate.skipped_sources > 0 {
        println!(
            "{}",
            theme.warning_text(&format!(
                "{} auxiliary log(s) could not be read",
                aggregate.skipped_sources
            ))
        );
    }

    if let Some(err) = spawn_failure {
        return Err(err.into());
    }
    Ok(())
}

/// Compile each `.c` file under `target` on its own and print the
/// deduplicated diagnostics per file.
#[cfg(not(tarpaulin_include))]
pub fn handle_test(config: &Config, target: &Path, jobs: Option<usize>) -> Result<()> {
    let theme = current_theme();
    let sources = discover_c_sources(target)?;
    println!("{}", theme.primary_text(&format!("Found {} tests", sources.len())));
    if sources.is_empty() {
        return Ok(());
    }

    let driver = SingleFileBuild::from_config(&config.build);
    if !driver.is_available() {
        bail!("{} is not installed or not on PATH", driver.program());
    }

    let flags = config.instrumentation_flags(false);
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(jobs.unwrap_or_else(|| config.jobs()).max(1))
        .build()
        .context("Failed to start compile workers")?;

    let results: Vec<(PathBuf, Result<BuildOutput, DriverError>)> = pool.install(|| {
        sources
            .par_iter()
            .map(|source| {
                let request = BuildRequest::new(source).compiler_flags(flags.clone());
                (source.clone(), driver.run(&request))
            })
            .collect()
    });

    let reducer = Reducer::new(config.reduce.delimiter.clone());
    let mut failures = 0;
    for (source, result) in results {
        match result {
            Ok(output) => {
                let reduced = reducer.reduce_text(&output.stderr_text());
                if reduced.is_empty() {
                    continue;
                }
                println!("{}", theme.accent_text(&source.display().to_string()));
                print!("{}", reduced.render());
            }
            Err(err) => {
                failures += 1;
                eprintln!(
                    "{} {}: {}",
                    theme.error_text("Failed:"),
                    source.display(),
                    err
                );
            }
        }
    }

    if failures > 0 {
        bail!("{} of {} file(s) could not be compiled", failures, sources.len());
    }
    Ok(())
}

/// Delete an object so make rebuilds it.
fn remove_stale_object(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => {
            tracing::info!(path = %path.display(), "removed stale object");
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e).with_context(|| format!("Failed to remove {}", path.display())),
    }
}

fn report_build_status(output: &BuildOutput) {
    if output.success() {
        return;
    }
    let theme = current_theme();
    let status = match output.exit_code {
        Some(code) => format!("exit code {}", code),
        None => "a signal".to_string(),
    };
    tracing::warn!(exit_code = ?output.exit_code, "build failed");
    eprintln!(
        "{} build ended with {}, reducing what it produced",
        theme.warning_text("Warning:"),
        status
    );
}

fn print_written(path: &Path) {
    let theme = current_theme();
    let size = fs::metadata(path).map(|m| m.len()).unwrap_or(0);
    println!(
        "{} {} ({})",
        theme.success_text("Wrote"),
        theme.accent_text(&path.display().to_string()),
        format_size(size, BINARY)
    );
}

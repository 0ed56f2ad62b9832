//! The `scan` and `inject` subcommands.
//!
//! Each map is handled on its own: a failure is logged and counted, and the
//! remaining maps still run.

use std::borrow::Cow;
use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use jassguard_core::{
    discover, inject, inspect_script, open_source, scan, update_script, Config, InjectionPack,
    RuleCatalog, ScanReport,
};

use crate::cli::{InjectArgs, ScanArgs};

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error(transparent)]
    Core(#[from] jassguard_core::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("no injection pack given; pass --pack or set pack_dir")]
    NoPack,
}

/// How many maps went through and how many failed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub processed: usize,
    pub failed: usize,
}

impl RunSummary {
    fn record<T>(&mut self, path: &Utf8Path, result: jassguard_core::Result<T>) -> Option<T> {
        match result {
            Ok(v) => {
                self.processed += 1;
                Some(v)
            }
            Err(err) => {
                self.failed += 1;
                tracing::error!(%path, %err, "map failed");
                None
            }
        }
    }
}

fn targets(paths: Vec<Utf8PathBuf>, config: &Config) -> Result<Vec<Utf8PathBuf>, CommandError> {
    if !paths.is_empty() {
        return Ok(paths);
    }
    Ok(discover(
        &config.input_dir,
        &config.filter,
        config.check_subfolders,
    )?)
}

fn report_file(dir: &Utf8Path, name: &str, suffix: &str) -> Utf8PathBuf {
    dir.join(format!("{name}_{suffix}.txt"))
}

pub fn run_scan(args: ScanArgs, config: &Config) -> Result<RunSummary, CommandError> {
    let catalog = match args.rules.as_ref().or(config.rules.as_ref()) {
        Some(path) => Cow::Owned(RuleCatalog::load(path)?),
        None => Cow::Borrowed(RuleCatalog::builtin()),
    };
    let output = args.output.unwrap_or_else(|| config.output_dir.clone());
    fs::create_dir_all(&output)?;

    let maps = targets(args.paths, config)?;
    tracing::info!(maps = maps.len(), rules = catalog.len(), %output, "scanning");

    let mut summary = RunSummary::default();
    for path in &maps {
        let result = open_source(path).and_then(|source| {
            inspect_script(source.as_ref(), |search, name| {
                let report = scan(search, &catalog)?;
                fs::write(report_file(&output, name, "J"), search.text())?;
                fs::write(report_file(&output, name, "JSus"), report.render_suspicious())?;
                Ok((name.to_owned(), report))
            })
        });
        if let Some((name, report)) = summary.record(path, result) {
            print_report(&name, &report);
        }
    }
    Ok(summary)
}

fn print_report(name: &str, report: &ScanReport) {
    if report.is_clean() {
        println!("{name}: clean");
        return;
    }
    println!("{name}:");
    for warning in report.warnings() {
        println!("  {warning}");
    }
}

pub fn run_inject(args: InjectArgs, config: &Config) -> Result<RunSummary, CommandError> {
    let pack_dir = args
        .pack
        .as_ref()
        .or(config.pack_dir.as_ref())
        .ok_or(CommandError::NoPack)?;
    let pack = InjectionPack::load(pack_dir)?;
    let verify = config.create_verification_files && !args.no_verify;
    let output = args.output.unwrap_or_else(|| config.output_dir.clone());
    if verify {
        fs::create_dir_all(&output)?;
    }

    let maps = targets(args.paths, config)?;
    tracing::info!(maps = maps.len(), %pack_dir, verify, "injecting");

    let mut summary = RunSummary::default();
    for path in &maps {
        let result = open_source(path).and_then(|source| {
            let outcome = update_script(source.as_ref(), |search, _| inject(search, &pack))?;
            if verify {
                fs::write(report_file(&output, source.name(), "PreJ"), &outcome.before)?;
                fs::write(report_file(&output, source.name(), "PostJ"), &outcome.after)?;
            }
            Ok((source.name().to_owned(), outcome.diff.stats))
        });
        if let Some((name, stats)) = summary.record(path, result) {
            println!(
                "{name}: +{} -{} lines in {} regions",
                stats.lines_added, stats.lines_removed, stats.regions_changed
            );
        }
    }
    Ok(summary)
}

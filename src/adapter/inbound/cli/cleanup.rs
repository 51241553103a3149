//! Handler for `cleanup-db`.

use std::path::Path;

use indicatif::ProgressBar;
use serde_json::{json, Value};
use tabled::{Table, Tabled};

use crate::adapter::inbound::cli::command::CleanupCli;
use crate::adapter::inbound::cli::{output, paths};
use crate::adapter::outbound::fs::backup::FsBackupVault;
use crate::adapter::outbound::sqlite::store::SqliteCleanupStore;
use crate::application::sanitize::service::Sanitizer;
use crate::domain::cleanup::{CleanupStep, Progress};
use crate::domain::report::{
    format_bytes, CleanupReport, DryRunReport, RollbackReport, SanitizeOutcome,
};
use crate::domain::table::{display_name, TableCounts};
use crate::infrastructure::config::settings::Config;

const TITLE: &str = "Phobos Bot Database Cleanup";

#[derive(Tabled)]
struct CountRow {
    #[tabled(rename = "Table")]
    table: &'static str,
    #[tabled(rename = "Rows")]
    rows: i64,
}

#[derive(Tabled)]
struct ComparisonRow {
    #[tabled(rename = "Table")]
    table: &'static str,
    #[tabled(rename = "Before")]
    before: i64,
    #[tabled(rename = "After")]
    after: i64,
    #[tabled(rename = "Removed")]
    removed: i64,
}

/// Run the sanitizer and return the process exit status.
pub fn execute(cli: &CleanupCli, config: &Config) -> u8 {
    let base = paths::base_dir();
    let database = paths::choose(
        cli.db.as_deref(),
        config.sanitizer.database.as_deref(),
        paths::default_database(&base),
    );
    let backup_dir = paths::choose(
        cli.backup_dir.as_deref(),
        config.sanitizer.backup_dir.as_deref(),
        paths::default_backup_dir(&base),
    );

    let sanitizer = Sanitizer::new(&database, FsBackupVault::new(&backup_dir));

    if !output::is_json() {
        output::header(TITLE, env!("CARGO_PKG_VERSION"));
        output::field("Database", database.display());
        output::field("Backup directory", backup_dir.display());
    }

    if cli.dry_run {
        return match sanitizer.preview::<SqliteCleanupStore>() {
            Ok(report) => {
                show_dry_run(&report);
                0
            }
            Err(e) => fail(&e.to_string()),
        };
    }

    if !output::is_json() {
        output::section("Creating backup");
    }
    let json = output::is_json();
    let mut compacting = None;
    let outcome = sanitizer.run::<SqliteCleanupStore>(&mut |event| {
        if !json {
            show_progress(&event, &mut compacting);
        }
    });
    if let Some(spinner) = compacting.take() {
        output::spinner_success(&spinner, "Space reclaimed");
    }

    match outcome {
        Ok(SanitizeOutcome::Completed(report)) => {
            show_completed(&report, &database);
            0
        }
        Ok(SanitizeOutcome::RolledBack(report)) => {
            show_rolled_back(&report, &database);
            1
        }
        Err(e) => fail(&e.to_string()),
    }
}

fn fail(message: &str) -> u8 {
    if output::is_json() {
        output::json_output(json!({
            "command": "cleanup",
            "status": "error",
            "error": message,
        }));
    } else {
        output::error(&format!("Error: {message}"));
    }
    1
}

fn show_progress(event: &Progress<'_>, compacting: &mut Option<ProgressBar>) {
    match event {
        Progress::BackupCreated(backup) => {
            output::success(&format!("Backup created: {}", backup.path.display()));
        }
        Progress::Counted(counts) => {
            output::section("Database statistics before cleanup");
            output::lines(&count_table(counts));
            output::section("Cleaning up database");
        }
        Progress::Step(step) => output::action(&step.to_string()),
        Progress::Vacuuming => {
            *compacting = Some(output::spinner("Running VACUUM to reclaim space"));
        }
        Progress::Restoring(backup) => {
            if let Some(spinner) = compacting.take() {
                output::spinner_fail(&spinner, "Compaction interrupted");
            }
            output::warning(&format!("Restoring from backup: {}", backup.path.display()));
        }
    }
}

fn show_completed(report: &CleanupReport, database: &Path) {
    if output::is_json() {
        output::json_output(json!({
            "command": "cleanup",
            "status": "completed",
            "database": database.display().to_string(),
            "backup": report.backup.path.display().to_string(),
            "before": counts_json(&report.before),
            "after": counts_json(&report.after),
            "steps": steps_json(&report.steps),
            "size_before": report.backup.size,
            "size_after": report.database_size,
            "space_saved": report.space_saved(),
        }));
        return;
    }

    output::success("Cleanup completed successfully");

    output::section("Database statistics after cleanup");
    output::lines(&comparison_table(&report.before, &report.after));

    output::section("Database file sizes");
    output::field("Before", format_bytes(report.backup.size as i64));
    output::field("After", format_bytes(report.database_size as i64));
    output::field("Space saved", format_bytes(report.space_saved()));

    output::section("Cleanup complete");
    output::field("Backup saved as", report.backup.path.display());
    output::hint(&format!(
        "to restore, copy {} to {}",
        report.backup.path.display(),
        database.display()
    ));
}

fn show_rolled_back(report: &RollbackReport, database: &Path) {
    if output::is_json() {
        output::json_output(json!({
            "command": "cleanup",
            "status": "rolled_back",
            "database": database.display().to_string(),
            "backup": report.backup.path.display().to_string(),
            "before": report.before.as_ref().map(counts_json),
            "error": report.error,
        }));
        return;
    }

    output::error(&format!("Error during cleanup: {}", report.error));
    output::success(&format!(
        "Database restored from backup: {}",
        report.backup.path.display()
    ));
}

fn show_dry_run(report: &DryRunReport) {
    if output::is_json() {
        output::json_output(json!({
            "command": "cleanup",
            "status": "dry_run",
            "counts": counts_json(&report.counts),
            "steps": steps_json(&report.steps),
            "size": report.database_size,
        }));
        return;
    }

    output::section("Current database statistics");
    output::lines(&count_table(&report.counts));

    output::section("Planned steps");
    if report.steps.is_empty() {
        output::note("Nothing to clean");
    }
    for step in &report.steps {
        output::note(&step.to_string());
    }

    output::field("Database size", format_bytes(report.database_size as i64));
    output::hint("dry run: no backup taken and nothing modified");
}

fn count_table(counts: &TableCounts) -> String {
    let rows: Vec<CountRow> = counts
        .iter()
        .map(|c| CountRow {
            table: display_name(c.table),
            rows: c.rows,
        })
        .collect();
    Table::new(rows).to_string()
}

fn comparison_table(before: &TableCounts, after: &TableCounts) -> String {
    let rows: Vec<ComparisonRow> = before
        .iter()
        .map(|c| {
            let remaining = after.get(c.table);
            ComparisonRow {
                table: display_name(c.table),
                before: c.rows,
                after: remaining,
                removed: c.rows - remaining,
            }
        })
        .collect();
    Table::new(rows).to_string()
}

fn counts_json(counts: &TableCounts) -> Value {
    counts
        .iter()
        .map(|c| (c.table.to_string(), json!(c.rows)))
        .collect::<serde_json::Map<_, _>>()
        .into()
}

fn steps_json(steps: &[CleanupStep]) -> Value {
    steps.iter().map(|s| json!(s.to_string())).collect()
}

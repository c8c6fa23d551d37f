mod report;
mod setup;


use crate::config::Config;

use report::{check_discord_access, check_syncfm_api};
use setup::{optional_setting_lines, run_setup_checks};

/// Collected doctor results, printable line by line.
#[derive(Debug, Default)]
pub struct DoctorReport {
    pub checks: Vec<(bool, String)>,
    pub notes: Vec<String>,
}

impl DoctorReport {
    pub fn failures(&self) -> usize {
        self.checks.iter().filter(|(pass, _)| !pass).count()
    }

    pub fn passed(&self) -> bool {
        self.failures() == 0
    }

    pub fn lines(&self) -> Vec<String> {
        let mut lines: Vec<String> = self
            .checks
            .iter()
            .map(|(pass, msg)| format!("{} {msg}", if *pass { "✓" } else { "✗" }))
            .collect();
        lines.extend(self.notes.iter().map(|note| format!("· {note}")));
        lines
    }
}

/// Run every check. Network checks that lack credentials report a failure
/// instead of aborting.
pub async fn collect(config: &Config) -> DoctorReport {
    let mut checks = run_setup_checks(config);
    checks.push(check_discord_access(config).await);
    checks.push(check_syncfm_api(config).await);

    DoctorReport {
        checks,
        notes: optional_setting_lines(config),
    }
}

pub async fn run(config: &Config) -> bool {
    println!("◆ SyncFM Discord doctor");
    println!("  {}", "─".repeat(50));

    let report = collect(config).await;
    for line in report.lines() {
        println!("  {line}");
    }
    println!();

    let failures = report.failures();
    if failures == 0 {
        println!("  All checks passed.");
    } else {
        println!("  {failures} issue(s) found.");
    }
    report.passed()
}

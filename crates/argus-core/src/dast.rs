//! Dynamic-scan status reconciliation.
//!
//! The service exposes two independently-evolving signals: a coarse
//! file-level `dynamic_status` and the fine-grained status of the latest
//! scan run. This module combines them into a single outcome, polling with
//! a bounded timeout when the scan is still moving. Terminal failures and
//! poll timeouts are reportable outcomes, not command errors; CI pipelines
//! are expected to pass or fail on the risk-threshold check, never on
//! scan infrastructure flakiness.

use crate::api::AppApi;
use crate::error::CoreError;
use crate::findings::show_dynamic_findings;
use crate::model::DynamicScan;
use crate::poll::Sleeper;
use crate::risk::RiskLevel;
use crate::status::{FileDynamicStatus, ScanStatus};
use std::io::Write;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct DastCheckOptions {
    /// Wall-clock wait between scan re-fetches.
    pub poll_interval: Duration,
    /// Overall budget, counted from the first in-progress observation.
    pub timeout: Duration,
}

impl Default for DastCheckOptions {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(60),
            timeout: Duration::from_secs(60 * 60),
        }
    }
}

/// Every way a dastcheck can finish. All of these exit 0 at the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DastOutcome {
    /// File-level status says queued; no scan object exists yet.
    InQueue,
    /// No scan was ever listed, or it disappeared mid-poll.
    NoScan,
    Completed { findings: usize },
    TerminalFailure { status: ScanStatus },
    TimedOut,
}

/// Determine the current dynamic scan state for a file and drive it to a
/// final outcome, polling while the scan is still in progress.
pub fn run_dast_check<A: AppApi, W: Write>(
    api: &A,
    file_id: u64,
    threshold: RiskLevel,
    options: &DastCheckOptions,
    sleeper: &dyn Sleeper,
    out: &mut W,
) -> Result<DastOutcome, CoreError> {
    let file = api.file(file_id)?;

    match file.dynamic_status {
        FileDynamicStatus::InQueue => {
            // Nothing to poll yet; the scan object is created later.
            writeln!(out, "Status: inqueue")?;
            Ok(DastOutcome::InQueue)
        }
        FileDynamicStatus::None | FileDynamicStatus::InProgress(_) => {
            reconcile_scan(api, file_id, threshold, options, sleeper, out)
        }
    }
}

fn reconcile_scan<A: AppApi, W: Write>(
    api: &A,
    file_id: u64,
    threshold: RiskLevel,
    options: &DastCheckOptions,
    sleeper: &dyn Sleeper,
    out: &mut W,
) -> Result<DastOutcome, CoreError> {
    let Some(mut scan) = api.latest_dynamic_scan(file_id)? else {
        writeln!(out, "No dynamic scan is running for the file.")?;
        return Ok(DastOutcome::NoScan);
    };

    if scan.status.is_terminal() {
        return finish(api, file_id, threshold, &scan, out);
    }

    writeln!(out, "Status: {}", scan.status)?;
    let mut last_status = scan.status;
    let mut waited = Duration::ZERO;

    loop {
        if waited >= options.timeout {
            writeln!(out, "Timed out awaiting completion for file {}.", file_id)?;
            return Ok(DastOutcome::TimedOut);
        }

        sleeper.sleep(options.poll_interval);
        waited += options.poll_interval;

        scan = match api.latest_dynamic_scan(file_id)? {
            Some(scan) => scan,
            None => {
                writeln!(out, "No dynamic scan is running for the file.")?;
                return Ok(DastOutcome::NoScan);
            }
        };

        if scan.status != last_status {
            tracing::debug!(scan_id = scan.id, status = scan.status.code(), "scan status changed");
            writeln!(out, "Status: {}", scan.status)?;
            last_status = scan.status;
        }

        if scan.status.is_terminal() {
            return finish(api, file_id, threshold, &scan, out);
        }
    }
}

fn finish<A: AppApi, W: Write>(
    api: &A,
    file_id: u64,
    threshold: RiskLevel,
    scan: &DynamicScan,
    out: &mut W,
) -> Result<DastOutcome, CoreError> {
    if scan.status.is_success() {
        writeln!(out, "Dynamic scan has completed successfully.")?;
        let findings = show_dynamic_findings(api, file_id, threshold, out)?;
        return Ok(DastOutcome::Completed { findings });
    }

    writeln!(out, "Dynamic scan ended with status: {}", scan.status)?;
    if let Some(message) = scan.error_message.as_deref().filter(|m| !m.is_empty()) {
        writeln!(out, "Error message: {}", message)?;
    }
    Ok(DastOutcome::TerminalFailure {
        status: scan.status,
    })
}

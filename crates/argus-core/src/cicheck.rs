//! CI gate: wait for the static scan, then judge findings against a
//! risk threshold.

use crate::api::AppApi;
use crate::error::CoreError;
use crate::findings::{filter_by_risk, render_findings_table, resolve_vulnerabilities};
use crate::poll::Sleeper;
use crate::risk::RiskLevel;
use std::io::Write;
use std::time::Duration;

/// The static scan reports percentage progress, so the wait between
/// re-fetches can be much shorter than the dynamic poll interval.
pub const STATIC_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Block until `static_scan_progress` reaches 100.
///
/// `progress` receives every observed value (0..=100) so the caller can
/// drive a progress bar. Expiry of the budget is a hard error here, unlike
/// the dynamic poll timeout: without a finished static scan there is
/// nothing to report on at all.
pub fn wait_for_static_scan<A: AppApi>(
    api: &A,
    file_id: u64,
    timeout: Duration,
    sleeper: &dyn Sleeper,
    progress: &mut dyn FnMut(i64),
) -> Result<(), CoreError> {
    let mut waited = Duration::ZERO;
    loop {
        let file = api.file(file_id)?;
        progress(file.static_scan_progress);
        if file.static_scan_progress >= 100 {
            return Ok(());
        }
        if waited >= timeout {
            return Err(CoreError::StaticScanTimeout { file_id });
        }
        sleeper.sleep(STATIC_POLL_INTERVAL);
        waited += STATIC_POLL_INTERVAL;
    }
}

/// Returns true when any finding met the threshold; the CLI turns that
/// into a non-zero exit so pipelines fail on risk, not on infrastructure.
pub fn run_ci_check<A: AppApi, W: Write>(
    api: &A,
    file_id: u64,
    threshold: RiskLevel,
    timeout: Duration,
    sleeper: &dyn Sleeper,
    progress: &mut dyn FnMut(i64),
    out: &mut W,
) -> Result<bool, CoreError> {
    wait_for_static_scan(api, file_id, timeout, sleeper, progress)?;

    let analyses = api.analyses(file_id, None)?;
    let matching = filter_by_risk(analyses, threshold);

    if matching.is_empty() {
        writeln!(
            out,
            "No vulnerabilities found with risk threshold >= {}.",
            threshold
        )?;
        return Ok(false);
    }

    writeln!(
        out,
        "Found {} vulnerabilities with risk >= {}:",
        matching.len(),
        threshold
    )?;
    let rows = resolve_vulnerabilities(api, matching)?;
    render_findings_table(&rows, out)?;
    Ok(true)
}

use anyhow::Result;
use argus_core::api::AppApi;
use argus_core::poll::ThreadSleeper;
use argus_core::{run_dast_check, DastCheckOptions, RiskLevel};
use std::io;
use std::time::Duration;

/// Every reportable outcome, including terminal failures and poll
/// timeouts, exits 0; pipelines gate on cicheck, not on scan
/// infrastructure.
pub fn dastcheck(
    api: &impl AppApi,
    file_id: u64,
    threshold: RiskLevel,
    timeout_minutes: u64,
) -> Result<bool> {
    let options = DastCheckOptions {
        timeout: Duration::from_secs(timeout_minutes * 60),
        ..Default::default()
    };
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let outcome = run_dast_check(api, file_id, threshold, &options, &ThreadSleeper, &mut out)?;
    tracing::debug!(?outcome, "dastcheck finished");
    Ok(false)
}

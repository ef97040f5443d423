use crate::progress::StaticScanBar;
use anyhow::Result;
use argus_core::api::AppApi;
use argus_core::cicheck::run_ci_check;
use argus_core::poll::ThreadSleeper;
use argus_core::RiskLevel;
use std::io;
use std::time::Duration;

/// Returns true when findings met the threshold, which becomes exit 1.
pub fn cicheck(
    api: &impl AppApi,
    file_id: u64,
    threshold: RiskLevel,
    timeout_minutes: u64,
) -> Result<bool> {
    let timeout = Duration::from_secs(timeout_minutes * 60);
    let bar = StaticScanBar::new();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let found = run_ci_check(
        api,
        file_id,
        threshold,
        timeout,
        &ThreadSleeper,
        &mut |progress| bar.update(progress),
        &mut out,
    );
    bar.finish();

    Ok(found?)
}

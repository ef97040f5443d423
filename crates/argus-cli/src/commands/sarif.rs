use crate::progress::StaticScanBar;
use anyhow::{Context, Result};
use argus_core::api::AppApi;
use argus_core::poll::ThreadSleeper;
use argus_core::sarif::generate_sarif;
use argus_core::RiskLevel;
use std::fs;
use std::path::Path;
use std::time::Duration;

pub fn sarif(
    api: &impl AppApi,
    file_id: u64,
    threshold: RiskLevel,
    timeout_minutes: u64,
    output: &Path,
) -> Result<bool> {
    let timeout = Duration::from_secs(timeout_minutes * 60);
    let bar = StaticScanBar::new();

    let report = generate_sarif(
        api,
        file_id,
        threshold,
        timeout,
        &ThreadSleeper,
        &mut |progress| bar.update(progress),
    );
    bar.finish();
    let report = report?;

    fs::write(output, report.to_json()?)
        .with_context(|| format!("Failed to write SARIF report to {}", output.display()))?;
    println!("SARIF report created successfully at: {}", output.display());
    Ok(false)
}

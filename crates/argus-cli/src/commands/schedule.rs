use anyhow::Result;
use argus_core::api::AppApi;
use colored::Colorize;

pub fn schedule(api: &impl AppApi, file_id: u64) -> Result<bool> {
    println!("Scheduling DAST automation for file: {}", file_id);
    api.schedule_dast_automation(file_id)?;
    println!(
        "{}",
        "Dynamic scan has been inqueued successfully.".green()
    );
    Ok(false)
}

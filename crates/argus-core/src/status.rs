//! Two-level status taxonomy for dynamic scans.
//!
//! The service reports a coarse per-file `dynamic_status` and a fine-grained
//! per-scan status. Both arrive as bare integers; unrecognized codes are kept
//! (not rejected) and classified as still in progress, so a server-side
//! addition of a new phase never breaks an older client.

use serde::{Deserialize, Deserializer};
use std::fmt;

/// Coarse file-level dynamic scan status.
///
/// The service only distinguishes "never requested" (0) and "queued" (1);
/// every other value means some run is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FileDynamicStatus {
    #[default]
    None,
    InQueue,
    InProgress(i64),
}

impl From<i64> for FileDynamicStatus {
    fn from(code: i64) -> Self {
        match code {
            0 => FileDynamicStatus::None,
            1 => FileDynamicStatus::InQueue,
            other => FileDynamicStatus::InProgress(other),
        }
    }
}

impl<'de> Deserialize<'de> for FileDynamicStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(FileDynamicStatus::from(i64::deserialize(deserializer)?))
    }
}

/// Fine-grained per-scan status.
///
/// Codes 0..=21 are progression phases, 22 is the unique success terminal,
/// 23..=25 are failure terminals. Anything else decodes to `Unknown` and is
/// treated as non-terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScanStatus {
    NotStarted,
    PreProcessing,
    ProcessingScanRequest,
    InQueue,
    DeviceAllocated,
    ConnectingToDevice,
    PreparingDevice,
    Installing,
    ConfiguringApiCapture,
    Hooking,
    Launching,
    ReadyForInteraction,
    DownloadingAutoScript,
    ConfiguringAutoInteraction,
    InitiatingAutoInteraction,
    AutoInteractionCompleted,
    StopScanRequested,
    ScanTimeLimitExceeded,
    ShuttingDown,
    CleaningDevice,
    RuntimeDetectionCompleted,
    Analyzing,
    AnalysisCompleted,
    TimedOut,
    Error,
    Cancelled,
    Unknown(i64),
}

impl ScanStatus {
    pub fn code(&self) -> i64 {
        match self {
            ScanStatus::NotStarted => 0,
            ScanStatus::PreProcessing => 1,
            ScanStatus::ProcessingScanRequest => 2,
            ScanStatus::InQueue => 3,
            ScanStatus::DeviceAllocated => 4,
            ScanStatus::ConnectingToDevice => 5,
            ScanStatus::PreparingDevice => 6,
            ScanStatus::Installing => 7,
            ScanStatus::ConfiguringApiCapture => 8,
            ScanStatus::Hooking => 9,
            ScanStatus::Launching => 10,
            ScanStatus::ReadyForInteraction => 11,
            ScanStatus::DownloadingAutoScript => 12,
            ScanStatus::ConfiguringAutoInteraction => 13,
            ScanStatus::InitiatingAutoInteraction => 14,
            ScanStatus::AutoInteractionCompleted => 15,
            ScanStatus::StopScanRequested => 16,
            ScanStatus::ScanTimeLimitExceeded => 17,
            ScanStatus::ShuttingDown => 18,
            ScanStatus::CleaningDevice => 19,
            ScanStatus::RuntimeDetectionCompleted => 20,
            ScanStatus::Analyzing => 21,
            ScanStatus::AnalysisCompleted => 22,
            ScanStatus::TimedOut => 23,
            ScanStatus::Error => 24,
            ScanStatus::Cancelled => 25,
            ScanStatus::Unknown(code) => *code,
        }
    }

    /// True only for the four dead-end states.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ScanStatus::AnalysisCompleted
                | ScanStatus::TimedOut
                | ScanStatus::Error
                | ScanStatus::Cancelled
        )
    }

    /// True only for `AnalysisCompleted`.
    pub fn is_success(&self) -> bool {
        matches!(self, ScanStatus::AnalysisCompleted)
    }
}

impl From<i64> for ScanStatus {
    fn from(code: i64) -> Self {
        match code {
            0 => ScanStatus::NotStarted,
            1 => ScanStatus::PreProcessing,
            2 => ScanStatus::ProcessingScanRequest,
            3 => ScanStatus::InQueue,
            4 => ScanStatus::DeviceAllocated,
            5 => ScanStatus::ConnectingToDevice,
            6 => ScanStatus::PreparingDevice,
            7 => ScanStatus::Installing,
            8 => ScanStatus::ConfiguringApiCapture,
            9 => ScanStatus::Hooking,
            10 => ScanStatus::Launching,
            11 => ScanStatus::ReadyForInteraction,
            12 => ScanStatus::DownloadingAutoScript,
            13 => ScanStatus::ConfiguringAutoInteraction,
            14 => ScanStatus::InitiatingAutoInteraction,
            15 => ScanStatus::AutoInteractionCompleted,
            16 => ScanStatus::StopScanRequested,
            17 => ScanStatus::ScanTimeLimitExceeded,
            18 => ScanStatus::ShuttingDown,
            19 => ScanStatus::CleaningDevice,
            20 => ScanStatus::RuntimeDetectionCompleted,
            21 => ScanStatus::Analyzing,
            22 => ScanStatus::AnalysisCompleted,
            23 => ScanStatus::TimedOut,
            24 => ScanStatus::Error,
            25 => ScanStatus::Cancelled,
            other => ScanStatus::Unknown(other),
        }
    }
}

impl<'de> Deserialize<'de> for ScanStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(ScanStatus::from(i64::deserialize(deserializer)?))
    }
}

impl fmt::Display for ScanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ScanStatus::NotStarted => "Not started",
            ScanStatus::PreProcessing => "Preprocessing",
            ScanStatus::ProcessingScanRequest => "Processing scan request",
            ScanStatus::InQueue => "In queue",
            ScanStatus::DeviceAllocated => "Device allocated",
            ScanStatus::ConnectingToDevice => "Connecting to device",
            ScanStatus::PreparingDevice => "Preparing device",
            ScanStatus::Installing => "Installing app",
            ScanStatus::ConfiguringApiCapture => "Preparing for API capture",
            ScanStatus::Hooking => "Preparing for data capture",
            ScanStatus::Launching => "Launching app",
            ScanStatus::ReadyForInteraction => "Ready for interaction",
            ScanStatus::DownloadingAutoScript => "Downloading automation script",
            ScanStatus::ConfiguringAutoInteraction => "Configuring automated interaction",
            ScanStatus::InitiatingAutoInteraction => "Initiating automated interaction",
            ScanStatus::AutoInteractionCompleted => "Automated interaction completed",
            ScanStatus::StopScanRequested => "Stop scan requested",
            ScanStatus::ScanTimeLimitExceeded => "Scan time limit exceeded",
            ScanStatus::ShuttingDown => "Shutting down",
            ScanStatus::CleaningDevice => "Cleaning device",
            ScanStatus::RuntimeDetectionCompleted => "Runtime detection completed",
            ScanStatus::Analyzing => "Analyzing",
            ScanStatus::AnalysisCompleted => "Analysis completed",
            ScanStatus::TimedOut => "Timed out",
            ScanStatus::Error => "Error",
            ScanStatus::Cancelled => "Cancelled",
            ScanStatus::Unknown(code) => return write!(f, "Unknown ({})", code),
        };
        f.write_str(label)
    }
}

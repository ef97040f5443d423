//! The seam between the domain logic and the HTTP transport.
//!
//! Everything in this crate talks to the service through `AppApi`, so the
//! reconciliation engine and the report generators can be driven by a
//! scripted fake in tests. The real implementation lives in `argus-client`.

use crate::model::{Analysis, DynamicScan, FileRecord, Vulnerability};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("unexpected status code: {status}")]
    UnexpectedStatus { status: u16, body: String },

    #[error("file {file_id} doesn't exist")]
    FileNotFound { file_id: u64 },

    #[error("failed to decode response: {0}")]
    Decode(String),

    #[error("dynamic scan automation is not enabled")]
    AutomationNotEnabled,

    #[error("there is a dynamic scan in progress, cannot schedule automation at the moment")]
    AutomationInProgress,
}

/// Vulnerability type query value selecting dynamic (DAST) findings.
pub const DYNAMIC_VULNERABILITY_TYPE: u8 = 2;

pub trait AppApi {
    /// `GET /api/v2/files/{id}`. A 404 maps to [`ApiError::FileNotFound`].
    fn file(&self, file_id: u64) -> Result<FileRecord, ApiError>;

    /// `GET /api/v2/files/{id}/dynamicscans`, returning the most recent
    /// scan if any exist. An empty listing is `Ok(None)`, not an error.
    fn latest_dynamic_scan(&self, file_id: u64) -> Result<Option<DynamicScan>, ApiError>;

    /// `GET /api/v2/files/{id}/analyses`, optionally filtered by
    /// vulnerability type. Implementations fetch the full result set
    /// (count discovery followed by a limit-sized request).
    fn analyses(
        &self,
        file_id: u64,
        vulnerability_type: Option<u8>,
    ) -> Result<Vec<Analysis>, ApiError>;

    /// `GET /api/v2/vulnerabilities/{id}`.
    fn vulnerability(&self, id: u64) -> Result<Vulnerability, ApiError>;

    /// `POST /api/dynamicscan/{id}/schedule_automation`.
    fn schedule_dast_automation(&self, file_id: u64) -> Result<(), ApiError>;
}

//! Typed records for the service's REST responses.

use crate::risk::RiskLevel;
use crate::status::{FileDynamicStatus, ScanStatus};
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// An uploaded application binary and its server-side scan bookkeeping.
#[derive(Debug, Clone, Deserialize)]
pub struct FileRecord {
    pub id: u64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub dynamic_status: FileDynamicStatus,
    #[serde(default)]
    pub static_scan_progress: i64,
}

/// A single dynamic scan run. The listing endpoint returns these
/// most-recent-first; only the first entry ever matters to the client.
#[derive(Debug, Clone, Deserialize)]
pub struct DynamicScan {
    pub id: u64,
    pub status: ScanStatus,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub created_on: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_on: Option<DateTime<Utc>>,
    #[serde(default)]
    pub ended_on: Option<DateTime<Utc>>,
    #[serde(default)]
    pub auto_shutdown_on: Option<DateTime<Utc>>,
}

/// DRF-style page wrapper used by every listing endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct Paged<T> {
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
}

/// A finding produced by a scan, referencing a vulnerability by id.
#[derive(Debug, Clone, Deserialize)]
pub struct Analysis {
    pub id: u64,
    #[serde(default)]
    pub risk: RiskLevel,
    #[serde(default)]
    pub computed_risk: RiskLevel,
    #[serde(rename = "vulnerability")]
    pub vulnerability_id: u64,
    #[serde(default)]
    pub cvss_vector: String,
    #[serde(default)]
    pub cvss_base: f64,
    #[serde(default)]
    pub cvss_version: i32,
    #[serde(default)]
    pub cwe: Vec<String>,
    #[serde(default)]
    pub owasp: Vec<String>,
}

/// Static reference data for a vulnerability class.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Vulnerability {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub intro: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub compliant: String,
    #[serde(default)]
    pub non_compliant: String,
    #[serde(default)]
    pub business_implication: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dynamic_scan_decodes_wire_shape() {
        let json = r#"{"id":300,"status":22,"error_message":"","created_on":"2026-01-04T10:21:00Z"}"#;
        let scan: DynamicScan = serde_json::from_str(json).unwrap();
        assert_eq!(scan.id, 300);
        assert!(scan.status.is_success());
        assert_eq!(scan.error_message.as_deref(), Some(""));
        assert!(scan.created_on.is_some());
        assert!(scan.ended_on.is_none());
    }

    #[test]
    fn paged_analyses_decode() {
        let json = r#"{
            "count": 2,
            "next": null,
            "previous": null,
            "results": [
                {"id":10,"risk":3,"computed_risk":3,"vulnerability":111},
                {"id":11,"risk":3,"computed_risk":4,"vulnerability":222,"cvss_base":9.8}
            ]
        }"#;
        let page: Paged<Analysis> = serde_json::from_str(json).unwrap();
        assert_eq!(page.count, 2);
        assert_eq!(page.results[0].vulnerability_id, 111);
        assert_eq!(page.results[1].computed_risk, crate::RiskLevel::Critical);
    }

    #[test]
    fn file_record_defaults_missing_fields() {
        let file: FileRecord = serde_json::from_str(r#"{"id":123,"dynamic_status":1}"#).unwrap();
        assert_eq!(file.dynamic_status, FileDynamicStatus::InQueue);
        assert_eq!(file.static_scan_progress, 0);
    }
}

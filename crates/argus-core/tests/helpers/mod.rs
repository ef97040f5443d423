#![allow(dead_code)]

use argus_core::api::{ApiError, AppApi};
use argus_core::model::{Analysis, DynamicScan, FileRecord, Vulnerability};
use argus_core::{FileDynamicStatus, RiskLevel, ScanStatus};
use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};

/// Scripted in-memory API. The scan script is consumed one entry per
/// listing call; the last entry repeats so poll loops can run past the
/// end of the script.
pub struct ScriptedApi {
    pub file: Option<FileRecord>,
    pub scans: RefCell<VecDeque<Option<DynamicScan>>>,
    pub analyses: Vec<Analysis>,
    pub vulnerabilities: HashMap<u64, Vulnerability>,
    pub scan_list_calls: Cell<usize>,
    pub analyses_calls: Cell<usize>,
}

impl ScriptedApi {
    pub fn new(file: Option<FileRecord>) -> Self {
        Self {
            file,
            scans: RefCell::new(VecDeque::new()),
            analyses: Vec::new(),
            vulnerabilities: HashMap::new(),
            scan_list_calls: Cell::new(0),
            analyses_calls: Cell::new(0),
        }
    }

    pub fn with_scans(self, scans: Vec<Option<DynamicScan>>) -> Self {
        *self.scans.borrow_mut() = scans.into();
        self
    }

    pub fn with_analyses(mut self, analyses: Vec<Analysis>) -> Self {
        self.analyses = analyses;
        self
    }

    pub fn with_vulnerability(mut self, vulnerability: Vulnerability) -> Self {
        self.vulnerabilities.insert(vulnerability.id, vulnerability);
        self
    }
}

impl AppApi for ScriptedApi {
    fn file(&self, file_id: u64) -> Result<FileRecord, ApiError> {
        self.file
            .clone()
            .ok_or(ApiError::FileNotFound { file_id })
    }

    fn latest_dynamic_scan(&self, _file_id: u64) -> Result<Option<DynamicScan>, ApiError> {
        self.scan_list_calls.set(self.scan_list_calls.get() + 1);
        let mut scans = self.scans.borrow_mut();
        if scans.len() > 1 {
            Ok(scans.pop_front().unwrap())
        } else {
            Ok(scans.front().cloned().flatten())
        }
    }

    fn analyses(
        &self,
        _file_id: u64,
        _vulnerability_type: Option<u8>,
    ) -> Result<Vec<Analysis>, ApiError> {
        self.analyses_calls.set(self.analyses_calls.get() + 1);
        Ok(self.analyses.clone())
    }

    fn vulnerability(&self, id: u64) -> Result<Vulnerability, ApiError> {
        self.vulnerabilities
            .get(&id)
            .cloned()
            .ok_or_else(|| ApiError::Decode(format!("no vulnerability {} scripted", id)))
    }

    fn schedule_dast_automation(&self, _file_id: u64) -> Result<(), ApiError> {
        Ok(())
    }
}

pub fn file_record(id: u64, dynamic_status: i64, static_scan_progress: i64) -> FileRecord {
    FileRecord {
        id,
        name: Some(format!("app-{}.apk", id)),
        dynamic_status: FileDynamicStatus::from(dynamic_status),
        static_scan_progress,
    }
}

pub fn scan(id: u64, status: i64) -> DynamicScan {
    DynamicScan {
        id,
        status: ScanStatus::from(status),
        error_message: None,
        created_on: None,
        updated_on: None,
        ended_on: None,
        auto_shutdown_on: None,
    }
}

pub fn scan_with_error(id: u64, status: i64, message: &str) -> DynamicScan {
    DynamicScan {
        error_message: Some(message.to_string()),
        ..scan(id, status)
    }
}

pub fn analysis(id: u64, computed_risk: RiskLevel, vulnerability_id: u64) -> Analysis {
    Analysis {
        id,
        risk: computed_risk,
        computed_risk,
        vulnerability_id,
        cvss_vector: "CVSS:3.1/AV:N/AC:L".to_string(),
        cvss_base: 7.5,
        cvss_version: 3,
        cwe: Vec::new(),
        owasp: Vec::new(),
    }
}

pub fn vulnerability(id: u64, name: &str) -> Vulnerability {
    Vulnerability {
        id,
        name: name.to_string(),
        intro: format!("{} was detected.", name),
        description: format!("{} details.", name),
        compliant: String::new(),
        non_compliant: String::new(),
        business_implication: String::new(),
    }
}

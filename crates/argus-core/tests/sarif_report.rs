mod helpers;

use argus_core::cicheck::run_ci_check;
use argus_core::model::Vulnerability;
use argus_core::poll::RecordingSleeper;
use argus_core::sarif::generate_sarif;
use argus_core::{CoreError, RiskLevel};
use helpers::*;
use std::time::Duration;

fn rich_vulnerability(id: u64, name: &str) -> Vulnerability {
    Vulnerability {
        id,
        name: name.to_string(),
        intro: format!("{} was detected in the application.", name),
        description: "Long form description.".to_string(),
        compliant: "Use certificate pinning.".to_string(),
        non_compliant: "Trusting all certificates.".to_string(),
        business_implication: "Attackers can intercept traffic.".to_string(),
    }
}

#[test]
fn sarif_report_shapes_rules_and_results() {
    let mut critical = analysis(10, RiskLevel::Critical, 445);
    critical.cvss_base = 9.8;
    critical.cwe = vec!["CWE_295".to_string()];
    let low = analysis(11, RiskLevel::Low, 446);

    let api = ScriptedApi::new(Some(file_record(1, 0, 100)))
        .with_analyses(vec![critical, low])
        .with_vulnerability(rich_vulnerability(445, "ssl pinning bypass"))
        .with_vulnerability(vulnerability(446, "Verbose Logging"));

    let sleeper = RecordingSleeper::new();
    let sarif = generate_sarif(
        &api,
        1,
        RiskLevel::Low,
        Duration::from_secs(60),
        &sleeper,
        &mut |_| {},
    )
    .unwrap();

    assert_eq!(sarif.version, "2.1.0");
    assert!(sarif.schema.contains("sarif-schema-2.1.0"));
    assert_eq!(sarif.runs.len(), 1);

    let run = &sarif.runs[0];
    assert_eq!(run.results.len(), 2);
    assert_eq!(run.tool.driver.rules.len(), 2);

    let critical_result = &run.results[0];
    assert_eq!(critical_result.rule_id, "ARG0445");
    assert_eq!(critical_result.level, "error");
    assert_eq!(
        critical_result.partial_fingerprints.get("vulnerabilityId"),
        Some(&"445".to_string())
    );

    let low_result = &run.results[1];
    assert_eq!(low_result.level, "note");
    assert_eq!(
        low_result.partial_fingerprints.get("vulnerabilityId"),
        Some(&"446".to_string())
    );

    let rule = &run.tool.driver.rules[0];
    assert_eq!(rule.name, "SslPinningBypass");
    assert_eq!(rule.properties.security_severity, "9.8");
    assert!(rule.properties.tags.contains(&"security".to_string()));
    assert!(rule.properties.tags.contains(&"CWE-295".to_string()));
    assert!(rule.help.markdown.contains("Business Implication"));
    assert!(rule.help.markdown.contains("Use certificate pinning."));
}

#[test]
fn sarif_json_carries_schema_keys() {
    let api = ScriptedApi::new(Some(file_record(1, 0, 100)))
        .with_analyses(vec![analysis(10, RiskLevel::High, 111)])
        .with_vulnerability(vulnerability(111, "SQL Injection"));

    let sleeper = RecordingSleeper::new();
    let sarif = generate_sarif(
        &api,
        1,
        RiskLevel::Low,
        Duration::from_secs(60),
        &sleeper,
        &mut |_| {},
    )
    .unwrap();
    let json = sarif.to_json().unwrap();

    assert!(json.contains("\"$schema\""));
    assert!(json.contains("\"version\": \"2.1.0\""));
    assert!(json.contains("\"ruleId\": \"ARG0111\""));
    assert!(json.contains("\"partialFingerprints\""));
    assert!(json.contains("\"vulnerabilityId\": \"111\""));
    assert!(json.contains("\"uri\": \"SRCROOT\""));
}

#[test]
fn static_scan_wait_expiry_is_fatal() {
    let api = ScriptedApi::new(Some(file_record(7, 0, 50)));
    let sleeper = RecordingSleeper::new();
    let err = generate_sarif(
        &api,
        7,
        RiskLevel::Low,
        Duration::ZERO,
        &sleeper,
        &mut |_| {},
    )
    .unwrap_err();

    match err {
        CoreError::StaticScanTimeout { file_id } => assert_eq!(file_id, 7),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn ci_check_signals_findings_at_or_above_threshold() {
    let api = ScriptedApi::new(Some(file_record(1, 0, 100)))
        .with_analyses(vec![analysis(10, RiskLevel::High, 111)])
        .with_vulnerability(vulnerability(111, "SQL Injection"));

    let sleeper = RecordingSleeper::new();
    let mut out = Vec::new();
    let mut seen = Vec::new();
    let failed = run_ci_check(
        &api,
        1,
        RiskLevel::High,
        Duration::from_secs(60),
        &sleeper,
        &mut |p| seen.push(p),
        &mut out,
    )
    .unwrap();

    assert!(failed);
    assert_eq!(seen, vec![100]);
    let output = String::from_utf8(out).unwrap();
    assert!(output.contains("Found 1 vulnerabilities with risk >= High:"));
    assert!(output.contains("SQL Injection"));
}

#[test]
fn ci_check_passes_when_nothing_meets_the_threshold() {
    let api = ScriptedApi::new(Some(file_record(1, 0, 100)))
        .with_analyses(vec![analysis(10, RiskLevel::Low, 111)]);

    let sleeper = RecordingSleeper::new();
    let mut out = Vec::new();
    let failed = run_ci_check(
        &api,
        1,
        RiskLevel::Critical,
        Duration::from_secs(60),
        &sleeper,
        &mut |_| {},
        &mut out,
    )
    .unwrap();

    assert!(!failed);
    let output = String::from_utf8(out).unwrap();
    assert!(output.contains("No vulnerabilities found with risk threshold >= Critical."));
}

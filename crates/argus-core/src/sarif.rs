//! SARIF 2.1.0 report generation.
//!
//! One rule and one result are emitted per finding that survives the risk
//! filter. The fingerprint is keyed by vulnerability id so downstream tools
//! can deduplicate across report uploads.

use crate::api::AppApi;
use crate::cicheck::wait_for_static_scan;
use crate::error::CoreError;
use crate::findings::filter_by_risk;
use crate::model::{Analysis, Vulnerability};
use crate::poll::Sleeper;
use crate::risk::RiskLevel;
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::Write;
use std::time::Duration;

const SARIF_SCHEMA: &str =
    "https://raw.githubusercontent.com/oasis-tcs/sarif-spec/master/Schemata/sarif-schema-2.1.0.json";
const SARIF_VERSION: &str = "2.1.0";
const DRIVER_NAME: &str = "Argus";
const DRIVER_INFO_URI: &str = "https://www.argussec.io/";

#[derive(Debug, Serialize)]
pub struct Sarif {
    #[serde(rename = "$schema")]
    pub schema: String,
    pub version: String,
    pub runs: Vec<Run>,
}

#[derive(Debug, Serialize)]
pub struct Run {
    pub tool: ToolComponent,
    pub results: Vec<SarifResult>,
}

#[derive(Debug, Serialize)]
pub struct ToolComponent {
    pub driver: Driver,
}

#[derive(Debug, Serialize)]
pub struct Driver {
    pub name: String,
    pub version: String,
    #[serde(rename = "informationUri")]
    pub information_uri: String,
    pub rules: Vec<Rule>,
}

#[derive(Debug, Serialize)]
pub struct Rule {
    pub id: String,
    pub name: String,
    #[serde(rename = "shortDescription")]
    pub short_description: Description,
    #[serde(rename = "fullDescription")]
    pub full_description: Description,
    #[serde(skip_serializing_if = "Help::is_empty")]
    pub help: Help,
    pub properties: RuleProperties,
}

#[derive(Debug, Serialize)]
pub struct Description {
    pub text: String,
}

#[derive(Debug, Default, Serialize)]
pub struct Help {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub text: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub markdown: String,
}

impl Help {
    fn is_empty(&self) -> bool {
        self.text.is_empty() && self.markdown.is_empty()
    }
}

#[derive(Debug, Serialize)]
pub struct RuleProperties {
    pub tags: Vec<String>,
    pub kind: String,
    pub precision: String,
    #[serde(rename = "problem.severity")]
    pub problem_severity: String,
    #[serde(rename = "security-severity")]
    pub security_severity: String,
}

#[derive(Debug, Serialize)]
pub struct SarifResult {
    #[serde(rename = "ruleId")]
    pub rule_id: String,
    pub level: String,
    pub message: Message,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub locations: Vec<Location>,
    #[serde(rename = "partialFingerprints", skip_serializing_if = "BTreeMap::is_empty")]
    pub partial_fingerprints: BTreeMap<String, String>,
}

#[derive(Debug, Serialize)]
pub struct Message {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct Location {
    #[serde(rename = "physicalLocation")]
    pub physical_location: PhysicalLocation,
}

#[derive(Debug, Serialize)]
pub struct PhysicalLocation {
    #[serde(rename = "artifactLocation")]
    pub artifact_location: ArtifactLocation,
}

#[derive(Debug, Serialize)]
pub struct ArtifactLocation {
    pub uri: String,
    #[serde(rename = "uriBaseId")]
    pub uri_base_id: String,
}

impl Sarif {
    pub fn to_json(&self) -> Result<String, CoreError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn write_to<W: Write>(&self, out: &mut W) -> Result<(), CoreError> {
        out.write_all(self.to_json()?.as_bytes())?;
        Ok(())
    }
}

/// Severity mapping mandated by the report consumers.
pub fn sarif_level(risk: RiskLevel) -> &'static str {
    match risk {
        RiskLevel::Low => "note",
        RiskLevel::Medium => "warning",
        RiskLevel::High | RiskLevel::Critical => "error",
        RiskLevel::None => "none",
    }
}

pub fn rule_id(vulnerability_id: u64) -> String {
    format!("ARG0{}", vulnerability_id)
}

/// Wait for the static scan to finish, then shape every finding at or
/// above the threshold into a single-run SARIF document.
pub fn generate_sarif<A: AppApi>(
    api: &A,
    file_id: u64,
    threshold: RiskLevel,
    static_timeout: Duration,
    sleeper: &dyn Sleeper,
    progress: &mut dyn FnMut(i64),
) -> Result<Sarif, CoreError> {
    wait_for_static_scan(api, file_id, static_timeout, sleeper, progress)?;

    let analyses = api.analyses(file_id, None)?;
    let matching = filter_by_risk(analyses, threshold);

    let mut rules = Vec::with_capacity(matching.len());
    let mut results = Vec::with_capacity(matching.len());

    for analysis in &matching {
        let vulnerability = api.vulnerability(analysis.vulnerability_id)?;
        rules.push(build_rule(analysis, &vulnerability));
        results.push(build_result(analysis, &vulnerability));
    }

    Ok(Sarif {
        schema: SARIF_SCHEMA.to_string(),
        version: SARIF_VERSION.to_string(),
        runs: vec![Run {
            tool: ToolComponent {
                driver: Driver {
                    name: DRIVER_NAME.to_string(),
                    version: env!("CARGO_PKG_VERSION").to_string(),
                    information_uri: DRIVER_INFO_URI.to_string(),
                    rules,
                },
            },
            results,
        }],
    })
}

fn build_rule(analysis: &Analysis, vulnerability: &Vulnerability) -> Rule {
    const FALLBACK_GUIDANCE: &str = "Security issues identified. Please review and mitigate.";

    let compliant = if vulnerability.compliant.is_empty() {
        FALLBACK_GUIDANCE
    } else {
        &vulnerability.compliant
    };
    let non_compliant = if vulnerability.non_compliant.is_empty() {
        FALLBACK_GUIDANCE
    } else {
        &vulnerability.non_compliant
    };

    let mut markdown = String::from("## Summary of Findings\n\n");
    markdown.push_str("### Description:\n");
    markdown.push_str(&vulnerability.description);
    markdown.push_str("\n\n### Recommendations:\n\n");
    markdown.push_str("#### Compliant Solution:\n");
    markdown.push_str(compliant);
    markdown.push_str("\n\n#### Noncompliant Code Example:\n");
    markdown.push_str(non_compliant);
    markdown.push_str("\n\n");
    if !vulnerability.business_implication.is_empty() {
        markdown.push_str("### Business Implication:\n");
        markdown.push_str(&vulnerability.business_implication);
        markdown.push_str("\n\n");
    }

    let mut tags = vec!["security".to_string()];
    for cwe in &analysis.cwe {
        tags.push(cwe.replacen('_', "-", 1));
    }

    let level = sarif_level(analysis.computed_risk);

    Rule {
        id: rule_id(vulnerability.id),
        name: to_upper_camel(&vulnerability.name),
        short_description: Description {
            text: vulnerability.name.clone(),
        },
        full_description: Description {
            text: vulnerability.intro.clone(),
        },
        help: Help {
            text: "Summary of Findings".to_string(),
            markdown,
        },
        properties: RuleProperties {
            tags,
            kind: "security".to_string(),
            precision: "high".to_string(),
            problem_severity: level.to_string(),
            security_severity: format!("{:.1}", analysis.cvss_base),
        },
    }
}

fn build_result(analysis: &Analysis, vulnerability: &Vulnerability) -> SarifResult {
    let mut partial_fingerprints = BTreeMap::new();
    partial_fingerprints.insert(
        "vulnerabilityId".to_string(),
        vulnerability.id.to_string(),
    );

    SarifResult {
        rule_id: rule_id(vulnerability.id),
        level: sarif_level(analysis.computed_risk).to_string(),
        message: Message {
            text: vulnerability.intro.clone(),
        },
        locations: vec![Location {
            physical_location: PhysicalLocation {
                artifact_location: ArtifactLocation {
                    uri: "SRCROOT".to_string(),
                    uri_base_id: String::new(),
                },
            },
        }],
        partial_fingerprints,
    }
}

/// "ssl pinning bypass" -> "SslPinningBypass". Rule names must be
/// identifier-like; vulnerability names are free-form prose.
fn to_upper_camel(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for word in name.split(|c: char| !c.is_alphanumeric()) {
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.extend(chars.flat_map(|c| c.to_lowercase()));
        }
    }
    out
}

//! Vulnerability filtering and table rendering.

use crate::api::{ApiError, AppApi, DYNAMIC_VULNERABILITY_TYPE};
use crate::error::CoreError;
use crate::model::{Analysis, Vulnerability};
use crate::risk::RiskLevel;
use prettytable::{format, Cell, Row, Table};
use std::io::Write;

/// Keep only findings at or above the threshold. Inclusive on purpose.
pub fn filter_by_risk(analyses: Vec<Analysis>, threshold: RiskLevel) -> Vec<Analysis> {
    analyses
        .into_iter()
        .filter(|a| a.computed_risk >= threshold)
        .collect()
}

/// Resolve each finding's vulnerability metadata by id.
///
/// Lookups are sequential; the set that survives the risk filter is small
/// and the service has no batch endpoint.
pub fn resolve_vulnerabilities<A: AppApi>(
    api: &A,
    analyses: Vec<Analysis>,
) -> Result<Vec<(Analysis, Vulnerability)>, ApiError> {
    let mut resolved = Vec::with_capacity(analyses.len());
    for analysis in analyses {
        let vulnerability = api.vulnerability(analysis.vulnerability_id)?;
        resolved.push((analysis, vulnerability));
    }
    Ok(resolved)
}

pub fn render_findings_table<W: Write>(
    rows: &[(Analysis, Vulnerability)],
    out: &mut W,
) -> Result<(), CoreError> {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_NO_BORDER_LINE_SEPARATOR);

    table.set_titles(Row::new(vec![
        Cell::new("ANALYSIS-ID").style_spec("b"),
        Cell::new("RISK").style_spec("b"),
        Cell::new("CVSS-VECTOR").style_spec("b"),
        Cell::new("CVSS-BASE").style_spec("b"),
        Cell::new("VULNERABILITY-ID").style_spec("b"),
        Cell::new("VULNERABILITY-NAME").style_spec("b"),
    ]));

    for (analysis, vulnerability) in rows {
        let risk_style = match analysis.computed_risk {
            RiskLevel::Critical | RiskLevel::High => "Fr",
            RiskLevel::Medium => "Fy",
            _ => "",
        };
        table.add_row(Row::new(vec![
            Cell::new(&analysis.id.to_string()),
            Cell::new(&analysis.computed_risk.to_string()).style_spec(risk_style),
            Cell::new(&analysis.cvss_vector),
            Cell::new(&format!("{:.1}", analysis.cvss_base)),
            Cell::new(&vulnerability.id.to_string()),
            Cell::new(&vulnerability.name),
        ]));
    }

    table.print(out)?;
    Ok(())
}

/// Fetch, filter and print dynamic findings for a completed scan.
///
/// Returns the number of findings that met the threshold.
pub fn show_dynamic_findings<A: AppApi, W: Write>(
    api: &A,
    file_id: u64,
    threshold: RiskLevel,
    out: &mut W,
) -> Result<usize, CoreError> {
    let analyses = api.analyses(file_id, Some(DYNAMIC_VULNERABILITY_TYPE))?;
    let matching = filter_by_risk(analyses, threshold);

    if matching.is_empty() {
        writeln!(
            out,
            "No vulnerabilities found with risk threshold >= {}.",
            threshold
        )?;
        writeln!(out, "Check the dashboard for the full scan history.")?;
        return Ok(0);
    }

    writeln!(
        out,
        "Found {} vulnerabilities with risk >= {}:",
        matching.len(),
        threshold
    )?;
    let rows = resolve_vulnerabilities(api, matching)?;
    render_findings_table(&rows, out)?;
    Ok(rows.len())
}

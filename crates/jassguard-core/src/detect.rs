//! Run a rule catalog over a script and collect an audit report.

use std::collections::HashSet;
use std::fmt;

use crate::error::Result;
use crate::rules::{RuleCatalog, Severity};
use crate::search::ScriptSearch;

/// A rule that fired, with every line it matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub severity: Severity,
    pub description: String,
    /// Matched lines in the view the rule scanned; a line appears once per
    /// needle it contains.
    pub lines: Vec<String>,
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.severity, self.description)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanReport {
    findings: Vec<Finding>,
}

impl ScanReport {
    /// Findings in catalog order.
    #[inline]
    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    #[inline]
    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }

    /// One `"<severity>: <description>"` line per fired rule.
    pub fn warnings(&self) -> Vec<String> {
        self.findings.iter().map(ToString::to_string).collect()
    }

    /// Every reported line without a trailing `\r`, deduplicated, first
    /// occurrence wins.
    pub fn suspicious_lines(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.findings
            .iter()
            .flat_map(|f| f.lines.iter())
            .map(|line| line.strip_suffix('\r').unwrap_or(line))
            .filter(|line| seen.insert(*line))
            .collect()
    }

    /// Suspicious lines joined with `\n`, ready to hand to a report writer.
    pub fn render_suspicious(&self) -> String {
        self.suspicious_lines().join("\n")
    }

    pub fn max_severity(&self) -> Option<Severity> {
        self.findings.iter().map(|f| f.severity).max()
    }
}

/// Query `search` with each rule of `catalog`, in order.
pub fn scan(search: &ScriptSearch, catalog: &RuleCatalog) -> Result<ScanReport> {
    let mut findings = Vec::new();
    for rule in catalog {
        let lines = search.contains_any_line(&rule.needles, rule.mode)?;
        if lines.is_empty() {
            continue;
        }
        let finding = Finding {
            severity: rule.severity,
            description: rule.description.clone(),
            lines: lines.into_iter().map(str::to_owned).collect(),
        };
        tracing::warn!(
            severity = finding.severity.get(),
            lines = finding.lines.len(),
            "{}",
            finding.description
        );
        findings.push(finding);
    }
    Ok(ScanReport { findings })
}

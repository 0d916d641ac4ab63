//! Ambient diagnostics collection (SPEC_FULL.md §7.3). Neither `rhp` nor
//! `tto` depends on this: it wraps their `Result`/`warnings` outputs at the
//! CLI boundary, accumulating entries for a final summary.

use serde_json::json;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Fatal,
    Hard,
    Medium,
    Soft,
}

impl Severity {
    fn label(&self) -> &'static str {
        match self {
            Severity::Fatal => "fatal",
            Severity::Hard => "hard",
            Severity::Medium => "medium",
            Severity::Soft => "soft",
        }
    }
}

#[derive(Debug, Clone)]
pub struct DiagnosticEntry {
    pub severity: Severity,
    pub message: String,
    pub context: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorReportStyle {
    Off,
    Print,
    Summary,
}

impl std::str::FromStr for ErrorReportStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "off" => Ok(ErrorReportStyle::Off),
            "print" => Ok(ErrorReportStyle::Print),
            "summary" => Ok(ErrorReportStyle::Summary),
            other => Err(format!("unknown error-report style: {other}")),
        }
    }
}

/// Accumulates diagnostics across a CLI invocation.
#[derive(Debug)]
pub struct Diagnostics {
    style: ErrorReportStyle,
    entries: Vec<DiagnosticEntry>,
}

impl Diagnostics {
    pub fn new(style: ErrorReportStyle) -> Self {
        Self { style, entries: Vec::new() }
    }

    /// Records an entry, printing it immediately under `Print` style. RHP's
    /// single terminal `ParseError` is `Medium`; TTO's per-warning strings
    /// are `Soft`; CLI usage/I-O failures are `Hard`/`Fatal`.
    pub fn record(&mut self, severity: Severity, message: impl Into<String>, context: Option<String>) {
        let entry = DiagnosticEntry { severity, message: message.into(), context };
        if matches!(self.style, ErrorReportStyle::Print) || matches!(severity, Severity::Fatal | Severity::Hard) {
            eprintln!("textkit: [{}] {}", entry.severity.label(), entry.message);
        }
        self.entries.push(entry);
    }

    pub fn has_fatal_or_hard(&self) -> bool {
        self.entries.iter().any(|e| matches!(e.severity, Severity::Fatal | Severity::Hard))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Counts + up to 3 examples per severity. Only emitted under `Summary`
    /// style — `Print` already surfaced each entry as it was recorded, so a
    /// trailing summary here would duplicate it.
    pub fn summary_json(&self) -> Option<serde_json::Value> {
        if self.entries.is_empty() || !matches!(self.style, ErrorReportStyle::Summary) {
            return None;
        }
        let mut counts: HashMap<&'static str, usize> = HashMap::new();
        let mut examples: HashMap<&'static str, Vec<String>> = HashMap::new();
        for entry in &self.entries {
            let label = entry.severity.label();
            *counts.entry(label).or_insert(0) += 1;
            let bucket = examples.entry(label).or_default();
            if bucket.len() < 3 {
                bucket.push(entry.message.clone());
            }
        }
        let mut summary = json!({});
        for (label, count) in &counts {
            summary[label] = json!({
                "count": count,
                "examples": examples.get(label).cloned().unwrap_or_default(),
            });
        }
        Some(summary)
    }

    pub fn print_summary(&self) {
        if let Some(summary) = self.summary_json() {
            eprintln!("{}", serde_json::to_string_pretty(&summary).unwrap_or_default());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn off_style_suppresses_printing_but_still_tracks() {
        let mut diag = Diagnostics::new(ErrorReportStyle::Off);
        diag.record(Severity::Soft, "clamped density", None);
        assert!(!diag.is_empty());
        assert!(diag.summary_json().is_none());
    }

    #[test]
    fn hard_errors_flag_failure() {
        let mut diag = Diagnostics::new(ErrorReportStyle::Summary);
        diag.record(Severity::Medium, "parse error", None);
        assert!(!diag.has_fatal_or_hard());
        diag.record(Severity::Hard, "bad flag", None);
        assert!(diag.has_fatal_or_hard());
    }

    #[test]
    fn summary_caps_examples_at_three() {
        let mut diag = Diagnostics::new(ErrorReportStyle::Summary);
        for i in 0..5 {
            diag.record(Severity::Soft, format!("warning {i}"), None);
        }
        let summary = diag.summary_json().unwrap();
        assert_eq!(summary["soft"]["count"], 5);
        assert_eq!(summary["soft"]["examples"].as_array().unwrap().len(), 3);
    }
}

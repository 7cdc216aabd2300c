// src/reporting.rs
//! Renders the two plain-text reports printed by the binary.

use std::fmt::Write;

use crate::analysis::collector::ComplexityCollector;
use crate::analysis::naming::NamingChecker;

/// The "Top 3" complexity listing.
#[must_use]
pub fn complexity_report(collector: &ComplexityCollector) -> String {
    let mut out = String::from("Top 3 methods with the Highest Complexity:\n");
    for record in collector.top_k(3) {
        let _ = writeln!(out, "{record}");
    }
    out
}

/// The style report: parse failures, the aggregate percentage (or the
/// no-methods message), and the non-compliant listing.
#[must_use]
pub fn style_report(checker: &NamingChecker, failed_files: &[String]) -> String {
    let mut out = String::new();

    if !failed_files.is_empty() {
        out.push_str("Files that failed to parse:\n");
        for file in failed_files {
            let _ = writeln!(out, "{file}");
        }
    }

    match checker.non_compliant_percentage() {
        Some(pct) => {
            let _ = writeln!(out, "Non-camelCase method names: {pct:.2}% of all methods");
        }
        None => out.push_str("No methods found in the provided directory.\n"),
    }

    if !checker.non_compliant().is_empty() {
        out.push_str("Non-camelCase Methods:\n");
        for entry in checker.non_compliant() {
            let _ = writeln!(out, "{entry}");
        }
    }

    out
}

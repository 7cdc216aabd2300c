// src/analysis/naming.rs
//! Method-name convention checks (lowerCamelCase).

use std::sync::LazyLock;

use regex::Regex;

use super::UnitAnalyzer;
use crate::source::CompilationUnit;

static LOWER_CAMEL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new("^[a-z]+[a-zA-Z0-9]*$").unwrap_or_else(|_| panic!("Invalid Regex"))
});

/// Whether `name` follows lowerCamelCase: starts with a lowercase letter,
/// continues with letters or digits only. Underscores fail.
#[must_use]
pub fn is_lower_camel_case(name: &str) -> bool {
    LOWER_CAMEL_RE.is_match(name)
}

/// Counts methods and records the non-compliant ones with their file.
#[derive(Debug, Default)]
pub struct NamingChecker {
    total_methods: usize,
    non_compliant: Vec<String>,
}

impl NamingChecker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn total_methods(&self) -> usize {
        self.total_methods
    }

    /// Entries of the form `<name> in file: <path>`, in discovery order.
    #[must_use]
    pub fn non_compliant(&self) -> &[String] {
        &self.non_compliant
    }

    /// Share of non-compliant names, in percent. `None` when no methods were
    /// examined (the caller reports "no methods found" instead of dividing).
    #[must_use]
    pub fn non_compliant_percentage(&self) -> Option<f64> {
        if self.total_methods == 0 {
            return None;
        }
        Some(self.non_compliant.len() as f64 / self.total_methods as f64 * 100.0)
    }
}

impl UnitAnalyzer for NamingChecker {
    fn reset(&mut self) {
        self.total_methods = 0;
        self.non_compliant.clear();
    }

    fn analyze_unit(&mut self, unit: &CompilationUnit, relative_path: &str) {
        for decl in &unit.types {
            for method in &decl.methods {
                self.total_methods += 1;
                if !is_lower_camel_case(&method.name) {
                    self.non_compliant
                        .push(format!("{} in file: {}", method.name, relative_path));
                }
            }
        }
    }
}

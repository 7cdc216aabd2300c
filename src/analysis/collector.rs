// src/analysis/collector.rs
//! Accumulates per-method complexity records across a directory load.

use std::fmt;

use serde::Serialize;

use super::complexity::ComplexityVisitor;
use super::UnitAnalyzer;
use crate::source::{CompilationUnit, Method};

/// Complexity details of one analyzed method: name, file, score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MethodComplexity {
    pub method_name: String,
    pub file_name: String,
    pub complexity: i32,
}

impl fmt::Display for MethodComplexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "methodName={}, fileName={}, complexity={}",
            self.method_name, self.file_name, self.complexity
        )
    }
}

/// Runs the visitor over every method it is handed and keeps the records in
/// insertion order. Overloaded methods produce side-by-side records; nothing
/// is deduplicated.
#[derive(Debug, Default)]
pub struct ComplexityCollector {
    methods: Vec<MethodComplexity>,
}

impl ComplexityCollector {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Scores one method and appends its record.
    pub fn record(&mut self, method: &Method, relative_path: &str) -> &MethodComplexity {
        let complexity = ComplexityVisitor::calculate(method);
        self.methods.push(MethodComplexity {
            method_name: method.name.clone(),
            file_name: relative_path.to_string(),
            complexity,
        });
        &self.methods[self.methods.len() - 1]
    }

    /// The `k` highest-complexity records, recomputed on each call.
    /// Descending by score; ties keep insertion order (stable sort).
    #[must_use]
    pub fn top_k(&self, k: usize) -> Vec<&MethodComplexity> {
        let mut ranked: Vec<&MethodComplexity> = self.methods.iter().collect();
        ranked.sort_by(|a, b| b.complexity.cmp(&a.complexity));
        ranked.truncate(k);
        ranked
    }

    #[must_use]
    pub fn methods(&self) -> &[MethodComplexity] {
        &self.methods
    }
}

impl UnitAnalyzer for ComplexityCollector {
    fn reset(&mut self) {
        self.methods.clear();
    }

    fn analyze_unit(&mut self, unit: &CompilationUnit, relative_path: &str) {
        for decl in &unit.types {
            for method in &decl.methods {
                self.record(method, relative_path);
            }
        }
    }
}

// src/analysis/complexity.rs
//! McCabe cyclomatic complexity for one method body.

use crate::source::{AstNode, Method};

/// Walks a method's statement tree once, accumulating decision and exit
/// points, then derives the score.
///
/// The score is the standard `E - N + 2P` specialized to a per-method graph:
/// a non-void method with at least one explicit `return` scores
/// `decision_points - exit_points + 2`; every other combination treats the
/// method as having exactly one implicit exit and scores
/// `decision_points + 1`. The branch condition is exactly
/// "non-void AND exit_points > 0".
#[derive(Debug)]
pub struct ComplexityVisitor {
    decision_points: i32,
    exit_points: i32,
    non_void: bool,
}

impl ComplexityVisitor {
    #[must_use]
    pub fn new(non_void: bool) -> Self {
        Self {
            decision_points: 0,
            exit_points: 0,
            non_void,
        }
    }

    /// Runs a fresh visitor over `method` and returns its score.
    #[must_use]
    pub fn calculate(method: &Method) -> i32 {
        let mut visitor = Self::new(method.is_non_void());
        visitor.visit_all(&method.body);
        visitor.complexity()
    }

    pub fn visit_all(&mut self, nodes: &[AstNode]) {
        for node in nodes {
            self.visit(node);
        }
    }

    pub fn visit(&mut self, node: &AstNode) {
        match node {
            AstNode::If {
                condition,
                then_branch,
                else_branch,
            } => {
                self.decision_points += 1;
                self.visit(condition);
                self.visit(then_branch);
                if let Some(alt) = else_branch {
                    self.visit(alt);
                }
            }
            AstNode::For { header, body } => {
                self.decision_points += 1;
                self.visit_all(header);
                self.visit(body);
            }
            AstNode::ForEach { iterable, body } => {
                self.decision_points += 1;
                self.visit(iterable);
                self.visit(body);
            }
            AstNode::While { condition, body } => {
                self.decision_points += 1;
                self.visit(condition);
                self.visit(body);
            }
            AstNode::DoWhile { body, condition } => {
                self.decision_points += 1;
                self.visit(body);
                self.visit(condition);
            }
            AstNode::Switch { selector, entries } => {
                // One point per entry; a default (unlabeled) entry adds none.
                self.decision_points += i32::try_from(entries.len()).unwrap_or(i32::MAX);
                if entries.iter().any(|e| !e.labeled) {
                    self.decision_points -= 1;
                }
                self.visit(selector);
                for entry in entries {
                    self.visit_all(&entry.body);
                }
            }
            AstNode::Try {
                resources,
                body,
                catches,
                finally_block,
            } => {
                // The try body itself adds nothing.
                self.decision_points += i32::try_from(catches.len()).unwrap_or(i32::MAX);
                if finally_block.is_some() {
                    self.decision_points += 1;
                }
                self.visit_all(resources);
                self.visit(body);
                self.visit_all(catches);
                if let Some(fin) = finally_block {
                    self.visit(fin);
                }
            }
            AstNode::Conditional {
                condition,
                consequence,
                alternative,
            } => {
                self.decision_points += 1;
                self.visit(condition);
                self.visit(consequence);
                self.visit(alternative);
            }
            AstNode::Return { value } => {
                self.exit_points += 1;
                if let Some(v) = value {
                    self.visit(v);
                }
            }
            AstNode::Group { children } => self.visit_all(children),
        }
    }

    #[must_use]
    pub fn complexity(&self) -> i32 {
        if self.non_void && self.exit_points > 0 {
            return self.decision_points - self.exit_points + 2;
        }
        // Void method: one implicit return-exit point: d - 1 + 1 = d + 1
        self.decision_points + 1
    }

    #[must_use]
    pub fn decision_points(&self) -> i32 {
        self.decision_points
    }

    #[must_use]
    pub fn exit_points(&self) -> i32 {
        self.exit_points
    }
}

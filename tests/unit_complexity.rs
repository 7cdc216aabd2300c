// tests/unit_complexity.rs
use cyclomet_core::analysis::collector::{ComplexityCollector, MethodComplexity};
use cyclomet_core::analysis::complexity::ComplexityVisitor;
use cyclomet_core::analysis::UnitAnalyzer;
use cyclomet_core::source::{AstNode, CompilationUnit, Method, SwitchEntry, TypeDecl};

// --- Tree-building helpers ---

fn void_method(body: Vec<AstNode>) -> Method {
    Method {
        name: "m".to_string(),
        return_type: None,
        body,
    }
}

fn int_method(body: Vec<AstNode>) -> Method {
    Method {
        name: "m".to_string(),
        return_type: Some("int".to_string()),
        body,
    }
}

fn ret() -> AstNode {
    AstNode::Return { value: None }
}

fn branch(else_branch: Option<AstNode>) -> AstNode {
    AstNode::If {
        condition: Box::new(AstNode::leaf()),
        then_branch: Box::new(AstNode::leaf()),
        else_branch: else_branch.map(Box::new),
    }
}

fn switch(labeled: usize, with_default: bool) -> AstNode {
    let mut entries: Vec<SwitchEntry> = (0..labeled)
        .map(|_| SwitchEntry {
            labeled: true,
            body: Vec::new(),
        })
        .collect();
    if with_default {
        entries.push(SwitchEntry {
            labeled: false,
            body: Vec::new(),
        });
    }
    AstNode::Switch {
        selector: Box::new(AstNode::leaf()),
        entries,
    }
}

// --- Visitor properties ---

#[test]
fn test_no_decisions_one_return_non_void_scores_one() {
    assert_eq!(ComplexityVisitor::calculate(&int_method(vec![ret()])), 1);
}

#[test]
fn test_no_decisions_void_no_returns_scores_one() {
    assert_eq!(ComplexityVisitor::calculate(&void_method(vec![])), 1);
}

#[test]
fn test_void_with_return_still_uses_additive_formula() {
    // The subtractive formula needs non-void AND at least one return.
    assert_eq!(ComplexityVisitor::calculate(&void_method(vec![ret()])), 1);
    assert_eq!(
        ComplexityVisitor::calculate(&void_method(vec![branch(None), ret()])),
        2
    );
}

#[test]
fn test_non_void_without_returns_uses_additive_formula() {
    assert_eq!(ComplexityVisitor::calculate(&int_method(vec![])), 1);
    assert_eq!(
        ComplexityVisitor::calculate(&int_method(vec![branch(None)])),
        2
    );
}

#[test]
fn test_if_else_is_one_decision_point() {
    let mut visitor = ComplexityVisitor::new(false);
    visitor.visit(&branch(Some(AstNode::leaf())));
    assert_eq!(visitor.decision_points(), 1);
}

#[test]
fn test_chained_else_if_counts_each_head() {
    let chained = branch(Some(branch(Some(AstNode::leaf()))));
    let mut visitor = ComplexityVisitor::new(false);
    visitor.visit(&chained);
    assert_eq!(visitor.decision_points(), 2);
}

#[test]
fn test_switch_default_entry_adds_nothing() {
    let mut with_default = ComplexityVisitor::new(false);
    with_default.visit(&switch(3, true));
    assert_eq!(with_default.decision_points(), 3);

    let mut without_default = ComplexityVisitor::new(false);
    without_default.visit(&switch(3, false));
    assert_eq!(without_default.decision_points(), 3);
}

#[test]
fn test_try_counts_catches_and_finally() {
    let stmt = AstNode::Try {
        resources: Vec::new(),
        body: Box::new(AstNode::leaf()),
        catches: vec![AstNode::leaf(), AstNode::leaf()],
        finally_block: Some(Box::new(AstNode::leaf())),
    };
    let mut visitor = ComplexityVisitor::new(false);
    visitor.visit(&stmt);
    assert_eq!(visitor.decision_points(), 3);
}

#[test]
fn test_nested_ternaries_count_each_occurrence() {
    let nested = AstNode::Conditional {
        condition: Box::new(AstNode::leaf()),
        consequence: Box::new(AstNode::Conditional {
            condition: Box::new(AstNode::leaf()),
            consequence: Box::new(AstNode::leaf()),
            alternative: Box::new(AstNode::leaf()),
        }),
        alternative: Box::new(AstNode::leaf()),
    };
    let mut visitor = ComplexityVisitor::new(false);
    visitor.visit(&nested);
    assert_eq!(visitor.decision_points(), 2);
}

#[test]
fn test_every_loop_kind_counts_once() {
    let loops = vec![
        AstNode::For {
            header: Vec::new(),
            body: Box::new(AstNode::leaf()),
        },
        AstNode::ForEach {
            iterable: Box::new(AstNode::leaf()),
            body: Box::new(AstNode::leaf()),
        },
        AstNode::While {
            condition: Box::new(AstNode::leaf()),
            body: Box::new(AstNode::leaf()),
        },
        AstNode::DoWhile {
            body: Box::new(AstNode::leaf()),
            condition: Box::new(AstNode::leaf()),
        },
    ];
    let mut visitor = ComplexityVisitor::new(false);
    visitor.visit_all(&loops);
    assert_eq!(visitor.decision_points(), 4);
}

#[test]
fn test_returns_count_at_any_depth() {
    let buried = AstNode::Group {
        children: vec![AstNode::Group {
            children: vec![ret(), ret()],
        }],
    };
    let mut visitor = ComplexityVisitor::new(true);
    visitor.visit(&buried);
    assert_eq!(visitor.exit_points(), 2);
}

#[test]
fn test_subtractive_formula_applies_verbatim() {
    // 2 decisions, 3 returns, non-void: 2 - 3 + 2 = 1.
    let body = vec![branch(None), branch(None), ret(), ret(), ret()];
    assert_eq!(ComplexityVisitor::calculate(&int_method(body)), 1);
}

// --- Collector ---

fn unit_with(methods: Vec<Method>) -> CompilationUnit {
    CompilationUnit {
        types: vec![TypeDecl {
            name: "Example".to_string(),
            methods,
        }],
    }
}

fn named(name: &str, decisions: usize) -> Method {
    let body = (0..decisions).map(|_| branch(None)).collect();
    Method {
        name: name.to_string(),
        return_type: None,
        body,
    }
}

#[test]
fn test_top_k_is_descending_and_stable_on_ties() {
    let mut collector = ComplexityCollector::new();
    collector.analyze_unit(
        &unit_with(vec![named("low", 0), named("first", 1), named("second", 1)]),
        "Example.java",
    );

    let top = collector.top_k(3);
    assert_eq!(top[0].method_name, "first");
    assert_eq!(top[1].method_name, "second");
    assert_eq!(top[2].method_name, "low");

    // Recomputed fresh, truncated to k.
    assert_eq!(collector.top_k(2).len(), 2);
}

#[test]
fn test_overloads_produce_separate_records() {
    let mut collector = ComplexityCollector::new();
    collector.analyze_unit(
        &unit_with(vec![named("same", 0), named("same", 1)]),
        "Example.java",
    );
    assert_eq!(collector.methods().len(), 2);
}

#[test]
fn test_reset_clears_previous_records() {
    let mut collector = ComplexityCollector::new();
    collector.analyze_unit(&unit_with(vec![named("m", 0)]), "Example.java");
    collector.reset();
    assert!(collector.methods().is_empty());
}

#[test]
fn test_record_display_format() {
    let record = MethodComplexity {
        method_name: "conditionalMethod".to_string(),
        file_name: "Example.java".to_string(),
        complexity: 2,
    };
    assert_eq!(
        record.to_string(),
        "methodName=conditionalMethod, fileName=Example.java, complexity=2"
    );
}

#[test]
fn test_record_serializes() {
    let record = MethodComplexity {
        method_name: "m".to_string(),
        file_name: "Example.java".to_string(),
        complexity: 4,
    };
    let json = serde_json::to_string(&record).expect("serializable");
    assert!(json.contains("\"complexity\":4"));
}

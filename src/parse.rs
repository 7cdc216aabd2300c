// src/parse.rs
//! Parses Java source text with tree-sitter and lowers the concrete tree
//! into the typed model in [`crate::source`].
//!
//! tree-sitter is error-tolerant, so "parse failure" here means the produced
//! tree contains ERROR or MISSING nodes; such files are rejected wholesale
//! and surfaced as diagnostics by the loader.

use thiserror::Error;
use tree_sitter::{Node, Parser};

use crate::source::{AstNode, CompilationUnit, Method, SwitchEntry, TypeDecl};

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to load Java grammar: {0}")]
    Language(#[from] tree_sitter::LanguageError),

    #[error("syntax error near line {0}")]
    Syntax(usize),

    #[error("parser returned no syntax tree")]
    NoTree,
}

/// Parses one Java source file into a [`CompilationUnit`].
///
/// # Errors
/// Returns [`ParseError::Syntax`] when the tree contains any error node,
/// with the 1-based line of the first one.
pub fn parse_unit(source: &str) -> Result<CompilationUnit, ParseError> {
    let mut parser = Parser::new();
    parser.set_language(&tree_sitter_java::language())?;

    let tree = parser.parse(source, None).ok_or(ParseError::NoTree)?;
    let root = tree.root_node();
    if root.has_error() {
        return Err(ParseError::Syntax(first_error_line(root)));
    }

    Ok(lower_unit(root, source.as_bytes()))
}

fn first_error_line(node: Node) -> usize {
    if node.is_error() || node.is_missing() {
        return node.start_position().row + 1;
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.has_error() {
            return first_error_line(child);
        }
    }
    node.start_position().row + 1
}

fn lower_unit(root: Node, src: &[u8]) -> CompilationUnit {
    let mut types = Vec::new();
    let mut cursor = root.walk();
    for child in root.named_children(&mut cursor) {
        if matches!(
            child.kind(),
            "class_declaration"
                | "interface_declaration"
                | "enum_declaration"
                | "record_declaration"
        ) {
            types.push(lower_type(child, src));
        }
    }
    CompilationUnit { types }
}

fn lower_type(node: Node, src: &[u8]) -> TypeDecl {
    let name = node
        .child_by_field_name("name")
        .map(|n| node_text(n, src))
        .unwrap_or_default();

    let mut methods = Vec::new();
    if let Some(body) = node.child_by_field_name("body") {
        collect_methods(body, src, &mut methods);
    }
    TypeDecl { name, methods }
}

fn collect_methods(body: Node, src: &[u8], out: &mut Vec<Method>) {
    let mut cursor = body.walk();
    for child in body.named_children(&mut cursor) {
        match child.kind() {
            "method_declaration" => out.push(lower_method(child, src)),
            // Enum members live behind a `;` in a nested declarations node.
            "enum_body_declarations" => collect_methods(child, src, out),
            _ => {}
        }
    }
}

fn lower_method(node: Node, src: &[u8]) -> Method {
    let name = node
        .child_by_field_name("name")
        .map(|n| node_text(n, src))
        .unwrap_or_default();

    let return_type = node
        .child_by_field_name("type")
        .filter(|n| n.kind() != "void_type")
        .map(|n| node_text(n, src));

    let body = node
        .child_by_field_name("body")
        .map(|b| lower_children(b, src))
        .unwrap_or_default();

    Method {
        name,
        return_type,
        body,
    }
}

/// Lowers one concrete node. Recognized control structures get their typed
/// variant; anything else keeps its children under [`AstNode::Group`], which
/// is what lets ternaries and returns at arbitrary depth stay visible.
fn lower_node(node: Node, src: &[u8]) -> AstNode {
    match node.kind() {
        "if_statement" => AstNode::If {
            condition: lower_field(node, "condition", src),
            then_branch: lower_field(node, "consequence", src),
            else_branch: node
                .child_by_field_name("alternative")
                .map(|n| Box::new(lower_node(n, src))),
        },
        "for_statement" => AstNode::For {
            header: lower_for_header(node, src),
            body: lower_field(node, "body", src),
        },
        "enhanced_for_statement" => AstNode::ForEach {
            iterable: lower_field(node, "value", src),
            body: lower_field(node, "body", src),
        },
        "while_statement" => AstNode::While {
            condition: lower_field(node, "condition", src),
            body: lower_field(node, "body", src),
        },
        "do_statement" => AstNode::DoWhile {
            body: lower_field(node, "body", src),
            condition: lower_field(node, "condition", src),
        },
        "switch_expression" | "switch_statement" => AstNode::Switch {
            selector: lower_field(node, "condition", src),
            entries: node
                .child_by_field_name("body")
                .map(|b| lower_switch_entries(b, src))
                .unwrap_or_default(),
        },
        "try_statement" | "try_with_resources_statement" => lower_try(node, src),
        "ternary_expression" => AstNode::Conditional {
            condition: lower_field(node, "condition", src),
            consequence: lower_field(node, "consequence", src),
            alternative: lower_field(node, "alternative", src),
        },
        "return_statement" => AstNode::Return {
            value: first_named(node).map(|n| Box::new(lower_node(n, src))),
        },
        _ => AstNode::Group {
            children: lower_children(node, src),
        },
    }
}

fn lower_field(node: Node, field: &str, src: &[u8]) -> Box<AstNode> {
    Box::new(
        node.child_by_field_name(field)
            .map(|n| lower_node(n, src))
            .unwrap_or_else(AstNode::leaf),
    )
}

fn lower_children(node: Node, src: &[u8]) -> Vec<AstNode> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|c| !is_comment(*c))
        .map(|c| lower_node(c, src))
        .collect()
}

fn lower_for_header(node: Node, src: &[u8]) -> Vec<AstNode> {
    let mut header = Vec::new();
    for field in ["init", "condition", "update"] {
        let mut cursor = node.walk();
        for child in node.children_by_field_name(field, &mut cursor) {
            header.push(lower_node(child, src));
        }
    }
    header
}

fn lower_try(node: Node, src: &[u8]) -> AstNode {
    let resources = node
        .child_by_field_name("resources")
        .map(|r| lower_children(r, src))
        .unwrap_or_default();

    let mut catches = Vec::new();
    let mut finally_block = None;
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        match child.kind() {
            "catch_clause" => catches.push(*lower_field(child, "body", src)),
            "finally_clause" => {
                finally_block = first_named(child).map(|b| Box::new(lower_node(b, src)));
            }
            _ => {}
        }
    }

    AstNode::Try {
        resources,
        body: lower_field(node, "body", src),
        catches,
        finally_block,
    }
}

fn lower_switch_entries(block: Node, src: &[u8]) -> Vec<SwitchEntry> {
    let mut entries = Vec::new();
    let mut cursor = block.walk();
    for group in block.named_children(&mut cursor) {
        match group.kind() {
            // Old-style `case 1: case 2: stmts` — one entry per label, the
            // group's statements attached to the last label, like JavaParser.
            "switch_block_statement_group" => {
                let mut body = Vec::new();
                let first = entries.len();
                let mut inner = group.walk();
                for child in group.named_children(&mut inner) {
                    if child.kind() == "switch_label" {
                        entries.push(SwitchEntry {
                            labeled: !is_default_label(child),
                            body: Vec::new(),
                        });
                    } else if !is_comment(child) {
                        body.push(lower_node(child, src));
                    }
                }
                if entries.len() > first {
                    if let Some(last) = entries.last_mut() {
                        last.body = body;
                    }
                }
            }
            // Arrow-style `case 1 -> expr`.
            "switch_rule" => {
                let mut labeled = true;
                let mut body = Vec::new();
                let mut inner = group.walk();
                for child in group.named_children(&mut inner) {
                    if child.kind() == "switch_label" {
                        labeled = !is_default_label(child);
                    } else if !is_comment(child) {
                        body.push(lower_node(child, src));
                    }
                }
                entries.push(SwitchEntry { labeled, body });
            }
            _ => {}
        }
    }
    entries
}

fn is_default_label(label: Node) -> bool {
    label.child(0).is_some_and(|c| c.kind() == "default")
}

fn is_comment(node: Node) -> bool {
    matches!(node.kind(), "line_comment" | "block_comment")
}

fn first_named(node: Node) -> Option<Node> {
    let mut cursor = node.walk();
    let result = node.named_children(&mut cursor)
        .find(|c| !is_comment(*c));
    result
}

fn node_text(node: Node, src: &[u8]) -> String {
    node.utf8_text(src).unwrap_or("").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::AstNode;

    fn parse(source: &str) -> CompilationUnit {
        parse_unit(source).expect("source should parse")
    }

    #[test]
    fn test_extracts_types_and_methods() {
        let unit = parse("public class Calc { public int add(int a, int b) { return a + b; } }");
        assert_eq!(unit.types.len(), 1);
        assert_eq!(unit.types[0].name, "Calc");
        assert_eq!(unit.types[0].methods.len(), 1);
        assert_eq!(unit.types[0].methods[0].name, "add");
        assert_eq!(unit.types[0].methods[0].return_type.as_deref(), Some("int"));
    }

    #[test]
    fn test_void_method_has_no_return_type() {
        let unit = parse("class A { void run() {} }");
        assert!(!unit.types[0].methods[0].is_non_void());
    }

    #[test]
    fn test_constructors_are_not_methods() {
        let unit = parse("class A { A() {} void run() {} }");
        assert_eq!(unit.types[0].methods.len(), 1);
        assert_eq!(unit.types[0].methods[0].name, "run");
    }

    #[test]
    fn test_interface_and_enum_methods() {
        let unit = parse("interface R { String read(); }");
        assert_eq!(unit.types[0].methods.len(), 1);
        assert!(unit.types[0].methods[0].body.is_empty());

        let unit = parse("enum E { A, B; void describe() {} }");
        assert_eq!(unit.types[0].methods.len(), 1);
        assert_eq!(unit.types[0].methods[0].name, "describe");
    }

    #[test]
    fn test_switch_labels_split_into_entries() {
        let unit = parse(
            "class A { void f(int x) { switch (x) { case 1: break; case 2: break; default: break; } } }",
        );
        let body = &unit.types[0].methods[0].body;
        let Some(AstNode::Switch { entries, .. }) = find_switch(body) else {
            panic!("expected a lowered switch");
        };
        assert_eq!(entries.len(), 3);
        assert_eq!(entries.iter().filter(|e| !e.labeled).count(), 1);
    }

    #[test]
    fn test_else_if_lowers_to_nested_if() {
        let unit = parse("class A { void f(int x) { if (x > 0) { } else if (x < 0) { } } }");
        let body = &unit.types[0].methods[0].body;
        let Some(AstNode::If { else_branch, .. }) = body.first() else {
            panic!("expected if statement");
        };
        assert!(matches!(
            else_branch.as_deref(),
            Some(AstNode::If { .. })
        ));
    }

    #[test]
    fn test_malformed_source_is_a_syntax_error() {
        let err = parse_unit("class A { void f( {").expect_err("should not parse");
        assert!(matches!(err, ParseError::Syntax(_)));
    }

    fn find_switch(nodes: &[AstNode]) -> Option<&AstNode> {
        for node in nodes {
            match node {
                AstNode::Switch { .. } => return Some(node),
                AstNode::Group { children } => {
                    if let Some(found) = find_switch(children) {
                        return Some(found);
                    }
                }
                _ => {}
            }
        }
        None
    }
}

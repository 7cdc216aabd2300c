// src/source.rs
//! Typed model of a parsed Java compilation unit.
//!
//! The lowering in [`crate::parse`] reduces the concrete tree-sitter tree to
//! these variants. Control structures that affect the complexity metric keep
//! typed sub-clause fields; everything else collapses into [`AstNode::Group`],
//! which preserves the children so nested constructs are still reachable.

/// One parsed source file: the top-level type declarations it contains.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompilationUnit {
    pub types: Vec<TypeDecl>,
}

/// A class, interface, enum, or record declaration with its member methods.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDecl {
    pub name: String,
    pub methods: Vec<Method>,
}

/// A method declaration. `return_type` is `None` for `void` methods.
#[derive(Debug, Clone, PartialEq)]
pub struct Method {
    pub name: String,
    pub return_type: Option<String>,
    pub body: Vec<AstNode>,
}

impl Method {
    /// Whether the method declares a non-void return type.
    #[must_use]
    pub fn is_non_void(&self) -> bool {
        self.return_type.is_some()
    }
}

/// One entry of a `switch` body. `labeled` is false for the `default` entry.
#[derive(Debug, Clone, PartialEq)]
pub struct SwitchEntry {
    pub labeled: bool,
    pub body: Vec<AstNode>,
}

/// Statement and expression kinds, tagged. Uninterpreted nodes become
/// `Group`, keeping their children for traversal.
#[derive(Debug, Clone, PartialEq)]
pub enum AstNode {
    If {
        condition: Box<AstNode>,
        then_branch: Box<AstNode>,
        else_branch: Option<Box<AstNode>>,
    },
    For {
        header: Vec<AstNode>,
        body: Box<AstNode>,
    },
    ForEach {
        iterable: Box<AstNode>,
        body: Box<AstNode>,
    },
    While {
        condition: Box<AstNode>,
        body: Box<AstNode>,
    },
    DoWhile {
        body: Box<AstNode>,
        condition: Box<AstNode>,
    },
    Switch {
        selector: Box<AstNode>,
        entries: Vec<SwitchEntry>,
    },
    Try {
        resources: Vec<AstNode>,
        body: Box<AstNode>,
        catches: Vec<AstNode>,
        finally_block: Option<Box<AstNode>>,
    },
    /// Ternary conditional expression.
    Conditional {
        condition: Box<AstNode>,
        consequence: Box<AstNode>,
        alternative: Box<AstNode>,
    },
    Return {
        value: Option<Box<AstNode>>,
    },
    Group {
        children: Vec<AstNode>,
    },
}

impl AstNode {
    /// An empty, uninterpreted node. Handy when building trees by hand.
    #[must_use]
    pub fn leaf() -> Self {
        AstNode::Group {
            children: Vec::new(),
        }
    }
}

//! # Core AST - Canonical Expressions
//!
//! This module defines the **canonical expression tree**, the single
//! representation shared by the type inferencer and the evaluator. It is
//! produced by normalization ([`crate::desugar`]) and never mutated afterwards.
//!
//! ## Pipeline Position
//!
//! ```text
//! Parser → Raw AST → Normalizer → [CORE AST] → Type Inference → Evaluator
//! ```
//!
//! ## Node Shapes
//!
//! ```text
//! pub enum CoreExpr {
//!     Literal(CoreLiteral),                  // 7, "hi", ()
//!     Reference(CoreReference),              // a library entry, looked up by name
//!     Var(CoreVar),                          // a lexical binding
//!     Apply(CoreApply),                      // f(x)      (single argument)
//!     Abstraction(CoreAbstraction),          // fn(x){ body }  (single parameter)
//!     Let(CoreLet),                          // let x = e1 in e2  (polymorphic)
//!     Sequence(CoreSequence),                // e1; e2
//!     WithDefinitions(CoreWithDefinitions),  // hoisted class declarations
//! }
//! ```
//!
//! ### `Reference` vs `Var`
//!
//! A `Reference` is resolved against the library table only. A missing entry
//! means the program was linked against the wrong library, which is reported
//! as a program error rather than a type error. A `Var` is resolved against
//! the lexical scope; a missing binding is an ordinary type error.
//!
//! ### Classes
//!
//! Class support is deliberately minimal. A [`CoreClassDef`] introduces a
//! nominal type with the class name and a zero-argument constructor named
//! `"<Name>.new"`. Method bodies are carried in the tree but neither type
//! checked nor evaluated.
//!
//! ## Related Modules
//!
//! - [`crate::desugar`] - builds the Core AST from the raw AST
//! - [`crate::types`] - infers types over the Core AST
//! - [`crate::interpreter`] - evaluates the Core AST

use std::sync::Arc;

/// Payload of a literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LiteralValue {
    Int(i64),
    String(String),
    Unit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreExpr {
    Literal(CoreLiteral),
    Reference(CoreReference),
    Var(CoreVar),
    Apply(CoreApply),
    /// Shared so closures can hold the lambda without copying its body.
    Abstraction(Arc<CoreAbstraction>),
    Let(CoreLet),
    Sequence(CoreSequence),
    WithDefinitions(CoreWithDefinitions),
}

/// A literal tagged with the name of its type (`"Int"`, `"String"`, `"Unit"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreLiteral {
    pub type_name: String,
    pub value: LiteralValue,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreReference {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreVar {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreApply {
    pub func: Box<CoreExpr>,
    pub arg: Box<CoreExpr>,
}

/// Single-parameter function. `annotation` names the parameter's type when
/// the source spelled one out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreAbstraction {
    pub param: String,
    pub annotation: Option<String>,
    pub body: Box<CoreExpr>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreLet {
    pub name: String,
    pub value: Box<CoreExpr>,
    pub body: Box<CoreExpr>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreSequence {
    pub first: Box<CoreExpr>,
    pub second: Box<CoreExpr>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreWithDefinitions {
    pub defs: Vec<CoreClassDef>,
    pub body: Box<CoreExpr>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreClassDef {
    pub name: String,
    pub methods: Vec<CoreMethodDef>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreMethodDef {
    pub name: String,
    pub body: CoreAbstraction,
}

impl CoreClassDef {
    pub fn new(name: impl Into<String>) -> Self {
        CoreClassDef {
            name: name.into(),
            methods: Vec::new(),
        }
    }

    /// Name under which the class constructor is bound.
    pub fn constructor_name(&self) -> String {
        format!("{}.new", self.name)
    }
}

impl CoreExpr {
    pub fn int(value: i64) -> Self {
        CoreExpr::Literal(CoreLiteral {
            type_name: "Int".to_string(),
            value: LiteralValue::Int(value),
        })
    }

    pub fn string(value: impl Into<String>) -> Self {
        CoreExpr::Literal(CoreLiteral {
            type_name: "String".to_string(),
            value: LiteralValue::String(value.into()),
        })
    }

    pub fn unit() -> Self {
        CoreExpr::Literal(CoreLiteral {
            type_name: "Unit".to_string(),
            value: LiteralValue::Unit,
        })
    }

    pub fn literal(type_name: impl Into<String>, value: LiteralValue) -> Self {
        CoreExpr::Literal(CoreLiteral {
            type_name: type_name.into(),
            value,
        })
    }

    pub fn reference(name: impl Into<String>) -> Self {
        CoreExpr::Reference(CoreReference { name: name.into() })
    }

    pub fn var(name: impl Into<String>) -> Self {
        CoreExpr::Var(CoreVar { name: name.into() })
    }

    pub fn apply(func: CoreExpr, arg: CoreExpr) -> Self {
        CoreExpr::Apply(CoreApply {
            func: Box::new(func),
            arg: Box::new(arg),
        })
    }

    pub fn abstraction(param: impl Into<String>, annotation: Option<&str>, body: CoreExpr) -> Self {
        CoreExpr::Abstraction(Arc::new(CoreAbstraction {
            param: param.into(),
            annotation: annotation.map(str::to_string),
            body: Box::new(body),
        }))
    }

    pub fn let_in(name: impl Into<String>, value: CoreExpr, body: CoreExpr) -> Self {
        CoreExpr::Let(CoreLet {
            name: name.into(),
            value: Box::new(value),
            body: Box::new(body),
        })
    }

    pub fn sequence(first: CoreExpr, second: CoreExpr) -> Self {
        CoreExpr::Sequence(CoreSequence {
            first: Box::new(first),
            second: Box::new(second),
        })
    }

    pub fn with_definitions(defs: Vec<CoreClassDef>, body: CoreExpr) -> Self {
        CoreExpr::WithDefinitions(CoreWithDefinitions {
            defs,
            body: Box::new(body),
        })
    }

    /// Short tag naming the node shape, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            CoreExpr::Literal(_) => "lit",
            CoreExpr::Reference(_) => "ref",
            CoreExpr::Var(_) => "var",
            CoreExpr::Apply(_) => "app",
            CoreExpr::Abstraction(_) => "abs",
            CoreExpr::Let(_) => "let",
            CoreExpr::Sequence(_) => "seq",
            CoreExpr::WithDefinitions(_) => "withdef",
        }
    }
}

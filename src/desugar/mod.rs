//! Normalization - Transform the raw AST into the Core AST
//!
//! This module handles the structural rewrite from parser output to the
//! canonical expression tree:
//! - Statement lists → right-nested `let` / sequence chains
//! - Function definitions → `let`-bound single-parameter abstractions
//! - Class definitions → hoisted into one `WithDefinitions` wrapper
//!
//! ## Example
//!
//! ```text
//! def f(x: Int) 1 end      (let f (fn x: Int (lit Int 1))
//! f(2)                 →     (app (var f) (lit Int 2)))
//! ```

use std::sync::Arc;

use thiserror::Error;
use tracing::trace;

use crate::ast::{RawConst, RawExpr};
use crate::core::*;

/// Parameter name given to functions declared without one.
pub const DUMMY_PARAM: &str = "%dummy";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DesugarError {
    /// Class bodies may only contain method definitions.
    #[error("class {class} may only contain method definitions, found {found}")]
    InvalidClassMember { class: String, found: String },
}

/// Normalize a raw expression into the Core AST.
pub fn normalize(expr: RawExpr) -> Result<CoreExpr, DesugarError> {
    match expr {
        RawExpr::Const(constant) => Ok(normalize_const(constant)),
        RawExpr::VarRef(name) => Ok(CoreExpr::var(name)),
        RawExpr::Fn { param, body } => Ok(CoreExpr::abstraction(param, None, normalize(*body)?)),
        RawExpr::App { callee, arg } => Ok(CoreExpr::apply(normalize(*callee)?, normalize(*arg)?)),
        RawExpr::Seq(stmts) => normalize_seq(stmts),
        // a lone definition is a one-statement program
        def @ (RawExpr::Defun { .. } | RawExpr::Defvar { .. } | RawExpr::Defclass { .. }) => {
            normalize_seq(vec![def])
        }
    }
}

fn normalize_const(constant: RawConst) -> CoreExpr {
    match constant {
        RawConst::Int(value) => CoreExpr::int(value),
        RawConst::String(value) => CoreExpr::string(value),
        RawConst::Unit => CoreExpr::unit(),
    }
}

/// A statement after normalization, before it is folded into its successors.
enum Statement {
    Function(String, CoreExpr),
    Variable(String, CoreExpr),
    Expression(CoreExpr),
}

fn normalize_seq(stmts: Vec<RawExpr>) -> Result<CoreExpr, DesugarError> {
    let mut defs = Vec::new();
    let mut statements = Vec::new();

    for stmt in stmts {
        match stmt {
            RawExpr::Defclass { name, body } => defs.push(normalize_class(name, body)?),
            RawExpr::Defun {
                name,
                param,
                annotation,
                body,
            } => {
                let lambda = normalize_defun(param, annotation, body)?;
                statements.push(Statement::Function(name, CoreExpr::Abstraction(Arc::new(lambda))));
            }
            RawExpr::Defvar { name, value } => {
                statements.push(Statement::Variable(name, normalize(*value)?));
            }
            other => statements.push(Statement::Expression(normalize(other)?)),
        }
    }

    let body = statements
        .into_iter()
        .rev()
        .fold(None, |rest, stmt| {
            Some(match (stmt, rest) {
                (Statement::Function(name, lambda), None) => {
                    let var = CoreExpr::var(name.clone());
                    CoreExpr::let_in(name, lambda, var)
                }
                (Statement::Variable(_, value), None) => value,
                (Statement::Expression(expr), None) => expr,
                (Statement::Function(name, value), Some(rest))
                | (Statement::Variable(name, value), Some(rest)) => {
                    CoreExpr::let_in(name, value, rest)
                }
                (Statement::Expression(expr), Some(rest)) => CoreExpr::sequence(expr, rest),
            })
        })
        .unwrap_or_else(CoreExpr::unit);

    if defs.is_empty() {
        Ok(body)
    } else {
        trace!(classes = defs.len(), "hoisted class definitions");
        Ok(CoreExpr::with_definitions(defs, body))
    }
}

fn normalize_defun(
    param: Option<String>,
    annotation: Option<String>,
    body: Option<Box<RawExpr>>,
) -> Result<CoreAbstraction, DesugarError> {
    let (param, annotation) = match param {
        Some(param) => (param, annotation),
        None => (DUMMY_PARAM.to_string(), Some("Unit".to_string())),
    };
    let body = match body {
        Some(body) => normalize(*body)?,
        None => CoreExpr::unit(),
    };
    Ok(CoreAbstraction {
        param,
        annotation,
        body: Box::new(body),
    })
}

fn normalize_class(name: String, body: Vec<RawExpr>) -> Result<CoreClassDef, DesugarError> {
    let mut methods = Vec::new();
    for member in body {
        match member {
            RawExpr::Defun {
                name: method,
                param,
                annotation,
                body,
            } => methods.push(CoreMethodDef {
                name: method,
                body: normalize_defun(param, annotation, body)?,
            }),
            other => {
                return Err(DesugarError::InvalidClassMember {
                    class: name,
                    found: describe(&other).to_string(),
                });
            }
        }
    }
    Ok(CoreClassDef { name, methods })
}

fn describe(expr: &RawExpr) -> &'static str {
    match expr {
        RawExpr::Const(_) => "a constant",
        RawExpr::VarRef(_) => "a variable reference",
        RawExpr::Fn { .. } => "a function literal",
        RawExpr::App { .. } => "a function call",
        RawExpr::Seq(_) => "a statement list",
        RawExpr::Defun { .. } => "a function definition",
        RawExpr::Defvar { .. } => "a variable definition",
        RawExpr::Defclass { .. } => "a class definition",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_normalize_const() {
        assert_eq!(normalize(RawExpr::int(1)), Ok(CoreExpr::int(1)));
        assert_eq!(normalize(RawExpr::string("s")), Ok(CoreExpr::string("s")));
        assert_eq!(normalize(RawExpr::unit()), Ok(CoreExpr::unit()));
    }

    #[test]
    fn test_normalize_fn_has_no_annotation() {
        let expr = RawExpr::func("x", RawExpr::int(1));
        assert_eq!(
            normalize(expr),
            Ok(CoreExpr::abstraction("x", None, CoreExpr::int(1)))
        );
    }

    #[test]
    fn test_empty_seq_is_unit() {
        assert_eq!(normalize(RawExpr::seq(Vec::new())), Ok(CoreExpr::unit()));
    }

    #[test]
    fn test_single_statement_is_itself() {
        let expr = RawExpr::seq([RawExpr::var_ref("x")]);
        assert_eq!(normalize(expr), Ok(CoreExpr::var("x")));
    }

    #[test]
    fn test_trailing_defvar_is_its_value() {
        let expr = RawExpr::defvar("x", RawExpr::int(1));
        assert_eq!(normalize(expr), Ok(CoreExpr::int(1)));
    }

    #[test]
    fn test_trailing_defun_returns_function() {
        let expr = RawExpr::defun("f", Some(("x", None)), Some(RawExpr::var_ref("x")));
        assert_eq!(
            normalize(expr),
            Ok(CoreExpr::let_in(
                "f",
                CoreExpr::abstraction("x", None, CoreExpr::var("x")),
                CoreExpr::var("f"),
            ))
        );
    }

    #[test]
    fn test_class_member_must_be_method() {
        let expr = RawExpr::defclass("A", [RawExpr::int(1)]);
        assert_eq!(
            normalize(expr),
            Err(DesugarError::InvalidClassMember {
                class: "A".to_string(),
                found: "a constant".to_string(),
            })
        );
    }
}

//! Raw AST handed over by an external parser.
//!
//! The shapes mirror the surface language one to one. Nothing here is
//! consumed by inference or evaluation directly; [`crate::desugar::normalize`]
//! turns a [`RawExpr`] into the canonical [`crate::core::CoreExpr`].

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawConst {
    Int(i64),
    String(String),
    Unit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawExpr {
    Const(RawConst),
    VarRef(String),
    Fn {
        param: String,
        body: Box<RawExpr>,
    },
    App {
        callee: Box<RawExpr>,
        arg: Box<RawExpr>,
    },
    /// A statement list, as found at top level and in function bodies.
    Seq(Vec<RawExpr>),
    /// `def name(param: Annotation) body end`; parameter and body may be absent.
    Defun {
        name: String,
        param: Option<String>,
        annotation: Option<String>,
        body: Option<Box<RawExpr>>,
    },
    /// `name = value`
    Defvar {
        name: String,
        value: Box<RawExpr>,
    },
    /// `class Name body end`
    Defclass {
        name: String,
        body: Vec<RawExpr>,
    },
}

impl RawExpr {
    pub fn int(value: i64) -> Self {
        RawExpr::Const(RawConst::Int(value))
    }

    pub fn string(value: impl Into<String>) -> Self {
        RawExpr::Const(RawConst::String(value.into()))
    }

    pub fn unit() -> Self {
        RawExpr::Const(RawConst::Unit)
    }

    pub fn var_ref(name: impl Into<String>) -> Self {
        RawExpr::VarRef(name.into())
    }

    pub fn func(param: impl Into<String>, body: RawExpr) -> Self {
        RawExpr::Fn {
            param: param.into(),
            body: Box::new(body),
        }
    }

    pub fn app(callee: RawExpr, arg: RawExpr) -> Self {
        RawExpr::App {
            callee: Box::new(callee),
            arg: Box::new(arg),
        }
    }

    pub fn seq(stmts: impl IntoIterator<Item = RawExpr>) -> Self {
        RawExpr::Seq(stmts.into_iter().collect())
    }

    pub fn defun(
        name: impl Into<String>,
        param: Option<(&str, Option<&str>)>,
        body: Option<RawExpr>,
    ) -> Self {
        RawExpr::Defun {
            name: name.into(),
            param: param.map(|(p, _)| p.to_string()),
            annotation: param.and_then(|(_, a)| a.map(str::to_string)),
            body: body.map(Box::new),
        }
    }

    pub fn defvar(name: impl Into<String>, value: RawExpr) -> Self {
        RawExpr::Defvar {
            name: name.into(),
            value: Box::new(value),
        }
    }

    pub fn defclass(name: impl Into<String>, body: impl IntoIterator<Item = RawExpr>) -> Self {
        RawExpr::Defclass {
            name: name.into(),
            body: body.into_iter().collect(),
        }
    }

}

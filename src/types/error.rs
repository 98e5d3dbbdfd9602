//! # Type Error Definitions
//!
//! Inference can fail in two unrelated ways:
//!
//! - [`InferenceError`] - the program is ill-typed: a local variable is unbound,
//!   two types do not unify, or unification would build an infinite type.
//! - [`ProgramError`] - the program refers to a library entry that does not exist.
//!   This is a linkage problem between the program and its host, not a type error,
//!   and is never reported to an end user as one.
//!
//! Both are folded into [`TypeError`], the error type of the inference entry points.
//!
//! ## Example Error Messages
//!
//! ```text
//! unbound variable: x
//! type mismatch: Int vs String
//! unification error: cannot unify Int with 't0 -> 't1
//! cannot construct infinite type: 't0 = 't0 -> Int
//! class name String is reserved for a builtin type
//! unknown library reference: succ
//! ```

use thiserror::Error;

use super::ty::{Type, TypeVar};

/// The program is not well typed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InferenceError {
    /// A `Var` node names a binding absent from the assumption.
    #[error("unbound variable: {name}")]
    UnboundVariable { name: String },

    /// Two distinct named types were required to be equal.
    #[error("type mismatch: {left} vs {right}")]
    Mismatch { left: String, right: String },

    /// Two types of different shape (e.g. a named type and a function type).
    #[error("unification error: cannot unify {left} with {right}")]
    Unification { left: Type, right: Type },

    /// Solving `var = ty` would create an infinite type.
    #[error("cannot construct infinite type: {var} = {ty}")]
    OccursCheck { var: TypeVar, ty: Type },

    /// A class definition reuses the name of a builtin type.
    #[error("class name {name} is reserved for a builtin type")]
    ReservedClassName { name: String },
}

impl InferenceError {
    pub fn unbound_variable(name: impl Into<String>) -> Self {
        InferenceError::UnboundVariable { name: name.into() }
    }

    pub fn mismatch(left: impl Into<String>, right: impl Into<String>) -> Self {
        InferenceError::Mismatch {
            left: left.into(),
            right: right.into(),
        }
    }

    pub fn unification(left: Type, right: Type) -> Self {
        InferenceError::Unification { left, right }
    }

    pub fn occurs_check(var: TypeVar, ty: Type) -> Self {
        InferenceError::OccursCheck { var, ty }
    }

    pub fn reserved_class_name(name: impl Into<String>) -> Self {
        InferenceError::ReservedClassName { name: name.into() }
    }
}

/// The program and the library it was linked against disagree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProgramError {
    #[error("unknown library reference: {name}")]
    UnknownReference { name: String },
}

/// Any failure of the inference phase.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeError {
    #[error("type error: {0}")]
    Inference(#[from] InferenceError),

    #[error("program error: {0}")]
    Program(#[from] ProgramError),
}

impl TypeError {
    pub fn is_inference(&self) -> bool {
        matches!(self, TypeError::Inference(_))
    }

    pub fn is_program(&self) -> bool {
        matches!(self, TypeError::Program(_))
    }
}

//! Runtime errors.
//!
//! A program that passed inference must never raise `UnboundVariable`,
//! `CannotApply` or `UnknownReference`; seeing one means the inferencer and
//! the evaluator disagree about name resolution. These errors are fatal and
//! end the run.

use thiserror::Error;

use crate::types::TypeError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error("undefined variable: {name}")]
    UnboundVariable { name: String },

    #[error("cannot apply: {value}")]
    CannotApply { value: String },

    #[error("unknown library reference: {name}")]
    UnknownReference { name: String },

    /// A native function was handed a value outside its contract.
    #[error("{builtin}: expected {expected}, found {found}")]
    InvalidArgument {
        builtin: String,
        expected: String,
        found: String,
    },

    #[error("failed to write output: {message}")]
    Output { message: String },
}

impl EvalError {
    pub fn unbound_variable(name: impl Into<String>) -> Self {
        EvalError::UnboundVariable { name: name.into() }
    }

    pub fn cannot_apply(value: impl Into<String>) -> Self {
        EvalError::CannotApply {
            value: value.into(),
        }
    }

    pub fn invalid_argument(
        builtin: impl Into<String>,
        expected: impl Into<String>,
        found: impl Into<String>,
    ) -> Self {
        EvalError::InvalidArgument {
            builtin: builtin.into(),
            expected: expected.into(),
            found: found.into(),
        }
    }

    pub fn output(message: impl Into<String>) -> Self {
        EvalError::Output {
            message: message.into(),
        }
    }

    /// Faults that a well-typed program can never produce.
    pub fn is_resolution_fault(&self) -> bool {
        matches!(
            self,
            EvalError::UnboundVariable { .. }
                | EvalError::CannotApply { .. }
                | EvalError::UnknownReference { .. }
        )
    }
}

/// Failure of [`crate::interpreter::run`]: inference rejected the program, or
/// evaluation hit a fatal error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RunError {
    #[error(transparent)]
    Type(#[from] TypeError),

    #[error("runtime error: {0}")]
    Eval(#[from] EvalError),
}

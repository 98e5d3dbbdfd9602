//! # Type Inference
//!
//! Hindley-Milner inference over the Core AST.
//!
//! - [`ty`] - types, type variables and schemes
//! - [`subst`] - persistent substitutions
//! - [`unify`] - the worklist unifier
//! - [`env`] - type assumptions and generalization
//! - [`infer`] - per-node inference rules
//! - [`check`] - whole-program entry point

pub mod check;
pub mod env;
pub mod error;
pub mod infer;
pub mod subst;
pub mod ty;
pub mod unify;

pub use check::infer;
pub use env::Assumption;
pub use error::{InferenceError, ProgramError, TypeError};
pub use infer::Infer;
pub use subst::Substitution;
pub use ty::{BUILTIN_TYPE_NAMES, Type, TypeScheme, TypeVar};
pub use unify::{Constraint, unify, unify_types};

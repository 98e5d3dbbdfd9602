//! Formatting for the Core AST
//!
//! Canonical expressions print as s-expressions. The default form fits on one
//! line and is what logs and error messages use; the alternate form (`{:#}`)
//! breaks `let`, sequence and class blocks over indented lines.

pub mod core;

//! # Boom - An Embeddable Inference and Evaluation Engine
//!
//! Boom is the semantic core of a small functional language. A program arrives
//! as a raw tree from an external parser, is normalized into one canonical
//! expression, gets its principal type from Hindley-Milner inference, and is
//! then executed by a tree-walking evaluator.
//!
//! ## Architecture Overview
//!
//! 1. **Normalization** (`desugar`) - Rewrites the raw AST into the Core AST
//! 2. **Type Inference** (`types`) - Infers a principal type with let-polymorphism
//! 3. **Interpreter** (`interpreter`) - Evaluates the same tree under a persistent environment
//!
//! ## Pipeline Flow
//!
//! ```text
//! Raw AST (ast::RawExpr)
//!     ↓
//! [Normalization] → Core AST (core::CoreExpr)
//!     ↓
//! [Type Inference] → types::Type      (must succeed before evaluation)
//!     ↓
//! [Interpreter] → Runtime Value (interpreter::Value)
//! ```
//!
//! ## Key Design Decisions
//!
//! ### One Tree for Both Passes
//! Inference and evaluation walk the same [`core::CoreExpr`]. They share one
//! name-resolution contract, so a program that type checks never hits an
//! unbound variable or applies a non-function at run time.
//!
//! ### Persistent Environments
//! Substitutions, type assumptions and value environments are immutable maps
//! from the `im` crate. Extending one returns a new map sharing structure with
//! the old, which is what lets closures capture a consistent snapshot.
//!
//! ### Library
//! Builtins come from a [`library::Library`]: each entry has a type scheme for
//! the inferencer and a native function for the evaluator. The host picks the
//! library and the output sink; there is no other configuration.
//!
//! ## Module Structure
//!
//! - [`ast`] - Raw AST produced by an external parser
//! - [`core`] - Canonical expression definitions
//! - [`desugar`] - Normalization from raw to core
//! - [`types`] - Type inference (Hindley-Milner)
//! - [`library`] - Builtin table and the standard library
//! - [`interpreter`] - Runtime evaluation and the `run` entry point
//! - [`fmt`] - S-expression printing of the Core AST
//!
//! ## Example
//!
//! ```
//! use boom::core::CoreExpr;
//! use boom::interpreter::{Value, run};
//! use boom::library::Library;
//!
//! let program = CoreExpr::apply(
//!     CoreExpr::reference("print"),
//!     CoreExpr::string("Hello, world!"),
//! );
//! let mut out = Vec::new();
//! let value = run(&program, &Library::standard(), &mut out).unwrap();
//!
//! assert_eq!(value, Value::string("Hello, world!"));
//! assert_eq!(out, b"Hello, world!");
//! ```

pub mod ast;
pub mod core;
pub mod desugar;
pub mod fmt;
pub mod interpreter;
pub mod library;
pub mod types;

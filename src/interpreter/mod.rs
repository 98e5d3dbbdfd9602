//! # Interpreter
//!
//! Tree-walking evaluation of the Core AST.
//!
//! [`run`] is the only entry point that hosts need: it infers the program's
//! type first and evaluates only when inference succeeds.

mod env;
mod error;
mod eval;
mod system;
mod value;

pub use env::Env;
pub use error::{EvalError, RunError};
pub use eval::Runtime;
pub use system::System;
pub use value::{Builtin, Closure, NativeFn, Value, native};

use std::io::Write;

use tracing::{debug, instrument};

use crate::core::CoreExpr;
use crate::library::Library;
use crate::types;

/// Type check and then evaluate `expr` against `library`, writing any output
/// to `out`.
#[instrument(skip_all)]
pub fn run(expr: &CoreExpr, library: &Library, out: &mut dyn Write) -> Result<Value, RunError> {
    let ty = types::infer(expr, library)?;

    let mut rt = Runtime::new(library, System::new(out));
    let value = expr.eval(&library.environment(), &mut rt)?;
    debug!(ty = %ty, value = %value, "evaluation finished");
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{InferenceError, TypeError};

    #[test]
    fn test_run_constant_function() {
        let expr = CoreExpr::apply(
            CoreExpr::abstraction("x", None, CoreExpr::int(1)),
            CoreExpr::int(2),
        );
        let mut sink = Vec::new();
        assert_eq!(run(&expr, &Library::new(), &mut sink), Ok(Value::Int(1)));
        assert!(sink.is_empty());
    }

    #[test]
    fn test_run_hello_world() {
        let expr = CoreExpr::apply(
            CoreExpr::reference("print"),
            CoreExpr::string("Hello, world!"),
        );
        let mut sink = Vec::new();
        let result = run(&expr, &Library::standard(), &mut sink);
        assert_eq!(result, Ok(Value::string("Hello, world!")));
        assert_eq!(sink, b"Hello, world!");
    }

    #[test]
    fn test_run_never_evaluates_ill_typed_program() {
        // print("side effect"); print(1)
        let expr = CoreExpr::sequence(
            CoreExpr::apply(CoreExpr::reference("print"), CoreExpr::string("side effect")),
            CoreExpr::apply(CoreExpr::reference("print"), CoreExpr::int(1)),
        );
        let mut sink = Vec::new();
        let result = run(&expr, &Library::standard(), &mut sink);
        assert_eq!(
            result,
            Err(RunError::Type(TypeError::Inference(InferenceError::mismatch(
                "String", "Int"
            ))))
        );
        assert!(sink.is_empty());
    }
}

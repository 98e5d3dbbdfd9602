//! Evaluator for the Core AST
//!
//! Walks the same tree the inferencer checked, under a persistent [`Env`].
//! Evaluation only ever runs after inference accepted the program, so the
//! resolution faults below indicate a disagreement between the two passes.

use std::sync::Arc;

use tracing::trace;

use crate::core::*;
use crate::library::Library;

use super::env::Env;
use super::error::EvalError;
use super::system::System;
use super::value::{Builtin, Closure, Value, native};

/// Everything evaluation needs besides the environment: the library that
/// `Reference` nodes resolve against and the execution context handed to
/// native functions.
pub struct Runtime<'lib, 'out> {
    library: &'lib Library,
    system: System<'out>,
}

impl<'lib, 'out> Runtime<'lib, 'out> {
    pub fn new(library: &'lib Library, system: System<'out>) -> Self {
        Runtime { library, system }
    }

    /// Apply a callable value to one argument.
    pub fn apply(&mut self, func: Value, arg: Value) -> Result<Value, EvalError> {
        match func {
            Value::Closure(closure) => closure.call(arg, self),
            Value::Builtin(builtin) => {
                trace!(builtin = %builtin.name, "call");
                builtin.call(&mut self.system, arg)
            }
            other => Err(EvalError::cannot_apply(other.to_string())),
        }
    }
}

impl CoreExpr {
    pub fn eval(&self, env: &Env, rt: &mut Runtime<'_, '_>) -> Result<Value, EvalError> {
        match self {
            CoreExpr::Literal(lit) => Ok(lit.eval()),
            CoreExpr::Reference(reference) => rt
                .library
                .builtin(&reference.name)
                .map(Value::Builtin)
                .ok_or_else(|| EvalError::UnknownReference {
                    name: reference.name.clone(),
                }),
            CoreExpr::Var(var) => env
                .lookup(&var.name)
                .cloned()
                .ok_or_else(|| EvalError::unbound_variable(var.name.clone())),
            CoreExpr::Apply(apply) => {
                let arg = apply.arg.eval(env, rt)?;
                let func = apply.func.eval(env, rt)?;
                rt.apply(func, arg)
            }
            CoreExpr::Abstraction(lambda) => Ok(Value::Closure(Closure {
                lambda: Arc::clone(lambda),
                env: env.clone(),
            })),
            CoreExpr::Let(binding) => {
                let value = binding.value.eval(env, rt)?;
                binding.body.eval(&env.merge(binding.name.clone(), value), rt)
            }
            CoreExpr::Sequence(seq) => {
                seq.first.eval(env, rt)?;
                seq.second.eval(env, rt)
            }
            CoreExpr::WithDefinitions(with_defs) => {
                let env = with_defs
                    .defs
                    .iter()
                    .fold(env.clone(), |env, def| def.bind(&env));
                with_defs.body.eval(&env, rt)
            }
        }
    }
}

impl CoreLiteral {
    fn eval(&self) -> Value {
        if self.type_name == "Unit" {
            return Value::Unit;
        }
        match &self.value {
            LiteralValue::Int(i) => Value::Int(*i),
            LiteralValue::String(s) => Value::String(s.clone()),
            LiteralValue::Unit => Value::Unit,
        }
    }
}

impl Closure {
    /// Runs the body under the captured environment extended with the parameter.
    pub fn call(self, arg: Value, rt: &mut Runtime<'_, '_>) -> Result<Value, EvalError> {
        trace!(param = %self.lambda.param, "apply closure");
        let env = self.env.merge(self.lambda.param.clone(), arg);
        self.lambda.body.eval(&env, rt)
    }
}

impl CoreClassDef {
    /// Binds the class object and its constructor. Methods are not evaluated.
    fn bind(&self, env: &Env) -> Env {
        let class = self.name.clone();
        let constructor_name = self.constructor_name();
        let constructor = {
            let constructor_name = constructor_name.clone();
            native(move |_, arg| match arg {
                Value::Unit => Ok(Value::Object(class.clone())),
                other => Err(EvalError::invalid_argument(
                    constructor_name.as_str(),
                    "Unit",
                    other.type_name(),
                )),
            })
        };

        env.merge(self.name.clone(), Value::Class(self.name.clone()))
            .merge(
                constructor_name.clone(),
                Value::Builtin(Builtin::new(constructor_name, constructor)),
            )
    }
}

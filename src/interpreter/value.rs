use std::fmt;
use std::sync::Arc;

use crate::core::CoreAbstraction;

use super::env::Env;
use super::error::EvalError;
use super::system::System;

/// Host function backing a library entry: takes the execution context and
/// exactly one argument.
pub type NativeFn = Arc<dyn Fn(&mut System<'_>, Value) -> Result<Value, EvalError> + Send + Sync>;

/// Wrap a host closure as a [`NativeFn`].
pub fn native<F>(func: F) -> NativeFn
where
    F: Fn(&mut System<'_>, Value) -> Result<Value, EvalError> + Send + Sync + 'static,
{
    Arc::new(func)
}

/// A named native function value
#[derive(Clone)]
pub struct Builtin {
    pub name: String,
    pub func: NativeFn,
}

impl Builtin {
    pub fn new(name: impl Into<String>, func: NativeFn) -> Self {
        Builtin {
            name: name.into(),
            func,
        }
    }

    pub fn call(&self, system: &mut System<'_>, arg: Value) -> Result<Value, EvalError> {
        (self.func)(system, arg)
    }
}

impl fmt::Debug for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Builtin").field("name", &self.name).finish()
    }
}

/// Abstraction paired with the environment it was created in
#[derive(Clone)]
pub struct Closure {
    pub lambda: Arc<CoreAbstraction>,
    pub env: Env,
}

impl fmt::Debug for Closure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Closure")
            .field("param", &self.lambda.param)
            .field("captured", &self.env.len())
            .finish()
    }
}

/// Runtime value representation
#[derive(Debug, Clone)]
pub enum Value {
    Unit,
    Int(i64),
    String(String),
    Closure(Closure),
    Builtin(Builtin),
    /// A class object, bound under the class name
    Class(String),
    /// An instance produced by `<Class>.new`
    Object(String),
}

impl Value {
    pub fn string(value: impl Into<String>) -> Self {
        Value::String(value.into())
    }

    /// Name of the runtime type, matching the static type names.
    pub fn type_name(&self) -> String {
        match self {
            Value::Unit => "Unit".to_string(),
            Value::Int(_) => "Int".to_string(),
            Value::String(_) => "String".to_string(),
            Value::Closure(_) | Value::Builtin(_) => "Function".to_string(),
            Value::Class(_) => "Class".to_string(),
            Value::Object(class) => class.clone(),
        }
    }

    /// Debug rendering used by `inspect` and `p`: strings are quoted.
    pub fn inspect(&self) -> String {
        match self {
            Value::String(s) => format!("{:?}", s),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Unit => write!(f, "()"),
            Value::Int(i) => write!(f, "{}", i),
            Value::String(s) => write!(f, "{}", s),
            Value::Closure(closure) => write!(f, "<fn {}>", closure.lambda.param),
            Value::Builtin(builtin) => write!(f, "<builtin {}>", builtin.name),
            Value::Class(name) => write!(f, "<class {}>", name),
            Value::Object(class) => write!(f, "#<{}>", class),
        }
    }
}

/// Functions never compare equal, not even to themselves.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Unit, Value::Unit) => true,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Class(a), Value::Class(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a == b,
            _ => false,
        }
    }
}

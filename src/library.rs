//! # Library
//!
//! The library is the table of host-provided builtins a program is linked
//! against. Each entry pairs the [`TypeScheme`] the inferencer assumes for the
//! name with the native function the evaluator calls.
//!
//! Entries are visible in two ways:
//!
//! - through `Reference(name)` nodes, which resolve against the library only;
//! - as initial bindings of the type assumption and the value environment, so
//!   that a plain `Var("print")` produced by normalization finds them too.
//!
//! ## Standard Library
//!
//! | Name | Type | Behaviour |
//! |------|------|-----------|
//! | `print` | `String -> String` | writes the string to the sink, returns it |
//! | `inspect` | `forall a. a -> String` | returns the debug rendering |
//! | `p` | `forall a. a -> a` | writes the debug rendering and a newline, returns the argument |

use std::collections::BTreeMap;
use std::fmt;

use crate::interpreter::{Builtin, Env, EvalError, NativeFn, Value, native};
use crate::types::{Assumption, Type, TypeScheme, TypeVar};

#[derive(Clone)]
pub struct LibraryEntry {
    pub scheme: TypeScheme,
    pub native: NativeFn,
}

impl fmt::Debug for LibraryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LibraryEntry")
            .field("scheme", &self.scheme)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Default)]
pub struct Library {
    entries: BTreeMap<String, LibraryEntry>,
}

impl Library {
    pub fn new() -> Self {
        Library {
            entries: BTreeMap::new(),
        }
    }

    pub fn standard() -> Self {
        let a = TypeVar::new(0);

        Library::new()
            .insert(
                "print",
                TypeScheme::monomorphic(Type::fun(Type::string(), Type::string())),
                native(|system, arg| match arg {
                    Value::String(text) => {
                        system.write(&text)?;
                        Ok(Value::String(text))
                    }
                    other => Err(EvalError::invalid_argument(
                        "print",
                        "String",
                        other.type_name(),
                    )),
                }),
            )
            .insert(
                "inspect",
                TypeScheme::polymorphic([a], Type::fun(Type::Var(a), Type::string())),
                native(|_, arg| Ok(Value::String(arg.inspect()))),
            )
            .insert(
                "p",
                TypeScheme::polymorphic([a], Type::fun(Type::Var(a), Type::Var(a))),
                native(|system, arg| {
                    system.write(&format!("{}\n", arg.inspect()))?;
                    Ok(arg)
                }),
            )
    }

    /// Add or replace an entry.
    pub fn insert(mut self, name: impl Into<String>, scheme: TypeScheme, native: NativeFn) -> Self {
        self.entries
            .insert(name.into(), LibraryEntry { scheme, native });
        self
    }

    pub fn get(&self, name: &str) -> Option<&LibraryEntry> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Largest type variable id used by any entry's scheme.
    pub fn max_var_id(&self) -> Option<usize> {
        self.entries
            .values()
            .filter_map(|entry| entry.scheme.max_var_id())
            .max()
    }

    /// Initial type assumption: every entry under its own name.
    pub fn assumption(&self) -> Assumption {
        Assumption::with_bindings(
            self.entries
                .iter()
                .map(|(name, entry)| (name.clone(), entry.scheme.clone())),
        )
    }

    pub fn builtin(&self, name: &str) -> Option<Builtin> {
        self.get(name)
            .map(|entry| Builtin::new(name, entry.native.clone()))
    }

    /// Initial value environment: every entry's native function under its own name.
    pub fn environment(&self) -> Env {
        Env::with_bindings(self.entries.iter().map(|(name, entry)| {
            (
                name.clone(),
                Value::Builtin(Builtin::new(name.clone(), entry.native.clone())),
            )
        }))
    }
}

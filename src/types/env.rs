use std::collections::BTreeSet;

use im::HashMap;

use super::subst::Substitution;
use super::ty::{Type, TypeScheme, TypeVar};

/// Type environment: what the inferencer assumes about each identifier in scope.
///
/// Persistent; `extend` and `apply_subst` return new environments and share
/// structure with the old one.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Assumption {
    bindings: HashMap<String, TypeScheme>,
}

impl Assumption {
    pub fn empty() -> Self {
        Assumption {
            bindings: HashMap::new(),
        }
    }

    pub fn with_bindings(bindings: impl IntoIterator<Item = (String, TypeScheme)>) -> Self {
        Assumption {
            bindings: bindings.into_iter().collect(),
        }
    }

    pub fn lookup(&self, name: &str) -> Option<&TypeScheme> {
        self.bindings.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn extend(&self, name: impl Into<String>, scheme: TypeScheme) -> Assumption {
        Assumption {
            bindings: self.bindings.update(name.into(), scheme),
        }
    }

    pub fn extend_many(&self, bindings: impl IntoIterator<Item = (String, TypeScheme)>) -> Assumption {
        let mut extended = self.bindings.clone();
        for (name, scheme) in bindings {
            extended.insert(name, scheme);
        }
        Assumption { bindings: extended }
    }

    /// Variables free in some scheme of the environment, i.e. still owned by
    /// an enclosing scope.
    pub fn free_type_vars(&self) -> BTreeSet<TypeVar> {
        self.bindings
            .values()
            .flat_map(TypeScheme::free_type_vars)
            .collect()
    }

    pub fn apply_subst(&self, subst: &Substitution) -> Assumption {
        if subst.is_empty() {
            return self.clone();
        }
        Assumption {
            bindings: self
                .bindings
                .iter()
                .map(|(name, scheme)| (name.clone(), subst.apply_scheme(scheme)))
                .collect(),
        }
    }

    /// Close `ty` over the variables that no binding of this environment
    /// still depends on.
    pub fn generalize(&self, ty: &Type) -> TypeScheme {
        let free_in_env = self.free_type_vars();
        let vars: Vec<TypeVar> = ty
            .free_type_vars()
            .into_iter()
            .filter(|v| !free_in_env.contains(v))
            .collect();
        TypeScheme::polymorphic(vars, ty.clone())
    }
}

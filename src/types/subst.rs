use std::collections::BTreeSet;

use im::OrdMap;

use super::error::InferenceError;
use super::ty::{Type, TypeScheme, TypeVar};
use super::unify::{Constraint, unify};

/// Finite, persistent mapping from type variables to types.
///
/// Every operation returns a new substitution; existing values are never
/// touched, so recursive inference branches can share them freely. Bindings
/// are kept idempotent: no right-hand side mentions a bound variable.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Substitution(OrdMap<TypeVar, Type>);

impl Substitution {
    pub fn empty() -> Self {
        Substitution(OrdMap::new())
    }

    pub fn singleton(var: TypeVar, ty: Type) -> Self {
        Substitution(OrdMap::unit(var, ty))
    }

    pub fn get(&self, var: &TypeVar) -> Option<&Type> {
        self.0.get(var)
    }

    pub fn contains(&self, var: &TypeVar) -> bool {
        self.0.contains_key(var)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&TypeVar, &Type)> {
        self.0.iter()
    }

    pub fn apply(&self, ty: &Type) -> Type {
        match ty {
            Type::Raw(_) => ty.clone(),
            Type::Var(v) => self.0.get(v).cloned().unwrap_or_else(|| ty.clone()),
            Type::Fun(param, result) => Type::fun(self.apply(param), self.apply(result)),
        }
    }

    /// Quantified variables of the scheme are left untouched.
    pub fn apply_scheme(&self, scheme: &TypeScheme) -> TypeScheme {
        let ty = if scheme.vars.iter().any(|v| self.contains(v)) {
            self.without(&scheme.vars).apply(&scheme.ty)
        } else {
            self.apply(&scheme.ty)
        };
        TypeScheme {
            vars: scheme.vars.clone(),
            ty,
        }
    }

    /// Extend with `var ↦ ty`, first rewriting every existing right-hand side
    /// through `{var ↦ ty}` so the result stays idempotent.
    pub fn add(&self, var: TypeVar, ty: Type) -> Substitution {
        let step = Substitution::singleton(var, ty.clone());
        let rewritten: OrdMap<TypeVar, Type> = self
            .0
            .iter()
            .map(|(v, bound)| (*v, step.apply(bound)))
            .collect();
        Substitution(rewritten.update(var, ty))
    }

    /// Combine this substitution with `others` into one consistent substitution.
    ///
    /// All bindings are turned back into equality constraints and solved again,
    /// which composes them and re-validates that independently derived
    /// substitutions agree with each other.
    pub fn merge<'a>(
        &self,
        others: impl IntoIterator<Item = &'a Substitution>,
    ) -> Result<Substitution, InferenceError> {
        let mut constraints = self.to_constraints();
        for other in others {
            constraints.extend(other.to_constraints());
        }
        unify(constraints)
    }

    /// One `Var(id) = bound` constraint per binding, in variable order.
    pub fn to_constraints(&self) -> Vec<Constraint> {
        self.0
            .iter()
            .map(|(var, ty)| Constraint::new(Type::Var(*var), ty.clone()))
            .collect()
    }

    fn without(&self, vars: &BTreeSet<TypeVar>) -> Substitution {
        Substitution(
            self.0
                .iter()
                .filter(|(v, _)| !vars.contains(v))
                .map(|(v, ty)| (*v, ty.clone()))
                .collect(),
        )
    }
}

impl FromIterator<(TypeVar, Type)> for Substitution {
    fn from_iter<I: IntoIterator<Item = (TypeVar, Type)>>(iter: I) -> Self {
        Substitution(iter.into_iter().collect())
    }
}

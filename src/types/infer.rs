use tracing::trace;

use super::env::Assumption;
use super::error::{InferenceError, ProgramError, TypeError};
use super::subst::Substitution;
use super::ty::{BUILTIN_TYPE_NAMES, Type, TypeScheme, TypeVar};
use super::unify::{Constraint, unify};
use crate::core::*;
use crate::library::Library;

/// Inference engine for one run.
///
/// Owns the fresh-variable supply, so every variable it creates is unique
/// for the lifetime of the engine. The supply starts above every id the
/// library mentions, so user variables never alias library variables.
pub struct Infer<'lib> {
    next_var: usize,
    library: &'lib Library,
}

impl<'lib> Infer<'lib> {
    pub fn new(library: &'lib Library) -> Self {
        Infer {
            next_var: library.max_var_id().map_or(0, |id| id + 1),
            library,
        }
    }

    pub fn fresh_var(&mut self) -> TypeVar {
        let id = self.next_var;
        self.next_var += 1;
        TypeVar::new(id)
    }

    /// Replace every quantified variable of `scheme` by a brand-new one.
    pub fn instantiate(&mut self, scheme: &TypeScheme) -> Type {
        if scheme.is_monomorphic() {
            return scheme.ty.clone();
        }
        let subst: Substitution = scheme
            .vars
            .iter()
            .map(|v| (*v, Type::Var(self.fresh_var())))
            .collect();
        subst.apply(&scheme.ty)
    }

    pub fn infer_expr(
        &mut self,
        env: &Assumption,
        expr: &CoreExpr,
    ) -> Result<(Substitution, Type), TypeError> {
        let (subst, ty) = match expr {
            CoreExpr::Literal(lit) => (Substitution::empty(), Type::raw(lit.type_name.as_str())),
            CoreExpr::Reference(reference) => self.infer_reference(reference)?,
            CoreExpr::Var(var) => self.infer_var(env, var)?,
            CoreExpr::Apply(apply) => self.infer_apply(env, apply)?,
            CoreExpr::Abstraction(lambda) => self.infer_abstraction(env, lambda)?,
            CoreExpr::Let(binding) => self.infer_let(env, binding)?,
            CoreExpr::Sequence(seq) => self.infer_sequence(env, seq)?,
            CoreExpr::WithDefinitions(with_defs) => self.infer_with_definitions(env, with_defs)?,
        };
        trace!(node = expr.kind(), ty = %ty, bindings = subst.len(), "inferred");
        Ok((subst, ty))
    }

    fn infer_reference(
        &mut self,
        reference: &CoreReference,
    ) -> Result<(Substitution, Type), TypeError> {
        let entry = self
            .library
            .get(&reference.name)
            .ok_or_else(|| ProgramError::UnknownReference {
                name: reference.name.clone(),
            })?;
        let ty = self.instantiate(&entry.scheme);
        Ok((Substitution::empty(), ty))
    }

    fn infer_var(&mut self, env: &Assumption, var: &CoreVar) -> Result<(Substitution, Type), TypeError> {
        match env.lookup(&var.name) {
            Some(scheme) => {
                let ty = self.instantiate(scheme);
                Ok((Substitution::empty(), ty))
            }
            None => Err(InferenceError::unbound_variable(var.name.clone()).into()),
        }
    }

    fn infer_apply(
        &mut self,
        env: &Assumption,
        apply: &CoreApply,
    ) -> Result<(Substitution, Type), TypeError> {
        let result_ty = Type::Var(self.fresh_var());

        let (s1, func_ty) = self.infer_expr(env, &apply.func)?;
        let env1 = env.apply_subst(&s1);
        let (s2, arg_ty) = self.infer_expr(&env1, &apply.arg)?;

        let func_ty = s2.apply(&func_ty);
        let s3 = unify([Constraint::new(
            func_ty,
            Type::fun(arg_ty, result_ty.clone()),
        )])?;

        let subst = s1.merge([&s2, &s3])?;
        let ty = subst.apply(&result_ty);
        Ok((subst, ty))
    }

    fn infer_abstraction(
        &mut self,
        env: &Assumption,
        lambda: &CoreAbstraction,
    ) -> Result<(Substitution, Type), TypeError> {
        let param_ty = match &lambda.annotation {
            Some(name) => Type::raw(name.as_str()),
            None => Type::Var(self.fresh_var()),
        };
        let env1 = env.extend(lambda.param.clone(), TypeScheme::monomorphic(param_ty.clone()));

        let (s, body_ty) = self.infer_expr(&env1, &lambda.body)?;
        let ty = s.apply(&Type::fun(param_ty, body_ty));
        Ok((s, ty))
    }

    /// `let` is where polymorphism enters: the bound type is generalized
    /// against the environment after `s1` has been applied to it, so only
    /// variables no enclosing binding depends on get quantified.
    fn infer_let(&mut self, env: &Assumption, binding: &CoreLet) -> Result<(Substitution, Type), TypeError> {
        let (s1, value_ty) = self.infer_expr(env, &binding.value)?;
        let env1 = env.apply_subst(&s1);
        let scheme = env1.generalize(&s1.apply(&value_ty));
        trace!(name = %binding.name, scheme = %scheme, "generalized");

        let env2 = env1.extend(binding.name.clone(), scheme);
        let (s2, body_ty) = self.infer_expr(&env2, &binding.body)?;

        let subst = s1.merge([&s2])?;
        let ty = subst.apply(&body_ty);
        Ok((subst, ty))
    }

    fn infer_sequence(
        &mut self,
        env: &Assumption,
        seq: &CoreSequence,
    ) -> Result<(Substitution, Type), TypeError> {
        let (s1, _) = self.infer_expr(env, &seq.first)?;
        let env1 = env.apply_subst(&s1);
        let (s2, ty) = self.infer_expr(&env1, &seq.second)?;

        let subst = s1.merge([&s2])?;
        let ty = subst.apply(&ty);
        Ok((subst, ty))
    }

    /// Binds each class name to `Class` and its constructor to `Unit -> <Name>`.
    /// Method bodies are not type checked.
    fn infer_with_definitions(
        &mut self,
        env: &Assumption,
        with_defs: &CoreWithDefinitions,
    ) -> Result<(Substitution, Type), TypeError> {
        if let Some(def) = with_defs
            .defs
            .iter()
            .find(|def| BUILTIN_TYPE_NAMES.contains(&def.name.as_str()))
        {
            return Err(InferenceError::reserved_class_name(def.name.clone()).into());
        }
        let env1 = env.extend_many(with_defs.defs.iter().flat_map(class_bindings));
        self.infer_expr(&env1, &with_defs.body)
    }
}

fn class_bindings(def: &CoreClassDef) -> [(String, TypeScheme); 2] {
    [
        (
            def.name.clone(),
            TypeScheme::monomorphic(Type::raw("Class")),
        ),
        (
            def.constructor_name(),
            TypeScheme::monomorphic(Type::fun(Type::unit(), Type::raw(def.name.as_str()))),
        ),
    ]
}

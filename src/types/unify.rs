use tracing::trace;

use super::error::InferenceError;
use super::subst::Substitution;
use super::ty::Type;

/// An equality constraint: `left` and `right` must unify.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constraint {
    pub left: Type,
    pub right: Type,
}

impl Constraint {
    pub fn new(left: Type, right: Type) -> Self {
        Self { left, right }
    }

    pub fn swap(self) -> Self {
        Constraint {
            left: self.right,
            right: self.left,
        }
    }

    pub fn apply(&self, subst: &Substitution) -> Self {
        Constraint {
            left: subst.apply(&self.left),
            right: subst.apply(&self.right),
        }
    }
}

/// Solve a set of constraints into a single substitution.
///
/// The constraints form a worklist which is consumed from the back. Each
/// popped constraint is decided by its shape:
///
/// ```text
/// Fun(a1, a2) = Fun(b1, b2)   push a1 = b1, then a2 = b2
/// Var(x)      = Var(x)        drop
/// Var(x)      = T             occurs check, bind x := T, rewrite the worklist
/// T           = Var(x)        swap and push back
/// Raw(n)      = Raw(m)        ok iff n == m, else a type mismatch
/// anything else               unification error
/// ```
///
/// Binding `x := T` rewrites every pending constraint through `{x ↦ T}`, so a
/// bound variable never shows up again in the worklist and the accumulated
/// substitution stays idempotent.
///
/// # Examples
///
/// ```text
/// unify([Int = Int])                 = Ok(∅)
/// unify(['t0 = Int])                 = Ok([t0 := Int])
/// unify(['t0 -> 't1 = Int -> 't0])   = Ok([t0 := Int, t1 := Int])
/// unify([Int = String])              = Err(Mismatch)
/// unify(['t0 = 't0 -> Int])          = Err(OccursCheck)
/// ```
pub fn unify(constraints: impl IntoIterator<Item = Constraint>) -> Result<Substitution, InferenceError> {
    let mut worklist: Vec<Constraint> = constraints.into_iter().collect();
    let mut subst = Substitution::empty();

    while let Some(constraint) = worklist.pop() {
        match (constraint.left, constraint.right) {
            (Type::Fun(l1, l2), Type::Fun(r1, r2)) => {
                worklist.push(Constraint::new(*l1, *r1));
                worklist.push(Constraint::new(*l2, *r2));
            }
            (Type::Var(v1), Type::Var(v2)) if v1 == v2 => {}
            (Type::Var(var), ty) => {
                if ty.occurs(var) {
                    return Err(InferenceError::occurs_check(var, ty));
                }
                trace!(%var, %ty, "bind");
                let step = Substitution::singleton(var, ty.clone());
                for pending in worklist.iter_mut() {
                    *pending = pending.apply(&step);
                }
                subst = subst.add(var, ty);
            }
            (ty, Type::Var(var)) => {
                worklist.push(Constraint::new(ty, Type::Var(var)).swap());
            }
            (Type::Raw(left), Type::Raw(right)) => {
                if left != right {
                    return Err(InferenceError::mismatch(left, right));
                }
            }
            (left, right) => return Err(InferenceError::unification(left, right)),
        }
    }

    Ok(subst)
}

/// Convenience for the common single-constraint case.
pub fn unify_types(left: &Type, right: &Type) -> Result<Substitution, InferenceError> {
    unify([Constraint::new(left.clone(), right.clone())])
}

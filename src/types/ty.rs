use std::collections::BTreeSet;
use std::fmt;

/// Identity of a type variable, unique within one inference run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TypeVar {
    pub id: usize,
}

impl TypeVar {
    pub fn new(id: usize) -> Self {
        Self { id }
    }
}

impl fmt::Display for TypeVar {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "'t{}", self.id)
    }
}

/// Names of the types every program sees without declaring them. A class may
/// not reuse one, or a nominal object would share a type with a builtin value.
pub const BUILTIN_TYPE_NAMES: [&str; 4] = ["Int", "String", "Unit", "Class"];

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    /// Named primitive or nominal type (`Int`, `String`, `Unit`, a class name)
    Raw(String),
    Var(TypeVar),
    Fun(Box<Type>, Box<Type>),
}

impl Type {
    pub fn raw(name: impl Into<String>) -> Self {
        Type::Raw(name.into())
    }

    pub fn var(id: usize) -> Self {
        Type::Var(TypeVar::new(id))
    }

    pub fn fun(param: Type, result: Type) -> Self {
        Type::Fun(Box::new(param), Box::new(result))
    }

    pub fn int() -> Self {
        Type::raw("Int")
    }

    pub fn string() -> Self {
        Type::raw("String")
    }

    pub fn unit() -> Self {
        Type::raw("Unit")
    }

    pub fn free_type_vars(&self) -> BTreeSet<TypeVar> {
        let mut vars = BTreeSet::new();
        self.collect_vars(&mut vars);
        vars
    }

    fn collect_vars(&self, vars: &mut BTreeSet<TypeVar>) {
        match self {
            Type::Raw(_) => {}
            Type::Var(v) => {
                vars.insert(*v);
            }
            Type::Fun(param, result) => {
                param.collect_vars(vars);
                result.collect_vars(vars);
            }
        }
    }

    /// Whether `var` appears anywhere inside this type.
    pub fn occurs(&self, var: TypeVar) -> bool {
        match self {
            Type::Raw(_) => false,
            Type::Var(v) => *v == var,
            Type::Fun(param, result) => param.occurs(var) || result.occurs(var),
        }
    }

    /// Largest variable id mentioned by this type, if any.
    pub fn max_var_id(&self) -> Option<usize> {
        self.free_type_vars().iter().map(|v| v.id).max()
    }

    pub fn pretty(&self) -> String {
        match self {
            Type::Raw(name) => name.clone(),
            Type::Var(v) => v.to_string(),
            Type::Fun(param, result) => {
                let param_str = if matches!(**param, Type::Fun(_, _)) {
                    format!("({})", param.pretty())
                } else {
                    param.pretty()
                };
                format!("{} -> {}", param_str, result.pretty())
            }
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.pretty())
    }
}

/// A type closed over a set of quantified variables: `forall vars. ty`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeScheme {
    pub vars: BTreeSet<TypeVar>,
    pub ty: Type,
}

impl TypeScheme {
    pub fn monomorphic(ty: Type) -> Self {
        TypeScheme {
            vars: BTreeSet::new(),
            ty,
        }
    }

    /// Quantifies `vars` over `ty`. Duplicates collapse and ids that do not
    /// occur in `ty` are dropped.
    pub fn polymorphic(vars: impl IntoIterator<Item = TypeVar>, ty: Type) -> Self {
        let free = ty.free_type_vars();
        let vars = vars.into_iter().filter(|v| free.contains(v)).collect();
        TypeScheme { vars, ty }
    }

    pub fn is_monomorphic(&self) -> bool {
        self.vars.is_empty()
    }

    /// Variables of the body that are not quantified, i.e. owned by an outer scope.
    pub fn free_type_vars(&self) -> BTreeSet<TypeVar> {
        self.ty
            .free_type_vars()
            .difference(&self.vars)
            .copied()
            .collect()
    }

    pub fn max_var_id(&self) -> Option<usize> {
        self.ty.max_var_id()
    }
}

impl fmt::Display for TypeScheme {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.vars.is_empty() {
            return write!(f, "{}", self.ty);
        }
        let vars: Vec<String> = self.vars.iter().map(TypeVar::to_string).collect();
        write!(f, "forall {}. {}", vars.join(" "), self.ty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_free_type_vars_concrete() {
        let ty = Type::fun(Type::int(), Type::string());
        assert!(ty.free_type_vars().is_empty());
    }

    #[test]
    fn test_free_type_vars_function() {
        let ty = Type::fun(Type::var(0), Type::fun(Type::var(1), Type::var(0)));
        let free = ty.free_type_vars();
        assert_eq!(free.len(), 2);
        assert!(free.contains(&TypeVar::new(0)));
        assert!(free.contains(&TypeVar::new(1)));
    }

    #[test]
    fn test_occurs() {
        let var = TypeVar::new(3);
        assert!(Type::Var(var).occurs(var));
        assert!(!Type::int().occurs(var));
        assert!(Type::fun(Type::fun(Type::Var(var), Type::int()), Type::unit()).occurs(var));
        assert!(!Type::fun(Type::var(4), Type::var(5)).occurs(var));
    }

    #[test]
    fn test_structural_equality() {
        assert_eq!(Type::raw("Int"), Type::int());
        assert_ne!(Type::raw("Int"), Type::raw("String"));
        assert_eq!(
            Type::fun(Type::var(1), Type::int()),
            Type::fun(Type::var(1), Type::int())
        );
    }

    #[test]
    fn test_pretty_print() {
        assert_eq!(Type::int().pretty(), "Int");
        assert_eq!(Type::var(7).pretty(), "'t7");
        assert_eq!(Type::fun(Type::int(), Type::string()).pretty(), "Int -> String");
        assert_eq!(
            Type::fun(Type::fun(Type::int(), Type::int()), Type::string()).pretty(),
            "(Int -> Int) -> String"
        );
        assert_eq!(
            Type::fun(Type::int(), Type::fun(Type::int(), Type::int())).pretty(),
            "Int -> Int -> Int"
        );
    }

    #[test]
    fn test_scheme_dedups_and_drops_absent_vars() {
        let scheme = TypeScheme::polymorphic(
            vec![TypeVar::new(1), TypeVar::new(1), TypeVar::new(9)],
            Type::fun(Type::var(1), Type::var(2)),
        );
        assert_eq!(scheme.vars.len(), 1);
        assert!(scheme.vars.contains(&TypeVar::new(1)));
    }

    #[test]
    fn test_scheme_free_vars_exclude_quantified() {
        let scheme =
            TypeScheme::polymorphic(vec![TypeVar::new(1)], Type::fun(Type::var(1), Type::var(2)));
        let free = scheme.free_type_vars();
        assert_eq!(free.len(), 1);
        assert!(free.contains(&TypeVar::new(2)));
    }

    #[test]
    fn test_scheme_display() {
        let scheme =
            TypeScheme::polymorphic(vec![TypeVar::new(0)], Type::fun(Type::var(0), Type::var(0)));
        assert_eq!(scheme.to_string(), "forall 't0. 't0 -> 't0");
        assert_eq!(TypeScheme::monomorphic(Type::int()).to_string(), "Int");
    }
}

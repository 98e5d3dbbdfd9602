use im::HashMap;

use super::value::Value;

/// Persistent value environment.
///
/// `merge` returns an extended copy and never mutates in place, so a closure
/// keeps exactly the bindings that were visible when it was created.
#[derive(Debug, Clone, Default)]
pub struct Env {
    bindings: HashMap<String, Value>,
}

impl Env {
    pub fn new() -> Self {
        Env {
            bindings: HashMap::new(),
        }
    }

    pub fn with_bindings(bindings: impl IntoIterator<Item = (String, Value)>) -> Self {
        Env {
            bindings: bindings.into_iter().collect(),
        }
    }

    pub fn lookup(&self, name: &str) -> Option<&Value> {
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

    pub fn merge(&self, name: impl Into<String>, value: Value) -> Env {
        Env {
            bindings: self.bindings.update(name.into(), value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_does_not_mutate() {
        let outer = Env::new().merge("x", Value::Int(1));
        let inner = outer.merge("x", Value::Int(2)).merge("y", Value::Unit);

        assert_eq!(outer.lookup("x"), Some(&Value::Int(1)));
        assert!(!outer.contains("y"));
        assert_eq!(inner.lookup("x"), Some(&Value::Int(2)));
        assert_eq!(inner.len(), 2);
    }

    #[test]
    fn test_lookup_missing() {
        assert!(Env::new().lookup("nope").is_none());
        assert!(Env::default().is_empty());
    }
}

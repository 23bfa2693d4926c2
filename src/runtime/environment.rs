use std::collections::hash_map;
use std::collections::HashMap;
use std::fmt;

use crate::error::EvalResult;
use crate::parser::Expression;
use crate::runtime::Value;

/// Name to value mapping visible during evaluation
///
/// There is no scope chain. A nested scope is a full copy of the caller's
/// environment (see [`Environment::scoped`]); writes to the copy never reach
/// the original. Cloning is shallow: sequences, operations and opaque values
/// are reference counted.
#[derive(Clone, Default)]
pub struct Environment {
    bindings: HashMap<String, Value>,
}

impl Environment {
    /// Creates an empty environment
    pub fn new() -> Self {
        Environment {
            bindings: HashMap::new(),
        }
    }

    /// Looks up a binding
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.bindings.get(name)
    }

    /// Binds `name`, returning the value it replaced
    pub fn define(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.bindings.insert(name.into(), value.into())
    }

    /// Binds a closure as an operation
    pub fn define_operation<F>(&mut self, name: impl Into<String>, f: F) -> Option<Value>
    where
        F: Fn(&mut Environment, &[Expression]) -> EvalResult<Value> + Send + Sync + 'static,
    {
        self.define(name, Value::from_fn(f))
    }

    /// Removes a binding
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.bindings.remove(name)
    }

    /// Checks whether `name` is bound
    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    /// Number of bindings
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// True when nothing is bound
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Iterates over all bindings in arbitrary order
    pub fn iter(&self) -> hash_map::Iter<'_, String, Value> {
        self.bindings.iter()
    }

    /// Copy of this environment with one extra binding, for call boundaries
    pub fn scoped(&self, name: impl Into<String>, value: impl Into<Value>) -> Environment {
        let mut local = self.clone();
        local.define(name, value);
        local
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_map().entries(self.bindings.iter()).finish()
    }
}

impl From<HashMap<String, Value>> for Environment {
    fn from(bindings: HashMap<String, Value>) -> Self {
        Environment { bindings }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Environment {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut env = Environment::new();
        env.extend(iter);
        env
    }
}

impl<K: Into<String>, V: Into<Value>> Extend<(K, V)> for Environment {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (name, value) in iter {
            self.define(name, value);
        }
    }
}

impl<'a> IntoIterator for &'a Environment {
    type Item = (&'a String, &'a Value);
    type IntoIter = hash_map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.bindings.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_define_and_get() {
        let mut env = Environment::new();
        env.define("x", 42);

        assert_eq!(env.get("x"), Some(&Value::Number(42.0)));
        assert!(env.contains("x"));
        assert_eq!(env.len(), 1);
    }

    #[test]
    fn test_undefined_variable() {
        let env = Environment::new();
        assert!(env.get("undefined").is_none());
        assert!(env.is_empty());
    }

    #[test]
    fn test_names_are_case_sensitive() {
        let mut env = Environment::new();
        env.define("X", 1);
        assert!(env.get("x").is_none());
    }

    #[test]
    fn test_overwrite_returns_previous() {
        let mut env = Environment::new();
        assert_eq!(env.define("x", 10), None);
        assert_eq!(env.define("x", 20), Some(Value::Number(10.0)));
        assert_eq!(env.get("x"), Some(&Value::Number(20.0)));
        assert_eq!(env.remove("x"), Some(Value::Number(20.0)));
        assert!(!env.contains("x"));
    }

    #[test]
    fn test_scoped_copy_is_isolated() {
        let mut env = Environment::new();
        env.define("x", 10);

        let mut local = env.scoped("y", 30);
        local.define("x", "shadowed");

        assert_eq!(local.get("x"), Some(&Value::from("shadowed")));
        assert_eq!(local.get("y"), Some(&Value::Number(30.0)));
        assert_eq!(env.get("x"), Some(&Value::Number(10.0)));
        assert!(env.get("y").is_none());
    }

    #[test]
    fn test_from_iterator_and_extend() {
        let mut env: Environment = vec![("a", 1), ("b", 2)].into_iter().collect();
        env.extend([("c", Value::from("three"))]);

        assert_eq!(env.len(), 3);
        let mut names: Vec<_> = (&env).into_iter().map(|(k, _)| k.clone()).collect();
        names.sort();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_from_hashmap() {
        let mut bindings = HashMap::new();
        bindings.insert("PHI".to_string(), Value::Number(1.618034));

        let env = Environment::from(bindings);
        assert_eq!(env.get("PHI"), Some(&Value::Number(1.618034)));
    }
}

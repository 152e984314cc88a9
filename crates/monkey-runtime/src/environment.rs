//! Lexical environments
//!
//! An environment maps names to values and may point at an enclosing
//! environment. Function calls get a fresh environment whose parent is the
//! function's captured environment, which is what makes closures lexical.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::value::Value;

/// Shared handle; closures keep their defining environment alive through it
pub type Env = Rc<RefCell<Environment>>;

#[derive(Debug, Default)]
pub struct Environment {
    store: HashMap<String, Value>,
    outer: Option<Env>,
}

impl Environment {
    /// A new root environment
    pub fn new() -> Env {
        Rc::new(RefCell::new(Environment::default()))
    }

    /// A new environment nested inside `outer`
    pub fn enclosed(outer: &Env) -> Env {
        Rc::new(RefCell::new(Environment {
            store: HashMap::new(),
            outer: Some(Rc::clone(outer)),
        }))
    }

    /// Look `name` up here, then in each enclosing environment
    pub fn get(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.store.get(name) {
            return Some(value.clone());
        }

        let mut scope = self.outer.clone();
        while let Some(env) = scope {
            let env = env.borrow();
            if let Some(value) = env.store.get(name) {
                return Some(value.clone());
            }
            scope = env.outer.clone();
        }
        None
    }

    /// Bind `name` in this environment only
    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.store.insert(name.into(), value);
    }

    /// Names bound directly in this environment, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.store.keys().cloned().collect();
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_walks_outward() {
        let root = Environment::new();
        root.borrow_mut().set("x", Value::Integer(1));
        let child = Environment::enclosed(&root);
        let grandchild = Environment::enclosed(&child);

        assert_eq!(grandchild.borrow().get("x"), Some(Value::Integer(1)));
        assert_eq!(grandchild.borrow().get("y"), None);
    }

    #[test]
    fn test_shadowing_does_not_leak() {
        let root = Environment::new();
        root.borrow_mut().set("x", Value::Integer(1));
        let child = Environment::enclosed(&root);
        child.borrow_mut().set("x", Value::Integer(2));

        assert_eq!(child.borrow().get("x"), Some(Value::Integer(2)));
        assert_eq!(root.borrow().get("x"), Some(Value::Integer(1)));
    }

    #[test]
    fn test_most_recent_write_wins() {
        let root = Environment::new();
        root.borrow_mut().set("x", Value::Integer(1));
        root.borrow_mut().set("x", Value::Integer(3));
        assert_eq!(root.borrow().get("x"), Some(Value::Integer(3)));
        assert_eq!(root.borrow().names(), vec!["x".to_string()]);
    }
}

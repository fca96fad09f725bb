//! Lexically-scoped variable bindings.
//!
//! The source language declares identifier evaluation but leaves it
//! unimplemented ("the source skips it with a TODO"); this environment is
//! what completes it, following the standard closure-by-environment-capture
//! design: each function literal captures the environment it was defined
//! in, and each call extends that captured environment with a fresh frame
//! for its parameters rather than mutating the caller's scope.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::object::Value;

#[derive(Debug, Clone)]
pub struct Environment {
    inner: Rc<RefCell<Scope>>,
}

#[derive(Debug)]
struct Scope {
    store: HashMap<String, Value>,
    outer: Option<Environment>,
}

impl Environment {
    pub fn new() -> Self {
        Environment {
            inner: Rc::new(RefCell::new(Scope {
                store: HashMap::new(),
                outer: None,
            })),
        }
    }

    /// Creates a new scope nested inside `outer`, used when entering a
    /// function call.
    pub fn enclosed(outer: &Environment) -> Self {
        Environment {
            inner: Rc::new(RefCell::new(Scope {
                store: HashMap::new(),
                outer: Some(outer.clone()),
            })),
        }
    }

    /// Looks up a name, walking outward through enclosing scopes.
    pub fn get(&self, name: &str) -> Option<Value> {
        let scope = self.inner.borrow();
        if let Some(value) = scope.store.get(name) {
            return Some(value.clone());
        }
        scope.outer.as_ref().and_then(|outer| outer.get(name))
    }

    /// Binds a name in the current (innermost) scope.
    pub fn set(&self, name: impl Into<String>, value: Value) {
        self.inner.borrow_mut().store.insert(name.into(), value);
    }
}

impl Default for Environment {
    fn default() -> Self {
        Environment::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inner_scope_shadows_outer() {
        let outer = Environment::new();
        outer.set("x", Value::Integer(1));

        let inner = Environment::enclosed(&outer);
        inner.set("x", Value::Integer(2));

        assert!(matches!(inner.get("x"), Some(Value::Integer(2))));
        assert!(matches!(outer.get("x"), Some(Value::Integer(1))));
    }

    #[test]
    fn inner_scope_sees_outer_bindings() {
        let outer = Environment::new();
        outer.set("y", Value::Integer(42));

        let inner = Environment::enclosed(&outer);
        assert!(matches!(inner.get("y"), Some(Value::Integer(42))));
    }

    #[test]
    fn unbound_name_is_none() {
        let env = Environment::new();
        assert!(env.get("missing").is_none());
    }
}

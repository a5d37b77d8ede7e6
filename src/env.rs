// ABOUTME: Environment module for managing variable bindings and scope chains

use crate::value::Value;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// A frame of name-to-value bindings with an optional enclosing frame.
/// Frames are shared (`Rc`) because a closure keeps its defining frame alive
/// after the block that created it has exited.
#[derive(Debug)]
pub struct Environment {
    bindings: RefCell<HashMap<String, Value>>,
    parent: Option<Rc<Environment>>,
}

impl Environment {
    /// Creates the global environment, the root of every chain.
    pub fn new() -> Rc<Self> {
        Rc::new(Environment {
            bindings: RefCell::new(HashMap::new()),
            parent: None,
        })
    }

    /// Creates a child environment for a block or function call.
    pub fn with_parent(parent: Rc<Environment>) -> Rc<Self> {
        Rc::new(Environment {
            bindings: RefCell::new(HashMap::new()),
            parent: Some(parent),
        })
    }

    /// Binds a name in THIS frame only; never walks the parent chain.
    pub fn define(&self, name: String, value: Value) {
        self.bindings.borrow_mut().insert(name, value);
    }

    /// Looks a name up in this frame, then outward through the chain.
    pub fn get(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.bindings.borrow().get(name) {
            return Some(value.clone());
        }

        if let Some(ref parent) = self.parent {
            return parent.get(name);
        }

        None
    }

    /// Re-binds an existing name, walking outward through the chain.
    /// Returns false when the name is bound nowhere.
    pub fn assign(&self, name: &str, value: Value) -> bool {
        if self.bindings.borrow().contains_key(name) {
            self.bindings.borrow_mut().insert(name.to_string(), value);
            return true;
        }

        if let Some(ref parent) = self.parent {
            return parent.assign(name, value);
        }

        false
    }

    /// Looks a name up in the frame exactly `distance` hops outward, as
    /// precomputed by the resolver.
    pub fn get_at(&self, distance: usize, name: &str) -> Option<Value> {
        if distance == 0 {
            return self.bindings.borrow().get(name).cloned();
        }
        self.parent
            .as_ref()
            .and_then(|parent| parent.get_at(distance - 1, name))
    }

    /// Re-binds a name in the frame exactly `distance` hops outward.
    pub fn assign_at(&self, distance: usize, name: &str, value: Value) -> bool {
        if distance == 0 {
            self.bindings.borrow_mut().insert(name.to_string(), value);
            return true;
        }
        self.parent
            .as_ref()
            .is_some_and(|parent| parent.assign_at(distance - 1, name, value))
    }
}

use std::{collections::HashMap, rc::Rc};

use tracing::debug;

use super::{
    ir::{Entity, Function},
    types::Type,
};

/// Names bound in the root scope before any source is analyzed.
pub const STANDARD_LIBRARY: [(&str, Type); 6] = [
    ("int", Type::Int),
    ("float", Type::Float),
    ("boolean", Type::Bool),
    ("string", Type::String),
    ("void", Type::Void),
    ("any", Type::Any),
];

/// One lexical scope.
#[derive(Debug)]
pub struct Scope {
    pub locals: HashMap<String, Entity>,
    /// Whether this scope is (inside) a loop body, for `yield`.
    pub in_loop: bool,
    /// The innermost enclosing function, for `return`.
    pub function: Option<Rc<Function>>,
}

/// Flag overrides for a child scope. `None` inherits the parent's value.
#[derive(Debug, Default)]
pub struct ScopeOverrides {
    pub in_loop: Option<bool>,
    pub function: Option<Rc<Function>>,
}

/// The live scope chain, root first.
///
/// Only the path from the root to the current scope exists at any time, so
/// the chain is kept as a stack: the parent of a scope is the one below it.
/// Entering a construct pushes a child, leaving it pops the child and
/// discards its bindings.
#[derive(Debug)]
pub struct Context {
    scopes: Vec<Scope>,
}

impl Context {
    /// A chain holding only the root scope, seeded with the standard library.
    pub fn root() -> Self {
        let locals = STANDARD_LIBRARY
            .into_iter()
            .map(|(name, ty)| (String::from(name), Entity::Type(ty)))
            .collect();

        Context {
            scopes: vec![Scope {
                locals,
                in_loop: false,
                function: None,
            }],
        }
    }

    fn current(&self) -> &Scope {
        &self.scopes[self.scopes.len() - 1]
    }

    fn current_mut(&mut self) -> &mut Scope {
        let last = self.scopes.len() - 1;
        &mut self.scopes[last]
    }

    /// Binds `name` in the current scope, replacing any binding it had there.
    pub fn add(&mut self, name: &str, entity: Entity) {
        debug!(name, depth = self.depth(), "binding");
        self.current_mut().locals.insert(String::from(name), entity);
    }

    /// Finds the innermost binding of `name` along the chain.
    pub fn lookup(&self, name: &str) -> Option<&Entity> {
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.locals.get(name))
    }

    /// Finds a binding of `name` in the current scope only.
    pub fn lookup_local(&self, name: &str) -> Option<&Entity> {
        self.current().locals.get(name)
    }

    /// Enters a fresh, empty child of the current scope.
    pub fn new_child(&mut self, overrides: ScopeOverrides) {
        let parent = self.current();
        let child = Scope {
            locals: HashMap::new(),
            in_loop: overrides.in_loop.unwrap_or(parent.in_loop),
            function: overrides.function.or_else(|| parent.function.clone()),
        };

        debug!(depth = self.depth() + 1, in_loop = child.in_loop, "entering scope");
        self.scopes.push(child);
    }

    /// Leaves the current scope for its parent. The root scope is never left.
    pub fn pop(&mut self) {
        if self.scopes.len() > 1 {
            debug!(depth = self.depth(), "leaving scope");
            self.scopes.pop();
        }
    }

    pub fn in_loop(&self) -> bool {
        self.current().in_loop
    }

    pub fn function(&self) -> Option<&Rc<Function>> {
        self.current().function.as_ref()
    }

    /// Number of scopes below the current one; the root is at depth 0.
    pub fn depth(&self) -> usize {
        self.scopes.len() - 1
    }
}

impl Default for Context {
    fn default() -> Self {
        Context::root()
    }
}

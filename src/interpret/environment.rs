use std::collections::HashMap;

use super::{error::RuntimeError, value::Value};
use crate::token::LexItem;

pub type ScopeId = usize;

pub const GLOBAL_SCOPE: ScopeId = 0;

#[derive(Debug)]
struct Scope {
    variables: HashMap<String, Value>,
    parent: Option<ScopeId>,
}

impl Scope {
    fn new(parent: Option<ScopeId>) -> Self {
        Self {
            variables: HashMap::new(),
            parent,
        }
    }
}

/// Arena of scopes. A scope only points at its parent, so the chain is a tree
/// and scopes are pushed and popped in strict LIFO order.
#[derive(Debug)]
pub struct Environment {
    scopes: Vec<Scope>,
    current: ScopeId,
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl Environment {
    pub fn new() -> Self {
        Self {
            scopes: vec![Scope::new(None)],
            current: GLOBAL_SCOPE,
        }
    }

    pub fn current(&self) -> ScopeId {
        self.current
    }

    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    /// Makes a child of `parent` the current scope, returns the scope to restore.
    pub fn push_scope(&mut self, parent: ScopeId) -> ScopeId {
        self.scopes.push(Scope::new(Some(parent)));
        std::mem::replace(&mut self.current, self.scopes.len() - 1)
    }

    pub fn pop_scope(&mut self, previous: ScopeId) {
        // the global scope is never dropped
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
        self.current = previous;
    }

    /// Introduces or overwrites a binding in the current scope.
    pub fn define(&mut self, name: impl Into<String>, value: Value) {
        let scope = &mut self.scopes[self.current];
        scope.variables.insert(name.into(), value);
    }

    pub fn get(&self, name: &LexItem) -> Result<Value, RuntimeError> {
        match self.resolve(&name.lexeme) {
            Some(id) => Ok(self.scopes[id].variables[&name.lexeme].clone()),
            None => Err(RuntimeError::UndefinedVariable(name.clone())),
        }
    }

    /// Updates the nearest existing binding, it never creates one.
    pub fn assign(&mut self, name: &LexItem, value: Value) -> Result<(), RuntimeError> {
        let Some(id) = self.resolve(&name.lexeme) else {
            return Err(RuntimeError::UndefinedVariable(name.clone()));
        };
        self.scopes[id].variables.insert(name.lexeme.clone(), value);
        Ok(())
    }

    fn resolve(&self, name: &str) -> Option<ScopeId> {
        let mut scope_id = Some(self.current);
        while let Some(id) = scope_id {
            let scope = &self.scopes[id];
            if scope.variables.contains_key(name) {
                return Some(id);
            }
            scope_id = scope.parent;
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::Token;

    fn name(lexeme: &str) -> LexItem {
        LexItem::new(Token::Identifier, lexeme, None, 1)
    }

    fn number(env: &Environment, lexeme: &str) -> f64 {
        match env.get(&name(lexeme)) {
            Ok(Value::Number(v)) => v,
            other => panic!("expected number for {}, got {:?}", lexeme, other),
        }
    }

    #[test]
    fn define_overwrites_in_current_scope() {
        let mut env = Environment::new();
        env.define("a", Value::Number(1.0));
        env.define("a", Value::Number(2.0));
        assert_eq!(number(&env, "a"), 2.0);
    }

    #[test]
    fn lookup_walks_outward() {
        let mut env = Environment::new();
        env.define("a", Value::Number(1.0));
        let previous = env.push_scope(env.current());
        let _inner = env.push_scope(env.current());
        assert_eq!(number(&env, "a"), 1.0);
        assert_eq!(env.depth(), 3);
        env.pop_scope(previous);
        assert_eq!(env.current(), GLOBAL_SCOPE);
    }

    #[test]
    fn shadowing_does_not_touch_parent() {
        let mut env = Environment::new();
        env.define("a", Value::Number(1.0));
        let previous = env.push_scope(GLOBAL_SCOPE);
        env.define("a", Value::Number(2.0));
        assert_eq!(number(&env, "a"), 2.0);
        env.pop_scope(previous);
        assert_eq!(number(&env, "a"), 1.0);
        assert_eq!(env.depth(), 1);
    }

    #[test]
    fn assign_updates_enclosing_binding() {
        let mut env = Environment::new();
        env.define("a", Value::Number(1.0));
        let previous = env.push_scope(GLOBAL_SCOPE);
        env.assign(&name("a"), Value::Number(5.0)).unwrap();
        env.pop_scope(previous);
        assert_eq!(number(&env, "a"), 5.0);
    }

    #[test]
    fn assign_never_creates_a_binding() {
        let mut env = Environment::new();
        let err = env.assign(&name("x"), Value::Nil).unwrap_err();
        assert!(matches!(err, RuntimeError::UndefinedVariable(ref li) if li.lexeme == "x"));
        assert!(env.get(&name("x")).is_err());
    }

    #[test]
    fn undefined_variable_message() {
        let env = Environment::new();
        let err = env.get(&name("hygge")).unwrap_err();
        assert_eq!(err.to_string(), "Undefined variable 'hygge'.\n[line 1]");
        assert_eq!(err.line(), 1);
    }

    #[test]
    fn sibling_scope_cannot_see_popped_bindings() {
        let mut env = Environment::new();
        let previous = env.push_scope(GLOBAL_SCOPE);
        env.define("tmp", Value::Bool(true));
        env.pop_scope(previous);
        let previous = env.push_scope(GLOBAL_SCOPE);
        assert!(env.get(&name("tmp")).is_err());
        env.pop_scope(previous);
    }
}

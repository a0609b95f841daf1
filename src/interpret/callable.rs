use std::{fmt, rc::Rc};

use super::{environment::ScopeId, error::RuntimeError, interpreter::Interpreter, value::Value};
use crate::ast::FnDeclNode;

pub type BuiltinFn = fn(&mut Interpreter, Vec<Value>) -> Result<Value, RuntimeError>;

/// Anything the language can call. The interpreter checks the arity before `call`.
pub trait Callable: fmt::Debug + fmt::Display {
    fn name(&self) -> &str;

    fn arity(&self) -> usize;

    fn call(&self, itp: &mut Interpreter, args: Vec<Value>) -> Result<Value, RuntimeError>;
}

/// A routine declared with `gøremål`.
#[derive(Debug)]
pub struct Function {
    decl: Rc<FnDeclNode>,
    // only ever the global scope, calls do not see the scope they were declared in
    closure: ScopeId,
}

impl Function {
    pub fn new(decl: Rc<FnDeclNode>, closure: ScopeId) -> Self {
        Self { decl, closure }
    }
}

impl Callable for Function {
    fn name(&self) -> &str {
        &self.decl.name.lexeme
    }

    fn arity(&self) -> usize {
        self.decl.params.len()
    }

    fn call(&self, itp: &mut Interpreter, args: Vec<Value>) -> Result<Value, RuntimeError> {
        itp.execute_function(&self.decl, self.closure, args)?;
        Ok(Value::Nil)
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<gøremål {}>", self.name())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct NativeFunction {
    pub name: &'static str,
    pub arity: usize,
    pub func: BuiltinFn,
}

impl Callable for NativeFunction {
    fn name(&self) -> &str {
        self.name
    }

    fn arity(&self) -> usize {
        self.arity
    }

    fn call(&self, itp: &mut Interpreter, args: Vec<Value>) -> Result<Value, RuntimeError> {
        (self.func)(itp, args)
    }
}

impl fmt::Display for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<native gøremål {}>", self.name)
    }
}

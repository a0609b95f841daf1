use std::{cell::RefCell, rc::Rc};

use log::trace;

use super::callable::Function;
use super::environment::{Environment, ScopeId, GLOBAL_SCOPE};
use super::error::RuntimeError;
use super::prelude;
use super::value::Value;
use crate::ast::*;
use crate::token::LexItem;

const MAX_CALL_DEPTH: usize = 255;

pub struct Interpreter {
    pub(super) environment: Environment,
    print_writer: Rc<RefCell<dyn std::io::Write>>,
    call_depth: usize,
}

impl Interpreter {
    pub fn new(print_writer: Rc<RefCell<dyn std::io::Write>>) -> Self {
        let mut environment = Environment::new();
        for native in prelude::create() {
            environment.define(native.name, Value::Callable(Rc::new(native)));
        }

        Self {
            environment,
            print_writer,
            call_depth: 0,
        }
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    /// Runs `stmts` in order and stops at the first runtime error. Effects that
    /// happened before the error are kept.
    pub fn interpret(&mut self, stmts: &[Statement]) -> Result<(), RuntimeError> {
        self.interpret_stmt_list(stmts)
    }

    fn interpret_stmt_list(&mut self, stmts: &[Statement]) -> Result<(), RuntimeError> {
        for stmt in stmts {
            self.interpret_stmt(stmt)?;
        }
        Ok(())
    }

    fn interpret_stmt(&mut self, stmt: &Statement) -> Result<(), RuntimeError> {
        match stmt {
            Statement::Expr(expr) => self.interpret_expr(expr).map(|_| ()),
            Statement::Print(keyword, expr) => self.interpret_print_stmt(keyword, expr),
            Statement::Declare(name, expr) => self.interpret_declare_stmt(name, expr.as_ref()),
            Statement::Block(stmts) => self.execute_block(stmts, self.environment.current()),
            Statement::If(node) => self.interpret_if_stmt(node),
            Statement::While(node) => self.interpret_while_stmt(node),
            Statement::FnDecl(decl) => {
                let function = Function::new(Rc::clone(decl), GLOBAL_SCOPE);
                self.environment
                    .define(decl.name.lexeme.clone(), Value::Callable(Rc::new(function)));
                Ok(())
            }
        }
    }

    fn interpret_print_stmt(
        &mut self,
        keyword: &LexItem,
        expr: &Expression,
    ) -> Result<(), RuntimeError> {
        let value = self.interpret_expr(expr)?;
        let mut out = self.print_writer.borrow_mut();
        writeln!(out, "{}", value).map_err(|e| RuntimeError::WriteFailed(keyword.line, e))
    }

    fn interpret_declare_stmt(
        &mut self,
        name: &LexItem,
        expr: Option<&Expression>,
    ) -> Result<(), RuntimeError> {
        let value = match expr {
            Some(expr) => self.interpret_expr(expr)?,
            None => Value::Nil,
        };
        self.environment.define(name.lexeme.clone(), value);
        Ok(())
    }

    fn interpret_if_stmt(&mut self, node: &IfStmtNode) -> Result<(), RuntimeError> {
        if self.is_truthy(&node.cond)? {
            return self.interpret_stmt(&node.then_branch);
        }
        match &node.else_branch {
            Some(stmt) => self.interpret_stmt(stmt),
            None => Ok(()),
        }
    }

    fn interpret_while_stmt(
        &mut self,
        WhileNode { cond, body }: &WhileNode,
    ) -> Result<(), RuntimeError> {
        while self.is_truthy(cond)? {
            self.interpret_stmt(body)?;
        }
        Ok(())
    }

    // the previous scope is restored whether the statements fail or not
    fn execute_block(&mut self, stmts: &[Statement], parent: ScopeId) -> Result<(), RuntimeError> {
        let previous = self.environment.push_scope(parent);
        let result = self.interpret_stmt_list(stmts);
        self.environment.pop_scope(previous);
        result
    }

    pub(super) fn execute_function(
        &mut self,
        decl: &FnDeclNode,
        closure: ScopeId,
        args: Vec<Value>,
    ) -> Result<(), RuntimeError> {
        let previous = self.environment.push_scope(closure);
        for (param, value) in decl.params.iter().zip(args) {
            self.environment.define(param.lexeme.clone(), value);
        }
        let result = self.interpret_stmt_list(&decl.body);
        self.environment.pop_scope(previous);
        result
    }

    fn interpret_expr(&mut self, expr: &Expression) -> Result<Value, RuntimeError> {
        match expr {
            Expression::Literal(node) => Ok(literal_value(node)),
            Expression::Grouping(expr) => self.interpret_expr(expr),
            Expression::Unary(node) => self.interpret_unary_op(node),
            Expression::Binary(node) => self.interpret_binary_op(node),
            Expression::Logical(node) => self.interpret_logical_op(node),
            Expression::Variable(name) => self.environment.get(name),
            Expression::Assign(AssignNode { name, value }) => {
                let value = self.interpret_expr(value)?;
                self.environment.assign(name, value.clone())?;
                Ok(value)
            }
            Expression::Call(node) => self.interpret_fn_call(node),
        }
    }

    fn interpret_unary_op(
        &mut self,
        UnaryOpNode { op, kind, rhs }: &UnaryOpNode,
    ) -> Result<Value, RuntimeError> {
        let value = self.interpret_expr(rhs)?;
        match kind {
            UnaryOp::Not => Ok(Value::Bool(!value.is_truthy())),
            UnaryOp::Negate => match value {
                Value::Number(v) => Ok(Value::Number(-v)),
                _ => Err(RuntimeError::OperandMustBeNumber(op.clone())),
            },
        }
    }

    fn interpret_binary_op(
        &mut self,
        BinaryOpNode { lhs, op, kind, rhs }: &BinaryOpNode,
    ) -> Result<Value, RuntimeError> {
        let lhs = self.interpret_expr(lhs)?;
        let rhs = self.interpret_expr(rhs)?;

        // division by zero follows IEEE-754
        match kind {
            BinaryOp::Add => add(lhs, op, rhs),
            BinaryOp::Subtract => arithmetic(&lhs, op, &rhs, |l, r| l - r),
            BinaryOp::Multiply => arithmetic(&lhs, op, &rhs, |l, r| l * r),
            BinaryOp::Divide => arithmetic(&lhs, op, &rhs, |l, r| l / r),
            BinaryOp::Greater => compare(&lhs, op, &rhs, |l, r| l > r),
            BinaryOp::GreaterEqual => compare(&lhs, op, &rhs, |l, r| l >= r),
            BinaryOp::Less => compare(&lhs, op, &rhs, |l, r| l < r),
            BinaryOp::LessEqual => compare(&lhs, op, &rhs, |l, r| l <= r),
            BinaryOp::Equal => Ok(Value::Bool(lhs.is_equal(&rhs))),
            BinaryOp::NotEqual => Ok(Value::Bool(!lhs.is_equal(&rhs))),
        }
    }

    // operands come back as they are, not coerced to bool
    fn interpret_logical_op(
        &mut self,
        BinaryOpNode { lhs, kind, rhs, .. }: &BinaryOpNode<LogicalOp>,
    ) -> Result<Value, RuntimeError> {
        let lhs = self.interpret_expr(lhs)?;
        let short_circuit = match kind {
            LogicalOp::Or => lhs.is_truthy(),
            LogicalOp::And => !lhs.is_truthy(),
        };
        if short_circuit {
            return Ok(lhs);
        }
        self.interpret_expr(rhs)
    }

    fn interpret_fn_call(
        &mut self,
        FnCallNode {
            callee,
            paren,
            args,
        }: &FnCallNode,
    ) -> Result<Value, RuntimeError> {
        let callee = self.interpret_expr(callee)?;

        let mut arg_values = Vec::with_capacity(args.len());
        for arg in args {
            arg_values.push(self.interpret_expr(arg)?);
        }

        let callable = match callee {
            Value::Callable(callable) => callable,
            other => return Err(RuntimeError::ValueNotCallable(paren.line, other)),
        };

        if callable.arity() != arg_values.len() {
            return Err(RuntimeError::WrongNumberOfArgument(
                paren.line,
                callable.arity(),
                arg_values.len(),
            ));
        }

        if self.call_depth >= MAX_CALL_DEPTH {
            return Err(RuntimeError::StackOverflow(paren.line));
        }

        trace!(
            "call {} with {} argument(s), depth {}",
            callable.name(),
            arg_values.len(),
            self.call_depth
        );

        self.call_depth += 1;
        let result = callable.call(self, arg_values);
        self.call_depth -= 1;
        result
    }

    fn is_truthy(&mut self, expr: &Expression) -> Result<bool, RuntimeError> {
        self.interpret_expr(expr).map(|v| v.is_truthy())
    }
}

fn literal_value(node: &LiteralNode) -> Value {
    match node {
        LiteralNode::Nil => Value::Nil,
        LiteralNode::Bool(v) => Value::Bool(*v),
        LiteralNode::Number(v) => Value::Number(*v),
        LiteralNode::Str(v) => Value::Str(v.clone()),
    }
}

fn add(lhs: Value, op: &LexItem, rhs: Value) -> Result<Value, RuntimeError> {
    match (lhs, rhs) {
        (Value::Number(l), Value::Number(r)) => Ok(Value::Number(l + r)),
        (Value::Str(l), Value::Str(r)) => Ok(Value::Str(l + &r)),
        _ => Err(RuntimeError::OperandsMustBeNumbersOrStrings(op.clone())),
    }
}

fn arithmetic(
    lhs: &Value,
    op: &LexItem,
    rhs: &Value,
    apply: fn(f64, f64) -> f64,
) -> Result<Value, RuntimeError> {
    let (l, r) = extract_numbers(lhs, op, rhs)?;
    Ok(Value::Number(apply(l, r)))
}

fn compare(
    lhs: &Value,
    op: &LexItem,
    rhs: &Value,
    apply: fn(f64, f64) -> bool,
) -> Result<Value, RuntimeError> {
    let (l, r) = extract_numbers(lhs, op, rhs)?;
    Ok(Value::Bool(apply(l, r)))
}

fn extract_numbers(lhs: &Value, op: &LexItem, rhs: &Value) -> Result<(f64, f64), RuntimeError> {
    match (lhs, rhs) {
        (Value::Number(l), Value::Number(r)) => Ok((*l, *r)),
        _ => Err(RuntimeError::OperandsMustBeNumbers(op.clone())),
    }
}

use std::rc::Rc;

use crate::token::LexItem;

#[derive(Debug, Clone, PartialEq)]
pub enum LiteralNode {
    Nil,
    Bool(bool),
    Number(f64),
    Str(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Negate,
    Not,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Greater,
    GreaterEqual,
    Less,
    LessEqual,
    Equal,
    NotEqual,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOp {
    And,
    Or,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnaryOpNode {
    pub op: LexItem,
    pub kind: UnaryOp,
    pub rhs: Box<Expression>,
}

/// `op` is the operator as written, kept for diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryOpNode<Op = BinaryOp> {
    pub lhs: Box<Expression>,
    pub op: LexItem,
    pub kind: Op,
    pub rhs: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssignNode {
    pub name: LexItem,
    pub value: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FnCallNode {
    pub callee: Box<Expression>,
    // closing paren, used for the line of call errors
    pub paren: LexItem,
    pub args: Vec<Expression>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Literal(LiteralNode),
    Grouping(Box<Expression>),
    Unary(UnaryOpNode),
    Binary(BinaryOpNode),
    Logical(BinaryOpNode<LogicalOp>),
    Variable(LexItem),
    Assign(AssignNode),
    Call(FnCallNode),
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfStmtNode {
    pub cond: Expression,
    pub then_branch: Box<Statement>,
    pub else_branch: Option<Box<Statement>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhileNode {
    pub cond: Expression,
    pub body: Box<Statement>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FnDeclNode {
    pub name: LexItem,
    pub params: Vec<LexItem>,
    pub body: StatementList,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Expr(Expression),
    Print(LexItem, Expression),
    Declare(LexItem, Option<Expression>),
    Block(StatementList),
    If(IfStmtNode),
    While(WhileNode),
    FnDecl(Rc<FnDeclNode>),
}

pub type StatementList = Vec<Statement>;

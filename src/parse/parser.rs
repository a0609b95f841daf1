use std::rc::Rc;

use crate::ast::*;
use crate::token::{LexItem, Literal, Token};

use super::context::Context;
use super::error::ParseError;

/// Statements that parsed cleanly plus every syntax error found.
#[derive(Debug)]
pub struct Parsed {
    pub statements: StatementList,
    pub errors: Vec<ParseError>,
}

pub fn parse(items: Vec<LexItem>) -> Parsed {
    let mut state = Context::new(items);
    let mut statements = vec![];
    while !state.is_at_end() {
        if let Some(stmt) = parse_declaration(&mut state) {
            statements.push(stmt);
        }
    }
    Parsed {
        statements,
        errors: state.into_errors(),
    }
}

// declaration boundary: a failed declaration is recorded and skipped
fn parse_declaration(state: &mut Context) -> Option<Statement> {
    match try_parse_declaration(state) {
        Ok(stmt) => Some(stmt),
        Err(err) => {
            state.report(err);
            state.synchronize();
            None
        }
    }
}

fn try_parse_declaration(state: &mut Context) -> Result<Statement, ParseError> {
    if state.match_token(&[Token::Var]).is_some() {
        return parse_var_declaration(state);
    }
    if state.match_token(&[Token::Fn]).is_some() {
        return parse_fn_declaration(state);
    }
    parse_stmt(state)
}

fn parse_var_declaration(state: &mut Context) -> Result<Statement, ParseError> {
    let name = state.consume_token(Token::Identifier, "Expect variable name.")?;

    let initializer = if state.match_token(&[Token::Equal]).is_some() {
        Some(parse_expr(state)?)
    } else {
        None
    };

    state.consume_token(Token::Semicolon, "Expect ';' after variable declaration.")?;
    Ok(Statement::Declare(name, initializer))
}

fn parse_fn_declaration(state: &mut Context) -> Result<Statement, ParseError> {
    let name = state.consume_token(Token::Identifier, "Expect function name.")?;
    state.consume_token(Token::LRoundParen, "Expect '(' after function name.")?;

    let mut params = vec![];
    if !state.peek(&[Token::RRoundParen]) {
        loop {
            params.push(state.consume_token(Token::Identifier, "Expect parameter name.")?);
            if state.match_token(&[Token::Comma]).is_none() {
                break;
            }
        }
    }
    state.consume_token(Token::RRoundParen, "Expect ')' after parameters.")?;

    state.consume_token(Token::LPointParen, "Expect '{' before function body.")?;
    let body = parse_block_statement_list(state)?;

    Ok(Statement::FnDecl(Rc::new(FnDeclNode { name, params, body })))
}

fn parse_stmt(state: &mut Context) -> Result<Statement, ParseError> {
    let li = state.get_curr().clone();
    match li.token {
        Token::If => {
            state.advance();
            parse_if(state)
        }
        Token::Print => {
            state.advance();
            parse_print(state, li)
        }
        Token::While => {
            state.advance();
            parse_while(state)
        }
        Token::For => {
            state.advance();
            parse_for(state)
        }
        Token::LPointParen => {
            state.advance();
            parse_block_statement_list(state).map(Statement::Block)
        }
        _ => parse_expr_stmt(state),
    }
}

fn parse_if(state: &mut Context) -> Result<Statement, ParseError> {
    state.consume_token(Token::LRoundParen, "Expect '(' after 'hvis'.")?;
    let cond = parse_expr(state)?;
    state.consume_token(Token::RRoundParen, "Expect ')' after if condition.")?;

    let then_branch = Box::new(parse_stmt(state)?);
    let else_branch = match state.match_token(&[Token::Else]) {
        Some(_) => Some(Box::new(parse_stmt(state)?)),
        None => None,
    };

    Ok(Statement::If(IfStmtNode {
        cond,
        then_branch,
        else_branch,
    }))
}

fn parse_print(state: &mut Context, keyword: LexItem) -> Result<Statement, ParseError> {
    let expr = parse_expr(state)?;
    state.consume_token(Token::Semicolon, "Expect ';' after value.")?;
    Ok(Statement::Print(keyword, expr))
}

fn parse_while(state: &mut Context) -> Result<Statement, ParseError> {
    state.consume_token(Token::LRoundParen, "Expect '(' after 'imens'.")?;
    let cond = parse_expr(state)?;
    state.consume_token(Token::RRoundParen, "Expect ')' after condition.")?;
    let body = Box::new(parse_stmt(state)?);
    Ok(Statement::While(WhileNode { cond, body }))
}

// `for` has no node of its own, it becomes a block around a while loop
fn parse_for(state: &mut Context) -> Result<Statement, ParseError> {
    state.consume_token(Token::LRoundParen, "Expect '(' after 'for'.")?;

    let initializer = if state.match_token(&[Token::Semicolon]).is_some() {
        None
    } else if state.match_token(&[Token::Var]).is_some() {
        Some(parse_var_declaration(state)?)
    } else {
        Some(parse_expr_stmt(state)?)
    };

    let cond = if state.peek(&[Token::Semicolon]) {
        None
    } else {
        Some(parse_expr(state)?)
    };
    state.consume_token(Token::Semicolon, "Expect ';' after loop condition.")?;

    let increment = if state.peek(&[Token::RRoundParen]) {
        None
    } else {
        Some(parse_expr(state)?)
    };
    state.consume_token(Token::RRoundParen, "Expect ')' after for clauses.")?;

    let mut body = parse_stmt(state)?;
    if let Some(increment) = increment {
        body = Statement::Block(vec![body, Statement::Expr(increment)]);
    }
    let cond = cond.unwrap_or(Expression::Literal(LiteralNode::Bool(true)));
    body = Statement::While(WhileNode {
        cond,
        body: Box::new(body),
    });
    if let Some(initializer) = initializer {
        body = Statement::Block(vec![initializer, body]);
    }

    Ok(body)
}

fn parse_block_statement_list(state: &mut Context) -> Result<StatementList, ParseError> {
    let mut stmts = vec![];

    while !state.is_at_end() && !state.peek(&[Token::RPointParen]) {
        if let Some(stmt) = parse_declaration(state) {
            stmts.push(stmt);
        }
    }

    state.consume_token(Token::RPointParen, "Expect '}' after block.")?;
    Ok(stmts)
}

fn parse_expr_stmt(state: &mut Context) -> Result<Statement, ParseError> {
    let expr = parse_expr(state)?;
    state.consume_token(Token::Semicolon, "Expect ';' after expression.")?;
    Ok(Statement::Expr(expr))
}

fn parse_expr(state: &mut Context) -> Result<Expression, ParseError> {
    parse_assignment(state)
}

fn parse_assignment(state: &mut Context) -> Result<Expression, ParseError> {
    let expr = parse_or(state)?;

    if let Some(equals) = state.match_token(&[Token::Equal]) {
        let value = parse_assignment(state)?;

        if let Expression::Variable(name) = expr {
            return Ok(Expression::Assign(AssignNode {
                name,
                value: Box::new(value),
            }));
        }

        // reported without unwinding, the left-hand side stays the result
        state.report(ParseError::InvalidAssignmentTarget(equals));
    }

    Ok(expr)
}

fn parse_or(state: &mut Context) -> Result<Expression, ParseError> {
    parse_recursive_binary(
        state,
        &[(Token::Or, LogicalOp::Or)],
        parse_and,
        Expression::Logical,
    )
}

fn parse_and(state: &mut Context) -> Result<Expression, ParseError> {
    parse_recursive_binary(
        state,
        &[(Token::And, LogicalOp::And)],
        parse_equality,
        Expression::Logical,
    )
}

fn parse_equality(state: &mut Context) -> Result<Expression, ParseError> {
    parse_recursive_binary(
        state,
        &[
            (Token::EqualEqual, BinaryOp::Equal),
            (Token::BangEqual, BinaryOp::NotEqual),
        ],
        parse_comparison,
        Expression::Binary,
    )
}

fn parse_comparison(state: &mut Context) -> Result<Expression, ParseError> {
    parse_recursive_binary(
        state,
        &[
            (Token::Less, BinaryOp::Less),
            (Token::LessEqual, BinaryOp::LessEqual),
            (Token::Greater, BinaryOp::Greater),
            (Token::GreaterEqual, BinaryOp::GreaterEqual),
        ],
        parse_term,
        Expression::Binary,
    )
}

fn parse_term(state: &mut Context) -> Result<Expression, ParseError> {
    parse_recursive_binary(
        state,
        &[
            (Token::Plus, BinaryOp::Add),
            (Token::Minus, BinaryOp::Subtract),
        ],
        parse_factor,
        Expression::Binary,
    )
}

fn parse_factor(state: &mut Context) -> Result<Expression, ParseError> {
    parse_recursive_binary(
        state,
        &[
            (Token::Star, BinaryOp::Multiply),
            (Token::Slash, BinaryOp::Divide),
        ],
        parse_unary,
        Expression::Binary,
    )
}

fn parse_recursive_binary<Op, F>(
    state: &mut Context,
    operators: &'static [(Token, Op)],
    lower_fn: F,
    make_node: fn(BinaryOpNode<Op>) -> Expression,
) -> Result<Expression, ParseError>
where
    Op: Copy,
    F: Fn(&mut Context) -> Result<Expression, ParseError>,
{
    let mut lhs = lower_fn(state)?;

    while let Some(kind) = match_operator(state, operators) {
        let op = state.advance();
        let rhs = lower_fn(state)?;
        lhs = make_node(BinaryOpNode {
            lhs: Box::new(lhs),
            op,
            kind,
            rhs: Box::new(rhs),
        });
    }

    Ok(lhs)
}

fn match_operator<Op: Copy>(state: &Context, operators: &[(Token, Op)]) -> Option<Op> {
    let curr = state.get_curr().token;
    operators
        .iter()
        .find(|(token, _)| *token == curr)
        .map(|(_, kind)| *kind)
}

fn parse_unary(state: &mut Context) -> Result<Expression, ParseError> {
    let kind = match state.get_curr().token {
        Token::Bang => UnaryOp::Not,
        Token::Minus => UnaryOp::Negate,
        _ => return parse_call(state),
    };
    let op = state.advance();
    let rhs = parse_unary(state)?;
    Ok(Expression::Unary(UnaryOpNode {
        op,
        kind,
        rhs: Box::new(rhs),
    }))
}

fn parse_call(state: &mut Context) -> Result<Expression, ParseError> {
    let mut expr = parse_primary(state)?;

    while state.match_token(&[Token::LRoundParen]).is_some() {
        let args = parse_arguments(state)?;
        let paren = state.consume_token(Token::RRoundParen, "Expect ')' after arguments.")?;
        expr = Expression::Call(FnCallNode {
            callee: Box::new(expr),
            paren,
            args,
        });
    }

    Ok(expr)
}

fn parse_arguments(state: &mut Context) -> Result<Vec<Expression>, ParseError> {
    let mut args = vec![];
    if state.peek(&[Token::RRoundParen]) {
        return Ok(args);
    }
    loop {
        args.push(parse_expr(state)?);
        if state.match_token(&[Token::Comma]).is_none() {
            break;
        }
    }
    Ok(args)
}

fn parse_primary(state: &mut Context) -> Result<Expression, ParseError> {
    let li = state.get_curr().clone();

    let node = match li.token {
        Token::False => Expression::Literal(LiteralNode::Bool(false)),
        Token::True => Expression::Literal(LiteralNode::Bool(true)),
        Token::Nil => Expression::Literal(LiteralNode::Nil),
        Token::Number | Token::String => Expression::Literal(literal_node(&li)),
        Token::Identifier => Expression::Variable(li),
        Token::LRoundParen => return parse_group(state),
        _ => return Err(ParseError::UnexpectedToken(li, "Expect expression.")),
    };

    state.advance();
    Ok(node)
}

fn parse_group(state: &mut Context) -> Result<Expression, ParseError> {
    state.consume_token(Token::LRoundParen, "Expect '(' before expression.")?;
    let expr = parse_expr(state)?;
    state.consume_token(Token::RRoundParen, "Expect ')' after expression.")?;
    Ok(Expression::Grouping(Box::new(expr)))
}

fn literal_node(li: &LexItem) -> LiteralNode {
    match &li.literal {
        Some(Literal::Number(v)) => LiteralNode::Number(*v),
        Some(Literal::Str(v)) => LiteralNode::Str(v.clone()),
        None => LiteralNode::Nil,
    }
}

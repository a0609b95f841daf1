use crate::token::{LexItem, Token};

use super::error::ParseError;

// tokens that start a statement, used when synchronizing after an error
const STATEMENT_STARTS: &[Token] = &[
    Token::Class,
    Token::Fn,
    Token::Var,
    Token::For,
    Token::If,
    Token::While,
    Token::Print,
    Token::Return,
];

pub struct Context {
    items: Vec<LexItem>,
    curr_pos: usize,
    errors: Vec<ParseError>,
}

impl Context {
    /// Appends an `Eof` item when the stream does not already end with one.
    pub fn new(mut items: Vec<LexItem>) -> Self {
        if items.last().map(|li| li.token) != Some(Token::Eof) {
            let line = items.last().map(|li| li.line).unwrap_or(1);
            items.push(LexItem::eof(line));
        }
        Self {
            items,
            curr_pos: 0,
            errors: vec![],
        }
    }

    pub fn is_at_end(&self) -> bool {
        self.get_curr().token == Token::Eof
    }

    pub fn get_curr(&self) -> &LexItem {
        &self.items[self.curr_pos]
    }

    pub fn previous(&self) -> &LexItem {
        &self.items[self.curr_pos.saturating_sub(1)]
    }

    pub fn advance(&mut self) -> LexItem {
        if !self.is_at_end() {
            self.curr_pos += 1;
        }
        self.previous().clone()
    }

    pub fn peek(&self, match_tokens: &[Token]) -> bool {
        !self.is_at_end() && match_tokens.contains(&self.get_curr().token)
    }

    /// Consumes the current item when it is one of `match_tokens`.
    pub fn match_token(&mut self, match_tokens: &[Token]) -> Option<LexItem> {
        if self.peek(match_tokens) {
            Some(self.advance())
        } else {
            None
        }
    }

    pub fn consume_token(
        &mut self,
        token: Token,
        message: &'static str,
    ) -> Result<LexItem, ParseError> {
        if self.peek(&[token]) {
            return Ok(self.advance());
        }
        Err(ParseError::UnexpectedToken(self.get_curr().clone(), message))
    }

    pub fn report(&mut self, error: ParseError) {
        self.errors.push(error);
    }

    pub fn synchronize(&mut self) {
        self.advance();

        while !self.is_at_end() {
            if self.previous().token == Token::Semicolon {
                return;
            }
            if STATEMENT_STARTS.contains(&self.get_curr().token) {
                return;
            }
            self.advance();
        }
    }

    pub fn into_errors(self) -> Vec<ParseError> {
        self.errors
    }
}

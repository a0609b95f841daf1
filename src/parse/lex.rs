use crate::token::{LexItem, Literal, Token, KEYWORDS};

use super::error::ParseError;

/// Token stream plus every lexical error met on the way.
#[derive(Debug)]
pub struct Lexed {
    pub tokens: Vec<LexItem>,
    pub errors: Vec<ParseError>,
}

struct Lexer {
    chars: Vec<char>,
    start: usize,
    curr_offset: usize,
    line: usize,
    items: Vec<LexItem>,
    errors: Vec<ParseError>,
}

fn is_identifier_start(c: char) -> bool {
    c == '_' || c.is_alphabetic()
}

fn is_identifier_char(c: char) -> bool {
    is_identifier_start(c) || c.is_ascii_digit()
}

pub fn lex(input: &str) -> Lexed {
    let mut lexer = Lexer {
        chars: input.chars().collect(),
        start: 0,
        curr_offset: 0,
        line: 1,
        items: vec![],
        errors: vec![],
    };

    while !lexer.is_at_end() {
        lexer.start = lexer.curr_offset;
        lexer.lex_token();
    }
    lexer.items.push(LexItem::eof(lexer.line));

    Lexed {
        tokens: lexer.items,
        errors: lexer.errors,
    }
}

impl Lexer {
    fn is_at_end(&self) -> bool {
        self.curr_offset >= self.chars.len()
    }

    fn advance(&mut self) -> char {
        let c = self.chars[self.curr_offset];
        self.curr_offset += 1;
        c
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.curr_offset).copied()
    }

    fn peek_next(&self) -> Option<char> {
        self.chars.get(self.curr_offset + 1).copied()
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() != Some(expected) {
            return false;
        }
        self.curr_offset += 1;
        true
    }

    fn current_lexeme(&self) -> String {
        self.chars[self.start..self.curr_offset].iter().collect()
    }

    fn push(&mut self, token: Token, literal: Option<Literal>) {
        let lexeme = self.current_lexeme();
        let item = LexItem::new(token, lexeme, literal, self.line);
        self.items.push(item);
    }

    fn push_one_or_two(&mut self, second: char, two: Token, one: Token) {
        let token = if self.match_char(second) { two } else { one };
        self.push(token, None);
    }

    fn lex_token(&mut self) {
        let c = self.advance();
        match c {
            '(' => self.push(Token::LRoundParen, None),
            ')' => self.push(Token::RRoundParen, None),
            '{' => self.push(Token::LPointParen, None),
            '}' => self.push(Token::RPointParen, None),
            ',' => self.push(Token::Comma, None),
            '.' => self.push(Token::Dot, None),
            '-' => self.push(Token::Minus, None),
            '+' => self.push(Token::Plus, None),
            ';' => self.push(Token::Semicolon, None),
            '*' => self.push(Token::Star, None),
            '!' => self.push_one_or_two('=', Token::BangEqual, Token::Bang),
            '=' => self.push_one_or_two('=', Token::EqualEqual, Token::Equal),
            '<' => self.push_one_or_two('=', Token::LessEqual, Token::Less),
            '>' => self.push_one_or_two('=', Token::GreaterEqual, Token::Greater),
            '/' => {
                if self.match_char('/') {
                    while self.peek().is_some_and(|c| c != '\n') {
                        self.curr_offset += 1;
                    }
                } else {
                    self.push(Token::Slash, None);
                }
            }
            ' ' | '\r' | '\t' => {
                // skip
            }
            '\n' => self.line += 1,
            '"' => self.lex_string(),
            c if c.is_ascii_digit() => self.lex_number(),
            c if is_identifier_start(c) => self.lex_keyword_or_identifier(),
            c => self.errors.push(ParseError::UnexpectedCharacter(self.line, c)),
        }
    }

    fn lex_string(&mut self) {
        while let Some(c) = self.peek() {
            if c == '"' {
                break;
            }
            if c == '\n' {
                self.line += 1;
            }
            self.curr_offset += 1;
        }

        if self.is_at_end() {
            self.errors.push(ParseError::UnterminatedString(self.line));
            return;
        }

        // closing '"'
        self.curr_offset += 1;

        // remove start '"' and end '"'
        let value = self.chars[self.start + 1..self.curr_offset - 1]
            .iter()
            .collect();
        self.push(Token::String, Some(Literal::Str(value)));
    }

    fn lex_number(&mut self) {
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.curr_offset += 1;
        }

        // a '.' only belongs to the number when a digit follows it
        if self.peek() == Some('.') && self.peek_next().is_some_and(|c| c.is_ascii_digit()) {
            self.curr_offset += 1;
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.curr_offset += 1;
            }
        }

        let lexeme = self.current_lexeme();
        match lexeme.parse::<f64>() {
            Ok(num) => self.push(Token::Number, Some(Literal::Number(num))),
            // digits with at most one inner dot always parse
            Err(_) => self.errors.push(ParseError::UnexpectedCharacter(
                self.line,
                self.chars[self.start],
            )),
        }
    }

    fn lex_keyword_or_identifier(&mut self) {
        while self.peek().is_some_and(is_identifier_char) {
            self.curr_offset += 1;
        }

        let lexeme = self.current_lexeme();
        let token = KEYWORDS
            .get(lexeme.as_str())
            .copied()
            .unwrap_or(Token::Identifier);
        self.push(token, None);
    }
}

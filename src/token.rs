use derive_more::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Token {
    LRoundParen,
    RRoundParen,
    LPointParen,
    RPointParen,
    Comma,
    Dot,
    Minus,
    Plus,
    Semicolon,
    Slash,
    Star,

    Bang,
    BangEqual,
    Equal,
    EqualEqual,
    Greater,
    GreaterEqual,
    Less,
    LessEqual,

    Identifier,
    String,
    Number,

    And,
    Class,
    Else,
    False,
    Fn,
    For,
    If,
    Nil,
    Or,
    Print,
    Return,
    Super,
    This,
    True,
    Var,
    While,
    Maybe,

    Eof,
}

pub static KEYWORDS: phf::Map<&'static str, Token> = phf::phf_map! {
    "og" => Token::And,
    "klass" => Token::Class,
    "ellers" => Token::Else,
    "falsk" => Token::False,
    "for" => Token::For,
    "gøremål" => Token::Fn,
    "hvis" => Token::If,
    "ingenting" => Token::Nil,
    "eller" => Token::Or,
    "skriv" => Token::Print,
    "returner" => Token::Return,
    "super" => Token::Super,
    "dette" => Token::This,
    "sandt" => Token::True,
    "sæt" => Token::Var,
    "imens" => Token::While,
    "måske" => Token::Maybe,
};

/// Decoded value of a number or string lexeme.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Number(f64),
    Str(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct LexItem {
    pub token: Token,
    pub lexeme: String,
    pub literal: Option<Literal>,
    pub line: usize,
}

impl LexItem {
    pub fn new(
        token: Token,
        lexeme: impl Into<String>,
        literal: Option<Literal>,
        line: usize,
    ) -> Self {
        LexItem {
            token,
            lexeme: lexeme.into(),
            literal,
            line,
        }
    }

    pub fn eof(line: usize) -> Self {
        LexItem::new(Token::Eof, "", None, line)
    }
}

use crate::error::ErrorKind;
use crate::token::{LexItem, Token};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("[line {0}] Error: Unexpected character.")]
    UnexpectedCharacter(usize, char),

    #[error("[line {0}] Error: Unterminated string.")]
    UnterminatedString(usize),

    #[error("[line {}] Error{}: {}", .0.line, location_hint(.0), .1)]
    UnexpectedToken(LexItem, &'static str),

    #[error("[line {}] Error{}: Invalid assignment target.", .0.line, location_hint(.0))]
    InvalidAssignmentTarget(LexItem),
}

impl ParseError {
    pub fn kind(&self) -> ErrorKind {
        use ParseError::*;
        match self {
            UnexpectedCharacter(..) | UnterminatedString(_) => ErrorKind::Lexical,
            UnexpectedToken(..) | InvalidAssignmentTarget(_) => ErrorKind::Syntax,
        }
    }

    pub fn line(&self) -> usize {
        use ParseError::*;
        match self {
            UnexpectedCharacter(line, _) | UnterminatedString(line) => *line,
            UnexpectedToken(li, _) | InvalidAssignmentTarget(li) => li.line,
        }
    }

    /// `at end` or `at '<lexeme>'`; lexical errors have no location.
    pub fn location(&self) -> Option<String> {
        use ParseError::*;
        match self {
            UnexpectedCharacter(..) | UnterminatedString(_) => None,
            UnexpectedToken(li, _) | InvalidAssignmentTarget(li) => {
                Some(location_hint(li).trim_start().to_string())
            }
        }
    }

    pub fn message(&self) -> String {
        use ParseError::*;
        match self {
            UnexpectedCharacter(..) => "Unexpected character.".to_string(),
            UnterminatedString(_) => "Unterminated string.".to_string(),
            UnexpectedToken(_, message) => message.to_string(),
            InvalidAssignmentTarget(_) => "Invalid assignment target.".to_string(),
        }
    }
}

fn location_hint(li: &LexItem) -> String {
    match li.token {
        Token::Eof => " at end".to_string(),
        _ => format!(" at '{}'", li.lexeme),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn formats_location_of_token() {
        let err = ParseError::UnexpectedToken(
            LexItem::new(Token::Semicolon, ";", None, 3),
            "Expect expression.",
        );
        assert_eq!(err.to_string(), "[line 3] Error at ';': Expect expression.");
        assert_eq!(err.location().as_deref(), Some("at ';'"));
        assert_eq!(err.kind(), ErrorKind::Syntax);
    }

    #[test]
    fn formats_end_of_input() {
        let err = ParseError::UnexpectedToken(LexItem::eof(7), "Expect '}' after block.");
        assert_eq!(err.to_string(), "[line 7] Error at end: Expect '}' after block.");
        assert_eq!(err.line(), 7);
    }

    #[test]
    fn lexical_errors_have_no_location() {
        let err = ParseError::UnexpectedCharacter(2, '#');
        assert_eq!(err.kind(), ErrorKind::Lexical);
        assert_eq!(err.location(), None);
        assert_eq!(err.message(), "Unexpected character.");
        assert_eq!(err.to_string(), "[line 2] Error: Unexpected character.");
    }
}

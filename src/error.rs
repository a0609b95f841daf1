use derive_more::Display;
use thiserror::Error;

use crate::interpret::RuntimeError;
use crate::parse::ParseError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ErrorKind {
    Lexical,
    Syntax,
    Runtime,
}

/// Outcome of running one input unit through the whole pipeline.
#[derive(Debug, Error)]
pub enum Error {
    #[error("{}", join_parse_errors(.0))]
    Parse(Vec<ParseError>),

    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

impl Error {
    pub fn is_parse(&self) -> bool {
        matches!(self, Error::Parse(_))
    }

    pub fn is_runtime(&self) -> bool {
        matches!(self, Error::Runtime(_))
    }
}

impl From<Vec<ParseError>> for Error {
    fn from(errors: Vec<ParseError>) -> Self {
        Error::Parse(errors)
    }
}

fn join_parse_errors(errors: &[ParseError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

use super::value::Value;
use thiserror::Error;

use crate::{error::ErrorKind, token::LexItem};

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("Undefined variable '{}'.\n[line {}]", .0.lexeme, .0.line)]
    UndefinedVariable(LexItem),

    #[error("Operand must be a number.\n[line {}]", .0.line)]
    OperandMustBeNumber(LexItem),

    #[error("Operands must be numbers.\n[line {}]", .0.line)]
    OperandsMustBeNumbers(LexItem),

    #[error("Operands must be two numbers or two strings.\n[line {}]", .0.line)]
    OperandsMustBeNumbersOrStrings(LexItem),

    #[error("Can only call functions and classes.\n[line {0}]")]
    ValueNotCallable(usize, Value),

    #[error("Expected {1} arguments but got {2}.\n[line {0}]")]
    WrongNumberOfArgument(usize, usize, usize),

    #[error("Stack overflow.\n[line {0}]")]
    StackOverflow(usize),

    #[error("Writing output failed with error: {1}\n[line {0}]")]
    WriteFailed(usize, std::io::Error),
}

impl RuntimeError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Runtime
    }

    pub fn line(&self) -> usize {
        use RuntimeError::*;
        match self {
            UndefinedVariable(li)
            | OperandMustBeNumber(li)
            | OperandsMustBeNumbers(li)
            | OperandsMustBeNumbersOrStrings(li) => li.line,
            ValueNotCallable(line, _)
            | WrongNumberOfArgument(line, ..)
            | StackOverflow(line)
            | WriteFailed(line, _) => *line,
        }
    }
}

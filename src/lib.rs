//! HyggeLang: a small dynamically typed language with Danish keywords.
//!
//! The pipeline is `lex` → `parse` → `Interpreter::interpret`. [`scan_and_parse`]
//! and [`run`] wrap it so a caller can tell lexical/syntax failures apart from
//! runtime failures without the core touching the process.

pub mod ast;
pub mod error;
pub mod interpret;
pub mod parse;
pub mod token;

use log::{debug, trace};

pub use crate::ast::{Statement, StatementList};
pub use crate::error::{Error, ErrorKind};
pub use crate::interpret::{Interpreter, RuntimeError, Value};
pub use crate::parse::ParseError;

/// Lexes and parses `input`. Any lexical or syntax error means the program is
/// not handed out; all errors of both phases are returned together.
pub fn scan_and_parse(input: &str) -> Result<StatementList, Vec<ParseError>> {
    let lexed = parse::lex(input);
    for li in &lexed.tokens {
        debug!("{} - {:?}: {:?}", li.line, li.token, li.lexeme);
    }

    let parsed = parse::parse(lexed.tokens);
    trace!("{:?}", &parsed.statements);

    let mut errors = lexed.errors;
    errors.extend(parsed.errors);
    errors.sort_by_key(|e| e.line());
    if !errors.is_empty() {
        return Err(errors);
    }
    Ok(parsed.statements)
}

/// Runs one input unit against `itp`, keeping its global state for the next call.
pub fn run(input: &str, itp: &mut Interpreter) -> Result<(), Error> {
    let stmts = scan_and_parse(input)?;
    itp.interpret(&stmts)?;
    Ok(())
}

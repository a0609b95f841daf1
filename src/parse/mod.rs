mod context;
mod error;
mod lex;
mod parser;

pub use error::ParseError;
pub use lex::{lex, Lexed};
pub use parser::{parse, Parsed};

pub mod ast;
mod error;
mod lexer;
mod parser;

pub use ast::{format_expression, format_notation, DiceExpression, ParsedNotation};
pub use error::ParseError;
pub use parser::parse;

pub mod parser;

pub mod syntax;

mod lexer;

pub use parser::parse;
pub use syntax::*;

pub(crate) use lexer::{example_line, tokens};

use crate::{error::Error, resolver, symbol_table::SymbolTable, Expr};

/// Parses an annotation such as `Ite(Lt(x, 3), 1, 2)` into an expression tree,
/// resolving every name against the standard symbol table.
pub fn parse_expression(text: &str) -> Result<Expr, Error> {
    parse_expression_with(&SymbolTable::standard(), text)
}

pub fn parse_expression_with(symbol_table: &SymbolTable, text: &str) -> Result<Expr, Error> {
    let tree = parse_tree(text)?;
    resolver::resolve(symbol_table, &tree)
}

/// Lexes and parses without looking any name up.
pub fn parse_tree(text: &str) -> Result<ParseTree, Error> {
    let tokens = tokens(text).map_err(Error::LexerError)?;

    parse(&tokens).map_err(Error::ParseError)
}

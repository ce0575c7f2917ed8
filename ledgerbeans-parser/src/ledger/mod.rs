//! Main module for the ledger parsing pipeline
//!
//! The submodules follow the pipeline order: `lexing` turns a byte source
//! into tokens, `parsing` turns tokens into the `ast` tree, and `formats`
//! renders the tree back out. `token` and `error` are the shared vocabulary
//! between the stages.
//!
//! The free functions here are the high-level entry points most callers
//! want; the CLI and tests drive the staged types directly when they need
//! the token stream itself.

use std::io::BufRead;

pub mod ast;
pub mod error;
pub mod formats;
pub mod lexing;
pub mod parsing;
pub mod token;

pub use ast::Journal;
pub use error::{LedgerError, LexError, ParseError};
pub use lexing::Lexer;
pub use parsing::Parser;
pub use token::{LexToken, Token};

/// Parse an in-memory source into a journal named `name`.
pub fn parse_source(source: &str, name: &str) -> Result<Journal, LedgerError> {
    Parser::new(Lexer::from_source(source, name)).parse()
}

/// Parse a journal from a buffered reader.
pub fn parse_reader<R: BufRead + 'static>(reader: R, name: &str) -> Result<Journal, LedgerError> {
    Parser::new(Lexer::new(reader, name)).parse()
}

/// Tokenize an in-memory source completely, stopping at the first error.
pub fn tokenize_source(source: &str, name: &str) -> Result<Vec<LexToken>, LexError> {
    Lexer::from_source(source, name).collect()
}

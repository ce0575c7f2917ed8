//! Parser
//!
//! Assembles the lexer's token stream into a [`Journal`] tree. The grammar
//! is deterministic with one token of lookahead; see [`parser`] for the
//! productions and their semantic actions.
//!
//! [`Journal`]: crate::ledger::ast::Journal

pub mod parser;

pub use parser::Parser;

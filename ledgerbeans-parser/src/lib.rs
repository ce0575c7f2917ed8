//! # ledgerbeans-parser
//!
//! A parser for plain-text ledger files in the Ledger/hledger dialect.
//!
//! The crate is organized as a two-stage pipeline: a line-oriented, stateful
//! lexer that decomposes each physical line into typed tokens, and a
//! grammar-driven parser that assembles the token stream into a [`Journal`]
//! tree. The lexer is the more involved of the two stages because the ledger
//! surface syntax separates fields with a *hard separator* (a tab, or two or
//! more spaces) rather than punctuation, which cannot be expressed as a
//! regular token.
//!
//! The general layout is `src/ledger/lexing|parsing|ast|formats`:
//!
//! - [`ledger::lexing`] — the tokenizer and its per-source scan state
//! - [`ledger::parsing`] — the grammar over the token stream
//! - [`ledger::ast`] — the journal entity tree the parser produces
//! - [`ledger::formats`] — renderers over tokens and the AST
//!
//! [`Journal`]: ledger::ast::Journal

pub mod ledger;

//! Renderers over the AST
//!
//! Output formats consume the tree through the [`Visitor`] seam; nothing in
//! here reaches into parser or lexer internals. Token-stream rendering
//! lives on the tokens themselves (`Display` and the serde derives).
//!
//! [`Visitor`]: crate::ledger::ast::Visitor

pub mod printer;

pub use printer::print_journal;

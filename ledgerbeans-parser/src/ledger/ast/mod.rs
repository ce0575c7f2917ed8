//! AST definitions for parsed ledger journals
//!
//!     The tree mirrors the shape of the source file: a [`Journal`] root
//!     named after its source, whose children are transactions, stand-alone
//!     comments, and blank-line markers in source order. Transactions in
//!     turn own postings and stand-alone notes.
//!
//!     Nodes are value-like: equality compares structure, not identity, and
//!     ownership runs strictly parent-to-children. The tree exposes no
//!     upward navigation; collaborators that need error context carry token
//!     positions from the lexer instead.
//!
//! ## Modules
//!
//! - `date` - full and partial calendar dates
//! - `elements` - node type definitions organized by element family
//! - `traits` - the `AstNode` and `Visitor` interfaces

pub mod date;
pub mod elements;
pub mod traits;

pub use date::{Date, LedgerDate, PartialDate};
pub use elements::{
    Account, AccountKind, Amount, Comment, EmptyLine, Journal, JournalItem, Note, Posting, Status,
    Symbol, SymbolFlags, Transaction, XactItem,
};
pub use traits::{AstNode, Visitor};

//! Lexer
//!
//!     Tokenization for the ledger format. The surface syntax is
//!     whitespace-significant and context-sensitive — the separator between
//!     a posting's account and its amount is "two or more spaces or a tab"
//!     rather than punctuation — so lexing is a stateful per-line scan, not
//!     a regular tokenization.
//!
//!     The stages are:
//!
//!         1. Line classification by first character (`lexer`).
//!         2. Per-directive decomposition of the line into the queue of
//!            tokens it yields, using the hard-separator scanning helpers
//!            on the state frame (`state`).
//!         3. Specialized sub-scanners for amounts and dates (`amount`,
//!            `date`).
//!
//!     Consumers pull tokens one at a time; the lexer never buffers more
//!     than one line's worth.

pub mod lexer;

mod amount;
mod date;
mod state;

pub use lexer::Lexer;

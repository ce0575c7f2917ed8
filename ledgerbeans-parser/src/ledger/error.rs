//! Error types for the lexing and parsing stages
//!
//! Neither stage recovers: the first error aborts the pipeline and
//! propagates to the caller, which is expected to log one diagnostic and
//! stop. Partial output already produced is not retracted.

use std::fmt;

/// A tokenization failure, carrying a snapshot of where the lexer was.
///
/// `column` is 1-based, matching the `FILENAME:LINE:COLUMN:MESSAGE` shape
/// diagnostics are printed in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexError {
    pub message: String,
    pub filename: String,
    pub line: usize,
    pub column: usize,
}

impl LexError {
    pub fn new(
        message: impl Into<String>,
        filename: impl Into<String>,
        line: usize,
        column: usize,
    ) -> Self {
        Self {
            message: message.into(),
            filename: filename.into(),
            line,
            column,
        }
    }
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}:{}",
            self.filename, self.line, self.column, self.message
        )
    }
}

impl std::error::Error for LexError {}

/// A grammar violation in the token stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub message: String,
    pub line: usize,
    pub column: usize,
}

impl ParseError {
    /// A syntax error at the position of the offending token.
    pub fn syntax(line: usize, column: usize) -> Self {
        Self {
            message: "Syntax error".to_string(),
            line,
            column,
        }
    }

    /// The token stream ended before the journal was complete.
    pub fn unexpected_eof(line: usize, column: usize) -> Self {
        Self {
            message: "Unexpected EOF".to_string(),
            line,
            column,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.line, self.column, self.message)
    }
}

impl std::error::Error for ParseError {}

/// Either failure the core can produce, for callers driving the whole
/// lex-then-parse pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    Lex(LexError),
    Parse(ParseError),
}

impl fmt::Display for LedgerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LedgerError::Lex(e) => e.fmt(f),
            LedgerError::Parse(e) => e.fmt(f),
        }
    }
}

impl std::error::Error for LedgerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LedgerError::Lex(e) => Some(e),
            LedgerError::Parse(e) => Some(e),
        }
    }
}

impl From<LexError> for LedgerError {
    fn from(error: LexError) -> Self {
        LedgerError::Lex(error)
    }
}

impl From<ParseError> for LedgerError {
    fn from(error: ParseError) -> Self {
        LedgerError::Parse(error)
    }
}

//! Token types produced by the lexer
//!
//!     One physical line may decompose into several tokens; each carries its
//!     kind, any payload value, and the position it started at. Positions
//!     are `(line, column)` with a 1-based line and a 0-based column, both
//!     counted in characters.
//!
//!     A blank line yields an explicit `EMPTYLINE` token, and the end of the
//!     input yields exactly one `EOF` token carrying the source name. Both
//!     are real tokens rather than out-of-band signals so the parser can
//!     drive entirely off the stream.

use std::fmt;

use serde::Serialize;

use super::ast::date::LedgerDate;
use super::ast::elements::Symbol;

/// A lexical token, with any payload the line decomposition extracted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Token {
    /// A blank (or whitespace-only) source line.
    EmptyLine,
    /// End of input; carries the source name.
    Eof(String),
    /// A top-level comment marker; carries the marker character.
    Comment(char),
    /// Free text following a comment or note marker.
    Text(String),
    /// An option name from a `-`/`--` line.
    Option(String),
    /// The argument attached to an option, via `=` or whitespace.
    Argument(String),
    /// The primary date of a transaction header.
    Date(LedgerDate),
    /// The auxiliary date following `=` in the date word.
    AuxDate(LedgerDate),
    /// `*` status flag.
    Cleared,
    /// `!` status flag.
    Pending,
    /// A parenthesized transaction code, delimiters stripped.
    Code(String),
    /// The payee/description text of a transaction header; may be empty.
    Description(String),
    /// An inline note marker (`;`); carries the marker character.
    Note(char),
    /// Leading whitespace opening a posting line.
    Indent,
    /// A bare account name.
    Account(String),
    /// A `(…)` virtual account, delimiters stripped.
    VirtAcc(String),
    /// A `[…]` balanced virtual account, delimiters stripped.
    BalVirtAcc(String),
    /// A `<…>` deferred account, delimiters stripped.
    DeferredAcc(String),
    /// `assert` keyword opening a value-expression posting.
    Assert,
    /// `check` keyword opening a value-expression posting.
    Check,
    /// `expr` keyword opening a value-expression posting.
    Expr,
    /// The opaque body of a value expression, captured verbatim.
    ValExpr(String),
    /// The textual quantity of an amount, sign included.
    Amount(String),
    /// The commodity symbol of an amount, with placement flags.
    Symbol(Symbol),
}

impl Token {
    /// The token kind name, as printed by the `lex` command.
    pub fn kind(&self) -> &'static str {
        match self {
            Token::EmptyLine => "EMPTYLINE",
            Token::Eof(_) => "EOF",
            Token::Comment(_) => "COMMENT",
            Token::Text(_) => "TEXT",
            Token::Option(_) => "OPTION",
            Token::Argument(_) => "ARGUMENT",
            Token::Date(_) => "DATE",
            Token::AuxDate(_) => "AUXDATE",
            Token::Cleared => "CLEARED",
            Token::Pending => "PENDING",
            Token::Code(_) => "CODE",
            Token::Description(_) => "DESCRIPTION",
            Token::Note(_) => "NOTE",
            Token::Indent => "INDENT",
            Token::Account(_) => "ACCOUNT",
            Token::VirtAcc(_) => "VIRTACC",
            Token::BalVirtAcc(_) => "BALVIRTACC",
            Token::DeferredAcc(_) => "DEFERREDACC",
            Token::Assert => "ASSERT",
            Token::Check => "CHECK",
            Token::Expr => "EXPR",
            Token::ValExpr(_) => "VALEXPR",
            Token::Amount(_) => "AMOUNT",
            Token::Symbol(_) => "SYMBOL",
        }
    }

    /// Render the payload for display, `None` when the token has none.
    fn value_repr(&self) -> String {
        match self {
            Token::EmptyLine | Token::Indent => "None".to_string(),
            Token::Eof(name) => format!("'{}'", name),
            Token::Comment(c) | Token::Note(c) => format!("'{}'", c),
            Token::Cleared => "'*'".to_string(),
            Token::Pending => "'!'".to_string(),
            Token::Assert => "'assert'".to_string(),
            Token::Check => "'check'".to_string(),
            Token::Expr => "'expr'".to_string(),
            Token::Date(date) | Token::AuxDate(date) => date.to_string(),
            Token::Symbol(symbol) => symbol.to_string(),
            Token::Text(s)
            | Token::Option(s)
            | Token::Argument(s)
            | Token::Code(s)
            | Token::Description(s)
            | Token::Account(s)
            | Token::VirtAcc(s)
            | Token::BalVirtAcc(s)
            | Token::DeferredAcc(s)
            | Token::ValExpr(s)
            | Token::Amount(s) => format!("'{}'", s),
        }
    }
}

/// A token together with the position it started at.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LexToken {
    pub token: Token,
    /// 1-based source line.
    pub line: usize,
    /// 0-based character column of the token's start.
    pub column: usize,
}

impl LexToken {
    pub fn new(token: Token, line: usize, column: usize) -> Self {
        Self {
            token,
            line,
            column,
        }
    }
}

impl fmt::Display for LexToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "LexToken({}, {}, {}, {})",
            self.token.kind(),
            self.token.value_repr(),
            self.line,
            self.column
        )
    }
}

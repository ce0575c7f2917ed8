//! Amount element
//!
//!     An amount is an arbitrary-precision signed decimal quantity with an
//!     optional commodity symbol. Quantities are never represented as binary
//!     floating point; the raw lexeme is kept verbatim alongside the parsed
//!     decimal so that `1,234.56` re-renders byte-for-byte.
//!
//!     The symbol carries placement flags: `prefix` when the symbol came
//!     before the number, `space` when a single space separated symbol and
//!     number, and `grouping`, which is reserved for a later pass that
//!     resolves the thousands-marker convention.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Serialize;

/// Placement flags attached to a commodity symbol.
///
/// Rendered as a concatenation of `P`, `S`, `T` in that order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SymbolFlags {
    pub prefix: bool,
    pub space: bool,
    pub grouping: bool,
}

impl fmt::Display for SymbolFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.prefix {
            write!(f, "P")?;
        }
        if self.space {
            write!(f, "S")?;
        }
        if self.grouping {
            write!(f, "T")?;
        }
        Ok(())
    }
}

/// A commodity symbol together with its placement flags.
///
/// Quoted symbols retain their surrounding quotes in `text`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Symbol {
    pub text: String,
    pub flags: SymbolFlags,
}

impl Symbol {
    pub fn new(text: impl Into<String>, flags: SymbolFlags) -> Self {
        Self {
            text: text.into(),
            flags,
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "('{}', '{}')", self.text, self.flags)
    }
}

/// A decimal quantity with an optional commodity symbol.
///
/// The quantity is always present; an amount without a quantity cannot be
/// constructed. Postings without an amount carry `Option<Amount>` instead.
#[derive(Debug, Clone, PartialEq)]
pub struct Amount {
    quantity: Decimal,
    raw: String,
    symbol: Option<Symbol>,
}

impl Amount {
    /// Build an amount from the raw lexeme the lexer produced.
    ///
    /// The quantity is derived by stripping `,` grouping markers and reading
    /// `.` as the decimal point; the raw text is preserved unchanged. Returns
    /// `None` when the lexeme does not reduce to a single decimal number
    /// (for example two `.` markers).
    pub fn new(raw: impl Into<String>, symbol: Option<Symbol>) -> Option<Self> {
        let raw = raw.into();
        let mut cleaned: String = raw.chars().filter(|c| *c != ',').collect();
        if let Some(stripped) = cleaned.strip_prefix('+') {
            cleaned = stripped.to_string();
        }
        if cleaned.ends_with('.') {
            cleaned.pop();
        }
        let quantity = Decimal::from_str(&cleaned).ok()?;
        Some(Self {
            quantity,
            raw,
            symbol,
        })
    }

    pub fn quantity(&self) -> Decimal {
        self.quantity
    }

    /// The textual form exactly as written in the source, sign included.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn symbol(&self) -> Option<&Symbol> {
        self.symbol.as_ref()
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.symbol {
            Some(symbol) => write!(f, "Amount({} {})", self.raw, symbol.text),
            None => write!(f, "Amount({})", self.raw),
        }
    }
}

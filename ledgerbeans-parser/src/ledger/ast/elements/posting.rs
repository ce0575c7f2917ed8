//! Posting element
//!
//!     A posting is one account movement inside a transaction: an account,
//!     an optional amount, an optional inline note, and a clearing status.
//!     A posting with no amount is elided; a later balancing pass infers the
//!     quantity from its siblings.
//!
//!     Account names may contain single interior spaces. The surrounding
//!     delimiter on the source line determines the account kind:
//!
//!         - bare name        ordinary account
//!         - `(name)`         virtual
//!         - `[name]`         balanced virtual
//!         - `<name>`         deferred

use std::fmt;

use super::amount::Amount;
use super::note::Note;
use super::status::Status;

/// The legal delimiter-derived flag combinations for an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccountKind {
    #[default]
    Normal,
    Virtual,
    BalancedVirtual,
    Deferred,
}

impl AccountKind {
    pub fn is_virtual(&self) -> bool {
        matches!(self, AccountKind::Virtual | AccountKind::BalancedVirtual)
    }

    pub fn is_balanced(&self) -> bool {
        matches!(self, AccountKind::BalancedVirtual)
    }

    pub fn is_deferred(&self) -> bool {
        matches!(self, AccountKind::Deferred)
    }
}

/// An account reference as written in a posting.
///
/// The name has no leading or trailing whitespace; for delimited accounts it
/// is the interior text with the delimiters stripped, and is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub name: String,
    pub kind: AccountKind,
}

impl Account {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: AccountKind::Normal,
        }
    }

    pub fn with_kind(name: impl Into<String>, kind: AccountKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Account({})", self.name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Posting {
    pub account: Account,
    pub amount: Option<Amount>,
    pub note: Option<Note>,
    pub status: Status,
}

impl Posting {
    pub fn new(account: Account) -> Self {
        Self {
            account,
            amount: None,
            note: None,
            status: Status::none(),
        }
    }

    pub fn with_amount(mut self, amount: Amount) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn with_note(mut self, note: Note) -> Self {
        self.note = Some(note);
        self
    }

    pub fn with_status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_kind_flags() {
        assert!(AccountKind::Virtual.is_virtual());
        assert!(!AccountKind::Virtual.is_balanced());
        assert!(AccountKind::BalancedVirtual.is_virtual());
        assert!(AccountKind::BalancedVirtual.is_balanced());
        assert!(AccountKind::Deferred.is_deferred());
        assert!(!AccountKind::Normal.is_virtual());
    }

    #[test]
    fn test_posting_builders() {
        let posting = Posting::new(Account::new("Assets:Cash"))
            .with_status(Status::pending())
            .with_note(Note::new("lunch"));
        assert_eq!(posting.account.name, "Assets:Cash");
        assert!(posting.amount.is_none());
        assert!(posting.status.is_pending());
        assert_eq!(posting.note.as_ref().unwrap().text, "lunch");
    }
}

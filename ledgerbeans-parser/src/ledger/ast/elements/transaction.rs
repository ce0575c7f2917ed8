//! Transaction element
//!
//!     A transaction groups the postings recorded under one header line. The
//!     header carries the primary date, an optional auxiliary date (possibly
//!     partial), an optional short code, the payee description (which may be
//!     empty), an optional inline note, and a clearing status.
//!
//!     Children are an ordered sequence of postings and stand-alone notes,
//!     in source order. Ownership is strictly parent-to-children; identity
//!     is positional and equality is structural.

use std::fmt;

use super::super::date::LedgerDate;
use super::note::Note;
use super::posting::Posting;
use super::status::Status;

/// An item that can appear indented under a transaction header.
#[derive(Debug, Clone, PartialEq)]
pub enum XactItem {
    Posting(Posting),
    Note(Note),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub date: LedgerDate,
    pub auxdate: Option<LedgerDate>,
    pub code: Option<String>,
    pub description: String,
    pub note: Option<Note>,
    pub status: Status,
    children: Vec<XactItem>,
}

impl Transaction {
    pub fn new(date: LedgerDate, description: impl Into<String>) -> Self {
        Self {
            date,
            auxdate: None,
            code: None,
            description: description.into(),
            note: None,
            status: Status::none(),
            children: Vec::new(),
        }
    }

    pub fn with_auxdate(mut self, auxdate: LedgerDate) -> Self {
        self.auxdate = Some(auxdate);
        self
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
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

    pub fn with_children(mut self, children: Vec<XactItem>) -> Self {
        self.children = children;
        self
    }

    pub fn append(&mut self, child: XactItem) {
        self.children.push(child);
    }

    /// Remove the first child structurally equal to `child`.
    pub fn remove(&mut self, child: &XactItem) -> bool {
        match self.children.iter().position(|c| c == child) {
            Some(index) => {
                self.children.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn children(&self) -> &[XactItem] {
        &self.children
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, XactItem> {
        self.children.iter()
    }

    /// Iterate only the posting children, in source order.
    pub fn postings(&self) -> impl Iterator<Item = &Posting> {
        self.children.iter().filter_map(|child| match child {
            XactItem::Posting(posting) => Some(posting),
            XactItem::Note(_) => None,
        })
    }
}

impl<'a> IntoIterator for &'a Transaction {
    type Item = &'a XactItem;
    type IntoIter = std::slice::Iter<'a, XactItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.children.iter()
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Transaction({}, '{}', {} items)",
            self.date,
            self.description,
            self.children.len()
        )
    }
}

//! AST traits - Common interfaces for uniform node access
//!
//! The element types themselves are a data-only layer; everything needed to
//! walk the tree lives here. External collaborators (the pretty printer, a
//! future balancer) implement [`Visitor`] and receive each node in source
//! order. The node set is closed, so dispatch is exhaustive by construction —
//! there is no way to register a handler for an unknown variant.

use super::elements::{Comment, EmptyLine, Journal, JournalItem, Note, Posting, Transaction, XactItem};

/// Visitor for traversing the journal tree.
///
/// Composite nodes get paired `visit_*`/`leave_*` calls around their
/// children; leaves get a single `visit_*`. Default implementations are
/// empty, so implementors only override the methods they care about.
///
/// Notes attached to a transaction header or posting are fields of their
/// owner, not children; `visit_note` fires only for stand-alone note lines.
pub trait Visitor {
    fn visit_journal(&mut self, _journal: &Journal) {}
    fn leave_journal(&mut self, _journal: &Journal) {}

    fn visit_transaction(&mut self, _transaction: &Transaction) {}
    fn leave_transaction(&mut self, _transaction: &Transaction) {}

    fn visit_posting(&mut self, _posting: &Posting) {}
    fn visit_note(&mut self, _note: &Note) {}
    fn visit_comment(&mut self, _comment: &Comment) {}
    fn visit_empty_line(&mut self, _empty_line: &EmptyLine) {}
}

/// Common interface for all AST nodes.
pub trait AstNode {
    fn node_type(&self) -> &'static str;

    /// Accept a visitor for this node and, for composites, its children.
    fn accept(&self, visitor: &mut dyn Visitor);
}

impl AstNode for Journal {
    fn node_type(&self) -> &'static str {
        "Journal"
    }

    fn accept(&self, visitor: &mut dyn Visitor) {
        visitor.visit_journal(self);
        for child in self {
            match child {
                JournalItem::Transaction(xact) => xact.accept(visitor),
                JournalItem::Comment(comment) => comment.accept(visitor),
                JournalItem::EmptyLine(empty) => empty.accept(visitor),
            }
        }
        visitor.leave_journal(self);
    }
}

impl AstNode for Transaction {
    fn node_type(&self) -> &'static str {
        "Transaction"
    }

    fn accept(&self, visitor: &mut dyn Visitor) {
        visitor.visit_transaction(self);
        for child in self {
            match child {
                XactItem::Posting(posting) => posting.accept(visitor),
                XactItem::Note(note) => note.accept(visitor),
            }
        }
        visitor.leave_transaction(self);
    }
}

impl AstNode for Posting {
    fn node_type(&self) -> &'static str {
        "Posting"
    }

    fn accept(&self, visitor: &mut dyn Visitor) {
        visitor.visit_posting(self);
    }
}

impl AstNode for Note {
    fn node_type(&self) -> &'static str {
        "Note"
    }

    fn accept(&self, visitor: &mut dyn Visitor) {
        visitor.visit_note(self);
    }
}

impl AstNode for Comment {
    fn node_type(&self) -> &'static str {
        "Comment"
    }

    fn accept(&self, visitor: &mut dyn Visitor) {
        visitor.visit_comment(self);
    }
}

impl AstNode for EmptyLine {
    fn node_type(&self) -> &'static str {
        "EmptyLine"
    }

    fn accept(&self, visitor: &mut dyn Visitor) {
        visitor.visit_empty_line(self);
    }
}

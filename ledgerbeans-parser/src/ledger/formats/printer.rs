//! Pretty printer for AST listings
//!
//! Renders a journal as a one-line-per-node listing, nesting encoded as one
//! space of indentation per tree level:
//!
//! ```text
//! journal(name=coffee.ledger)
//!  transaction(date=2024-01-15, description=Coffee shop)
//!   post(account(name=Expenses:Food), amount(amount=4.50, symbol=('$', 'P')))
//!   post(account(name=Assets:Cash))
//! ```
//!
//! The printer is a [`Visitor`] implementation; it is driven entirely by
//! `accept` and keeps no state beyond the accumulated lines and the current
//! depth.

use crate::ledger::ast::elements::{
    Amount, Comment, EmptyLine, Journal, Note, Posting, Transaction,
};
use crate::ledger::ast::traits::{AstNode, Visitor};

/// Render the pretty-printed listing for a journal, one node per line,
/// with a trailing newline.
pub fn print_journal(journal: &Journal) -> String {
    let mut printer = AstPrinter::default();
    journal.accept(&mut printer);
    let mut output = printer.lines.join("\n");
    output.push('\n');
    output
}

#[derive(Default)]
struct AstPrinter {
    lines: Vec<String>,
    depth: usize,
}

impl AstPrinter {
    fn push(&mut self, text: String) {
        self.lines.push(format!("{}{}", " ".repeat(self.depth), text));
    }
}

fn note_arg(note: &Note) -> String {
    format!("note(text={})", note.text)
}

fn amount_arg(amount: &Amount) -> String {
    match amount.symbol() {
        Some(symbol) => format!("amount(amount={}, symbol={})", amount.raw(), symbol),
        None => format!("amount(amount={}, symbol=None)", amount.raw()),
    }
}

impl Visitor for AstPrinter {
    fn visit_journal(&mut self, journal: &Journal) {
        self.push(format!("journal(name={})", journal.name));
        self.depth += 1;
    }

    fn leave_journal(&mut self, _journal: &Journal) {
        self.depth -= 1;
    }

    fn visit_transaction(&mut self, xact: &Transaction) {
        let mut args = vec![format!("date={}", xact.date)];
        if let Some(auxdate) = &xact.auxdate {
            args.push(format!("auxdate={}", auxdate));
        }
        if let Some(code) = &xact.code {
            args.push(format!("code={}", code));
        }
        args.push(format!("description={}", xact.description));
        if let Some(note) = &xact.note {
            args.push(note_arg(note));
        }
        self.push(format!("transaction({})", args.join(", ")));
        self.depth += 1;
    }

    fn leave_transaction(&mut self, _xact: &Transaction) {
        self.depth -= 1;
    }

    fn visit_posting(&mut self, posting: &Posting) {
        let mut args = vec![format!("account(name={})", posting.account.name)];
        if let Some(amount) = &posting.amount {
            args.push(amount_arg(amount));
        }
        if let Some(note) = &posting.note {
            args.push(note_arg(note));
        }
        self.push(format!("post({})", args.join(", ")));
    }

    fn visit_note(&mut self, note: &Note) {
        self.push(note_arg(note));
    }

    fn visit_comment(&mut self, comment: &Comment) {
        self.push(format!("comment(text={})", comment.text));
    }

    fn visit_empty_line(&mut self, _empty_line: &EmptyLine) {
        self.push("emptyline()".to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::ast::date::{Date, LedgerDate};
    use crate::ledger::ast::elements::{
        Account, JournalItem, Status, Symbol, SymbolFlags, XactItem,
    };

    #[test]
    fn test_print_simple_journal() {
        let date = LedgerDate::from(Date::new(2024, 1, 15).unwrap());
        let mut xact = Transaction::new(date, "Coffee shop");
        let amount = Amount::new(
            "4.50",
            Some(Symbol::new(
                "$",
                SymbolFlags {
                    prefix: true,
                    ..Default::default()
                },
            )),
        )
        .unwrap();
        xact.append(XactItem::Posting(
            Posting::new(Account::new("Expenses:Food")).with_amount(amount),
        ));
        xact.append(XactItem::Posting(Posting::new(Account::new("Assets:Cash"))));

        let mut journal = Journal::new("coffee.ledger");
        journal.append(JournalItem::Transaction(xact));

        let output = print_journal(&journal);
        insta::assert_snapshot!(output.trim_end(), @r###"
        journal(name=coffee.ledger)
         transaction(date=2024-01-15, description=Coffee shop)
          post(account(name=Expenses:Food), amount(amount=4.50, symbol=('$', 'P')))
          post(account(name=Assets:Cash))
        "###);
    }

    #[test]
    fn test_print_notes_comments_and_blanks() {
        let date = LedgerDate::from(Date::new(2024, 3, 1).unwrap());
        let mut xact = Transaction::new(date, "Budget move")
            .with_status(Status::cleared())
            .with_note(Note::new("monthly"));
        xact.append(XactItem::Note(Note::new("first")));

        let mut journal = Journal::new("notes.ledger");
        journal.append(JournalItem::Comment(Comment::new("a header comment")));
        journal.append(JournalItem::Transaction(xact));
        journal.append(JournalItem::EmptyLine(EmptyLine));

        let output = print_journal(&journal);
        insta::assert_snapshot!(output.trim_end(), @r###"
        journal(name=notes.ledger)
         comment(text=a header comment)
         transaction(date=2024-03-01, description=Budget move, note(text=monthly))
          note(text=first)
         emptyline()
        "###);
    }
}

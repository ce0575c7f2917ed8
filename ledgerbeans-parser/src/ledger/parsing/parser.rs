//! The journal parser
//!
//!     A deterministic pull parser over the lexer's token stream,
//!     implementing the grammar:
//!
//!         journal        -> items EOF
//!         items          -> items item | e
//!         item           -> xact_directive | comment_directive | EMPTYLINE
//!         comment_dir    -> COMMENT TEXT
//!         xact_directive -> DATE auxdate? status? code? DESCRIPTION note? postings
//!         note           -> NOTE TEXT
//!         postings       -> postings posting | e
//!         posting        -> INDENT status? account amount? note?
//!                         | INDENT note
//!         account        -> ACCOUNT | VIRTACC | BALVIRTACC | DEFERREDACC
//!         amount         -> AMOUNT symbol?
//!         symbol         -> SYMBOL
//!
//!     One token of lookahead decides every production, so the parser works
//!     directly off the pull-based lexer with a single peek slot. Semantic
//!     actions build the AST as the productions reduce. Errors are not
//!     recovered from: the first lex or grammar failure stops the parse.

use log::debug;

use crate::ledger::ast::date::LedgerDate;
use crate::ledger::ast::elements::{
    Account, AccountKind, Amount, Comment, EmptyLine, Journal, JournalItem, Note, Posting, Status,
    Transaction, XactItem,
};
use crate::ledger::error::{LedgerError, ParseError};
use crate::ledger::lexing::Lexer;
use crate::ledger::token::{LexToken, Token};

pub struct Parser {
    lexer: Lexer,
    peeked: Option<LexToken>,
    /// Position of the most recently consumed token, for EOF diagnostics.
    last_line: usize,
    last_column: usize,
}

impl Parser {
    pub fn new(lexer: Lexer) -> Self {
        Self {
            lexer,
            peeked: None,
            last_line: 0,
            last_column: 0,
        }
    }

    /// Parse one complete journal off the token stream.
    pub fn parse(mut self) -> Result<Journal, LedgerError> {
        let mut items = Vec::new();
        loop {
            let Some(token) = self.bump()? else {
                return Err(self.eof_error().into());
            };
            match token.token {
                Token::EmptyLine => items.push(JournalItem::EmptyLine(EmptyLine)),
                Token::Comment(_) => {
                    let text = self.expect_text()?;
                    items.push(JournalItem::Comment(Comment::new(text)));
                }
                Token::Date(date) => {
                    debug!("parsing transaction at line {}", token.line);
                    let xact = self.parse_transaction(date)?;
                    items.push(JournalItem::Transaction(xact));
                }
                Token::Eof(name) => {
                    debug!("journal complete: {} top-level items", items.len());
                    return Ok(Journal::with_children(name, items));
                }
                _ => return Err(Self::syntax_error(&token).into()),
            }
        }
    }

    fn parse_transaction(&mut self, date: LedgerDate) -> Result<Transaction, LedgerError> {
        let mut auxdate = None;
        if matches!(self.peek()?, Some(Token::AuxDate(_))) {
            if let Some(LexToken {
                token: Token::AuxDate(date),
                ..
            }) = self.bump()?
            {
                auxdate = Some(date);
            }
        }

        let status = self.parse_status_opt()?;

        let mut code = None;
        if matches!(self.peek()?, Some(Token::Code(_))) {
            if let Some(LexToken {
                token: Token::Code(text),
                ..
            }) = self.bump()?
            {
                code = Some(text);
            }
        }

        let description = match self.bump()? {
            Some(LexToken {
                token: Token::Description(text),
                ..
            }) => text,
            Some(token) => return Err(Self::syntax_error(&token).into()),
            None => return Err(self.eof_error().into()),
        };

        let note = self.parse_note_opt()?;

        let mut xact = Transaction::new(date, description).with_status(status);
        if let Some(auxdate) = auxdate {
            xact = xact.with_auxdate(auxdate);
        }
        if let Some(code) = code {
            xact = xact.with_code(code);
        }
        if let Some(note) = note {
            xact = xact.with_note(note);
        }

        while matches!(self.peek()?, Some(Token::Indent)) {
            self.bump()?;
            xact.append(self.parse_posting()?);
        }
        Ok(xact)
    }

    fn parse_posting(&mut self) -> Result<XactItem, LedgerError> {
        // A posting line holding only a note attaches to the transaction.
        if matches!(self.peek()?, Some(Token::Note(_))) {
            self.bump()?;
            let text = self.expect_text()?;
            return Ok(XactItem::Note(Note::new(text)));
        }

        let status = self.parse_status_opt()?;

        let account = match self.bump()? {
            Some(LexToken {
                token: Token::Account(name),
                ..
            }) => Account::new(name),
            Some(LexToken {
                token: Token::VirtAcc(name),
                ..
            }) => Account::with_kind(name, AccountKind::Virtual),
            Some(LexToken {
                token: Token::BalVirtAcc(name),
                ..
            }) => Account::with_kind(name, AccountKind::BalancedVirtual),
            Some(LexToken {
                token: Token::DeferredAcc(name),
                ..
            }) => Account::with_kind(name, AccountKind::Deferred),
            Some(token) => return Err(Self::syntax_error(&token).into()),
            None => return Err(self.eof_error().into()),
        };

        let mut posting = Posting::new(account).with_status(status);

        if matches!(self.peek()?, Some(Token::Amount(_))) {
            let Some(token) = self.bump()? else {
                return Err(self.eof_error().into());
            };
            let raw = match &token.token {
                Token::Amount(raw) => raw.clone(),
                _ => return Err(Self::syntax_error(&token).into()),
            };
            let mut symbol = None;
            if matches!(self.peek()?, Some(Token::Symbol(_))) {
                if let Some(LexToken {
                    token: Token::Symbol(sym),
                    ..
                }) = self.bump()?
                {
                    symbol = Some(sym);
                }
            }
            let Some(amount) = Amount::new(raw, symbol) else {
                // The quantity did not reduce to a single decimal number.
                return Err(Self::syntax_error(&token).into());
            };
            posting = posting.with_amount(amount);
        }

        if let Some(note) = self.parse_note_opt()? {
            posting = posting.with_note(note);
        }
        Ok(XactItem::Posting(posting))
    }

    fn parse_status_opt(&mut self) -> Result<Status, LedgerError> {
        match self.peek()? {
            Some(Token::Cleared) => {
                self.bump()?;
                Ok(Status::cleared())
            }
            Some(Token::Pending) => {
                self.bump()?;
                Ok(Status::pending())
            }
            _ => Ok(Status::none()),
        }
    }

    fn parse_note_opt(&mut self) -> Result<Option<Note>, LedgerError> {
        if matches!(self.peek()?, Some(Token::Note(_))) {
            self.bump()?;
            let text = self.expect_text()?;
            return Ok(Some(Note::new(text)));
        }
        Ok(None)
    }

    fn expect_text(&mut self) -> Result<String, LedgerError> {
        match self.bump()? {
            Some(LexToken {
                token: Token::Text(text),
                ..
            }) => Ok(text),
            Some(token) => Err(Self::syntax_error(&token).into()),
            None => Err(self.eof_error().into()),
        }
    }

    /// Consume and return the next token, tracking its position.
    fn bump(&mut self) -> Result<Option<LexToken>, LedgerError> {
        let token = match self.peeked.take() {
            Some(token) => Some(token),
            None => self.lexer.next_token()?,
        };
        if let Some(token) = &token {
            self.last_line = token.line;
            self.last_column = token.column;
        }
        Ok(token)
    }

    /// One token of lookahead.
    fn peek(&mut self) -> Result<Option<&Token>, LedgerError> {
        if self.peeked.is_none() {
            self.peeked = self.lexer.next_token()?;
        }
        Ok(self.peeked.as_ref().map(|t| &t.token))
    }

    fn syntax_error(token: &LexToken) -> ParseError {
        ParseError::syntax(token.line, token.column + 1)
    }

    fn eof_error(&self) -> ParseError {
        ParseError::unexpected_eof(self.last_line, self.last_column + 1)
    }
}

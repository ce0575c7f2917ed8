//! The ledger tokenizer
//!
//!     The lexer is line-oriented, synchronous, and pull-based. Each call to
//!     [`Lexer::next_token`] drains the current line's token queue; when the
//!     queue is empty the next line is read and classified by its first
//!     character:
//!
//!         | leading character  | directive                        |
//!         |--------------------|----------------------------------|
//!         | digit              | transaction header               |
//!         | `;` `#` `*` `\|`   | top-level comment                |
//!         | `-`                | option                           |
//!         | space or tab       | indented continuation (posting)  |
//!         | (empty line)       | blank-line marker                |
//!
//!     An indented continuation only means something when the previous
//!     directive opened a transaction; otherwise the line is skipped. Lines
//!     starting with any other character end the token stream.
//!
//!     The lexer keeps a stack of scan states, one frame per open source.
//!     Today only the bottom frame is ever used; an `include` directive
//!     would push a new frame and the existing end-of-source pop would
//!     unwind it.

use std::collections::HashMap;
use std::io::{self, BufRead};

use log::debug;
use once_cell::sync::Lazy;

use crate::ledger::error::LexError;
use crate::ledger::token::{LexToken, Token};

use super::amount::tokenize_amount;
use super::date::scan_date;
use super::state::{Directive, LexState};

/// Reserved first words of a value-expression posting.
static EXPRESSION_KEYWORDS: Lazy<HashMap<&'static str, Token>> = Lazy::new(|| {
    HashMap::from([
        ("assert", Token::Assert),
        ("check", Token::Check),
        ("expr", Token::Expr),
    ])
});

/// What the dispatch loop decided to do with the current state.
enum Step {
    Token(LexToken),
    EndOfSource,
    Io(LexError),
    First(Option<char>),
}

pub struct Lexer {
    stack: Vec<LexState>,
    state: Option<LexState>,
    failed: bool,
}

impl Lexer {
    pub fn new<R: BufRead + 'static>(reader: R, filename: impl Into<String>) -> Self {
        Self {
            stack: Vec::new(),
            state: Some(LexState::new(Box::new(reader), filename)),
            failed: false,
        }
    }

    /// Convenience constructor for in-memory sources.
    pub fn from_source(source: &str, filename: impl Into<String>) -> Self {
        Self::new(io::Cursor::new(source.to_string().into_bytes()), filename)
    }

    /// Produce the next token, or `Ok(None)` at end of stream. The `EOF`
    /// token is emitted exactly once; calls after it keep returning
    /// `Ok(None)`. The lexer does not recover: after an error it is idle.
    pub fn next_token(&mut self) -> Result<Option<LexToken>, LexError> {
        if self.failed {
            return Ok(None);
        }
        loop {
            let step = {
                let Some(state) = self.state.as_mut() else {
                    return Ok(None);
                };
                if let Some(token) = state.pop_token() {
                    Step::Token(token)
                } else {
                    match state.advance_line() {
                        Err(e) => Step::Io(state.error(format!("I/O error: {}", e))),
                        Ok(false) => Step::EndOfSource,
                        Ok(true) => Step::First(state.char_at(0)),
                    }
                }
            };

            let result = match step {
                Step::Token(token) => return Ok(Some(token)),
                Step::Io(error) => Err(error),
                Step::EndOfSource => return Ok(self.eof()),
                Step::First(first) => self.dispatch(first),
            };
            match result {
                Ok(true) => {}
                Ok(false) => return Ok(None),
                Err(error) => {
                    self.failed = true;
                    return Err(error);
                }
            }
        }
    }

    /// Classify the line by its first character and tokenize it. Returns
    /// `Ok(false)` when the stream should end instead.
    fn dispatch(&mut self, first: Option<char>) -> Result<bool, LexError> {
        let Some(state) = self.state.as_mut() else {
            return Ok(false);
        };
        match first {
            None => Self::emptyline(state),
            Some(c) if c.is_ascii_digit() => Self::xact_directive(state)?,
            Some(';' | '#' | '*' | '|') => Self::comment_directive(state),
            Some('-') => Self::option_directive(state)?,
            Some(' ' | '\t') => Self::indent(state)?,
            Some(_) => {
                // Not a directive this dialect knows; the stream ends here.
                self.state = None;
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Emit the one `EOF` token for the current source and pop back to the
    /// enclosing source, if any.
    fn eof(&mut self) -> Option<LexToken> {
        let state = self.state.take()?;
        let token = LexToken::new(
            Token::Eof(state.filename.clone()),
            state.lineno,
            state.linelen,
        );
        self.state = self.stack.pop();
        Some(token)
    }

    fn emptyline(state: &mut LexState) {
        state.directive = Directive::EmptyLine;
        state.emit(Token::EmptyLine, state.lexpos);
    }

    fn comment_directive(state: &mut LexState) {
        state.directive = Directive::Comment;
        let Some(marker) = state.char_at(state.lexpos) else {
            return;
        };
        state.emit(Token::Comment(marker), state.lexpos);
        state.lexpos += 1;
        if let Some(pos) = state.next_word_pos(None, false) {
            let text = state.rest(pos);
            state.lexpos = pos;
            state.emit(Token::Text(text), pos);
        }
    }

    fn option_directive(state: &mut LexState) -> Result<(), LexError> {
        state.directive = Directive::Option;
        let start = match state.char_at(1) {
            None => return Err(state.error("Missing option name")),
            Some('-') => 2,
            Some(_) => 1,
        };

        let (option, argument) = match state.next_char_pos('=', Some(start), false) {
            Some(pos) if pos == start => {
                state.lexpos = pos;
                return Err(state.error("Missing option name"));
            }
            Some(pos) => (state.slice(start, pos), Some((state.rest(pos + 1), pos + 1))),
            None => match state.next_word_pos(Some(start), true) {
                // No assignment; whitespace separates option and argument.
                Some(pos) => (
                    state.slice(start, pos - 1).trim_end().to_string(),
                    Some((state.rest(pos), pos)),
                ),
                None => (state.rest(start), None),
            },
        };

        if option.is_empty() {
            return Err(state.error("Missing option name"));
        }
        state.emit(Token::Option(option), start);
        if let Some((argument, pos)) = argument {
            if !argument.is_empty() {
                state.emit(Token::Argument(argument), pos);
            }
        }
        Ok(())
    }

    fn xact_directive(state: &mut LexState) -> Result<(), LexError> {
        state.directive = Directive::Xact;
        let Some(date_word) = state.next_word(false, false) else {
            return Err(state.error("Invalid date"));
        };
        Self::tokenize_xact_date(state, &date_word)?;

        let word = Self::xact_word(state)?;
        match word.chars().next() {
            Some('*') => {
                state.emit(Token::Cleared, state.lexpos);
                Self::xact_word(state)?;
            }
            Some('!') => {
                state.emit(Token::Pending, state.lexpos);
                Self::xact_word(state)?;
            }
            _ => {}
        }

        if Self::tokenize_xact_code(state)? {
            Self::xact_word(state)?;
        }

        let note_pos = state.next_char_pos(';', None, true);
        let description = match note_pos {
            Some(pos) => state.slice(state.lexpos, pos),
            None => state.rest(state.lexpos),
        };
        state.emit(
            Token::Description(description.trim().to_string()),
            state.lexpos,
        );
        if let Some(pos) = note_pos {
            state.lexpos = pos;
            let tokens = Self::tokenize_xact_note(state);
            state.push_tokens(tokens);
        }
        Ok(())
    }

    /// The next header word; its absence means the description is missing.
    fn xact_word(state: &mut LexState) -> Result<String, LexError> {
        match state.next_word(true, false) {
            Some(word) if !word.is_empty() => Ok(word),
            _ => Err(state.error("Missing payee or description in transaction")),
        }
    }

    fn tokenize_xact_date(state: &mut LexState, text: &str) -> Result<(), LexError> {
        let chars: Vec<char> = text.chars().collect();
        let aux_split = chars.iter().position(|&c| c == '=');

        let (date_text, aux) = match aux_split {
            Some(aux_pos) => {
                let aux_text: String = chars[aux_pos + 1..].iter().collect();
                if aux_text.is_empty() {
                    state.lexpos += aux_pos;
                    return Err(state.error("Missing auxiliary date"));
                }
                (chars[..aux_pos].iter().collect::<String>(), Some((aux_text, aux_pos)))
            }
            None => (text.to_string(), None),
        };

        let Some(date) = scan_date(&date_text) else {
            return Err(state.error("Invalid date"));
        };
        state.emit(Token::Date(date), state.lexpos);

        if let Some((aux_text, aux_pos)) = aux {
            state.lexpos += aux_pos + 1;
            let Some(aux_date) = scan_date(&aux_text) else {
                return Err(state.error("Invalid date"));
            };
            state.emit(Token::AuxDate(aux_date), state.lexpos);
        }
        Ok(())
    }

    /// Tokenize a parenthesized transaction code, if one starts at the
    /// cursor. Returns whether a `CODE` token was emitted.
    fn tokenize_xact_code(state: &mut LexState) -> Result<bool, LexError> {
        if state.char_at(state.lexpos) != Some('(') {
            return Ok(false);
        }
        let Some(pos) = state.next_char_pos(')', None, false) else {
            return Err(state.error("Missing closing ')' after code in transaction"));
        };
        let code = state.slice(state.lexpos + 1, pos);
        state.lexpos += 1;
        let code = code.trim().to_string();
        if code.is_empty() {
            return Err(state.error("Missing code in transaction"));
        }
        state.emit(Token::Code(code), state.lexpos);
        Ok(true)
    }

    /// Tokenize the `;` note at the cursor. Returns the tokens rather than
    /// queueing them so posting lines can hold them back until the rest of
    /// the line is done.
    fn tokenize_xact_note(state: &mut LexState) -> Vec<LexToken> {
        let mut tokens = Vec::new();
        if state.char_at(state.lexpos) != Some(';') {
            return tokens;
        }
        tokens.push(LexToken::new(Token::Note(';'), state.lineno, state.lexpos));
        state.lexpos += 1;
        if let Some(pos) = state.next_word_pos(None, false) {
            let text = state.rest(pos);
            state.lexpos = pos;
            tokens.push(LexToken::new(Token::Text(text), state.lineno, state.lexpos));
        }
        tokens
    }

    fn tokenize_xact_expression(
        state: &mut LexState,
        keyword: Token,
    ) -> Result<Vec<LexToken>, LexError> {
        let mut tokens = vec![LexToken::new(keyword, state.lineno, state.lexpos)];
        let Some(pos) = state.next_word_pos(None, true) else {
            return Err(state.error("Missing value expression"));
        };
        let value = state.rest(pos).trim().to_string();
        state.lexpos = pos;
        tokens.push(LexToken::new(
            Token::ValExpr(value),
            state.lineno,
            state.lexpos,
        ));
        Ok(tokens)
    }

    /// An amount expression on the right-hand side of a posting, captured
    /// opaquely for a later evaluator.
    fn tokenize_amount_expression(state: &mut LexState) -> Vec<LexToken> {
        let value = state.rest(state.lexpos).trim().to_string();
        let token = LexToken::new(Token::ValExpr(value), state.lineno, state.lexpos);
        state.lexpos = state.linelen;
        vec![token]
    }

    fn indent(state: &mut LexState) -> Result<(), LexError> {
        if state.directive == Directive::Xact {
            Self::indent_xact(state)?;
        }
        Ok(())
    }

    fn indent_xact(state: &mut LexState) -> Result<(), LexError> {
        state.emit(Token::Indent, state.lexpos);

        let mut word = Self::posting_word(state, true)?;

        // A hard-separated `;` starts the posting's note. Its tokens are
        // computed up front and held back; the line is then truncated so
        // account and amount scanning never see the note text.
        let mut comment_tokens: Vec<LexToken> = Vec::new();
        let note_pos = if word.starts_with(';') {
            Some(state.lexpos)
        } else {
            state.next_char_pos(';', None, true)
        };
        if let Some(note_pos) = note_pos {
            let save_pos = state.lexpos;
            state.lexpos = note_pos;
            comment_tokens = Self::tokenize_xact_note(state);
            if save_pos == note_pos {
                // Line with only a comment.
                state.push_tokens(comment_tokens);
                return Ok(());
            }
            state.truncate(note_pos);
            state.lexpos = save_pos;
            word = Self::posting_word(state, false)?;
        }

        if let Some(keyword) = EXPRESSION_KEYWORDS.get(word.as_str()) {
            let tokens = Self::tokenize_xact_expression(state, keyword.clone())?;
            state.push_tokens(tokens);
            state.push_tokens(comment_tokens);
            return Ok(());
        }
        match word.chars().next() {
            Some('*') => {
                state.emit(Token::Cleared, state.lexpos);
                word = Self::posting_word(state, true)?;
            }
            Some('!') => {
                state.emit(Token::Pending, state.lexpos);
                word = Self::posting_word(state, true)?;
            }
            _ => {}
        }

        let mut skip = true;
        let delimited = match word.chars().next() {
            Some('(') => Some((')', "virtual", Token::VirtAcc as fn(String) -> Token)),
            Some('[') => Some((']', "balanced virtual", Token::BalVirtAcc as fn(String) -> Token)),
            Some('<') => Some(('>', "deferred", Token::DeferredAcc as fn(String) -> Token)),
            _ => None,
        };
        let (make_token, account, pos) = match delimited {
            Some((close, name, make_token)) => {
                let close_pos = state.next_char_pos(close, None, false);
                let hard_pos = state.next_hard_word_pos(None, true);
                let Some(close_pos) = close_pos else {
                    return Err(state.error(format!(
                        "Missing closing '{}' in {} posting",
                        close, name
                    )));
                };
                if hard_pos.is_some_and(|hard| hard < close_pos) {
                    return Err(state.error("No hard separator allowed in account name"));
                }
                (
                    make_token,
                    state.slice(state.lexpos + 1, close_pos),
                    Some(close_pos),
                )
            }
            None => match state.next_hard_word_pos(None, true) {
                None => (
                    Token::Account as fn(String) -> Token,
                    state.rest(state.lexpos),
                    None,
                ),
                Some(hard_pos) => {
                    // The next word already starts at the found position.
                    skip = false;
                    (
                        Token::Account as fn(String) -> Token,
                        state.slice(state.lexpos, hard_pos),
                        Some(hard_pos),
                    )
                }
            },
        };
        let account = account.trim().to_string();
        if account.is_empty() {
            return Err(state.error("Missing account in virtual posting"));
        }
        state.emit(make_token(account), state.lexpos);

        // Advance past the account; only a delimited account moves the
        // cursor onto its closing delimiter.
        let amount_word = match pos {
            Some(pos) => {
                state.lexpos = pos;
                state.next_word(skip, true)
            }
            None => {
                if state.linelen > 0 {
                    state.lexpos = state.linelen - 1;
                }
                None
            }
        };

        if let Some(amount_word) = amount_word {
            if amount_word.starts_with('(') {
                let tokens = Self::tokenize_amount_expression(state);
                state.push_tokens(tokens);
            } else {
                let tokens = tokenize_amount(state)?;
                state.push_tokens(tokens);
            }
            if let Some(extra) = state.next_word(false, false) {
                debug!(
                    "{}:{}: unparsed text after amount: '{}'",
                    state.filename, state.lineno, extra
                );
            }
        }

        state.push_tokens(comment_tokens);
        Ok(())
    }

    fn posting_word(state: &mut LexState, skip: bool) -> Result<String, LexError> {
        match state.next_word(skip, false) {
            Some(word) if !word.is_empty() => Ok(word),
            _ => Err(state.error("Missing account in posting")),
        }
    }
}

impl Iterator for Lexer {
    type Item = Result<LexToken, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_token() {
            Ok(Some(token)) => Some(Ok(token)),
            Ok(None) => None,
            Err(error) => Some(Err(error)),
        }
    }
}

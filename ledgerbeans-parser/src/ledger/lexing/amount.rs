//! Amount scanning
//!
//!     An amount is three sub-tokens in flexible order: an optional sign, a
//!     required number, and an optional commodity symbol that may come
//!     before or after the number. The scanner is a small state machine
//!     over the current line that tracks which sub-tokens have completed.
//!
//!     Rules enforced here:
//!
//!         - the sign appears at most once, and only before the number;
//!         - the number is digits interleaved with `.`/`,` markers, two
//!           consecutive markers being an error; the raw text is preserved
//!           and no decision is made about which marker is the decimal one;
//!         - a single space between number and symbol sets the `space`
//!           flag; a double space ends the amount;
//!         - a stray non-whitespace character directly after a complete
//!           amount is an error.

use crate::ledger::ast::elements::{Symbol, SymbolFlags};
use crate::ledger::error::LexError;
use crate::ledger::token::{LexToken, Token};

use super::state::LexState;

/// Characters that can never be part of a bare commodity symbol: markers,
/// operators, and brackets are reserved.
const SYMBOL_INVALID: &[char] = &[
    '.', ',', ';', ':', '?', '!', '-', '+', '*', '/', '^', '&', '|', '=', '<', '>', '[', ']', '(',
    ')', '{', '}', '@',
];

fn unexpected(state: &LexState, c: char) -> LexError {
    state.error(format!("Unexpected character '{}'", c))
}

/// Tokenize the amount starting at the current scan position.
///
/// Emits `AMOUNT` (sign included in the text) and, when a symbol was seen,
/// `SYMBOL` with its placement flags.
pub(crate) fn tokenize_amount(state: &mut LexState) -> Result<Vec<LexToken>, LexError> {
    let mut sign: Option<char> = None;
    let mut number = String::new();
    let mut symbol: Option<String> = None;

    let mut symbol_prefix = false;
    let mut symbol_space = false;
    // Reserved until a later pass resolves the thousands-marker convention.
    let number_grouping = false;

    let mut sign_done = false;
    let mut number_done = false;
    let mut symbol_done = false;

    let mut number_pos = state.lexpos;
    let mut symbol_pos = state.lexpos;

    let Some(mut c) = state.char_at(state.lexpos) else {
        return Err(state.error("No quantity specified for amount"));
    };

    loop {
        if c == '+' || c == '-' {
            if sign_done {
                return Err(unexpected(state, c));
            }
            sign = Some(c);
            state.lexpos += 1;
            sign_done = true;
        } else if c.is_ascii_digit() {
            if number_done {
                return Err(unexpected(state, c));
            }
            number_pos = state.lexpos;
            number = scan_amount_number(state, c)?;
            number_done = true;
            sign_done = true;
            if symbol_done {
                symbol_prefix = true;
            }
        } else if c == '"' {
            if symbol_done {
                return Err(unexpected(state, c));
            }
            symbol_pos = state.lexpos;
            symbol = Some(scan_amount_quoted_symbol(state)?);
            symbol_done = true;
        } else if c == ' ' {
            let Some(peek) = state.char_at(state.lexpos + 1) else {
                break;
            };
            if peek.is_whitespace() {
                // Double whitespace ends the amount.
                break;
            }
            if number_done && symbol_done {
                break;
            }
            if number_done != symbol_done {
                symbol_space = true;
            }
            state.lexpos += 1;
        } else {
            if symbol_done {
                return Err(unexpected(state, c));
            }
            symbol_pos = state.lexpos;
            symbol = Some(scan_amount_symbol(state, c));
            symbol_done = true;
        }

        if number_done && symbol_done {
            break;
        }
        match state.char_at(state.lexpos) {
            Some(next) => c = next,
            None => break,
        }
    }

    if let Some(trailing) = state.char_at(state.lexpos) {
        if !trailing.is_whitespace() {
            return Err(unexpected(state, trailing));
        }
    }

    if !number_done {
        return Err(state.error("No quantity specified for amount"));
    }

    let mut amount_text = number;
    if let Some(sign) = sign {
        amount_text.insert(0, sign);
    }

    let mut tokens = vec![LexToken::new(
        Token::Amount(amount_text),
        state.lineno,
        number_pos,
    )];
    if symbol_done {
        let flags = SymbolFlags {
            prefix: symbol_prefix,
            space: symbol_space,
            grouping: number_grouping,
        };
        let text = symbol.unwrap_or_default();
        tokens.push(LexToken::new(
            Token::Symbol(Symbol::new(text, flags)),
            state.lineno,
            symbol_pos,
        ));
    }
    Ok(tokens)
}

/// Consume a run of digits interleaved with `.`/`,` markers. The first
/// character is known to be a digit.
fn scan_amount_number(state: &mut LexState, first: char) -> Result<String, LexError> {
    let mut number = String::new();
    let mut c = first;
    loop {
        if !c.is_ascii_digit() && c != '.' && c != ',' {
            break;
        }
        if (c == '.' || c == ',') && matches!(number.chars().last(), Some('.') | Some(',')) {
            return Err(unexpected(state, c));
        }
        number.push(c);
        state.lexpos += 1;
        match state.char_at(state.lexpos) {
            Some(next) => c = next,
            None => break,
        }
    }
    Ok(number)
}

/// Consume a bare symbol: anything up to a digit, whitespace, or reserved
/// punctuation.
fn scan_amount_symbol(state: &mut LexState, first: char) -> String {
    let mut symbol = String::new();
    let mut c = first;
    loop {
        if c.is_ascii_digit() || c.is_whitespace() || SYMBOL_INVALID.contains(&c) {
            break;
        }
        symbol.push(c);
        state.lexpos += 1;
        match state.char_at(state.lexpos) {
            Some(next) => c = next,
            None => break,
        }
    }
    symbol
}

/// Consume a quoted symbol, quotes included in the returned text.
fn scan_amount_quoted_symbol(state: &mut LexState) -> Result<String, LexError> {
    let start = state.lexpos;
    let Some(end) = state.next_char_pos('"', Some(start + 1), false) else {
        return Err(state.error("Missing closing quote character"));
    };
    state.lexpos = end + 1;
    Ok(state.slice(start, end + 1))
}

#[cfg(test)]
mod tests {
    use super::super::state::state_for_line;
    use super::*;

    fn lex_amount(line: &str) -> Result<Vec<LexToken>, LexError> {
        let mut state = state_for_line(line);
        tokenize_amount(&mut state)
    }

    fn amount_text(tokens: &[LexToken]) -> &str {
        match &tokens[0].token {
            Token::Amount(text) => text,
            other => panic!("expected AMOUNT, got {:?}", other),
        }
    }

    fn symbol(tokens: &[LexToken]) -> &Symbol {
        match &tokens[1].token {
            Token::Symbol(symbol) => symbol,
            other => panic!("expected SYMBOL, got {:?}", other),
        }
    }

    #[test]
    fn test_plain_number() {
        let tokens = lex_amount("4.50").unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(amount_text(&tokens), "4.50");
    }

    #[test]
    fn test_prefix_symbol_without_space() {
        let tokens = lex_amount("$4.50").unwrap();
        assert_eq!(amount_text(&tokens), "4.50");
        let sym = symbol(&tokens);
        assert_eq!(sym.text, "$");
        assert_eq!(sym.flags.to_string(), "P");
    }

    #[test]
    fn test_suffix_symbol_with_space() {
        let tokens = lex_amount("1000.00 USD").unwrap();
        assert_eq!(amount_text(&tokens), "1000.00");
        let sym = symbol(&tokens);
        assert_eq!(sym.text, "USD");
        assert_eq!(sym.flags.to_string(), "S");
    }

    #[test]
    fn test_sign_is_kept_in_text() {
        let tokens = lex_amount("-1000.00 USD").unwrap();
        assert_eq!(amount_text(&tokens), "-1000.00");
        assert_eq!(lex_amount("+3").map(|t| amount_text(&t).to_string()), Ok("+3".to_string()));
    }

    #[test]
    fn test_grouping_markers_are_preserved() {
        let tokens = lex_amount("1,234.56").unwrap();
        assert_eq!(amount_text(&tokens), "1,234.56");
    }

    #[test]
    fn test_double_marker_is_an_error() {
        let err = lex_amount("1,,234").unwrap_err();
        assert_eq!(err.message, "Unexpected character ','");
    }

    #[test]
    fn test_duplicate_sign_is_an_error() {
        let err = lex_amount("--5").unwrap_err();
        assert_eq!(err.message, "Unexpected character '-'");
    }

    #[test]
    fn test_sign_after_number_is_an_error() {
        let err = lex_amount("5-").unwrap_err();
        assert_eq!(err.message, "Unexpected character '-'");
    }

    #[test]
    fn test_quoted_symbol_keeps_quotes() {
        let tokens = lex_amount("\"DE 0002\" 100").unwrap();
        assert_eq!(amount_text(&tokens), "100");
        let sym = symbol(&tokens);
        assert_eq!(sym.text, "\"DE 0002\"");
        assert_eq!(sym.flags.to_string(), "PS");
    }

    #[test]
    fn test_missing_closing_quote() {
        let err = lex_amount("\"EUR 100").unwrap_err();
        assert_eq!(err.message, "Missing closing quote character");
    }

    #[test]
    fn test_symbol_only_is_an_error() {
        let err = lex_amount("USD").unwrap_err();
        assert_eq!(err.message, "No quantity specified for amount");
    }

    #[test]
    fn test_double_space_ends_the_amount() {
        // The word after the gap is left for the caller to inspect.
        let mut state = state_for_line("4.50  leftover");
        let tokens = tokenize_amount(&mut state).unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(amount_text(&tokens), "4.50");
    }

    #[test]
    fn test_attached_stray_character_is_an_error() {
        let err = lex_amount("$4.50x").unwrap_err();
        assert_eq!(err.message, "Unexpected character 'x'");
    }

    #[test]
    fn test_unicode_symbol() {
        let tokens = lex_amount("\u{20ac}4.50").unwrap();
        let sym = symbol(&tokens);
        assert_eq!(sym.text, "\u{20ac}");
        assert!(sym.flags.prefix);
    }

    #[test]
    fn test_token_columns() {
        let tokens = lex_amount("$4.50").unwrap();
        assert_eq!(tokens[0].column, 1);
        assert_eq!(tokens[1].column, 0);
    }
}

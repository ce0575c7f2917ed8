//! Date word scanning
//!
//! A date word is normalized by replacing `-` and `.` separators with `/`
//! and split: three parts make a full date, two a partial date, anything
//! else is invalid. Range validation happens here, at lex time, so a header
//! like `2024/13/45` fails before any token for the line is emitted.

use crate::ledger::ast::date::{Date, LedgerDate, PartialDate};

/// Scan one date word. Returns `None` for anything that is not a valid
/// full or partial date.
pub(crate) fn scan_date(text: &str) -> Option<LedgerDate> {
    let normalized: String = text
        .chars()
        .map(|c| if c == '-' || c == '.' { '/' } else { c })
        .collect();
    let parts: Vec<&str> = normalized.split('/').collect();
    match parts.as_slice() {
        [year, month, day] => {
            let year: i32 = parse_part(year)?.try_into().ok()?;
            let date = Date::new(year, parse_part(month)?, parse_part(day)?)?;
            Some(LedgerDate::Full(date))
        }
        [month, day] => {
            let date = PartialDate::new(parse_part(month)?, parse_part(day)?)?;
            Some(LedgerDate::Partial(date))
        }
        _ => None,
    }
}

fn parse_part(text: &str) -> Option<u32> {
    if text.is_empty() {
        return None;
    }
    text.parse().ok()
}

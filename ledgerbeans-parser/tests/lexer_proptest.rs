//! Property tests for the lexer's structural guarantees.

use proptest::prelude::*;

use ledgerbeans_parser::ledger::token::Token;
use ledgerbeans_parser::ledger::{parse_source, tokenize_source};

proptest! {
    /// The hard separator always splits account from amount, no matter how
    /// many single spaces the account name itself contains.
    #[test]
    fn account_and_amount_split_on_hard_separator(
        account in "[A-Z][a-z0-9]{0,8}(:[A-Z][a-z0-9]{0,8}){0,2}( [a-z0-9]{1,6}){0,2}",
        amount in "[0-9]{1,7}\\.[0-9]{2}",
    ) {
        let source = format!("2024/01/15 Test\n    {}  {}\n", account, amount);
        let tokens = tokenize_source(&source, "prop.ledger").unwrap();
        let accounts: Vec<_> = tokens
            .iter()
            .filter_map(|t| match &t.token {
                Token::Account(name) => Some(name.clone()),
                _ => None,
            })
            .collect();
        let amounts: Vec<_> = tokens
            .iter()
            .filter_map(|t| match &t.token {
                Token::Amount(text) => Some(text.clone()),
                _ => None,
            })
            .collect();
        prop_assert_eq!(accounts, vec![account]);
        prop_assert_eq!(amounts, vec![amount]);
    }

    /// Quantities keep their textual form byte-for-byte, grouping markers
    /// included; nothing is lost to a numeric conversion.
    #[test]
    fn amount_raw_text_is_preserved(
        lead in 1u32..=999,
        groups in prop::collection::vec(0u32..=999, 0..=3),
        cents in 0u32..=99,
    ) {
        let mut raw = lead.to_string();
        for group in &groups {
            raw.push_str(&format!(",{:03}", group));
        }
        raw.push_str(&format!(".{:02}", cents));

        let source = format!("2024/01/15 Test\n    Assets:Cash  {}\n", raw);
        let journal = parse_source(&source, "prop.ledger").unwrap();
        let xact = journal.transactions().next().unwrap();
        let posting = xact.postings().next().unwrap();
        prop_assert_eq!(posting.amount.as_ref().unwrap().raw(), raw.as_str());
    }

    /// Any mix of blank, comment, and option lines lexes to a stream with
    /// exactly one trailing EOF and non-decreasing line numbers.
    #[test]
    fn stream_shape_invariants(
        source_lines in prop::collection::vec(
            prop_oneof![
                Just(String::new()),
                "[a-z][a-z ]{0,10}".prop_map(|text| format!("; {}", text)),
                "[a-z]{1,8}".prop_map(|name| format!("--{}", name)),
            ],
            0..16,
        ),
    ) {
        let mut source = source_lines.join("\n");
        source.push('\n');
        let tokens = tokenize_source(&source, "prop.ledger").unwrap();

        let eof_count = tokens
            .iter()
            .filter(|t| matches!(t.token, Token::Eof(_)))
            .count();
        prop_assert_eq!(eof_count, 1);
        prop_assert!(matches!(tokens.last().unwrap().token, Token::Eof(_)));

        let line_numbers: Vec<usize> = tokens.iter().map(|t| t.line).collect();
        let mut sorted = line_numbers.clone();
        sorted.sort_unstable();
        prop_assert_eq!(line_numbers, sorted);
    }
}

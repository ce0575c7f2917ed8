//! Token-stream tests for the lexer.
//!
//! These drive the lexer alone and assert on the exact token sequence each
//! line decomposes into, including positions where they matter.

use ledgerbeans_parser::ledger::token::{LexToken, Token};
use ledgerbeans_parser::ledger::{tokenize_source, LexError, Lexer};

fn lex(source: &str) -> Vec<LexToken> {
    tokenize_source(source, "test.ledger").expect("expected clean lex")
}

fn lex_err(source: &str) -> LexError {
    tokenize_source(source, "test.ledger").expect_err("expected a lex error")
}

fn kinds(tokens: &[LexToken]) -> Vec<&'static str> {
    tokens.iter().map(|t| t.token.kind()).collect()
}

#[test]
fn test_simple_transaction_token_stream() {
    let tokens = lex("2024/01/15 Coffee shop\n    Expenses:Food   $4.50\n    Assets:Cash\n");
    assert_eq!(
        kinds(&tokens),
        vec![
            "DATE",
            "DESCRIPTION",
            "INDENT",
            "ACCOUNT",
            "AMOUNT",
            "SYMBOL",
            "INDENT",
            "ACCOUNT",
            "EOF",
        ]
    );

    assert_eq!(tokens[0].line, 1);
    assert_eq!(tokens[0].column, 0);
    assert_eq!(tokens[1].token, Token::Description("Coffee shop".to_string()));
    assert_eq!(tokens[1].column, 11);
    assert_eq!(tokens[3].token, Token::Account("Expenses:Food".to_string()));
    assert_eq!(tokens[4].token, Token::Amount("4.50".to_string()));
    match &tokens[5].token {
        Token::Symbol(symbol) => {
            assert_eq!(symbol.text, "$");
            assert_eq!(symbol.flags.to_string(), "P");
        }
        other => panic!("expected SYMBOL, got {:?}", other),
    }
}

#[test]
fn test_full_header_with_auxdate_flag_and_code() {
    let tokens = lex("2024-02-01=2024-02-03 * (#42) Payroll\n");
    assert_eq!(
        kinds(&tokens),
        vec!["DATE", "AUXDATE", "CLEARED", "CODE", "DESCRIPTION", "EOF"]
    );
    match &tokens[1].token {
        Token::AuxDate(date) => assert_eq!(date.to_string(), "2024-02-03"),
        other => panic!("expected AUXDATE, got {:?}", other),
    }
    assert_eq!(tokens[3].token, Token::Code("#42".to_string()));
    assert_eq!(tokens[4].token, Token::Description("Payroll".to_string()));
}

#[test]
fn test_partial_date_and_header_note() {
    let tokens = lex("03-10 ! Rent due  ; monthly\n");
    assert_eq!(
        kinds(&tokens),
        vec!["DATE", "PENDING", "DESCRIPTION", "NOTE", "TEXT", "EOF"]
    );
    match &tokens[0].token {
        Token::Date(date) => {
            assert!(date.is_partial());
            assert_eq!(date.month(), 3);
            assert_eq!(date.day(), 10);
        }
        other => panic!("expected DATE, got {:?}", other),
    }
    assert_eq!(tokens[2].token, Token::Description("Rent due".to_string()));
    assert_eq!(tokens[4].token, Token::Text("monthly".to_string()));
}

#[test]
fn test_soft_semicolon_stays_in_description() {
    // A single space before ';' is not a hard separator, so the ';' is
    // ordinary description text.
    let tokens = lex("2024/01/15 Coffee ; not a note\n");
    assert_eq!(kinds(&tokens), vec!["DATE", "DESCRIPTION", "EOF"]);
    assert_eq!(
        tokens[1].token,
        Token::Description("Coffee ; not a note".to_string())
    );
}

#[test]
fn test_hard_separator_splits_account_and_amount() {
    let tokens = lex("2024/04/01 Grocery\n    Expenses:Food and Drink  12.00\n");
    assert_eq!(
        kinds(&tokens),
        vec!["DATE", "DESCRIPTION", "INDENT", "ACCOUNT", "AMOUNT", "EOF"]
    );
    assert_eq!(
        tokens[3].token,
        Token::Account("Expenses:Food and Drink".to_string())
    );
    assert_eq!(tokens[4].token, Token::Amount("12.00".to_string()));
}

#[test]
fn test_single_space_keeps_amount_in_account() {
    let tokens = lex("2024/04/01 Grocery\n    Expenses:Food and Drink 12.00\n");
    assert_eq!(
        kinds(&tokens),
        vec!["DATE", "DESCRIPTION", "INDENT", "ACCOUNT", "EOF"]
    );
    assert_eq!(
        tokens[3].token,
        Token::Account("Expenses:Food and Drink 12.00".to_string())
    );
}

#[test]
fn test_tab_is_a_hard_separator() {
    let tokens = lex("2024/04/01 Grocery\n    Expenses:Food\t12.00\n");
    assert_eq!(
        kinds(&tokens),
        vec!["DATE", "DESCRIPTION", "INDENT", "ACCOUNT", "AMOUNT", "EOF"]
    );
}

#[test]
fn test_delimited_accounts() {
    let tokens = lex(
        "2024/03/01 Budget move\n    (Budget:Groceries)   50.00\n    [Assets:Checking]   -50.00\n    <Forecast:Rent>  100\n",
    );
    assert_eq!(
        kinds(&tokens),
        vec![
            "DATE",
            "DESCRIPTION",
            "INDENT",
            "VIRTACC",
            "AMOUNT",
            "INDENT",
            "BALVIRTACC",
            "AMOUNT",
            "INDENT",
            "DEFERREDACC",
            "AMOUNT",
            "EOF",
        ]
    );
    assert_eq!(tokens[3].token, Token::VirtAcc("Budget:Groceries".to_string()));
    assert_eq!(tokens[4].token, Token::Amount("50.00".to_string()));
    assert_eq!(
        tokens[6].token,
        Token::BalVirtAcc("Assets:Checking".to_string())
    );
    assert_eq!(tokens[7].token, Token::Amount("-50.00".to_string()));
    assert_eq!(tokens[9].token, Token::DeferredAcc("Forecast:Rent".to_string()));
}

#[test]
fn test_posting_with_held_back_note() {
    // The note tokens are computed first but emitted after the amount.
    let tokens = lex("2024/01/15 Lunch\n    Expenses:Food  $5  ; for lunch\n");
    assert_eq!(
        kinds(&tokens),
        vec![
            "DATE",
            "DESCRIPTION",
            "INDENT",
            "ACCOUNT",
            "AMOUNT",
            "SYMBOL",
            "NOTE",
            "TEXT",
            "EOF",
        ]
    );
    assert_eq!(tokens[7].token, Token::Text("for lunch".to_string()));
}

#[test]
fn test_posting_line_with_only_a_note() {
    let tokens = lex("2024/01/15 Lunch\n    ; just a note\n");
    assert_eq!(
        kinds(&tokens),
        vec!["DATE", "DESCRIPTION", "INDENT", "NOTE", "TEXT", "EOF"]
    );
}

#[test]
fn test_posting_status_flags() {
    let tokens = lex("2024/01/15 Lunch\n    * Expenses:Food  1\n    ! Assets:Cash  2\n");
    assert_eq!(
        kinds(&tokens),
        vec![
            "DATE",
            "DESCRIPTION",
            "INDENT",
            "CLEARED",
            "ACCOUNT",
            "AMOUNT",
            "INDENT",
            "PENDING",
            "ACCOUNT",
            "AMOUNT",
            "EOF",
        ]
    );
}

#[test]
fn test_expression_keywords() {
    let tokens = lex("2024/01/15 Check\n    assert account(\"Assets:Cash\").amount > 0\n");
    assert_eq!(
        kinds(&tokens),
        vec!["DATE", "DESCRIPTION", "INDENT", "ASSERT", "VALEXPR", "EOF"]
    );
    assert_eq!(
        tokens[4].token,
        Token::ValExpr("account(\"Assets:Cash\").amount > 0".to_string())
    );
}

#[test]
fn test_amount_expression_is_reserved_valexpr() {
    let tokens = lex("2024/01/15 Expr\n    Assets:Cash  (1 + 2)\n");
    assert_eq!(
        kinds(&tokens),
        vec!["DATE", "DESCRIPTION", "INDENT", "ACCOUNT", "VALEXPR", "EOF"]
    );
    assert_eq!(tokens[4].token, Token::ValExpr("(1 + 2)".to_string()));
}

#[test]
fn test_comment_lines() {
    for marker in [';', '#', '*', '|'] {
        let tokens = lex(&format!("{} top comment\n", marker));
        assert_eq!(kinds(&tokens), vec!["COMMENT", "TEXT", "EOF"]);
        assert_eq!(tokens[0].token, Token::Comment(marker));
        assert_eq!(tokens[1].token, Token::Text("top comment".to_string()));
    }
}

#[test]
fn test_option_lines() {
    let tokens = lex("--file=test.ledger\n");
    assert_eq!(kinds(&tokens), vec!["OPTION", "ARGUMENT", "EOF"]);
    assert_eq!(tokens[0].token, Token::Option("file".to_string()));
    assert_eq!(tokens[0].column, 2);
    assert_eq!(tokens[1].token, Token::Argument("test.ledger".to_string()));

    let tokens = lex("-f data.ledger\n");
    assert_eq!(kinds(&tokens), vec!["OPTION", "ARGUMENT", "EOF"]);
    assert_eq!(tokens[0].token, Token::Option("f".to_string()));
    assert_eq!(tokens[1].token, Token::Argument("data.ledger".to_string()));

    let tokens = lex("--debug\n");
    assert_eq!(kinds(&tokens), vec!["OPTION", "EOF"]);
    assert_eq!(tokens[0].token, Token::Option("debug".to_string()));
}

#[test]
fn test_blank_lines_are_explicit_tokens() {
    let tokens = lex("\n  \n; c\n");
    assert_eq!(
        kinds(&tokens),
        vec!["EMPTYLINE", "EMPTYLINE", "COMMENT", "TEXT", "EOF"]
    );
}

#[test]
fn test_eof_token_carries_source_name() {
    let tokens = lex("");
    assert_eq!(kinds(&tokens), vec!["EOF"]);
    assert_eq!(tokens[0].token, Token::Eof("test.ledger".to_string()));
    assert_eq!(tokens[0].line, 0);
}

#[test]
fn test_iteration_after_eof_is_idle() {
    let mut lexer = Lexer::from_source("; done\n", "test.ledger");
    let mut eof_count = 0;
    while let Some(result) = lexer.next() {
        if matches!(result.unwrap().token, Token::Eof(_)) {
            eof_count += 1;
        }
    }
    assert_eq!(eof_count, 1);
    assert!(lexer.next_token().unwrap().is_none());
    assert!(lexer.next_token().unwrap().is_none());
}

#[test]
fn test_line_numbers_never_decrease() {
    let tokens = lex("; one\n\n2024/01/15 Coffee\n    Assets:Cash  1.00\n");
    let lines: Vec<usize> = tokens.iter().map(|t| t.line).collect();
    let mut sorted = lines.clone();
    sorted.sort_unstable();
    assert_eq!(lines, sorted);
}

#[test]
fn test_unknown_directive_ends_the_stream() {
    let mut lexer = Lexer::from_source("account Assets:Cash\n; never reached\n", "test.ledger");
    assert!(lexer.next_token().unwrap().is_none());
    assert!(lexer.next_token().unwrap().is_none());
}

#[test]
fn test_indent_outside_transaction_is_skipped() {
    let tokens = lex("; comment\n    stray indent\n; next\n");
    assert_eq!(
        kinds(&tokens),
        vec!["COMMENT", "TEXT", "COMMENT", "TEXT", "EOF"]
    );
}

#[test]
fn test_invalid_date_is_a_lex_error() {
    let err = lex_err("2024/13/45 Bad date\n");
    assert_eq!(err.message, "Invalid date");
    assert_eq!(err.filename, "test.ledger");
    assert_eq!(err.line, 1);
    assert_eq!(err.column, 1);
}

#[test]
fn test_no_tokens_before_the_failing_date() {
    let mut lexer = Lexer::from_source("2024/13/45 Bad date\n", "test.ledger");
    assert!(lexer.next_token().is_err());
    // The lexer does not recover.
    assert!(lexer.next_token().unwrap().is_none());
}

#[test]
fn test_missing_auxiliary_date() {
    let err = lex_err("2024/01/01= Oops\n");
    assert_eq!(err.message, "Missing auxiliary date");
}

#[test]
fn test_missing_description() {
    let err = lex_err("2024/01/01\n");
    assert_eq!(err.message, "Missing payee or description in transaction");
}

#[test]
fn test_missing_code_delimiter() {
    let err = lex_err("2024/01/01 * (#42 Payroll\n");
    assert_eq!(err.message, "Missing closing ')' after code in transaction");
}

#[test]
fn test_missing_option_name() {
    assert_eq!(lex_err("-\n").message, "Missing option name");
    assert_eq!(lex_err("--\n").message, "Missing option name");
    assert_eq!(lex_err("--=value\n").message, "Missing option name");
}

#[test]
fn test_virtual_account_errors() {
    let err = lex_err("2024/01/01 X\n    (Budget:Food  1.00\n");
    assert_eq!(err.message, "Missing closing ')' in virtual posting");

    let err = lex_err("2024/01/01 X\n    [Assets  One]  1.00\n");
    assert_eq!(err.message, "No hard separator allowed in account name");

    let err = lex_err("2024/01/01 X\n    ()  1.00\n");
    assert_eq!(err.message, "Missing account in virtual posting");
}

#[test]
fn test_missing_value_expression() {
    let err = lex_err("2024/01/01 X\n    assert\n");
    assert_eq!(err.message, "Missing value expression");
}

#[test]
fn test_error_position_snapshot() {
    let err = lex_err("2024/01/15 Ok\n    Assets:Cash  1,,2\n");
    assert_eq!(err.message, "Unexpected character ','");
    assert_eq!(err.line, 2);
    assert_eq!(err.filename, "test.ledger");
}

// Command-line interface for ledgerbeans
//
// This binary exposes the two inspection stages of the parsing pipeline:
//
//  ledgerbeans lex [-f FILE] [-o FILE] [--json]   - show tokens after lexing and exit
//  ledgerbeans ast [-f FILE] [-o FILE]            - show the AST after parsing and exit
//
// Input defaults to stdin and output to stdout. Errors are written to
// standard error as FILENAME:LINE:COLUMN:MESSAGE and the process exits
// non-zero; output already produced is not retracted.

use std::fs;
use std::io::{self, BufRead, Write};

use clap::{Arg, ArgAction, Command, ValueHint};
use log::Level;

use ledgerbeans_parser::ledger::formats::print_journal;
use ledgerbeans_parser::ledger::{LedgerError, Lexer, Parser};

const LOG_LEVELS: [&str; 5] = ["debug", "info", "warning", "error", "critical"];

fn build_cli() -> Command {
    Command::new("ledgerbeans")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Double-entry accounting tool")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("file")
                .short('f')
                .long("file")
                .value_name("FILE")
                .help("Read FILE as a ledger file (defaults to stdin)")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FILE")
                .help("Redirect output to FILE (defaults to stdout)")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .value_name("LEVEL")
                .help("Set logging to LEVEL")
                .value_parser(clap::builder::PossibleValuesParser::new(LOG_LEVELS))
                .default_value("warning")
                .global(true),
        )
        .arg(
            Arg::new("debug")
                .long("debug")
                .help("Enable debug mode")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(Command::new("lex").about("Show tokens after lexing and exit").arg(
            Arg::new("json")
                .long("json")
                .help("Emit tokens as JSON, one object per line")
                .action(ArgAction::SetTrue),
        ))
        .subcommand(Command::new("ast").about("Show abstract syntax tree after parsing and exit"))
}

/// Map a `--log-level` choice onto the closest `log` level. `critical` has
/// no direct counterpart and maps to `error`.
fn map_log_level(name: &str, debug: bool) -> Level {
    if debug {
        return Level::Debug;
    }
    match name {
        "debug" => Level::Debug,
        "info" => Level::Info,
        "warning" => Level::Warn,
        _ => Level::Error,
    }
}

fn open_input(path: Option<&String>) -> io::Result<(Box<dyn BufRead>, String)> {
    match path {
        Some(path) => {
            let file = fs::File::open(path)?;
            Ok((Box::new(io::BufReader::new(file)), path.clone()))
        }
        None => Ok((
            Box::new(io::BufReader::new(io::stdin())),
            "<stdin>".to_string(),
        )),
    }
}

fn open_output(path: Option<&String>) -> io::Result<Box<dyn Write>> {
    match path {
        Some(path) => Ok(Box::new(fs::File::create(path)?)),
        None => Ok(Box::new(io::stdout())),
    }
}

fn main() {
    let matches = build_cli().get_matches();

    let level = map_log_level(
        matches
            .get_one::<String>("log-level")
            .map(String::as_str)
            .unwrap_or("warning"),
        matches.get_flag("debug"),
    );
    if let Err(e) = simple_logger::init_with_level(level) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    let (reader, filename) = match open_input(matches.get_one::<String>("file")) {
        Ok(input) => input,
        Err(e) => {
            eprintln!("Error reading input: {}", e);
            std::process::exit(1);
        }
    };
    let output = match open_output(matches.get_one::<String>("output")) {
        Ok(output) => output,
        Err(e) => {
            eprintln!("Error opening output: {}", e);
            std::process::exit(1);
        }
    };

    match matches.subcommand() {
        Some(("lex", sub_matches)) => {
            command_lex(reader, &filename, output, sub_matches.get_flag("json"));
        }
        Some(("ast", _)) => {
            command_ast(reader, &filename, output);
        }
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

/// Write the token stream, one token per line.
fn command_lex(reader: Box<dyn BufRead>, filename: &str, mut output: Box<dyn Write>, json: bool) {
    let lexer = Lexer::new(reader, filename);
    for token in lexer {
        match token {
            Ok(token) => {
                let line = if json {
                    match serde_json::to_string(&token) {
                        Ok(line) => line,
                        Err(e) => {
                            eprintln!("Error serializing token: {}", e);
                            std::process::exit(1);
                        }
                    }
                } else {
                    token.to_string()
                };
                if let Err(e) = writeln!(output, "{}", line) {
                    eprintln!("Error writing output: {}", e);
                    std::process::exit(1);
                }
            }
            Err(e) => {
                // FILENAME:LINE:COLUMN:MESSAGE
                eprintln!("{}", e);
                std::process::exit(1);
            }
        }
    }
}

/// Parse the whole journal and write its pretty-printed listing.
fn command_ast(reader: Box<dyn BufRead>, filename: &str, mut output: Box<dyn Write>) {
    let lexer = Lexer::new(reader, filename);
    match Parser::new(lexer).parse() {
        Ok(journal) => {
            if let Err(e) = output.write_all(print_journal(&journal).as_bytes()) {
                eprintln!("Error writing output: {}", e);
                std::process::exit(1);
            }
        }
        Err(LedgerError::Lex(e)) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
        Err(LedgerError::Parse(e)) => {
            eprintln!("{}:{}", filename, e);
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_mapping() {
        assert_eq!(map_log_level("debug", false), Level::Debug);
        assert_eq!(map_log_level("info", false), Level::Info);
        assert_eq!(map_log_level("warning", false), Level::Warn);
        assert_eq!(map_log_level("error", false), Level::Error);
        assert_eq!(map_log_level("critical", false), Level::Error);
    }

    #[test]
    fn test_debug_flag_overrides_level() {
        assert_eq!(map_log_level("error", true), Level::Debug);
    }

    #[test]
    fn test_cli_definition() {
        build_cli().debug_assert();
    }
}

//! # Calculator CLI
//!
//! Terminal shell for the calculator engine. Key presses come in as text,
//! one character per key (`12+3=`, `C`, `<` for backspace); after each line
//! the display is printed, with the pending operation underneath.
//!
//! ```text
//! $ calc_cli --keys "3+4+"
//!          7
//!        7 +
//! ```

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use calc_core::{load_settings, parse_key_sequence, CalcError, Calculator, DisplaySettings, Operator};

/// Width of the right-aligned display column
const DISPLAY_WIDTH: usize = 24;

/// Four-function calculator driven by key sequences
#[derive(Parser, Debug)]
#[command(name = "calc_cli")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Keys to press, e.g. "3+4×2=" (interactive mode if omitted)
    #[arg(short, long)]
    keys: Option<String>,

    /// Settings file (JSON)
    #[arg(short, long, env = "CALC_CONFIG")]
    config: Option<PathBuf>,

    /// Significant digits kept in results (overrides the settings file)
    #[arg(short = 'd', long)]
    significant_digits: Option<u32>,

    /// Print the final state as JSON
    #[arg(long)]
    json: bool,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn build_settings(cli: &Cli) -> Result<DisplaySettings, CalcError> {
    let mut settings = match &cli.config {
        Some(path) => load_settings(path)?,
        None => DisplaySettings::default(),
    };

    if let Some(digits) = cli.significant_digits {
        settings.significant_digits = digits;
        settings.validate()?;
    }

    Ok(settings)
}

/// Feed a line of keys to the calculator. On an unknown key nothing from the
/// line is applied.
fn press_line(calc: &mut Calculator, line: &str) -> Result<(), CalcError> {
    for event in parse_key_sequence(line)? {
        calc.handle(event);
    }
    Ok(())
}

fn print_display(calc: &Calculator) {
    println!("{:>width$}", calc.display_text(), width = DISPLAY_WIDTH);
    if let Some(pending) = calc.pending_text() {
        println!("{:>width$}", pending, width = DISPLAY_WIDTH);
    }
}

fn print_state_json(calc: &Calculator) {
    match serde_json::to_string_pretty(calc.state()) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error: failed to serialize state: {}", e),
    }
}

fn report_error(e: &CalcError) {
    eprintln!("Error: {}", e);
    if let Ok(json) = serde_json::to_string(e) {
        eprintln!("{}", json);
    }
}

/// One-line key reference for the interactive prompt
fn key_help() -> String {
    let operators: Vec<&str> = Operator::ALL.iter().map(|op| op.symbol()).collect();
    format!(
        "Calculator - keys: 0-9 . {} (or * /) = C <  (q to quit)",
        operators.join(" ")
    )
}

fn interactive(calc: &mut Calculator) {
    println!("{}", key_help());
    print_display(calc);

    let stdin = io::stdin();
    loop {
        print!("> ");
        if io::stdout().flush().is_err() {
            return;
        }

        let mut input = String::new();
        match stdin.lock().read_line(&mut input) {
            Ok(0) | Err(_) => return,
            Ok(_) => {}
        }

        let line = input.trim();
        if line == "q" || line == "quit" {
            return;
        }

        match press_line(calc, line) {
            Ok(()) => print_display(calc),
            Err(e) => report_error(&e),
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let settings = match build_settings(&cli) {
        Ok(s) => s,
        Err(e) => {
            report_error(&e);
            return ExitCode::FAILURE;
        }
    };
    let mut calc = Calculator::with_settings(settings);
    tracing::info!(
        significant_digits = calc.settings().significant_digits,
        "starting calculator"
    );

    match &cli.keys {
        Some(keys) => {
            if let Err(e) = press_line(&mut calc, keys) {
                report_error(&e);
                return ExitCode::FAILURE;
            }
            if cli.json {
                print_state_json(&calc);
            } else {
                print_display(&calc);
            }
        }
        None => {
            interactive(&mut calc);
            if cli.json {
                print_state_json(&calc);
            }
        }
    }

    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_flags() {
        let cli = Cli::try_parse_from(["calc_cli", "--keys", "3+4=", "-d", "8", "--json", "-vv"]).unwrap();
        assert_eq!(cli.keys.as_deref(), Some("3+4="));
        assert_eq!(cli.significant_digits, Some(8));
        assert!(cli.json);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_significant_digits_override_is_validated() {
        let cli = Cli::try_parse_from(["calc_cli", "-d", "30"]).unwrap();
        assert_eq!(build_settings(&cli).unwrap_err().error_code(), "INVALID_INPUT");

        let cli = Cli::try_parse_from(["calc_cli", "-d", "5"]).unwrap();
        assert_eq!(build_settings(&cli).unwrap().significant_digits, 5);
    }

    #[test]
    fn test_key_help_lists_every_operator() {
        let help = key_help();
        for op in Operator::ALL {
            assert!(help.contains(op.symbol()), "missing {}", op.symbol());
        }
    }

    #[test]
    fn test_press_line_is_all_or_nothing() {
        let mut calc = Calculator::new();
        press_line(&mut calc, "12+").unwrap();
        let before = calc.snapshot();

        assert!(press_line(&mut calc, "3%").is_err());
        assert_eq!(calc.snapshot(), before);

        press_line(&mut calc, "3=").unwrap();
        assert_eq!(calc.display_text(), "15");
    }
}

mod cli;
mod dispatch;
mod output;
mod stdout_io;

use std::process::ExitCode;

use clap::{Parser, error::ErrorKind};
use dompet_client::ClientError;
use stdout_io::write_stdout_text;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const LOG_ENV_VAR: &str = "DOMPET_LOG";
const DEFAULT_LOG_FILTER: &str = "warn";

const TOP_LEVEL_HELP: &str = "Dompet - wallets, ledger and recurring transactions

USAGE: dompet <command>

Set up:
  dompet wallet add <name>                                Create a wallet
  dompet template add --help                              Save a recurring income, expense, saving or transfer

Generate:
  dompet recurring run                                    Generate everything due today
  dompet recurring run --as-of 2024-03-15                 Generate what was due on a given date
  dompet recurring generate <template_id>                 Generate one template now, whatever its schedule

Review:
  dompet wallet list                                      Wallet balances
  dompet template list                                    Templates and their next due dates
  dompet transaction list [--wallet <wallet_id>]          Ledger rows, newest first

Every command accepts --json and --user <id> (default from DOMPET_USER).
Set DOMPET_HOME to keep the ledger somewhere other than ~/.dompet.
";

fn main() -> ExitCode {
    init_tracing();
    match run() {
        Ok(code) => code,
        Err(code) => code,
    }
}

// Logs go to stderr so `--json` output on stdout stays parseable.
fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run() -> Result<ExitCode, ExitCode> {
    let raw_args = std::env::args().collect::<Vec<String>>();
    if raw_args.len() == 1 || is_top_level_help_request(&raw_args) {
        if write_stdout_text(TOP_LEVEL_HELP).is_err() {
            return Err(ExitCode::from(2));
        }
        return Ok(ExitCode::SUCCESS);
    }

    let cli = match cli::Cli::try_parse() {
        Ok(value) => value,
        Err(err) => {
            if matches!(
                err.kind(),
                ErrorKind::DisplayHelp
                    | ErrorKind::DisplayVersion
                    | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
            ) {
                if write_stdout_text(&err.to_string()).is_err() {
                    return Err(ExitCode::from(2));
                }
                return Ok(ExitCode::SUCCESS);
            }

            let clean_message = strip_clap_boilerplate(&err.to_string());
            let parse_error = ClientError::invalid_argument_for_command(
                &clean_message,
                command_path_from_args(&raw_args),
            );
            let mode = infer_requested_output_mode(&raw_args);
            if output::print_failure(&parse_error, mode).is_err() {
                return Err(ExitCode::from(2));
            }
            return Err(ExitCode::from(1));
        }
    };
    let mode = output::mode_for_command(&cli.command);
    tracing::debug!(user = %cli.user, "dispatching command");

    match dispatch::dispatch(&cli) {
        Ok(success) => {
            if output::print_success(&success, mode).is_err() {
                return Err(ExitCode::from(2));
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(error) => {
            if output::print_failure(&error, mode).is_err() {
                return Err(ExitCode::from(2));
            }
            Err(exit_code_for_error(&error))
        }
    }
}

fn is_top_level_help_request(raw_args: &[String]) -> bool {
    raw_args.len() == 2 && matches!(raw_args[1].as_str(), "--help" | "-h")
}

/// Drops clap's trailing usage block so the "What to do next" steps are
/// the only guidance printed.
fn strip_clap_boilerplate(message: &str) -> String {
    let trimmed = if let Some(pos) = message.find("\n\nUsage:") {
        &message[..pos]
    } else if let Some(pos) = message.find("\nFor more information") {
        &message[..pos]
    } else {
        message
    };
    trimmed.trim_end().to_string()
}

fn command_path_from_args(raw_args: &[String]) -> Option<&'static str> {
    let words = raw_args
        .iter()
        .skip(1)
        .filter(|value| !value.starts_with('-'))
        .map(String::as_str)
        .collect::<Vec<&str>>();

    match words.as_slice() {
        ["wallet", "add", ..] => Some("wallet add"),
        ["wallet", "list", ..] => Some("wallet list"),
        ["wallet", ..] => Some("wallet"),
        ["template", "add", ..] => Some("template add"),
        ["template", "list", ..] => Some("template list"),
        ["template", "pause", ..] => Some("template pause"),
        ["template", "resume", ..] => Some("template resume"),
        ["template", ..] => Some("template"),
        ["transaction", "list", ..] => Some("transaction list"),
        ["transaction", ..] => Some("transaction"),
        ["recurring", "run", ..] => Some("recurring run"),
        ["recurring", "generate", ..] => Some("recurring generate"),
        ["recurring", ..] => Some("recurring"),
        _ => None,
    }
}

fn exit_code_for_error(error: &ClientError) -> ExitCode {
    if error.is_internal() {
        ExitCode::from(2)
    } else {
        ExitCode::from(1)
    }
}

fn infer_requested_output_mode(raw_args: &[String]) -> output::OutputMode {
    if raw_args.iter().skip(1).any(|value| value == "--json") {
        return output::OutputMode::Json;
    }
    output::OutputMode::Text
}

#[cfg(test)]
mod tests {
    use super::{command_path_from_args, infer_requested_output_mode, strip_clap_boilerplate};
    use crate::output::OutputMode;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| (*value).to_string()).collect()
    }

    #[test]
    fn command_hint_follows_the_subcommand_path() {
        assert_eq!(
            command_path_from_args(&args(&["dompet", "template", "add", "--amount", "x"])),
            Some("template add")
        );
        assert_eq!(
            command_path_from_args(&args(&["dompet", "recurring", "--json"])),
            Some("recurring")
        );
        assert_eq!(command_path_from_args(&args(&["dompet", "budget"])), None);
    }

    #[test]
    fn clap_usage_block_is_removed() {
        let message = "error: invalid value 'x' for '--amount <AMOUNT>'\n\nUsage: dompet template add";
        assert_eq!(
            strip_clap_boilerplate(message),
            "error: invalid value 'x' for '--amount <AMOUNT>'"
        );
    }

    #[test]
    fn json_flag_is_honored_for_parse_failures() {
        assert_eq!(
            infer_requested_output_mode(&args(&["dompet", "wallet", "list", "--json", "--bogus"])),
            OutputMode::Json
        );
        assert_eq!(
            infer_requested_output_mode(&args(&["dompet", "wallet", "list"])),
            OutputMode::Text
        );
    }
}

mod error_text;
mod format;
mod json;
mod ledger_text;
mod mode;
mod recurring_text;

use std::io;

use dompet_client::{ClientError, SuccessEnvelope};

use crate::stdout_io::write_stdout_line;

pub use mode::{OutputMode, mode_for_command};

pub fn print_success(success: &SuccessEnvelope, mode: OutputMode) -> io::Result<()> {
    let body = match mode {
        OutputMode::Text => render_text_success(success)?,
        OutputMode::Json => json::render_success_json(success)?,
    };
    write_stdout_line(&body)
}

pub fn print_failure(error: &ClientError, mode: OutputMode) -> io::Result<()> {
    let body = match mode {
        OutputMode::Json => json::render_error_json(error)?,
        OutputMode::Text => error_text::render_error(error),
    };
    write_stdout_line(&body)
}

fn render_text_success(success: &SuccessEnvelope) -> io::Result<String> {
    match success.command.as_str() {
        "wallet add" => ledger_text::render_wallet_added(&success.data),
        "wallet list" => ledger_text::render_wallet_list(&success.data),
        "template add" | "template pause" | "template resume" => {
            ledger_text::render_template_saved(&success.command, &success.data)
        }
        "template list" => ledger_text::render_template_list(&success.data),
        "transaction list" => ledger_text::render_transaction_list(&success.data),
        "recurring run" | "recurring generate" => {
            recurring_text::render_recurring_run(&success.data)
        }
        _ => Err(io::Error::other(format!(
            "unsupported text output command `{}`",
            success.command
        ))),
    }
}

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use clap::{Parser, Subcommand};

pub const USER_ENV_VAR: &str = "DOMPET_USER";

pub fn parse_iso_date(value: &str) -> Result<NaiveDate, String> {
    if value.len() != 10 {
        return Err("date must use YYYY-MM-DD format".to_string());
    }

    let bytes = value.as_bytes();
    if bytes[4] != b'-' || bytes[7] != b'-' {
        return Err("date must use YYYY-MM-DD format".to_string());
    }

    for index in [0usize, 1, 2, 3, 5, 6, 8, 9] {
        if !bytes[index].is_ascii_digit() {
            return Err("date must use YYYY-MM-DD format".to_string());
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| "date must use valid calendar values".to_string())
}

/// Accepts `YYYY-MM-DD` (read as midnight) or `YYYY-MM-DDTHH:MM:SS`.
pub fn parse_run_time(value: &str) -> Result<NaiveDateTime, String> {
    if value.len() == 10 {
        return parse_iso_date(value).map(|date| date.and_time(NaiveTime::MIN));
    }

    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S")
        .map_err(|_| "time must use YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS format".to_string())
}

pub const TEMPLATE_ADD_AFTER_HELP: &str = "\
Kinds:
  income     adds the amount to the source wallet
  outcome    takes the amount out of the source wallet
  saving     books the amount as saved from the source wallet
  transfer   moves the amount from --from to --to (both wallets get a row)

Schedule:
  monthly templates fire on --day (1-31). A day the month does not have is skipped.
  weekly templates fire once seven days have passed since the last run.

Amounts are whole minor currency units, e.g. `--amount 150000`.

Examples:
  dompet template add \"Rent\" --kind outcome --amount 1500000 --from <wallet_id> --day 1
  dompet template add \"Save\" --kind transfer --amount 500000 --from <wallet_id> --to <wallet_id> --day 25
";

#[derive(Debug, Parser)]
#[command(
    name = "dompet",
    version,
    about = "personal finance ledger with recurring transactions",
    disable_help_subcommand = true
)]
pub struct Cli {
    /// Ledger user the command acts for
    #[arg(long, global = true, env = USER_ENV_VAR, default_value = "local")]
    pub user: String,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Manage wallets
    #[command(arg_required_else_help = true)]
    Wallet {
        #[command(subcommand)]
        command: WalletCommand,
    },
    /// Manage recurring transaction templates
    #[command(arg_required_else_help = true)]
    Template {
        #[command(subcommand)]
        command: TemplateCommand,
    },
    /// Browse ledger transactions
    #[command(arg_required_else_help = true)]
    Transaction {
        #[command(subcommand)]
        command: TransactionCommand,
    },
    /// Generate transactions from recurring templates
    #[command(arg_required_else_help = true)]
    Recurring {
        #[command(subcommand)]
        command: RecurringCommand,
    },
}

#[derive(Debug, Subcommand)]
pub enum WalletCommand {
    /// Create a wallet
    Add {
        name: String,
        #[arg(long)]
        json: bool,
    },
    /// List wallets with their balances
    List {
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum TemplateCommand {
    /// Save a recurring template
    #[command(after_help = TEMPLATE_ADD_AFTER_HELP)]
    Add {
        description: String,
        /// income, outcome, saving or transfer
        #[arg(long)]
        kind: String,
        /// Positive amount in minor currency units
        #[arg(long)]
        amount: i64,
        /// Source wallet id
        #[arg(long = "from")]
        source_wallet_id: String,
        /// Target wallet id (transfers only)
        #[arg(long = "to")]
        target_wallet_id: Option<String>,
        #[arg(long)]
        category: Option<String>,
        /// monthly or weekly
        #[arg(long, default_value = "monthly")]
        frequency: String,
        /// Day of month for monthly templates
        #[arg(long)]
        day: Option<u32>,
        #[arg(long)]
        json: bool,
    },
    /// List templates and when they are next due
    List {
        /// Reference date for next due dates (YYYY-MM-DD)
        #[arg(long, value_parser = parse_iso_date)]
        as_of: Option<NaiveDate>,
        #[arg(long)]
        json: bool,
    },
    /// Stop a template from being generated
    Pause {
        template_id: String,
        #[arg(long)]
        json: bool,
    },
    /// Let a paused template be generated again
    Resume {
        template_id: String,
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum TransactionCommand {
    /// List transactions, newest first
    List {
        /// Only show rows of this wallet id
        #[arg(long)]
        wallet: Option<String>,
        #[arg(long)]
        limit: Option<usize>,
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum RecurringCommand {
    /// Generate every template due on the run date
    Run {
        /// Run date (YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS); defaults to now
        #[arg(long, value_parser = parse_run_time)]
        as_of: Option<NaiveDateTime>,
        #[arg(long)]
        json: bool,
    },
    /// Generate one template right away, ignoring its schedule
    Generate {
        template_id: String,
        /// Posting time (YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS); defaults to now
        #[arg(long, value_parser = parse_run_time)]
        at: Option<NaiveDateTime>,
        #[arg(long)]
        json: bool,
    },
}

#[cfg(test)]
pub fn parse_from<I, T>(args: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(args)
}

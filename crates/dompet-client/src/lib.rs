pub mod commands;
pub mod contracts;
pub mod dates;
pub mod error;
pub mod ledger;
pub mod migrations;
pub mod recurring;
pub mod setup;
pub mod state;

pub use contracts::envelope::{FailureEnvelope, SuccessEnvelope};
pub use error::{ClientError, ClientResult};
pub use ledger::{InMemoryLedgerStore, LedgerStore, SqliteLedgerStore};
pub use recurring::{ProcessResult, RecurringProcessor, TemplateFailure};

pub const API_VERSION: &str = env!("CARGO_PKG_VERSION");

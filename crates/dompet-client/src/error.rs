use std::path::Path;

use serde_json::{Value, json};
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ClientError {
    pub code: String,
    pub message: String,
    pub recovery_steps: Vec<String>,
    pub data: Option<Value>,
}

impl ClientError {
    pub fn new(code: &str, message: &str, recovery_steps: Vec<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.to_string(),
            recovery_steps,
            data: None,
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn invalid_argument(message: &str) -> Self {
        Self::invalid_argument_for_command(message, None)
    }

    pub fn invalid_argument_for_command(message: &str, command: Option<&str>) -> Self {
        let help_hint = match command {
            Some(cmd) => format!("Run `dompet {cmd} --help` for usage."),
            None => "Run `dompet --help` for usage.".to_string(),
        };
        let error = Self::new("invalid_argument", message, vec![help_hint]);
        if let Some(cmd) = command {
            return error.with_data(json!({
                "command_hint": cmd,
            }));
        }
        error
    }

    pub fn invalid_argument_with_recovery(message: &str, recovery_steps: Vec<String>) -> Self {
        Self::new("invalid_argument", message, recovery_steps)
    }

    pub fn template_not_found(template_id: &str) -> Self {
        Self::new(
            "template_not_found",
            &format!("Recurring template `{template_id}` was not found."),
            vec![
                "Run `dompet template list` to find a valid template id.".to_string(),
                "Retry with `dompet recurring generate <template_id>`.".to_string(),
            ],
        )
        .with_data(json!({
            "template_id": template_id,
        }))
    }

    pub fn wallet_not_found(wallet_id: &str) -> Self {
        Self::new(
            "wallet_not_found",
            &format!("Wallet `{wallet_id}` was not found for this user."),
            vec![
                "Run `dompet wallet list` to find a valid wallet id.".to_string(),
                "Create the wallet first with `dompet wallet add <name>`.".to_string(),
            ],
        )
        .with_data(json!({
            "wallet_id": wallet_id,
        }))
    }

    pub fn duplicate_wallet_name(name: &str) -> Self {
        Self::invalid_argument_with_recovery(
            &format!("A wallet named `{name}` already exists."),
            vec!["Choose a different wallet name.".to_string()],
        )
    }

    pub fn store_write_failed(detail: &str) -> Self {
        Self::new(
            "store_write_failed",
            &format!("Ledger write failed: {detail}"),
            vec!["Retry the command; nothing from the failed write was kept.".to_string()],
        )
    }

    pub fn store_read_failed(detail: &str) -> Self {
        Self::new(
            "store_read_failed",
            &format!("Ledger read failed: {detail}"),
            vec!["Retry the command.".to_string()],
        )
    }

    pub fn internal_serialization(message: &str) -> Self {
        Self::new("internal_serialization_error", message, Vec::new())
    }

    pub fn ledger_init_permission_denied(path: &Path, detail: &str) -> Self {
        let location = path.display().to_string();
        Self::new(
            "ledger_init_permission_denied",
            &format!("Cannot initialize ledger at `{location}`: {detail}"),
            vec![format!(
                "Grant write access to `{location}` or set `DOMPET_HOME` to a writable directory."
            )],
        )
    }

    pub fn ledger_locked(path: &Path) -> Self {
        let location = path.display().to_string();
        Self::new(
            "ledger_locked",
            &format!("Ledger database is locked at `{location}`."),
            vec![format!(
                "Close other processes using `{location}` so the lock is released."
            )],
        )
    }

    pub fn ledger_corrupt(path: &Path) -> Self {
        let location = path.display().to_string();
        Self::new(
            "ledger_corrupt",
            &format!("Ledger database appears corrupt at `{location}`."),
            vec![format!(
                "Replace `{location}` with a valid ledger file or restore from backup."
            )],
        )
    }

    pub fn migration_failed(path: &Path, detail: &str) -> Self {
        let location = path.display().to_string();
        Self::new(
            "migration_failed",
            &format!("Ledger migration failed at `{location}`: {detail}"),
            vec!["Resolve conflicting schema objects referenced in the error details.".to_string()],
        )
    }

    pub fn ledger_init_failed(path: &Path, detail: &str) -> Self {
        let location = path.display().to_string();
        Self::new(
            "ledger_init_failed",
            &format!("Ledger initialization failed at `{location}`: {detail}"),
            Vec::new(),
        )
    }

    /// Internal failures exit with status 2 in the CLI; everything else is a user error.
    pub fn is_internal(&self) -> bool {
        self.code.starts_with("internal_")
            || matches!(
                self.code.as_str(),
                "ledger_init_permission_denied"
                    | "ledger_locked"
                    | "ledger_corrupt"
                    | "migration_failed"
                    | "ledger_init_failed"
                    | "store_write_failed"
                    | "store_read_failed"
            )
    }
}

pub type ClientResult<T> = Result<T, ClientError>;

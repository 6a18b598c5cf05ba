use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use dompet_client::{ClientResult, SuccessEnvelope};
use dompet_client::commands::recurring::{self, RecurringGenerateOptions, RecurringProcessOptions};
use dompet_client::commands::templates::{self, TemplateCreateOptions};
use dompet_client::commands::transactions::{self, TransactionListOptions};
use dompet_client::commands::wallets::{self, WalletCreateOptions, WalletListOptions};
use serde_json::Value;
use tempfile::{Builder, TempDir};

pub const USER: &str = "tester";

pub fn temp_home_in_tmp(prefix: &str) -> std::io::Result<(TempDir, PathBuf)> {
    let dir = Builder::new().prefix(prefix).tempdir_in("/tmp")?;
    let home = dir.path().join("ledger-home");
    fs::create_dir_all(&home)?;
    Ok((dir, home))
}

pub fn at(value: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S").unwrap_or_default()
}

pub fn payload(result: ClientResult<SuccessEnvelope>) -> Value {
    assert!(result.is_ok());
    if let Ok(success) = result {
        let value = serde_json::to_value(success);
        assert!(value.is_ok());
        if let Ok(value) = value {
            return value;
        }
    }
    Value::Null
}

pub fn add_wallet(home: &Path, name: &str) -> String {
    let envelope = payload(wallets::create_with_options(WalletCreateOptions {
        user_id: USER.to_string(),
        name: name.to_string(),
        home_override: Some(home),
    }));
    envelope["data"]["wallet_id"]
        .as_str()
        .unwrap_or_default()
        .to_string()
}

pub fn template_options<'a>(
    home: &'a Path,
    description: &str,
    kind: &str,
    amount: i64,
    source_wallet_id: &str,
    day_of_month: u32,
) -> TemplateCreateOptions<'a> {
    TemplateCreateOptions {
        user_id: USER.to_string(),
        description: description.to_string(),
        amount,
        kind: kind.to_string(),
        category: Some("Bills".to_string()),
        source_wallet_id: source_wallet_id.to_string(),
        target_wallet_id: None,
        frequency: "monthly".to_string(),
        day_of_month: Some(day_of_month),
        home_override: Some(home),
    }
}

pub fn add_template(options: TemplateCreateOptions<'_>) -> String {
    let envelope = payload(templates::create_with_options(options));
    envelope["data"]["template_id"]
        .as_str()
        .unwrap_or_default()
        .to_string()
}

pub fn run_at(home: &Path, as_of: &str) -> Value {
    payload(recurring::process_with_options(RecurringProcessOptions {
        user_id: USER.to_string(),
        as_of: Some(at(as_of)),
        home_override: Some(home),
    }))
}

pub fn generate_at(home: &Path, template_id: &str, as_of: &str) -> Value {
    payload(recurring::generate_with_options(RecurringGenerateOptions {
        user_id: USER.to_string(),
        template_id: template_id.to_string(),
        at: Some(at(as_of)),
        home_override: Some(home),
    }))
}

pub fn transaction_rows(home: &Path, wallet_id: Option<&str>) -> Vec<Value> {
    payload(transactions::list_with_options(TransactionListOptions {
        user_id: USER.to_string(),
        wallet_id: wallet_id.map(std::string::ToString::to_string),
        limit: None,
        home_override: Some(home),
    }))["data"]["rows"]
        .as_array()
        .cloned()
        .unwrap_or_default()
}

pub fn wallet_balance(home: &Path, wallet_id: &str) -> Option<i64> {
    let envelope = payload(wallets::list_with_options(WalletListOptions {
        user_id: USER.to_string(),
        home_override: Some(home),
    }));
    envelope["data"]["rows"]
        .as_array()?
        .iter()
        .find(|row| row["wallet_id"].as_str() == Some(wallet_id))
        .and_then(|row| row["balance"].as_i64())
}

pub fn labels(values: &Value) -> Vec<String> {
    values
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(std::string::ToString::to_string)
                .collect()
        })
        .unwrap_or_default()
}

use std::path::Path;

use crate::ClientResult;
use crate::commands::common::{open_store, wallet_row, wallet_summary_row};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{WalletListData, WalletRow};

#[derive(Debug, Default)]
pub struct WalletCreateOptions<'a> {
    pub user_id: String,
    pub name: String,
    pub home_override: Option<&'a Path>,
}

#[derive(Debug, Default)]
pub struct WalletListOptions<'a> {
    pub user_id: String,
    pub home_override: Option<&'a Path>,
}

pub fn create(user_id: &str, name: &str) -> ClientResult<SuccessEnvelope> {
    create_with_options(WalletCreateOptions {
        user_id: user_id.to_string(),
        name: name.to_string(),
        home_override: None,
    })
}

#[doc(hidden)]
pub fn create_with_options(options: WalletCreateOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let store = open_store(options.home_override)?;
    let wallet = store.create_wallet(&options.user_id, &options.name)?;
    success("wallet add", wallet_row(&wallet, 0, 0))
}

pub fn list(user_id: &str) -> ClientResult<SuccessEnvelope> {
    list_with_options(WalletListOptions {
        user_id: user_id.to_string(),
        home_override: None,
    })
}

#[doc(hidden)]
pub fn list_with_options(options: WalletListOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let store = open_store(options.home_override)?;
    let rows = store
        .wallet_summaries(&options.user_id)?
        .iter()
        .map(wallet_summary_row)
        .collect::<Vec<WalletRow>>();
    let total_balance = rows.iter().map(|row| row.balance).sum();

    success(
        "wallet list",
        WalletListData {
            user_id: options.user_id,
            total_balance,
            rows,
        },
    )
}

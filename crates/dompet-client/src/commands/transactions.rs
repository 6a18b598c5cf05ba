use std::path::Path;

use crate::commands::common::{open_store, transaction_row};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{TransactionListData, TransactionRow};
use crate::ledger::history::TransactionQuery;
use crate::{ClientError, ClientResult};

pub const DEFAULT_LIMIT: usize = 50;

#[derive(Debug, Default)]
pub struct TransactionListOptions<'a> {
    pub user_id: String,
    pub wallet_id: Option<String>,
    pub limit: Option<usize>,
    pub home_override: Option<&'a Path>,
}

pub fn list(user_id: &str, wallet_id: Option<&str>, limit: Option<usize>) -> ClientResult<SuccessEnvelope> {
    list_with_options(TransactionListOptions {
        user_id: user_id.to_string(),
        wallet_id: wallet_id.map(std::string::ToString::to_string),
        limit,
        home_override: None,
    })
}

#[doc(hidden)]
pub fn list_with_options(options: TransactionListOptions<'_>) -> ClientResult<SuccessEnvelope> {
    if options.limit == Some(0) {
        return Err(ClientError::invalid_argument_for_command(
            "`--limit` must be at least 1.",
            Some("transaction list"),
        ));
    }

    let store = open_store(options.home_override)?;
    if let Some(wallet_id) = options.wallet_id.as_deref()
        && store.find_wallet(&options.user_id, wallet_id)?.is_none()
    {
        return Err(ClientError::wallet_not_found(wallet_id));
    }

    let rows = store
        .list_transactions(&TransactionQuery {
            user_id: options.user_id.clone(),
            wallet_id: options.wallet_id.clone(),
            limit: Some(options.limit.unwrap_or(DEFAULT_LIMIT)),
        })?
        .iter()
        .map(transaction_row)
        .collect::<Vec<TransactionRow>>();

    success(
        "transaction list",
        TransactionListData {
            user_id: options.user_id,
            wallet_id: options.wallet_id,
            returned: rows.len(),
            rows,
        },
    )
}

use rusqlite::params;

use crate::ClientResult;
use crate::dates::parse_timestamp;
use crate::ledger::sqlite::{SqliteLedgerStore, TRANSACTION_COLUMNS, transaction_from_row, unexpected_value};
use crate::ledger::types::{TransactionRecord, Wallet};

#[derive(Debug, Clone, Default)]
pub struct TransactionQuery {
    pub user_id: String,
    pub wallet_id: Option<String>,
    pub limit: Option<usize>,
}

/// A wallet with the balance derived from its ledger rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletSummary {
    pub wallet: Wallet,
    pub balance: i64,
    pub transaction_count: i64,
}

impl SqliteLedgerStore {
    /// Newest first.
    pub fn list_transactions(&self, query: &TransactionQuery) -> ClientResult<Vec<TransactionRecord>> {
        let limit = query
            .limit
            .and_then(|value| i64::try_from(value).ok())
            .unwrap_or(-1);
        let mut statement = self
            .connection
            .prepare(&format!(
                "SELECT {TRANSACTION_COLUMNS} FROM transactions
                 WHERE user_id = ?1 AND (?2 IS NULL OR wallet_id = ?2)
                 ORDER BY posted_at DESC, created_at DESC, txn_id DESC
                 LIMIT ?3"
            ))
            .map_err(|error| self.read_error(&error))?;

        let rows = statement
            .query_map(
                params![&query.user_id, &query.wallet_id, limit],
                transaction_from_row,
            )
            .map_err(|error| self.read_error(&error))?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row.map_err(|error| self.read_error(&error))?);
        }
        Ok(records)
    }

    /// Every wallet of `user_id` with `income - outcome - saving` over its rows.
    pub fn wallet_summaries(&self, user_id: &str) -> ClientResult<Vec<WalletSummary>> {
        let mut statement = self
            .connection
            .prepare(
                "SELECT
                    w.wallet_id,
                    w.user_id,
                    w.name,
                    w.created_at,
                    COALESCE(SUM(t.income - t.outcome - t.saving), 0),
                    COUNT(t.txn_id)
                 FROM wallets w
                 LEFT JOIN transactions t ON t.wallet_id = w.wallet_id
                 WHERE w.user_id = ?1
                 GROUP BY w.wallet_id
                 ORDER BY w.name COLLATE NOCASE, w.wallet_id",
            )
            .map_err(|error| self.read_error(&error))?;

        let rows = statement
            .query_map([user_id], |row| {
                let created_text = row.get::<_, String>(3)?;
                let created_at = parse_timestamp(&created_text)
                    .ok_or_else(|| unexpected_value(3, "created_at", created_text))?;
                Ok(WalletSummary {
                    wallet: Wallet {
                        wallet_id: row.get(0)?,
                        user_id: row.get(1)?,
                        name: row.get(2)?,
                        created_at,
                    },
                    balance: row.get(4)?,
                    transaction_count: row.get(5)?,
                })
            })
            .map_err(|error| self.read_error(&error))?;

        let mut summaries = Vec::new();
        for row in rows {
            summaries.push(row.map_err(|error| self.read_error(&error))?);
        }
        Ok(summaries)
    }
}

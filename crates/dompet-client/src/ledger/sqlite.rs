use std::collections::HashMap;
use std::path::{Path, PathBuf};

use rusqlite::types::Type;
use rusqlite::{
    Connection, OptionalExtension, Row, Transaction, TransactionBehavior, params,
    params_from_iter,
};
use thiserror::Error;

use crate::dates::{format_iso_date, format_timestamp, local_now, parse_stored_date, parse_timestamp};
use crate::ledger::store::{GenerationBatch, GenerationOutcome, LedgerStore};
use crate::ledger::types::{
    Frequency, NewTransaction, Period, RecurringTemplate, TemplateKind, TransactionRecord,
    new_id,
};
use crate::state::{map_sqlite_read_error, map_sqlite_write_error, open_connection};
use crate::{ClientError, ClientResult};

pub(crate) const TEMPLATE_COLUMNS: &str = "template_id, user_id, description, amount, kind, \
     category, source_wallet_id, target_wallet_id, frequency, day_of_month, is_active, \
     last_generated_at";

pub(crate) const TRANSACTION_COLUMNS: &str = "txn_id, user_id, wallet_id, description, \
     category, posted_at, income, outcome, saving, is_transfer, transfer_from_wallet_id, \
     transfer_to_wallet_id, template_id, created_at";

#[derive(Debug, Error)]
#[error("unexpected value `{value}` in column `{column}`")]
struct UnexpectedColumnValue {
    column: &'static str,
    value: String,
}

/// [`LedgerStore`] backed by the SQLite ledger file.
#[derive(Debug)]
pub struct SqliteLedgerStore {
    pub(crate) connection: Connection,
    pub(crate) db_path: PathBuf,
}

impl SqliteLedgerStore {
    /// Opens an already-initialized ledger. See [`crate::setup::ensure_initialized`].
    pub fn open(db_path: &Path) -> ClientResult<Self> {
        Ok(Self {
            connection: open_connection(db_path)?,
            db_path: db_path.to_path_buf(),
        })
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    pub(crate) fn read_error(&self, error: &rusqlite::Error) -> ClientError {
        map_sqlite_read_error(&self.db_path, error)
    }

    pub(crate) fn write_error(&self, error: &rusqlite::Error) -> ClientError {
        map_sqlite_write_error(&self.db_path, error)
    }

    pub(crate) fn load_template(&self, template_id: &str) -> ClientResult<Option<RecurringTemplate>> {
        self.connection
            .query_row(
                &format!("SELECT {TEMPLATE_COLUMNS} FROM recurring_templates WHERE template_id = ?1"),
                [template_id],
                template_from_row,
            )
            .optional()
            .map_err(|error| self.read_error(&error))
    }
}

impl LedgerStore for SqliteLedgerStore {
    fn list_active_templates(&self, user_id: &str) -> ClientResult<Vec<RecurringTemplate>> {
        let mut statement = self
            .connection
            .prepare(&format!(
                "SELECT {TEMPLATE_COLUMNS} FROM recurring_templates
                 WHERE user_id = ?1 AND is_active = 1
                 ORDER BY created_at, template_id"
            ))
            .map_err(|error| self.read_error(&error))?;

        let rows = statement
            .query_map([user_id], template_from_row)
            .map_err(|error| self.read_error(&error))?;

        let mut templates = Vec::new();
        for row in rows {
            templates.push(row.map_err(|error| self.read_error(&error))?);
        }
        Ok(templates)
    }

    fn find_template(&self, template_id: &str) -> ClientResult<Option<RecurringTemplate>> {
        self.load_template(template_id)
    }

    fn wallet_names(&self, wallet_ids: &[&str]) -> ClientResult<HashMap<String, String>> {
        if wallet_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let placeholders = (1..=wallet_ids.len())
            .map(|index| format!("?{index}"))
            .collect::<Vec<String>>()
            .join(", ");
        let mut statement = self
            .connection
            .prepare(&format!(
                "SELECT wallet_id, name FROM wallets WHERE wallet_id IN ({placeholders})"
            ))
            .map_err(|error| self.read_error(&error))?;

        let rows = statement
            .query_map(params_from_iter(wallet_ids.iter()), |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
            })
            .map_err(|error| self.read_error(&error))?;

        let mut names = HashMap::new();
        for row in rows {
            let (wallet_id, name) = row.map_err(|error| self.read_error(&error))?;
            names.insert(wallet_id, name);
        }
        Ok(names)
    }

    fn record_generation(&mut self, batch: &GenerationBatch) -> ClientResult<GenerationOutcome> {
        let db_path = self.db_path.clone();
        let transaction = self
            .connection
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(|error| map_sqlite_write_error(&db_path, &error))?;

        // The marker moves first so a run that lost the race writes nothing.
        // It never moves backwards; stored timestamps sort lexically.
        let expected = batch.expected_last_generated_at.as_ref().map(format_timestamp);
        let advanced = transaction
            .execute(
                "UPDATE recurring_templates
                 SET last_generated_at = MAX(COALESCE(last_generated_at, ?1), ?1)
                 WHERE template_id = ?2 AND last_generated_at IS ?3",
                params![
                    format_timestamp(&batch.generated_at),
                    &batch.template_id,
                    expected
                ],
            )
            .map_err(|error| map_sqlite_write_error(&db_path, &error))?;

        if advanced == 0 {
            let exists = transaction
                .query_row(
                    "SELECT 1 FROM recurring_templates WHERE template_id = ?1",
                    [&batch.template_id],
                    |_row| Ok(true),
                )
                .optional()
                .map_err(|error| map_sqlite_read_error(&db_path, &error))?
                .unwrap_or(false);
            if !exists {
                return Err(ClientError::template_not_found(&batch.template_id));
            }
            return Ok(GenerationOutcome::AlreadyGenerated);
        }

        let created_at = format_timestamp(&local_now());
        let mut transaction_ids = Vec::with_capacity(batch.entries.len());
        for entry in &batch.entries {
            transaction_ids.push(insert_transaction(&transaction, &db_path, entry, &created_at)?);
        }

        transaction
            .commit()
            .map_err(|error| map_sqlite_write_error(&db_path, &error))?;

        Ok(GenerationOutcome::Recorded { transaction_ids })
    }
}

fn insert_transaction(
    transaction: &Transaction<'_>,
    db_path: &Path,
    entry: &NewTransaction,
    created_at: &str,
) -> ClientResult<String> {
    let txn_id = new_id("txn");
    transaction
        .execute(
            "INSERT INTO transactions (
                txn_id,
                user_id,
                wallet_id,
                description,
                category,
                posted_at,
                income,
                outcome,
                saving,
                is_transfer,
                transfer_from_wallet_id,
                transfer_to_wallet_id,
                template_id,
                created_at
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
            params![
                &txn_id,
                &entry.user_id,
                &entry.wallet_id,
                &entry.description,
                &entry.category,
                format_iso_date(&entry.posted_at),
                entry.income,
                entry.outcome,
                entry.saving,
                entry.is_transfer,
                &entry.transfer_from_wallet_id,
                &entry.transfer_to_wallet_id,
                &entry.template_id,
                created_at
            ],
        )
        .map_err(|error| map_sqlite_write_error(db_path, &error))?;
    Ok(txn_id)
}

pub(crate) fn template_from_row(row: &Row<'_>) -> rusqlite::Result<RecurringTemplate> {
    let kind_text = row.get::<_, String>(4)?;
    let kind = TemplateKind::parse(&kind_text)
        .ok_or_else(|| unexpected_value(4, "kind", kind_text))?;
    let frequency_text = row.get::<_, String>(8)?;
    let frequency = Frequency::parse(&frequency_text)
        .ok_or_else(|| unexpected_value(8, "frequency", frequency_text))?;
    let last_generated_at = match row.get::<_, Option<String>>(11)? {
        Some(text) => Some(
            parse_timestamp(&text).ok_or_else(|| unexpected_value(11, "last_generated_at", text))?,
        ),
        None => None,
    };

    Ok(RecurringTemplate {
        template_id: row.get(0)?,
        user_id: row.get(1)?,
        description: row.get(2)?,
        amount: row.get(3)?,
        kind,
        category: row.get(5)?,
        source_wallet_id: row.get(6)?,
        target_wallet_id: row.get(7)?,
        period: Period {
            frequency,
            day_of_month: row.get(9)?,
        },
        is_active: row.get(10)?,
        last_generated_at,
    })
}

pub(crate) fn transaction_from_row(row: &Row<'_>) -> rusqlite::Result<TransactionRecord> {
    let posted_text = row.get::<_, String>(5)?;
    let posted_at =
        parse_stored_date(&posted_text).ok_or_else(|| unexpected_value(5, "posted_at", posted_text))?;
    let created_text = row.get::<_, String>(13)?;
    let created_at =
        parse_timestamp(&created_text).ok_or_else(|| unexpected_value(13, "created_at", created_text))?;

    Ok(TransactionRecord {
        txn_id: row.get(0)?,
        entry: NewTransaction {
            user_id: row.get(1)?,
            wallet_id: row.get(2)?,
            description: row.get(3)?,
            category: row.get(4)?,
            posted_at,
            income: row.get(6)?,
            outcome: row.get(7)?,
            saving: row.get(8)?,
            is_transfer: row.get(9)?,
            transfer_from_wallet_id: row.get(10)?,
            transfer_to_wallet_id: row.get(11)?,
            template_id: row.get(12)?,
        },
        created_at,
    })
}

pub(crate) fn unexpected_value(index: usize, column: &'static str, value: String) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(
        index,
        Type::Text,
        Box::new(UnexpectedColumnValue { column, value }),
    )
}

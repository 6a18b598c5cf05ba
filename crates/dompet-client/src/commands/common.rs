use std::path::Path;

use chrono::NaiveDate;

use crate::ClientResult;
use crate::contracts::types::{TemplateRow, TransactionRow, WalletRow};
use crate::dates::{format_iso_date, format_timestamp};
use crate::ledger::history::WalletSummary;
use crate::ledger::sqlite::SqliteLedgerStore;
use crate::ledger::types::{RecurringTemplate, TransactionRecord, Wallet};
use crate::recurring::schedule::next_due_date;
use crate::setup::{SetupContext, ensure_initialized, ensure_initialized_at};

pub(crate) fn load_setup(home_override: Option<&Path>) -> ClientResult<SetupContext> {
    if let Some(home) = home_override {
        return ensure_initialized_at(home);
    }
    ensure_initialized()
}

/// Initializes the ledger if needed and opens it.
pub(crate) fn open_store(home_override: Option<&Path>) -> ClientResult<SqliteLedgerStore> {
    let setup = load_setup(home_override)?;
    SqliteLedgerStore::open(&setup.db_path)
}

pub(crate) fn wallet_row(wallet: &Wallet, balance: i64, transaction_count: i64) -> WalletRow {
    WalletRow {
        wallet_id: wallet.wallet_id.clone(),
        name: wallet.name.clone(),
        balance,
        transaction_count,
        created_at: format_timestamp(&wallet.created_at),
    }
}

pub(crate) fn wallet_summary_row(summary: &WalletSummary) -> WalletRow {
    wallet_row(&summary.wallet, summary.balance, summary.transaction_count)
}

pub(crate) fn template_row(template: &RecurringTemplate, today: NaiveDate) -> TemplateRow {
    TemplateRow {
        template_id: template.template_id.clone(),
        description: template.description.clone(),
        amount: template.amount,
        kind: template.kind.as_str().to_string(),
        category: template.category.clone(),
        source_wallet_id: template.source_wallet_id.clone(),
        target_wallet_id: template.target_wallet_id.clone(),
        frequency: template.period.frequency.as_str().to_string(),
        day_of_month: template.period.day_of_month,
        is_active: template.is_active,
        last_generated_at: template.last_generated_at.as_ref().map(format_timestamp),
        next_due_at: next_due_date(template, today).as_ref().map(format_iso_date),
    }
}

pub(crate) fn transaction_row(record: &TransactionRecord) -> TransactionRow {
    let entry = &record.entry;
    TransactionRow {
        txn_id: record.txn_id.clone(),
        wallet_id: entry.wallet_id.clone(),
        posted_at: format_iso_date(&entry.posted_at),
        description: entry.description.clone(),
        category: entry.category.clone(),
        income: entry.income,
        outcome: entry.outcome,
        saving: entry.saving,
        is_transfer: entry.is_transfer,
        transfer_from_wallet_id: entry.transfer_from_wallet_id.clone(),
        transfer_to_wallet_id: entry.transfer_to_wallet_id.clone(),
        template_id: entry.template_id.clone(),
        created_at: format_timestamp(&record.created_at),
    }
}

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::NaiveDateTime;

use crate::ledger::store::{GenerationBatch, GenerationOutcome, LedgerStore};
use crate::ledger::types::{RecurringTemplate, TransactionRecord, Wallet, new_id};
use crate::{ClientError, ClientResult};

/// A [`LedgerStore`] kept entirely in memory.
///
/// Clones share the same ledger, so two processors built from clones behave
/// like two concurrent runs against one backend. Failure switches let tests
/// exercise the error paths of the processor.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLedgerStore {
    state: Arc<Mutex<MemoryState>>,
}

#[derive(Debug, Default)]
struct MemoryState {
    wallets: Vec<Wallet>,
    templates: Vec<RecurringTemplate>,
    transactions: Vec<TransactionRecord>,
    fail_listing: bool,
    failing_templates: HashSet<String>,
    fail_on_entry: Option<usize>,
}

impl InMemoryLedgerStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_wallet(&self, wallet_id: &str, user_id: &str, name: &str) -> Wallet {
        let wallet = Wallet {
            wallet_id: wallet_id.to_string(),
            user_id: user_id.to_string(),
            name: name.to_string(),
            created_at: NaiveDateTime::default(),
        };
        self.lock().wallets.push(wallet.clone());
        wallet
    }

    pub fn add_template(&self, template: RecurringTemplate) {
        self.lock().templates.push(template);
    }

    pub fn template(&self, template_id: &str) -> Option<RecurringTemplate> {
        self.lock()
            .templates
            .iter()
            .find(|template| template.template_id == template_id)
            .cloned()
    }

    pub fn transactions(&self) -> Vec<TransactionRecord> {
        self.lock().transactions.clone()
    }

    pub fn balance(&self, wallet_id: &str) -> i64 {
        self.lock()
            .transactions
            .iter()
            .filter(|record| record.entry.wallet_id == wallet_id)
            .map(|record| record.entry.balance_effect())
            .sum()
    }

    /// Makes `list_active_templates` fail until cleared.
    pub fn fail_listing(&self, enabled: bool) {
        self.lock().fail_listing = enabled;
    }

    /// Rejects every generation batch for `template_id` until cleared.
    pub fn fail_generation_for(&self, template_id: &str) {
        self.lock()
            .failing_templates
            .insert(template_id.to_string());
    }

    /// Rejects any batch that reaches its entry at `index`, after the earlier
    /// entries of that batch were staged.
    pub fn fail_on_entry(&self, index: usize) {
        self.lock().fail_on_entry = Some(index);
    }

    pub fn clear_failures(&self) {
        let mut state = self.lock();
        state.fail_listing = false;
        state.failing_templates.clear();
        state.fail_on_entry = None;
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl LedgerStore for InMemoryLedgerStore {
    fn list_active_templates(&self, user_id: &str) -> ClientResult<Vec<RecurringTemplate>> {
        let state = self.lock();
        if state.fail_listing {
            return Err(ClientError::store_read_failed("template listing is unavailable"));
        }

        Ok(state
            .templates
            .iter()
            .filter(|template| template.user_id == user_id && template.is_active)
            .cloned()
            .collect())
    }

    fn find_template(&self, template_id: &str) -> ClientResult<Option<RecurringTemplate>> {
        Ok(self.template(template_id))
    }

    fn wallet_names(&self, wallet_ids: &[&str]) -> ClientResult<HashMap<String, String>> {
        Ok(self
            .lock()
            .wallets
            .iter()
            .filter(|wallet| wallet_ids.contains(&wallet.wallet_id.as_str()))
            .map(|wallet| (wallet.wallet_id.clone(), wallet.name.clone()))
            .collect())
    }

    fn record_generation(&mut self, batch: &GenerationBatch) -> ClientResult<GenerationOutcome> {
        let mut state = self.lock();
        if state.failing_templates.contains(&batch.template_id) {
            return Err(ClientError::store_write_failed(&format!(
                "batch for `{}` was rejected",
                batch.template_id
            )));
        }

        let Some(position) = state
            .templates
            .iter()
            .position(|template| template.template_id == batch.template_id)
        else {
            return Err(ClientError::template_not_found(&batch.template_id));
        };
        if state.templates[position].last_generated_at != batch.expected_last_generated_at {
            return Ok(GenerationOutcome::AlreadyGenerated);
        }

        let mut staged = Vec::with_capacity(batch.entries.len());
        for (index, entry) in batch.entries.iter().enumerate() {
            if state.fail_on_entry == Some(index) {
                return Err(ClientError::store_write_failed(&format!(
                    "entry {index} of `{}` was rejected",
                    batch.template_id
                )));
            }
            staged.push(TransactionRecord {
                txn_id: new_id("txn"),
                entry: entry.clone(),
                created_at: batch.generated_at,
            });
        }

        let transaction_ids = staged
            .iter()
            .map(|record| record.txn_id.clone())
            .collect::<Vec<String>>();
        state.transactions.extend(staged);
        let marker = &mut state.templates[position].last_generated_at;
        *marker = Some(marker.map_or(batch.generated_at, |last| last.max(batch.generated_at)));

        Ok(GenerationOutcome::Recorded { transaction_ids })
    }
}

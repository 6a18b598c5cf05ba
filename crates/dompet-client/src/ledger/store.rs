use std::collections::HashMap;

use chrono::NaiveDateTime;

use crate::ClientResult;
use crate::ledger::types::{NewTransaction, RecurringTemplate};

/// Everything one template materialization writes.
///
/// Stores apply a batch atomically: either every entry is appended and the
/// template's `last_generated_at` moves to `generated_at`, or nothing changes.
/// A `generated_at` older than the stored marker leaves the marker where it is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationBatch {
    pub template_id: String,
    /// The marker value the caller read. The batch is rejected if the stored
    /// marker no longer matches.
    pub expected_last_generated_at: Option<NaiveDateTime>,
    pub generated_at: NaiveDateTime,
    pub entries: Vec<NewTransaction>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutcome {
    Recorded { transaction_ids: Vec<String> },
    /// Another run advanced the marker first; nothing was written.
    AlreadyGenerated,
}

/// Persistence the recurring processor depends on.
pub trait LedgerStore {
    /// Active templates owned by `user_id`, in a stable order.
    fn list_active_templates(&self, user_id: &str) -> ClientResult<Vec<RecurringTemplate>>;

    fn find_template(&self, template_id: &str) -> ClientResult<Option<RecurringTemplate>>;

    /// Names for the wallets that exist among `wallet_ids`. Unknown ids are left out.
    fn wallet_names(&self, wallet_ids: &[&str]) -> ClientResult<HashMap<String, String>>;

    /// Appends `batch.entries` and advances the template marker, conditional
    /// on `batch.expected_last_generated_at`.
    fn record_generation(&mut self, batch: &GenerationBatch) -> ClientResult<GenerationOutcome>;
}

impl<S: LedgerStore + ?Sized> LedgerStore for &mut S {
    fn list_active_templates(&self, user_id: &str) -> ClientResult<Vec<RecurringTemplate>> {
        (**self).list_active_templates(user_id)
    }

    fn find_template(&self, template_id: &str) -> ClientResult<Option<RecurringTemplate>> {
        (**self).find_template(template_id)
    }

    fn wallet_names(&self, wallet_ids: &[&str]) -> ClientResult<HashMap<String, String>> {
        (**self).wallet_names(wallet_ids)
    }

    fn record_generation(&mut self, batch: &GenerationBatch) -> ClientResult<GenerationOutcome> {
        (**self).record_generation(batch)
    }
}

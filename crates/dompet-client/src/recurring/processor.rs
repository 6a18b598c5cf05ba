use std::collections::HashMap;

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::ledger::store::{GenerationBatch, GenerationOutcome, LedgerStore};
use crate::ledger::types::{RecurringTemplate, TemplateKind};
use crate::recurring::schedule::is_due;
use crate::recurring::synthesis::{build_entries, validate_template};
use crate::{ClientError, ClientResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateFailure {
    pub template: String,
    pub error: String,
}

/// Outcome of one processor run. Entries are template descriptions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProcessResult {
    pub processed: Vec<String>,
    pub errors: Vec<TemplateFailure>,
    /// Templates another run generated first.
    pub skipped: Vec<String>,
}

/// Turns due recurring templates into ledger transactions.
pub struct RecurringProcessor<S> {
    store: S,
}

impl<S: LedgerStore> RecurringProcessor<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Materializes every active template of `user_id` that is due at `as_of`.
    ///
    /// A template that fails is reported in [`ProcessResult::errors`] and the
    /// run moves on; only failing to list the templates aborts the run.
    pub fn process_due_templates(
        &mut self,
        user_id: &str,
        as_of: NaiveDateTime,
    ) -> ClientResult<ProcessResult> {
        let templates = self.store.list_active_templates(user_id).map_err(|error| {
            tracing::warn!(user_id, code = %error.code, "could not list recurring templates");
            error
        })?;

        let mut result = ProcessResult::default();
        for template in templates.iter().filter(|template| is_due(template, as_of)) {
            self.materialize(template, as_of, &mut result);
        }

        tracing::info!(
            user_id,
            %as_of,
            scanned = templates.len(),
            processed = result.processed.len(),
            failed = result.errors.len(),
            skipped = result.skipped.len(),
            "recurring run finished"
        );
        Ok(result)
    }

    /// Materializes one template right away, whatever its schedule or
    /// paused state says.
    pub fn generate_now(&mut self, template_id: &str, at: NaiveDateTime) -> ClientResult<ProcessResult> {
        let template = self
            .store
            .find_template(template_id)?
            .ok_or_else(|| ClientError::template_not_found(template_id))?;

        let mut result = ProcessResult::default();
        self.materialize(&template, at, &mut result);
        Ok(result)
    }

    fn materialize(&mut self, template: &RecurringTemplate, as_of: NaiveDateTime, result: &mut ProcessResult) {
        let label = template.label().to_string();

        if let Err(problem) = validate_template(template) {
            tracing::warn!(template_id = %template.template_id, %problem, "template is misconfigured");
            result.errors.push(TemplateFailure {
                template: label,
                error: problem.to_string(),
            });
            return;
        }

        let names = self.transfer_wallet_names(template);
        let batch = GenerationBatch {
            template_id: template.template_id.clone(),
            expected_last_generated_at: template.last_generated_at,
            generated_at: as_of,
            entries: build_entries(template, &names, as_of.date()),
        };

        match self.store.record_generation(&batch) {
            Ok(GenerationOutcome::Recorded { transaction_ids }) => {
                tracing::info!(
                    template_id = %template.template_id,
                    transactions = transaction_ids.len(),
                    "generated recurring transactions"
                );
                result.processed.push(label);
            }
            Ok(GenerationOutcome::AlreadyGenerated) => {
                tracing::info!(template_id = %template.template_id, "already generated by another run");
                result.skipped.push(label);
            }
            Err(error) => {
                tracing::warn!(
                    template_id = %template.template_id,
                    code = %error.code,
                    "failed to record recurring transactions"
                );
                result.errors.push(TemplateFailure {
                    template: label,
                    error: error.message,
                });
            }
        }
    }

    fn transfer_wallet_names(&self, template: &RecurringTemplate) -> HashMap<String, String> {
        if template.kind != TemplateKind::Transfer {
            return HashMap::new();
        }

        let mut wallet_ids = vec![template.source_wallet_id.as_str()];
        wallet_ids.extend(template.target_wallet_id.as_deref());
        match self.store.wallet_names(&wallet_ids) {
            Ok(names) => names,
            Err(error) => {
                tracing::warn!(
                    template_id = %template.template_id,
                    code = %error.code,
                    "wallet name lookup failed; using placeholder names"
                );
                HashMap::new()
            }
        }
    }
}

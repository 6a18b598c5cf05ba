use std::path::Path;

use chrono::NaiveDateTime;

use crate::commands::common::open_store;
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::RecurringRunData;
use crate::dates::{format_timestamp, local_now};
use crate::ledger::LedgerStore;
use crate::recurring::{ProcessResult, RecurringProcessor};
use crate::{ClientError, ClientResult};

#[derive(Debug, Default)]
pub struct RecurringProcessOptions<'a> {
    pub user_id: String,
    /// Run date; defaults to the local wall clock.
    pub as_of: Option<NaiveDateTime>,
    pub home_override: Option<&'a Path>,
}

#[derive(Debug, Default)]
pub struct RecurringGenerateOptions<'a> {
    pub user_id: String,
    pub template_id: String,
    pub at: Option<NaiveDateTime>,
    pub home_override: Option<&'a Path>,
}

pub fn process(user_id: &str, as_of: Option<NaiveDateTime>) -> ClientResult<SuccessEnvelope> {
    process_with_options(RecurringProcessOptions {
        user_id: user_id.to_string(),
        as_of,
        home_override: None,
    })
}

#[doc(hidden)]
pub fn process_with_options(options: RecurringProcessOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let as_of = options.as_of.unwrap_or_else(local_now);
    let mut processor = RecurringProcessor::new(open_store(options.home_override)?);
    let result = processor.process_due_templates(&options.user_id, as_of)?;

    success(
        "recurring run",
        run_data("due", Some(options.user_id), None, as_of, result),
    )
}

pub fn generate(
    user_id: &str,
    template_id: &str,
    at: Option<NaiveDateTime>,
) -> ClientResult<SuccessEnvelope> {
    generate_with_options(RecurringGenerateOptions {
        user_id: user_id.to_string(),
        template_id: template_id.to_string(),
        at,
        home_override: None,
    })
}

#[doc(hidden)]
pub fn generate_with_options(options: RecurringGenerateOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let at = options.at.unwrap_or_else(local_now);
    let store = open_store(options.home_override)?;
    let owned = store
        .find_template(&options.template_id)?
        .is_some_and(|template| template.user_id == options.user_id);
    if !owned {
        return Err(ClientError::template_not_found(&options.template_id));
    }

    let mut processor = RecurringProcessor::new(store);
    let result = processor.generate_now(&options.template_id, at)?;

    success(
        "recurring generate",
        run_data(
            "manual",
            Some(options.user_id),
            Some(options.template_id),
            at,
            result,
        ),
    )
}

fn run_data(
    mode: &str,
    user_id: Option<String>,
    template_id: Option<String>,
    as_of: NaiveDateTime,
    result: ProcessResult,
) -> RecurringRunData {
    RecurringRunData {
        mode: mode.to_string(),
        user_id,
        template_id,
        as_of: format_timestamp(&as_of),
        processed: result.processed,
        skipped: result.skipped,
        errors: result.errors,
    }
}

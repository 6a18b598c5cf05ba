use std::path::Path;

use chrono::NaiveDate;

use crate::commands::common::{open_store, template_row};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{TemplateListData, TemplateRow};
use crate::dates::{format_iso_date, local_now};
use crate::ledger::catalog::TemplateDraft;
use crate::ledger::types::{Frequency, Period, TemplateKind};
use crate::{ClientError, ClientResult};

const ADD_COMMAND: &str = "template add";
const DEFAULT_CATEGORY: &str = "Uncategorized";
const TRANSFER_CATEGORY: &str = "Transfer";

#[derive(Debug, Default)]
pub struct TemplateCreateOptions<'a> {
    pub user_id: String,
    pub description: String,
    pub amount: i64,
    pub kind: String,
    pub category: Option<String>,
    pub source_wallet_id: String,
    pub target_wallet_id: Option<String>,
    pub frequency: String,
    /// Required for monthly templates; weekly ones default to 1.
    pub day_of_month: Option<u32>,
    pub home_override: Option<&'a Path>,
}

#[derive(Debug, Default)]
pub struct TemplateListOptions<'a> {
    pub user_id: String,
    /// Reference date for `next_due_at`; defaults to today.
    pub as_of: Option<NaiveDate>,
    pub home_override: Option<&'a Path>,
}

#[derive(Debug, Default)]
pub struct TemplateStateOptions<'a> {
    pub user_id: String,
    pub template_id: String,
    pub is_active: bool,
    pub home_override: Option<&'a Path>,
}

#[doc(hidden)]
pub fn create_with_options(options: TemplateCreateOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let kind = TemplateKind::parse(&options.kind).ok_or_else(|| {
        ClientError::invalid_argument_for_command(
            &format!(
                "Unknown template kind `{}`; expected income, outcome, saving or transfer.",
                options.kind
            ),
            Some(ADD_COMMAND),
        )
    })?;
    let frequency = Frequency::parse(&options.frequency).ok_or_else(|| {
        ClientError::invalid_argument_for_command(
            &format!(
                "Unknown frequency `{}`; expected monthly or weekly.",
                options.frequency
            ),
            Some(ADD_COMMAND),
        )
    })?;
    let period = match (frequency, options.day_of_month) {
        (Frequency::Monthly, Some(day)) => Period::monthly(day),
        (Frequency::Monthly, None) => {
            return Err(ClientError::invalid_argument_for_command(
                "Monthly templates need a day of month.",
                Some(ADD_COMMAND),
            ));
        }
        (Frequency::Weekly, day) => Period::weekly(day.unwrap_or(1)),
    };
    let category = options
        .category
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| match kind {
            TemplateKind::Transfer => TRANSFER_CATEGORY.to_string(),
            _ => DEFAULT_CATEGORY.to_string(),
        });

    let store = open_store(options.home_override)?;
    let template = store.create_template(TemplateDraft {
        user_id: options.user_id,
        description: options.description,
        amount: options.amount,
        kind,
        category,
        source_wallet_id: options.source_wallet_id,
        target_wallet_id: options.target_wallet_id,
        period,
    })?;

    success(ADD_COMMAND, template_row(&template, local_now().date()))
}

pub fn list(user_id: &str) -> ClientResult<SuccessEnvelope> {
    list_with_options(TemplateListOptions {
        user_id: user_id.to_string(),
        as_of: None,
        home_override: None,
    })
}

#[doc(hidden)]
pub fn list_with_options(options: TemplateListOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let today = options.as_of.unwrap_or_else(|| local_now().date());
    let store = open_store(options.home_override)?;
    let rows = store
        .list_templates(&options.user_id)?
        .iter()
        .map(|template| template_row(template, today))
        .collect::<Vec<TemplateRow>>();

    success(
        "template list",
        TemplateListData {
            user_id: options.user_id,
            as_of: format_iso_date(&today),
            rows,
        },
    )
}

pub fn set_active(user_id: &str, template_id: &str, is_active: bool) -> ClientResult<SuccessEnvelope> {
    set_active_with_options(TemplateStateOptions {
        user_id: user_id.to_string(),
        template_id: template_id.to_string(),
        is_active,
        home_override: None,
    })
}

#[doc(hidden)]
pub fn set_active_with_options(options: TemplateStateOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let store = open_store(options.home_override)?;
    let template = store.set_template_active(&options.user_id, &options.template_id, options.is_active)?;
    let command = if options.is_active {
        "template resume"
    } else {
        "template pause"
    };
    success(command, template_row(&template, local_now().date()))
}

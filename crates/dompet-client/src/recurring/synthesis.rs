use std::collections::HashMap;

use chrono::NaiveDate;
use thiserror::Error;

use crate::ledger::types::{Frequency, NewTransaction, RecurringTemplate, TemplateKind};

pub const TRANSFER_OUT_CATEGORY: &str = "Transfer Keluar";
pub const TRANSFER_IN_CATEGORY: &str = "Transfer Masuk";
pub const UNKNOWN_WALLET_NAME: &str = "Unknown wallet";
pub const AUTO_PREFIX: &str = "[AUTO]";

/// A template configuration that can never be materialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TemplateProblem {
    #[error("Missing target wallet")]
    MissingTargetWallet,
    #[error("Target wallet must differ from source wallet")]
    SameSourceAndTarget,
    #[error("Amount must be positive")]
    NonPositiveAmount,
    #[error("Day of month must be between 1 and 31")]
    DayOutOfRange,
}

pub fn validate_template(template: &RecurringTemplate) -> Result<(), TemplateProblem> {
    if template.kind == TemplateKind::Transfer {
        match template.target_wallet_id.as_deref() {
            None | Some("") => return Err(TemplateProblem::MissingTargetWallet),
            Some(target) if target == template.source_wallet_id => {
                return Err(TemplateProblem::SameSourceAndTarget);
            }
            Some(_) => {}
        }
    }
    if template.amount <= 0 {
        return Err(TemplateProblem::NonPositiveAmount);
    }
    if template.period.frequency == Frequency::Monthly
        && !(1..=31).contains(&template.period.day_of_month)
    {
        return Err(TemplateProblem::DayOutOfRange);
    }
    Ok(())
}

/// The ledger rows one materialization of a validated `template` produces.
///
/// Transfers yield a withdrawal from the source wallet followed by a
/// deposit into the target. `wallet_names` only needs to cover the two
/// transfer wallets; missing names fall back to [`UNKNOWN_WALLET_NAME`].
pub fn build_entries(
    template: &RecurringTemplate,
    wallet_names: &HashMap<String, String>,
    posted_at: NaiveDate,
) -> Vec<NewTransaction> {
    let base = NewTransaction {
        user_id: template.user_id.clone(),
        wallet_id: template.source_wallet_id.clone(),
        description: format!("{AUTO_PREFIX} {}", template.description),
        category: template.category.clone(),
        posted_at,
        income: 0,
        outcome: 0,
        saving: 0,
        is_transfer: false,
        transfer_from_wallet_id: None,
        transfer_to_wallet_id: None,
        template_id: Some(template.template_id.clone()),
    };

    match template.kind {
        TemplateKind::Income => vec![NewTransaction {
            income: template.amount,
            ..base
        }],
        TemplateKind::Outcome => vec![NewTransaction {
            outcome: template.amount,
            ..base
        }],
        TemplateKind::Saving => vec![NewTransaction {
            saving: template.amount,
            ..base
        }],
        TemplateKind::Transfer => {
            let source = template.source_wallet_id.clone();
            let target = template.target_wallet_id.clone().unwrap_or_default();
            let name_of = |wallet_id: &str| {
                wallet_names
                    .get(wallet_id)
                    .map(String::as_str)
                    .unwrap_or(UNKNOWN_WALLET_NAME)
                    .to_string()
            };

            let withdrawal = NewTransaction {
                description: format!("{AUTO_PREFIX} Transfer ke {}", name_of(&target)),
                category: TRANSFER_OUT_CATEGORY.to_string(),
                outcome: template.amount,
                is_transfer: true,
                transfer_from_wallet_id: Some(source.clone()),
                transfer_to_wallet_id: Some(target.clone()),
                ..base.clone()
            };
            let deposit = NewTransaction {
                wallet_id: target.clone(),
                description: format!("{AUTO_PREFIX} Transfer dari {}", name_of(&source)),
                category: TRANSFER_IN_CATEGORY.to_string(),
                income: template.amount,
                is_transfer: true,
                transfer_from_wallet_id: Some(source),
                transfer_to_wallet_id: Some(target),
                ..base
            };
            vec![withdrawal, deposit]
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use chrono::NaiveDate;

    use super::{
        TRANSFER_IN_CATEGORY, TRANSFER_OUT_CATEGORY, TemplateProblem, build_entries,
        validate_template,
    };
    use crate::ledger::types::{Period, RecurringTemplate, TemplateKind};

    fn posted() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap_or_default()
    }

    fn template(kind: TemplateKind) -> RecurringTemplate {
        RecurringTemplate {
            template_id: "tpl_1".to_string(),
            user_id: "u1".to_string(),
            description: "Salary".to_string(),
            amount: 5_000_000,
            kind,
            category: "Work".to_string(),
            source_wallet_id: "wal_a".to_string(),
            target_wallet_id: None,
            period: Period::monthly(15),
            is_active: true,
            last_generated_at: None,
        }
    }

    fn transfer() -> RecurringTemplate {
        RecurringTemplate {
            description: "Move to savings".to_string(),
            amount: 100_000,
            target_wallet_id: Some("wal_b".to_string()),
            ..template(TemplateKind::Transfer)
        }
    }

    #[test]
    fn simple_kinds_fill_exactly_one_amount_field() {
        for kind in [TemplateKind::Income, TemplateKind::Outcome, TemplateKind::Saving] {
            let entries = build_entries(&template(kind), &HashMap::new(), posted());
            assert_eq!(entries.len(), 1);
            let entry = &entries[0];
            let filled = [entry.income, entry.outcome, entry.saving];
            assert_eq!(filled.iter().filter(|value| **value != 0).count(), 1);
            assert_eq!(filled.iter().sum::<i64>(), 5_000_000);
            assert_eq!(entry.description, "[AUTO] Salary");
            assert_eq!(entry.category, "Work");
            assert_eq!(entry.wallet_id, "wal_a");
            assert!(!entry.is_transfer);
            assert_eq!(entry.transfer_from_wallet_id, None);
            assert_eq!(entry.template_id.as_deref(), Some("tpl_1"));
        }

        let saving = build_entries(&template(TemplateKind::Saving), &HashMap::new(), posted());
        assert_eq!(saving[0].saving, 5_000_000);
    }

    #[test]
    fn transfer_produces_a_linked_withdrawal_and_deposit() {
        let names = HashMap::from([
            ("wal_a".to_string(), "BCA".to_string()),
            ("wal_b".to_string(), "Savings".to_string()),
        ]);
        let entries = build_entries(&transfer(), &names, posted());
        assert_eq!(entries.len(), 2);

        let withdrawal = &entries[0];
        assert_eq!(withdrawal.wallet_id, "wal_a");
        assert_eq!(withdrawal.outcome, 100_000);
        assert_eq!(withdrawal.income, 0);
        assert_eq!(withdrawal.category, TRANSFER_OUT_CATEGORY);
        assert_eq!(withdrawal.description, "[AUTO] Transfer ke Savings");

        let deposit = &entries[1];
        assert_eq!(deposit.wallet_id, "wal_b");
        assert_eq!(deposit.income, 100_000);
        assert_eq!(deposit.outcome, 0);
        assert_eq!(deposit.category, TRANSFER_IN_CATEGORY);
        assert_eq!(deposit.description, "[AUTO] Transfer dari BCA");

        for entry in &entries {
            assert!(entry.is_transfer);
            assert_eq!(entry.transfer_from_wallet_id.as_deref(), Some("wal_a"));
            assert_eq!(entry.transfer_to_wallet_id.as_deref(), Some("wal_b"));
            assert_eq!(entry.posted_at, posted());
        }
    }

    #[test]
    fn unknown_wallet_names_use_the_placeholder() {
        let entries = build_entries(&transfer(), &HashMap::new(), posted());
        assert_eq!(entries[0].description, "[AUTO] Transfer ke Unknown wallet");
        assert_eq!(entries[1].description, "[AUTO] Transfer dari Unknown wallet");
    }

    #[test]
    fn transfer_configuration_problems_are_reported() {
        let mut missing = transfer();
        missing.target_wallet_id = None;
        assert_eq!(validate_template(&missing), Err(TemplateProblem::MissingTargetWallet));
        assert_eq!(
            TemplateProblem::MissingTargetWallet.to_string(),
            "Missing target wallet"
        );

        let mut same = transfer();
        same.target_wallet_id = Some("wal_a".to_string());
        assert_eq!(validate_template(&same), Err(TemplateProblem::SameSourceAndTarget));

        assert_eq!(validate_template(&transfer()), Ok(()));
    }

    #[test]
    fn amount_and_day_are_range_checked() {
        let mut zero = template(TemplateKind::Income);
        zero.amount = 0;
        assert_eq!(validate_template(&zero), Err(TemplateProblem::NonPositiveAmount));

        let mut day = template(TemplateKind::Income);
        day.period = Period::monthly(32);
        assert_eq!(validate_template(&day), Err(TemplateProblem::DayOutOfRange));

        day.period = Period::weekly(32);
        assert_eq!(validate_template(&day), Ok(()));
    }
}

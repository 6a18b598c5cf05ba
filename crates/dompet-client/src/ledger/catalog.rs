use rusqlite::{OptionalExtension, params};

use crate::dates::{format_timestamp, local_now, parse_timestamp};
use crate::ledger::sqlite::{SqliteLedgerStore, TEMPLATE_COLUMNS, template_from_row, unexpected_value};
use crate::ledger::types::{Period, RecurringTemplate, TemplateKind, Wallet, new_id};
use crate::recurring::synthesis::validate_template;
use crate::{ClientError, ClientResult};

/// Fields a user supplies when saving a new recurring template.
#[derive(Debug, Clone)]
pub struct TemplateDraft {
    pub user_id: String,
    pub description: String,
    pub amount: i64,
    pub kind: TemplateKind,
    pub category: String,
    pub source_wallet_id: String,
    pub target_wallet_id: Option<String>,
    pub period: Period,
}

impl SqliteLedgerStore {
    pub fn create_wallet(&self, user_id: &str, name: &str) -> ClientResult<Wallet> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ClientError::invalid_argument_for_command(
                "Wallet name cannot be empty.",
                Some("wallet add"),
            ));
        }

        let duplicate = self
            .connection
            .query_row(
                "SELECT 1 FROM wallets WHERE user_id = ?1 AND name = ?2 COLLATE NOCASE LIMIT 1",
                params![user_id, name],
                |_row| Ok(true),
            )
            .optional()
            .map_err(|error| self.read_error(&error))?
            .unwrap_or(false);
        if duplicate {
            return Err(ClientError::duplicate_wallet_name(name));
        }

        let wallet = Wallet {
            wallet_id: new_id("wal"),
            user_id: user_id.to_string(),
            name: name.to_string(),
            created_at: local_now(),
        };
        self.connection
            .execute(
                "INSERT INTO wallets (wallet_id, user_id, name, created_at) VALUES (?1, ?2, ?3, ?4)",
                params![
                    &wallet.wallet_id,
                    &wallet.user_id,
                    &wallet.name,
                    format_timestamp(&wallet.created_at)
                ],
            )
            .map_err(|error| self.write_error(&error))?;

        tracing::info!(wallet_id = %wallet.wallet_id, "created wallet");
        Ok(wallet)
    }

    /// The wallet, if it exists and belongs to `user_id`.
    pub fn find_wallet(&self, user_id: &str, wallet_id: &str) -> ClientResult<Option<Wallet>> {
        self.connection
            .query_row(
                "SELECT wallet_id, user_id, name, created_at FROM wallets
                 WHERE wallet_id = ?1 AND user_id = ?2",
                params![wallet_id, user_id],
                |row| {
                    let created_text = row.get::<_, String>(3)?;
                    let created_at = parse_timestamp(&created_text)
                        .ok_or_else(|| unexpected_value(3, "created_at", created_text))?;
                    Ok(Wallet {
                        wallet_id: row.get(0)?,
                        user_id: row.get(1)?,
                        name: row.get(2)?,
                        created_at,
                    })
                },
            )
            .optional()
            .map_err(|error| self.read_error(&error))
    }

    pub fn create_template(&self, draft: TemplateDraft) -> ClientResult<RecurringTemplate> {
        let target_wallet_id = match draft.kind {
            TemplateKind::Transfer => draft.target_wallet_id,
            _ => None,
        };
        let template = RecurringTemplate {
            template_id: new_id("tpl"),
            user_id: draft.user_id,
            description: draft.description.trim().to_string(),
            amount: draft.amount,
            kind: draft.kind,
            category: draft.category.trim().to_string(),
            source_wallet_id: draft.source_wallet_id,
            target_wallet_id,
            period: draft.period,
            is_active: true,
            last_generated_at: None,
        };

        if template.description.is_empty() {
            return Err(ClientError::invalid_argument_for_command(
                "Template description cannot be empty.",
                Some("template add"),
            ));
        }
        validate_template(&template).map_err(|problem| {
            ClientError::invalid_argument_for_command(&problem.to_string(), Some("template add"))
        })?;

        for wallet_id in std::iter::once(&template.source_wallet_id).chain(&template.target_wallet_id)
        {
            if self.find_wallet(&template.user_id, wallet_id)?.is_none() {
                return Err(ClientError::wallet_not_found(wallet_id));
            }
        }

        self.connection
            .execute(
                "INSERT INTO recurring_templates (
                    template_id,
                    user_id,
                    description,
                    amount,
                    kind,
                    category,
                    source_wallet_id,
                    target_wallet_id,
                    frequency,
                    day_of_month,
                    is_active,
                    last_generated_at,
                    created_at
                 ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, 1, NULL, ?11)",
                params![
                    &template.template_id,
                    &template.user_id,
                    &template.description,
                    template.amount,
                    template.kind.as_str(),
                    &template.category,
                    &template.source_wallet_id,
                    &template.target_wallet_id,
                    template.period.frequency.as_str(),
                    template.period.day_of_month,
                    format_timestamp(&local_now())
                ],
            )
            .map_err(|error| self.write_error(&error))?;

        tracing::info!(template_id = %template.template_id, kind = template.kind.as_str(), "created recurring template");
        Ok(template)
    }

    /// Every template owned by `user_id`, paused ones included.
    pub fn list_templates(&self, user_id: &str) -> ClientResult<Vec<RecurringTemplate>> {
        let mut statement = self
            .connection
            .prepare(&format!(
                "SELECT {TEMPLATE_COLUMNS} FROM recurring_templates
                 WHERE user_id = ?1
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

    /// Pauses or resumes a template owned by `user_id`. Templates of other
    /// users are reported as not found.
    pub fn set_template_active(
        &self,
        user_id: &str,
        template_id: &str,
        is_active: bool,
    ) -> ClientResult<RecurringTemplate> {
        let updated = self
            .connection
            .execute(
                "UPDATE recurring_templates SET is_active = ?1
                 WHERE template_id = ?2 AND user_id = ?3",
                params![is_active, template_id, user_id],
            )
            .map_err(|error| self.write_error(&error))?;
        if updated == 0 {
            return Err(ClientError::template_not_found(template_id));
        }

        tracing::info!(user_id, template_id, is_active, "changed template state");
        self.load_template(template_id)?
            .ok_or_else(|| ClientError::template_not_found(template_id))
    }
}

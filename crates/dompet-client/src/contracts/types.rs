use serde::Serialize;

use crate::recurring::TemplateFailure;

#[derive(Debug, Clone, Serialize)]
pub struct WalletRow {
    pub wallet_id: String,
    pub name: String,
    pub balance: i64,
    pub transaction_count: i64,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct WalletListData {
    pub user_id: String,
    pub total_balance: i64,
    pub rows: Vec<WalletRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TemplateRow {
    pub template_id: String,
    pub description: String,
    pub amount: i64,
    pub kind: String,
    pub category: String,
    pub source_wallet_id: String,
    pub target_wallet_id: Option<String>,
    pub frequency: String,
    pub day_of_month: u32,
    pub is_active: bool,
    pub last_generated_at: Option<String>,
    /// Only set for active templates.
    pub next_due_at: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TemplateListData {
    pub user_id: String,
    pub as_of: String,
    pub rows: Vec<TemplateRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TransactionRow {
    pub txn_id: String,
    pub wallet_id: String,
    pub posted_at: String,
    pub description: String,
    pub category: String,
    pub income: i64,
    pub outcome: i64,
    pub saving: i64,
    pub is_transfer: bool,
    pub transfer_from_wallet_id: Option<String>,
    pub transfer_to_wallet_id: Option<String>,
    pub template_id: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TransactionListData {
    pub user_id: String,
    pub wallet_id: Option<String>,
    pub returned: usize,
    pub rows: Vec<TransactionRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecurringRunData {
    /// `due` for a scheduled scan, `manual` for a single forced template.
    pub mode: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,
    pub as_of: String,
    pub processed: Vec<String>,
    pub skipped: Vec<String>,
    pub errors: Vec<TemplateFailure>,
}

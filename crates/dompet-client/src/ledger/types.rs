use chrono::{NaiveDate, NaiveDateTime};
use ulid::Ulid;

/// Which ledger column a template fills when it is materialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateKind {
    Income,
    Outcome,
    Saving,
    Transfer,
}

impl TemplateKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Outcome => "outcome",
            Self::Saving => "saving",
            Self::Transfer => "transfer",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "income" => Some(Self::Income),
            "outcome" | "expense" => Some(Self::Outcome),
            "saving" | "savings" => Some(Self::Saving),
            "transfer" => Some(Self::Transfer),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frequency {
    Monthly,
    Weekly,
}

impl Frequency {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Monthly => "monthly",
            Self::Weekly => "weekly",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "monthly" => Some(Self::Monthly),
            "weekly" => Some(Self::Weekly),
            _ => None,
        }
    }
}

/// Recurrence rule. `day_of_month` only applies to monthly templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period {
    pub frequency: Frequency,
    pub day_of_month: u32,
}

impl Period {
    pub const fn monthly(day_of_month: u32) -> Self {
        Self {
            frequency: Frequency::Monthly,
            day_of_month,
        }
    }

    pub const fn weekly(day_of_month: u32) -> Self {
        Self {
            frequency: Frequency::Weekly,
            day_of_month,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecurringTemplate {
    pub template_id: String,
    pub user_id: String,
    pub description: String,
    /// Minor currency units; always positive for a valid template.
    pub amount: i64,
    pub kind: TemplateKind,
    pub category: String,
    pub source_wallet_id: String,
    pub target_wallet_id: Option<String>,
    pub period: Period,
    pub is_active: bool,
    pub last_generated_at: Option<NaiveDateTime>,
}

impl RecurringTemplate {
    /// The label used when reporting on this template.
    pub fn label(&self) -> &str {
        &self.description
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wallet {
    pub wallet_id: String,
    pub user_id: String,
    pub name: String,
    pub created_at: NaiveDateTime,
}

/// A ledger row waiting to be appended. The store assigns its id.
///
/// Exactly one of `income`, `outcome` and `saving` is non-zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTransaction {
    pub user_id: String,
    pub wallet_id: String,
    pub description: String,
    pub category: String,
    pub posted_at: NaiveDate,
    pub income: i64,
    pub outcome: i64,
    pub saving: i64,
    pub is_transfer: bool,
    pub transfer_from_wallet_id: Option<String>,
    pub transfer_to_wallet_id: Option<String>,
    pub template_id: Option<String>,
}

impl NewTransaction {
    /// Signed effect of this row on its wallet's balance.
    pub fn balance_effect(&self) -> i64 {
        self.income - self.outcome - self.saving
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionRecord {
    pub txn_id: String,
    pub entry: NewTransaction,
    pub created_at: NaiveDateTime,
}

pub(crate) fn new_id(prefix: &str) -> String {
    format!("{prefix}_{}", Ulid::new())
}

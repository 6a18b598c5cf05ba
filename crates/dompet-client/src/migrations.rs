use rusqlite::Connection;
use rusqlite_migration::{M, Migrations};

const BOOTSTRAP_SQL: &str = include_str!("migrations/0001_bootstrap.sql");

pub const EXPECTED_USER_VERSION: i64 = 1;

const META_COLUMNS: [&str; 2] = ["key", "value"];
const WALLETS_COLUMNS: [&str; 4] = ["wallet_id", "user_id", "name", "created_at"];
const RECURRING_TEMPLATES_COLUMNS: [&str; 13] = [
    "template_id",
    "user_id",
    "description",
    "amount",
    "kind",
    "category",
    "source_wallet_id",
    "target_wallet_id",
    "frequency",
    "day_of_month",
    "is_active",
    "last_generated_at",
    "created_at",
];
const TRANSACTIONS_COLUMNS: [&str; 14] = [
    "txn_id",
    "user_id",
    "wallet_id",
    "description",
    "category",
    "posted_at",
    "income",
    "outcome",
    "saving",
    "is_transfer",
    "transfer_from_wallet_id",
    "transfer_to_wallet_id",
    "template_id",
    "created_at",
];

pub const REQUIRED_TABLES: [(&str, &[&str]); 4] = [
    ("internal_meta", &META_COLUMNS),
    ("wallets", &WALLETS_COLUMNS),
    ("recurring_templates", &RECURRING_TEMPLATES_COLUMNS),
    ("transactions", &TRANSACTIONS_COLUMNS),
];

pub const REQUIRED_INDEX_NAMES: [&str; 4] = [
    "idx_wallets_user_name",
    "idx_recurring_templates_user_active",
    "idx_transactions_wallet_posted_at",
    "idx_transactions_user_posted_at",
];

pub fn run_pending(conn: &mut Connection) -> rusqlite_migration::Result<()> {
    let migrations = Migrations::new(vec![M::up(BOOTSTRAP_SQL)]);
    migrations.to_latest(conn)
}

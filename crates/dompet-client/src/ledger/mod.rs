pub mod catalog;
pub mod history;
pub mod memory;
pub mod sqlite;
pub mod store;
pub mod types;

pub use memory::InMemoryLedgerStore;
pub use sqlite::SqliteLedgerStore;
pub use store::{GenerationBatch, GenerationOutcome, LedgerStore};

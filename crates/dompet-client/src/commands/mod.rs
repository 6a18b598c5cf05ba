pub mod common;
pub mod recurring;
pub mod templates;
pub mod transactions;
pub mod wallets;

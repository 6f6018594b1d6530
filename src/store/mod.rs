//! Ordered in-memory collection of expenses.

#[allow(clippy::module_inception)]
pub mod store;

pub use store::ExpenseStore;

#![doc(test(attr(deny(warnings))))]

//! Expense Core offers an in-memory expense record and an ordered store with
//! lookup helpers, plus the rendering configuration used to present them.

pub mod config;
pub mod domain;
pub mod errors;
pub mod store;
pub mod time;
pub mod utils;

pub use domain::expense::Expense;
pub use store::ExpenseStore;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Expense Core tracing initialized.");
    });
}

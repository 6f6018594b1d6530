pub mod common;
pub mod expense;

pub use common::{Displayable, Identifiable};
pub use expense::Expense;

//! The budget: a single amount/period pair compared against aggregated
//! expenses to flag overspending.

mod core;
mod endpoints;

pub use core::{Budget, create_budget_table, get_budget, set_budget};
pub use endpoints::{get_budget_endpoint, put_budget_endpoint};

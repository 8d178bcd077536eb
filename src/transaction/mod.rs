//! Transaction records: the data model, table, filtered queries, and the
//! endpoints for creating and listing transactions.

mod core;
mod create_endpoint;
mod filter;
mod list_endpoint;
mod query;

pub use core::{
    Account, NewTransaction, Transaction, TransactionKind, count_transactions,
    create_transaction, create_transaction_table,
};
pub use create_endpoint::create_transaction_endpoint;
pub use filter::TransactionFilter;
pub use list_endpoint::get_transactions_endpoint;
pub use query::get_transactions_matching;

use std::sync::{Arc, Mutex};

use axum::extract::FromRef;
use rusqlite::Connection;

use crate::AppState;

/// The state needed to get or create a transaction.
#[derive(Debug, Clone)]
pub struct TransactionState {
    /// The database connection for managing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for TransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

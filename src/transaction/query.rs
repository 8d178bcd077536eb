//! Database query helpers for the filtered transaction table.

use rusqlite::Connection;

use crate::Error;

use super::{
    core::{Transaction, map_transaction_row},
    filter::TransactionFilter,
};

/// Get the transactions matching `filter`, in insertion order.
///
/// A transaction matches when its kind equals the filter kind (or no kind
/// is set) and its date falls within the filter's inclusive date range,
/// open-ended on either absent bound. Dates are stored as ISO text, so the
/// range comparison works directly on the stored column.
///
/// # Errors
/// Returns [Error::SqlError] if:
/// - SQL query preparation or execution fails
/// - Transaction row mapping fails
pub fn get_transactions_matching(
    filter: &TransactionFilter,
    connection: &Connection,
) -> Result<Vec<Transaction>, Error> {
    let mut clauses = Vec::new();
    let mut params: Vec<String> = Vec::new();

    if let Some(kind) = filter.kind {
        clauses.push("kind = ?");
        params.push(kind.as_str().to_owned());
    }

    if let Some(start_date) = filter.start_date {
        clauses.push("date >= ?");
        params.push(start_date.to_string());
    }

    if let Some(end_date) = filter.end_date {
        clauses.push("date <= ?");
        params.push(end_date.to_string());
    }

    let mut query = String::from(
        "SELECT id, amount, kind, date, account, category, subcategory FROM \"transaction\"",
    );

    if !clauses.is_empty() {
        query.push_str(" WHERE ");
        query.push_str(&clauses.join(" AND "));
    }

    // Sort by ID so the table, category order, and export follow insertion order.
    query.push_str(" ORDER BY id ASC");

    connection
        .prepare(&query)?
        .query_map(rusqlite::params_from_iter(params), map_transaction_row)?
        .map(|transaction_result| transaction_result.map_err(Error::from))
        .collect()
}

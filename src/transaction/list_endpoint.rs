//! Defines the endpoint for listing the filtered transaction table.

use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
// axum_extra's Query parses an empty query parameter as None instead of
// rejecting the request like axum::extract::Query.
use axum_extra::extract::Query;

use super::{TransactionState, filter::TransactionFilter, query::get_transactions_matching};

/// A route handler returning the transactions matching the filter, in
/// insertion order.
///
/// # Panics
/// Panics if the lock for the database connection is already held by the
/// same thread.
pub async fn get_transactions_endpoint(
    State(state): State<TransactionState>,
    Query(filter): Query<TransactionFilter>,
) -> Response {
    let connection = state.db_connection.lock().unwrap();

    match get_transactions_matching(&filter, &connection) {
        Ok(transactions) => Json(transactions).into_response(),
        Err(error) => error.into_response(),
    }
}

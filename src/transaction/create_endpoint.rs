//! Defines the endpoint for creating a new transaction.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::{
    TransactionState,
    core::{NewTransaction, create_transaction},
};

/// A route handler for creating a new transaction.
///
/// Returns the created record, including its ID, with status 201. A failed
/// insert changes nothing on the server, so the client can simply resubmit
/// the same payload.
///
/// # Panics
/// Panics if the lock for the database connection is already held by the
/// same thread.
pub async fn create_transaction_endpoint(
    State(state): State<TransactionState>,
    Json(new_transaction): Json<NewTransaction>,
) -> Response {
    let connection = state.db_connection.lock().unwrap();

    match create_transaction(new_transaction, &connection) {
        Ok(transaction) => (StatusCode::CREATED, Json(transaction)).into_response(),
        Err(error) => error.into_response(),
    }
}

//! Defines the endpoints for getting and replacing the budget.

use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};

use crate::AppState;

use super::core::{Budget, get_budget, set_budget};

/// A route handler that replaces the active budget.
///
/// # Panics
/// Panics if the lock for the database connection is already held by the
/// same thread.
pub async fn put_budget_endpoint(
    State(state): State<AppState>,
    Json(budget): Json<Budget>,
) -> Response {
    let connection = state.db_connection.lock().unwrap();

    match set_budget(&budget, &connection) {
        Ok(()) => Json(budget).into_response(),
        Err(error) => error.into_response(),
    }
}

/// A route handler returning the active budget, or 404 when none is set.
///
/// # Panics
/// Panics if the lock for the database connection is already held by the
/// same thread.
pub async fn get_budget_endpoint(State(state): State<AppState>) -> Response {
    let connection = state.db_connection.lock().unwrap();

    match get_budget(&connection) {
        Ok(budget) => Json(budget).into_response(),
        Err(error) => error.into_response(),
    }
}

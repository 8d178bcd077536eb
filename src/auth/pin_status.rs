//! Defines the endpoint for checking whether a PIN record exists.

use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::user::count_users_with_name;

use super::AuthState;

/// The body of a PIN status response.
#[derive(Debug, Serialize, Deserialize)]
pub struct PinStatusResponse {
    /// Whether at least one user record exists for the requested name.
    #[serde(rename = "pinSet")]
    pub pin_set: bool,
}

/// A route handler reporting whether a record exists for `name`.
///
/// The name is matched exactly (case-sensitive), unlike verification.
/// This only checks that a record exists, it does not prove that any PIN
/// verifies against it.
///
/// # Panics
/// Panics if the lock for the database connection is already held by the
/// same thread.
pub async fn check_pin_status_endpoint(
    State(state): State<AuthState>,
    Path(name): Path<String>,
) -> Response {
    let connection = state.db_connection.lock().unwrap();

    match count_users_with_name(name.trim(), &connection) {
        Ok(count) => Json(PinStatusResponse {
            pin_set: count > 0,
        })
        .into_response(),
        Err(error) => error.into_response(),
    }
}

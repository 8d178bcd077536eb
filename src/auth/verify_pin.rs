//! Defines the endpoint for verifying a name and PIN combination.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::{Error, user::get_users_by_name};

use super::{AuthState, Credentials};

/// The body of a successful verification response.
#[derive(Debug, Serialize, Deserialize)]
pub struct VerifyPinResponse {
    /// A human-readable confirmation.
    pub message: String,
}

/// A route handler for verifying a name and PIN.
///
/// The name is matched case-insensitively and may match several user
/// records (duplicate names are allowed at registration). The submitted
/// PIN is compared against each candidate's hash, short-circuiting on the
/// first match.
///
/// Failed verification always answers with the same generic 401 message,
/// whether the name was unknown or every hash comparison failed.
///
/// # Panics
/// Panics if the lock for the database connection is already held by the
/// same thread.
pub async fn verify_pin_endpoint(
    State(state): State<AuthState>,
    Json(credentials): Json<Credentials>,
) -> Response {
    let (name, pin) = match credentials.require_both() {
        Ok(fields) => fields,
        Err(error) => return error.into_response(),
    };

    let connection = state.db_connection.lock().unwrap();

    let candidates = match get_users_by_name(name, &connection) {
        Ok(candidates) => candidates,
        Err(error) => return error.into_response(),
    };

    for user in &candidates {
        match user.pin_hash.verify(pin) {
            Ok(true) => {
                return (
                    StatusCode::OK,
                    Json(VerifyPinResponse {
                        message: "Name and PIN verified successfully".to_owned(),
                    }),
                )
                    .into_response();
            }
            Ok(false) => continue,
            Err(error) => return Error::HashingError(error.to_string()).into_response(),
        }
    }

    // An unknown name and a wrong PIN are indistinguishable to the client.
    Error::InvalidCredentials.into_response()
}

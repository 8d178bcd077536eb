//! PIN registration, verification, and status lookup endpoints.
//!
//! There are no sessions or cookies: verification is a stateless
//! request/response exchange, and the client decides what to do with a
//! successful answer.

mod pin_status;
mod set_pin;
mod verify_pin;

pub use pin_status::check_pin_status_endpoint;
pub use set_pin::set_pin_endpoint;
pub use verify_pin::verify_pin_endpoint;

use std::sync::{Arc, Mutex};

use axum::extract::FromRef;
use rusqlite::Connection;
use serde::Deserialize;

use crate::{AppState, Error};

/// The fixed message returned for every failed verification.
///
/// The same text is used whether the name was unknown or the PIN was wrong,
/// so the response does not reveal which field failed.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid Name or PIN";

/// The state needed by the auth endpoints.
#[derive(Debug, Clone)]
pub struct AuthState {
    /// The database connection holding the user table.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The bcrypt cost used when hashing new PINs.
    pub hash_cost: u32,
}

impl FromRef<AppState> for AuthState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            hash_cost: state.hash_cost,
        }
    }
}

/// The credentials sent to the set-pin and verify-pin endpoints.
///
/// Both fields default to the empty string so that a missing field gets the
/// same "Name and PIN are required" answer as an empty one, instead of a
/// deserialization rejection.
#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    /// The name the user identifies with. Trimmed before use.
    #[serde(default)]
    pub name: String,
    /// The plaintext PIN. Never stored or logged.
    #[serde(default)]
    pub pin: String,
}

impl Credentials {
    /// Return the trimmed name and the PIN, or an error if either is empty.
    pub(crate) fn require_both(&self) -> Result<(&str, &str), Error> {
        let name = self.name.trim();

        if name.is_empty() || self.pin.is_empty() {
            return Err(Error::MissingCredentials);
        }

        Ok((name, &self.pin))
    }
}

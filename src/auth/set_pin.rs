//! Defines the endpoint for registering a name and PIN.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::{
    pin::PinHash,
    user::{User, create_user},
};

use super::{AuthState, Credentials};

/// The body of a successful set-pin response.
#[derive(Debug, Serialize, Deserialize)]
pub struct SetPinResponse {
    /// A human-readable confirmation.
    pub message: String,
    /// The created user record.
    pub user: UserSummary,
}

/// The subset of a [User] that is safe to send to the client.
#[derive(Debug, Serialize, Deserialize)]
pub struct UserSummary {
    /// The name the user registered with.
    pub name: String,
    /// Whether a PIN was recorded for this user.
    #[serde(rename = "pinSet")]
    pub pin_set: bool,
}

impl From<User> for UserSummary {
    fn from(user: User) -> Self {
        Self {
            name: user.name,
            pin_set: user.pin_set,
        }
    }
}

/// A route handler for registering a name and PIN.
///
/// The PIN is hashed with bcrypt before it is stored. A new user record is
/// inserted unconditionally: registering an existing name again creates a
/// second record for that name rather than failing, and verification will
/// accept either PIN from then on.
///
/// # Panics
/// Panics if the lock for the database connection is already held by the
/// same thread.
pub async fn set_pin_endpoint(
    State(state): State<AuthState>,
    Json(credentials): Json<Credentials>,
) -> Response {
    let (name, pin) = match credentials.require_both() {
        Ok(fields) => fields,
        Err(error) => return error.into_response(),
    };

    let pin_hash = match PinHash::from_raw_pin(pin, state.hash_cost) {
        Ok(pin_hash) => pin_hash,
        Err(error) => return error.into_response(),
    };

    let connection = state.db_connection.lock().unwrap();

    match create_user(name, pin_hash, &connection) {
        Ok(user) => (
            StatusCode::CREATED,
            Json(SetPinResponse {
                message: "Name and PIN set successfully".to_owned(),
                user: user.into(),
            }),
        )
            .into_response(),
        Err(error) => error.into_response(),
    }
}

#[cfg(test)]
mod set_pin_tests {
    use std::sync::{Arc, Mutex};

    use axum::{Router, http::StatusCode, routing::post};
    use axum_test::TestServer;
    use rusqlite::Connection;
    use serde_json::json;

    use crate::{auth::AuthState, endpoints, user::get_users_by_name};

    use super::{SetPinResponse, set_pin_endpoint};

    fn get_test_state() -> AuthState {
        let conn = Connection::open_in_memory().unwrap();
        crate::user::create_user_table(&conn).unwrap();

        AuthState {
            db_connection: Arc::new(Mutex::new(conn)),
            // The minimum bcrypt cost, to keep the tests fast.
            hash_cost: 4,
        }
    }

    fn get_test_server(state: AuthState) -> TestServer {
        let app = Router::new()
            .route(endpoints::SET_PIN, post(set_pin_endpoint))
            .with_state(state);

        TestServer::try_new(app).expect("Could not create test server.")
    }

    #[tokio::test]
    async fn set_pin_succeeds_with_valid_credentials() {
        let state = get_test_state();
        let server = get_test_server(state.clone());

        let response = server
            .post(endpoints::SET_PIN)
            .json(&json!({ "name": "Alice", "pin": "12345" }))
            .await;

        response.assert_status(StatusCode::CREATED);

        let body: SetPinResponse = response.json();
        assert_eq!(body.user.name, "Alice");
        assert!(body.user.pin_set);

        let connection = state.db_connection.lock().unwrap();
        let users = get_users_by_name("Alice", &connection).unwrap();
        assert_eq!(users.len(), 1, "want 1 user, got {}", users.len());
        assert!(
            users[0].pin_hash.verify("12345").unwrap(),
            "stored hash should verify the submitted PIN"
        );
    }

    #[tokio::test]
    async fn set_pin_trims_the_name() {
        let state = get_test_state();
        let server = get_test_server(state.clone());

        let response = server
            .post(endpoints::SET_PIN)
            .json(&json!({ "name": "  Alice ", "pin": "12345" }))
            .await;

        response.assert_status(StatusCode::CREATED);

        let body: SetPinResponse = response.json();
        assert_eq!(body.user.name, "Alice");
    }

    #[tokio::test]
    async fn set_pin_fails_with_missing_fields() {
        let server = get_test_server(get_test_state());

        for body in [
            json!({ "pin": "12345" }),
            json!({ "name": "Alice" }),
            json!({ "name": "", "pin": "12345" }),
            json!({ "name": "Alice", "pin": "" }),
        ] {
            let response = server.post(endpoints::SET_PIN).json(&body).await;

            response.assert_status(StatusCode::BAD_REQUEST);
        }
    }

    #[tokio::test]
    async fn set_pin_fails_with_wrong_pin_length() {
        let server = get_test_server(get_test_state());

        for pin in ["1234", "123456", "1"] {
            let response = server
                .post(endpoints::SET_PIN)
                .json(&json!({ "name": "Alice", "pin": pin }))
                .await;

            response.assert_status(StatusCode::BAD_REQUEST);
            let body: serde_json::Value = response.json();
            assert_eq!(body["message"], "PIN must be exactly 5 digits");
        }
    }

    #[tokio::test]
    async fn set_pin_allows_duplicate_names() {
        let state = get_test_state();
        let server = get_test_server(state.clone());

        for pin in ["11111", "22222"] {
            let response = server
                .post(endpoints::SET_PIN)
                .json(&json!({ "name": "Alice", "pin": pin }))
                .await;

            response.assert_status(StatusCode::CREATED);
        }

        let connection = state.db_connection.lock().unwrap();
        let users = get_users_by_name("Alice", &connection).unwrap();
        assert_eq!(
            users.len(),
            2,
            "registering the same name twice should create two records, got {}",
            users.len()
        );
    }
}

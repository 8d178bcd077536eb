//! Pocketwise is a web service for tracking your personal budget.
//!
//! Users identify themselves with a name and a 5-digit PIN, record income
//! and expense transactions, set a budget, and fetch aggregated dashboard
//! data and CSV exports.
//!
//! This library provides a JSON REST API backed by SQLite.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use serde_json::json;
use tokio::signal;

mod app_state;
mod auth;
mod budget;
mod dashboard;
mod database_id;
mod db;
mod endpoints;
mod export;
mod logging;
mod pin;
mod routing;
mod transaction;
mod user;

pub use app_state::AppState;
pub use db::initialize as initialize_db;
pub use logging::logging_middleware;
pub use pin::{HASH_COST, PinHash, ValidatedPin};
pub use routing::build_router;

use crate::auth::INVALID_CREDENTIALS_MESSAGE;

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The client left out the name or the PIN, or sent them empty.
    #[error("name and PIN are required")]
    MissingCredentials,

    /// The PIN was not exactly five characters long.
    ///
    /// Note that only the length is checked here, the PIN content is
    /// compared against the stored hash during verification.
    #[error("the PIN must be exactly 5 digits")]
    InvalidPinLength,

    /// The client provided a name/PIN combination that matches no user.
    ///
    /// When communicating with the client this error must be reported with
    /// a fixed, generic message so that the response does not reveal
    /// whether the name or the PIN was wrong.
    #[error("invalid name or PIN")]
    InvalidCredentials,

    /// An empty string was used for a transaction category.
    #[error("transaction category cannot be empty")]
    EmptyCategory,

    /// A negative or non-finite amount was used for a transaction or budget.
    ///
    /// Amounts record magnitudes, the direction of the money flow is
    /// carried by the transaction kind, so totals only stay meaningful if
    /// every amount is a non-negative number.
    #[error("{0} is not a valid amount, amounts must be non-negative numbers")]
    InvalidAmount(f64),

    /// An unexpected error occurred with the underlying hashing library.
    ///
    /// The error string should only be logged for debugging on the server.
    /// When communicating with the application client this error should be
    /// replaced with a general error type indicating an internal server error.
    #[error("hashing failed: {0}")]
    HashingError(String),

    /// The transaction list could not be serialized as CSV.
    #[error("could not write CSV: {0}")]
    CsvError(String),

    /// The requested resource was not found.
    ///
    /// For HTTP request handlers, the client should check that the
    /// parameters (e.g., name) are correct and that the resource has been
    /// created.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Error::MissingCredentials => {
                (StatusCode::BAD_REQUEST, "Name and PIN are required".to_owned())
            }
            Error::InvalidPinLength => (
                StatusCode::BAD_REQUEST,
                "PIN must be exactly 5 digits".to_owned(),
            ),
            Error::EmptyCategory => (StatusCode::BAD_REQUEST, "Category is required".to_owned()),
            Error::InvalidAmount(amount) => (
                StatusCode::BAD_REQUEST,
                format!("{amount} is not a valid amount"),
            ),
            Error::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                INVALID_CREDENTIALS_MESSAGE.to_owned(),
            ),
            Error::NotFound => (
                StatusCode::NOT_FOUND,
                "The requested resource could not be found".to_owned(),
            ),
            // Any errors that are not handled above are not intended to be
            // shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                (StatusCode::INTERNAL_SERVER_ERROR, "Server error".to_owned())
            }
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}

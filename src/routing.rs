//! Application router configuration.

use axum::{
    Json, Router,
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::json;

use crate::{
    AppState,
    auth::{check_pin_status_endpoint, set_pin_endpoint, verify_pin_endpoint},
    budget::{get_budget_endpoint, put_budget_endpoint},
    dashboard::get_summary_endpoint,
    endpoints,
    export::export_transactions_endpoint,
    logging::logging_middleware,
    transaction::{create_transaction_endpoint, get_transactions_endpoint},
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::SET_PIN, post(set_pin_endpoint))
        .route(endpoints::VERIFY_PIN, post(verify_pin_endpoint))
        .route(endpoints::CHECK_PIN_STATUS, get(check_pin_status_endpoint))
        .route(
            endpoints::TRANSACTIONS,
            get(get_transactions_endpoint).post(create_transaction_endpoint),
        )
        .route(
            endpoints::BUDGET,
            get(get_budget_endpoint).put(put_budget_endpoint),
        )
        .route(endpoints::SUMMARY, get(get_summary_endpoint))
        .route(endpoints::EXPORT, get(export_transactions_endpoint))
        .layer(middleware::from_fn(logging_middleware))
        .fallback(get_not_found)
        .with_state(state)
}

/// The JSON 404 response for unknown routes.
async fn get_not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "message": "Not Found" })),
    )
        .into_response()
}

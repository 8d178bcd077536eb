//! Defines the endpoint for downloading the filtered transactions as a
//! CSV report.

use axum::{
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
// axum_extra's Query parses an empty query parameter as None instead of
// rejecting the request like axum::extract::Query.
use axum_extra::extract::Query;

use crate::{
    AppState, Error,
    transaction::{Transaction, TransactionFilter, get_transactions_matching},
};

/// The file name suggested to the browser for the downloaded report.
const EXPORT_FILE_NAME: &str = "filtered_transactions.csv";

/// A route handler serving the filtered transactions as a CSV attachment.
///
/// # Panics
/// Panics if the lock for the database connection is already held by the
/// same thread.
pub async fn export_transactions_endpoint(
    State(state): State<AppState>,
    Query(filter): Query<TransactionFilter>,
) -> Response {
    let connection = state.db_connection.lock().unwrap();

    let transactions = match get_transactions_matching(&filter, &connection) {
        Ok(transactions) => transactions,
        Err(error) => return error.into_response(),
    };

    match write_csv(&transactions) {
        Ok(csv_text) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_owned()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{EXPORT_FILE_NAME}\""),
                ),
            ],
            csv_text,
        )
            .into_response(),
        Err(error) => error.into_response(),
    }
}

/// Serialize `transactions` as CSV text with the fixed column order
/// `Date,Amount,Account,Category,Subcategory`.
///
/// Free-text fields may contain commas or quotes, so records are written
/// through the csv crate, which quotes them as needed.
///
/// # Errors
/// Returns [Error::CsvError] if a record could not be written.
fn write_csv(transactions: &[Transaction]) -> Result<String, Error> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer
        .write_record(["Date", "Amount", "Account", "Category", "Subcategory"])
        .map_err(|error| Error::CsvError(error.to_string()))?;

    for transaction in transactions {
        writer
            .write_record([
                transaction.date.to_string(),
                transaction.amount.to_string(),
                transaction.account.as_str().to_owned(),
                transaction.category.clone(),
                transaction.subcategory.clone(),
            ])
            .map_err(|error| Error::CsvError(error.to_string()))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|error| Error::CsvError(error.to_string()))?;

    String::from_utf8(bytes).map_err(|error| Error::CsvError(error.to_string()))
}

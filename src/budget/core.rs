//! Defines the budget model and its database queries.

use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::Error;

/// The active budget.
///
/// There is at most one: setting a new budget replaces the previous one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    /// The spending limit.
    pub amount: f64,
    /// A label for the period the limit applies to, e.g. "monthly".
    pub period: String,
}

/// Create the budget table.
///
/// The table holds at most one row, enforced with a fixed primary key.
///
/// # Errors
/// This function will return an error if the SQL query failed.
pub fn create_budget_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS budget (
                id INTEGER PRIMARY KEY CHECK (id = 1),
                amount REAL NOT NULL,
                period TEXT NOT NULL
                )",
        (),
    )?;

    Ok(())
}

/// Insert or replace the budget.
///
/// # Errors
/// This function will return a:
/// - [Error::InvalidAmount] if the amount is negative or non-finite,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn set_budget(budget: &Budget, connection: &Connection) -> Result<(), Error> {
    if !budget.amount.is_finite() || budget.amount < 0.0 {
        return Err(Error::InvalidAmount(budget.amount));
    }

    connection.execute(
        "INSERT INTO budget (id, amount, period) VALUES (1, ?1, ?2)
         ON CONFLICT(id) DO UPDATE SET amount = excluded.amount, period = excluded.period",
        (budget.amount, &budget.period),
    )?;

    Ok(())
}

/// Get the active budget.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if no budget has been set,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn get_budget(connection: &Connection) -> Result<Budget, Error> {
    connection
        .query_row("SELECT amount, period FROM budget WHERE id = 1", [], |row| {
            Ok(Budget {
                amount: row.get(0)?,
                period: row.get(1)?,
            })
        })
        .map_err(|error| error.into())
}

//! Defines the endpoint serving the aggregated dashboard summary.

use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
// axum_extra's Query parses an empty query parameter as None instead of
// rejecting the request like axum::extract::Query.
use axum_extra::extract::Query;
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error,
    budget::{Budget, get_budget},
    transaction::{TransactionFilter, TransactionKind, get_transactions_matching},
};

use super::aggregation::{
    CategoryTotal, DayTotals, daily_totals, expense_totals_by_category, total_by_kind,
};

/// The budget compared against the filtered expense total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetStatus {
    /// The spending limit.
    pub amount: f64,
    /// The period label the limit applies to.
    pub period: String,
    /// Whether the filtered expenses exceed the limit.
    pub over_budget: bool,
    /// How far the expenses exceed the limit, zero when within budget.
    pub overspend: f64,
}

impl BudgetStatus {
    fn new(budget: Budget, total_expenses: f64) -> Self {
        Self {
            over_budget: total_expenses > budget.amount,
            overspend: (total_expenses - budget.amount).max(0.0),
            amount: budget.amount,
            period: budget.period,
        }
    }
}

/// The aggregated dashboard data for the filtered transaction list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// The summed income amounts.
    pub total_income: f64,
    /// The summed expense amounts.
    pub total_expenses: f64,
    /// `total_income - total_expenses`.
    pub net_balance: f64,
    /// Expense sums per category, in first-occurrence order.
    pub category_totals: Vec<CategoryTotal>,
    /// Income and expense sums per calendar day, ascending by date.
    pub timeline: Vec<DayTotals>,
    /// The budget status, absent when no budget is set.
    pub budget: Option<BudgetStatus>,
}

/// A route handler computing the dashboard summary for the filtered
/// transaction list.
///
/// Everything is re-derived from the database on each request; the only
/// state the dashboard has is the transaction list and the budget.
///
/// # Panics
/// Panics if the lock for the database connection is already held by the
/// same thread.
pub async fn get_summary_endpoint(
    State(state): State<AppState>,
    Query(filter): Query<TransactionFilter>,
) -> Response {
    let connection = state.db_connection.lock().unwrap();

    let transactions = match get_transactions_matching(&filter, &connection) {
        Ok(transactions) => transactions,
        Err(error) => return error.into_response(),
    };

    let total_income = total_by_kind(&transactions, TransactionKind::Income);
    let total_expenses = total_by_kind(&transactions, TransactionKind::Expense);

    let budget = match get_budget(&connection) {
        Ok(budget) => Some(BudgetStatus::new(budget, total_expenses)),
        Err(Error::NotFound) => None,
        Err(error) => return error.into_response(),
    };

    Json(Summary {
        total_income,
        total_expenses,
        net_balance: total_income - total_expenses,
        category_totals: expense_totals_by_category(&transactions),
        timeline: daily_totals(&transactions),
        budget,
    })
    .into_response()
}

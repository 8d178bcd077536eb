//! Transaction data aggregation and transformation for charts.
//!
//! Provides functions to sum transactions by kind, group expenses by
//! category, and build the per-day income/expense timeline. All of them
//! are pure: the caller fetches the filtered transaction list and every
//! derived view is recomputed from scratch.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use time::Date;

use crate::transaction::{Transaction, TransactionKind};

/// The total expense amount for one category, shaped for a pie chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    /// The category name.
    pub name: String,
    /// The summed expense amount for the category.
    pub value: f64,
}

/// The income and expense sums for one calendar day, shaped for a line
/// chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayTotals {
    /// The day the sums cover.
    pub date: Date,
    /// The summed income amounts for the day.
    pub income: f64,
    /// The summed expense amounts for the day.
    pub expenses: f64,
}

/// Sum the amounts of the transactions of `kind`.
pub(super) fn total_by_kind(transactions: &[Transaction], kind: TransactionKind) -> f64 {
    transactions
        .iter()
        .filter(|transaction| transaction.kind == kind)
        .map(|transaction| transaction.amount)
        .sum()
}

/// Sum expense amounts grouped by category.
///
/// # Returns
/// One entry per category, ordered by the category's first occurrence in
/// `transactions` so the chart legend is stable while the user adds
/// entries. The sum of all values equals the expense total.
pub(super) fn expense_totals_by_category(transactions: &[Transaction]) -> Vec<CategoryTotal> {
    let mut totals: Vec<CategoryTotal> = Vec::new();
    let mut index_by_name: HashMap<&str, usize> = HashMap::new();

    for transaction in transactions
        .iter()
        .filter(|transaction| transaction.kind == TransactionKind::Expense)
    {
        match index_by_name.get(transaction.category.as_str()) {
            Some(&index) => totals[index].value += transaction.amount,
            None => {
                index_by_name.insert(&transaction.category, totals.len());
                totals.push(CategoryTotal {
                    name: transaction.category.clone(),
                    value: transaction.amount,
                });
            }
        }
    }

    totals
}

/// Group transactions by calendar day, accumulating income and expense
/// sums per day.
///
/// # Returns
/// One entry per day that has at least one transaction, sorted ascending
/// by date.
pub(super) fn daily_totals(transactions: &[Transaction]) -> Vec<DayTotals> {
    let mut totals_by_day: HashMap<Date, DayTotals> = HashMap::new();

    for transaction in transactions {
        let day = totals_by_day
            .entry(transaction.date)
            .or_insert_with(|| DayTotals {
                date: transaction.date,
                income: 0.0,
                expenses: 0.0,
            });

        match transaction.kind {
            TransactionKind::Income => day.income += transaction.amount,
            TransactionKind::Expense => day.expenses += transaction.amount,
        }
    }

    let mut timeline: Vec<DayTotals> = totals_by_day.into_values().collect();
    timeline.sort_by_key(|day| day.date);

    timeline
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use crate::transaction::{Account, Transaction, TransactionKind};

    use super::{CategoryTotal, DayTotals, daily_totals, expense_totals_by_category, total_by_kind};

    fn create_test_transaction(
        id: i64,
        amount: f64,
        kind: TransactionKind,
        transaction_date: time::Date,
        category: &str,
    ) -> Transaction {
        Transaction {
            id,
            amount,
            kind,
            date: transaction_date,
            account: Account::Cash,
            category: category.to_owned(),
            subcategory: String::new(),
        }
    }

    /// The running example from the dashboard: one income and two food
    /// expenses across two days.
    fn sample_transactions() -> Vec<Transaction> {
        vec![
            create_test_transaction(
                1,
                100.0,
                TransactionKind::Income,
                date!(2024 - 01 - 01),
                "Salary",
            ),
            create_test_transaction(
                2,
                40.0,
                TransactionKind::Expense,
                date!(2024 - 01 - 01),
                "Food",
            ),
            create_test_transaction(
                3,
                10.0,
                TransactionKind::Expense,
                date!(2024 - 01 - 02),
                "Food",
            ),
        ]
    }

    #[test]
    fn totals_partition_by_kind() {
        let transactions = sample_transactions();

        assert_eq!(total_by_kind(&transactions, TransactionKind::Income), 100.0);
        assert_eq!(total_by_kind(&transactions, TransactionKind::Expense), 50.0);
    }

    #[test]
    fn totals_handle_empty_input() {
        assert_eq!(total_by_kind(&[], TransactionKind::Income), 0.0);
        assert_eq!(total_by_kind(&[], TransactionKind::Expense), 0.0);
    }

    #[test]
    fn category_totals_sum_expenses_only() {
        let transactions = sample_transactions();

        let result = expense_totals_by_category(&transactions);

        assert_eq!(
            result,
            vec![CategoryTotal {
                name: "Food".to_owned(),
                value: 50.0,
            }],
            "income must not appear in the category breakdown"
        );
    }

    #[test]
    fn category_totals_follow_first_occurrence_order() {
        let transactions = vec![
            create_test_transaction(
                1,
                5.0,
                TransactionKind::Expense,
                date!(2024 - 01 - 01),
                "Transport",
            ),
            create_test_transaction(
                2,
                7.0,
                TransactionKind::Expense,
                date!(2024 - 01 - 01),
                "Food",
            ),
            create_test_transaction(
                3,
                3.0,
                TransactionKind::Expense,
                date!(2024 - 01 - 02),
                "Transport",
            ),
        ];

        let result = expense_totals_by_category(&transactions);

        let names: Vec<&str> = result.iter().map(|total| total.name.as_str()).collect();
        assert_eq!(
            names,
            ["Transport", "Food"],
            "categories must keep the order they first appeared in"
        );
        assert_eq!(result[0].value, 8.0);
        assert_eq!(result[1].value, 7.0);
    }

    #[test]
    fn category_totals_sum_to_the_expense_total() {
        let transactions = sample_transactions();

        let category_sum: f64 = expense_totals_by_category(&transactions)
            .iter()
            .map(|total| total.value)
            .sum();

        assert_eq!(
            category_sum,
            total_by_kind(&transactions, TransactionKind::Expense)
        );
    }

    #[test]
    fn daily_totals_group_by_day_sorted_ascending() {
        let transactions = sample_transactions();

        let result = daily_totals(&transactions);

        assert_eq!(
            result,
            vec![
                DayTotals {
                    date: date!(2024 - 01 - 01),
                    income: 100.0,
                    expenses: 40.0,
                },
                DayTotals {
                    date: date!(2024 - 01 - 02),
                    income: 0.0,
                    expenses: 10.0,
                },
            ]
        );
    }

    #[test]
    fn daily_totals_handle_empty_input() {
        assert_eq!(daily_totals(&[]), vec![]);
    }

    #[test]
    fn daily_totals_sort_out_of_order_input() {
        let transactions = vec![
            create_test_transaction(
                1,
                1.0,
                TransactionKind::Expense,
                date!(2024 - 03 - 05),
                "Food",
            ),
            create_test_transaction(
                2,
                2.0,
                TransactionKind::Expense,
                date!(2024 - 01 - 20),
                "Food",
            ),
            create_test_transaction(
                3,
                3.0,
                TransactionKind::Expense,
                date!(2024 - 02 - 10),
                "Food",
            ),
        ];

        let result = daily_totals(&transactions);

        let dates: Vec<time::Date> = result.iter().map(|day| day.date).collect();
        assert_eq!(
            dates,
            [
                date!(2024 - 01 - 20),
                date!(2024 - 02 - 10),
                date!(2024 - 03 - 05)
            ]
        );
    }
}

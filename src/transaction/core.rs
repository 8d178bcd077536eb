//! Defines the core data models and database queries for transactions.

use rusqlite::{
    Connection, Row,
    types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef},
};
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{Error, database_id::TransactionId};

/// Whether a transaction brought money in or spent it.
///
/// Amounts are stored as non-negative magnitudes; the kind carries the
/// direction of the money flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money coming in.
    Income,
    /// Money going out.
    Expense,
}

impl TransactionKind {
    /// The kind as it appears on the wire and in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }
}

impl ToSql for TransactionKind {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(self.as_str().into())
    }
}

impl FromSql for TransactionKind {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        match value.as_str()? {
            "income" => Ok(TransactionKind::Income),
            "expense" => Ok(TransactionKind::Expense),
            _ => Err(FromSqlError::InvalidType),
        }
    }
}

/// The account a transaction was made from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Account {
    /// A regular bank account.
    #[serde(rename = "Bank Account")]
    BankAccount,
    /// A mobile money account.
    #[serde(rename = "Mobile Money Account")]
    MobileMoneyAccount,
    /// Cash on hand.
    #[serde(rename = "Cash")]
    Cash,
}

impl Account {
    /// The account name as it appears on the wire and in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Account::BankAccount => "Bank Account",
            Account::MobileMoneyAccount => "Mobile Money Account",
            Account::Cash => "Cash",
        }
    }
}

impl ToSql for Account {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(self.as_str().into())
    }
}

impl FromSql for Account {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        match value.as_str()? {
            "Bank Account" => Ok(Account::BankAccount),
            "Mobile Money Account" => Ok(Account::MobileMoneyAccount),
            "Cash" => Ok(Account::Cash),
            _ => Err(FromSqlError::InvalidType),
        }
    }
}

/// An income or expense record.
///
/// Transactions are immutable once created: there is no edit or delete
/// path, a mistake is corrected by entering a compensating transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction. IDs follow insertion order.
    pub id: TransactionId,
    /// The amount of money spent or earned in this transaction.
    pub amount: f64,
    /// Whether this transaction is income or an expense.
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    /// When the transaction happened.
    pub date: Date,
    /// The account the money moved through.
    pub account: Account,
    /// The user-chosen category, e.g. "Food".
    pub category: String,
    /// An optional finer-grained category, e.g. "Snacks".
    #[serde(default)]
    pub subcategory: String,
}

/// The data needed to create a [Transaction], as submitted by the entry
/// form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTransaction {
    /// The amount of money spent or earned.
    pub amount: f64,
    /// Whether this transaction is income or an expense.
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    /// When the transaction happened.
    pub date: Date,
    /// The account the money moved through.
    pub account: Account,
    /// The user-chosen category.
    pub category: String,
    /// An optional finer-grained category.
    #[serde(default)]
    pub subcategory: String,
}

impl NewTransaction {
    /// Check the invariants the aggregation layer depends on.
    ///
    /// # Errors
    /// Returns [Error::EmptyCategory] for a blank category and
    /// [Error::InvalidAmount] for a negative or non-finite amount.
    fn validate(&self) -> Result<(), Error> {
        if self.category.trim().is_empty() {
            return Err(Error::EmptyCategory);
        }

        if !self.amount.is_finite() || self.amount < 0.0 {
            return Err(Error::InvalidAmount(self.amount));
        }

        Ok(())
    }
}

/// Create a new transaction in the database.
///
/// # Errors
/// This function will return a:
/// - [Error::EmptyCategory] if the category is blank,
/// - [Error::InvalidAmount] if the amount is negative or non-finite,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn create_transaction(
    new_transaction: NewTransaction,
    connection: &Connection,
) -> Result<Transaction, Error> {
    new_transaction.validate()?;

    let transaction = connection
        .prepare(
            "INSERT INTO \"transaction\" (amount, kind, date, account, category, subcategory)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             RETURNING id, amount, kind, date, account, category, subcategory",
        )?
        .query_row(
            (
                new_transaction.amount,
                new_transaction.kind,
                new_transaction.date,
                new_transaction.account,
                new_transaction.category,
                new_transaction.subcategory,
            ),
            map_transaction_row,
        )?;

    Ok(transaction)
}

/// Get the total number of transactions in the database.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error.
pub fn count_transactions(connection: &Connection) -> Result<u32, Error> {
    connection
        .query_row("SELECT COUNT(id) FROM \"transaction\";", [], |row| {
            row.get(0)
        })
        .map_err(|error| error.into())
}

/// Create the transaction table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                amount REAL NOT NULL,
                kind TEXT NOT NULL,
                date TEXT NOT NULL,
                account TEXT NOT NULL,
                category TEXT NOT NULL,
                subcategory TEXT NOT NULL
                )",
        (),
    )?;

    // Composite index used by the filtered table, summary, and export.
    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_transaction_date_kind ON \"transaction\"(date, kind);",
        (),
    )?;

    Ok(())
}

/// Map a database row to a Transaction.
pub(crate) fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    Ok(Transaction {
        id: row.get(0)?,
        amount: row.get(1)?,
        kind: row.get(2)?,
        date: row.get(3)?,
        account: row.get(4)?,
        category: row.get(5)?,
        subcategory: row.get(6)?,
    })
}

#[cfg(test)]
mod database_tests {
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        Error,
        db::initialize,
        transaction::{Account, NewTransaction, TransactionKind, count_transactions},
    };

    use super::create_transaction;

    fn get_test_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        conn
    }

    fn new_expense(amount: f64, category: &str) -> NewTransaction {
        NewTransaction {
            amount,
            kind: TransactionKind::Expense,
            date: date!(2024 - 01 - 15),
            account: Account::Cash,
            category: category.to_owned(),
            subcategory: String::new(),
        }
    }

    #[test]
    fn create_succeeds() {
        let conn = get_test_connection();
        let amount = 12.3;

        let result = create_transaction(new_expense(amount, "Food"), &conn);

        match result {
            Ok(transaction) => {
                assert_eq!(transaction.amount, amount);
                assert_eq!(transaction.kind, TransactionKind::Expense);
                assert_eq!(transaction.category, "Food");
                assert!(transaction.id > 0);
            }
            Err(error) => panic!("Unexpected error: {error}"),
        }
    }

    #[test]
    fn create_fails_on_empty_category() {
        let conn = get_test_connection();

        let result = create_transaction(new_expense(12.3, "   "), &conn);

        assert_eq!(result, Err(Error::EmptyCategory));
    }

    #[test]
    fn create_fails_on_negative_amount() {
        let conn = get_test_connection();

        let result = create_transaction(new_expense(-5.0, "Food"), &conn);

        assert_eq!(result, Err(Error::InvalidAmount(-5.0)));
    }

    #[test]
    fn create_accepts_zero_amount() {
        let conn = get_test_connection();

        let result = create_transaction(new_expense(0.0, "Food"), &conn);

        assert!(result.is_ok());
    }

    #[test]
    fn ids_follow_insertion_order() {
        let conn = get_test_connection();

        let first = create_transaction(new_expense(1.0, "Food"), &conn).unwrap();
        let second = create_transaction(new_expense(2.0, "Rent"), &conn).unwrap();

        assert!(second.id > first.id);
    }

    #[test]
    fn get_count() {
        let conn = get_test_connection();
        let want_count = 5;
        for i in 1..=want_count {
            create_transaction(new_expense(i as f64, "Food"), &conn)
                .expect("Could not create transaction");
        }

        let got_count = count_transactions(&conn).expect("Could not get count");

        assert_eq!(want_count, got_count);
    }
}

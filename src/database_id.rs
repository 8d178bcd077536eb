//! Database ID type definitions.

/// The row ID of a user record.
pub type UserId = i64;
/// The row ID of a transaction record.
pub type TransactionId = i64;

//! Code for creating the user table and fetching users from the database.
//!
//! Names are deliberately not unique: registering the same name again
//! inserts another row, and PIN verification checks every row whose name
//! matches. This gives each household member sharing a name their own PIN.

use rusqlite::Connection;

use crate::{Error, database_id::UserId, pin::PinHash};

/// A user of the application.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    /// The user's ID in the application database.
    pub id: UserId,
    /// The name the user registered with, stored trimmed.
    pub name: String,
    /// The user's PIN hash.
    pub pin_hash: PinHash,
    /// Whether a PIN was recorded for this user. Always set on creation.
    pub pin_set: bool,
}

/// Create the user table.
///
/// # Errors
/// This function will return an error if the SQL query failed.
pub fn create_user_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS user (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                pin TEXT NOT NULL,
                pin_set INTEGER NOT NULL DEFAULT 1
                )",
        (),
    )?;

    Ok(())
}

/// Create and insert a new user into the database.
///
/// The caller is expected to pass a trimmed `name`. No uniqueness check is
/// performed, see the module documentation.
///
/// # Errors
/// Returns an [Error::SqlError] if an SQL related error occurred.
pub fn create_user(
    name: &str,
    pin_hash: PinHash,
    connection: &Connection,
) -> Result<User, Error> {
    connection.execute(
        "INSERT INTO user (name, pin, pin_set) VALUES (?1, ?2, 1)",
        (name, &pin_hash.to_string()),
    )?;

    let id = connection.last_insert_rowid();

    Ok(User {
        id,
        name: name.to_owned(),
        pin_hash,
        pin_set: true,
    })
}

/// Get every user whose name matches `name`, ignoring ASCII case.
///
/// Returns an empty vector when no name matches; PIN verification treats
/// that the same as a failed hash comparison.
///
/// # Errors
/// Returns an [Error::SqlError] if an SQL related error occurred.
pub fn get_users_by_name(name: &str, connection: &Connection) -> Result<Vec<User>, Error> {
    connection
        .prepare(
            "SELECT id, name, pin, pin_set FROM user WHERE name = :name COLLATE NOCASE
             ORDER BY id ASC",
        )?
        .query_map(&[(":name", name)], |row| {
            let raw_pin_hash: String = row.get(2)?;

            Ok(User {
                id: row.get(0)?,
                name: row.get(1)?,
                pin_hash: PinHash::new_unchecked(&raw_pin_hash),
                pin_set: row.get(3)?,
            })
        })?
        .map(|maybe_user| maybe_user.map_err(Error::from))
        .collect()
}

/// Get the number of users whose name matches `name` exactly.
///
/// Unlike [get_users_by_name] this comparison is case-sensitive: the status
/// check reports only records created with this exact spelling.
///
/// # Errors
/// Returns an [Error::SqlError] if an SQL related error occurred.
pub fn count_users_with_name(name: &str, connection: &Connection) -> Result<usize, Error> {
    connection
        .query_row(
            "SELECT COUNT(id) FROM user WHERE name = :name",
            &[(":name", name)],
            |row| row.get::<_, i64>(0).map(|count| count as usize),
        )
        .map_err(|error| error.into())
}

use anyhow::Result;
use rusqlite::{Connection, OptionalExtension, params};

use crate::models::{AccountRow, MessageRow};

// -- Accounts --

/// Insert a new account. Returns `None` when the username is already taken,
/// as reported by the `UNIQUE(username)` constraint.
pub fn insert_account(conn: &Connection, username: &str, password: &str) -> Result<Option<AccountRow>> {
    let inserted = conn.query_row(
        "INSERT INTO account (username, password) VALUES (?1, ?2)
         RETURNING account_id, username, password",
        params![username, password],
        AccountRow::from_row,
    );

    match inserted {
        Ok(row) => Ok(Some(row)),
        Err(rusqlite::Error::SqliteFailure(err, _))
            if err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
        {
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

pub fn account_by_username(conn: &Connection, username: &str) -> Result<Option<AccountRow>> {
    let mut stmt = conn
        .prepare_cached("SELECT account_id, username, password FROM account WHERE username = ?1")?;
    Ok(stmt.query_row([username], AccountRow::from_row).optional()?)
}

pub fn account_by_credentials(
    conn: &Connection,
    username: &str,
    password: &str,
) -> Result<Option<AccountRow>> {
    let mut stmt = conn.prepare_cached(
        "SELECT account_id, username, password FROM account
         WHERE username = ?1 AND password = ?2",
    )?;
    Ok(stmt
        .query_row(params![username, password], AccountRow::from_row)
        .optional()?)
}

pub fn account_by_id(conn: &Connection, account_id: i64) -> Result<Option<AccountRow>> {
    let mut stmt = conn
        .prepare_cached("SELECT account_id, username, password FROM account WHERE account_id = ?1")?;
    Ok(stmt.query_row([account_id], AccountRow::from_row).optional()?)
}

// -- Messages --

pub fn insert_message(
    conn: &Connection,
    posted_by: i64,
    message_text: &str,
    time_posted_epoch: i64,
) -> Result<MessageRow> {
    let row = conn.query_row(
        "INSERT INTO message (posted_by, message_text, time_posted_epoch) VALUES (?1, ?2, ?3)
         RETURNING message_id, posted_by, message_text, time_posted_epoch",
        params![posted_by, message_text, time_posted_epoch],
        MessageRow::from_row,
    )?;
    Ok(row)
}

pub fn all_messages(conn: &Connection) -> Result<Vec<MessageRow>> {
    let mut stmt = conn.prepare_cached(
        "SELECT message_id, posted_by, message_text, time_posted_epoch
         FROM message
         ORDER BY message_id",
    )?;

    let rows = stmt
        .query_map([], MessageRow::from_row)?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}

pub fn message_by_id(conn: &Connection, message_id: i64) -> Result<Option<MessageRow>> {
    let mut stmt = conn.prepare_cached(
        "SELECT message_id, posted_by, message_text, time_posted_epoch
         FROM message
         WHERE message_id = ?1",
    )?;
    Ok(stmt.query_row([message_id], MessageRow::from_row).optional()?)
}

/// Replace the text of one message. The existence check and the write are
/// the same statement; `None` means no row matched.
pub fn update_message_text(
    conn: &Connection,
    message_id: i64,
    message_text: &str,
) -> Result<Option<MessageRow>> {
    let row = conn
        .query_row(
            "UPDATE message SET message_text = ?1 WHERE message_id = ?2
             RETURNING message_id, posted_by, message_text, time_posted_epoch",
            params![message_text, message_id],
            MessageRow::from_row,
        )
        .optional()?;
    Ok(row)
}

/// Delete one message and hand back its last state, or `None` if it was
/// already gone.
pub fn delete_message(conn: &Connection, message_id: i64) -> Result<Option<MessageRow>> {
    let row = conn
        .query_row(
            "DELETE FROM message WHERE message_id = ?1
             RETURNING message_id, posted_by, message_text, time_posted_epoch",
            [message_id],
            MessageRow::from_row,
        )
        .optional()?;
    Ok(row)
}

pub fn messages_by_account(conn: &Connection, account_id: i64) -> Result<Vec<MessageRow>> {
    let mut stmt = conn.prepare_cached(
        "SELECT message_id, posted_by, message_text, time_posted_epoch
         FROM message
         WHERE posted_by = ?1
         ORDER BY message_id",
    )?;

    let rows = stmt
        .query_map([account_id], MessageRow::from_row)?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}

//! Repository operations shared by every collection.
//!
//! `list`, `get`, `insert`, `update` and `delete` are generic over the record
//! type; the table is picked from [`Record::KIND`].

use rusqlite::{params, OptionalExtension};
use serde::{de::DeserializeOwned, Serialize};

use super::{Database, DbError, DbResult};
use crate::models::Record;

/// A record type the store can hold.
pub trait Stored: Record + Serialize + DeserializeOwned {}

impl<T: Record + Serialize + DeserializeOwned> Stored for T {}

fn table<T: Stored>() -> &'static str {
    T::KIND.collection()
}

impl Database {
    /// All records of a collection, in insertion order.
    pub fn list<T: Stored>(&self) -> DbResult<Vec<T>> {
        let sql = format!("SELECT body FROM {} ORDER BY rowid", table::<T>());
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

        let mut records = Vec::new();
        for body in rows {
            records.push(serde_json::from_str(&body?)?);
        }
        Ok(records)
    }

    /// Get a record by id.
    pub fn get<T: Stored>(&self, id: &str) -> DbResult<Option<T>> {
        let sql = format!("SELECT body FROM {} WHERE id = ?", table::<T>());
        let body: Option<String> = self
            .conn
            .query_row(&sql, [id], |row| row.get(0))
            .optional()?;

        body.map(|b| serde_json::from_str(&b))
            .transpose()
            .map_err(Into::into)
    }

    /// Get a record by id, treating absence as an error.
    pub fn require<T: Stored>(&self, id: &str) -> DbResult<T> {
        self.get(id)?
            .ok_or_else(|| DbError::NotFound(format!("{} {}", T::KIND, id)))
    }

    /// Check whether a record with this id exists.
    pub fn exists<T: Stored>(&self, id: &str) -> DbResult<bool> {
        let sql = format!("SELECT COUNT(*) FROM {} WHERE id = ?", table::<T>());
        let count: i64 = self.conn.query_row(&sql, [id], |row| row.get(0))?;
        Ok(count > 0)
    }

    /// Number of records in a collection.
    pub fn count<T: Stored>(&self) -> DbResult<usize> {
        let sql = format!("SELECT COUNT(*) FROM {}", table::<T>());
        let count: i64 = self.conn.query_row(&sql, [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Create a record. The record is validated first; duplicate ids are
    /// rejected.
    pub fn insert<T: Stored>(&self, record: &T) -> DbResult<()> {
        record.validate()?;
        if self.exists::<T>(record.id())? {
            return Err(DbError::Constraint(format!(
                "duplicate {} id {}",
                T::KIND,
                record.id()
            )));
        }

        let body = serde_json::to_string(record)?;
        let sql = format!("INSERT INTO {} (id, body) VALUES (?1, ?2)", table::<T>());
        self.conn.execute(&sql, params![record.id(), body])?;

        tracing::info!(kind = %T::KIND, id = record.id(), "record created");
        Ok(())
    }

    /// Replace an existing record in place. Returns `false` when no record
    /// has this id.
    pub fn update<T: Stored>(&self, record: &T) -> DbResult<bool> {
        record.validate()?;

        let body = serde_json::to_string(record)?;
        let sql = format!(
            "UPDATE {} SET body = ?2, updated_at = datetime('now') WHERE id = ?1",
            table::<T>()
        );
        let rows_affected = self.conn.execute(&sql, params![record.id(), body])?;

        if rows_affected > 0 {
            tracing::info!(kind = %T::KIND, id = record.id(), "record updated");
        }
        Ok(rows_affected > 0)
    }

    /// Delete a record. Weak references to it (e.g. an invoice's patient id)
    /// are left alone.
    pub fn delete<T: Stored>(&self, id: &str) -> DbResult<bool> {
        let sql = format!("DELETE FROM {} WHERE id = ?", table::<T>());
        let rows_affected = self.conn.execute(&sql, [id])?;

        if rows_affected > 0 {
            tracing::info!(kind = %T::KIND, id, "record deleted");
        }
        Ok(rows_affected > 0)
    }

    /// Allocate the next sequential id for a collection (e.g. `P004`).
    pub fn next_id<T: Stored>(&self) -> DbResult<String> {
        let sql = format!("SELECT id FROM {}", table::<T>());
        let mut stmt = self.conn.prepare(&sql)?;
        let ids = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(next_sequential_id(
            T::KIND.id_prefix(),
            ids.iter().map(String::as_str),
        ))
    }
}

/// Next id after the highest numeric suffix among `ids` carrying `prefix`.
/// Suffixes are zero-padded to at least three digits.
pub fn next_sequential_id<'a>(prefix: &str, ids: impl IntoIterator<Item = &'a str>) -> String {
    let mut highest = 0u64;
    let mut width = 3;

    for id in ids {
        let Some(suffix) = id.strip_prefix(prefix) else {
            continue;
        };
        if suffix.is_empty() || !suffix.bytes().all(|b| b.is_ascii_digit()) {
            continue;
        }
        if let Ok(n) = suffix.parse::<u64>() {
            highest = highest.max(n);
            width = width.max(suffix.len());
        }
    }

    format!("{prefix}{:0width$}", highest + 1, width = width)
}

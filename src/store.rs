// src/store.rs
//
// Append-only sink. Rows are added, never updated or replaced, and titles
// are not checked against earlier runs.

use rusqlite::{params, Connection};

use crate::config::consts::DEFAULT_TABLE;
use crate::data::{ListingTable, SCHEMA};
use crate::error::StoreError;

/// Append every row of `table` to the default destination table.
/// Returns the number of rows written.
pub fn store(table: &ListingTable, conn: &mut Connection) -> Result<usize, StoreError> {
    store_into(table, conn, DEFAULT_TABLE)
}

/// Append every row of `table` to `name`, creating it if missing.
/// All rows of one call go in one transaction.
pub fn store_into(
    table: &ListingTable,
    conn: &mut Connection,
    name: &str,
) -> Result<usize, StoreError> {
    validate_table_name(name)?;
    conn.execute_batch(&create_sql(name))?;

    let tx = conn.transaction()?;
    {
        let mut stmt = tx.prepare(&insert_sql(name))?;
        for rec in table {
            stmt.execute(params![rec.title, rec.author, rec.price, rec.rating])?;
        }
    }
    tx.commit()?;

    logf!("appended {} rows to {name}", table.len());
    Ok(table.len())
}

/// Row count of `name`; 0 when the table does not exist yet.
pub fn count_rows(conn: &Connection, name: &str) -> Result<usize, StoreError> {
    validate_table_name(name)?;
    if !table_exists(conn, name)? {
        return Ok(0);
    }
    let n: i64 = conn.query_row(&format!("SELECT COUNT(*) FROM \"{name}\""), [], |r| r.get(0))?;
    Ok(n as usize)
}

pub fn table_exists(conn: &Connection, name: &str) -> Result<bool, StoreError> {
    let n: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
        params![name],
        |r| r.get(0),
    )?;
    Ok(n > 0)
}

/// Plain identifiers only; the name is spliced into SQL.
fn validate_table_name(name: &str) -> Result<(), StoreError> {
    let mut chars = name.chars();
    let ok = match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    };
    if ok { Ok(()) } else { Err(StoreError::InvalidTableName(s!(name))) }
}

fn create_sql(name: &str) -> String {
    let cols: Vec<String> = SCHEMA.iter().map(|c| format!("\"{c}\" TEXT")).collect();
    format!("CREATE TABLE IF NOT EXISTS \"{name}\" ({})", cols.join(", "))
}

fn insert_sql(name: &str) -> String {
    let cols: Vec<String> = SCHEMA.iter().map(|c| format!("\"{c}\"")).collect();
    format!("INSERT INTO \"{name}\" ({}) VALUES (?1, ?2, ?3, ?4)", cols.join(", "))
}

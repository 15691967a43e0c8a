//! SQLite persistence layer.
//!
//! [`Store`] owns the single backing connection for the lifetime of the
//! enclosing application and is the sole gateway to the three tables. All
//! values travel as bound parameters; no caller-supplied value is ever
//! interpolated into statement text. Operations run synchronously on the
//! calling thread and are never retried here; recovery decisions belong to
//! the caller.

use std::fmt;
use std::path::Path;

use rusqlite::types::ValueRef;
use rusqlite::{Connection, ToSql};
use tracing::{debug, info};

use crate::error::{Result, StocktakeError};
use crate::order;
use crate::record::{FIELDS, InventoryRecord};

/// A single column value as surfaced to callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Integer(i64),
    Text(String),
    Null,
}

impl Value {
    fn from_sql(v: ValueRef<'_>) -> Value {
        match v {
            ValueRef::Null => Value::Null,
            ValueRef::Integer(i) => Value::Integer(i),
            ValueRef::Real(r) => Value::Text(r.to_string()),
            ValueRef::Text(t) | ValueRef::Blob(t) => {
                Value::Text(String::from_utf8_lossy(t).into_owned())
            }
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Text content with NULL rendered as the empty string.
    pub fn text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Integer(i) => write!(f, "{}", i),
            Value::Text(t) => write!(f, "{}", t),
            Value::Null => Ok(()),
        }
    }
}

/// One row returned by a read.
pub type Row = Vec<Value>;

const SCHEMA: &str = "
    create table if not exists inventory (
        id integer primary key autoincrement,
        asset_tag text,
        description text,
        serial_number text not null,
        transfer_sheet text,
        notes text,
        date text,
        time text,
        location text,
        transferred_by text,
        received_by text,
        color text
    );
    create table if not exists known_inventory (
        id integer primary key autoincrement,
        asset_tag text,
        description text,
        serial_number text
    );
    create table if not exists settings (
        id integer primary key,
        theme text
    );
";

// ------------- Store -------------
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Opens (creating if needed) the on-disk store file, registers the
    /// temporal-key SQL function and ensures the schema. Any failure here is
    /// fatal to startup and surfaced as-is.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Store> {
        let conn = Connection::open(path.as_ref())?;
        debug!(path = %path.as_ref().display(), "opened store file");
        Store::configure(conn)
    }

    /// In-memory store, used by tests and throwaway tooling.
    pub fn open_in_memory() -> Result<Store> {
        Store::configure(Connection::open_in_memory()?)
    }

    fn configure(conn: Connection) -> Result<Store> {
        order::register(&conn)?;
        let store = Store { conn };
        store.ensure_schema()?;
        Ok(store)
    }

    /// Creates the three tables if absent. Idempotent; safe on every startup.
    pub fn ensure_schema(&self) -> Result<()> {
        self.conn.execute_batch(SCHEMA)?;
        Ok(())
    }

    /// Executes a parameterized read and returns all rows, each a fixed-width
    /// sequence of column values.
    pub fn query(&self, sql: &str, params: &[&dyn ToSql]) -> Result<Vec<Row>> {
        let mut stmt = self.conn.prepare_cached(sql)?;
        let column_count = stmt.column_count();
        let mut rows = stmt.query(params)?;
        let mut out = Vec::new();
        while let Some(row) = rows.next()? {
            let mut fields = Vec::with_capacity(column_count);
            for i in 0..column_count {
                fields.push(Value::from_sql(row.get_ref(i)?));
            }
            out.push(fields);
        }
        Ok(out)
    }

    /// Executes a parameterized write and returns the affected row count.
    pub fn execute(&self, sql: &str, params: &[&dyn ToSql]) -> Result<usize> {
        let mut stmt = self.conn.prepare_cached(sql)?;
        Ok(stmt.execute(params)?)
    }

    /// Validates and inserts one record, returning its assigned identity.
    pub fn insert(&self, record: &InventoryRecord) -> Result<i64> {
        record.validate()?;
        let values = record.values();
        let params: Vec<&dyn ToSql> = values.iter().map(|v| v as &dyn ToSql).collect();
        self.execute(&insert_sql(), &params)?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Full-row replace by identity. Returns the number of rows updated,
    /// which is zero when no row has the given identity.
    pub fn update(&self, id: i64, record: &InventoryRecord) -> Result<usize> {
        record.validate()?;
        let assignments: Vec<String> = FIELDS.iter().map(|f| format!("{} = ?", f)).collect();
        let sql = format!("update inventory set {} where id = ?", assignments.join(", "));
        let values = record.values();
        let mut params: Vec<&dyn ToSql> = values.iter().map(|v| v as &dyn ToSql).collect();
        params.push(&id);
        self.execute(&sql, &params)
    }

    pub fn delete(&self, id: i64) -> Result<usize> {
        self.execute("delete from inventory where id = ?", &[&id])
    }

    /// Inserts all records inside one transaction. Every record is validated
    /// before the transaction starts, and any insert failure rolls the whole
    /// batch back with the original error; no partial batch is ever visible.
    pub fn bulk_insert(&mut self, records: &[InventoryRecord]) -> Result<usize> {
        for record in records {
            record.validate()?;
        }
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare(&insert_sql())?;
            for record in records {
                let values = record.values();
                let params: Vec<&dyn ToSql> = values.iter().map(|v| v as &dyn ToSql).collect();
                stmt.execute(params.as_slice())?;
            }
        }
        tx.commit()?;
        info!(rows = records.len(), "bulk insert committed");
        Ok(records.len())
    }

    /// Returns one page of full rows ordered by the temporal key descending,
    /// together with the total row count. Pages are 1-based; a page past the
    /// end is empty, not an error.
    pub fn page(&self, page_number: usize, page_size: usize) -> Result<(Vec<Row>, usize)> {
        if page_number == 0 || page_size == 0 {
            return Err(StocktakeError::Validation(
                "Page number and page size must be at least 1.".into(),
            ));
        }
        let offset = ((page_number - 1) * page_size) as i64;
        let limit = page_size as i64;
        let sql = format!(
            "select * from inventory {} limit ? offset ?",
            order::ORDER_BY_TEMPORAL_DESC
        );
        let rows = self.query(&sql, &[&limit, &offset])?;
        Ok((rows, self.total_count()?))
    }

    pub fn total_count(&self) -> Result<usize> {
        let mut stmt = self.conn.prepare_cached("select count(*) from inventory")?;
        let count: i64 = stmt.query_row([], |r| r.get(0))?;
        Ok(count as usize)
    }

    /// All inventory rows ordered by the temporal key descending.
    pub fn all_rows(&self) -> Result<Vec<Row>> {
        let sql = format!("select * from inventory {}", order::ORDER_BY_TEMPORAL_DESC);
        self.query(&sql, &[])
    }

    /// Active display theme from the singleton settings row, if one has been
    /// saved. The presentation layer owns the fallback default.
    pub fn theme(&self) -> Result<Option<String>> {
        let rows = self.query("select theme from settings where id = 1", &[])?;
        match rows.first().and_then(|r| r.first()) {
            Some(Value::Text(t)) => Ok(Some(t.clone())),
            _ => Ok(None),
        }
    }

    /// Upserts the singleton settings row. The row is never deleted.
    pub fn set_theme(&self, theme: &str) -> Result<()> {
        self.execute(
            "insert or replace into settings (id, theme) values (1, ?)",
            &[&theme],
        )?;
        Ok(())
    }
}

fn insert_sql() -> String {
    let placeholders: Vec<&str> = FIELDS.iter().map(|_| "?").collect();
    format!(
        "insert into inventory ({}) values ({})",
        FIELDS.join(", "),
        placeholders.join(", ")
    )
}

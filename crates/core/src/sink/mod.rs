pub mod schema;

use std::path::Path;

use rusqlite::Connection;
use tracing::{debug, info};

use crate::error::{Error, Result};

/// Target tables, in the order rows must be deleted to respect foreign keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    Photos,
    Albums,
    Places,
}

impl Table {
    pub const RESET_ORDER: [Self; 3] = [Self::Photos, Self::Albums, Self::Places];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Photos => "Photos",
            Self::Albums => "Albums",
            Self::Places => "Places",
        }
    }
}

/// Accepts generated statements in order.
pub trait StatementSink {
    /// Execute one statement, returning the number of affected rows.
    fn execute(&mut self, statement: &str) -> Result<usize>;

    /// Execute a folder's statements. Stops at the first failure.
    fn execute_batch(&mut self, statements: &[String]) -> Result<()> {
        for statement in statements {
            self.execute(statement)?;
        }
        Ok(())
    }

    /// Delete every row of `table`, returning the number deleted.
    fn delete_all(&mut self, table: Table) -> Result<usize>;
}

/// SQLite database holding the Albums, Places and Photos tables.
/// The connection is closed when the sink is dropped.
pub struct SqliteSink {
    conn: Connection,
}

impl SqliteSink {
    /// Open or create `database_file` inside the `destination` directory.
    pub fn open(destination: &Path, database_file: &str) -> Result<Self> {
        if !destination.is_dir() {
            return Err(Error::DestinationNotFound(destination.to_path_buf()));
        }
        let conn = Connection::open(destination.join(database_file))?;
        conn.pragma_update(None, "foreign_keys", "ON")?;
        schema::initialize(&conn)?;
        Ok(Self { conn })
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.pragma_update(None, "foreign_keys", "ON")?;
        schema::initialize(&conn)?;
        Ok(Self { conn })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub fn count_rows(&self, table: Table) -> Result<usize> {
        let count: i64 = self.conn.query_row(
            &format!("SELECT COUNT(*) FROM {}", table.as_str()),
            [],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }
}

impl StatementSink for SqliteSink {
    fn execute(&mut self, statement: &str) -> Result<usize> {
        debug!(statement, "execute");
        Ok(self.conn.execute(statement, [])?)
    }

    /// One transaction per folder; a failing statement rolls the folder back.
    fn execute_batch(&mut self, statements: &[String]) -> Result<()> {
        let tx = self.conn.transaction()?;
        for statement in statements {
            debug!(statement = statement.as_str(), "execute");
            tx.execute(statement, [])?;
        }
        tx.commit()?;
        Ok(())
    }

    fn delete_all(&mut self, table: Table) -> Result<usize> {
        let deleted = self
            .conn
            .execute(&format!("DELETE FROM {}", table.as_str()), [])?;
        info!("Deleted {} rows from {}", deleted, table.as_str());
        Ok(deleted)
    }
}

/// Keeps statements in memory instead of executing them.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub statements: Vec<String>,
    pub cleared: Vec<Table>,
    fail_on: Option<String>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject any statement containing `pattern`.
    pub fn failing_on(pattern: impl Into<String>) -> Self {
        Self {
            fail_on: Some(pattern.into()),
            ..Self::default()
        }
    }
}

impl StatementSink for MemorySink {
    fn execute(&mut self, statement: &str) -> Result<usize> {
        if let Some(pattern) = &self.fail_on {
            if statement.contains(pattern.as_str()) {
                return Err(Error::Sink(statement.to_string()));
            }
        }
        self.statements.push(statement.to_string());
        Ok(1)
    }

    fn delete_all(&mut self, table: Table) -> Result<usize> {
        self.cleared.push(table);
        Ok(0)
    }
}

//! Player record storage
//!
//! The game itself only reads players ("fetch all, use the first"); writes
//! exist for seeding and tests.

mod schema;

pub use schema::*;

use rusqlite::{params, Connection};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Player name too long: {0} characters (max {max})", max = MAX_NAME_LEN)]
    NameTooLong(usize),
    #[error("Player store unavailable: {0}")]
    Unavailable(String),
}

pub type DbResult<T> = Result<T, DbError>;

/// Thread-safe database handle
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Open or create database at the given path
    pub fn open<P: AsRef<Path>>(path: P) -> DbResult<Self> {
        let conn = Connection::open(path)?;
        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        db.run_migrations()?;
        Ok(db)
    }

    /// Open an in-memory database (for testing)
    #[allow(dead_code)] // Used in tests
    pub fn open_in_memory() -> DbResult<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        db.run_migrations()?;
        Ok(db)
    }

    fn lock(&self) -> DbResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| DbError::Unavailable("connection lock poisoned".to_string()))
    }

    fn run_migrations(&self) -> DbResult<()> {
        let conn = self.lock()?;
        conn.execute_batch(SCHEMA)?;
        Ok(())
    }

    /// Cheap round trip used by the health check
    pub fn ping(&self) -> DbResult<()> {
        let conn = self.lock()?;
        conn.query_row("SELECT 1", [], |_| Ok(()))?;
        Ok(())
    }

    // ==================== Player Operations ====================

    /// Insert a player, returning the stored record
    #[allow(dead_code)] // Seeding and tests; the game only reads
    pub fn create_player(&self, name: &str) -> DbResult<Player> {
        let len = name.chars().count();
        if len > MAX_NAME_LEN {
            return Err(DbError::NameTooLong(len));
        }

        let conn = self.lock()?;
        conn.execute("INSERT INTO players (name) VALUES (?1)", params![name])?;

        Ok(Player {
            id: conn.last_insert_rowid(),
            name: name.to_string(),
        })
    }

    /// All players in id order
    pub fn list_players(&self) -> DbResult<Vec<Player>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare("SELECT id, name FROM players ORDER BY id")?;

        let players = stmt
            .query_map([], |row| {
                Ok(Player {
                    id: row.get(0)?,
                    name: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(players)
    }

    /// The primary player, if any exist
    pub fn first_player(&self) -> DbResult<Option<Player>> {
        Ok(self.list_players()?.into_iter().next())
    }
}

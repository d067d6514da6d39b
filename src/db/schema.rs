//! Database schema and types

use serde::{Deserialize, Serialize};

/// Maximum player name length, in characters
pub const MAX_NAME_LEN: usize = 16;

/// SQL schema for initialization
pub const SCHEMA: &str = r"
CREATE TABLE IF NOT EXISTS players (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name VARCHAR(16) NOT NULL
);
";

/// Player record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: i64,
    pub name: String,
}

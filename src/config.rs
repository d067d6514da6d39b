//! Server configuration from the environment

use crate::game::{agent::DEFAULT_GENERATION_TIMEOUT, GameSettings, UnrecognizedStrategy};
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub db_path: PathBuf,
    pub game: GameSettings,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_vars(&std::env::vars().collect())
    }

    fn from_vars(vars: &HashMap<String, String>) -> Self {
        let get = |key: &str| vars.get(key).map(String::as_str);

        let port = get("NORTHSTAR_PORT")
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        let db_path = get("NORTHSTAR_DB_PATH")
            .map(PathBuf::from)
            .or_else(|| get("DATABASE_URL").and_then(sqlite_path))
            .unwrap_or_else(|| {
                let home = get("HOME").unwrap_or("/tmp");
                PathBuf::from(home).join(".northstar").join("northstar.db")
            });

        let unrecognized = match get("NORTHSTAR_UNRECOGNIZED").map(str::parse::<UnrecognizedStrategy>) {
            Some(Ok(strategy)) => strategy,
            Some(Err(e)) => {
                tracing::warn!(error = %e, "Ignoring NORTHSTAR_UNRECOGNIZED");
                UnrecognizedStrategy::default()
            }
            None => UnrecognizedStrategy::default(),
        };

        let generation_timeout = get("NORTHSTAR_GENERATION_TIMEOUT_SECS")
            .and_then(|s| s.parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map_or(DEFAULT_GENERATION_TIMEOUT, Duration::from_secs);

        Self {
            port,
            db_path,
            game: GameSettings {
                unrecognized,
                generation_timeout,
            },
        }
    }
}

/// Accepts `sqlite://path`, `sqlite:path`, or a bare path
fn sqlite_path(url: &str) -> Option<PathBuf> {
    let path = url
        .strip_prefix("sqlite://")
        .or_else(|| url.strip_prefix("sqlite:"))
        .unwrap_or(url);
    if path.is_empty() || path.contains("://") {
        return None;
    }
    Some(PathBuf::from(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let config = ServerConfig::from_vars(&vars(&[("HOME", "/home/wren")]));
        assert_eq!(config.port, 3000);
        assert_eq!(config.db_path, PathBuf::from("/home/wren/.northstar/northstar.db"));
        assert_eq!(config.game.unrecognized, UnrecognizedStrategy::Converse);
        assert_eq!(config.game.generation_timeout, DEFAULT_GENERATION_TIMEOUT);
    }

    #[test]
    fn test_overrides() {
        let config = ServerConfig::from_vars(&vars(&[
            ("NORTHSTAR_PORT", "8123"),
            ("NORTHSTAR_DB_PATH", "/var/lib/northstar.db"),
            ("NORTHSTAR_UNRECOGNIZED", "echo"),
            ("NORTHSTAR_GENERATION_TIMEOUT_SECS", "5"),
        ]));
        assert_eq!(config.port, 8123);
        assert_eq!(config.db_path, PathBuf::from("/var/lib/northstar.db"));
        assert_eq!(config.game.unrecognized, UnrecognizedStrategy::Echo);
        assert_eq!(config.game.generation_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = ServerConfig::from_vars(&vars(&[
            ("NORTHSTAR_PORT", "lots"),
            ("NORTHSTAR_UNRECOGNIZED", "shout"),
            ("NORTHSTAR_GENERATION_TIMEOUT_SECS", "0"),
        ]));
        assert_eq!(config.port, 3000);
        assert_eq!(config.game.unrecognized, UnrecognizedStrategy::Converse);
        assert_eq!(config.game.generation_timeout, DEFAULT_GENERATION_TIMEOUT);
    }

    #[test]
    fn test_database_url() {
        let config = ServerConfig::from_vars(&vars(&[("DATABASE_URL", "sqlite:///srv/players.db")]));
        assert_eq!(config.db_path, PathBuf::from("/srv/players.db"));

        // Non-sqlite URLs are not usable; fall back to the default location
        let config = ServerConfig::from_vars(&vars(&[
            ("DATABASE_URL", "postgres://db/northstar"),
            ("HOME", "/root"),
        ]));
        assert_eq!(config.db_path, PathBuf::from("/root/.northstar/northstar.db"));
    }

    #[test]
    fn test_explicit_path_beats_database_url() {
        let config = ServerConfig::from_vars(&vars(&[
            ("NORTHSTAR_DB_PATH", "/a.db"),
            ("DATABASE_URL", "sqlite:///b.db"),
        ]));
        assert_eq!(config.db_path, PathBuf::from("/a.db"));
    }
}

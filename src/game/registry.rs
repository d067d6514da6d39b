//! Live connection tracking
//!
//! Sessions share nothing with each other; the registry only knows which
//! connections exist so the health endpoint can count them.

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use uuid::Uuid;

#[derive(Debug, Clone)]
struct ConnectionInfo {
    opened_at: DateTime<Utc>,
}

type Connections = Arc<Mutex<HashMap<Uuid, ConnectionInfo>>>;

#[derive(Clone, Default)]
pub struct SessionRegistry {
    connections: Connections,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new connection; it is removed when the guard drops.
    pub fn register(&self) -> SessionGuard {
        let id = Uuid::new_v4();
        lock(&self.connections).insert(
            id,
            ConnectionInfo {
                opened_at: Utc::now(),
            },
        );
        SessionGuard {
            id,
            connections: Arc::clone(&self.connections),
        }
    }

    pub fn active_count(&self) -> usize {
        lock(&self.connections).len()
    }
}

/// RAII handle for one registered connection
pub struct SessionGuard {
    id: Uuid,
    connections: Connections,
}

impl SessionGuard {
    pub fn id(&self) -> Uuid {
        self.id
    }
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        if let Some(info) = lock(&self.connections).remove(&self.id) {
            let open_for = Utc::now() - info.opened_at;
            tracing::debug!(
                conn_id = %self.id,
                open_secs = open_for.num_seconds(),
                "Connection unregistered"
            );
        }
    }
}

// A panic while holding the lock cannot leave the map half-updated
fn lock(connections: &Connections) -> MutexGuard<'_, HashMap<Uuid, ConnectionInfo>> {
    connections.lock().unwrap_or_else(PoisonError::into_inner)
}

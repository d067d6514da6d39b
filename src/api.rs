//! HTTP and WebSocket surface

mod assets;
mod handlers;
mod types;
mod ws;

pub use handlers::create_router;

use crate::db::Database;
use crate::game::{Game, SessionRegistry};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub game: Game,
    pub sessions: SessionRegistry,
}

impl AppState {
    pub fn new(db: Database, game: Game) -> Self {
        Self {
            db,
            game,
            sessions: SessionRegistry::new(),
        }
    }
}

//! HTTP request handlers

use super::assets::{get_index_html, serve_static};
use super::types::{CommandRequest, CommandResponse, ErrorResponse, HealthResponse, StoreHealth};
use super::ws::handle_socket;
use super::AppState;
use crate::game::UnrecognizedStrategy;
use axum::{
    extract::{State, WebSocketUpgrade},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Root serves the SPA, or upgrades to a game channel
        .route("/", get(serve_root))
        .route("/ws", get(upgrade_game_channel))
        // Static assets (embedded or filesystem fallback)
        .route("/assets/*path", get(serve_static))
        // Legacy command endpoint
        .route("/api/command", post(post_command))
        .route("/api/health", get(get_health))
        .route("/version", get(get_version))
        .with_state(state)
}

// ============================================================
// SPA and Game Channel
// ============================================================

/// The client connects to the server root, so `/` doubles as the WebSocket
/// endpoint.
async fn serve_root(ws: Option<WebSocketUpgrade>, State(state): State<AppState>) -> Response {
    match ws {
        Some(ws) => ws.on_upgrade(move |socket| handle_socket(socket, state)),
        None => serve_spa(),
    }
}

async fn upgrade_game_channel(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

fn serve_spa() -> Response {
    match get_index_html() {
        Some(content) => Html(content).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Html("<h1>404 - UI not found</h1>".to_string()),
        )
            .into_response(),
    }
}

// ============================================================
// Legacy Command Endpoint
// ============================================================

/// Acknowledges a command without running it through the game
async fn post_command(Json(req): Json<CommandRequest>) -> Json<CommandResponse> {
    tracing::info!(command = %req.command, "Received command over HTTP");
    Json(CommandResponse {
        success: true,
        message: format!("You entered: {}", req.command),
    })
}

// ============================================================
// Health
// ============================================================

async fn get_health(State(state): State<AppState>) -> Result<Json<HealthResponse>, AppError> {
    let db = state.db.clone();
    let ping = tokio::task::spawn_blocking(move || db.ping())
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    let store = match ping {
        Ok(()) => StoreHealth {
            available: true,
            error: None,
        },
        Err(e) => {
            tracing::warn!(error = %e, "Player store unavailable");
            StoreHealth {
                available: false,
                error: Some(e.to_string()),
            }
        }
    };

    let registry = state.game.llm_registry();
    let settings = state.game.settings();

    Ok(Json(HealthResponse {
        status: if store.available { "ok" } else { "degraded" },
        store,
        active_connections: state.sessions.active_count(),
        generator: registry.default().map(|service| service.model_id().to_string()),
        unrecognized_commands: match settings.unrecognized {
            UnrecognizedStrategy::Converse => "converse",
            UnrecognizedStrategy::Echo => "echo",
        },
    }))
}

async fn get_version() -> &'static str {
    concat!("northstar ", env!("CARGO_PKG_VERSION"))
}

// ============================================================
// Error Handling
// ============================================================

enum AppError {
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(ErrorResponse::new(message));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;
    use crate::game::{Game, GameSettings};
    use crate::llm::{testing::MockLlmService, LlmConfig, ModelRegistry};
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request};
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn test_state(registry: ModelRegistry) -> AppState {
        let db = Database::open_in_memory().unwrap();
        AppState::new(db, Game::new(GameSettings::default(), Arc::new(registry)))
    }

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_post_command_acknowledges() {
        let app = create_router(test_state(ModelRegistry::new(&Default::default())));
        let request = Request::post("/api/command")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({"command": "look"}).to_string()))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!({"success": true, "message": "You entered: look"})
        );
    }

    #[tokio::test]
    async fn test_post_command_rejects_missing_field() {
        let app = create_router(test_state(ModelRegistry::new(&Default::default())));
        let request = Request::post("/api/command")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{}"))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert!(response.status().is_client_error());
    }

    #[tokio::test]
    async fn test_health_reports_store_and_generator() {
        let mock = Arc::new(MockLlmService::new("mock-model"));
        let app = create_router(test_state(ModelRegistry::with_service(mock)));

        let response = app
            .oneshot(Request::get("/api/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["store"]["available"], true);
        assert_eq!(body["active_connections"], 0);
        assert_eq!(body["generator"], "mock-model");
        assert_eq!(body["unrecognized_commands"], "converse");
    }

    #[tokio::test]
    async fn test_health_without_generator() {
        let app = create_router(test_state(ModelRegistry::new(&Default::default())));
        let response = app
            .oneshot(Request::get("/api/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let body = body_json(response).await;
        assert_eq!(body["generator"], Value::Null);
        assert_eq!(body["unrecognized_commands"], "echo");
    }

    #[tokio::test]
    async fn test_health_with_unknown_default_model() {
        let config = LlmConfig {
            openai_api_key: Some("test-key".to_string()),
            default_model: Some("claude-9".to_string()),
            ..Default::default()
        };
        let app = create_router(test_state(ModelRegistry::new(&config)));
        let response = app
            .oneshot(Request::get("/api/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let body = body_json(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["generator"], Value::Null);
        assert_eq!(body["unrecognized_commands"], "echo");
    }

    #[tokio::test]
    async fn test_root_without_upgrade_is_not_a_socket() {
        let app = create_router(test_state(ModelRegistry::new(&Default::default())));
        let response = app
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        // The page itself, never a 101
        assert_ne!(response.status(), StatusCode::SWITCHING_PROTOCOLS);
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unknown_asset_is_404() {
        let app = create_router(test_state(ModelRegistry::new(&Default::default())));
        let response = app
            .oneshot(Request::get("/assets/missing.js").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_client_script_is_served() {
        let app = create_router(test_state(ModelRegistry::new(&Default::default())));
        let response = app
            .oneshot(Request::get("/assets/app.js").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap();
        assert!(content_type.contains("javascript"), "{content_type}");
    }

    #[tokio::test]
    async fn test_asset_path_traversal_rejected() {
        let app = create_router(test_state(ModelRegistry::new(&Default::default())));
        let response = app
            .oneshot(Request::get("/assets/../index.html").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_ne!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_version() {
        let app = create_router(test_state(ModelRegistry::new(&Default::default())));
        let response = app
            .oneshot(Request::get("/version").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(String::from_utf8_lossy(&bytes).starts_with("northstar "));
    }
}

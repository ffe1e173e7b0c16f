//! REST API server for the financial request generator
//!
//! Thin conversation shell over the dispatcher: the caller owns the chat
//! transcript and sends it with every request, so the server keeps no
//! per-session mutable state — nothing is shared between concurrent users
//! beyond the read-only tool registry.

use axum::{extract::State, http::StatusCode, routing::get, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::dispatcher::Dispatcher;
use crate::session::{ConversationTurn, Role};
use crate::tools::ToolRegistry;

/// =============================
/// Request Models
/// =============================

#[derive(Debug, Clone, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub session_id: Option<String>,
    pub messages: Vec<ChatMessage>,
}

/// =============================
/// Response Wrapper
/// =============================

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse {
    pub success: bool,
    pub data: Option<serde_json::Value>,
    pub error: Option<String>,
    pub timestamp: String,
}

impl ApiResponse {
    pub fn success<T: Serialize>(data: T) -> Self {
        Self {
            success: true,
            data: serde_json::to_value(data).ok(),
            error: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// =============================
/// API State
/// =============================

#[derive(Clone)]
pub struct ApiState {
    pub dispatcher: Arc<Dispatcher>,
    pub registry: Arc<ToolRegistry>,
}

/// =============================
/// Helpers — Session Ids
/// =============================

fn stable_uuid_from_string(input: &str) -> uuid::Uuid {
    use sha2::{Digest, Sha256};

    let hash = Sha256::digest(input.as_bytes());
    let mut bytes = [0u8; 16];
    bytes.copy_from_slice(&hash[..16]);

    // Set UUID version (4) and variant (RFC4122) bits.
    bytes[6] = (bytes[6] & 0x0f) | 0x40;
    bytes[8] = (bytes[8] & 0x3f) | 0x80;

    uuid::Uuid::from_bytes(bytes)
}

fn parse_or_stable_uuid(value: Option<&str>, fallback_seed: &str) -> uuid::Uuid {
    match value {
        Some(v) if !v.trim().is_empty() => {
            uuid::Uuid::parse_str(v).unwrap_or_else(|_| stable_uuid_from_string(v))
        }
        _ => stable_uuid_from_string(fallback_seed),
    }
}

/// =============================
/// Health Endpoint
/// =============================

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// =============================
/// Tool Catalog Endpoint
/// =============================

async fn list_tools(State(state): State<ApiState>) -> Json<ApiResponse> {
    Json(ApiResponse::success(serde_json::json!({
        "tools": state.registry.tool_definitions(),
    })))
}

/// =============================
/// Chat Endpoint
/// =============================

async fn chat_handler(
    State(state): State<ApiState>,
    Json(req): Json<ChatRequest>,
) -> (StatusCode, Json<ApiResponse>) {
    let last_user_message_index = req.messages.iter().rposition(|m| m.role == "user");

    let Some(last_user_message_index) = last_user_message_index else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error("No user message found".into())),
        );
    };

    let user_text = req.messages[last_user_message_index].content.clone();

    let history: Vec<ConversationTurn> = req.messages[..last_user_message_index]
        .iter()
        .filter_map(|m| match m.role.as_str() {
            "user" => Some(ConversationTurn {
                role: Role::User,
                content: m.content.clone(),
            }),
            "assistant" => Some(ConversationTurn {
                role: Role::Assistant,
                content: m.content.clone(),
            }),
            _ => None,
        })
        .collect();

    let session_id = parse_or_stable_uuid(req.session_id.as_deref(), "anonymous-session");

    info!(
        %session_id,
        history_turns = history.len(),
        "Handling chat turn"
    );

    let reply = state.dispatcher.handle(&user_text, &history).await;

    (
        StatusCode::OK,
        Json(ApiResponse::success(serde_json::json!({
            "commentary": reply.commentary,
            "payload": reply.payload,
            "session_id": session_id.to_string(),
        }))),
    )
}

/// =============================
/// Router
/// =============================

pub fn create_router(dispatcher: Arc<Dispatcher>, registry: Arc<ToolRegistry>) -> Router {
    let state = ApiState {
        dispatcher,
        registry,
    };

    Router::new()
        .route("/health", get(health))
        .route("/api/tools", get(list_tools))
        .route("/api/chat", post(chat_handler))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// =============================
/// Server Startup
/// =============================

pub async fn start_server(
    dispatcher: Arc<Dispatcher>,
    registry: Arc<ToolRegistry>,
    port: u16,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let router = create_router(dispatcher, registry);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;

    info!("API Server listening on http://0.0.0.0:{}", port);
    info!("Local: http://127.0.0.1:{}", port);

    axum::serve(listener, router).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stable_uuid_is_deterministic() {
        let first = parse_or_stable_uuid(Some("browser-tab-7"), "anonymous-session");
        let second = parse_or_stable_uuid(Some("browser-tab-7"), "anonymous-session");
        assert_eq!(first, second);

        let other = parse_or_stable_uuid(Some("browser-tab-8"), "anonymous-session");
        assert_ne!(first, other);
    }

    #[test]
    fn test_valid_uuid_passes_through() {
        let id = uuid::Uuid::new_v4();
        let parsed = parse_or_stable_uuid(Some(&id.to_string()), "anonymous-session");
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_chat_request_deserializes() {
        let req: ChatRequest = serde_json::from_str(
            r#"{"session_id": "s1", "messages": [{"role": "user", "content": "hi"}]}"#,
        )
        .unwrap();
        assert_eq!(req.messages.len(), 1);
        assert_eq!(req.messages[0].role, "user");
    }
}

use anyhow::{anyhow, Result};
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use log::{debug, error, info, warn};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;

use crate::error::StoreError;
use crate::prefix_store::PrefixStore;

#[derive(Clone)]
pub struct AppState {
    pub store: PrefixStore,
}

#[derive(Deserialize)]
pub struct PrefixPayload {
    pub prefix: Option<String>,
}

#[derive(Serialize)]
pub struct PrefixResponse {
    pub prefix: String,
}

pub fn create_router(store: PrefixStore) -> Router {
    let state = AppState { store };

    Router::new()
        .route("/", get(greeting))
        .route(
            "/prefix/:guild_id",
            get(get_prefix).post(set_prefix).put(set_prefix),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn greeting() -> &'static str {
    "Hello, world!"
}

async fn get_prefix(
    State(state): State<AppState>,
    Path(guild_id): Path<String>,
) -> Json<PrefixResponse> {
    let prefix = state.store.get(&guild_id);
    debug!("📤 Prefix lookup for guild {} -> '{}'", guild_id, prefix);
    Json(PrefixResponse { prefix })
}

async fn set_prefix(
    State(state): State<AppState>,
    Path(guild_id): Path<String>,
    body: Bytes,
) -> (StatusCode, Json<Value>) {
    let request_id = uuid::Uuid::new_v4();
    info!("[{}] 📥 Prefix update for guild {} | Body length: {}", request_id, guild_id, body.len());

    // Anything without a string "prefix" is treated like a missing prefix.
    let prefix = serde_json::from_slice::<PrefixPayload>(&body)
        .ok()
        .and_then(|payload| payload.prefix)
        .unwrap_or_default();

    match state.store.set(&guild_id, &prefix).await {
        Ok(()) => {
            info!("[{}] ✅ Prefix for guild {} changed to '{}'", request_id, guild_id, prefix);
            (
                StatusCode::OK,
                Json(json!({
                    "success": format!("Prefix for guild {} changed to {}", guild_id, prefix)
                })),
            )
        }
        Err(e @ StoreError::InvalidPrefix) => {
            warn!("[{}] ❌ Rejected prefix for guild {}: {}", request_id, guild_id, e);
            (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": e.to_string() })),
            )
        }
        Err(e) => {
            error!("[{}] ❌ Failed to store prefix for guild {}: {}", request_id, guild_id, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Failed to save prefix." })),
            )
        }
    }
}

pub async fn start_http_server(store: PrefixStore, port: u16) -> Result<()> {
    let app = create_router(store);

    let listener = tokio::net::TcpListener::bind(&format!("0.0.0.0:{}", port))
        .await
        .map_err(|e| anyhow!("Failed to bind to port {}: {}", port, e))?;

    info!("🌐 HTTP server starting on port {}", port);
    info!("Prefix endpoint: http://0.0.0.0:{}/prefix/:guild_id", port);

    axum::serve(listener, app)
        .await
        .map_err(|e| anyhow!("HTTP server error: {}", e))?;

    Ok(())
}

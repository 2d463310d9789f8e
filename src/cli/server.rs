//! HTTP server mode for REST access to wallet history

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::error::{Error, Result};
use crate::history::TransactionHistory;
use crate::pagination::FetchRequest;
use crate::types::OptionStringExt;

/// Server configuration
#[derive(Clone)]
pub struct ServerConfig {
    /// Service answering history requests
    pub history: TransactionHistory,
}

/// App state shared across handlers
#[derive(Clone)]
struct AppState {
    config: ServerConfig,
}

/// Query string for the transactions endpoint
#[derive(Debug, Default, Deserialize)]
struct TransactionsQuery {
    #[serde(default)]
    cursor: Option<String>,
    #[serde(default)]
    limit: Option<usize>,
    #[serde(default)]
    until_trx_id: Option<String>,
}

impl From<TransactionsQuery> for FetchRequest {
    fn from(query: TransactionsQuery) -> Self {
        FetchRequest {
            cursor: query.cursor.none_if_empty(),
            limit: query.limit,
            until_trx_id: query.until_trx_id.none_if_empty(),
        }
    }
}

/// Response wrapper
#[derive(Debug, Serialize)]
struct ApiResponse<T> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    fn error(msg: impl Into<String>) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            error: Some(msg.into()),
        }
    }
}

/// Build the router
pub fn router(config: ServerConfig) -> Router {
    let state = AppState { config };

    // Build CORS layer - allow all origins
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/wallets/:wallet/transactions", get(list_transactions))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

/// Start the HTTP server
pub async fn serve(config: ServerConfig, port: u16) -> Result<()> {
    let app = router(config);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Starting HTTP server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| Error::config(format!("Failed to bind to port {port}: {e}")))?;

    axum::serve(listener, app)
        .await
        .map_err(|e| Error::config(format!("Server error: {e}")))?;

    Ok(())
}

/// Health check endpoint
async fn health() -> impl IntoResponse {
    Json(ApiResponse::success(json!({
        "status": "ok",
        "version": crate::VERSION
    })))
}

/// List a window of a wallet's transactions
async fn list_transactions(
    State(state): State<Arc<AppState>>,
    Path(wallet): Path<String>,
    Query(query): Query<TransactionsQuery>,
) -> impl IntoResponse {
    let request = FetchRequest::from(query);

    match state.config.history.list_trxs(&wallet, &request).await {
        Ok(page) => (StatusCode::OK, Json(ApiResponse::success(page))).into_response(),
        Err(e) => {
            warn!(wallet = %wallet, error = %e, "Failed to list transactions");
            (error_status(&e), Json(ApiResponse::<()>::error(e.to_string()))).into_response()
        }
    }
}

/// HTTP status for a service error
fn error_status(err: &Error) -> StatusCode {
    match err {
        Error::WalletNotFound { .. } => StatusCode::NOT_FOUND,
        Error::Credential { .. } => StatusCode::UNAUTHORIZED,
        Error::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
        Error::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
        Error::Http(_)
        | Error::HttpStatus { .. }
        | Error::MaxRetriesExceeded { .. }
        | Error::Decode { .. } => StatusCode::BAD_GATEWAY,
        Error::Config { .. }
        | Error::MissingConfigField { .. }
        | Error::InvalidConfigValue { .. }
        | Error::YamlParse(_)
        | Error::JsonParse(_)
        | Error::InvalidUrl(_)
        | Error::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

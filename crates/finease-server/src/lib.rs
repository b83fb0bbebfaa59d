//! FinEase Web Server
//!
//! Axum-based REST API exposing ledger analysis and funding prediction.
//!
//! - Model artifacts are loaded once before the listener binds
//! - Restrictive CORS policy unless origins are configured
//! - Sanitized error responses (input errors are reported, internals are logged)

use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use tracing::{error, info};

use finease_core::db::Database;
use finease_core::predict::{ArtifactPaths, FundingPredictor, ModelArtifacts};
use finease_core::LedgerAnalyzer;

mod handlers;

/// Server configuration
#[derive(Clone, Debug, Default)]
pub struct ServerConfig {
    /// Allowed CORS origins (empty = same-origin only)
    pub allowed_origins: Vec<String>,
    /// Currency prefix for analysis summaries (analyzer default when `None`)
    pub currency_symbol: Option<String>,
}

/// Shared application state
pub struct AppState {
    pub db: Database,
    pub predictor: FundingPredictor,
    pub analyzer: LedgerAnalyzer,
}

impl AppState {
    pub fn new(db: Database, predictor: FundingPredictor, config: &ServerConfig) -> Self {
        let analyzer = match &config.currency_symbol {
            Some(symbol) => LedgerAnalyzer::with_currency_symbol(symbol.clone()),
            None => LedgerAnalyzer::default(),
        };
        Self {
            db,
            predictor,
            analyzer,
        }
    }
}

/// Create the application router
pub fn create_router(
    db: Database,
    predictor: FundingPredictor,
    static_dir: Option<&str>,
    config: ServerConfig,
) -> Router {
    let state = Arc::new(AppState::new(db, predictor, &config));

    let api_routes = Router::new()
        .route("/predict", post(handlers::predict))
        .route("/analyze", post(handlers::analyze))
        .route("/uploads", get(handlers::list_uploads))
        .route("/predictions", get(handlers::list_predictions));

    // Build CORS layer
    let cors = if config.allowed_origins.is_empty() {
        // Restrictive default: only allow same-origin
        CorsLayer::new()
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE])
    } else {
        // Allow specified origins
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE])
    };

    let mut app = Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .nest("/api", api_routes)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Serve static files if directory provided
    if let Some(dir) = static_dir {
        app = app.fallback_service(ServeDir::new(dir));
    }

    app
}

/// Load artifacts, then bind and serve until shutdown
///
/// An artifact load failure aborts startup before the listener is bound.
pub async fn serve(
    db: Database,
    artifacts: &ArtifactPaths,
    host: &str,
    port: u16,
    static_dir: Option<&str>,
    config: ServerConfig,
) -> anyhow::Result<()> {
    let predictor = FundingPredictor::new(ModelArtifacts::load(artifacts)?);
    info!(
        model = predictor.artifacts().model.kind(),
        "✅ Model artifacts loaded"
    );

    let app = create_router(db, predictor, static_dir, config);
    let addr = format!("{}:{}", host, port);

    info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// ============================================================================
// Error Handling
// ============================================================================

/// Application error type with proper HTTP status codes
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    message: String,
    internal: Option<anyhow::Error>,
}

impl AppError {
    pub fn bad_request(msg: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.to_string(),
            internal: None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the full internal error if present
        if let Some(err) = &self.internal {
            error!(error = %err, "Internal error");
        }

        let body = Json(serde_json::json!({
            "error": self.message
        }));

        (self.status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        let err = err.into();
        let (status, message) = match err.downcast_ref::<finease_core::Error>() {
            Some(core @ finease_core::Error::Validation(_)) => {
                return Self::bad_request(&core.to_string())
            }
            // Per-request model failures are reported, not hidden
            Some(core @ finease_core::Error::Inference(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, core.to_string())
            }
            // Return generic message to client
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "An internal error occurred".to_string(),
            ),
        };
        Self {
            status,
            message,
            // Keep full error for logging
            internal: Some(err),
        }
    }
}

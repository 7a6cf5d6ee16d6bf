//! BSC Web Server
//!
//! Axum-based REST API exposing the dashboard analytics.
//!
//! Security features:
//! - Restrictive CORS policy
//! - Security headers on every response
//! - Sanitized error responses

use std::sync::Arc;

use axum::{
    extract::rejection::JsonRejection,
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::NaiveDate;
use tower_http::{
    cors::CorsLayer, services::ServeDir, set_header::SetResponseHeaderLayer, trace::TraceLayer,
};
use tracing::{error, info};

use bsc_core::{AnalyticsConfig, Snapshot};

mod handlers;

/// Environment variable holding extra CORS origins (comma-separated)
pub const ALLOWED_ORIGINS_ENV: &str = "BSC_ALLOWED_ORIGINS";

/// Server configuration
#[derive(Clone, Default)]
pub struct ServerConfig {
    /// Allowed CORS origins (empty = same-origin only)
    pub allowed_origins: Vec<String>,
}

impl ServerConfig {
    /// Configuration with origins taken from `BSC_ALLOWED_ORIGINS`
    pub fn from_env() -> Self {
        let origins = std::env::var(ALLOWED_ORIGINS_ENV).unwrap_or_default();
        Self {
            allowed_origins: parse_origins(&origins),
        }
    }
}

/// Split a comma-separated origin list, dropping blanks
pub fn parse_origins(s: &str) -> Vec<String> {
    s.split(',')
        .map(|o| o.trim().to_string())
        .filter(|o| !o.is_empty())
        .collect()
}

/// Shared application state
///
/// Read-only after startup; requests never mutate the loaded snapshot.
pub struct AppState {
    pub analytics: AnalyticsConfig,
    /// Snapshot loaded at startup, if any
    pub snapshot: Option<Snapshot>,
}

/// Resolve an optional request date to a reference date
pub(crate) fn reference_date(today: Option<NaiveDate>) -> NaiveDate {
    today.unwrap_or_else(|| chrono::Local::now().date_naive())
}

/// Create the application router
pub fn create_router(
    snapshot: Option<Snapshot>,
    analytics: AnalyticsConfig,
    static_dir: Option<&str>,
    config: ServerConfig,
) -> Router {
    let cors = build_cors(&config);

    let state = Arc::new(AppState {
        analytics,
        snapshot,
    });

    let api_routes = Router::new()
        .route("/status", get(handlers::get_status))
        .route(
            "/dashboard",
            get(handlers::get_dashboard).post(handlers::post_dashboard),
        )
        .route("/insights", post(handlers::post_insights))
        .route("/insights/actions", get(handlers::list_insight_actions))
        .route("/financial-health", post(handlers::post_financial_health))
        .route("/payments/settle", post(handlers::post_settle_payment));

    // Security headers
    let csp_value = HeaderValue::from_static(
        "default-src 'self'; script-src 'self'; style-src 'self' 'unsafe-inline'; img-src 'self' data:; connect-src 'self'; frame-ancestors 'none'"
    );

    let mut app = Router::new()
        .nest("/api", api_routes)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::CONTENT_SECURITY_POLICY,
            csp_value,
        ));

    // Serve static files if directory provided
    if let Some(dir) = static_dir {
        app = app.fallback_service(ServeDir::new(dir));
    }

    app
}

fn build_cors(config: &ServerConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    if config.allowed_origins.is_empty() {
        // Restrictive default: same-origin only
        return cors;
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|o| o.parse().ok())
        .collect();
    cors.allow_origin(origins)
}

/// Start the server with default configuration
pub async fn serve(
    snapshot: Option<Snapshot>,
    analytics: AnalyticsConfig,
    host: &str,
    port: u16,
    static_dir: Option<&str>,
) -> anyhow::Result<()> {
    serve_with_config(snapshot, analytics, host, port, static_dir, ServerConfig::default()).await
}

/// Start the server with custom configuration
pub async fn serve_with_config(
    snapshot: Option<Snapshot>,
    analytics: AnalyticsConfig,
    host: &str,
    port: u16,
    static_dir: Option<&str>,
    config: ServerConfig,
) -> anyhow::Result<()> {
    match &snapshot {
        Some(s) => info!(
            "Serving snapshot for {} ({} invoices, {} expenses)",
            s.business.name,
            s.invoices.len(),
            s.expenses.len()
        ),
        None => info!("No snapshot loaded; GET /api/dashboard will return 404"),
    }

    let app = create_router(snapshot, analytics, static_dir, config);
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

    pub fn not_found(msg: &str) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
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

        // Caller mistakes surface their message; everything else stays generic
        if let Some(rejection) = err.downcast_ref::<JsonRejection>() {
            return Self::bad_request(&rejection.body_text());
        }
        if let Some(core) = err.downcast_ref::<bsc_core::Error>() {
            if let bsc_core::Error::NotFound(_) = core {
                return Self::not_found(&core.to_string());
            }
            if core.is_client_error() {
                return Self::bad_request(&core.to_string());
            }
        }

        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: "An internal error occurred".to_string(),
            internal: Some(err),
        }
    }
}

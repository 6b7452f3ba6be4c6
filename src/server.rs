//! Local preview server.
//!
//! Renders the whole site once at startup and serves it from memory, so the
//! preview always matches what `toolhub build` would write.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET`  | `/` | Tools Hub |
//! | `GET`  | `/{*path}` | Rendered page (`/slug`, `/slug/`, `/slug/index.html`) |
//! | `GET`  | `/sitemap.xml` | Sitemap |
//! | `GET`  | `/pages.json` | Page index |
//! | `GET`  | `/health` | Health check (returns version) |
//!
//! # Error Contract
//!
//! ```json
//! { "error": { "code": "not_found", "message": "no page at /nope" } }
//! ```

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::content;
use crate::site::{render_site, RenderedSite};

/// Shared application state passed to all route handlers.
#[derive(Clone)]
struct AppState {
    site: Arc<RenderedSite>,
}

/// Load, render and serve the site on `[server].bind` until the process is
/// terminated.
pub async fn run_server(config: &Config) -> anyhow::Result<()> {
    let pages = content::load_site(config)?;
    let site = render_site(config, &pages)?;
    tracing::info!(pages = site.page_count(), "site rendered");

    let bind_addr = config.server.bind.clone();
    let app = router(site);

    println!("Preview server listening on http://{}", bind_addr);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Build the router for an already-rendered site.
pub fn router(site: RenderedSite) -> Router {
    let state = AppState {
        site: Arc::new(site),
    };

    Router::new()
        .route("/", get(handle_hub))
        .route("/health", get(handle_health))
        .route("/sitemap.xml", get(handle_sitemap))
        .route("/pages.json", get(handle_index))
        .route("/{*path}", get(handle_page))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ============ Error response ============

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    code: String,
    message: String,
}

/// Internal error type that converts into an Axum HTTP response.
struct AppError {
    status: StatusCode,
    code: String,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code,
                message: self.message,
            },
        };
        (self.status, Json(body)).into_response()
    }
}

fn not_found(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::NOT_FOUND,
        code: "not_found".to_string(),
        message: message.into(),
    }
}

// ============ Handlers ============

async fn handle_hub(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    state
        .site
        .page("/")
        .map(|html| Html(html.to_string()))
        .ok_or_else(|| not_found("hub page missing"))
}

async fn handle_page(
    State(state): State<AppState>,
    Path(path): Path<String>,
) -> Result<Html<String>, AppError> {
    state
        .site
        .page(&path)
        .map(|html| Html(html.to_string()))
        .ok_or_else(|| not_found(format!("no page at /{}", path)))
}

async fn handle_sitemap(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/xml; charset=utf-8")],
        state.site.sitemap.clone(),
    )
}

async fn handle_index(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/json")],
        state.site.index_json.clone(),
    )
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

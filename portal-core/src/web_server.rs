use crate::classifier::{Disposition, classify};
use crate::config::PortalConfig;
use crate::dispatcher;
use crate::scan;
use crate::structs::ConnectRequest;
use crate::traits::{JoinLauncher, ScanSource, UiAssetProvider};
use axum::{
    Json, Router,
    body::{Body, to_bytes},
    extract::{Request, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

const INDEX_ASSET: &str = "index.html";
const LOGO_ASSET: &str = "logo.png";

/// Upper bound on a `/connect` body. Other requests never have theirs read.
const MAX_CONNECT_BODY: usize = 2 * 1024 * 1024;

/// Headers that keep probes and pages from being cached anywhere, so the OS
/// re-runs its connectivity check instead of reusing a stale answer.
const NO_CACHE: [(&str, &str); 3] = [
    ("cache-control", "no-cache, no-store, must-revalidate"),
    ("pragma", "no-cache"),
    ("expires", "0"),
];

pub type WebServerState = State<Arc<AppState>>;

/// Read-only collaborators handed to every exchange. Nothing in here is
/// mutated after startup; each request builds its own data.
pub struct AppState {
    pub portal: PortalConfig,
    pub scanner: Arc<dyn ScanSource>,
    pub launcher: Arc<dyn JoinLauncher>,
    pub frontend: Arc<dyn UiAssetProvider>,
}

/// Builds the portal router. Every request goes through the classifier, so
/// the whole surface is a single fallback handler.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .fallback(portal_entry)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Binds `state.portal.bind_addr` and serves until `shutdown` resolves.
pub async fn run_server<F>(state: AppState, shutdown: F) -> crate::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = state.portal.bind_addr;
    let app = router(Arc::new(state));

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("🌐 Web server listening on {}", addr);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| crate::Error::WebServer(e.into()))
}

// --- Route Handlers ---

async fn portal_entry(State(state): WebServerState, request: Request) -> Response {
    let (parts, body) = request.into_parts();
    let (method, uri) = (parts.method, parts.uri);
    // Match on the raw request target, query string included.
    let target = uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or_else(|| uri.path());
    let classification = classify(target, &method);
    tracing::debug!(%method, target, ?classification, "Classified request");

    match classification.disposition() {
        Disposition::RedirectToPortal => redirect_to_portal(&state),
        Disposition::ServePortalPage => serve_portal_page(&state).await,
        Disposition::ServeLogo => serve_logo(&state).await,
        Disposition::RunScan => {
            let report = scan::survey(state.scanner.as_ref()).await;
            (NO_CACHE, Json(report)).into_response()
        }
        Disposition::DispatchConnect => match to_bytes(body, MAX_CONNECT_BODY).await {
            Ok(body) => handle_connect(&state, &body),
            Err(e) => {
                tracing::error!("Failed to read /connect body: {}", e);
                connect_error(format!("cannot read connect request: {}", e))
            }
        },
    }
}

fn redirect_to_portal(state: &AppState) -> Response {
    (
        StatusCode::FOUND,
        NO_CACHE,
        [(header::LOCATION, state.portal.portal_url.as_str())],
    )
        .into_response()
}

/// Serves the portal page. A read failure still answers 200 with an inline
/// error page so the captive browser shows something.
async fn serve_portal_page(state: &AppState) -> Response {
    let (body, mime) = match state.frontend.get_asset(INDEX_ASSET).await {
        Ok((data, mime)) => (Body::from(data), mime),
        Err(e) => {
            tracing::warn!("Failed to read portal page: {}", e);
            let page = format!(
                "<html><body><h1>Portal Error</h1><p>{}</p></body></html>",
                e
            );
            (Body::from(page), "text/html".to_string())
        }
    };

    (StatusCode::OK, NO_CACHE, [(header::CONTENT_TYPE, mime)], body).into_response()
}

/// Serves the logo with a positive cache lifetime.
///
/// On a read failure the status and headers are sent unchanged with an
/// empty body. Devices already rely on that response shape, so it stays.
async fn serve_logo(state: &AppState) -> Response {
    let headers = [
        (header::CONTENT_TYPE, "image/png".to_string()),
        (
            header::CACHE_CONTROL,
            format!("public, max-age={}", state.portal.logo_max_age.as_secs()),
        ),
    ];

    match state.frontend.get_asset(LOGO_ASSET).await {
        Ok((data, _)) => (StatusCode::OK, headers, Body::from(data)).into_response(),
        Err(e) => {
            tracing::warn!("Failed to read logo, sending empty body: {}", e);
            (StatusCode::OK, headers).into_response()
        }
    }
}

/// 处理连接请求：请求体无法解析时返回 500，其余情况由 dispatcher 给出结构化应答
fn handle_connect(state: &AppState, body: &[u8]) -> Response {
    let request: ConnectRequest = match serde_json::from_slice(body) {
        Ok(request) => request,
        Err(e) => {
            tracing::error!("Malformed /connect body: {}", e);
            return connect_error(format!("invalid connect request: {}", e));
        }
    };

    let ack = dispatcher::dispatch(&request, state.launcher.as_ref());
    (NO_CACHE, Json(ack)).into_response()
}

fn connect_error(message: String) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        NO_CACHE,
        Json(serde_json::json!({ "error": message })),
    )
        .into_response()
}

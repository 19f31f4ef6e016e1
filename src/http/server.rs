//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum app: introspection endpoints plus the shell fallback
//! - Wire up middleware (request ID, tracing, timeout)
//! - Resolve every deep link through the router
//! - Bind server to listener and drain on shutdown
//!
//! # Design Decisions
//! - Web mode: any path under the base gets the shell; 404 when only the catch-all matched
//! - Hash mode: the route lives in the fragment, so only the base itself is served
//! - Introspection endpoints live outside the base (`/__routes`, `/__resolve`)

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Query, State},
    http::{Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::PortalConfig;
use crate::http::request::{make_request_span, propagate_request_id_layer, set_request_id_layer};
use crate::http::response::Shell;
use crate::lifecycle::shutdown;
use crate::routing::{NavigationError, Router as PortalRouter, View};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub router: Arc<PortalRouter>,
    pub shell: Shell,
}

/// One entry of `GET /__routes`.
#[derive(Debug, Serialize)]
pub struct RouteSummary {
    pub name: String,
    pub path: String,
    pub view: View,
    pub component: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct ResolveQuery {
    pub path: String,
}

/// History-mode fallback server for the portal.
pub struct HttpServer {
    app: Router,
    config: PortalConfig,
}

impl HttpServer {
    /// Create a server around `router`. Reads the configured index file once.
    pub fn new(config: PortalConfig, router: Arc<PortalRouter>) -> std::io::Result<Self> {
        let shell = Shell::load(config.server.index_file.as_deref())?;
        let state = AppState { router, shell };
        let app = Self::build_app(&config, state);
        Ok(Self { app, config })
    }

    /// Build the Axum app with all middleware layers.
    #[allow(deprecated)]
    fn build_app(config: &PortalConfig, state: AppState) -> Router {
        Router::new()
            .route("/__routes", get(list_routes))
            .route("/__resolve", get(resolve_route))
            .fallback(shell_handler)
            .with_state(state)
            .layer(propagate_request_id_layer())
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.server.request_timeout_secs,
            )))
            .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
            .layer(set_request_id_layer())
    }

    /// The Axum app, for embedding or in-process testing.
    pub fn app(&self) -> Router {
        self.app.clone()
    }

    pub fn config(&self) -> &PortalConfig {
        &self.config
    }

    /// Serve on `listener` until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.app)
            .with_graceful_shutdown(shutdown::wait(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

async fn list_routes(State(state): State<AppState>) -> Json<Vec<RouteSummary>> {
    let routes = state
        .router
        .table()
        .iter()
        .map(|route| RouteSummary {
            name: route.name.clone(),
            path: route.path.to_string(),
            view: route.view,
            component: route.view.component_name(),
        })
        .collect();
    Json(routes)
}

async fn resolve_route(
    State(state): State<AppState>,
    Query(query): Query<ResolveQuery>,
) -> Response {
    match state.router.resolve_path(&query.path) {
        Ok(resolved) => Json(resolved).into_response(),
        Err(e) => navigation_error(e),
    }
}

/// Serves the shell for client-side routes.
async fn shell_handler(State(state): State<AppState>, method: Method, uri: Uri) -> Response {
    if method != Method::GET && method != Method::HEAD {
        return StatusCode::METHOD_NOT_ALLOWED.into_response();
    }

    let history = state.router.history();
    if history.is_hash() {
        let base = history.base();
        let path = uri.path();
        return if path.eq_ignore_ascii_case(base)
            || path.eq_ignore_ascii_case(base.trim_end_matches('/'))
        {
            state.shell.respond(StatusCode::OK, None)
        } else {
            tracing::debug!(path = %path, "Outside hash-mode base");
            state.shell.respond(StatusCode::NOT_FOUND, None)
        };
    }

    let url = uri.path_and_query().map(|pq| pq.as_str()).unwrap_or("/");
    let Some(location) = history.strip_base(url) else {
        tracing::debug!(url = %url, base = %history.base(), "Outside web-mode base");
        return state.shell.respond(StatusCode::NOT_FOUND, None);
    };

    match state.router.resolve_path(&location) {
        Ok(resolved) => {
            let status = if resolved.catch_all {
                StatusCode::NOT_FOUND
            } else {
                StatusCode::OK
            };
            tracing::debug!(
                path = %resolved.path,
                route = %resolved.name,
                status = status.as_u16(),
                "Route resolved"
            );
            state.shell.respond(status, Some(&resolved.name))
        }
        Err(e) => {
            tracing::warn!(location = %location, error = %e, "No route matched");
            state.shell.respond(StatusCode::NOT_FOUND, None)
        }
    }
}

fn navigation_error(error: NavigationError) -> Response {
    let status = match error {
        NavigationError::NoMatch(_) | NavigationError::UnknownRoute(_) => StatusCode::NOT_FOUND,
        _ => StatusCode::BAD_REQUEST,
    };
    (
        status,
        Json(serde_json::json!({ "error": error.to_string() })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HistoryKind;
    use crate::http::request::X_REQUEST_ID;
    use crate::http::response::X_ROUTE_NAME;
    use crate::routing::RouterOptions;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    fn server(config: PortalConfig) -> HttpServer {
        let router = Arc::new(PortalRouter::portal(config.router_options()).unwrap());
        HttpServer::new(config, router).unwrap()
    }

    async fn get(app: Router, uri: &str) -> Response {
        app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    fn route_name(response: &Response) -> Option<&str> {
        response
            .headers()
            .get(X_ROUTE_NAME)
            .and_then(|v| v.to_str().ok())
    }

    #[tokio::test]
    async fn test_known_route_served_with_200() {
        let app = server(PortalConfig::default()).app();

        let response = get(app.clone(), "/courses").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(route_name(&response), Some("courses"));
        assert!(response.headers().contains_key(X_REQUEST_ID));

        let response = get(app, "/login/promo123?ref=mail").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(route_name(&response), Some("logintag"));
    }

    #[tokio::test]
    async fn test_unknown_route_served_with_404() {
        let app = server(PortalConfig::default()).app();

        let response = get(app, "/a/b/c").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(route_name(&response), Some("NotFound"));
    }

    #[tokio::test]
    async fn test_web_base_is_honored() {
        let mut config = PortalConfig::default();
        config.history.base = "/portal/".into();
        let app = server(config).app();

        let response = get(app.clone(), "/portal/dashboard").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(route_name(&response), Some("dashboard"));

        let response = get(app, "/dashboard").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(route_name(&response), None);
    }

    #[tokio::test]
    async fn test_web_base_ignores_letter_case() {
        let mut config = PortalConfig::default();
        config.history.base = "/portal/".into();
        let app = server(config).app();

        let response = get(app.clone(), "/PORTAL/dashboard").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(route_name(&response), Some("dashboard"));

        let response = get(app, "/Portal?ref=mail").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(route_name(&response), Some("home"));
    }

    #[tokio::test]
    async fn test_hash_mode_serves_only_base() {
        let mut config = PortalConfig::default();
        config.history.mode = HistoryKind::Hash;
        config.history.base = "/portal/".into();
        let app = server(config).app();

        assert_eq!(get(app.clone(), "/portal/").await.status(), StatusCode::OK);
        assert_eq!(get(app.clone(), "/portal").await.status(), StatusCode::OK);
        assert_eq!(get(app.clone(), "/PORTAL/").await.status(), StatusCode::OK);
        assert_eq!(
            get(app, "/portal/courses").await.status(),
            StatusCode::NOT_FOUND
        );
    }

    #[tokio::test]
    async fn test_non_get_rejected() {
        let app = server(PortalConfig::default()).app();
        let response = app
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/login")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_resolve_endpoint() {
        let app = server(PortalConfig::default()).app();
        let response = get(app, "/__resolve?path=%2Flogin%2Fpromo123").await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["name"], "logintag");
        assert_eq!(json["params"]["tag"], "promo123");
        assert_eq!(json["view"], "Login");
    }

    #[tokio::test]
    async fn test_resolve_endpoint_without_catch_all() {
        use crate::routing::RouteTable;

        let table = RouteTable::from_definitions(&[("/about", "about", View::About)]).unwrap();
        let router = Arc::new(PortalRouter::new(RouterOptions::default(), table));
        let app = HttpServer::new(PortalConfig::default(), router).unwrap().app();

        let response = get(app.clone(), "/__resolve?path=/missing").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = get(app, "/missing").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(route_name(&response), None);
    }

    #[tokio::test]
    async fn test_routes_endpoint() {
        let app = server(PortalConfig::default()).app();
        let response = get(app, "/__routes").await;
        let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

        let routes = json.as_array().unwrap();
        assert_eq!(routes.len(), 15);
        assert_eq!(routes[0]["name"], "home");
        assert_eq!(routes[6]["path"], "/login/:tag");
        assert_eq!(routes[14]["component"], "NotFoundView");
    }
}

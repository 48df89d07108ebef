//! HTTP surface. Every JSON body, success or error, is produced by
//! [`json_response`], which routes through `propjson::safe_serialize_with`.

use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Path as UrlPath, Query, State};
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Router, middleware};
use propjson::{Options, Value, safe_serialize_with};
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::config::ServeArgs;
use crate::gateway::{HttpUpstream, PropertyQuery, Upstream, respond};

pub struct AppState<U> {
    pub upstream: Arc<U>,
    pub options: Arc<Options>,
    pub static_dir: Arc<PathBuf>,
}

impl<U> Clone for AppState<U> {
    fn clone(&self) -> Self {
        Self {
            upstream: Arc::clone(&self.upstream),
            options: Arc::clone(&self.options),
            static_dir: Arc::clone(&self.static_dir),
        }
    }
}

impl<U: Upstream> AppState<U> {
    pub fn new(upstream: U, options: Options, static_dir: impl Into<PathBuf>) -> Self {
        Self {
            upstream: Arc::new(upstream),
            options: Arc::new(options),
            static_dir: Arc::new(static_dir.into()),
        }
    }
}

pub fn router<U: Upstream>(state: AppState<U>) -> Router {
    Router::new()
        .route("/", get(index::<U>))
        .route("/static/{*path}", get(static_file::<U>))
        .route("/api/properties", get(properties::<U>))
        .route("/health", get(health::<U>))
        .route("/test", get(test_endpoint::<U>))
        .fallback(not_found::<U>)
        .with_state(state)
        .layer(middleware::map_response(allow_any_origin))
}

/// Bind, then serve until ctrl-c.
pub async fn serve(args: &ServeArgs) -> anyhow::Result<()> {
    let upstream = HttpUpstream::new(&args.upstream_url, &args.api_token, args.timeout())
        .context("building upstream client")?;
    info!(upstream = upstream.url(), static_dir = %args.static_dir.display(), "starting relay");
    let app = router(AppState::new(upstream, args.options(), &args.static_dir));
    let listener = tokio::net::TcpListener::bind(args.bind)
        .await
        .with_context(|| format!("binding {}", args.bind))?;
    info!(addr = %listener.local_addr()?, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "ctrl-c handler unavailable");
        std::future::pending::<()>().await;
    }
}

/// Serialize `value` through the safe path. The encoder's 500 (last-resort
/// body) overrides the handler's status.
pub fn json_response(status: StatusCode, value: &Value, options: &Options) -> Response {
    let out = safe_serialize_with(value, options);
    let status = if out.is_fallback() {
        StatusCode::INTERNAL_SERVER_ERROR
    } else {
        status
    };
    (
        status,
        [(header::CONTENT_TYPE, HeaderValue::from_static("application/json"))],
        out.body,
    )
        .into_response()
}

fn error_response(status: StatusCode, message: impl Into<String>, options: &Options) -> Response {
    let body = Value::object([("error", Value::from(message.into()))]);
    json_response(status, &body, options)
}

async fn allow_any_origin(mut res: Response) -> Response {
    res.headers_mut().insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    res
}

#[derive(Debug, Deserialize)]
pub struct PropertyParams {
    suburb: Option<String>,
    property_type: Option<String>,
}

#[tracing::instrument(skip_all)]
async fn properties<U: Upstream>(
    State(state): State<AppState<U>>,
    params: Result<Query<PropertyParams>, QueryRejection>,
) -> Response {
    let params = match params {
        Ok(Query(params)) => params,
        Err(rejection) => {
            warn!(error = %rejection, "malformed query string");
            return error_response(StatusCode::BAD_REQUEST, rejection.body_text(), &state.options);
        }
    };
    let query = match PropertyQuery::from_params(params.suburb, params.property_type) {
        Ok(q) => q,
        Err(e) => {
            warn!(error = %e, "rejected property query");
            return error_response(StatusCode::BAD_REQUEST, e.to_string(), &state.options);
        }
    };
    info!(suburb = %query.suburb, property_type = %query.property_type, "fetching properties");
    let result = state.upstream.fetch(&query).await;
    let (status, body) = respond(result, &state.options);
    json_response(status, &body, &state.options)
}

async fn health<U: Upstream>(State(state): State<AppState<U>>) -> Response {
    debug!("health check requested");
    let body = Value::object([
        ("status", Value::from("healthy")),
        ("service", Value::from("property-dashboard")),
    ]);
    json_response(StatusCode::OK, &body, &state.options)
}

async fn test_endpoint<U: Upstream>(State(state): State<AppState<U>>) -> Response {
    let body = Value::object([
        ("test", Value::from("success")),
        ("message", Value::from("Property dashboard server is working")),
    ]);
    json_response(StatusCode::OK, &body, &state.options)
}

async fn not_found<U: Upstream>(State(state): State<AppState<U>>) -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found", &state.options)
}

async fn index<U: Upstream>(State(state): State<AppState<U>>) -> Response {
    serve_file(&state, "index.html").await
}

async fn static_file<U: Upstream>(
    State(state): State<AppState<U>>,
    UrlPath(path): UrlPath<String>,
) -> Response {
    serve_file(&state, &path).await
}

async fn serve_file<U>(state: &AppState<U>, rel: &str) -> Response {
    let Some(path) = resolve_static(&state.static_dir, rel) else {
        warn!(path = rel, "rejected static path");
        return error_response(StatusCode::NOT_FOUND, "Not found", &state.options);
    };
    match tokio::fs::read(&path).await {
        Ok(bytes) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, HeaderValue::from_static(content_type(&path)))],
            bytes,
        )
            .into_response(),
        Err(e) => {
            debug!(path = %path.display(), error = %e, "static file unavailable");
            error_response(StatusCode::NOT_FOUND, "Not found", &state.options)
        }
    }
}

/// Join `rel` under `root`, refusing anything but plain path segments.
pub fn resolve_static(root: &Path, rel: &str) -> Option<PathBuf> {
    let rel = Path::new(rel);
    let mut out = root.to_path_buf();
    let mut any = false;
    for comp in rel.components() {
        match comp {
            Component::Normal(seg) => {
                out.push(seg);
                any = true;
            }
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    any.then_some(out)
}

fn content_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("html" | "htm") => "text/html; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("js" | "mjs") => "text/javascript; charset=utf-8",
        Some("json") => "application/json",
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("ico") => "image/x-icon",
        Some("txt") => "text/plain; charset=utf-8",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_paths_stay_under_root() {
        let root = Path::new("static");
        assert_eq!(
            resolve_static(root, "css/site.css"),
            Some(PathBuf::from("static/css/site.css"))
        );
        assert_eq!(resolve_static(root, "../secrets.txt"), None);
        assert_eq!(resolve_static(root, "a/../../b"), None);
        assert_eq!(resolve_static(root, "/etc/passwd"), None);
        assert_eq!(resolve_static(root, ""), None);
    }

    #[test]
    fn content_types_by_extension() {
        assert_eq!(content_type(Path::new("index.HTML")), "text/html; charset=utf-8");
        assert_eq!(content_type(Path::new("app.js")), "text/javascript; charset=utf-8");
        assert_eq!(content_type(Path::new("blob")), "application/octet-stream");
    }
}

//! HTTP server setup and request handling.
//!
//! # Responsibilities
//! - Create the Axum Router: the single `/weather` route plus a 404 fallback
//! - Wire up middleware (timeout, request ID, tracing)
//! - Guard on configuration, validate parameters
//! - Forward the request upstream exactly once and mirror the reply
//! - Resolve the CORS origin for every response

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, StatusCode},
    response::Response,
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ProxyConfig;
use crate::http::response;
use crate::observability::metrics;
use crate::security::resolve_origin;
use crate::upstream::{ForecastClient, ForecastQuery, ReplyCache, UpstreamError};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ProxyConfig>,
    pub client: ForecastClient,
    pub cache: ReplyCache,
}

/// HTTP server for the weather proxy.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ProxyConfig) -> Result<Self, UpstreamError> {
        let client = ForecastClient::new(&config.upstream)?;
        let cache = ReplyCache::new(Duration::from_secs(config.cache.ttl_secs));

        let state = AppState {
            config: Arc::new(config),
            client,
            cache,
        };

        let router = Self::build_router(state);
        Ok(Self { router })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState) -> Router {
        let request_timeout = Duration::from_secs(state.config.timeouts.request_secs);

        Router::new()
            .route("/weather", get(forecast_handler))
            .fallback(fallback_handler)
            .with_state(state)
            .layer(TimeoutLayer::new(request_timeout))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Handler for `GET /weather`.
///
/// Guards on the configured credential, validates `lat`/`lon`, consults the
/// reply cache, then forwards a single request upstream and mirrors its
/// status and body verbatim.
async fn forecast_handler(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    let start_time = Instant::now();
    let config = &state.config;

    let request_id = headers
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown");

    let allow_origin = resolve_origin(
        origin_header(&headers),
        config.cors.allowed_origins.as_deref(),
    );

    let api_key = config.upstream.api_key.as_str();
    if api_key.is_empty() {
        tracing::error!(request_id = %request_id, "Upstream API key is not configured");
        metrics::record_request(500, start_time);
        return response::json_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "OPENWEATHER_API_KEY is missing.",
            &allow_origin,
        );
    }

    // lat/lon are required; empty values count as missing. They are
    // forwarded verbatim, so no numeric validation happens here.
    let (lat, lon) = match (non_empty(&params, "lat"), non_empty(&params, "lon")) {
        (Some(lat), Some(lon)) => (lat, lon),
        _ => {
            tracing::debug!(request_id = %request_id, "Rejecting request without coordinates");
            metrics::record_request(400, start_time);
            return response::json_error(
                StatusCode::BAD_REQUEST,
                "lat and lon are required.",
                &allow_origin,
            );
        }
    };

    let query = ForecastQuery {
        lat,
        lon,
        units: non_empty(&params, "units")
            .unwrap_or_else(|| config.upstream.default_units.clone()),
        lang: non_empty(&params, "lang").unwrap_or_else(|| config.upstream.default_lang.clone()),
    };

    tracing::debug!(
        request_id = %request_id,
        lat = %query.lat,
        lon = %query.lon,
        units = %query.units,
        lang = %query.lang,
        "Proxying forecast request"
    );

    let url = state.client.endpoint_url(&query, api_key);
    let cache_key = url.as_str().to_string();

    if config.cache.enabled {
        if let Some(reply) = state.cache.get(&cache_key) {
            tracing::debug!(request_id = %request_id, status = %reply.status, "Serving cached reply");
            metrics::record_cache_event(true);
            metrics::record_request(reply.status.as_u16(), start_time);
            return response::proxied(reply, &allow_origin);
        }
        metrics::record_cache_event(false);
    }

    match state.client.fetch(url).await {
        Ok(reply) => {
            if config.cache.enabled {
                state.cache.insert(cache_key, reply.clone());
                metrics::record_cache_size(state.cache.len());
            }

            tracing::debug!(request_id = %request_id, status = %reply.status, "Upstream reply forwarded");
            metrics::record_request(reply.status.as_u16(), start_time);
            response::proxied(reply, &allow_origin)
        }
        Err(e) => {
            tracing::error!(request_id = %request_id, error = %e, "Upstream request failed");
            metrics::record_request(502, start_time);
            response::json_error(
                StatusCode::BAD_GATEWAY,
                "upstream request failed",
                &allow_origin,
            )
        }
    }
}

/// Fallback for every path other than `/weather`. No upstream call.
async fn fallback_handler(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let start_time = Instant::now();
    let allow_origin = resolve_origin(
        origin_header(&headers),
        state.config.cors.allowed_origins.as_deref(),
    );

    metrics::record_request(404, start_time);
    response::not_found(&allow_origin)
}

fn origin_header(headers: &HeaderMap) -> Option<&str> {
    headers.get(header::ORIGIN).and_then(|v| v.to_str().ok())
}

fn non_empty(params: &HashMap<String, String>, key: &str) -> Option<String> {
    params.get(key).filter(|v| !v.is_empty()).cloned()
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received");
}

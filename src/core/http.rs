//! HTTP endpoint server using Axum

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{Json, Response},
    routing::{get, post},
    Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{error, info, warn, Level};

use crate::core::runtime::{ScanRuntime, TickerRecommendation};
use crate::metrics::Metrics;
use crate::models::price::DateRange;
use crate::signals::aggregation::RecommendationSummary;

pub const SERVICE_NAME: &str = "trendlens-signal-scanner";

#[derive(Clone)]
pub struct AppState {
    pub health: Arc<RwLock<HealthStatus>>,
    pub metrics: Arc<Metrics>,
    pub start_time: Arc<Instant>,
    pub runtime: Arc<ScanRuntime>,
}

#[derive(Clone, Debug)]
pub struct HealthStatus {
    pub status: String,
}

impl Default for HealthStatus {
    fn default() -> Self {
        Self {
            status: "healthy".to_string(),
        }
    }
}

pub async fn health_check(State(state): State<AppState>) -> Result<Json<Value>, StatusCode> {
    let health = state.health.read().await;
    let uptime_seconds = state.start_time.elapsed().as_secs();
    Ok(Json(json!({
        "status": health.status,
        "uptime_seconds": uptime_seconds,
        "service": SERVICE_NAME
    })))
}

pub async fn metrics_handler(State(state): State<AppState>) -> Result<String, StatusCode> {
    state
        .metrics
        .export()
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

/// Middleware to track HTTP request metrics
async fn metrics_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    state.metrics.http_requests_in_flight.inc();

    let response = next.run(request).await;
    let status = response.status();
    let duration = start.elapsed();

    state.metrics.http_requests_in_flight.dec();
    state.metrics.http_requests_total.inc();
    state
        .metrics
        .http_request_duration_seconds
        .observe(duration.as_secs_f64());

    if status.is_server_error() {
        error!(
            method = %method,
            path = %path,
            status = %status,
            duration_ms = duration.as_millis(),
            "HTTP request error"
        );
    }

    response
}

#[derive(Debug, Deserialize)]
pub struct RangeRequest {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Debug, Deserialize)]
pub struct RecommendationRequest {
    pub ticker: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Debug, Serialize)]
struct RecommendationResponse {
    message: String,
    #[serde(flatten)]
    recommendation: TickerRecommendation,
}

#[derive(Debug, Serialize)]
struct OversoldResponse {
    tickers: Vec<String>,
}

fn date_range(start: NaiveDate, end: NaiveDate) -> Result<DateRange, StatusCode> {
    DateRange::new(start, end).map_err(|e| {
        warn!(error = %e, "Rejected date range");
        StatusCode::BAD_REQUEST
    })
}

/// List the configured ticker roster
async fn list_tickers(State(state): State<AppState>) -> Json<Value> {
    Json(json!({ "tickers": state.runtime.tickers() }))
}

/// Latest recommendation for a single ticker
async fn recommend_ticker(
    State(state): State<AppState>,
    Json(request): Json<RecommendationRequest>,
) -> Result<Json<Value>, StatusCode> {
    let ticker = request.ticker.trim().to_uppercase();
    if ticker.is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }
    let range = date_range(request.start_date, request.end_date)?;

    let recommendation = state
        .runtime
        .recommend(&ticker, &range)
        .await
        .map_err(|e| {
            error!(error = %e, ticker = %ticker, "Failed to load price history");
            StatusCode::BAD_GATEWAY
        })?;

    let response = RecommendationResponse {
        message: recommendation.message(),
        recommendation,
    };
    Ok(Json(json!(response)))
}

/// Roster summary bucketed by latest signal
async fn summarize(
    State(state): State<AppState>,
    Json(request): Json<RangeRequest>,
) -> Result<Json<RecommendationSummary>, StatusCode> {
    let range = date_range(request.start_date, request.end_date)?;
    Ok(Json(state.runtime.summarize(&range).await))
}

/// Roster tickers currently classified as oversold
async fn oversold(
    State(state): State<AppState>,
    Json(request): Json<RangeRequest>,
) -> Result<Json<Value>, StatusCode> {
    let range = date_range(request.start_date, request.end_date)?;
    let tickers = state.runtime.oversold(&range).await;
    Ok(Json(json!(OversoldResponse { tickers })))
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .route("/api/tickers", get(list_tickers))
        .route("/api/recommendation", post(recommend_ticker))
        .route("/api/summary", post(summarize))
        .route("/api/oversold", post(oversold))
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::DEBUG))
                        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                        .on_response(DefaultOnResponse::new().level(Level::DEBUG)),
                )
                .layer(axum::middleware::from_fn_with_state(
                    state.clone(),
                    metrics_middleware,
                ))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

pub async fn start_server(
    port: u16,
    runtime: Arc<ScanRuntime>,
    metrics: Arc<Metrics>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let state = AppState {
        health: Arc::new(RwLock::new(HealthStatus::default())),
        metrics,
        start_time: Arc::new(Instant::now()),
        runtime,
    };
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;

    info!(port = port, "HTTP server listening on port {}", port);
    info!(
        "Metrics endpoint available at http://0.0.0.0:{}/metrics",
        port
    );
    axum::serve(listener, app).await?;

    Ok(())
}

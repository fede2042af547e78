// Consultant Dashboard - JSON API Server
// Serves the statistics engine to a presentation layer. Data only, no views.
//
// Environment:
//   DASHBOARD_CONFIG    JSON config file (optional)
//   DASHBOARD_DATA_DIR  CSV export directory (overrides config)
//   DASHBOARD_USER      tenant to serve (overrides config)
//   DASHBOARD_ADDR      bind address (default 0.0.0.0:3000)

use anyhow::{Context, Result};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use consultant_dashboard::{
    load_snapshot, month_from_number, DashboardConfig, Snapshot, StatsEngine, Transaction,
    TransactionCategory,
};

/// Shared application state (read-only after startup)
#[derive(Clone)]
struct AppState {
    snapshot: Arc<Snapshot>,
    engine: Arc<StatsEngine>,
}

/// API Response wrapper
#[derive(Serialize)]
struct ApiResponse<T> {
    success: bool,
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    fn ok(data: T) -> Response {
        (
            StatusCode::OK,
            Json(ApiResponse {
                success: true,
                data: Some(data),
                error: None,
            }),
        )
            .into_response()
    }
}

fn bad_request(message: String) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ApiResponse::<()> {
            success: false,
            data: None,
            error: Some(message),
        }),
    )
        .into_response()
}

/// Transaction row with the client's company name joined in
#[derive(Serialize)]
struct TransactionResponse<'a> {
    #[serde(flatten)]
    transaction: &'a Transaction,
    client_name: Option<&'a str>,
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /api/health
async fn health_check() -> Response {
    ApiResponse::ok("OK")
}

#[derive(Deserialize)]
struct CurrentQuery {
    /// Reference date (YYYY-MM-DD), defaults to today
    today: Option<NaiveDate>,
}

/// GET /api/stats/current?today=YYYY-MM-DD - current month + year to date
async fn current_stats(State(state): State<AppState>, Query(query): Query<CurrentQuery>) -> Response {
    let today = query.today.unwrap_or_else(|| Local::now().date_naive());
    ApiResponse::ok(state.engine.current_period(&state.snapshot, today))
}

/// GET /api/stats/:year - 12-month table with totals
async fn year_stats(State(state): State<AppState>, Path(year): Path<i32>) -> Response {
    ApiResponse::ok(state.engine.stats_for_year(&state.snapshot, year))
}

/// GET /api/stats/:year/:month
async fn month_stats(State(state): State<AppState>, Path((year, month)): Path<(i32, u32)>) -> Response {
    match month_from_number(month) {
        Ok(m) => ApiResponse::ok(state.engine.stats_for_month(&state.snapshot, m, year)),
        Err(e) => bad_request(e.to_string()),
    }
}

/// GET /api/clients
async fn list_clients(State(state): State<AppState>) -> Response {
    ApiResponse::ok(&state.snapshot.clients)
}

/// GET /api/transactions/:category - vss | gi | vsd
async fn list_transactions(State(state): State<AppState>, Path(category): Path<String>) -> Response {
    let category: TransactionCategory = match category.parse() {
        Ok(c) => c,
        Err(e) => return bad_request(format!("{}", e)),
    };

    let rows: Vec<TransactionResponse> = state
        .snapshot
        .transactions(category)
        .iter()
        .map(|tx| TransactionResponse {
            transaction: tx,
            client_name: state.snapshot.client_name(&tx.client_id),
        })
        .collect();

    ApiResponse::ok(rows)
}

// ============================================================================
// Main Server
// ============================================================================

fn load_config() -> Result<DashboardConfig> {
    let config_path = std::env::var("DASHBOARD_CONFIG").ok().map(PathBuf::from);
    let mut config = DashboardConfig::load_or_default(config_path.as_deref())?;

    if let Ok(dir) = std::env::var("DASHBOARD_DATA_DIR") {
        config.data_dir = PathBuf::from(dir);
    }
    if let Ok(user) = std::env::var("DASHBOARD_USER") {
        config.user_id = Some(user);
    }

    Ok(config)
}

fn router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/stats/current", get(current_stats))
        .route("/stats/:year", get(year_stats))
        .route("/stats/:year/:month", get(month_stats))
        .route("/clients", get(list_clients))
        .route("/transactions/:category", get(list_transactions))
        .with_state(state);

    Router::new()
        .nest("/api", api_routes)
        .layer(CorsLayer::permissive())
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    println!("🌐 Consultant Dashboard - API Server");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let config = load_config()?;
    let snapshot = load_snapshot(&config.data_dir, config.user_id.as_deref())?;
    println!(
        "✓ Snapshot loaded from {:?}: {} clients, {} transactions",
        config.data_dir,
        snapshot.clients.len(),
        snapshot.transaction_count()
    );

    let state = AppState {
        snapshot: Arc::new(snapshot),
        engine: Arc::new(StatsEngine::with_rates(config.commission)),
    };

    let addr = std::env::var("DASHBOARD_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    println!("\n🚀 Server running on http://{}", addr);
    println!("   API: http://{}/api/stats/current", addr);
    println!("\n   Press Ctrl+C to stop\n");

    axum::serve(listener, router(state))
        .await
        .context("Server error")?;

    Ok(())
}

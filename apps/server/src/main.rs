mod config;
mod handlers;
mod models;
mod sessions;

use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use connector_booking::BookingOptions;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use config::{Clock, Config};
use sessions::SessionStore;

/// Shared application state accessible from all handlers.
pub struct AppState {
    pub options: Arc<BookingOptions>,
    pub sessions: SessionStore,
    pub clock: Clock,
    pub started_at: Instant,
}

/// Idle session eviction interval (seconds).
const SESSION_CLEANUP_SECS: u64 = 60;

/// Vite dev server, always allowed alongside WEBAPP_URL.
const DEV_ORIGIN: &str = "http://localhost:5173";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // ── Tracing ──
    let env_filter = EnvFilter::from_default_env().add_directive("info".parse()?);
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    // ── Config ──
    let config = Config::from_env()?;
    tracing::info!(
        slots = config.options.time_slots().len(),
        timezones = config.options.timezones().len(),
        default_timezone = config.options.default_timezone(),
        clock = ?config.clock,
        "booking options loaded"
    );
    if config.webapp_url.is_none() {
        tracing::warn!("WEBAPP_URL not set, CORS allows any origin");
    }

    let state = Arc::new(AppState {
        options: Arc::new(config.options.clone()),
        sessions: SessionStore::new(config.session_ttl),
        clock: config.clock,
        started_at: Instant::now(),
    });

    // ── Background task: evict idle booking sessions ──
    let cleanup_sessions = state.sessions.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(SESSION_CLEANUP_SECS));
        loop {
            interval.tick().await;
            let evicted = cleanup_sessions.evict_idle();
            if evicted > 0 {
                tracing::debug!(evicted, "evicted idle booking sessions");
            }
        }
    });

    let router = app(state, config.webapp_url.as_deref())?;

    let addr = format!("{}:{}", config.host, config.port);
    tracing::info!("Connector booking server starting on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}

/// Build the router. `webapp_url` restricts CORS to the front end when given.
pub fn app(state: Arc<AppState>, webapp_url: Option<&str>) -> anyhow::Result<Router> {
    let cors = match webapp_url {
        Some(url) => {
            let origins = vec![url.parse::<HeaderValue>()?, HeaderValue::from_static(DEV_ORIGIN)];
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        }
        None => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
    };

    let booking_routes = Router::new()
        .route("/api/booking/options", get(handlers::booking::options))
        .route(
            "/api/booking/sessions",
            post(handlers::booking::create_session),
        )
        .route(
            "/api/booking/sessions/{id}",
            get(handlers::booking::get_session).delete(handlers::booking::delete_session),
        )
        .route(
            "/api/booking/sessions/{id}/prev-month",
            post(handlers::booking::prev_month),
        )
        .route(
            "/api/booking/sessions/{id}/next-month",
            post(handlers::booking::next_month),
        )
        .route(
            "/api/booking/sessions/{id}/date",
            post(handlers::booking::choose_date),
        )
        .route(
            "/api/booking/sessions/{id}/back",
            post(handlers::booking::go_back),
        )
        .route(
            "/api/booking/sessions/{id}/time",
            post(handlers::booking::choose_time),
        )
        .route(
            "/api/booking/sessions/{id}/timezone",
            post(handlers::booking::set_timezone),
        );

    Ok(Router::new()
        .route("/api/health", get(handlers::health::health))
        .merge(booking_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state))
}

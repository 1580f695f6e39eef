//! Driftwood Market API - marketplace backend.
//!
//! This binary serves the REST API on port 5000 (override with `API_PORT`).
//!
//! # Architecture
//!
//! - Axum web framework, JSON bodies throughout
//! - MongoDB for the product, order, and review collections
//! - Identity provider lookup for seller bearer tokens
//! - Stripe for payment intents

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;

use axum::Router;
use sentry::integrations::tracing as sentry_tracing;
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use driftwood_api::config::ApiConfig;
use driftwood_api::db::{self, MongoOrderStore, MongoProductStore, MongoReviewStore};
use driftwood_api::routes;
use driftwood_api::services::{IdentityClient, PaymentsClient};
use driftwood_api::state::AppState;

/// Initialize Sentry when a DSN is configured. The guard flushes on drop.
fn init_sentry(config: &ApiConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::info!("Sentry error tracking enabled");
    Some(guard)
}

/// Map tracing levels to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

#[tokio::main]
async fn main() {
    // Sentry needs the DSN before the subscriber that feeds it exists
    let config = ApiConfig::from_env().expect("Failed to load configuration");
    let _sentry_guard = init_sentry(&config);

    // RUST_LOG wins; otherwise default to info for this crate
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "driftwood_api=info,tower_http=debug".into());

    // Fly log drains take JSON lines; keep plain text for local runs
    let is_fly = std::env::var("FLY_APP_NAME").is_ok();
    let json_layer = is_fly.then(|| tracing_subscriber::fmt::layer().json().flatten_event(true));
    let text_layer = (!is_fly).then(tracing_subscriber::fmt::layer);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    // Connect to MongoDB
    let database = db::connect(&config.database)
        .await
        .expect("Failed to connect to MongoDB");
    tracing::info!(database = %config.database.database, "Connected to MongoDB");

    // Wire the stores and service clients into shared state
    let products = Arc::new(MongoProductStore::new(
        &database,
        &config.database.products_collection,
    ));
    let orders = Arc::new(MongoOrderStore::new(
        &database,
        &config.database.orders_collection,
    ));
    let reviews = Arc::new(MongoReviewStore::new(
        &database,
        &config.database.reviews_collection,
    ));
    let identity =
        Arc::new(IdentityClient::new(&config.identity).expect("Failed to build identity client"));
    let payments =
        Arc::new(PaymentsClient::new(&config.stripe).expect("Failed to build payments client"));

    let state = AppState::new(products, orders, reviews, identity, payments);

    // Build router
    let app = Router::new()
        .merge(routes::routes())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record("latency_ms", latency.as_millis() as u64);
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .with_state(state)
        // Sentry hub and transaction layers wrap everything else
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction());

    // Start server
    let addr = config.socket_addr();
    tracing::info!("api listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}

/// Resolve when Ctrl+C or SIGTERM arrives.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, draining connections");
}

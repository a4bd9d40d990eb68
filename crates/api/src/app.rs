use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, patch, post},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::Config;
use crate::middleware::{
    metrics_handler, metrics_middleware, require_admin, require_user_auth,
    security_headers_middleware, trace_id,
};
use crate::routes::{
    auth, bookings, categories, health, notifications, payments, providers, users, ws,
};
use crate::services::dispatch::BookingEvent;

/// Capacity of the in-process booking event channel. Slow WebSocket
/// consumers miss events rather than backpressure status changes.
const EVENT_CHANNEL_CAPACITY: usize = 256;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
    pub events: broadcast::Sender<BookingEvent>,
}

pub fn create_app(config: Config, pool: PgPool) -> Router {
    let config = Arc::new(config);
    let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);

    let state = AppState {
        pool,
        config: config.clone(),
        events,
    };

    // Build CORS layer based on configuration
    let cors = if config.security.cors_origins.is_empty() {
        // Default: allow any origin (for development)
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        // Production: only allow specified origins
        use tower_http::cors::AllowOrigin;
        let origins: Vec<_> = config
            .security
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    // Public routes: identity, directory, bookings, payments, notifications.
    // The booking and payment endpoints mirror the original contract, which
    // authenticated at the client edge; resource checks happen per handler.
    let public_routes = Router::new()
        .route("/users/signup", post(auth::signup))
        .route("/users/login", post(auth::login))
        .route("/users", get(users::list_users))
        .route("/users/categories", get(categories::list_categories))
        .route("/providers/:id", get(providers::get_provider))
        .route("/bookings", post(bookings::create_booking))
        .route(
            "/bookings/organizer/:user_id",
            get(bookings::list_organizer_bookings),
        )
        .route(
            "/bookings/provider/:provider_id",
            get(bookings::list_provider_bookings),
        )
        .route("/bookings/:id/status", patch(bookings::update_status))
        .route(
            "/bookings/stats/:provider_id",
            get(bookings::provider_stats),
        )
        .route("/payments", post(payments::record_payment))
        // GET takes a user id, DELETE a notification id; one path shape
        // because the router cannot hold both `:user_id` and `:id` here.
        .route(
            "/notifications/:id",
            get(notifications::list_notifications).delete(notifications::delete_notification),
        )
        .route(
            "/notifications/:id/read",
            patch(notifications::mark_all_read),
        )
        .route("/ws", get(ws::booking_events));

    // Provider mutations require a bearer token
    let provider_routes = Router::new()
        .route("/providers/:id", patch(providers::update_provider))
        .route("/providers/:id/photo", patch(providers::update_photo))
        .route("/providers/:id/gallery", post(providers::upload_gallery))
        .route(
            "/providers/:id/gallery/delete",
            patch(providers::delete_gallery_media),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_user_auth,
        ))
        // Uploads may be as large as the video ceiling plus multipart framing
        .layer(DefaultBodyLimit::max(
            config.limits.gallery_video_max_bytes + 1024 * 1024,
        ));

    // Admin taxonomy CRUD requires an ADMIN bearer token
    let admin_routes = Router::new()
        .route(
            "/admin/categories",
            get(categories::admin_list_categories).post(categories::create_category),
        )
        .route(
            "/admin/categories/:id",
            patch(categories::update_category).delete(categories::delete_category),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

    // Operational routes (no authentication required)
    let ops_routes = Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/health/ready", get(health::ready))
        .route("/api/health/live", get(health::live))
        .route("/metrics", get(metrics_handler));

    // Merge all routes
    Router::new()
        .merge(ops_routes)
        .merge(public_routes)
        .merge(provider_routes)
        .merge(admin_routes)
        // Global middleware (order matters: bottom layers run first)
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(trace_id))
        .layer(cors)
        .with_state(state)
}

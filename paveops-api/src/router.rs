use axum::{
    http::{HeaderValue, Method},
    routing::get,
    Router,
};
use pricing::QuoteCalculator;
use sqlx::PgPool;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};

use crate::{app_state::AppState, config::Settings, routes};

pub fn create(connection_pool: PgPool, config: Settings) -> Router<()> {
    let app_state = AppState::new(
        connection_pool,
        QuoteCalculator::new(config.pricing.gst_rate),
    );

    let app = Router::new()
        .route("/", get(|| async { "PaveOps API" }))
        .nest("/clients", routes::clients::router())
        .nest("/resources/labour", routes::labour::router())
        .nest("/resources/equipment", routes::equipment::router())
        .nest("/resources/materials", routes::materials::router())
        .nest("/jobs", routes::jobs::router())
        .nest("/quotes", routes::quotes::router());

    let allowed_origin = config
        .application
        .app_url
        .parse::<HeaderValue>()
        .expect("Invalid app_url in configuration");
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(["content-type".parse().unwrap()])
        .allow_origin(allowed_origin);

    app.with_state(app_state)
        .layer(cors)
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default()))
}

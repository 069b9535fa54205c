//! geodist Service Library
//!
//! HTTP handlers, state and router for the place-distance service.
//! This library is used by both the geodist-service binary and integration tests.

pub mod handlers;

use std::sync::Arc;

use axum::{
    http::Method,
    routing::get,
    Router,
};
use geodist::Resolvers;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// OpenAPI documentation for the geodist service.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "geodist Distance Service",
        version = "0.1.0",
        description = "Great-circle distances between named places via gazetteer, geocoder or mock resolvers.",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT"),
        contact(name = "Pedro Sanz Martinez", url = "https://github.com/pedrosanzmtz/geodist")
    ),
    paths(
        handlers::get_distance,
        handlers::post_distance,
        handlers::get_place,
        handlers::health_check,
    ),
    components(
        schemas(
            handlers::DistanceQuery,
            handlers::DistanceResponse,
            handlers::ErrorResponse,
            handlers::HealthResponse,
            handlers::PlaceResponse,
        )
    ),
    tags(
        (name = "distance", description = "Distance query endpoints"),
        (name = "places", description = "Gazetteer lookups"),
        (name = "system", description = "System and health endpoints")
    )
)]
pub struct ApiDoc;

/// Application state shared across handlers.
///
/// Built once before the server starts; the gazetteer inside is never
/// mutated afterwards.
pub struct AppState {
    /// Resolver factory over the shared gazetteer and geocoder.
    pub resolvers: Resolvers,
}

/// Build the application router with Swagger UI at `/docs`, tracing and
/// permissive CORS.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/distance",
            get(handlers::get_distance).post(handlers::post_distance),
        )
        .route("/places/:name", get(handlers::get_place))
        .route("/health", get(handlers::health_check))
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer()),
        )
        .with_state(state)
}

/// Any origin, the common verbs, any header.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any)
}

// Re-export commonly used types for convenience
pub use handlers::{DistanceQuery, DistanceResponse, ErrorResponse, HealthResponse, PlaceResponse};

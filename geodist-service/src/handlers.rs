//! HTTP request handlers for the distance service.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use geodist::{GeoDistError, PlaceRecord};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

use crate::AppState;

/// Distance query, as query parameters or, for `POST`, a JSON body.
#[derive(Debug, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DistanceQuery {
    /// First place name.
    #[schema(example = "London")]
    pub city1: String,
    /// Second place name.
    #[schema(example = "Paris")]
    pub city2: String,
    /// Resolution mode: `CSV`, `API` or `MOCK`.
    #[schema(example = "CSV")]
    pub method: String,
}

/// Successful distance response.
#[derive(Debug, Serialize, ToSchema)]
pub struct DistanceResponse {
    /// Great-circle distance in whole kilometers (truncated).
    #[schema(example = 343)]
    pub distance: u32,
}

/// Error response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message.
    pub error: String,
}

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Service version.
    pub version: String,
    /// Number of places in the gazetteer.
    pub places: usize,
}

/// A gazetteer entry.
#[derive(Debug, Serialize, ToSchema)]
pub struct PlaceResponse {
    pub name: String,
    pub ascii_name: String,
    /// Latitude in decimal degrees.
    pub lat: f64,
    /// Longitude in decimal degrees.
    pub lon: f64,
    pub country: String,
    pub iso2: String,
    pub iso3: String,
    pub admin_name: String,
    /// `primary`, `admin`, `minor`, or empty.
    pub capital: String,
    pub population: Option<u64>,
    pub id: String,
}

impl From<&PlaceRecord> for PlaceResponse {
    fn from(place: &PlaceRecord) -> Self {
        Self {
            name: place.name.clone(),
            ascii_name: place.ascii_name.clone(),
            lat: place.coordinate.lat,
            lon: place.coordinate.lon,
            country: place.country.clone(),
            iso2: place.iso2.clone(),
            iso3: place.iso3.clone(),
            admin_name: place.admin_name.clone(),
            capital: place.capital.as_str().to_string(),
            population: place.population,
            id: place.id.clone(),
        }
    }
}

/// Get the distance between two places.
///
/// # Query Parameters
///
/// - `city1`, `city2`: place names
/// - `method`: `CSV` (gazetteer), `API` (remote geocoder) or `MOCK` (random)
///
/// # Returns
///
/// - `200 OK` with `{"distance": km}` on success
/// - `500 Internal Server Error` with `{"error": message}` on any failure
#[utoipa::path(
    get,
    path = "/distance",
    tag = "distance",
    params(DistanceQuery),
    responses(
        (status = 200, description = "Distance computed", body = DistanceResponse),
        (status = 500, description = "Bad query, unknown method or unresolvable place", body = ErrorResponse)
    )
)]
pub async fn get_distance(
    State(state): State<Arc<AppState>>,
    query: Result<Query<DistanceQuery>, QueryRejection>,
) -> Response {
    match query {
        Ok(Query(query)) => distance(&state, query).await,
        Err(rejection) => rejection_response(rejection.body_text()),
    }
}

/// Get the distance between two places.
///
/// The query is read from the query string when it is complete there,
/// otherwise from a JSON body.
#[utoipa::path(
    post,
    path = "/distance",
    tag = "distance",
    params(DistanceQuery),
    request_body = DistanceQuery,
    responses(
        (status = 200, description = "Distance computed", body = DistanceResponse),
        (status = 500, description = "Bad query, unknown method or unresolvable place", body = ErrorResponse)
    )
)]
pub async fn post_distance(
    State(state): State<Arc<AppState>>,
    query: Result<Query<DistanceQuery>, QueryRejection>,
    body: Result<Json<DistanceQuery>, JsonRejection>,
) -> Response {
    let query = match (query, body) {
        (Ok(Query(query)), _) => query,
        (Err(_), Ok(Json(query))) => query,
        // No JSON body at all: the query string is what the caller meant.
        (Err(rejection), Err(JsonRejection::MissingJsonContentType(_))) => {
            return rejection_response(rejection.body_text())
        }
        (Err(_), Err(rejection)) => return rejection_response(rejection.body_text()),
    };

    distance(&state, query).await
}

async fn distance(state: &AppState, query: DistanceQuery) -> Response {
    tracing::debug!(
        city1 = %query.city1,
        city2 = %query.city2,
        method = %query.method,
        "Distance query"
    );

    let resolver = match state.resolvers.try_select(&query.method) {
        Ok(resolver) => resolver,
        Err(e) => return error_response(&query, e),
    };

    match resolver.distance(&query.city1, &query.city2).await {
        Ok(distance) => {
            tracing::info!(
                city1 = %query.city1,
                city2 = %query.city2,
                method = %query.method,
                distance = distance,
                "Distance found"
            );
            (StatusCode::OK, Json(DistanceResponse { distance })).into_response()
        }
        Err(e) => error_response(&query, e),
    }
}

/// Create an error response for a distance query that could not be answered.
fn error_response(query: &DistanceQuery, e: GeoDistError) -> Response {
    tracing::warn!(
        city1 = %query.city1,
        city2 = %query.city2,
        method = %query.method,
        error = %e,
        "Distance query failed"
    );

    failure(e.to_string())
}

/// Create an error response for a request whose query could not be extracted.
fn rejection_response(message: String) -> Response {
    tracing::warn!(error = %message, "Invalid distance query");
    failure(message)
}

/// Every `/distance` failure is a server error carrying the message.
fn failure(error: String) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse { error }),
    )
        .into_response()
}

/// Look up a place in the gazetteer.
///
/// Matching is exact and case-sensitive, on the name or its ASCII form.
#[utoipa::path(
    get,
    path = "/places/{name}",
    tag = "places",
    params(("name" = String, Path, description = "Place name")),
    responses(
        (status = 200, description = "Place found", body = PlaceResponse),
        (status = 404, description = "Place not in the gazetteer", body = ErrorResponse)
    )
)]
pub async fn get_place(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> impl IntoResponse {
    match state.resolvers.gazetteer().get(&name) {
        Ok(place) => (StatusCode::OK, Json(PlaceResponse::from(place))).into_response(),
        Err(e) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )
            .into_response(),
    }
}

/// Health check endpoint.
///
/// Returns service status, version and gazetteer size.
#[utoipa::path(
    get,
    path = "/health",
    tag = "system",
    responses((status = 200, description = "Service is healthy", body = HealthResponse))
)]
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        places: state.resolvers.gazetteer().len(),
    })
}

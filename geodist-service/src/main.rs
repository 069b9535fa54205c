//! geodist Service - HTTP microservice for distances between named places.
//!
//! Computes great-circle distances between two places, resolving their
//! coordinates from a world-cities gazetteer, a remote geocoder, or not at all
//! (mock mode).
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `GEODIST_GAZETTEER` | Path to the world-cities CSV | `worldcities.csv` |
//! | `GEODIST_GEOCODER_URL` | Nominatim-compatible search endpoint | OpenStreetMap Nominatim |
//! | `GEODIST_GEOCODER_TIMEOUT` | Outbound request timeout in seconds | 10 |
//! | `GEODIST_USER_AGENT` | `User-Agent` for outbound requests | `geodist/<version>` |
//! | `GEODIST_PORT` | HTTP server port | 3003 |
//! | `RUST_LOG` | Log level (e.g., "info", "debug") | "info" |
//!
//! ## Endpoints
//!
//! - `GET /distance?city1=A&city2=B&method=CSV` - Distance between two places
//! - `POST /distance` - Same, from the query string or a `{"city1", "city2", "method"}` JSON body
//! - `GET /places/{name}` - Gazetteer entry for a place
//! - `GET /health` - Health check
//! - `GET /docs` - OpenAPI documentation (Swagger UI)

use std::net::SocketAddr;
use std::sync::Arc;

use geodist::{Gazetteer, Geocoder, GeocoderConfig, Resolvers};
use geodist_service::{router, AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Default gazetteer location, relative to the working directory.
const DEFAULT_GAZETTEER: &str = "worldcities.csv";

/// Default HTTP port.
const DEFAULT_PORT: u16 = 3003;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "geodist_service=info,geodist=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let port: u16 = std::env::var("GEODIST_PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_PORT);

    let gazetteer_path =
        std::env::var("GEODIST_GAZETTEER").unwrap_or_else(|_| DEFAULT_GAZETTEER.to_string());

    // The gazetteer must be complete before we serve anything.
    let gazetteer = match Gazetteer::from_path(&gazetteer_path) {
        Ok(gazetteer) => gazetteer,
        Err(e) => {
            tracing::error!(path = %gazetteer_path, error = %e, "Failed to load gazetteer");
            return Err(e.into());
        }
    };

    let geocoder_config = GeocoderConfig::from_env();
    tracing::info!(
        gazetteer = %gazetteer_path,
        places = gazetteer.len(),
        geocoder_url = %geocoder_config.base_url,
        geocoder_timeout_secs = geocoder_config.timeout_secs,
        port = port,
        "Starting geodist service"
    );
    let geocoder = Geocoder::new(geocoder_config)?;

    let state = Arc::new(AppState {
        resolvers: Resolvers::new(Arc::new(gazetteer), Arc::new(geocoder)),
    });

    let app = router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("Listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
